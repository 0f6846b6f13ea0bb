//! Plain-text rendering of the battlefield.

use std::fmt::Write;

use tank_attack_core::{Cell, Faction, Path, Position};
use tank_attack_world::{query, World};

const FREE: char = '.';
const OBSTACLE: char = '#';
const TRAIL: char = '*';

/// Letter drawn for a tank of the provided faction.
pub(crate) const fn glyph(faction: Faction) -> char {
    match faction {
        Faction::Red => 'R',
        Faction::Blue => 'B',
        Faction::Yellow => 'Y',
        Faction::Cyan => 'C',
    }
}

/// Draws the grid with a column header and row labels.
///
/// Tanks take precedence over the trail, which is drawn on every free cell of
/// `trail`.
pub(crate) fn render(world: &World, trail: &Path) -> String {
    let grid = query::grid(world);
    let tanks = query::tank_view(world);
    let mut board = String::new();

    board.push_str("   ");
    for column in 0..grid.columns() {
        let _ = write!(board, "{column:>3}");
    }
    board.push('\n');

    for row in 0..grid.rows() {
        let _ = write!(board, "{row:>3}");
        for column in 0..grid.columns() {
            let position = Position::new(row, column);
            let symbol = match query::tank_at(world, position).and_then(|id| tanks.get(id)) {
                Some(tank) => glyph(tank.faction),
                None => match grid.cell(position) {
                    Some(Cell::Obstacle) => OBSTACLE,
                    _ if trail.cells().contains(&position) => TRAIL,
                    _ => FREE,
                },
            };
            let _ = write!(board, "{symbol:>3}");
        }
        board.push('\n');
    }

    board
}
