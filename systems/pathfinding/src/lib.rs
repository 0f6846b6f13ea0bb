#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shortest-path planners and the random-step fallback over the cell grid.
//!
//! Every planner works on a read-only [`GridView`] with 4-directional
//! adjacency. Out-of-bounds cells and obstacles never enter the search graph;
//! whether cells holding tanks are also excluded is decided by the caller's
//! [`Passability`]. Planners return a [`Path`](tank_attack_core::Path) that
//! starts at the start cell, or an empty path when no move is possible.

mod bfs;
mod dijkstra;
mod random_step;

pub use bfs::bfs;
pub use dijkstra::{dijkstra, uniform_cost};
pub use random_step::random_step;

use tank_attack_core::{Direction, GridView, Position};

/// Decides which cells a planner may enter besides the start cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Passability {
    /// Only obstacles block movement; tanks may share cells.
    #[default]
    ObstaclesOnly,
    /// Obstacles and cells occupied by tanks both block movement.
    OccupancyBlocks,
}

impl Passability {
    /// Selects the policy matching the game's occupancy setting.
    #[must_use]
    pub const fn from_occupancy_flag(occupancy_blocks_paths: bool) -> Self {
        if occupancy_blocks_paths {
            Self::OccupancyBlocks
        } else {
            Self::ObstaclesOnly
        }
    }

    /// Reports whether a planner may step onto `position`.
    #[must_use]
    pub fn allows(self, grid: &GridView<'_>, position: Position) -> bool {
        if !grid.is_valid(position) {
            return false;
        }
        match self {
            Self::ObstaclesOnly => !grid.is_obstacle(position),
            Self::OccupancyBlocks => !grid.is_occupied(position),
        }
    }
}

fn neighbors(grid: &GridView<'_>, cell: Position) -> impl Iterator<Item = Position> {
    let rows = grid.rows();
    let columns = grid.columns();
    Direction::ALL
        .into_iter()
        .filter_map(move |direction| cell.neighbor(direction))
        .filter(move |neighbor| neighbor.row() < rows && neighbor.column() < columns)
}

/// Walks the predecessor table back from `target` and returns the cells in
/// start-to-target order.
fn reconstruct(
    grid: &GridView<'_>,
    previous: &[Option<Position>],
    target: Position,
) -> Vec<Position> {
    let mut cells = vec![target];
    let mut at = target;
    while let Some(parent) = grid
        .index(at)
        .and_then(|index| previous.get(index).copied().flatten())
    {
        cells.push(parent);
        at = parent;
    }
    cells.reverse();
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use tank_attack_core::Cell;

    #[test]
    fn neighbors_stay_inside_the_grid() {
        let cells = [Cell::Free; 6];
        let grid = GridView::new(&cells, 2, 3);

        let corner: Vec<_> = neighbors(&grid, Position::new(0, 0)).collect();
        assert_eq!(corner, vec![Position::new(0, 1), Position::new(1, 0)]);

        let edge: Vec<_> = neighbors(&grid, Position::new(1, 1)).collect();
        assert_eq!(
            edge,
            vec![Position::new(0, 1), Position::new(1, 2), Position::new(1, 0)]
        );
    }

    #[test]
    fn occupancy_policy_blocks_tanks_only_when_requested() {
        let cells = [Cell::Free, Cell::Occupied, Cell::Obstacle];
        let grid = GridView::new(&cells, 1, 3);

        assert!(Passability::ObstaclesOnly.allows(&grid, Position::new(0, 1)));
        assert!(!Passability::OccupancyBlocks.allows(&grid, Position::new(0, 1)));
        assert!(!Passability::ObstaclesOnly.allows(&grid, Position::new(0, 2)));
        assert!(!Passability::ObstaclesOnly.allows(&grid, Position::new(0, 3)));
        assert!(Passability::OccupancyBlocks.allows(&grid, Position::new(0, 0)));
    }
}
