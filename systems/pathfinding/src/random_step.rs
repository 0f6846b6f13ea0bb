use rand::{seq::SliceRandom, Rng};
use tank_attack_core::{Direction, GridView, Path, Position};

use crate::Passability;

/// Single step toward a randomly chosen open neighbour.
///
/// The four cardinal directions are shuffled and the first one leading to an
/// enterable cell wins, giving `[start, neighbour]`. A boxed-in start yields
/// `[start]`; an invalid start yields an empty path.
#[must_use]
pub fn random_step<R>(
    grid: GridView<'_>,
    start: Position,
    passability: Passability,
    rng: &mut R,
) -> Path
where
    R: Rng + ?Sized,
{
    if !grid.is_valid(start) {
        return Path::empty();
    }

    let mut directions = Direction::ALL;
    directions.shuffle(rng);

    directions
        .into_iter()
        .filter_map(|direction| start.neighbor(direction))
        .find(|candidate| passability.allows(&grid, *candidate))
        .map_or_else(
            || Path::from_cells(vec![start]),
            |candidate| Path::from_cells(vec![start, candidate]),
        )
}
