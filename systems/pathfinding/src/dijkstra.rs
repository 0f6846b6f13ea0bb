use std::{cmp::Reverse, collections::BinaryHeap};

use tank_attack_core::{GridView, Path, Position};

use crate::{neighbors, reconstruct, Passability};

/// Edge cost used by the current terrain: every step costs one.
#[must_use]
pub fn uniform_cost(_from: Position, _to: Position) -> u32 {
    1
}

/// Weighted shortest path using a min-priority queue keyed by accumulated cost.
///
/// `edge_cost` prices the step between two adjacent cells. Unreached cells
/// hold `u32::MAX` and costs accumulate with saturation, so a saturated cost
/// never relaxes anything. A neighbour is pushed only when its cost strictly
/// improves; entries with equal priority leave the queue in push order, so the
/// result is one shortest path, not a canonical one.
///
/// Invalid positions and unreachable targets yield an empty path.
#[must_use]
pub fn dijkstra<C>(
    grid: GridView<'_>,
    start: Position,
    target: Position,
    passability: Passability,
    mut edge_cost: C,
) -> Path
where
    C: FnMut(Position, Position) -> u32,
{
    if !grid.is_valid(start) || !grid.is_valid(target) {
        return Path::empty();
    }
    if start == target {
        return Path::from_cells(vec![start]);
    }
    if !passability.allows(&grid, target) {
        return Path::empty();
    }
    let Some(start_index) = grid.index(start) else {
        return Path::empty();
    };

    let mut distances = vec![u32::MAX; grid.len()];
    let mut previous: Vec<Option<Position>> = vec![None; grid.len()];
    let mut queue = BinaryHeap::new();
    let mut sequence: u64 = 0;

    distances[start_index] = 0;
    queue.push(Reverse((0_u32, sequence, start)));

    while let Some(Reverse((distance, _, cell))) = queue.pop() {
        let Some(cell_index) = grid.index(cell) else {
            continue;
        };
        if distance > distances[cell_index] {
            continue;
        }
        if cell == target {
            return Path::from_cells(reconstruct(&grid, &previous, target));
        }

        for neighbor in neighbors(&grid, cell) {
            if !passability.allows(&grid, neighbor) {
                continue;
            }
            let Some(neighbor_index) = grid.index(neighbor) else {
                continue;
            };

            let candidate = distance.saturating_add(edge_cost(cell, neighbor));
            if candidate >= distances[neighbor_index] {
                continue;
            }

            distances[neighbor_index] = candidate;
            previous[neighbor_index] = Some(cell);
            sequence += 1;
            queue.push(Reverse((candidate, sequence, neighbor)));
        }
    }

    Path::empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tank_attack_core::Cell;

    #[test]
    fn uniform_cost_matches_hop_count() {
        let cells = vec![Cell::Free; 5 * 5];
        let grid = GridView::new(&cells, 5, 5);
        let start = Position::new(4, 0);
        let target = Position::new(1, 3);

        let path = dijkstra(grid, start, target, Passability::ObstaclesOnly, uniform_cost);

        assert_eq!(path.len() as u32, start.manhattan_distance(target) + 1);
        assert_eq!(path.start(), Some(start));
        assert_eq!(path.destination(), Some(target));
    }

    #[test]
    fn expensive_cells_are_routed_around() {
        #[rustfmt::skip]
        let cells = [
            Cell::Free, Cell::Free, Cell::Free,
            Cell::Free, Cell::Free, Cell::Free,
        ];
        let grid = GridView::new(&cells, 2, 3);
        let swamp = Position::new(0, 1);
        let cost = |_from: Position, to: Position| if to == swamp { 10 } else { 1 };

        let path = dijkstra(
            grid,
            Position::new(0, 0),
            Position::new(0, 2),
            Passability::ObstaclesOnly,
            cost,
        );

        assert_eq!(
            path.cells(),
            &[
                Position::new(0, 0),
                Position::new(1, 0),
                Position::new(1, 1),
                Position::new(1, 2),
                Position::new(0, 2),
            ]
        );
    }

    #[test]
    fn obstacle_target_yields_empty_path() {
        let cells = [Cell::Free, Cell::Free, Cell::Obstacle];
        let grid = GridView::new(&cells, 1, 3);

        let path = dijkstra(
            grid,
            Position::new(0, 0),
            Position::new(0, 2),
            Passability::ObstaclesOnly,
            uniform_cost,
        );

        assert!(path.is_empty());
    }
}
