use std::collections::VecDeque;

use tank_attack_core::{GridView, Path, Position};

use crate::{neighbors, reconstruct, Passability};

/// Unweighted shortest path by hop count.
///
/// Cells are expanded in FIFO order and each is discovered at most once; the
/// first discovery fixes its predecessor. Returns an empty path when either
/// position is invalid or the target cannot be reached, and `[start]` when
/// the start already is the target.
#[must_use]
pub fn bfs(grid: GridView<'_>, start: Position, target: Position, passability: Passability) -> Path {
    if !grid.is_valid(start) || !grid.is_valid(target) {
        return Path::empty();
    }
    if start == target {
        return Path::from_cells(vec![start]);
    }
    if !passability.allows(&grid, target) {
        return Path::empty();
    }

    let mut visited = vec![false; grid.len()];
    let mut previous: Vec<Option<Position>> = vec![None; grid.len()];
    let mut queue = VecDeque::new();

    if let Some(index) = grid.index(start) {
        visited[index] = true;
        queue.push_back(start);
    }

    while let Some(cell) = queue.pop_front() {
        if cell == target {
            return Path::from_cells(reconstruct(&grid, &previous, target));
        }

        for neighbor in neighbors(&grid, cell) {
            let Some(index) = grid.index(neighbor) else {
                continue;
            };
            if visited[index] || !passability.allows(&grid, neighbor) {
                continue;
            }

            visited[index] = true;
            previous[index] = Some(cell);
            queue.push_back(neighbor);
        }
    }

    Path::empty()
}
