#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Movement system that picks a planner per request and proposes tank steps.
//!
//! Each request draws one number in `1..=100` and compares it against the
//! tank's [`MovementProfile`]. The chosen planner produces a full path which
//! is turned into one [`Command::StepTank`] per hop. Nothing re-plans halfway:
//! the world applies the whole batch in order.

use std::ops::RangeInclusive;

use rand::Rng;
use tank_attack_core::{Algorithm, Command, Faction, GridView, Path, Position, TankId, TankSnapshot};
use tank_attack_system_pathfinding::{bfs, dijkstra, random_step, uniform_cost, Passability};

/// Range of the per-request draw compared against a profile's primary chance.
pub const DRAW_RANGE: RangeInclusive<u32> = 1..=100;

/// Probability split between a faction's primary planner and the random step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MovementProfile {
    primary: Algorithm,
    primary_chance: u32,
}

impl MovementProfile {
    /// Creates a profile that uses `primary` when the draw is at most `primary_chance`.
    #[must_use]
    pub const fn new(primary: Algorithm, primary_chance: u32) -> Self {
        Self {
            primary,
            primary_chance,
        }
    }

    /// Fixed profile table: BFS factions flip a coin, Dijkstra factions mostly plan.
    #[must_use]
    pub const fn for_faction(faction: Faction) -> Self {
        match faction {
            Faction::Blue | Faction::Cyan => Self::new(Algorithm::Bfs, 50),
            Faction::Red | Faction::Yellow => Self::new(Algorithm::Dijkstra, 80),
        }
    }

    /// Planner used on a good draw.
    #[must_use]
    pub const fn primary(&self) -> Algorithm {
        self.primary
    }

    /// Percentage of draws that select the primary planner.
    #[must_use]
    pub const fn primary_chance(&self) -> u32 {
        self.primary_chance
    }

    /// Algorithm selected by a draw from [`DRAW_RANGE`].
    #[must_use]
    pub const fn choose(&self, draw: u32) -> Algorithm {
        if draw <= self.primary_chance {
            self.primary
        } else {
            Algorithm::RandomStep
        }
    }
}

/// Outcome of planning a single move request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MovePlan {
    /// Tank the plan belongs to.
    pub tank: TankId,
    /// Draw taken from [`DRAW_RANGE`].
    pub draw: u32,
    /// Planner chosen by the draw.
    pub algorithm: Algorithm,
    /// Cells the tank will visit. Empty or single-cell paths move nothing.
    pub path: Path,
}

/// System that translates move requests into step commands.
#[derive(Clone, Copy, Debug, Default)]
pub struct Movement {
    passability: Passability,
}

impl Movement {
    /// Creates a movement system that plans under the provided passability policy.
    #[must_use]
    pub const fn new(passability: Passability) -> Self {
        Self { passability }
    }

    /// Passability policy handed to every planner.
    #[must_use]
    pub const fn passability(&self) -> Passability {
        self.passability
    }

    /// Plans a move for `tank` toward `target` and emits one step command per hop.
    ///
    /// The random step ignores `target`. Exactly one value is drawn from `rng`
    /// for the algorithm choice; the random step then consumes its own shuffle.
    /// A request for the tank's own cell still takes the draw but always
    /// yields `[start]` and no commands, whichever planner was chosen.
    pub fn handle<R>(
        &self,
        tank: &TankSnapshot,
        target: Position,
        grid: GridView<'_>,
        rng: &mut R,
        out: &mut Vec<Command>,
    ) -> MovePlan
    where
        R: Rng + ?Sized,
    {
        let profile = MovementProfile::for_faction(tank.faction);
        let draw = rng.gen_range(DRAW_RANGE);
        let algorithm = profile.choose(draw);

        let start = tank.position;
        let path = if start == target {
            Path::from_cells(vec![start])
        } else {
            match algorithm {
                Algorithm::Bfs => bfs(grid, start, target, self.passability),
                Algorithm::Dijkstra => {
                    dijkstra(grid, start, target, self.passability, uniform_cost)
                }
                Algorithm::RandomStep => random_step(grid, start, self.passability, rng),
            }
        };

        tracing::debug!(
            tank = %tank.id,
            faction = ?tank.faction,
            draw,
            %algorithm,
            cells = path.len(),
            "planned move"
        );

        if !path.is_trivial() {
            out.extend(path.steps().map(|(_, to)| Command::StepTank { tank: tank.id, to }));
        }

        MovePlan {
            tank: tank.id,
            draw,
            algorithm,
            path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_accessors_expose_the_split() {
        let profile = MovementProfile::for_faction(Faction::Cyan);
        assert_eq!(profile.primary(), Algorithm::Bfs);
        assert_eq!(profile.primary_chance(), 50);

        let profile = MovementProfile::for_faction(Faction::Red);
        assert_eq!(profile.primary(), Algorithm::Dijkstra);
        assert_eq!(profile.primary_chance(), 80);
    }

    #[test]
    fn movement_defaults_to_obstacles_only() {
        assert_eq!(Movement::default().passability(), Passability::ObstaclesOnly);
        assert_eq!(
            Movement::new(Passability::OccupancyBlocks).passability(),
            Passability::OccupancyBlocks
        );
    }

    #[test]
    fn profile_table_matches_faction_groups() {
        assert_eq!(
            MovementProfile::for_faction(Faction::Blue),
            MovementProfile::new(Algorithm::Bfs, 50)
        );
        assert_eq!(
            MovementProfile::for_faction(Faction::Cyan),
            MovementProfile::new(Algorithm::Bfs, 50)
        );
        assert_eq!(
            MovementProfile::for_faction(Faction::Red),
            MovementProfile::new(Algorithm::Dijkstra, 80)
        );
        assert_eq!(
            MovementProfile::for_faction(Faction::Yellow),
            MovementProfile::new(Algorithm::Dijkstra, 80)
        );
    }

    #[test]
    fn choose_switches_to_random_step_above_threshold() {
        let bfs = MovementProfile::for_faction(Faction::Blue);
        assert_eq!(bfs.choose(1), Algorithm::Bfs);
        assert_eq!(bfs.choose(50), Algorithm::Bfs);
        assert_eq!(bfs.choose(51), Algorithm::RandomStep);

        let dijkstra = MovementProfile::for_faction(Faction::Yellow);
        assert_eq!(dijkstra.choose(80), Algorithm::Dijkstra);
        assert_eq!(dijkstra.choose(81), Algorithm::RandomStep);
        assert_eq!(dijkstra.choose(100), Algorithm::RandomStep);
    }
}
