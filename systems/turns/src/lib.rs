#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Turn controller that gates move requests and alternates the active side.
//!
//! A request is checked against the active side and the grid bounds, handed
//! to the movement system, and the resulting step commands are applied to the
//! world one by one. The turn then passes to the other side whether or not the
//! tank actually moved. Refused requests leave the world and turn untouched.

use rand::Rng;
use tank_attack_core::{
    Command, Event, GameConfig, MoveError, Path, Position, TankId, TankSnapshot,
};
use tank_attack_system_movement::Movement;
use tank_attack_system_pathfinding::Passability;
use tank_attack_world::{self as world, query, World};

/// Validates move requests and drives them through the movement system.
#[derive(Clone, Copy, Debug, Default)]
pub struct TurnController {
    movement: Movement,
}

impl TurnController {
    /// Creates a controller around the provided movement system.
    #[must_use]
    pub const fn new(movement: Movement) -> Self {
        Self { movement }
    }

    /// Creates a controller honouring the game's occupancy setting.
    #[must_use]
    pub const fn from_config(config: &GameConfig) -> Self {
        Self::new(Movement::new(Passability::from_occupancy_flag(
            config.occupancy_blocks_paths,
        )))
    }

    /// Moves `tank` toward `target` and hands the turn to the other side.
    ///
    /// Returns the path the tank followed; an empty or single-cell path means
    /// it stayed put. Every event produced along the way, including the
    /// rejection of a refused request, is appended to `out_events`.
    pub fn request_move<R>(
        &self,
        world: &mut World,
        tank: TankId,
        target: Position,
        rng: &mut R,
        out_events: &mut Vec<Event>,
    ) -> Result<Path, MoveError>
    where
        R: Rng + ?Sized,
    {
        let snapshot = match validate(world, tank, target) {
            Ok(snapshot) => snapshot,
            Err(reason) => {
                tracing::warn!(%tank, ?target, %reason, "move rejected");
                out_events.push(Event::MoveRejected { tank, reason });
                return Err(reason);
            }
        };

        let mut commands = Vec::new();
        let plan = self
            .movement
            .handle(&snapshot, target, query::grid(world), rng, &mut commands);
        out_events.push(Event::MovePlanned {
            tank,
            algorithm: plan.algorithm,
            path: plan.path.clone(),
        });

        for command in commands {
            world::apply(world, command, out_events);
        }
        world::apply(world, Command::EndTurn, out_events);

        Ok(plan.path)
    }
}

fn validate(world: &World, tank: TankId, target: Position) -> Result<TankSnapshot, MoveError> {
    let snapshot = query::tank(world, tank).ok_or(MoveError::UnknownTank { tank })?;

    let active = query::active_side(world);
    if snapshot.side != active {
        return Err(MoveError::InactiveActor { tank, active });
    }

    if !query::grid(world).is_valid(target) {
        return Err(MoveError::InvalidPosition { position: target });
    }

    Ok(snapshot)
}
