#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Tank Attack.
//!
//! The world owns the single [`GridMap`], the tanks standing on it and the
//! side that currently holds the turn. It only changes through [`apply`];
//! everything else reads it through the [`query`] module.

mod grid;

pub use grid::GridMap;

use rand::{seq::SliceRandom, Rng};
use tank_attack_core::{
    direction_between, Command, Event, Faction, GameConfig, Health, ObstacleRun, Position,
    SetupError, Side, TankId,
};

/// Explicit description of a world used instead of random generation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    rows: u32,
    columns: u32,
    obstacles: Vec<ObstacleRun>,
    tanks: Vec<TankSeed>,
    max_health: u32,
    damage: u32,
}

impl Layout {
    /// Creates an empty layout of the provided dimensions.
    #[must_use]
    pub fn new(rows: u32, columns: u32) -> Self {
        let defaults = GameConfig::default();
        Self {
            rows,
            columns,
            obstacles: Vec::new(),
            tanks: Vec::new(),
            max_health: defaults.max_health,
            damage: defaults.damage,
        }
    }

    /// Adds an obstacle run to the layout.
    #[must_use]
    pub fn with_obstacle(mut self, run: ObstacleRun) -> Self {
        self.obstacles.push(run);
        self
    }

    /// Adds a tank; identifiers follow insertion order starting from zero.
    #[must_use]
    pub fn with_tank(mut self, faction: Faction, position: Position) -> Self {
        self.tanks.push(TankSeed { faction, position });
        self
    }

    /// Overrides the health and damage values given to every tank.
    #[must_use]
    pub fn with_stats(mut self, max_health: u32, damage: u32) -> Self {
        self.max_health = max_health;
        self.damage = damage;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct TankSeed {
    faction: Faction,
    position: Position,
}

#[derive(Clone, Debug)]
struct Tank {
    id: TankId,
    faction: Faction,
    position: Position,
    health: Health,
    damage: u32,
}

/// Represents the authoritative Tank Attack world state.
#[derive(Clone, Debug)]
pub struct World {
    grid: GridMap,
    obstacles: Vec<ObstacleRun>,
    tanks: Vec<Tank>,
    active: Side,
}

impl World {
    /// Generates a new game: random obstacles first, then each side's tanks
    /// inside its starting band of columns.
    ///
    /// Side one starts in the leftmost `band_width` columns, side two in the
    /// rightmost. Factions alternate through each side's roster.
    pub fn generate<R>(config: &GameConfig, rng: &mut R) -> Result<Self, SetupError>
    where
        R: Rng + ?Sized,
    {
        let mut grid = GridMap::new(config.rows, config.columns)?;
        if config.band_width == 0 || config.band_width.saturating_mul(2) > config.columns {
            return Err(SetupError::BandTooWide {
                band_width: config.band_width,
                columns: config.columns,
            });
        }

        let obstacles = grid.generate_obstacles(&config.obstacles, rng)?;

        let mut seeds = Vec::new();
        for side in [Side::One, Side::Two] {
            let band = match side {
                Side::One => 0..config.band_width,
                Side::Two => config.columns - config.band_width..config.columns,
            };
            let mut free = grid.free_cells_in_columns(band);
            let requested = config.tanks_per_side;
            if free.len() < usize::try_from(requested).unwrap_or(usize::MAX) {
                return Err(SetupError::TankPlacementExhausted {
                    side,
                    requested,
                    available: free.len() as u32,
                });
            }

            free.shuffle(rng);
            let roster = Faction::roster(side);
            for (index, position) in free.into_iter().take(requested as usize).enumerate() {
                seeds.push(TankSeed {
                    faction: roster[index % roster.len()],
                    position,
                });
            }
        }

        let world = Self::assemble(grid, obstacles, &seeds, config.max_health, config.damage)?;
        tracing::info!(
            rows = config.rows,
            columns = config.columns,
            obstacles = world.obstacles.len(),
            tanks = world.tanks.len(),
            "generated new game"
        );
        Ok(world)
    }

    /// Builds a world from an explicit layout.
    pub fn from_layout(layout: Layout) -> Result<Self, SetupError> {
        let mut grid = GridMap::new(layout.rows, layout.columns)?;
        for run in &layout.obstacles {
            grid.place_obstacle_run(*run)?;
        }

        Self::assemble(
            grid,
            layout.obstacles,
            &layout.tanks,
            layout.max_health,
            layout.damage,
        )
    }

    fn assemble(
        mut grid: GridMap,
        obstacles: Vec<ObstacleRun>,
        seeds: &[TankSeed],
        max_health: u32,
        damage: u32,
    ) -> Result<Self, SetupError> {
        let mut tanks = Vec::with_capacity(seeds.len());
        for (index, seed) in seeds.iter().enumerate() {
            if !grid.is_valid(seed.position) {
                return Err(SetupError::TankOutOfBounds {
                    position: seed.position,
                });
            }
            if grid.is_obstacle(seed.position) {
                return Err(SetupError::TankOnObstacle {
                    position: seed.position,
                });
            }
            if grid.is_occupied(seed.position) {
                return Err(SetupError::TankOnOccupiedCell {
                    position: seed.position,
                });
            }

            grid.occupy(seed.position);
            tanks.push(Tank {
                id: TankId::new(index as u32),
                faction: seed.faction,
                position: seed.position,
                health: Health::full(max_health),
                damage,
            });
        }

        Ok(Self {
            grid,
            obstacles,
            tanks,
            active: Side::One,
        })
    }

    fn tank_index(&self, id: TankId) -> Option<usize> {
        self.tanks.iter().position(|tank| tank.id == id)
    }

    fn step_tank(&mut self, id: TankId, to: Position, out_events: &mut Vec<Event>) {
        let Some(index) = self.tank_index(id) else {
            out_events.push(Event::StepRejected { tank: id, to });
            return;
        };

        let from = self.tanks[index].position;
        if !self.grid.is_valid(to)
            || self.grid.is_obstacle(to)
            || direction_between(from, to).is_none()
        {
            tracing::debug!(tank = %id, ?from, ?to, "rejected step");
            out_events.push(Event::StepRejected { tank: id, to });
            return;
        }

        self.tanks[index].position = to;
        let still_occupied = self.tanks.iter().any(|tank| tank.position == from);
        if !still_occupied {
            self.grid.vacate(from);
        }
        self.grid.occupy(to);

        tracing::debug!(tank = %id, ?from, ?to, "tank stepped");
        out_events.push(Event::TankMoved { tank: id, from, to });
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::StepTank { tank, to } => world.step_tank(tank, to, out_events),
        Command::EndTurn => {
            world.active = world.active.opposite();
            tracing::info!(active = ?world.active, "turn changed");
            out_events.push(Event::TurnChanged {
                active: world.active,
            });
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::{Tank, World};
    use tank_attack_core::{GridView, ObstacleRun, Position, Side, TankId, TankSnapshot, TankView};

    /// Exposes a read-only view of the cell grid.
    #[must_use]
    pub fn grid(world: &World) -> GridView<'_> {
        world.grid.view()
    }

    /// Obstacle runs placed when the world was created.
    #[must_use]
    pub fn obstacles(world: &World) -> &[ObstacleRun] {
        &world.obstacles
    }

    /// Side currently permitted to move.
    #[must_use]
    pub fn active_side(world: &World) -> Side {
        world.active
    }

    /// Captures a read-only view of every tank on the map.
    #[must_use]
    pub fn tank_view(world: &World) -> TankView {
        TankView::from_snapshots(world.tanks.iter().map(snapshot).collect())
    }

    /// Snapshot of a single tank.
    #[must_use]
    pub fn tank(world: &World, id: TankId) -> Option<TankSnapshot> {
        world.tanks.iter().find(|tank| tank.id == id).map(snapshot)
    }

    /// Lowest-numbered tank standing on the provided cell, if any.
    #[must_use]
    pub fn tank_at(world: &World, position: Position) -> Option<TankId> {
        world
            .tanks
            .iter()
            .filter(|tank| tank.position == position)
            .map(|tank| tank.id)
            .min()
    }

    fn snapshot(tank: &Tank) -> TankSnapshot {
        TankSnapshot {
            id: tank.id,
            faction: tank.faction,
            side: tank.faction.side(),
            position: tank.position,
            health: tank.health,
            damage: tank.damage,
        }
    }
}
