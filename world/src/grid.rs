//! Dense occupancy grid that backs the authoritative world.

use rand::Rng;
use tank_attack_core::{
    Cell, GridView, ObstacleConfig, ObstacleRun, Orientation, Position, SetupError,
};

/// Fixed-size grid of [`Cell`] states stored in row-major order.
///
/// Obstacles are written while the map is being created and never cleared
/// afterwards: [`GridMap::vacate`] and [`GridMap::occupy`] both leave obstacle
/// cells untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridMap {
    rows: u32,
    columns: u32,
    cells: Vec<Cell>,
}

impl GridMap {
    /// Creates a grid of the provided dimensions with every cell free.
    ///
    /// Both dimensions must be non-zero and the cell count must fit in a `u32`.
    pub fn new(rows: u32, columns: u32) -> Result<Self, SetupError> {
        let capacity = rows
            .checked_mul(columns)
            .filter(|count| *count > 0)
            .and_then(|count| usize::try_from(count).ok())
            .ok_or(SetupError::InvalidDimensions { rows, columns })?;
        Ok(Self {
            rows,
            columns,
            cells: vec![Cell::Free; capacity],
        })
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Read-only view consumed by planners and adapters.
    #[must_use]
    pub fn view(&self) -> GridView<'_> {
        GridView::new(&self.cells, self.rows, self.columns)
    }

    /// Reports whether the position lies inside the grid.
    #[must_use]
    pub fn is_valid(&self, position: Position) -> bool {
        self.view().is_valid(position)
    }

    /// Reports whether the position holds an obstacle. `false` when out of bounds.
    #[must_use]
    pub fn is_obstacle(&self, position: Position) -> bool {
        self.view().is_obstacle(position)
    }

    /// Reports whether the position holds an obstacle or a tank. `false` when out of bounds.
    #[must_use]
    pub fn is_occupied(&self, position: Position) -> bool {
        self.view().is_occupied(position)
    }

    /// Marks a free cell as occupied. Invalid positions and obstacles are ignored.
    pub fn occupy(&mut self, position: Position) {
        if let Some(slot) = self.slot_mut(position) {
            if *slot != Cell::Obstacle {
                *slot = Cell::Occupied;
            }
        }
    }

    /// Marks an occupied cell as free. Invalid positions and obstacles are ignored.
    pub fn vacate(&mut self, position: Position) {
        if let Some(slot) = self.slot_mut(position) {
            if *slot != Cell::Obstacle {
                *slot = Cell::Free;
            }
        }
    }

    /// Places an explicit obstacle run.
    ///
    /// Every covered cell must lie inside the grid and be free; otherwise the
    /// grid is left unchanged.
    pub fn place_obstacle_run(&mut self, run: ObstacleRun) -> Result<(), SetupError> {
        if !self.run_fits(run) {
            return Err(SetupError::ObstacleOutOfBounds {
                origin: run.origin(),
            });
        }
        if !self.run_is_free(run) {
            return Err(SetupError::ObstacleOverlap {
                origin: run.origin(),
            });
        }
        self.write_run(run);
        Ok(())
    }

    /// Randomly places `config.count` non-overlapping obstacle runs.
    ///
    /// Each attempt samples an anchor cell, an orientation and a length in
    /// `min_length..=max_length`, and is accepted only when every covered cell
    /// is inside the grid and currently free. Gives up with
    /// [`SetupError::ObstacleGenerationExhausted`] once `config.max_attempts`
    /// samples have been drawn; the grid keeps the runs placed so far.
    pub fn generate_obstacles<R>(
        &mut self,
        config: &ObstacleConfig,
        rng: &mut R,
    ) -> Result<Vec<ObstacleRun>, SetupError>
    where
        R: Rng + ?Sized,
    {
        if config.min_length == 0 || config.min_length > config.max_length {
            return Err(SetupError::InvalidObstacleLength {
                min: config.min_length,
                max: config.max_length,
            });
        }

        let mut placed = Vec::with_capacity(usize::try_from(config.count).unwrap_or(0));
        if config.count == 0 {
            return Ok(placed);
        }

        let mut attempts = 0;
        while (placed.len() as u32) < config.count {
            if attempts >= config.max_attempts {
                tracing::warn!(
                    placed = placed.len(),
                    requested = config.count,
                    attempts,
                    "obstacle placement budget exhausted"
                );
                return Err(SetupError::ObstacleGenerationExhausted {
                    placed: placed.len() as u32,
                    requested: config.count,
                    attempts,
                });
            }
            attempts += 1;

            let origin = Position::new(
                rng.gen_range(0..self.rows),
                rng.gen_range(0..self.columns),
            );
            let orientation = if rng.gen_bool(0.5) {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let length = rng.gen_range(config.min_length..=config.max_length);
            let run = ObstacleRun::new(origin, orientation, length);

            if !self.run_fits(run) || !self.run_is_free(run) {
                continue;
            }

            self.write_run(run);
            tracing::debug!(?origin, ?orientation, length, attempts, "placed obstacle run");
            placed.push(run);
        }

        Ok(placed)
    }

    /// Free cells inside the provided column range, in row-major order.
    pub(crate) fn free_cells_in_columns(
        &self,
        columns: std::ops::Range<u32>,
    ) -> Vec<Position> {
        let mut cells = Vec::new();
        for row in 0..self.rows {
            for column in columns.clone() {
                let position = Position::new(row, column);
                if self.view().cell(position) == Some(Cell::Free) {
                    cells.push(position);
                }
            }
        }
        cells
    }

    fn run_fits(&self, run: ObstacleRun) -> bool {
        let Some(last_offset) = run.length().checked_sub(1) else {
            return false;
        };
        let origin = run.origin();
        let last = match run.orientation() {
            Orientation::Horizontal => origin
                .column()
                .checked_add(last_offset)
                .map(|column| Position::new(origin.row(), column)),
            Orientation::Vertical => origin
                .row()
                .checked_add(last_offset)
                .map(|row| Position::new(row, origin.column())),
        };
        last.is_some_and(|last| self.is_valid(origin) && self.is_valid(last))
    }

    fn run_is_free(&self, run: ObstacleRun) -> bool {
        let view = self.view();
        run.cells().all(|cell| view.cell(cell) == Some(Cell::Free))
    }

    fn write_run(&mut self, run: ObstacleRun) {
        for cell in run.cells() {
            if let Some(slot) = self.slot_mut(cell) {
                *slot = Cell::Obstacle;
            }
        }
    }

    fn slot_mut(&mut self, position: Position) -> Option<&mut Cell> {
        let index = self.view().index(position)?;
        self.cells.get_mut(index)
    }
}
