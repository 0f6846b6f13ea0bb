#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Tank Attack engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and the movement systems. Systems plan against a
//! read-only [`GridView`], express the mutations they want as [`Command`]
//! values, and the world executes those commands via its `apply` entry point
//! before broadcasting [`Event`] values describing what changed.

mod config;
mod error;

pub use config::{GameConfig, ObstacleConfig};
pub use error::{MoveError, SetupError};

use serde::{Deserialize, Serialize};

/// Commands that express all permissible world mutations after setup.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Relocates a tank by a single cell, keeping the grid and the tank in sync.
    StepTank {
        /// Identifier of the tank being moved.
        tank: TankId,
        /// Cell adjacent to the tank that it should occupy next.
        to: Position,
    },
    /// Ends the active side's turn and hands control to the opposite side.
    EndTurn,
}

/// Events broadcast after commands are processed or requests are resolved.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Event {
    /// Confirms that a tank moved between two adjacent cells.
    TankMoved {
        /// Identifier of the tank that moved.
        tank: TankId,
        /// Cell the tank occupied before the step.
        from: Position,
        /// Cell the tank occupies after the step.
        to: Position,
    },
    /// Reports that a single-cell relocation could not be applied.
    StepRejected {
        /// Identifier of the tank named by the command.
        tank: TankId,
        /// Requested destination cell.
        to: Position,
    },
    /// Announces that the provided side now holds the turn.
    TurnChanged {
        /// Side permitted to issue the next move request.
        active: Side,
    },
    /// Describes the plan selected for a move request before it is executed.
    MovePlanned {
        /// Identifier of the tank that will follow the path.
        tank: TankId,
        /// Algorithm that produced the path.
        algorithm: Algorithm,
        /// Cells the tank will visit, starting with its current cell.
        path: Path,
    },
    /// Reports that a move request was refused without advancing the turn.
    MoveRejected {
        /// Identifier of the tank named by the request.
        tank: TankId,
        /// Reason the request was refused.
        reason: MoveError,
    },
}

/// Location of a single grid cell expressed as row and column indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    row: u32,
    column: u32,
}

impl Position {
    /// Creates a new grid position.
    #[must_use]
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Computes the Manhattan distance between two positions.
    #[must_use]
    pub fn manhattan_distance(self, other: Position) -> u32 {
        self.row.abs_diff(other.row) + self.column.abs_diff(other.column)
    }

    /// Position one cell away in the provided direction.
    ///
    /// Returns `None` when the step would leave the non-negative quadrant.
    /// The upper grid bounds are not checked here.
    #[must_use]
    pub fn neighbor(self, direction: Direction) -> Option<Position> {
        match direction {
            Direction::North => self.row.checked_sub(1).map(|row| Self::new(row, self.column)),
            Direction::East => self
                .column
                .checked_add(1)
                .map(|column| Self::new(self.row, column)),
            Direction::South => self.row.checked_add(1).map(|row| Self::new(row, self.column)),
            Direction::West => self
                .column
                .checked_sub(1)
                .map(|column| Self::new(self.row, column)),
        }
    }
}

/// Cardinal movement directions available to tanks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// Every direction in clockwise order starting from north.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];
}

/// Direction that moves `from` onto `to`, if the cells are 4-adjacent.
#[must_use]
pub fn direction_between(from: Position, to: Position) -> Option<Direction> {
    let row_diff = from.row().abs_diff(to.row());
    let column_diff = from.column().abs_diff(to.column());

    if row_diff + column_diff != 1 {
        return None;
    }

    if column_diff == 1 {
        if to.column() > from.column() {
            Some(Direction::East)
        } else {
            Some(Direction::West)
        }
    } else if to.row() > from.row() {
        Some(Direction::South)
    } else {
        Some(Direction::North)
    }
}

/// State held by a single grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Nothing stands on the cell.
    #[default]
    Free,
    /// At least one tank stands on the cell.
    Occupied,
    /// Permanent obstacle placed when the map was created.
    Obstacle,
}

/// Read-only view into the dense, row-major cell grid.
#[derive(Clone, Copy, Debug)]
pub struct GridView<'a> {
    cells: &'a [Cell],
    rows: u32,
    columns: u32,
}

impl<'a> GridView<'a> {
    /// Captures a new view backed by the provided row-major cell slice.
    #[must_use]
    pub fn new(cells: &'a [Cell], rows: u32, columns: u32) -> Self {
        debug_assert!(
            cells.len() as u64 >= u64::from(rows) * u64::from(columns),
            "grid view of {rows}x{columns} backed by {} cells",
            cells.len()
        );
        Self {
            cells,
            rows,
            columns,
        }
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

    /// Total number of cells covered by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Reports whether the view covers no cells at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Reports whether the position lies inside the grid.
    #[must_use]
    pub fn is_valid(&self, position: Position) -> bool {
        self.index(position).is_some()
    }

    /// State of the cell at the provided position, if it lies inside the grid.
    #[must_use]
    pub fn cell(&self, position: Position) -> Option<Cell> {
        self.index(position)
            .and_then(|index| self.cells.get(index).copied())
    }

    /// Reports whether the position holds an obstacle. `false` when out of bounds.
    #[must_use]
    pub fn is_obstacle(&self, position: Position) -> bool {
        self.cell(position) == Some(Cell::Obstacle)
    }

    /// Reports whether the position holds an obstacle or a tank. `false` when out of bounds.
    #[must_use]
    pub fn is_occupied(&self, position: Position) -> bool {
        matches!(self.cell(position), Some(Cell::Occupied | Cell::Obstacle))
    }

    /// Row-major offset of the position, if it lies inside the grid.
    ///
    /// Offsets past the end of a slice shorter than `rows * columns` count as
    /// outside the grid.
    #[must_use]
    pub fn index(&self, position: Position) -> Option<usize> {
        if position.row() >= self.rows || position.column() >= self.columns {
            return None;
        }
        let row = usize::try_from(position.row()).ok()?;
        let column = usize::try_from(position.column()).ok()?;
        let width = usize::try_from(self.columns).ok()?;
        let index = row.checked_mul(width)?.checked_add(column)?;
        (index < self.cells.len()).then_some(index)
    }

    /// Iterates over every cell paired with its position in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, Cell)> + 'a {
        let columns = self.columns.max(1);
        self.cells.iter().enumerate().map(move |(index, cell)| {
            let index = index as u32;
            (Position::new(index / columns, index % columns), *cell)
        })
    }
}

/// Axis along which an obstacle run extends from its origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// The run extends toward increasing columns.
    Horizontal,
    /// The run extends toward increasing rows.
    Vertical,
}

/// Contiguous, axis-aligned sequence of obstacle cells placed atomically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObstacleRun {
    origin: Position,
    orientation: Orientation,
    length: u32,
}

impl ObstacleRun {
    /// Creates a run anchored at `origin` covering `length` cells.
    #[must_use]
    pub const fn new(origin: Position, orientation: Orientation, length: u32) -> Self {
        Self {
            origin,
            orientation,
            length,
        }
    }

    /// First cell of the run.
    #[must_use]
    pub const fn origin(&self) -> Position {
        self.origin
    }

    /// Axis along which the run extends.
    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Number of cells covered by the run.
    #[must_use]
    pub const fn length(&self) -> u32 {
        self.length
    }

    /// Cells covered by the run, starting with the origin.
    pub fn cells(&self) -> impl Iterator<Item = Position> {
        let origin = self.origin;
        let orientation = self.orientation;
        (0..self.length).map(move |offset| match orientation {
            Orientation::Horizontal => {
                Position::new(origin.row(), origin.column().saturating_add(offset))
            }
            Orientation::Vertical => {
                Position::new(origin.row().saturating_add(offset), origin.column())
            }
        })
    }
}

/// Unique identifier assigned to a tank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TankId(u32);

impl TankId {
    /// Creates a new tank identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for TankId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One of the two players taking turns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    /// First player, active when a game starts.
    One,
    /// Second player.
    Two,
}

impl Side {
    /// The side that takes over when this side's turn ends.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::One,
        }
    }
}

/// Grouping of tanks that determines the movement-algorithm mix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    /// Dijkstra-leaning faction fielded by side one.
    Red,
    /// BFS-leaning faction fielded by side one.
    Blue,
    /// Dijkstra-leaning faction fielded by side two.
    Yellow,
    /// BFS-leaning faction fielded by side two.
    Cyan,
}

impl Faction {
    /// Every faction in roster order.
    pub const ALL: [Faction; 4] = [Faction::Red, Faction::Blue, Faction::Yellow, Faction::Cyan];

    /// Side that fields tanks of this faction.
    #[must_use]
    pub const fn side(self) -> Side {
        match self {
            Self::Red | Self::Blue => Side::One,
            Self::Yellow | Self::Cyan => Side::Two,
        }
    }

    /// Factions fielded by the provided side, in alternating roster order.
    #[must_use]
    pub const fn roster(side: Side) -> [Faction; 2] {
        match side {
            Side::One => [Self::Red, Self::Blue],
            Side::Two => [Self::Yellow, Self::Cyan],
        }
    }
}

/// Hit points carried by a tank.
///
/// Damage resolution lives outside the engine; the value only ever sits in
/// `0..=max`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Health {
    current: u32,
    max: u32,
}

impl Health {
    /// Creates a full health pool with the provided maximum.
    #[must_use]
    pub const fn full(max: u32) -> Self {
        Self { current: max, max }
    }

    /// Remaining hit points.
    #[must_use]
    pub const fn current(&self) -> u32 {
        self.current
    }

    /// Maximum hit points.
    #[must_use]
    pub const fn max(&self) -> u32 {
        self.max
    }

    /// Reports whether no hit points remain.
    #[must_use]
    pub const fn is_depleted(&self) -> bool {
        self.current == 0
    }
}

/// Immutable representation of a single tank's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TankSnapshot {
    /// Unique identifier assigned to the tank.
    pub id: TankId,
    /// Faction that decides how the tank moves.
    pub faction: Faction,
    /// Side that owns the tank.
    pub side: Side,
    /// Grid cell currently occupied by the tank.
    pub position: Position,
    /// Remaining hit points.
    pub health: Health,
    /// Damage dealt per hit.
    pub damage: u32,
}

/// Read-only snapshot describing all tanks on the map.
#[derive(Clone, Debug, Default)]
pub struct TankView {
    snapshots: Vec<TankSnapshot>,
}

impl TankView {
    /// Creates a new tank view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<TankSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured tank snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &TankSnapshot> {
        self.snapshots.iter()
    }

    /// Snapshot of the tank with the provided identifier.
    #[must_use]
    pub fn get(&self, id: TankId) -> Option<&TankSnapshot> {
        self.snapshots
            .binary_search_by_key(&id, |snapshot| snapshot.id)
            .ok()
            .and_then(|index| self.snapshots.get(index))
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<TankSnapshot> {
        self.snapshots
    }
}

/// Planner used to answer a move request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    /// Unweighted breadth-first search.
    Bfs,
    /// Priority-queue shortest path over weighted edges.
    Dijkstra,
    /// Single step toward a random open neighbour.
    RandomStep,
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Bfs => "bfs",
            Self::Dijkstra => "dijkstra",
            Self::RandomStep => "random step",
        };
        f.write_str(label)
    }
}

/// Ordered cells from a start to a destination, both inclusive.
///
/// An empty path means no move: the destination was unreachable or a
/// position was invalid. A single-cell path means the tank stays put.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Path {
    cells: Vec<Position>,
}

impl Path {
    /// Path that moves nowhere.
    #[must_use]
    pub const fn empty() -> Self {
        Self { cells: Vec::new() }
    }

    /// Wraps an ordered sequence of cells.
    #[must_use]
    pub fn from_cells(cells: Vec<Position>) -> Self {
        Self { cells }
    }

    /// Cells visited by the path in order.
    #[must_use]
    pub fn cells(&self) -> &[Position] {
        &self.cells
    }

    /// Number of cells on the path, including the start.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Reports whether the path holds no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Reports whether following the path moves nothing.
    #[must_use]
    pub fn is_trivial(&self) -> bool {
        self.cells.len() <= 1
    }

    /// First cell of the path.
    #[must_use]
    pub fn start(&self) -> Option<Position> {
        self.cells.first().copied()
    }

    /// Last cell of the path.
    #[must_use]
    pub fn destination(&self) -> Option<Position> {
        self.cells.last().copied()
    }

    /// Consecutive `(from, to)` pairs that make up the path.
    pub fn steps(&self) -> impl Iterator<Item = (Position, Position)> + '_ {
        self.cells.windows(2).map(|pair| (pair[0], pair[1]))
    }

    /// Consumes the path, yielding the underlying cells.
    #[must_use]
    pub fn into_vec(self) -> Vec<Position> {
        self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_distance_matches_expectation() {
        let origin = Position::new(1, 1);
        let destination = Position::new(3, 4);
        assert_eq!(origin.manhattan_distance(destination), 5);
        assert_eq!(destination.manhattan_distance(origin), 5);
    }

    #[test]
    fn neighbor_refuses_negative_coordinates() {
        let corner = Position::new(0, 0);
        assert_eq!(corner.neighbor(Direction::North), None);
        assert_eq!(corner.neighbor(Direction::West), None);
        assert_eq!(corner.neighbor(Direction::East), Some(Position::new(0, 1)));
        assert_eq!(corner.neighbor(Direction::South), Some(Position::new(1, 0)));
    }

    #[test]
    fn direction_between_requires_adjacency() {
        let origin = Position::new(2, 2);
        assert_eq!(
            direction_between(origin, Position::new(1, 2)),
            Some(Direction::North)
        );
        assert_eq!(
            direction_between(origin, Position::new(2, 1)),
            Some(Direction::West)
        );
        assert_eq!(direction_between(origin, Position::new(3, 3)), None);
        assert_eq!(direction_between(origin, origin), None);
    }

    #[test]
    fn grid_view_reports_out_of_bounds_as_free_of_obstacles() {
        let cells = [Cell::Obstacle, Cell::Occupied, Cell::Free, Cell::Free];
        let view = GridView::new(&cells, 2, 2);

        assert!(view.is_obstacle(Position::new(0, 0)));
        assert!(view.is_occupied(Position::new(0, 0)));
        assert!(view.is_occupied(Position::new(0, 1)));
        assert!(!view.is_obstacle(Position::new(0, 1)));
        assert!(!view.is_occupied(Position::new(1, 0)));
        assert!(!view.is_valid(Position::new(2, 0)));
        assert!(!view.is_obstacle(Position::new(2, 0)));
        assert!(!view.is_occupied(Position::new(0, 2)));
    }

    #[test]
    fn grid_view_iterates_in_row_major_order() {
        let cells = [Cell::Free, Cell::Obstacle, Cell::Free, Cell::Occupied, Cell::Free, Cell::Free];
        let view = GridView::new(&cells, 2, 3);
        let positions: Vec<_> = view.iter().map(|(position, _)| position).collect();

        assert_eq!(positions[1], Position::new(0, 1));
        assert_eq!(positions[3], Position::new(1, 0));
        assert_eq!(positions.len(), 6);
    }

    #[test]
    fn grid_view_offsets_stay_inside_the_slice() {
        let cells = [Cell::Free; 6];
        let view = GridView::new(&cells, 2, 3);

        assert_eq!(view.len(), 6);
        assert!(!view.is_empty());
        assert_eq!(view.index(Position::new(1, 2)), Some(5));
        assert_eq!(view.index(Position::new(2, 0)), None);
        assert!(GridView::new(&[], 0, 0).is_empty());
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "backed by 3 cells")]
    fn grid_view_rejects_short_slices() {
        let cells = [Cell::Free; 3];
        let _ = GridView::new(&cells, 2, 2);
    }

    #[test]
    fn health_starts_full_and_depletes_at_zero() {
        let health = Health::full(100);
        assert_eq!(health.current(), 100);
        assert_eq!(health.max(), 100);
        assert!(!health.is_depleted());
        assert!(Health::full(0).is_depleted());
    }

    #[test]
    fn path_into_vec_keeps_cell_order() {
        let cells = vec![Position::new(0, 0), Position::new(0, 1), Position::new(1, 1)];
        let path = Path::from_cells(cells.clone());

        assert_eq!(path.into_vec(), cells);
        assert!(Path::empty().into_vec().is_empty());
    }

    #[test]
    fn obstacle_run_cells_follow_orientation() {
        let horizontal = ObstacleRun::new(Position::new(0, 1), Orientation::Horizontal, 2);
        let vertical = ObstacleRun::new(Position::new(4, 3), Orientation::Vertical, 3);

        assert_eq!(
            horizontal.cells().collect::<Vec<_>>(),
            vec![Position::new(0, 1), Position::new(0, 2)]
        );
        assert_eq!(
            vertical.cells().collect::<Vec<_>>(),
            vec![Position::new(4, 3), Position::new(5, 3), Position::new(6, 3)]
        );
    }

    #[test]
    fn factions_split_across_sides() {
        for faction in Faction::ALL {
            assert!(Faction::roster(faction.side()).contains(&faction));
        }
        assert_eq!(Side::One.opposite(), Side::Two);
        assert_eq!(Side::Two.opposite(), Side::One);
    }

    #[test]
    fn path_steps_pair_consecutive_cells() {
        let path = Path::from_cells(vec![
            Position::new(0, 0),
            Position::new(0, 1),
            Position::new(1, 1),
        ]);
        let steps: Vec<_> = path.steps().collect();

        assert_eq!(
            steps,
            vec![
                (Position::new(0, 0), Position::new(0, 1)),
                (Position::new(0, 1), Position::new(1, 1)),
            ]
        );
        assert!(!path.is_trivial());
        assert!(Path::from_cells(vec![Position::new(3, 3)]).is_trivial());
        assert!(Path::empty().is_trivial());
    }

    #[test]
    fn move_planned_event_survives_bincode() {
        let event = Event::MovePlanned {
            tank: TankId::new(3),
            algorithm: Algorithm::Dijkstra,
            path: Path::from_cells(vec![Position::new(2, 2), Position::new(2, 3)]),
        };
        let bytes = bincode::serialize(&event).expect("serialize");
        let restored: Event = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(restored, event);
    }
}
