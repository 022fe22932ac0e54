#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Treasure Hunt engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and the expedition system. Adapters describe a run
//! with a [`GridSpec`] and a list of [`AdventurerSpec`] values, the expedition
//! turns pending movements into [`Command`] values, the world executes those
//! commands via its `apply` entry point, and then reports the outcome through
//! [`Event`] values.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Location of a single grid cell expressed as row and column indices.
///
/// The row is the first axis and is bounded by the grid height; the column is
/// the second axis and is bounded by the grid width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    row: u32,
    column: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
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

    /// Returns the coordinate one step away in the provided direction.
    ///
    /// Steps that would leave the non-negative quadrant yield `None`. The
    /// caller is responsible for checking the upper bounds of the grid.
    #[must_use]
    pub fn step(self, orientation: Orientation) -> Option<Self> {
        match orientation {
            Orientation::North => self.row.checked_sub(1).map(|row| Self::new(row, self.column)),
            Orientation::South => self.row.checked_add(1).map(|row| Self::new(row, self.column)),
            Orientation::East => self
                .column
                .checked_add(1)
                .map(|column| Self::new(self.row, column)),
            Orientation::West => self
                .column
                .checked_sub(1)
                .map(|column| Self::new(self.row, column)),
        }
    }
}

/// Compass direction an adventurer faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Facing toward decreasing row indices.
    North,
    /// Facing toward increasing column indices.
    East,
    /// Facing toward increasing row indices.
    South,
    /// Facing toward decreasing column indices.
    West,
}

impl Orientation {
    /// Orientation reached after a quarter turn counter-clockwise.
    #[must_use]
    pub const fn rotated_left(self) -> Self {
        match self {
            Self::North => Self::West,
            Self::East => Self::North,
            Self::South => Self::East,
            Self::West => Self::South,
        }
    }

    /// Orientation reached after a quarter turn clockwise.
    #[must_use]
    pub const fn rotated_right(self) -> Self {
        match self {
            Self::North => Self::East,
            Self::East => Self::South,
            Self::South => Self::West,
            Self::West => Self::North,
        }
    }

    /// First letter of the orientation's name, used by the text formats.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::North => 'N',
            Self::East => 'E',
            Self::South => 'S',
            Self::West => 'W',
        }
    }

    /// Parses an orientation from its letter.
    #[must_use]
    pub const fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'N' => Some(Self::North),
            'E' => Some(Self::East),
            'S' => Some(Self::South),
            'W' => Some(Self::West),
            _ => None,
        }
    }
}

/// Single command recorded in an adventurer's itinerary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Movement {
    /// Step one cell in the current orientation.
    Forward,
    /// Quarter turn counter-clockwise.
    RotateLeft,
    /// Quarter turn clockwise.
    RotateRight,
}

impl Movement {
    /// Letter used for the movement in configuration files.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::Forward => 'A',
            Self::RotateLeft => 'G',
            Self::RotateRight => 'D',
        }
    }

    /// Parses a movement from its configuration letter.
    #[must_use]
    pub const fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'A' => Some(Self::Forward),
            'G' => Some(Self::RotateLeft),
            'D' => Some(Self::RotateRight),
            _ => None,
        }
    }
}

/// Unique identifier assigned to an adventurer.
///
/// Identifiers follow input order, which is also the turn order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AdventurerId(u32);

impl AdventurerId {
    /// Creates a new adventurer identifier with the provided numeric value.
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

/// Treasure placement requested by a configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreasureSpec {
    /// Cell that holds the treasure.
    pub cell: CellCoord,
    /// Number of treasures initially stored in the cell.
    pub amount: u32,
}

/// Declarative description of the playing field.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSpec {
    /// Number of rows in the grid.
    pub height: u32,
    /// Number of columns in the grid.
    pub width: u32,
    /// Mountain cells in declaration order.
    pub mountains: Vec<CellCoord>,
    /// Treasure cells in declaration order.
    pub treasures: Vec<TreasureSpec>,
}

/// Declarative description of an adventurer and its recorded itinerary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdventurerSpec {
    /// Display name. Not required to be unique.
    pub name: String,
    /// Orientation at the start of the run.
    pub orientation: Orientation,
    /// Cell the adventurer starts on.
    pub start: CellCoord,
    /// Recorded turns; `None` marks a turn where the adventurer stays idle.
    pub movements: Vec<Option<Movement>>,
}

impl AdventurerSpec {
    /// Creates a spec whose every turn carries a movement.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        orientation: Orientation,
        start: CellCoord,
        movements: impl IntoIterator<Item = Movement>,
    ) -> Self {
        Self {
            name: name.into(),
            orientation,
            start,
            movements: movements.into_iter().map(Some).collect(),
        }
    }

    /// Appends an idle turn to the itinerary.
    #[must_use]
    pub fn then_idle(mut self) -> Self {
        self.movements.push(None);
        self
    }
}

/// Commands that express all permissible world mutations during a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Requests that an adventurer perform a recorded movement.
    Move {
        /// Adventurer performing the movement.
        adventurer: AdventurerId,
        /// Movement to perform.
        movement: Movement,
    },
}

/// Reasons a forward movement may leave the adventurer in place.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlockedReason {
    /// The destination lies outside the grid.
    OutOfBounds,
    /// The destination is a mountain.
    Mountain,
    /// The destination already holds another adventurer.
    Occupied,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that an adventurer turned in place.
    Rotated {
        /// Adventurer that turned.
        adventurer: AdventurerId,
        /// Orientation after the turn.
        orientation: Orientation,
    },
    /// Confirms that an adventurer moved between two cells.
    Advanced {
        /// Adventurer that moved.
        adventurer: AdventurerId,
        /// Cell occupied before the move.
        from: CellCoord,
        /// Cell occupied after the move.
        to: CellCoord,
    },
    /// Reports that an adventurer picked up one treasure.
    TreasureCollected {
        /// Adventurer credited with the treasure.
        adventurer: AdventurerId,
        /// Cell the treasure was taken from.
        cell: CellCoord,
        /// Treasures left in the cell.
        remaining: u32,
    },
    /// Reports that a forward movement had no effect.
    MoveBlocked {
        /// Adventurer that stayed in place.
        adventurer: AdventurerId,
        /// Cell the adventurer still occupies.
        at: CellCoord,
        /// Why the move did not happen.
        reason: BlockedReason,
    },
}

/// Fatal errors raised while building the grid or placing adventurers.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SetupError {
    /// The grid height or width is zero.
    #[error("grid dimensions {height}x{width} must be strictly positive")]
    InvalidDimension {
        /// Requested number of rows.
        height: u32,
        /// Requested number of columns.
        width: u32,
    },
    /// The grid has more cells than can be allocated.
    #[error("grid dimensions {height}x{width} are too large to allocate")]
    GridTooLarge {
        /// Requested number of rows.
        height: u32,
        /// Requested number of columns.
        width: u32,
    },
    /// A treasure amount is zero.
    #[error("treasure amount at {cell:?} must be strictly positive")]
    InvalidArgument {
        /// Cell the treasure was requested for.
        cell: CellCoord,
    },
    /// A coordinate lies outside the grid.
    #[error("cell {cell:?} lies outside the {height}x{width} grid")]
    OutOfBounds {
        /// Offending coordinate.
        cell: CellCoord,
        /// Number of rows in the grid.
        height: u32,
        /// Number of columns in the grid.
        width: u32,
    },
    /// Two mountain or treasure placements target the same cell.
    #[error("cell {cell:?} holds more than one mountain or treasure placement")]
    DuplicatePlacement {
        /// Cell targeted more than once.
        cell: CellCoord,
    },
    /// An adventurer starts on a mountain.
    #[error("adventurer '{name}' cannot start on the mountain at {cell:?}")]
    MountainOccupied {
        /// Name of the rejected adventurer.
        name: String,
        /// Mountain cell.
        cell: CellCoord,
    },
    /// An adventurer starts on a cell already holding another adventurer.
    #[error("adventurer '{name}' cannot start on {cell:?}, which is already occupied")]
    CellOccupied {
        /// Name of the rejected adventurer.
        name: String,
        /// Occupied cell.
        cell: CellCoord,
    },
}

#[cfg(test)]
mod tests {
    use super::{AdventurerSpec, CellCoord, GridSpec, Movement, Orientation, TreasureSpec};
    use proptest::prelude::*;
    use serde::{de::DeserializeOwned, Serialize};

    const ORIENTATIONS: [Orientation; 4] = [
        Orientation::North,
        Orientation::East,
        Orientation::South,
        Orientation::West,
    ];

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn rotation_table_matches_compass() {
        assert_eq!(Orientation::North.rotated_left(), Orientation::West);
        assert_eq!(Orientation::East.rotated_left(), Orientation::North);
        assert_eq!(Orientation::South.rotated_left(), Orientation::East);
        assert_eq!(Orientation::West.rotated_left(), Orientation::South);
        assert_eq!(Orientation::North.rotated_right(), Orientation::East);
        assert_eq!(Orientation::East.rotated_right(), Orientation::South);
        assert_eq!(Orientation::South.rotated_right(), Orientation::West);
        assert_eq!(Orientation::West.rotated_right(), Orientation::North);
    }

    #[test]
    fn step_follows_axis_conventions() {
        let origin = CellCoord::new(2, 2);
        assert_eq!(origin.step(Orientation::North), Some(CellCoord::new(1, 2)));
        assert_eq!(origin.step(Orientation::South), Some(CellCoord::new(3, 2)));
        assert_eq!(origin.step(Orientation::East), Some(CellCoord::new(2, 3)));
        assert_eq!(origin.step(Orientation::West), Some(CellCoord::new(2, 1)));
    }

    #[test]
    fn step_off_the_top_left_edges_yields_none() {
        let corner = CellCoord::new(0, 0);
        assert_eq!(corner.step(Orientation::North), None);
        assert_eq!(corner.step(Orientation::West), None);
    }

    #[test]
    fn letters_parse_back() {
        for orientation in ORIENTATIONS {
            assert_eq!(Orientation::from_letter(orientation.letter()), Some(orientation));
        }
        for movement in [Movement::Forward, Movement::RotateLeft, Movement::RotateRight] {
            assert_eq!(Movement::from_letter(movement.letter()), Some(movement));
        }
        assert_eq!(Orientation::from_letter('X'), None);
        assert_eq!(Movement::from_letter('X'), None);
    }

    #[test]
    fn then_idle_appends_marker() {
        let spec = AdventurerSpec::new(
            "Lara",
            Orientation::North,
            CellCoord::new(0, 0),
            [Movement::Forward],
        )
        .then_idle();
        assert_eq!(spec.movements, vec![Some(Movement::Forward), None]);
    }

    #[test]
    fn grid_spec_round_trips_through_bincode() {
        let spec = GridSpec {
            height: 4,
            width: 3,
            mountains: vec![CellCoord::new(0, 1)],
            treasures: vec![TreasureSpec {
                cell: CellCoord::new(3, 0),
                amount: 2,
            }],
        };
        assert_round_trip(&spec);
    }

    #[test]
    fn adventurer_spec_round_trips_through_bincode() {
        let spec = AdventurerSpec::new(
            "Lara",
            Orientation::South,
            CellCoord::new(1, 1),
            [Movement::Forward, Movement::RotateLeft],
        )
        .then_idle();
        assert_round_trip(&spec);
    }

    fn any_orientation() -> impl Strategy<Value = Orientation> {
        prop::sample::select(ORIENTATIONS.to_vec())
    }

    proptest! {
        #[test]
        fn left_undoes_right(orientation in any_orientation()) {
            prop_assert_eq!(orientation.rotated_right().rotated_left(), orientation);
            prop_assert_eq!(orientation.rotated_left().rotated_right(), orientation);
        }

        #[test]
        fn four_quarter_turns_are_identity(orientation in any_orientation()) {
            let mut turned = orientation;
            for _ in 0..4 {
                turned = turned.rotated_left();
            }
            prop_assert_eq!(turned, orientation);
        }
    }
}
