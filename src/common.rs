//! Common types: cell states, shot results and the error enums.

use core::fmt;

use crate::bitboard::BitBoardError;

/// State of a single board cell.
///
/// `Ship -> Hit` and `Empty -> Miss` are the only transitions; `Hit` and
/// `Miss` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    #[default]
    Empty,
    Ship,
    Hit,
    Miss,
}

impl CellState {
    /// Whether the cell has already been fired upon.
    pub fn is_resolved(self) -> bool {
        matches!(self, CellState::Hit | CellState::Miss)
    }
}

/// Result of firing at a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub enum ShotResult {
    /// Struck a ship segment that was still intact.
    Hit,
    /// Struck the last intact segment of the named ship.
    Sunk(&'static str),
    /// Open water.
    Miss,
    /// The cell was already Hit or Miss; nothing changed.
    AlreadyResolved,
}

impl ShotResult {
    /// `true` for `Hit` and `Sunk`.
    pub fn is_hit(self) -> bool {
        matches!(self, ShotResult::Hit | ShotResult::Sunk(_))
    }
}

/// Why a ship could not be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum PlacementError {
    /// At least one segment would lie outside the board.
    OutOfBounds,
    /// At least one segment would cover a non-empty cell.
    Overlaps,
    /// The ship at this fleet index is already on the board.
    AlreadyPlaced,
    /// Fleet index is out of range.
    InvalidIndex,
    /// Ship has no segments.
    EmptyShip,
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementError::OutOfBounds => write!(f, "ship placement is out of bounds"),
            PlacementError::Overlaps => write!(f, "ship placement overlaps another ship"),
            PlacementError::AlreadyPlaced => write!(f, "ship is already placed on the board"),
            PlacementError::InvalidIndex => write!(f, "fleet index is out of range"),
            PlacementError::EmptyShip => write!(f, "ship has zero length"),
        }
    }
}

/// Errors returned by `Board` operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// Coordinates outside the board.
    OutOfBounds { row: usize, col: usize },
}

impl From<BitBoardError> for BoardError {
    fn from(err: BitBoardError) -> Self {
        match err {
            BitBoardError::IndexOutOfBounds { row, col } => BoardError::OutOfBounds { row, col },
        }
    }
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::OutOfBounds { row, col } => {
                write!(f, "cell ({}, {}) is outside the board", row, col)
            }
        }
    }
}

/// Fatal engine errors. These indicate an impossible board or fleet
/// configuration rather than bad player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// Random placement gave up on a ship.
    PlacementExhausted {
        ship: &'static str,
        attempts: usize,
    },
    /// Every cell of the target board has already been fired upon.
    NoTargetsLeft,
    /// An opponent strategy chose a cell that is off the board or already
    /// resolved.
    InvalidTarget { row: usize, col: usize },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::PlacementExhausted { ship, attempts } => write!(
                f,
                "could not place {} after {} attempts; fleet does not fit the board",
                ship, attempts
            ),
            EngineError::NoTargetsLeft => write!(f, "no unresolved cells left to target"),
            EngineError::InvalidTarget { row, col } => {
                write!(f, "opponent chose unusable target ({}, {})", row, col)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PlacementError {}
#[cfg(feature = "std")]
impl std::error::Error for BoardError {}
#[cfg(feature = "std")]
impl std::error::Error for EngineError {}
