//! Ship definitions and placed ships.

use core::fmt;
use num_traits::{PrimInt, Unsigned, Zero};

use crate::bitboard::BitBoard;
use crate::common::PlacementError;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Extends towards increasing columns.
    Horizontal,
    /// Extends towards increasing rows.
    Vertical,
}

impl Orientation {
    /// The other orientation.
    pub fn toggled(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }

    /// Cell `offset` steps from `(row, col)` along this orientation.
    #[inline]
    pub fn step(self, row: usize, col: usize, offset: usize) -> (usize, usize) {
        match self {
            Orientation::Horizontal => (row, col + offset),
            Orientation::Vertical => (row + offset, col),
        }
    }
}

/// Type of ship: name and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct ShipType {
    name: &'static str,
    length: usize,
}

impl ShipType {
    pub const fn new(name: &'static str, length: usize) -> Self {
        Self { name, length }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

/// A ship placed on an N×N board. Occupied cells and hits are tracked as
/// masks so sinking is a popcount.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Ship<T, const N: usize>
where
    T: PrimInt + Unsigned + Zero,
{
    ship_type: ShipType,
    orientation: Orientation,
    row: usize,
    col: usize,
    mask: BitBoard<T, N>,
    hits: BitBoard<T, N>,
}

impl<T, const N: usize> Ship<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    /// Lays `ship_type` out from (`row`, `col`) along `orientation`.
    ///
    /// Fails with [`PlacementError::OutOfBounds`] if any segment would fall
    /// off the board. Overlap with other ships is the board's concern.
    pub fn new(
        ship_type: ShipType,
        orientation: Orientation,
        row: usize,
        col: usize,
    ) -> Result<Self, PlacementError> {
        let len = ship_type.length();
        if len == 0 {
            return Err(PlacementError::EmptyShip);
        }
        let (last_row, last_col) = match orientation {
            Orientation::Horizontal => (Some(row), col.checked_add(len - 1)),
            Orientation::Vertical => (row.checked_add(len - 1), Some(col)),
        };
        match (last_row, last_col) {
            (Some(r), Some(c)) if r < N && c < N => {}
            _ => return Err(PlacementError::OutOfBounds),
        }

        let mask = BitBoard::from_cells((0..len).map(|i| orientation.step(row, col, i)))
            .map_err(|_| PlacementError::OutOfBounds)?;

        Ok(Ship {
            ship_type,
            orientation,
            row,
            col,
            mask,
            hits: BitBoard::new(),
        })
    }

    /// Cells covered by the ship, from the origin outwards.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.ship_type.length()).map(move |i| self.orientation.step(self.row, self.col, i))
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.mask.get(row, col).unwrap_or(false)
    }

    /// Records a hit at (`row`, `col`). Returns `false` if the ship does not
    /// cover that cell.
    pub fn register_hit(&mut self, row: usize, col: usize) -> bool {
        self.contains(row, col) && self.hits.set(row, col).is_ok()
    }

    /// Whether every segment has been hit.
    pub fn is_sunk(&self) -> bool {
        self.hits.count_ones() == self.ship_type.length()
    }

    pub fn hits_taken(&self) -> usize {
        self.hits.count_ones()
    }

    pub fn ship_type(&self) -> ShipType {
        self.ship_type
    }

    /// Origin of the ship (row, col).
    pub fn origin(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Occupancy mask of the ship on the board.
    pub fn mask(&self) -> BitBoard<T, N> {
        self.mask
    }
}

impl<T, const N: usize> fmt::Debug for Ship<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ name: \"{}\", origin: ({}, {}), orientation: {:?}, hits: {}/{} }}",
            self.ship_type.name(),
            self.row,
            self.col,
            self.orientation,
            self.hits.count_ones(),
            self.ship_type.length(),
        )
    }
}
