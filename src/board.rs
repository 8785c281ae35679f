//! One player's board: ship placement, shot resolution and the defeat check.

use core::fmt;

use log::{debug, error};
use rand::Rng;

use crate::bitboard::BitBoard;
use crate::common::{BoardError, CellState, EngineError, PlacementError, ShotResult};
use crate::config::{BOARD_SIZE, MAX_PLACEMENT_ATTEMPTS, NUM_SHIPS, SHIPS};
use crate::ship::{Orientation, Ship, ShipType};

/// Side length of the board.
pub const GRID: usize = BOARD_SIZE as usize;

/// Cell mask sized for the board.
pub type BB = BitBoard<u128, GRID>;

/// A ship as stored on a [`Board`].
pub type BoardShip = Ship<u128, GRID>;

/// Row-major matrix of cell states.
pub type CellGrid = [[CellState; GRID]; GRID];

/// Ship placements plus the hits and misses fired at them.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    ships: [Option<BoardShip>; NUM_SHIPS],
    ship_map: BB,
    hits: BB,
    misses: BB,
}

impl Board {
    /// An empty board with no ships and no shots.
    pub fn new() -> Self {
        Board {
            ships: [None; NUM_SHIPS],
            ship_map: BB::new(),
            hits: BB::new(),
            misses: BB::new(),
        }
    }

    /// Cells that are not `Empty`.
    fn occupied(&self) -> BB {
        self.ship_map | self.misses
    }

    /// Checks that a ship of `length` fits at (`row`, `col`) and covers only
    /// empty cells.
    pub fn check_placement(
        &self,
        row: usize,
        col: usize,
        length: usize,
        orientation: Orientation,
    ) -> Result<(), PlacementError> {
        let probe = BoardShip::new(ShipType::new("probe", length), orientation, row, col)?;
        self.check_overlap(&probe)
    }

    /// `true` iff every cell a ship of `length` would cover is on the board
    /// and empty.
    pub fn can_place(&self, row: usize, col: usize, length: usize, orientation: Orientation) -> bool {
        self.check_placement(row, col, length, orientation).is_ok()
    }

    fn check_overlap(&self, ship: &BoardShip) -> Result<(), PlacementError> {
        if (self.occupied() & ship.mask()).is_empty() {
            Ok(())
        } else {
            Err(PlacementError::Overlaps)
        }
    }

    fn insert(&mut self, ship_index: usize, ship: BoardShip) {
        self.ship_map |= ship.mask();
        self.ships[ship_index] = Some(ship);
    }

    /// Place fleet ship `ship_index` at (`row`, `col`). The board is left
    /// untouched on error.
    pub fn place(
        &mut self,
        ship_index: usize,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Result<(), PlacementError> {
        let def = *SHIPS.get(ship_index).ok_or(PlacementError::InvalidIndex)?;
        if self.ships[ship_index].is_some() {
            return Err(PlacementError::AlreadyPlaced);
        }
        let ship = BoardShip::new(def, orientation, row, col)?;
        self.check_overlap(&ship)?;
        self.insert(ship_index, ship);
        Ok(())
    }

    fn sample_ship<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        ship_type: ShipType,
    ) -> Result<BoardShip, EngineError> {
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let row = rng.random_range(0..GRID);
            let col = rng.random_range(0..GRID);
            let orientation = if rng.random() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            if let Ok(ship) = BoardShip::new(ship_type, orientation, row, col) {
                if self.check_overlap(&ship).is_ok() {
                    return Ok(ship);
                }
            }
        }
        error!(
            "gave up placing {} (length {}) after {} attempts",
            ship_type.name(),
            ship_type.length(),
            MAX_PLACEMENT_ATTEMPTS
        );
        Err(EngineError::PlacementExhausted {
            ship: ship_type.name(),
            attempts: MAX_PLACEMENT_ATTEMPTS,
        })
    }

    /// Samples origin and orientation uniformly until `ship_type` fits.
    pub fn random_placement<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        ship_type: ShipType,
    ) -> Result<(usize, usize, Orientation), EngineError> {
        let ship = self.sample_ship(rng, ship_type)?;
        let (row, col) = ship.origin();
        Ok((row, col, ship.orientation()))
    }

    /// Randomly places every fleet ship not yet on the board, in fleet order.
    pub fn place_fleet_randomly<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), EngineError> {
        for (i, def) in SHIPS.iter().enumerate() {
            if self.ships[i].is_some() {
                continue;
            }
            let ship = self.sample_ship(rng, *def)?;
            debug!("placed {} at {:?} {:?}", def.name(), ship.origin(), ship.orientation());
            self.insert(i, ship);
        }
        Ok(())
    }

    /// Fire at (`row`, `col`). Already resolved cells are left alone and
    /// report [`ShotResult::AlreadyResolved`].
    pub fn attack(&mut self, row: usize, col: usize) -> Result<ShotResult, BoardError> {
        if self.hits.get(row, col)? || self.misses.get(row, col)? {
            return Ok(ShotResult::AlreadyResolved);
        }
        if !self.ship_map.get(row, col)? {
            self.misses.set(row, col)?;
            return Ok(ShotResult::Miss);
        }
        self.hits.set(row, col)?;
        for ship in self.ships.iter_mut().flatten() {
            if ship.register_hit(row, col) {
                if ship.is_sunk() {
                    return Ok(ShotResult::Sunk(ship.ship_type().name()));
                }
                break;
            }
        }
        Ok(ShotResult::Hit)
    }

    /// State of a single cell.
    pub fn cell(&self, row: usize, col: usize) -> Result<CellState, BoardError> {
        Ok(if self.hits.get(row, col)? {
            CellState::Hit
        } else if self.misses.get(row, col)? {
            CellState::Miss
        } else if self.ship_map.get(row, col)? {
            CellState::Ship
        } else {
            CellState::Empty
        })
    }

    /// Full cell-state matrix, ships visible.
    pub fn cells(&self) -> CellGrid {
        let mut grid = [[CellState::Empty; GRID]; GRID];
        for (r, c) in self.ship_map.cells() {
            grid[r][c] = CellState::Ship;
        }
        for (r, c) in self.hits.cells() {
            grid[r][c] = CellState::Hit;
        }
        for (r, c) in self.misses.cells() {
            grid[r][c] = CellState::Miss;
        }
        grid
    }

    /// Cell-state matrix as the opponent sees it: intact ship segments show
    /// as `Empty`.
    pub fn concealed_cells(&self) -> CellGrid {
        let mut grid = self.cells();
        for row in grid.iter_mut() {
            for cell in row.iter_mut() {
                if !cell.is_resolved() {
                    *cell = CellState::Empty;
                }
            }
        }
        grid
    }

    /// Ship segments not yet hit.
    pub fn remaining_ship_cells(&self) -> usize {
        self.ship_map.without(self.hits).count_ones()
    }

    /// `true` iff no cell is in state `Ship`.
    pub fn is_defeated(&self) -> bool {
        self.remaining_ship_cells() == 0
    }

    /// Cells that have not been fired upon.
    pub fn open_cells(&self) -> BB {
        !(self.hits | self.misses)
    }

    pub fn ship(&self, ship_index: usize) -> Option<&BoardShip> {
        self.ships.get(ship_index).and_then(Option::as_ref)
    }

    /// Placed ships in fleet order.
    pub fn ships(&self) -> impl Iterator<Item = &BoardShip> {
        self.ships.iter().flatten()
    }

    pub fn placed_count(&self) -> usize {
        self.ships.iter().filter(|s| s.is_some()).count()
    }

    /// Fleet index of the first ship not yet placed.
    pub fn next_unplaced(&self) -> Option<usize> {
        self.ships.iter().position(Option::is_none)
    }

    pub fn is_fleet_complete(&self) -> bool {
        self.next_unplaced().is_none()
    }

    /// Ships sunk so far.
    pub fn sunk_count(&self) -> usize {
        self.ships().filter(|s| s.is_sunk()).count()
    }

    /// Board occupancy mask of all ships.
    pub fn ship_map(&self) -> BB {
        self.ship_map
    }

    pub fn hits(&self) -> BB {
        self.hits
    }

    pub fn misses(&self) -> BB {
        self.misses
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Board {{\n  ship_map: {:?},\n  hits: {:?},\n  misses: {:?},\n  ships: {:?}\n}}",
            self.ship_map, self.hits, self.misses, self.ships
        )
    }
}
