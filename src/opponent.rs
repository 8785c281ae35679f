//! Computer opponent strategies.

use log::warn;
use rand::Rng;

use crate::board::{Board, BB, GRID};
use crate::common::{EngineError, ShotResult};
use crate::config::MAX_TARGET_ATTEMPTS;

/// Interface implemented by computer opponents.
pub trait Opponent {
    /// Place the whole fleet onto an empty board.
    fn place_fleet<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        board: &mut Board,
    ) -> Result<(), EngineError> {
        board.place_fleet_randomly(rng)
    }

    /// Choose the next cell to fire at given the hits and misses already
    /// recorded on the target board. Must return a cell in neither set.
    fn select_target<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        hits: &BB,
        misses: &BB,
    ) -> Result<(usize, usize), EngineError>;

    /// Inform the opponent of the result of its last shot.
    fn handle_shot_result(&mut self, _coord: (usize, usize), _result: ShotResult) {}
}

/// Fires at a uniformly random unresolved cell. Keeps no memory between
/// shots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RandomOpponent;

impl RandomOpponent {
    pub fn new() -> Self {
        Self
    }
}

impl Opponent for RandomOpponent {
    fn select_target<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        hits: &BB,
        misses: &BB,
    ) -> Result<(usize, usize), EngineError> {
        let open = !(*hits | *misses);
        let total = open.count_ones();
        if total == 0 {
            return Err(EngineError::NoTargetsLeft);
        }

        for _ in 0..MAX_TARGET_ATTEMPTS {
            let r = rng.random_range(0..GRID);
            let c = rng.random_range(0..GRID);
            if open.get(r, c).unwrap_or(false) {
                return Ok((r, c));
            }
        }

        // Still uniform: pick the k-th open cell directly.
        warn!(
            "target sampling missed {} times with {} open cells; picking by index",
            MAX_TARGET_ATTEMPTS, total
        );
        let k = rng.random_range(0..total);
        open.cells().nth(k).ok_or(EngineError::NoTargetsLeft)
    }
}
