//! The game session: phases, turns and the events handed to the
//! presentation layer.

use alloc::vec;
use alloc::vec::Vec;

use log::{debug, info};
use rand::rngs::SmallRng;

use crate::{
    board::{Board, CellGrid},
    common::{EngineError, PlacementError, ShotResult},
    config::{NUM_SHIPS, SHIPS},
    opponent::{Opponent, RandomOpponent},
    ship::{Orientation, ShipType},
};

/// One of the two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Human,
    Computer,
}

impl Side {
    /// The other side.
    pub fn opponent(self) -> Side {
        match self {
            Side::Human => Side::Computer,
            Side::Computer => Side::Human,
        }
    }
}

/// Phase of a session. The turn owner only exists while playing and the
/// winner only once the game is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    Menu,
    /// The human is placing ships; the computer fleet is already down.
    Placing,
    /// Shots are being exchanged; carries whose turn it is.
    Playing(Side),
    GameOver { winner: Side },
}

/// Discrete notifications for sound, toast or log consumers. Each one is
/// emitted exactly once per state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub enum GameEvent {
    PhaseChanged {
        from: Phase,
        to: Phase,
    },
    /// A human ship was accepted.
    ShipPlaced {
        index: usize,
        ship: ShipType,
        row: usize,
        col: usize,
        orientation: Orientation,
    },
    /// A human placement was refused; nothing changed.
    ShipPlacementRejected {
        ship: ShipType,
        reason: PlacementError,
    },
    ShotHit {
        by: Side,
        row: usize,
        col: usize,
    },
    ShotMiss {
        by: Side,
        row: usize,
        col: usize,
    },
    /// Follows the `ShotHit` that completed the ship.
    ShipSunk {
        by: Side,
        ship: &'static str,
    },
    /// The given side has no ship segments left.
    PlayerDefeated(Side),
}

/// Everything a renderer needs to redraw after an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct SessionView {
    pub phase: Phase,
    pub turn: Option<Side>,
    pub winner: Option<Side>,
    pub next_ship: Option<ShipType>,
    pub orientation: Orientation,
    /// The human board with ships visible.
    pub human: CellGrid,
    /// The computer board with intact ships concealed.
    pub computer: CellGrid,
    pub human_ships_afloat: usize,
    pub computer_ships_afloat: usize,
}

/// A single game between the human and a computer opponent.
///
/// Every method takes `&mut self` and completes its transition before
/// returning, so placements and attacks never interleave. Randomness is
/// supplied by the caller.
#[derive(Debug, Clone)]
pub struct GameSession<O: Opponent = RandomOpponent> {
    phase: Phase,
    human: Board,
    computer: Board,
    orientation: Orientation,
    opponent: O,
}

impl GameSession<RandomOpponent> {
    /// A session at the menu, playing against [`RandomOpponent`].
    pub fn new() -> Self {
        Self::with_opponent(RandomOpponent::new())
    }
}

impl Default for GameSession<RandomOpponent> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: Opponent> GameSession<O> {
    pub fn with_opponent(opponent: O) -> Self {
        Self {
            phase: Phase::Menu,
            human: Board::new(),
            computer: Board::new(),
            orientation: Orientation::Horizontal,
            opponent,
        }
    }

    fn transition(&mut self, to: Phase, events: &mut Vec<GameEvent>) {
        let from = self.phase;
        if from == to {
            return;
        }
        info!("phase {:?} -> {:?}", from, to);
        self.phase = to;
        events.push(GameEvent::PhaseChanged { from, to });
    }

    /// Leave the menu: clear both boards, lay out the computer fleet and
    /// start placing. The session is unchanged if the fleet cannot be
    /// placed.
    pub fn start_game(&mut self, rng: &mut SmallRng) -> Result<Vec<GameEvent>, EngineError> {
        if self.phase != Phase::Menu {
            debug!("start_game ignored in {:?}", self.phase);
            return Ok(Vec::new());
        }
        let mut computer = Board::new();
        self.opponent.place_fleet(rng, &mut computer)?;

        self.computer = computer;
        self.human = Board::new();
        self.orientation = Orientation::Horizontal;
        let mut events = Vec::new();
        self.transition(Phase::Placing, &mut events);
        Ok(events)
    }

    /// Flip the orientation used for the next human placement. Only
    /// accepted while placing; returns the orientation in effect.
    pub fn toggle_orientation(&mut self) -> Orientation {
        if self.phase == Phase::Placing {
            self.orientation = self.orientation.toggled();
            debug!("orientation now {:?}", self.orientation);
        }
        self.orientation
    }

    fn finish_placing(&mut self, events: &mut Vec<GameEvent>) {
        if self.human.is_fleet_complete() {
            self.transition(Phase::Playing(Side::Human), events);
        }
    }

    /// Place the next human ship with its origin at (`row`, `col`).
    pub fn place_ship(&mut self, row: usize, col: usize) -> Vec<GameEvent> {
        let index = match (self.phase, self.human.next_unplaced()) {
            (Phase::Placing, Some(index)) => index,
            _ => {
                debug!("place_ship({}, {}) ignored in {:?}", row, col, self.phase);
                return Vec::new();
            }
        };
        let ship = SHIPS[index];
        match self.human.place(index, row, col, self.orientation) {
            Ok(()) => {
                let mut events = vec![GameEvent::ShipPlaced {
                    index,
                    ship,
                    row,
                    col,
                    orientation: self.orientation,
                }];
                self.finish_placing(&mut events);
                events
            }
            Err(reason) => {
                debug!("rejected {} at ({}, {}): {}", ship.name(), row, col, reason);
                vec![GameEvent::ShipPlacementRejected { ship, reason }]
            }
        }
    }

    /// Randomly place the rest of the human fleet.
    pub fn auto_place_human(&mut self, rng: &mut SmallRng) -> Result<Vec<GameEvent>, EngineError> {
        if self.phase != Phase::Placing {
            debug!("auto_place_human ignored in {:?}", self.phase);
            return Ok(Vec::new());
        }
        let mut board = self.human.clone();
        board.place_fleet_randomly(rng)?;

        let mut events = Vec::new();
        for index in 0..NUM_SHIPS {
            if self.human.ship(index).is_some() {
                continue;
            }
            if let Some(ship) = board.ship(index) {
                let (row, col) = ship.origin();
                events.push(GameEvent::ShipPlaced {
                    index,
                    ship: ship.ship_type(),
                    row,
                    col,
                    orientation: ship.orientation(),
                });
            }
        }
        self.human = board;
        self.finish_placing(&mut events);
        Ok(events)
    }

    /// Record the shot `by` fired and move to the next turn or end the game.
    fn resolve_shot(
        &mut self,
        by: Side,
        (row, col): (usize, usize),
        result: ShotResult,
        events: &mut Vec<GameEvent>,
    ) {
        match result {
            ShotResult::Hit => events.push(GameEvent::ShotHit { by, row, col }),
            ShotResult::Sunk(ship) => {
                events.push(GameEvent::ShotHit { by, row, col });
                events.push(GameEvent::ShipSunk { by, ship });
            }
            ShotResult::Miss => events.push(GameEvent::ShotMiss { by, row, col }),
            ShotResult::AlreadyResolved => return,
        }
        debug!("{:?} fired at ({}, {}): {:?}", by, row, col, result);

        let target = by.opponent();
        if self.board(target).is_defeated() {
            info!("{:?} fleet destroyed", target);
            events.push(GameEvent::PlayerDefeated(target));
            self.transition(Phase::GameOver { winner: by }, events);
        } else {
            self.transition(Phase::Playing(target), events);
        }
    }

    /// Human fires at (`row`, `col`) on the computer board. Ignored unless
    /// it is the human's turn and the cell is on the board and unresolved.
    /// On a non-winning shot the computer is left to move; call
    /// [`computer_turn`](Self::computer_turn) when ready.
    pub fn attack(&mut self, row: usize, col: usize) -> Vec<GameEvent> {
        if self.phase != Phase::Playing(Side::Human) {
            debug!("attack({}, {}) ignored in {:?}", row, col, self.phase);
            return Vec::new();
        }
        let result = match self.computer.attack(row, col) {
            Ok(result) => result,
            Err(e) => {
                debug!("attack ignored: {}", e);
                return Vec::new();
            }
        };
        let mut events = Vec::new();
        self.resolve_shot(Side::Human, (row, col), result, &mut events);
        events
    }

    /// Let the computer fire its reply. Ignored unless it is the computer's
    /// turn.
    pub fn computer_turn(&mut self, rng: &mut SmallRng) -> Result<Vec<GameEvent>, EngineError> {
        if self.phase != Phase::Playing(Side::Computer) {
            debug!("computer_turn ignored in {:?}", self.phase);
            return Ok(Vec::new());
        }
        let (row, col) =
            self.opponent
                .select_target(rng, &self.human.hits(), &self.human.misses())?;
        let result = match self.human.attack(row, col) {
            Ok(ShotResult::AlreadyResolved) | Err(_) => {
                return Err(EngineError::InvalidTarget { row, col })
            }
            Ok(result) => result,
        };
        self.opponent.handle_shot_result((row, col), result);

        let mut events = Vec::new();
        self.resolve_shot(Side::Computer, (row, col), result, &mut events);
        Ok(events)
    }

    /// [`attack`](Self::attack) followed immediately by the computer's
    /// reply, if one is due.
    pub fn attack_and_reply(
        &mut self,
        row: usize,
        col: usize,
        rng: &mut SmallRng,
    ) -> Result<Vec<GameEvent>, EngineError> {
        let mut events = self.attack(row, col);
        if self.phase == Phase::Playing(Side::Computer) {
            events.extend(self.computer_turn(rng)?);
        }
        Ok(events)
    }

    /// Abandon the current game, including any pending computer reply.
    pub fn reset_to_menu(&mut self) -> Vec<GameEvent> {
        self.human = Board::new();
        self.computer = Board::new();
        self.orientation = Orientation::Horizontal;
        let mut events = Vec::new();
        self.transition(Phase::Menu, &mut events);
        events
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whose turn it is, while playing.
    pub fn turn(&self) -> Option<Side> {
        match self.phase {
            Phase::Playing(side) => Some(side),
            _ => None,
        }
    }

    /// The winner, once the game is over.
    pub fn winner(&self) -> Option<Side> {
        match self.phase {
            Phase::GameOver { winner } => Some(winner),
            _ => None,
        }
    }

    pub fn human_board(&self) -> &Board {
        &self.human
    }

    pub fn computer_board(&self) -> &Board {
        &self.computer
    }

    pub fn board(&self, side: Side) -> &Board {
        match side {
            Side::Human => &self.human,
            Side::Computer => &self.computer,
        }
    }

    /// Fleet index of the next human ship to place, while placing.
    pub fn next_ship_index(&self) -> Option<usize> {
        match self.phase {
            Phase::Placing => self.human.next_unplaced(),
            _ => None,
        }
    }

    pub fn next_ship(&self) -> Option<ShipType> {
        self.next_ship_index().map(|i| SHIPS[i])
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn opponent(&self) -> &O {
        &self.opponent
    }

    /// Snapshot for rendering.
    pub fn view(&self) -> SessionView {
        SessionView {
            phase: self.phase,
            turn: self.turn(),
            winner: self.winner(),
            next_ship: self.next_ship(),
            orientation: self.orientation,
            human: self.human.cells(),
            computer: self.computer.concealed_cells(),
            human_ships_afloat: self.human.placed_count() - self.human.sunk_count(),
            computer_ships_afloat: self.computer.placed_count() - self.computer.sunk_count(),
        }
    }
}
