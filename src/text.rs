//! Plain-text helpers for the terminal driver: coordinate parsing, command
//! parsing and grid formatting.

use std::fmt::Write;

use crate::board::{CellGrid, GRID};
use crate::common::CellState;
use crate::game::GameEvent;

/// A line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// A cell such as `B7`, given as (row, col).
    Cell(usize, usize),
    Rotate,
    /// Place the remaining ships randomly.
    Auto,
    Help,
    Quit,
}

/// Label for (`r`, `c`), e.g. `A1` for the top-left cell.
pub fn coord_label(r: usize, c: usize) -> String {
    let col = (b'A' + c as u8) as char;
    format!("{}{}", col, r + 1)
}

/// Parse `A1`..`J10` (column letter, 1-based row) into (row, col).
pub fn parse_coord(input: &str) -> Result<(usize, usize), String> {
    let input = input.trim();
    if input.len() < 2 {
        return Err("need a column letter and a row number (e.g. A5)".to_string());
    }
    let mut chars = input.chars();
    let col_ch = chars
        .next()
        .ok_or("no column letter")?
        .to_ascii_uppercase();
    if !col_ch.is_ascii_alphabetic() {
        return Err(format!("invalid column '{}', use A-J", col_ch));
    }
    let col = (col_ch as u8 - b'A') as usize;
    if col >= GRID {
        return Err(format!("column '{}' is off the board, use A-J", col_ch));
    }
    let row_str = chars.as_str();
    let row: usize = row_str
        .parse()
        .map_err(|_| format!("invalid row '{}', use 1-10", row_str))?;
    if row == 0 || row > GRID {
        return Err(format!("row {} is off the board, use 1-10", row));
    }
    Ok((row - 1, col))
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    match line.to_ascii_lowercase().as_str() {
        "r" | "rotate" => Ok(Command::Rotate),
        "auto" => Ok(Command::Auto),
        "h" | "help" | "?" => Ok(Command::Help),
        "q" | "quit" | "exit" => Ok(Command::Quit),
        _ => parse_coord(line).map(|(r, c)| Command::Cell(r, c)),
    }
}

fn cell_char(cell: CellState) -> char {
    match cell {
        CellState::Empty => '.',
        CellState::Ship => 'S',
        CellState::Hit => 'X',
        CellState::Miss => 'o',
    }
}

/// Render a grid with column letters and row numbers.
pub fn render_grid(grid: &CellGrid) -> String {
    let mut out = String::from("    ");
    for c in 0..GRID {
        let _ = write!(out, " {}", (b'A' + c as u8) as char);
    }
    out.push('\n');
    for (r, row) in grid.iter().enumerate() {
        let _ = write!(out, "  {:2}", r + 1);
        for cell in row.iter() {
            let _ = write!(out, " {}", cell_char(*cell));
        }
        out.push('\n');
    }
    out
}

/// One-line description of an event, or `None` for events the terminal
/// does not announce.
pub fn describe_event(event: &GameEvent) -> Option<String> {
    use crate::game::Side;

    let line = match *event {
        GameEvent::PhaseChanged { .. } => return None,
        GameEvent::ShipPlaced { ship, row, col, .. } => {
            format!("{} placed at {}", ship.name(), coord_label(row, col))
        }
        GameEvent::ShipPlacementRejected { ship, reason } => {
            format!("Can't place {} there: {}", ship.name(), reason)
        }
        GameEvent::ShotHit { by: Side::Human, row, col } => {
            format!("It's a hit at {}!", coord_label(row, col))
        }
        GameEvent::ShotHit { by: Side::Computer, row, col } => {
            format!("Opponent hit your ship at {}!", coord_label(row, col))
        }
        GameEvent::ShotMiss { by: Side::Human, row, col } => {
            format!("It's a miss at {}.", coord_label(row, col))
        }
        GameEvent::ShotMiss { by: Side::Computer, row, col } => {
            format!("Opponent missed at {}.", coord_label(row, col))
        }
        GameEvent::ShipSunk { by: Side::Human, ship } => format!("You sank the enemy {}!", ship),
        GameEvent::ShipSunk { by: Side::Computer, ship } => format!("Your {} was sunk!", ship),
        GameEvent::PlayerDefeated(Side::Computer) => "Victory! You won the battle!".to_string(),
        GameEvent::PlayerDefeated(Side::Human) => {
            "Defeat. The enemy has destroyed your fleet.".to_string()
        }
    };
    Some(line)
}
