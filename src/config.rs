use crate::ship::ShipType;

pub const BOARD_SIZE: u8 = 10;
pub const NUM_SHIPS: usize = 5;

/// The fleet, in the order ships are placed.
pub const SHIPS: [ShipType; NUM_SHIPS] = [
    ShipType::new("Carrier", 5),
    ShipType::new("Battleship", 4),
    ShipType::new("Cruiser", 3),
    ShipType::new("Submarine", 3),
    ShipType::new("Destroyer", 2),
];

/// Total number of ship segments in a complete fleet.
pub const TOTAL_SHIP_CELLS: usize = 5 + 4 + 3 + 3 + 2;

/// Random placement samples tried per ship before giving up.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 10_000;

/// Rejection samples tried when picking a target before falling back to an
/// indexed pick over the open cells.
pub const MAX_TARGET_ATTEMPTS: usize = 1_000;
