use broadside::{
    Board, CellState, EngineError, Orientation, PlacementError, ShipType, ShotResult, GRID,
    NUM_SHIPS, SHIPS, TOTAL_SHIP_CELLS,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn ship_cells(board: &Board) -> usize {
    board
        .cells()
        .iter()
        .flatten()
        .filter(|c| **c == CellState::Ship)
        .count()
}

#[test]
fn test_carrier_scenario() {
    let mut board = Board::new();
    board.place(0, 0, 0, Orientation::Horizontal).unwrap();
    for c in 0..5 {
        assert_eq!(board.cell(0, c).unwrap(), CellState::Ship);
    }
    assert_eq!(board.cell(0, 5).unwrap(), CellState::Empty);
    assert_eq!(ship_cells(&board), 5);

    assert_eq!(board.attack(0, 0).unwrap(), ShotResult::Hit);
    assert_eq!(board.remaining_ship_cells(), 4);

    assert_eq!(board.attack(0, 0).unwrap(), ShotResult::AlreadyResolved);
    assert_eq!(board.remaining_ship_cells(), 4);

    assert_eq!(board.attack(0, 5).unwrap(), ShotResult::Miss);
    assert_eq!(board.cell(0, 5).unwrap(), CellState::Miss);
    assert_eq!(board.remaining_ship_cells(), 4);

    for c in 1..4 {
        assert_eq!(board.attack(0, c).unwrap(), ShotResult::Hit);
        assert!(!board.is_defeated());
    }
    assert_eq!(board.attack(0, 4).unwrap(), ShotResult::Sunk("Carrier"));
    assert!(board.is_defeated());
    assert_eq!(board.sunk_count(), 1);
}

#[test]
fn test_can_place_bounds() {
    let board = Board::new();
    assert!(board.can_place(0, 5, 5, Orientation::Horizontal));
    assert!(!board.can_place(0, 6, 5, Orientation::Horizontal));
    assert!(board.can_place(5, 9, 5, Orientation::Vertical));
    assert!(!board.can_place(6, 9, 5, Orientation::Vertical));
    assert!(!board.can_place(10, 0, 2, Orientation::Horizontal));
    assert!(!board.can_place(0, 10, 2, Orientation::Vertical));
    assert!(!board.can_place(usize::MAX, 0, 2, Orientation::Vertical));
    assert!(!board.can_place(0, 0, 0, Orientation::Horizontal));
    assert!(!board.can_place(0, 0, GRID + 1, Orientation::Horizontal));
}

#[test]
fn test_can_place_rejects_overlap_and_resolved_cells() {
    let mut board = Board::new();
    board.place(1, 2, 2, Orientation::Vertical).unwrap();
    assert!(!board.can_place(3, 0, 3, Orientation::Horizontal));
    assert_eq!(
        board.check_placement(3, 0, 3, Orientation::Horizontal),
        Err(PlacementError::Overlaps)
    );
    assert!(board.can_place(3, 3, 3, Orientation::Horizontal));

    assert_eq!(board.attack(7, 7).unwrap(), ShotResult::Miss);
    assert!(!board.can_place(7, 5, 3, Orientation::Horizontal));
}

#[test]
fn test_rejected_place_leaves_board_untouched() {
    let mut board = Board::new();
    board.place(0, 0, 0, Orientation::Horizontal).unwrap();
    let before = board.clone();

    assert_eq!(
        board.place(1, 0, 3, Orientation::Vertical),
        Err(PlacementError::Overlaps)
    );
    assert_eq!(
        board.place(1, 0, 7, Orientation::Horizontal),
        Err(PlacementError::OutOfBounds)
    );
    assert_eq!(
        board.place(0, 5, 5, Orientation::Horizontal),
        Err(PlacementError::AlreadyPlaced)
    );
    assert_eq!(
        board.place(NUM_SHIPS, 5, 5, Orientation::Horizontal),
        Err(PlacementError::InvalidIndex)
    );
    assert_eq!(board, before);
}

#[test]
fn test_place_only_marks_ship_cells() {
    let mut board = Board::new();
    board.place(0, 0, 0, Orientation::Horizontal).unwrap();
    let before = board.cells();
    board.place(4, 5, 5, Orientation::Vertical).unwrap();
    let after = board.cells();

    let mut changed = 0;
    for r in 0..GRID {
        for c in 0..GRID {
            if before[r][c] != after[r][c] {
                changed += 1;
                assert_eq!(before[r][c], CellState::Empty);
                assert_eq!(after[r][c], CellState::Ship);
                assert!(c == 5 && (r == 5 || r == 6));
            }
        }
    }
    assert_eq!(changed, SHIPS[4].length());
}

#[test]
fn test_attack_out_of_bounds_is_error() {
    let mut board = Board::new();
    assert!(board.attack(GRID, 0).is_err());
    assert!(board.attack(0, GRID).is_err());
    assert_eq!(board.open_cells().count_ones(), GRID * GRID);
}

#[test]
fn test_place_fleet_randomly() {
    let mut board = Board::new();
    let mut rng = SmallRng::seed_from_u64(42);
    board.place_fleet_randomly(&mut rng).unwrap();
    assert!(board.is_fleet_complete());
    assert_eq!(board.placed_count(), NUM_SHIPS);
    assert_eq!(board.ship_map().count_ones(), TOTAL_SHIP_CELLS);
    assert_eq!(ship_cells(&board), TOTAL_SHIP_CELLS);
}

#[test]
fn test_place_fleet_randomly_keeps_existing_ships() {
    let mut board = Board::new();
    board.place(0, 9, 0, Orientation::Horizontal).unwrap();
    let mut rng = SmallRng::seed_from_u64(7);
    board.place_fleet_randomly(&mut rng).unwrap();
    let carrier = board.ship(0).unwrap();
    assert_eq!(carrier.origin(), (9, 0));
    assert_eq!(carrier.orientation(), Orientation::Horizontal);
    assert_eq!(board.ship_map().count_ones(), TOTAL_SHIP_CELLS);
}

#[test]
fn test_random_placement_exhaustion_is_config_error() {
    let board = Board::new();
    let mut rng = SmallRng::seed_from_u64(1);
    let leviathan = ShipType::new("Leviathan", GRID + 1);
    match board.random_placement(&mut rng, leviathan) {
        Err(EngineError::PlacementExhausted { ship, .. }) => assert_eq!(ship, "Leviathan"),
        other => panic!("expected exhaustion, got {:?}", other),
    }
}

#[test]
fn test_concealed_cells_hide_intact_ships() {
    let mut board = Board::new();
    board.place(4, 3, 3, Orientation::Horizontal).unwrap();
    board.attack(3, 3).unwrap();
    board.attack(0, 0).unwrap();
    let grid = board.concealed_cells();
    assert_eq!(grid[3][3], CellState::Hit);
    assert_eq!(grid[3][4], CellState::Empty);
    assert_eq!(grid[0][0], CellState::Miss);
    assert_eq!(board.cells()[3][4], CellState::Ship);
    let shown = grid.iter().flatten().filter(|c| c.is_resolved()).count();
    assert_eq!(shown, 2);
    assert!(grid.iter().flatten().all(|c| c.is_resolved() || *c == CellState::Empty));
}

#[test]
fn test_empty_board_has_no_ship_cells() {
    let board = Board::new();
    assert_eq!(board.remaining_ship_cells(), 0);
    assert_eq!(board.next_unplaced(), Some(0));
    assert!(!board.is_fleet_complete());
}
