use broadside::{Board, CellState, Orientation, ShotResult, GRID, NUM_SHIPS, SHIPS, TOTAL_SHIP_CELLS};
use proptest::prelude::*;
use rand::{rngs::SmallRng, Rng, SeedableRng};

fn random_board(seed: u64) -> Board {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut board = Board::new();
    board.place_fleet_randomly(&mut rng).unwrap();
    board
}

fn orientation() -> impl Strategy<Value = Orientation> {
    prop_oneof![Just(Orientation::Horizontal), Just(Orientation::Vertical)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn auto_placement_is_valid(seed in any::<u64>()) {
        let board = random_board(seed);
        prop_assert_eq!(board.ship_map().count_ones(), TOTAL_SHIP_CELLS);
        prop_assert_eq!(board.placed_count(), NUM_SHIPS);

        let mut seen = std::collections::HashSet::new();
        for (i, ship) in board.ships().enumerate() {
            prop_assert_eq!(ship.ship_type(), SHIPS[i]);
            let cells: Vec<_> = ship.cells().collect();
            prop_assert_eq!(cells.len(), SHIPS[i].length());
            let (r0, c0) = ship.origin();
            for (k, &(r, c)) in cells.iter().enumerate() {
                prop_assert!(r < GRID && c < GRID);
                match ship.orientation() {
                    Orientation::Horizontal => prop_assert_eq!((r, c), (r0, c0 + k)),
                    Orientation::Vertical => prop_assert_eq!((r, c), (r0 + k, c0)),
                }
                prop_assert!(seen.insert((r, c)), "cell ({}, {}) covered twice", r, c);
            }
        }
    }

    #[test]
    fn can_place_matches_cells(
        seed in any::<u64>(),
        row in 0..GRID + 2,
        col in 0..GRID + 2,
        length in 1..=6usize,
        orient in orientation(),
    ) {
        let mut board = random_board(seed);
        // some resolved cells too
        let mut rng = SmallRng::seed_from_u64(seed ^ 0x5eed);
        for _ in 0..5 {
            let _ = board.attack(rng.random_range(0..GRID), rng.random_range(0..GRID));
        }
        let expected = (0..length).all(|k| {
            let (r, c) = orient.step(row, col, k);
            r < GRID && c < GRID && board.cell(r, c).unwrap() == CellState::Empty
        });
        prop_assert_eq!(board.can_place(row, col, length, orient), expected);
    }

    #[test]
    fn attack_transitions(seed in any::<u64>(), row in 0..GRID, col in 0..GRID) {
        let mut board = random_board(seed);
        let before = board.cell(row, col).unwrap();
        let remaining = board.remaining_ship_cells();
        let result = board.attack(row, col).unwrap();
        match before {
            CellState::Empty => {
                prop_assert_eq!(result, ShotResult::Miss);
                prop_assert_eq!(board.remaining_ship_cells(), remaining);
                prop_assert_eq!(board.cell(row, col).unwrap(), CellState::Miss);
            }
            CellState::Ship => {
                prop_assert!(result.is_hit());
                prop_assert_eq!(board.remaining_ship_cells(), remaining - 1);
                prop_assert_eq!(board.cell(row, col).unwrap(), CellState::Hit);
            }
            _ => unreachable!("fresh board has no resolved cells"),
        }

        let snapshot = board.clone();
        prop_assert_eq!(board.attack(row, col).unwrap(), ShotResult::AlreadyResolved);
        prop_assert_eq!(board, snapshot);
    }

    #[test]
    fn defeat_is_reached_exactly_at_last_ship_cell(seed in any::<u64>()) {
        let mut board = random_board(seed);
        let mut rng = SmallRng::seed_from_u64(seed.wrapping_add(1));
        let mut order: Vec<(usize, usize)> =
            (0..GRID).flat_map(|r| (0..GRID).map(move |c| (r, c))).collect();
        for i in (1..order.len()).rev() {
            order.swap(i, rng.random_range(0..=i));
        }

        let mut was_defeated = false;
        for (r, c) in order {
            let result = board.attack(r, c).unwrap();
            let defeated = board.is_defeated();
            prop_assert_eq!(defeated, board.remaining_ship_cells() == 0);
            if was_defeated {
                prop_assert!(defeated);
            } else if defeated {
                prop_assert!(matches!(result, ShotResult::Sunk(_)));
            }
            was_defeated = defeated;
        }
        prop_assert!(was_defeated);
        prop_assert_eq!(board.sunk_count(), NUM_SHIPS);
    }
}
