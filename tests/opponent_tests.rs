use broadside::{Board, EngineError, Opponent, RandomOpponent, BB, GRID};
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};

#[test]
fn test_targets_are_never_resolved_cells() {
    let mut rng = SmallRng::seed_from_u64(3);
    let mut board = Board::new();
    board.place_fleet_randomly(&mut rng).unwrap();
    let mut opponent = RandomOpponent::new();

    for _ in 0..GRID * GRID {
        let (r, c) = opponent
            .select_target(&mut rng, &board.hits(), &board.misses())
            .unwrap();
        assert!(board.open_cells().get(r, c).unwrap());
        board.attack(r, c).unwrap();
    }
    assert!(board.open_cells().is_empty());
    assert!(board.is_defeated());
    assert_eq!(
        opponent.select_target(&mut rng, &board.hits(), &board.misses()),
        Err(EngineError::NoTargetsLeft)
    );
}

#[test]
fn test_single_open_cell_is_found() {
    let mut rng = SmallRng::seed_from_u64(11);
    let mut misses = BB::full();
    let hits = BB::new();
    // leave exactly one cell open
    misses = misses.without(BB::from_cells([(6, 2)]).unwrap());
    let mut opponent = RandomOpponent::new();
    for _ in 0..5 {
        assert_eq!(
            opponent.select_target(&mut rng, &hits, &misses).unwrap(),
            (6, 2)
        );
    }
}

#[test]
fn test_default_fleet_placement() {
    let mut rng = SmallRng::seed_from_u64(99);
    let mut board = Board::new();
    RandomOpponent.place_fleet(&mut rng, &mut board).unwrap();
    assert!(board.is_fleet_complete());
}

/// Always yields zero, so every rejection sample lands on (0, 0).
struct StuckRng;

impl RngCore for StuckRng {
    fn next_u32(&mut self) -> u32 {
        0
    }

    fn next_u64(&mut self) -> u64 {
        0
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        dst.fill(0);
    }
}

#[test]
fn test_indexed_pick_after_sampling_gives_up() {
    let hits = BB::from_cells([(0, 0)]).unwrap();
    let misses = BB::full().without(BB::from_cells([(0, 0), (8, 3)]).unwrap());
    let mut opponent = RandomOpponent::new();
    assert_eq!(
        opponent.select_target(&mut StuckRng, &hits, &misses),
        Ok((8, 3))
    );
}
