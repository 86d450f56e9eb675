//! Property tests for board bookkeeping and graph growth.

use proptest::prelude::*;

use hex_rust::board::{Board, Cell, Player};
use hex_rust::error::Error;
use hex_rust::graph::Graph;

/// A board size and a sequence of (possibly repeated) cells on it.
fn board_and_moves() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (1usize..=6).prop_flat_map(|size| {
        (
            Just(size),
            prop::collection::vec((0..size, 0..size), 0..(size * size * 2)),
        )
    })
}

proptest! {
    #[test]
    fn claim_sets_owner_and_counts((size, moves) in board_and_moves()) {
        let mut board = Board::new(size).unwrap();
        for (row, col) in moves {
            let cell = Cell::new(row, col);
            let before = board.movement_count();
            let mover = board.current_turn();
            let owner = board.owner(cell).unwrap();

            match board.claim(cell) {
                Ok(()) => {
                    prop_assert!(owner.is_none());
                    prop_assert_eq!(board.owner(cell).unwrap(), mover);
                    prop_assert_eq!(board.movement_count(), before + 1);
                }
                Err(Error::AlreadyClaimed { .. }) => {
                    prop_assert!(owner.is_some());
                    prop_assert_eq!(board.movement_count(), before);
                }
                Err(Error::GameFinished) => {
                    prop_assert!(owner.is_none());
                    prop_assert!(board.winner().is_some());
                }
                Err(other) => prop_assert!(false, "unexpected error {other}"),
            }
        }
    }

    #[test]
    fn winner_never_changes((size, moves) in board_and_moves()) {
        let mut board = Board::new(size).unwrap();
        let mut winner: Option<Player> = None;
        for (row, col) in moves {
            let _ = board.claim(Cell::new(row, col));
            let _ = board.swap_opening();
            if winner.is_some() {
                prop_assert_eq!(board.winner(), winner);
                prop_assert_eq!(board.current_turn(), None);
            }
            winner = board.winner();
        }
    }

    #[test]
    fn out_of_range_claims_are_rejected(size in 1usize..8, row in 0usize..16, col in 0usize..16) {
        prop_assume!(row >= size || col >= size);
        let mut board = Board::new(size).unwrap();
        let err = board.claim(Cell::new(row, col)).unwrap_err();
        prop_assert!(err.is_range_error());
        prop_assert_eq!(board.movement_count(), 0);
    }

    #[test]
    fn graph_growth_keeps_edges(
        capacity in 0usize..4,
        pairs in prop::collection::vec((0usize..12, 0usize..12, any::<bool>()), 1..60),
    ) {
        let mut graph = Graph::new(12, capacity);
        for &(a, b, both) in &pairs {
            graph.connect(a, b, both).unwrap();
        }
        prop_assert!(graph.edge_count() <= graph.edge_capacity());
        for &(a, b, both) in &pairs {
            prop_assert!(graph.are_connected(a, b));
            if both {
                prop_assert!(graph.are_connected(b, a));
            }
        }
    }
}
