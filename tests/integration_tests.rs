//! Integration tests for hex-rust
//!
//! End-to-end scenarios through the public API: win detection, the swap rule,
//! playout scoring and the automated player.

use hex_rust::board::{Board, Cell, Player};
use hex_rust::error::Error;
use hex_rust::game::{Controller, Game};
use hex_rust::graph::Graph;
use hex_rust::path::PathFinder;
use hex_rust::playout::{Evaluator, SearchConfig, search};
use hex_rust::score::ScoreGrid;

// =============================================================================
// Helper functions for setting up test positions
// =============================================================================

/// Claim the given cells in order, alternating Blue and Red.
fn setup_board(size: usize, moves: &[(usize, usize)]) -> Board {
    let mut board = Board::new(size).unwrap();
    for &(row, col) in moves {
        board.claim(Cell::new(row, col)).unwrap();
    }
    board
}

fn seeded(playouts: usize, seed: u64) -> SearchConfig {
    SearchConfig {
        playouts,
        threads: 1,
        seed: Some(seed),
    }
}

// =============================================================================
// Win detection
// =============================================================================

#[test]
fn test_first_mover_wins_across_top_row() {
    let board = setup_board(3, &[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]);
    assert_eq!(board.winner(), Some(Player::Blue));
    assert_eq!(board.current_turn(), None);
}

#[test]
fn test_winner_is_final() {
    let mut board = setup_board(3, &[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]);

    assert_eq!(board.claim(Cell::new(2, 2)), Err(Error::GameFinished));
    assert_eq!(board.swap_opening(), Err(Error::GameFinished));
    assert_eq!(
        board.claim(Cell::new(0, 0)),
        Err(Error::AlreadyClaimed { row: 0, col: 0 })
    );
    assert_eq!(board.check_win(), Ok(Some(Player::Blue)));
    assert_eq!(board.winner(), Some(Player::Blue));
    assert_eq!(board.movement_count(), 5);
}

#[test]
fn test_zigzag_path_wins() {
    // Blue bends through (1,0) (1,1) (2,1) towards the east edge.
    let board = setup_board(
        3,
        &[(1, 0), (0, 0), (1, 1), (0, 2), (2, 1), (0, 1)],
    );
    // Red holds the whole north row but nothing further south.
    assert_eq!(board.winner(), None);

    let mut board = board;
    // (2,1) -> (2,2) reaches column 2.
    board.claim(Cell::new(2, 2)).unwrap();
    assert_eq!(board.winner(), Some(Player::Blue));
}

#[test]
fn test_full_board_always_has_one_winner() {
    let mut rng = fastrand::Rng::with_seed(77);
    for size in 1..=7 {
        for _ in 0..5 {
            let mut board = Board::new(size).unwrap();
            let order: Vec<Cell> = board.unclaimed_cells(&mut rng).collect();
            for cell in order {
                if board.is_finished() {
                    break;
                }
                board.claim(cell).unwrap();
            }
            assert!(board.winner().is_some(), "no winner on {size}x{size}");
        }
    }
}

// =============================================================================
// Swap rule
// =============================================================================

#[test]
fn test_swap_window() {
    let mut board = Board::new(5).unwrap();
    assert!(matches!(board.swap_opening(), Err(Error::InvalidOperation(_))));

    board.claim(Cell::new(2, 3)).unwrap();
    board.swap_opening().unwrap();
    assert_eq!(board.owner(Cell::new(2, 3)), Ok(Some(Player::Red)));
    assert_eq!(board.movement_count(), 2);
    assert_eq!(board.current_turn(), Some(Player::Blue));

    board.claim(Cell::new(0, 0)).unwrap();
    assert!(matches!(board.swap_opening(), Err(Error::InvalidOperation(_))));
}

#[test]
fn test_swapped_cell_joins_red_network() {
    // Red takes (0,1) and later wins through it on a 3x3 board.
    let mut board = setup_board(3, &[(0, 1)]);
    board.swap_opening().unwrap();
    for (row, col) in [(0, 0), (1, 1), (1, 0), (2, 1)] {
        board.claim(Cell::new(row, col)).unwrap();
    }
    // Red: (0,1) -> (1,1) -> (2,1)
    assert_eq!(board.winner(), Some(Player::Red));
}

// =============================================================================
// Graph and path finding
// =============================================================================

#[test]
fn test_graph_growth_keeps_every_edge() {
    let nodes = 30;
    let mut graph = Graph::new(nodes, 4);
    let mut inserted = Vec::new();
    for a in 0..nodes {
        for b in (a + 1..nodes).step_by(4) {
            graph.connect_bidirected(a, b).unwrap();
            inserted.push((a, b));
        }
    }
    assert!(graph.edge_capacity() >= graph.edge_count());
    for (a, b) in inserted {
        assert!(graph.are_connected(a, b));
        assert!(graph.are_connected(b, a));
    }

    let mut finder = PathFinder::new(nodes);
    assert!(finder.connected(&graph, 0, nodes - 1).unwrap());
}

#[test]
fn test_board_graph_matches_path_query() {
    let board = setup_board(4, &[(0, 0), (3, 3), (1, 0), (3, 2), (1, 1)]);
    let graph = board.graph(Player::Blue);
    let mut finder = PathFinder::new(graph.node_count());

    let path = finder.shortest_path(graph, 0, 5).unwrap();
    assert_eq!(path, vec![0, 4, 5]);
    assert!(!finder.connected(graph, 0, 15).unwrap());
}

// =============================================================================
// Playouts and selection
// =============================================================================

#[test]
fn test_evaluator_prefers_the_winning_cell() {
    // Blue to move with (0,2) as the last empty cell.
    let board = setup_board(
        3,
        &[(0, 0), (2, 0), (0, 1), (2, 1), (1, 0), (2, 2), (1, 1), (1, 2)],
    );

    let mut evaluator = Evaluator::new(&board, Player::Blue, fastrand::Rng::with_seed(1)).unwrap();
    evaluator.run_playout().unwrap();
    assert_eq!(evaluator.best_cell(), Cell::new(0, 2));
}

#[test]
fn test_live_cells_never_selected() {
    let board = setup_board(5, &[(2, 2), (1, 2), (3, 1), (0, 4)]);
    let mut evaluator = Evaluator::new(&board, Player::Blue, fastrand::Rng::with_seed(12)).unwrap();
    for _ in 0..30 {
        evaluator.run_playout().unwrap();
    }
    for _ in 0..50 {
        let cell = evaluator.best_cell();
        assert_eq!(board.owner(cell), Ok(None));
    }
}

#[test]
fn test_evaluator_leaves_live_board_untouched() {
    let board = setup_board(4, &[(0, 0), (1, 1)]);
    let mut evaluator = Evaluator::new(&board, Player::Blue, fastrand::Rng::with_seed(4)).unwrap();
    for _ in 0..20 {
        evaluator.run_playout().unwrap();
    }
    assert_eq!(board.movement_count(), 2);
    assert_eq!(board.owned_cells().count(), 2);
    assert_eq!(board.winner(), None);
}

#[test]
fn test_search_blocks_immediate_threat() {
    // Red to move: Blue threatens (0,2) to complete the top row.
    let board = setup_board(3, &[(0, 0), (2, 2), (0, 1)]);
    let cell = search(&board, Player::Red, &seeded(1000, 5)).unwrap();
    assert_eq!(cell, Cell::new(0, 2));
}

#[test]
fn test_tie_break_between_two_cells() {
    let mut grid = ScoreGrid::new(2);
    grid.deactivate(Cell::new(0, 0)).unwrap();
    grid.deactivate(Cell::new(1, 1)).unwrap();

    let mut rng = fastrand::Rng::with_seed(31);
    let trials = 4000;
    let first = (0..trials)
        .filter(|_| grid.best_cell(&mut rng) == Cell::new(0, 1))
        .count();
    assert!(first > trials * 2 / 5 && first < trials * 3 / 5, "first = {first}");
}

// =============================================================================
// Game facade
// =============================================================================

#[test]
fn test_human_against_engine() {
    let mut game = Game::new(5, Controller::Human, Controller::Automated(seeded(50, 2))).unwrap();

    while game.winner().is_none() {
        // Human plays the first empty cell in row-major order.
        let cell = (0..25)
            .map(|i| Cell::new(i / 5, i % 5))
            .find(|&c| game.owner(c) == Ok(None))
            .unwrap();
        game.claim(cell).unwrap();
        game.play_automated_moves().unwrap();
    }
    assert!(game.movement_count() <= 25);
}

#[test]
fn test_engine_declines_human_turn() {
    let game = Game::new(3, Controller::Human, Controller::Human).unwrap();
    assert!(matches!(
        game.request_automated_move(),
        Err(Error::InvalidOperation(_))
    ));
}
