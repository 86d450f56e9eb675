//! Hex-Rust: a Hex engine with Monte Carlo move selection.
//!
//! Hex is played on an NxN rhombus. Blue moves first and tries to join the
//! west and east edges, Red tries to join north and south. The second player
//! may take over the opening move instead of answering it (the swap rule).
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry and engine defaults
//! - [`error`] - Error taxonomy shared by every module
//! - [`graph`] - Adjacency lists over a fixed node count
//! - [`path`] - Reachability queries with reusable buffers
//! - [`board`] - Game state, incremental player graphs and win detection
//! - [`playout`] - Random playouts and move search
//! - [`score`] - Per-cell scores and best-move selection
//! - [`game`] - Human / automated controllers around a board
//! - [`htp`] - Hex Text Protocol front end
//!
//! ## Example
//!
//! ```
//! use hex_rust::board::{Board, Cell, Player};
//! use hex_rust::playout::{search, SearchConfig};
//!
//! let mut board = Board::new(5)?;
//! board.claim(Cell::new(2, 2))?;
//!
//! let reply = search(&board, Player::Red, &SearchConfig::with_playouts(100))?;
//! board.claim(reply)?;
//! println!("{board}");
//! # Ok::<(), hex_rust::error::Error>(())
//! ```

pub mod board;
pub mod constants;
pub mod error;
pub mod game;
pub mod graph;
pub mod htp;
pub mod path;
pub mod playout;
pub mod score;
