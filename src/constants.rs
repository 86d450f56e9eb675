//! Default parameters and board geometry.
//!
//! Board size is a runtime value, so only defaults and the neighbour rule
//! live here.

// =============================================================================
// Board Geometry
// =============================================================================

/// Default board size (NxN). 11x11 is the classic Hex board.
pub const DEFAULT_SIZE: usize = 11;

/// Largest board that can be addressed with letter/number coordinates.
pub const MAX_TEXT_SIZE: usize = 26;

/// Offsets (row, col) to the six neighbours of a cell on the rhombus.
///
/// The (-1, -1) and (+1, +1) diagonals are not adjacent.
pub const NEIGHBORS: [(isize, isize); 6] = [
    (-1, 0),  // North
    (-1, 1),  // North-east
    (0, -1),  // West
    (0, 1),   // East
    (1, -1),  // South-west
    (1, 0),   // South
];

/// Initial edge capacity per cell for a player graph.
pub const EDGES_PER_CELL: usize = 6;

/// Synthetic border anchors appended after the cell nodes of a player graph.
pub const ANCHOR_NODES: usize = 2;

// =============================================================================
// Move Evaluation
// =============================================================================

/// Default number of playouts per automated move.
pub const N_PLAYOUTS: usize = 1000;

/// Default number of worker threads used for playouts.
pub const N_THREADS: usize = 1;

/// Score marking a cell that must never be selected.
pub const DEACTIVATED: i64 = i64::MIN;
