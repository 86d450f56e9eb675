//! Hex board state and win detection.
//!
//! The board is an NxN rhombus. Blue moves first and must join the west edge
//! (column 0) to the east edge (column N-1); Red must join the north edge
//! (row 0) to the south edge (row N-1).
//!
//! Each player owns a private [`Graph`] containing only the cells they have
//! claimed. Edges are added the moment a cell is claimed, so a win check is a
//! single reachability query between the player's two border anchors.

use std::fmt;
use std::str::FromStr;

use crate::constants::{ANCHOR_NODES, EDGES_PER_CELL, MAX_TEXT_SIZE, NEIGHBORS};
use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::path::PathFinder;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    /// First player, connects west to east.
    Blue,
    /// Second player, connects north to south.
    Red,
}

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            Player::Blue => Player::Red,
            Player::Red => Player::Blue,
        }
    }

    fn index(self) -> usize {
        match self {
            Player::Blue => 0,
            Player::Red => 1,
        }
    }

    /// Single-letter marker used in board renderings.
    pub fn symbol(self) -> char {
        match self {
            Player::Blue => 'B',
            Player::Red => 'R',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Blue => write!(f, "blue"),
            Player::Red => write!(f, "red"),
        }
    }
}

impl FromStr for Player {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "b" | "blue" | "black" => Ok(Player::Blue),
            "r" | "red" | "w" | "white" => Ok(Player::Red),
            _ => Err(Error::InvalidCoordinate(s.to_string())),
        }
    }
}

/// A board position addressed by row and column.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Column letter followed by a 1-based row number, e.g. `c2` for (1, 2).
impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.col < MAX_TEXT_SIZE {
            write!(f, "{}{}", (b'a' + self.col as u8) as char, self.row + 1)
        } else {
            write!(f, "({}, {})", self.row, self.col)
        }
    }
}

impl FromStr for Cell {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidCoordinate(s.to_string());
        let s = s.trim();
        let mut chars = s.chars();
        let letter = chars.next().ok_or_else(invalid)?.to_ascii_lowercase();
        if !letter.is_ascii_lowercase() {
            return Err(invalid());
        }
        let row: usize = chars.as_str().parse().map_err(|_| invalid())?;
        if row == 0 {
            return Err(invalid());
        }
        Ok(Cell::new(row - 1, (letter as u8 - b'a') as usize))
    }
}

/// A player's graph, its two border anchors and a reusable path finder.
#[derive(Clone, Debug)]
struct Network {
    graph: Graph,
    finder: PathFinder,
    anchors: (usize, usize),
}

impl Network {
    fn new(size: usize) -> Self {
        let cells = size * size;
        let nodes = cells + ANCHOR_NODES;
        Self {
            graph: Graph::new(nodes, cells * EDGES_PER_CELL),
            finder: PathFinder::new(nodes),
            anchors: (cells, cells + 1),
        }
    }

    fn connects_borders(&mut self) -> Result<bool> {
        let (start, end) = self.anchors;
        self.finder.connected(&self.graph, start, end)
    }
}

/// Authoritative game state.
#[derive(Debug)]
pub struct Board {
    size: usize,
    cells: Vec<Option<Player>>,
    /// Side to move, `None` once the game is finished.
    turn: Option<Player>,
    winner: Option<Player>,
    movements: usize,
    opening: Option<Cell>,
    networks: [Network; 2],
}

impl Board {
    /// Create an empty board with Blue to move.
    ///
    /// # Errors
    /// [`Error::InvalidSize`] when `size` is zero.
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(Error::InvalidSize { size });
        }
        Ok(Self {
            size,
            cells: vec![None; size * size],
            turn: Some(Player::Blue),
            winner: None,
            movements: 0,
            opening: None,
            networks: [Network::new(size), Network::new(size)],
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Node id of a cell, `row * size + col`.
    ///
    /// # Errors
    /// [`Error::CellOutOfRange`] if the cell is outside the board.
    pub fn index(&self, cell: Cell) -> Result<usize> {
        if cell.row < self.size && cell.col < self.size {
            Ok(cell.row * self.size + cell.col)
        } else {
            Err(Error::CellOutOfRange {
                row: cell.row,
                col: cell.col,
                size: self.size,
            })
        }
    }

    fn cell_at(&self, index: usize) -> Cell {
        Cell::new(index / self.size, index % self.size)
    }

    pub fn owner(&self, cell: Cell) -> Result<Option<Player>> {
        Ok(self.cells[self.index(cell)?])
    }

    /// Side to move, or `None` when the game is finished.
    pub fn current_turn(&self) -> Option<Player> {
        self.turn
    }

    pub fn movement_count(&self) -> usize {
        self.movements
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    pub fn is_finished(&self) -> bool {
        self.winner.is_some()
    }

    /// The first cell claimed in the match.
    pub fn opening(&self) -> Option<Cell> {
        self.opening
    }

    /// Claim a cell for the side to move and check for a winner.
    ///
    /// # Errors
    /// - [`Error::CellOutOfRange`] if the cell is outside the board
    /// - [`Error::AlreadyClaimed`] if the cell is owned, finished game or not
    /// - [`Error::GameFinished`] if a winner is already known
    pub fn claim(&mut self, cell: Cell) -> Result<()> {
        self.place(cell, true)
    }

    /// Claim a cell, running the win check only when `check_win` is set.
    ///
    /// Playouts fill the whole board unchecked and test once at the end.
    pub(crate) fn place(&mut self, cell: Cell, check_win: bool) -> Result<()> {
        let index = self.index(cell)?;
        if self.cells[index].is_some() {
            return Err(Error::AlreadyClaimed {
                row: cell.row,
                col: cell.col,
            });
        }
        let player = match (self.winner, self.turn) {
            (None, Some(player)) => player,
            _ => return Err(Error::GameFinished),
        };

        if self.opening.is_none() {
            self.opening = Some(cell);
        }
        self.cells[index] = Some(player);
        self.wire(cell, player)?;

        self.movements += 1;
        self.turn = Some(player.opponent());

        if check_win {
            self.check_win()?;
        }
        Ok(())
    }

    /// Add edges from `cell` to its same-owner neighbours and border anchors.
    fn wire(&mut self, cell: Cell, player: Player) -> Result<()> {
        let node = self.index(cell)?;
        let last = self.size - 1;
        let mut targets = Vec::with_capacity(NEIGHBORS.len() + ANCHOR_NODES);

        for neighbor in self.neighbors(cell) {
            if self.cells[self.index(neighbor)?] == Some(player) {
                targets.push(self.index(neighbor)?);
            }
        }

        let network = &mut self.networks[player.index()];
        let edge = match player {
            Player::Blue => cell.col,
            Player::Red => cell.row,
        };
        if edge == 0 {
            targets.push(network.anchors.0);
        }
        if edge == last {
            targets.push(network.anchors.1);
        }

        for target in targets {
            network.graph.connect_bidirected(node, target)?;
        }
        Ok(())
    }

    /// Cells adjacent to `cell` under the six-neighbour rule.
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + use<> {
        let size = self.size as isize;
        let (row, col) = (cell.row as isize, cell.col as isize);
        NEIGHBORS.into_iter().filter_map(move |(dr, dc)| {
            let (r, c) = (row + dr, col + dc);
            (r >= 0 && r < size && c >= 0 && c < size).then(|| Cell::new(r as usize, c as usize))
        })
    }

    /// Check both players for a border-to-border connection.
    ///
    /// Blue is checked before Red; a connected player becomes the winner and
    /// the game is finished.
    pub fn check_win(&mut self) -> Result<Option<Player>> {
        for player in [Player::Blue, Player::Red] {
            if self.networks[player.index()].connects_borders()? {
                self.winner = Some(player);
                self.turn = None;
            }
        }
        Ok(self.winner)
    }

    /// Whether the second player may take over the opening cell.
    pub fn can_swap(&self) -> bool {
        self.winner.is_none() && self.movements == 1 && self.turn == Some(Player::Red)
    }

    /// Apply the swap rule: the opening cell changes hands to Red and Blue
    /// moves next.
    ///
    /// # Errors
    /// - [`Error::GameFinished`] if a winner is already known
    /// - [`Error::InvalidOperation`] outside the window right after the opening
    pub fn swap_opening(&mut self) -> Result<()> {
        if self.winner.is_some() {
            return Err(Error::GameFinished);
        }
        if self.movements != 1 {
            return Err(Error::InvalidOperation(
                "the swap rule can only be invoked right after the first move",
            ));
        }
        if self.turn != Some(Player::Red) {
            return Err(Error::InvalidOperation(
                "the swap rule can only be invoked by red after a blue opening",
            ));
        }
        let opening = self
            .opening
            .ok_or(Error::InvalidOperation("no opening move to swap"))?;

        let index = self.index(opening)?;
        self.cells[index] = Some(Player::Red);
        // The opening was Blue's only cell.
        self.networks[Player::Blue.index()] = Network::new(self.size);
        self.wire(opening, Player::Red)?;

        self.movements += 1;
        self.turn = Some(Player::Blue);
        self.check_win()?;
        Ok(())
    }

    /// An independent copy for simulation.
    ///
    /// Graphs are rebuilt by replaying ownership, never shared.
    pub fn clone_for_simulation(&self) -> Result<Board> {
        let mut copy = Board {
            size: self.size,
            cells: self.cells.clone(),
            turn: self.turn,
            winner: self.winner,
            movements: self.movements,
            opening: self.opening,
            networks: [Network::new(self.size), Network::new(self.size)],
        };
        for (cell, player) in self.owned_cells() {
            copy.wire(cell, player)?;
        }
        Ok(copy)
    }

    /// The graph of `player`'s claimed cells.
    pub fn graph(&self, player: Player) -> &Graph {
        &self.networks[player.index()].graph
    }

    /// Owned cells and their owners, in row-major order.
    pub fn owned_cells(&self) -> impl Iterator<Item = (Cell, Player)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(index, owner)| owner.map(|player| (self.cell_at(index), player)))
    }

    /// Unclaimed cells in a fresh random order drawn from `rng`.
    pub fn unclaimed_cells(&self, rng: &mut fastrand::Rng) -> UnclaimedCells {
        let mut cells: Vec<Cell> = self
            .cells
            .iter()
            .enumerate()
            .filter(|(_, owner)| owner.is_none())
            .map(|(index, _)| self.cell_at(index))
            .collect();
        rng.shuffle(&mut cells);
        UnclaimedCells(cells.into_iter())
    }

    /// Screen (line, column) of a cell in the text layout.
    pub fn screen_position(&self, cell: Cell) -> (usize, usize) {
        (cell.row * 2, cell.col * 4 + cell.row * 2)
    }

    /// Text layout of the empty board, one line at a time.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        (0..self.size).flat_map(move |row| {
            let cells = format!("{}{}", " ".repeat(row * 2), vec!["o"; self.size].join(" - "));
            let links = (row + 1 < self.size).then(|| {
                format!("{}{}", " ".repeat(row * 2 + 1), vec!["\\"; self.size].join(" / "))
            });
            std::iter::once(cells).chain(links)
        })
    }
}

/// Randomly ordered unclaimed cells of a board snapshot.
pub struct UnclaimedCells(std::vec::IntoIter<Cell>);

impl Iterator for UnclaimedCells {
    type Item = Cell;

    fn next(&mut self) -> Option<Cell> {
        self.0.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl ExactSizeIterator for UnclaimedCells {}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines: Vec<Vec<char>> = self.lines().map(|l| l.chars().collect()).collect();
        for (cell, player) in self.owned_cells() {
            let (y, x) = self.screen_position(cell);
            lines[y][x] = player.symbol();
        }
        for line in lines {
            writeln!(f, "{}", line.into_iter().collect::<String>())?;
        }
        Ok(())
    }
}
