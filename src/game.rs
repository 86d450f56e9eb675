//! A match between two controllers.
//!
//! Each side is driven either by a human (moves arrive through [`Game::claim`])
//! or by the Monte Carlo search. The choice is made once, at construction.

use tracing::{debug, info};

use crate::board::{Board, Cell, Player};
use crate::error::{Error, Result};
use crate::playout::{SearchConfig, search};

/// Who chooses the moves for one side.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Controller {
    Human,
    Automated(SearchConfig),
}

pub struct Game {
    board: Board,
    blue: Controller,
    red: Controller,
}

impl Game {
    pub fn new(size: usize, blue: Controller, red: Controller) -> Result<Self> {
        Ok(Self {
            board: Board::new(size)?,
            blue,
            red,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn controller(&self, player: Player) -> Controller {
        match player {
            Player::Blue => self.blue,
            Player::Red => self.red,
        }
    }

    /// Replace the controller of one side, e.g. when a protocol front end
    /// hands a colour to the engine.
    pub fn set_controller(&mut self, player: Player, controller: Controller) {
        match player {
            Player::Blue => self.blue = controller,
            Player::Red => self.red = controller,
        }
    }

    pub fn current_turn(&self) -> Option<Player> {
        self.board.current_turn()
    }

    pub fn movement_count(&self) -> usize {
        self.board.movement_count()
    }

    pub fn winner(&self) -> Option<Player> {
        self.board.winner()
    }

    pub fn owner(&self, cell: Cell) -> Result<Option<Player>> {
        self.board.owner(cell)
    }

    /// Play a move for the side to move.
    pub fn claim(&mut self, cell: Cell) -> Result<()> {
        let player = self.board.current_turn();
        self.board.claim(cell)?;
        debug!(?player, %cell, "claimed");
        self.log_winner();
        Ok(())
    }

    /// Let Red take over Blue's opening cell.
    pub fn swap_opening(&mut self) -> Result<()> {
        self.board.swap_opening()?;
        debug!(opening = ?self.board.opening(), "swap rule applied");
        self.log_winner();
        Ok(())
    }

    fn log_winner(&self) {
        if let Some(winner) = self.board.winner() {
            info!(%winner, movements = self.board.movement_count(), "game finished");
        }
    }

    /// The cell the automated controller of the side to move would play.
    ///
    /// # Errors
    /// - [`Error::GameFinished`] once there is a winner
    /// - [`Error::InvalidOperation`] if a human is to move
    pub fn request_automated_move(&self) -> Result<Cell> {
        let player = self.board.current_turn().ok_or(Error::GameFinished)?;
        match self.controller(player) {
            Controller::Automated(config) => {
                let cell = search(&self.board, player, &config)?;
                debug!(%player, %cell, playouts = config.playouts, "search finished");
                Ok(cell)
            }
            Controller::Human => Err(Error::InvalidOperation(
                "the side to move is controlled by a human",
            )),
        }
    }

    /// Choose and play the automated move for the side to move.
    pub fn play_automated_move(&mut self) -> Result<Cell> {
        let cell = self.request_automated_move()?;
        self.claim(cell)?;
        Ok(cell)
    }

    /// Play automated moves until a human is to move or the game is over.
    pub fn play_automated_moves(&mut self) -> Result<Vec<Cell>> {
        let mut played = Vec::new();
        while let Some(player) = self.board.current_turn() {
            if self.controller(player) == Controller::Human {
                break;
            }
            played.push(self.play_automated_move()?);
        }
        Ok(played)
    }
}
