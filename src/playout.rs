//! Monte Carlo move evaluation.
//!
//! A playout copies the position, fills every empty cell in random order with
//! alternating turns and checks who connected their edges. Every cell the
//! evaluated player owns at the end is rewarded when they won and penalised
//! when they lost. Cells already occupied on the real board are deactivated
//! so they are never proposed.
//!
//! Playouts are independent, so [`search`] can split them across a `rayon`
//! thread pool. Each worker owns its snapshot, score grid and RNG, and the
//! grids are merged once all workers are done.

use rayon::prelude::*;

use crate::board::{Board, Cell, Player};
use crate::constants::{N_PLAYOUTS, N_THREADS};
use crate::error::{Error, Result};
use crate::score::ScoreGrid;

/// Parameters for one automated move decision.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Playouts per decision.
    pub playouts: usize,
    /// Worker threads. `1` keeps everything on the calling thread.
    pub threads: usize,
    /// Master seed; `None` draws one from entropy for every decision.
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            playouts: N_PLAYOUTS,
            threads: N_THREADS,
            seed: None,
        }
    }
}

impl SearchConfig {
    pub fn with_playouts(playouts: usize) -> Self {
        Self {
            playouts,
            ..Self::default()
        }
    }
}

/// Scores candidate cells for one player from a fixed position.
pub struct Evaluator {
    player: Player,
    snapshot: Board,
    occupied: Vec<Cell>,
    scores: ScoreGrid,
    rng: fastrand::Rng,
}

impl Evaluator {
    /// Take a snapshot of `board` and prepare a fresh score grid for `player`.
    pub fn new(board: &Board, player: Player, rng: fastrand::Rng) -> Result<Self> {
        let snapshot = board.clone_for_simulation()?;
        let occupied: Vec<Cell> = snapshot.owned_cells().map(|(cell, _)| cell).collect();
        let mut scores = ScoreGrid::new(snapshot.size());
        for &cell in &occupied {
            scores.deactivate(cell)?;
        }
        Ok(Self {
            player,
            snapshot,
            occupied,
            scores,
            rng,
        })
    }

    pub fn player(&self) -> Player {
        self.player
    }

    pub fn scores(&self) -> &ScoreGrid {
        &self.scores
    }

    pub fn into_scores(self) -> ScoreGrid {
        self.scores
    }

    /// Run one random completion of the snapshot and update the scores.
    ///
    /// Returns the completed simulation board.
    ///
    /// # Errors
    /// - [`Error::GameFinished`] if the snapshot already has a winner
    /// - [`Error::UnfinishedPlayout`] if the filled board has no winner
    pub fn run_playout(&mut self) -> Result<Board> {
        if self.snapshot.is_finished() {
            return Err(Error::GameFinished);
        }
        let mut simulation = self.snapshot.clone_for_simulation()?;

        // The opponent may take over the opening instead of answering it.
        if simulation.can_swap() && self.rng.bool() {
            simulation.swap_opening()?;
        }

        for cell in simulation.unclaimed_cells(&mut self.rng) {
            simulation.place(cell, false)?;
        }

        let winner = simulation.check_win()?.ok_or(Error::UnfinishedPlayout)?;

        for (cell, owner) in simulation.owned_cells() {
            if owner != self.player {
                continue;
            }
            if winner == self.player {
                self.scores.increase(cell)?;
            } else {
                self.scores.decrease(cell)?;
            }
        }

        for &cell in &self.occupied {
            self.scores.deactivate(cell)?;
        }

        Ok(simulation)
    }

    /// The best cell found so far.
    pub fn best_cell(&mut self) -> Cell {
        self.scores.best_cell(&mut self.rng)
    }
}

fn rng_for(seed: Option<u64>, worker: u64) -> fastrand::Rng {
    match seed {
        Some(seed) => fastrand::Rng::with_seed(seed.wrapping_add(worker)),
        None => fastrand::Rng::new(),
    }
}

/// Run `config.playouts` playouts for `player` and return the chosen cell.
///
/// # Errors
/// Propagates board errors; see [`Evaluator::run_playout`].
pub fn search(board: &Board, player: Player, config: &SearchConfig) -> Result<Cell> {
    let threads = config.threads.max(1);

    if threads == 1 {
        let mut evaluator = Evaluator::new(board, player, rng_for(config.seed, 0))?;
        for _ in 0..config.playouts {
            evaluator.run_playout()?;
        }
        return Ok(evaluator.best_cell());
    }

    let share = config.playouts / threads;
    let extra = config.playouts % threads;
    let grids = (0..threads)
        .into_par_iter()
        .map(|worker| -> Result<ScoreGrid> {
            let mut evaluator = Evaluator::new(board, player, rng_for(config.seed, worker as u64 + 1))?;
            let playouts = share + usize::from(worker < extra);
            for _ in 0..playouts {
                evaluator.run_playout()?;
            }
            Ok(evaluator.into_scores())
        })
        .collect::<Result<Vec<ScoreGrid>>>()?;

    let mut scores = ScoreGrid::new(board.size());
    for grid in &grids {
        scores.merge(grid);
    }
    Ok(scores.best_cell(&mut rng_for(config.seed, 0)))
}
