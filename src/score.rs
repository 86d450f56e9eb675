//! Per-cell playout scores and best-move selection.

use crate::board::Cell;
use crate::constants::DEACTIVATED;
use crate::error::{Error, Result};

/// Integer score for every cell of a board, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreGrid {
    size: usize,
    scores: Vec<i64>,
}

impl ScoreGrid {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            scores: vec![0; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    fn index(&self, cell: Cell) -> Result<usize> {
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

    pub fn score(&self, cell: Cell) -> Result<i64> {
        Ok(self.scores[self.index(cell)?])
    }

    /// Add one to a cell's score. Deactivated cells stay deactivated.
    pub fn increase(&mut self, cell: Cell) -> Result<()> {
        let i = self.index(cell)?;
        if self.scores[i] != DEACTIVATED {
            self.scores[i] += 1;
        }
        Ok(())
    }

    /// Subtract one from a cell's score. Deactivated cells stay deactivated.
    pub fn decrease(&mut self, cell: Cell) -> Result<()> {
        let i = self.index(cell)?;
        if self.scores[i] != DEACTIVATED {
            self.scores[i] = (self.scores[i] - 1).max(DEACTIVATED + 1);
        }
        Ok(())
    }

    /// Exclude a cell from selection for the rest of the decision.
    pub fn deactivate(&mut self, cell: Cell) -> Result<()> {
        let i = self.index(cell)?;
        self.scores[i] = DEACTIVATED;
        Ok(())
    }

    pub fn is_deactivated(&self, cell: Cell) -> Result<bool> {
        Ok(self.score(cell)? == DEACTIVATED)
    }

    /// Add another grid's scores into this one.
    ///
    /// A cell deactivated in either grid is deactivated in the result.
    pub fn merge(&mut self, other: &ScoreGrid) {
        for (mine, theirs) in self.scores.iter_mut().zip(&other.scores) {
            *mine = if *mine == DEACTIVATED || *theirs == DEACTIVATED {
                DEACTIVATED
            } else {
                mine.saturating_add(*theirs).max(DEACTIVATED + 1)
            };
        }
    }

    /// Pick the highest scoring cell.
    ///
    /// Cells are scanned row by row. A strictly greater score replaces the
    /// current best; an equal score replaces it on a fair coin flip, one flip
    /// per tied cell. Deactivated cells are skipped, and when every cell is
    /// deactivated the first cell is returned.
    pub fn best_cell(&self, rng: &mut fastrand::Rng) -> Cell {
        let mut best: Option<(i64, usize)> = None;

        for (i, &score) in self.scores.iter().enumerate() {
            if score == DEACTIVATED {
                continue;
            }
            match best {
                Some((value, _)) if score < value => continue,
                Some((value, _)) if score == value && rng.bool() => continue,
                _ => best = Some((score, i)),
            }
        }

        let i = best.map(|(_, i)| i).unwrap_or(0);
        Cell::new(i / self.size.max(1), i % self.size.max(1))
    }
}
