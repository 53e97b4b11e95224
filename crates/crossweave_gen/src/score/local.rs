use std::cell::RefCell;
use std::collections::HashMap;

use crossweave_core::{Grid, Line, Position, WordRef};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::Scorer;

/// Scale of the random jitter mixed into smoothed scores; breaks ties between
/// fields and supplies the annealing variance
const JITTER: f64 = 0.25;

/// Local-goal evaluator bound to one grid snapshot
///
/// Raw per-field contributions are cached on first use; the cache lives and
/// dies with the borrow of the grid, so it can never observe a mutation.
/// Smoothed scores average the raw values over the Moore neighbourhood and
/// add jitter, which makes them intentionally non-deterministic between
/// calls.
///
/// The worst-first iterators drive the annealing director: they order fields,
/// entries and lines ascending by smoothed score, lowest (most in need of
/// work) first.
pub struct LocalScores<'g, S> {
    grid: &'g Grid,
    scorer: &'g S,
    raw: RefCell<HashMap<Position, f64>>,
    rng: RefCell<SmallRng>,
}

impl<'g, S: Scorer> LocalScores<'g, S> {
    pub fn new(grid: &'g Grid, scorer: &'g S, seed: u64) -> Self {
        Self {
            grid,
            scorer,
            raw: RefCell::new(HashMap::new()),
            rng: RefCell::new(SmallRng::seed_from_u64(seed)),
        }
    }

    /// Raw score of a field: its own goal, plus the goals of the entries
    /// covering it, plus the goals of its row and column
    pub fn raw(&self, pos: Position) -> f64 {
        if let Some(&score) = self.raw.borrow().get(&pos) {
            return score;
        }

        let word_goals: f64 = self
            .grid
            .words_at(pos)
            .filter_map(|word| WordRef::from_grid(self.grid, word).ok())
            .map(|word| self.scorer.word_goal(&word))
            .sum();

        let [row, col] = Line::through(pos);
        let score = self.scorer.field_goal(self.grid, pos)
            + word_goals
            + self.scorer.line_goal(&self.grid.view(row))
            + self.scorer.line_goal(&self.grid.view(col));

        self.raw.borrow_mut().insert(pos, score);
        score
    }

    /// Smoothed score: mean raw score over the Moore neighbourhood (clipped
    /// to the grid) plus jitter
    pub fn smoothed(&self, pos: Position) -> f64 {
        let rows = pos.row.saturating_sub(1)..=(pos.row + 1).min(self.grid.rows() - 1);
        let cols = pos.col.saturating_sub(1)..=(pos.col + 1).min(self.grid.cols() - 1);

        let mut total = 0.0;
        let mut count = 0;
        for row in rows {
            for col in cols.clone() {
                total += self.raw(Position::new(row, col));
                count += 1;
            }
        }

        let jitter = self.rng.borrow_mut().r#gen::<f64>() * JITTER;
        total / count as f64 + jitter
    }

    /// Smoothed score summed over an entry's cells
    pub fn word_score(&self, word: &str) -> Option<f64> {
        let cells = self.grid.cells_of(word)?;

        Some(cells.iter().map(|&pos| self.smoothed(pos)).sum())
    }

    /// Smoothed score summed over a full line
    pub fn line_score(&self, line: Line) -> f64 {
        let len = self.grid.view(line).len();

        (0..len).map(|offset| self.smoothed(line.position_at(offset))).sum()
    }

    /// Smoothed score summed over every filled cell
    pub fn grid_score(&self) -> f64 {
        self.grid
            .letters()
            .keys()
            .map(|&pos| self.smoothed(pos))
            .sum()
    }

    /// Filled fields, lowest smoothed score first
    pub fn worst_fields(&self) -> Vec<Position> {
        let mut fields: Vec<(f64, Position)> = self
            .grid
            .letters()
            .keys()
            .map(|&pos| (self.smoothed(pos), pos))
            .collect();

        fields.sort_by(|(left, _), (right, _)| left.total_cmp(right));
        fields.into_iter().map(|(_, pos)| pos).collect()
    }

    /// Placed entries, lowest summed smoothed score first
    pub fn worst_words(&self) -> Vec<String> {
        let mut words: Vec<(f64, String)> = self
            .grid
            .word_names()
            .filter_map(|word| Some((self.word_score(word)?, word.clone())))
            .collect();

        words.sort_by(|(left, _), (right, _)| left.total_cmp(right));
        words.into_iter().map(|(_, word)| word).collect()
    }

    /// Lines, lowest summed smoothed score first
    pub fn worst_lines(&self) -> Vec<Line> {
        let mut lines: Vec<(f64, Line)> = self
            .grid
            .lines()
            .map(|line| (self.line_score(line), line))
            .collect();

        lines.sort_by(|(left, _), (right, _)| left.total_cmp(right));
        lines.into_iter().map(|(_, line)| line).collect()
    }
}
