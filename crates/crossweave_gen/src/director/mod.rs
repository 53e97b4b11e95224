mod annealing;
mod direct;

pub use annealing::*;
pub use direct::*;

use crossweave_core::Grid;
use crossweave_dict::DictionarySource;

use crate::Result;

/// Outcome of a generation run
#[derive(Debug, Clone)]
pub struct Generation {
    pub grid: Grid,

    /// Turns the director went through
    pub turns: usize,

    /// Whether the termination predicate held when the run ended, as opposed
    /// to the safety turn cap cutting it short
    pub satisfied: bool,
}

/// Termination predicate: the puzzle holds at least `count` entries
pub fn min_words(count: usize) -> impl Fn(&Grid) -> bool {
    move |grid| grid.word_count() >= count
}

/// Termination predicate: crossings per cell and fill ratio both reach their
/// thresholds
pub fn density(crossing_ratio: f64, fill: f64) -> impl Fn(&Grid) -> bool {
    move |grid| {
        let size = grid.size().max(1) as f64;

        grid.crossings().len() as f64 / size >= crossing_ratio
            && grid.filled() as f64 / size >= fill
    }
}

/// Generates a puzzle with the annealing director and default parameters
pub async fn generate<D, F>(
    dict: D,
    cols: usize,
    rows: usize,
    termination: F,
    seed: u64,
) -> Result<Generation>
where
    D: DictionarySource + Clone + Send + Sync + 'static,
    F: Fn(&Grid) -> bool,
{
    Annealing::new(dict, seed).run(cols, rows, termination).await
}
