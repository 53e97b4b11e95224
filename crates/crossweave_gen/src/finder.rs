use std::collections::HashSet;

use crossweave_core::{Alphabit, Grid, GridError, Line};
use crossweave_dict::DictionarySource;
use rand::Rng;

use crate::Result;

/// A speculative insertion that survived the conflict rules
#[derive(Debug, Clone)]
pub struct Candidate {
    /// The trial grid with the word already placed
    pub grid: Grid,
    pub line: Line,
    pub word: String,
}

/// Candidate search parameters
#[derive(Debug, Clone, Copy)]
pub struct FinderConfig {
    /// Answers fetched per regex query
    pub batch_size: usize,

    /// Stop interrogating further patterns once this many answers are pooled
    pub target: usize,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            batch_size: 8,
            target: 16,
        }
    }
}

/// Finds insertable answers for a line by interrogating the dictionary
///
/// Patterns come pre-ordered most-constrained-first from the grid, each query
/// is prefiltered by the pattern's alphabit mask, and the interrogation is
/// lazy: once the target number of answers is pooled, the remaining patterns
/// are never queried. Every pooled answer is then tried against a clone of
/// the grid under the conflict rules; the survivors come back as
/// [candidates](Candidate).
pub struct CandidateFinder<D> {
    dict: D,
    config: FinderConfig,
}

impl<D: DictionarySource> CandidateFinder<D> {
    pub fn new(dict: D, config: FinderConfig) -> Self {
        Self { dict, config }
    }

    /// Streams the candidates for one line
    ///
    /// `exclusions` carries the line's word history plus any per-turn
    /// quarantine; the words already placed in the grid are always excluded.
    pub async fn candidates_for_line<R: Rng + ?Sized>(
        &self,
        grid: &Grid,
        line: Line,
        exclusions: &HashSet<String>,
        rng: &mut R,
    ) -> Result<Vec<Candidate>> {
        let mut excluded: Vec<String> = exclusions.iter().cloned().collect();
        excluded.extend(grid.word_names().cloned());

        let mut pool: Vec<String> = Vec::new();
        for pattern in grid.placement_regexes(line) {
            if pool.len() >= self.config.target {
                break;
            }

            let mask = Alphabit::from_text(&pattern).as_query_mask();
            let batch = self
                .dict
                .find_matches_with_alphabit(&pattern, mask, &excluded, self.config.batch_size)
                .await?;

            for word in batch {
                // later patterns must not hand the same answer back
                excluded.push(word.clone());
                pool.push(word);
            }
        }

        tracing::debug!("Pooled {} answers for {line}", pool.len());

        let mut candidates = Vec::new();
        for word in pool {
            let mut trial = grid.clone();

            match trial.place(&word, line, rng) {
                Ok(()) => candidates.push(Candidate {
                    grid: trial,
                    line,
                    word,
                }),
                Err(
                    GridError::NoPosition { .. }
                    | GridError::ConflictingLetter { .. }
                    | GridError::TooLarge { .. }
                    | GridError::DuplicateWord(_),
                ) => {
                    tracing::debug!("'{word}' does not insert into {line}");
                }
                Err(err) => return Err(err.into()),
            }
        }

        Ok(candidates)
    }
}
