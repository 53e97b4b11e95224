use std::collections::{BTreeMap, HashSet};

use crossweave_core::{Grid, Line};
use crossweave_dict::DictionarySource;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::{CandidateFinder, FinderConfig, Generation, Result};

/// Greedy baseline director
///
/// Repeatedly walks the lines with the fewest crossing entries first, inserts
/// the longest candidate the dictionary offers, and stops once the requested
/// entry count is reached. When no line takes a word, the grid is tried in
/// the transposed orientation once before giving up.
///
/// Mainly a reference point for the [annealing](crate::Annealing) director
/// and a convenient workhorse in tests.
pub struct Direct<D> {
    dict: D,
    finder: FinderConfig,
    turn_cap: usize,
    rng: StdRng,
}

impl<D: DictionarySource + Clone> Direct<D> {
    pub fn new(dict: D, seed: u64) -> Self {
        Self {
            dict,
            finder: FinderConfig::default(),
            turn_cap: 200,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn with_turn_cap(mut self, cap: usize) -> Self {
        self.turn_cap = cap;
        self
    }

    pub async fn run(&mut self, cols: usize, rows: usize, min_words: usize) -> Result<Generation> {
        let start = self.dict.random(cols.min(rows)).await?;
        let mut grid = Grid::make(&start, cols, rows)?;
        tracing::info!("Starting the puzzle from '{start}'");

        let mut history: BTreeMap<Line, HashSet<String>> = BTreeMap::new();
        history.entry(Line::Row(0)).or_default().insert(start);

        let finder = CandidateFinder::new(self.dict.clone(), self.finder);

        // parity of rotations, to hand the grid back the way it was asked for
        let mut flips = 0usize;
        let mut rotated_while_stuck = false;

        let mut turns = 0;
        for turn in 1..=self.turn_cap {
            if grid.word_count() >= min_words {
                break;
            }
            turns = turn;

            // emptiest lines first: fewest crossing entries means the most
            // room for a new word
            let mut lines: Vec<Line> = grid.lines().collect();
            lines.sort_by_key(|&line| grid.view(line).cross_words().len());

            let mut added = false;
            for line in lines {
                let exclusions = history.get(&line).cloned().unwrap_or_default();

                let candidates = match finder
                    .candidates_for_line(&grid, line, &exclusions, &mut self.rng)
                    .await
                {
                    Ok(candidates) => candidates,
                    Err(err) => {
                        tracing::warn!("Candidate search on {line} failed: {err}");
                        continue;
                    }
                };

                // greedy: the longest insertable answer wins
                let best = candidates
                    .into_iter()
                    .max_by_key(|candidate| candidate.word.chars().count());

                if let Some(candidate) = best {
                    tracing::info!("Turn {turn}: adding '{}' to {}", candidate.word, candidate.line);

                    history
                        .entry(candidate.line)
                        .or_default()
                        .insert(candidate.word.clone());
                    grid = candidate.grid;
                    added = true;
                    break;
                }
            }

            if added {
                rotated_while_stuck = false;
                continue;
            }

            if rotated_while_stuck {
                tracing::warn!("No more words found, stopping at {} entries", grid.word_count());
                break;
            }

            tracing::debug!("Turn {turn}: stuck, transposing the grid");
            grid.rotate();
            history = history
                .into_iter()
                .map(|(line, words)| (line.transposed(), words))
                .collect();
            flips += 1;
            rotated_while_stuck = true;
        }

        if flips % 2 == 1 {
            grid.rotate();
        }

        let satisfied = grid.word_count() >= min_words;
        Ok(Generation {
            grid,
            turns,
            satisfied,
        })
    }
}
