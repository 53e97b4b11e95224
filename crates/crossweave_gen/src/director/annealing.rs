use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use crossweave_core::{Grid, Line, Position, WordRef};
use crossweave_dict::DictionarySource;
use rand::rngs::{SmallRng, StdRng};
use rand::{Rng, SeedableRng};
use tokio::sync::{Mutex, mpsc};

use crate::{
    Candidate, CandidateFinder, EnglishScorer, FinderConfig, Generation, HallOfFame, LocalScores,
    Result, Scorer,
};

/// Divides the growth schedule: larger values keep the per-turn field batch
/// smaller for longer
const GROWTH_CUTTER: f64 = 10.0;

/// Simulated-annealing director
///
/// Each turn picks a handful of the worst-scoring fields, explores candidate
/// insertions along the row and column through each concurrently, and commits
/// the first insertion that does not lower the grid score. When nothing
/// insertable turns up, the worst badly-crossed entry is removed instead; when
/// there is nothing to remove either, everything tried this turn goes into a
/// one-turn quarantine so the next turn explores elsewhere.
///
/// The turn cap bounds the run; hitting it hands back the best grid seen so
/// far (kept in a [`HallOfFame`]).
pub struct Annealing<D, S = EnglishScorer> {
    dict: D,
    scorer: S,
    growth: f64,
    bad_word_cutoff: f64,
    finder: FinderConfig,
    turn_cap: usize,
    fame_size: usize,
    rng: StdRng,
}

impl<D> Annealing<D> {
    pub fn new(dict: D, seed: u64) -> Self {
        Self::with_scorer(dict, EnglishScorer, seed)
    }
}

impl<D, S> Annealing<D, S> {
    pub fn with_scorer(dict: D, scorer: S, seed: u64) -> Self {
        Self {
            dict,
            scorer,
            growth: 0.5,
            bad_word_cutoff: 0.3,
            finder: FinderConfig::default(),
            turn_cap: 200,
            fame_size: 5,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Sets the growth base in (0, 1); higher grows the field batch faster
    pub fn with_growth(mut self, growth: f64) -> Self {
        self.growth = growth;
        self
    }

    /// Sets the crossings-per-letter score below which entries may be removed
    pub fn with_bad_word_cutoff(mut self, cutoff: f64) -> Self {
        self.bad_word_cutoff = cutoff;
        self
    }

    pub fn with_finder(mut self, finder: FinderConfig) -> Self {
        self.finder = finder;
        self
    }

    pub fn with_turn_cap(mut self, cap: usize) -> Self {
        self.turn_cap = cap;
        self
    }

    /// How many worst fields to work on in the given turn
    ///
    /// Grows logarithmically with the turn number so early turns stay focused
    /// while late ones cast a wider net; callers clamp to the number of
    /// filled cells.
    fn elements(&self, turn: usize) -> usize {
        let base = 1.1 - 0.1 * self.growth;
        let count = ((turn as f64).ln() / base.ln() / GROWTH_CUTTER).ceil() as usize;

        count + 1
    }
}

impl<D, S> Annealing<D, S>
where
    D: DictionarySource + Clone + Send + Sync + 'static,
    S: Scorer + Sync,
{
    /// Runs the director until the termination predicate holds or the turn
    /// cap is reached
    ///
    /// An empty dictionary is fatal here; mid-run dictionary failures degrade
    /// to "no candidates this turn".
    pub async fn run<F>(&mut self, cols: usize, rows: usize, finished: F) -> Result<Generation>
    where
        F: Fn(&Grid) -> bool,
    {
        let start = self.dict.random(cols.min(rows)).await?;
        let mut grid = Grid::make(&start, cols, rows)?;
        tracing::info!("Starting the puzzle from '{start}'");

        let mut history: BTreeMap<Line, HashSet<String>> = BTreeMap::new();
        history.entry(Line::Row(0)).or_default().insert(start);

        let mut quarantine: HashSet<String> = HashSet::new();
        let mut fame: HallOfFame<Grid> = HallOfFame::new(self.fame_size);

        let mut turns = 0;
        for turn in 1..=self.turn_cap {
            if finished(&grid) {
                tracing::info!("Finished after {turns} turns with {} entries", grid.word_count());
                return Ok(Generation {
                    grid,
                    turns,
                    satisfied: true,
                });
            }
            turns = turn;

            let current = {
                let scores = LocalScores::new(&grid, &self.scorer, self.rng.r#gen());
                scores.grid_score()
            };
            fame.add(current, grid.clone());

            let count = self.elements(turn).min(grid.filled());
            let fields: Vec<_> = {
                let scores = LocalScores::new(&grid, &self.scorer, self.rng.r#gen());
                scores.worst_fields().into_iter().take(count).collect()
            };

            let tested = Arc::new(Mutex::new(HashSet::new()));
            let accepted = self
                .explore_fields(&grid, &fields, &history, &quarantine, &tested, current)
                .await;

            if let Some(candidate) = accepted {
                tracing::info!("Turn {turn}: adding '{}' to {}", candidate.word, candidate.line);

                history
                    .entry(candidate.line)
                    .or_default()
                    .insert(candidate.word.clone());
                grid = candidate.grid;
                quarantine.clear();
                continue;
            }

            if let Some(word) = self.removal_target(&grid) {
                if grid.remove(&word)? {
                    tracing::info!("Turn {turn}: removed poorly crossed '{word}'");
                    continue;
                }
            }

            let mut tested = tested.lock().await;
            if tested.is_empty() {
                tracing::warn!("Turn {turn}: no candidates and nothing to remove");
            } else {
                tracing::debug!("Turn {turn}: quarantining {} tested words", tested.len());
                quarantine.extend(tested.drain());
            }
        }

        // cap reached; fall back to the best grid seen
        let score = {
            let scores = LocalScores::new(&grid, &self.scorer, self.rng.r#gen());
            scores.grid_score()
        };
        fame.add(score, grid);

        let grid = fame.into_best().expect("at least one grid was scored");
        let satisfied = finished(&grid);

        tracing::warn!(
            "Turn cap reached after {turns} turns; best grid holds {} entries",
            grid.word_count()
        );

        Ok(Generation {
            grid,
            turns,
            satisfied,
        })
    }

    /// Explores the row and column through each field concurrently and
    /// returns the first candidate whose grid score does not drop
    ///
    /// Outstanding searches are aborted as soon as a candidate is accepted;
    /// every word that came back before that is recorded in `tested`.
    async fn explore_fields(
        &mut self,
        grid: &Grid,
        fields: &[Position],
        history: &BTreeMap<Line, HashSet<String>>,
        quarantine: &HashSet<String>,
        tested: &Arc<Mutex<HashSet<String>>>,
        current: f64,
    ) -> Option<Candidate> {
        for &field in fields {
            let (tx, mut rx) = mpsc::channel(8);
            let mut tasks = Vec::new();

            for line in Line::through(field) {
                let mut exclusions = quarantine.clone();
                if let Some(tried) = history.get(&line) {
                    exclusions.extend(tried.iter().cloned());
                }

                let finder = CandidateFinder::new(self.dict.clone(), self.finder);
                let grid = grid.clone();
                let tested = Arc::clone(tested);
                let tx = tx.clone();
                let mut rng = SmallRng::seed_from_u64(self.rng.r#gen());

                tasks.push(tokio::spawn(async move {
                    match finder
                        .candidates_for_line(&grid, line, &exclusions, &mut rng)
                        .await
                    {
                        Ok(candidates) => {
                            for candidate in candidates {
                                tested.lock().await.insert(candidate.word.clone());

                                // receiver gone means the turn committed
                                if tx.send(candidate).await.is_err() {
                                    break;
                                }
                            }
                        }
                        Err(err) => tracing::warn!("Candidate search on {line} failed: {err}"),
                    }
                }));
            }
            drop(tx);

            let mut accepted = None;
            while let Some(candidate) = rx.recv().await {
                let scores = LocalScores::new(&candidate.grid, &self.scorer, self.rng.r#gen());

                if scores.grid_score() >= current {
                    accepted = Some(candidate);
                    break;
                }
            }

            for task in &tasks {
                task.abort();
            }

            if accepted.is_some() {
                return accepted;
            }
        }

        None
    }

    /// The worst-scoring entry whose crossings-per-letter goal falls below
    /// the cutoff, if any
    fn removal_target(&mut self, grid: &Grid) -> Option<String> {
        let scores = LocalScores::new(grid, &self.scorer, self.rng.r#gen());

        scores.worst_words().into_iter().find(|word| {
            WordRef::from_grid(grid, word)
                .map(|word| self.scorer.word_goal(&word) < self.bad_word_cutoff)
                .unwrap_or(false)
        })
    }
}
