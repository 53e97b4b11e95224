use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::{Arc, Mutex};

use crossweave_core::Alphabit;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use regex::Regex;

use crate::{DictError, DictionarySource, Result, normalise_answer, read_entries};

#[derive(Debug)]
struct Entry {
    answer: String,
    clue: String,
    alphabit: Alphabit,
}

/// In-memory [dictionary source](DictionarySource)
///
/// Holds the whole answer table with precomputed alphabit masks. Cloning is
/// cheap (the table is shared); the shuffle RNG sits behind a mutex so
/// concurrent queries stay serialised, as the gateway contract asks.
#[derive(Debug, Clone)]
pub struct MemoryDictionary {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    entries: Vec<Entry>,
    rng: Mutex<SmallRng>,
}

impl MemoryDictionary {
    /// Builds a dictionary from `(answer, clue)` pairs
    ///
    /// Answers are uppercased; entries that are not purely alphabetic or not
    /// longer than one letter are dropped, as are duplicate answers (the
    /// first clue wins).
    pub fn from_entries<I>(entries: I, seed: u64) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut seen = HashSet::new();
        let entries = entries
            .into_iter()
            .filter_map(|(answer, clue)| {
                let answer = normalise_answer(&answer)?;
                if !seen.insert(answer.clone()) {
                    return None;
                }

                let alphabit = Alphabit::from_text(&answer);
                Some(Entry {
                    answer,
                    clue,
                    alphabit,
                })
            })
            .collect();

        Self {
            inner: Arc::new(Inner {
                entries,
                rng: Mutex::new(SmallRng::seed_from_u64(seed)),
            }),
        }
    }

    /// Loads a dictionary from a JSON store file
    pub fn from_path(path: &Path, seed: u64) -> Result<Self> {
        let entries = read_entries(path)?;
        tracing::info!("Loaded {} dictionary entries from {path:?}", entries.len());

        Ok(Self::from_entries(entries, seed))
    }

    pub fn len(&self) -> usize {
        self.inner.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.entries.is_empty()
    }

    fn select(
        &self,
        pattern: &str,
        query_mask: Option<Alphabit>,
        exclusions: &[String],
        limit: usize,
    ) -> Result<Vec<String>> {
        let regex = Regex::new(pattern)?;
        let excluded: HashSet<&str> = exclusions.iter().map(String::as_str).collect();

        let mut matches: Vec<&Entry> = self
            .inner
            .entries
            .iter()
            .filter(|entry| query_mask.is_none_or(|mask| mask.admits(entry.alphabit)))
            .filter(|entry| !excluded.contains(entry.answer.as_str()))
            .filter(|entry| regex.is_match(&entry.answer))
            .collect();

        let mut rng = self.inner.rng.lock().expect("dictionary rng poisoned");
        matches.shuffle(&mut *rng);

        Ok(matches
            .into_iter()
            .take(limit)
            .map(|entry| entry.answer.clone())
            .collect())
    }
}

impl DictionarySource for MemoryDictionary {
    async fn find_matches(
        &self,
        pattern: &str,
        exclusions: &[String],
        limit: usize,
    ) -> Result<Vec<String>> {
        self.select(pattern, None, exclusions, limit)
    }

    async fn find_matches_with_alphabit(
        &self,
        pattern: &str,
        query_mask: Alphabit,
        exclusions: &[String],
        limit: usize,
    ) -> Result<Vec<String>> {
        self.select(pattern, Some(query_mask), exclusions, limit)
    }

    async fn random(&self, max_len: usize) -> Result<String> {
        let candidates: Vec<&Entry> = self
            .inner
            .entries
            .iter()
            .filter(|entry| entry.answer.chars().count() <= max_len)
            .collect();

        if candidates.is_empty() {
            return Err(DictError::DataUnavailable);
        }

        let mut rng = self.inner.rng.lock().expect("dictionary rng poisoned");
        let nth = rng.gen_range(0..candidates.len());

        Ok(candidates[nth].answer.clone())
    }

    async fn clues(&self, answers: &[String]) -> Result<HashMap<String, String>> {
        let clues = answers
            .iter()
            .map(|answer| {
                let clue = self
                    .inner
                    .entries
                    .iter()
                    .find(|entry| entry.answer == *answer)
                    .map(|entry| entry.clue.clone())
                    .unwrap_or_default();

                (answer.clone(), clue)
            })
            .collect();

        Ok(clues)
    }
}
