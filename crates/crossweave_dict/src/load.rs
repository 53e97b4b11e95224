use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Result;

/// On-disk dictionary store
///
/// Two JSON shapes are accepted: a plain `{"ANSWER": "clue"}` object, or the
/// record list `[{"answer": ..., "clue": ...}]` exported by clue pipelines.
/// Writing always produces the object form.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum StoreFile {
    Map(BTreeMap<String, Option<String>>),
    Records(Vec<StoreRecord>),
}

#[derive(Debug, Serialize, Deserialize)]
struct StoreRecord {
    answer: String,

    #[serde(default)]
    clue: Option<String>,
}

/// Reads `(answer, clue)` pairs from a JSON store file
///
/// Answers are returned as stored; normalisation happens when the pairs are
/// turned into a [`MemoryDictionary`](crate::MemoryDictionary).
pub fn read_entries(path: &Path) -> Result<Vec<(String, String)>> {
    let file = File::open(path)?;
    let store: StoreFile = serde_json::from_reader(BufReader::new(file))?;

    let entries = match store {
        StoreFile::Map(map) => map
            .into_iter()
            .map(|(answer, clue)| (answer, clue.unwrap_or_default()))
            .collect(),
        StoreFile::Records(records) => records
            .into_iter()
            .map(|record| (record.answer, record.clue.unwrap_or_default()))
            .collect(),
    };

    Ok(entries)
}

/// Writes `(answer, clue)` pairs as a normalised JSON store file
///
/// Entries that do not [normalise](normalise_answer) are dropped; duplicate
/// answers keep the first clue.
pub fn write_entries(path: &Path, entries: &[(String, String)]) -> Result<usize> {
    let mut map = BTreeMap::new();
    for (answer, clue) in entries {
        let Some(answer) = normalise_answer(answer) else {
            tracing::debug!("Dropping unusable answer '{answer}'");
            continue;
        };

        map.entry(answer).or_insert_with(|| Some(clue.clone()));
    }

    let count = map.len();
    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), &StoreFile::Map(map))?;

    Ok(count)
}

/// Uppercases an answer and verifies it is usable as a grid entry: purely
/// ASCII-alphabetic and longer than one letter
pub fn normalise_answer(answer: &str) -> Option<String> {
    let answer = crossweave_core::normalise(answer.trim());

    let usable = answer.chars().count() > 1 && answer.chars().all(|c| c.is_ascii_uppercase());
    usable.then_some(answer)
}
