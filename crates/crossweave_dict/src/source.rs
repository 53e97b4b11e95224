use std::collections::HashMap;
use std::future::Future;

use crossweave_core::Alphabit;

use crate::Result;

/// Gateway to a word/clue store queryable by regular expression
///
/// This is the only seam the generation engine talks to a dictionary
/// through. The contract mirrors the server-side queries of a tabular store
/// with `answer`, `clue` and `alphabit` columns:
///
/// - matches are distinct answers of length > 1, never drawn from the
///   exclusion set, and returned in a fresh random order on every call
///   (repeated identical queries must not replay the same order, the
///   stochastic search depends on it);
/// - the alphabit variant additionally requires
///   `popcount(query_mask | alphabit) == 26`, which prunes the regex scan to
///   candidates containing every literal letter of the pattern;
/// - [`random`](DictionarySource::random) draws one starter answer with
///   `1 < length <= max_len` and fails with
///   [`DataUnavailable`](crate::DictError::DataUnavailable) on an empty store.
///
/// Implementations serialise access internally; callers share the source
/// freely across tasks.
pub trait DictionarySource {
    /// Up to `limit` answers matching `pattern`, excluding `exclusions`
    fn find_matches(
        &self,
        pattern: &str,
        exclusions: &[String],
        limit: usize,
    ) -> impl Future<Output = Result<Vec<String>>> + Send;

    /// As [`find_matches`](DictionarySource::find_matches), prefiltered by the
    /// pattern's [query mask](Alphabit::as_query_mask)
    fn find_matches_with_alphabit(
        &self,
        pattern: &str,
        query_mask: Alphabit,
        exclusions: &[String],
        limit: usize,
    ) -> impl Future<Output = Result<Vec<String>>> + Send;

    /// One random answer with `1 < length <= max_len`
    fn random(&self, max_len: usize) -> impl Future<Output = Result<String>> + Send;

    /// A representative clue per answer; answers without a clue map to an
    /// empty string
    fn clues(&self, answers: &[String])
    -> impl Future<Output = Result<HashMap<String, String>>> + Send;
}
