//! Domain types shared by the index and the server.

use serde::{Deserialize, Serialize};

pub type ProblemId = String;

/// A single chemistry problem as stored in `problems.json`.
///
/// - `id`: unique URL-safe identifier
/// - `title`/`statement`: searchable problem text
/// - `choices`: ordered answer choices, may be absent
/// - `answer`: solution text, may be absent
/// - `tags`/`concepts`: filterable metadata sets
/// - `source`: label of the exam or book the problem came from
///
/// `id`, `title`, `statement`, `tags`, `concepts` and `source` are
/// required; deserialization fails when any of them is missing.
/// Problems are immutable once loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Problem {
    pub id: ProblemId,
    pub title: String,
    pub statement: String,
    #[serde(default)]
    pub choices: Vec<String>,
    #[serde(default)]
    pub answer: Option<String>,
    pub tags: Vec<String>,
    pub concepts: Vec<String>,
    pub source: String,
}

/// One ranked search result. Ephemeral, produced per query.
///
/// `score` is cosine similarity against the query, higher is better.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: ProblemId,
    pub title: String,
    pub tags: Vec<String>,
    pub source: String,
    pub score: f32,
}
