//! Similarity index over the full problem corpus.

use std::cmp::Ordering;

use tracing::debug;

use kagaku_core::dataset::Dataset;
use kagaku_core::types::{Problem, SearchHit};

use crate::filter::Filters;
use crate::vectorize::SparseVector;

/// Maximum number of hits returned by a single search.
pub const MAX_RESULTS: usize = 10;

/// One pre-built vector per problem, stored by corpus position so the
/// dataset keeps sole ownership of the problems. Built once at startup
/// and read-only afterwards, so it is safe to share across request
/// handlers without locking.
pub struct SearchIndex {
    vectors: Vec<SparseVector>,
}

impl SearchIndex {
    /// Vectorize every problem's searchable text. The field set and
    /// order (title, statement, tags, concepts) are fixed; changing
    /// either changes ranking.
    pub fn build(dataset: &Dataset) -> Self {
        let vectors: Vec<SparseVector> = dataset
            .problems()
            .iter()
            .map(|problem| SparseVector::from_text(&searchable_text(problem)))
            .collect();
        debug!(problems = vectors.len(), "built similarity index");
        Self { vectors }
    }

    /// Cosine similarity of `query_vec` against every stored vector,
    /// one score per corpus position. Unsorted and unfiltered; a zero
    /// query vector scores 0 everywhere. O(N·D) worst case, fine at
    /// this corpus scale.
    pub fn score_all(&self, query_vec: &SparseVector) -> Vec<f32> {
        self.vectors.iter().map(|v| query_vec.dot(v)).collect()
    }

    /// Full search pipeline: vectorize the query, score the corpus,
    /// drop problems failing `filters`, sort by descending score with
    /// ascending id as the tie-break, truncate to [`MAX_RESULTS`].
    ///
    /// An empty (or sub-bigram) query vectorizes to the zero vector:
    /// every problem scores 0, filters still apply, and the id order
    /// makes the result deterministic. This is a total function; no
    /// query or filter input is an error.
    pub fn search(&self, dataset: &Dataset, query: &str, filters: &Filters) -> Vec<SearchHit> {
        let query_vec = SparseVector::from_text(query);
        let scores = self.score_all(&query_vec);

        let mut hits: Vec<SearchHit> = dataset
            .problems()
            .iter()
            .zip(scores)
            .filter(|(problem, _)| filters.matches(problem))
            .map(|(problem, score)| SearchHit {
                id: problem.id.clone(),
                title: problem.title.clone(),
                tags: problem.tags.clone(),
                source: problem.source.clone(),
                score: round_score(score),
            })
            .collect();

        hits.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.id.cmp(&b.id))
        });
        hits.truncate(MAX_RESULTS);
        hits
    }
}

/// Concatenated searchable text of a problem. Title, statement, tags,
/// concepts, in that order.
pub fn searchable_text(problem: &Problem) -> String {
    format!(
        "{} {} {} {}",
        problem.title,
        problem.statement,
        problem.tags.join(" "),
        problem.concepts.join(" ")
    )
}

/// Scores are reported to 6 decimal places.
fn round_score(score: f32) -> f32 {
    (score * 1_000_000.0).round() / 1_000_000.0
}
