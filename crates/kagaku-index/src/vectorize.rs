//! Character-bigram hashing vectorizer.
//!
//! Text is lowercased, stripped of whitespace, broken into contiguous
//! 2-code-point bigrams, and each bigram is hashed into one of
//! [`VECTOR_DIM`] dimensions with a seeded XxHash64. Distinct bigrams
//! may land in the same dimension; that collision is the accepted
//! trade-off for a fixed-size vector space and is expected behavior.
//! The seed is fixed, so the same text always produces the same vector
//! across runs and restarts.

use std::collections::HashMap;
use std::hash::Hasher;

use twox_hash::XxHash64;

/// Fixed dimensionality of the hashed vector space.
pub const VECTOR_DIM: usize = 4096;

/// Sparse vector over `[0, VECTOR_DIM)`, L2-normalized at construction.
///
/// Because every non-zero vector has unit length, cosine similarity
/// between two of them is their plain dot product. Texts with fewer
/// than two code points after normalization produce the zero vector,
/// which scores 0 against everything.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SparseVector {
    weights: HashMap<usize, f32>,
}

impl SparseVector {
    /// Vectorize `text`: accumulate term frequency per hashed bigram,
    /// then normalize to unit length.
    pub fn from_text(text: &str) -> Self {
        let normalized = normalize(text);
        let mut weights: HashMap<usize, f32> = HashMap::new();
        for gram in bigrams(&normalized) {
            *weights.entry(hash_dimension(&gram)).or_insert(0.0) += 1.0;
        }

        let norm = weights.values().map(|w| w * w).sum::<f32>().sqrt();
        if norm > 0.0 {
            for w in weights.values_mut() {
                *w /= norm;
            }
        }
        Self { weights }
    }

    pub fn is_zero(&self) -> bool {
        self.weights.is_empty()
    }

    /// Dot product, iterating the smaller side. Equals cosine
    /// similarity for unit-length vectors; 0 when either side is the
    /// zero vector, so no division-by-zero case exists.
    pub fn dot(&self, other: &Self) -> f32 {
        let (small, large) = if self.weights.len() <= other.weights.len() {
            (self, other)
        } else {
            (other, self)
        };
        small
            .weights
            .iter()
            .map(|(dim, w)| w * large.weights.get(dim).copied().unwrap_or(0.0))
            .sum()
    }
}

/// Lowercase and drop every whitespace code point. Whitespace carries
/// no signal for bigram matching, and Japanese text rarely contains it
/// anyway.
fn normalize(text: &str) -> String {
    text.to_lowercase().chars().filter(|c| !c.is_whitespace()).collect()
}

/// All contiguous 2-code-point substrings. Shorter input yields none.
fn bigrams(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() < 2 {
        return Vec::new();
    }
    chars.windows(2).map(|pair| pair.iter().collect()).collect()
}

fn hash_dimension(gram: &str) -> usize {
    let mut hasher = XxHash64::with_seed(0);
    hasher.write(gram.as_bytes());
    (hasher.finish() % VECTOR_DIM as u64) as usize
}
