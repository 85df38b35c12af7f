//! kagaku-index
//!
//! Hashing-vectorizer similarity search over the problem corpus:
//! character bigrams hashed into a fixed-dimension space, cosine
//! scoring, conjunctive metadata filtering. See `vectorize`, `index`
//! and `filter`.

pub mod filter;
pub mod index;
pub mod vectorize;

pub use filter::Filters;
pub use index::{SearchIndex, MAX_RESULTS};
pub use vectorize::{SparseVector, VECTOR_DIM};
