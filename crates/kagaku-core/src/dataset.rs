//! JSON corpus loading and id lookup.
//!
//! The dataset is read once at startup and never mutated afterwards,
//! so it can be shared read-only across request handlers.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::types::{Problem, ProblemId};
use crate::{Error, Result};

/// The immutable problem corpus. Owns every [`Problem`]; downstream
/// consumers (the similarity index) refer to problems by position.
#[derive(Debug)]
pub struct Dataset {
    problems: Vec<Problem>,
    by_id: HashMap<ProblemId, usize>,
}

impl Dataset {
    /// Build a dataset from already-deserialized problems.
    /// Duplicate ids are a hard error, matching the loader contract:
    /// every problem has a unique identifier.
    pub fn new(problems: Vec<Problem>) -> Result<Self> {
        let mut by_id = HashMap::with_capacity(problems.len());
        for (position, problem) in problems.iter().enumerate() {
            if by_id.insert(problem.id.clone(), position).is_some() {
                return Err(Error::Dataset(format!(
                    "duplicate problem id: {}",
                    problem.id
                )));
            }
        }
        Ok(Self { problems, by_id })
    }

    /// Load a JSON array of problems from `path`. A missing required
    /// field fails deserialization, so schema violations surface here
    /// rather than at query time.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|e| Error::Dataset(format!("failed to read {}: {}", path.display(), e)))?;
        let problems: Vec<Problem> = serde_json::from_str(&raw)
            .map_err(|e| Error::Dataset(format!("failed to parse {}: {}", path.display(), e)))?;
        Self::new(problems)
    }

    pub fn get(&self, id: &str) -> Option<&Problem> {
        self.by_id.get(id).map(|&position| &self.problems[position])
    }

    /// Like [`Dataset::get`] but surfaces the miss as an error for
    /// callers that treat an unknown id as a failure (the HTTP layer
    /// maps this to a 404).
    pub fn require(&self, id: &str) -> Result<&Problem> {
        self.get(id)
            .ok_or_else(|| Error::NotFound(format!("problem '{}'", id)))
    }

    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }

    pub fn len(&self) -> usize {
        self.problems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }
}
