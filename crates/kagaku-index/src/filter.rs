//! Conjunctive metadata filters applied after scoring.

use kagaku_core::types::Problem;

/// Filter criteria for a search. All conditions are ANDed together;
/// an absent field imposes no constraint. A filter value matching no
/// problem simply yields fewer results, never an error.
#[derive(Debug, Clone, Default)]
pub struct Filters {
    pub source: Option<String>,
    pub tags: Vec<String>,
    pub concepts: Vec<String>,
}

impl Filters {
    /// Parse raw query-string values. Tag and concept lists are split
    /// on commas and trimmed; empty fragments are dropped. Parsing is
    /// permissive by design: filter formatting can never fail a search.
    pub fn parse(source: Option<&str>, tags: Option<&str>, concepts: Option<&str>) -> Self {
        Self {
            source: source
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            tags: split_list(tags),
            concepts: split_list(concepts),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_none() && self.tags.is_empty() && self.concepts.is_empty()
    }

    /// True iff `problem` satisfies every condition: exact source
    /// match, every required tag present, every required concept
    /// present.
    pub fn matches(&self, problem: &Problem) -> bool {
        if let Some(source) = &self.source {
            if source != &problem.source {
                return false;
            }
        }
        self.tags
            .iter()
            .all(|tag| problem.tags.iter().any(|t| t == tag))
            && self
                .concepts
                .iter()
                .all(|concept| problem.concepts.iter().any(|c| c == concept))
    }
}

fn split_list(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|fragment| !fragment.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}
