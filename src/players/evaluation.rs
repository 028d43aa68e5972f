use crate::melds::Partition;
use crate::search::Diagnostics;
use crate::search::Exclusion;
use crate::search::SearchError;
use std::time::Duration;

/// One way to go out: the card to hold back and how the rest melds.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Combination {
    pub exclusion: Exclusion,
    pub partition: Partition,
}

/// An exclusion whose search failed. Other exclusions are unaffected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub exclusion: Exclusion,
    pub error: SearchError,
}

/// Everything one `evaluate_combinations` call found.
#[derive(Debug, Clone, Default)]
pub struct Evaluation {
    pub combinations: Vec<Combination>,
    pub failures: Vec<Failure>,
    pub diagnostics: Diagnostics,
    pub elapsed: Duration,
}

impl Evaluation {
    pub fn is_empty(&self) -> bool {
        self.combinations.is_empty()
    }
    pub fn len(&self) -> usize {
        self.combinations.len()
    }
    /// Partitions found under one exclusion.
    pub fn under(&self, exclusion: Exclusion) -> impl Iterator<Item = &Partition> {
        self.combinations
            .iter()
            .filter(move |c| c.exclusion == exclusion)
            .map(|c| &c.partition)
    }
}

impl std::fmt::Display for Evaluation {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{:<20}{:<20}{:<20}{}",
            format!("found {}", self.combinations.len()),
            format!("failed {}", self.failures.len()),
            format!("took {:.2?}", self.elapsed),
            self.diagnostics,
        )
    }
}
