/// Counters collected while searching. Diagnostic only; nothing in the game
/// logic reads them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct Diagnostics {
    /// recursive steps taken, subproblems and meld extensions alike
    pub expansions: usize,
    /// candidates rejected while extending a meld
    pub pruned: usize,
    /// full partitions returned
    pub partitions: usize,
    /// exclusions answered from the combination cache
    pub hits: usize,
}

impl std::ops::AddAssign for Diagnostics {
    fn add_assign(&mut self, other: Self) {
        self.expansions += other.expansions;
        self.pruned += other.pruned;
        self.partitions += other.partitions;
        self.hits += other.hits;
    }
}

impl std::fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{:<20}{:<20}{:<20}{:<20}",
            format!("expand {}", self.expansions),
            format!("pruned {}", self.pruned),
            format!("parts {}", self.partitions),
            format!("hits {}", self.hits),
        )
    }
}
