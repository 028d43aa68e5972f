use super::exclusion::Exclusion;
use crate::melds::Partition;
use std::collections::HashMap;

/// Partitions found per exclusion, in the order they were stored.
///
/// Keyed by card identity, so the two 7♣ of a double deck keep separate
/// entries. Owned by the player and dropped whenever the hand changes.
#[derive(Debug, Clone, Default)]
pub struct Combinations {
    order: Vec<Exclusion>,
    entries: HashMap<Exclusion, Vec<Partition>>,
}

impl Combinations {
    /// `None` for an exclusion that was never computed.
    pub fn get(&self, exclusion: &Exclusion) -> Option<&[Partition]> {
        self.entries.get(exclusion).map(Vec::as_slice)
    }
    pub fn contains(&self, exclusion: &Exclusion) -> bool {
        self.entries.contains_key(exclusion)
    }
    /// Store the result of one exclusion, replacing any earlier one.
    pub fn insert(&mut self, exclusion: Exclusion, partitions: Vec<Partition>) {
        if self.entries.insert(exclusion, partitions).is_none() {
            self.order.push(exclusion);
        }
    }
    pub fn clear(&mut self) {
        self.order.clear();
        self.entries.clear();
    }
    /// Number of exclusions stored.
    pub fn len(&self) -> usize {
        self.order.len()
    }
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
    /// Total partitions across all exclusions.
    pub fn partitions(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }
    pub fn iter(&self) -> impl Iterator<Item = (Exclusion, &[Partition])> + '_ {
        self.order
            .iter()
            .filter_map(|e| self.get(e).map(|partitions| (*e, partitions)))
    }
}
