use crate::cards::CardId;

/// The card held out of one search, the candidate discard.
///
/// `Nothing` asks whether the whole hand melds on its own.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum Exclusion {
    Nothing,
    Card(CardId),
}

impl Exclusion {
    pub fn card(&self) -> Option<CardId> {
        match self {
            Exclusion::Nothing => None,
            Exclusion::Card(id) => Some(*id),
        }
    }
}

impl From<CardId> for Exclusion {
    fn from(id: CardId) -> Self {
        Exclusion::Card(id)
    }
}

impl std::fmt::Display for Exclusion {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Exclusion::Nothing => f.pad("nothing"),
            Exclusion::Card(id) => f.pad(&id.to_string()),
        }
    }
}
