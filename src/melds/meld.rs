use super::kind::MeldKind;
use crate::MAX_SET;
use crate::MIN_MELD;
use crate::cards::CardId;
use crate::cards::CardView;
use crate::cards::Suit;

/// A closed group of at least three cards: a run or a set.
///
/// Jokers inside are resolved views, so a meld reads exactly like the cards
/// it stands for.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Meld {
    kind: MeldKind,
    views: Vec<CardView>,
}

impl Meld {
    pub(crate) fn new(kind: MeldKind, views: Vec<CardView>) -> Self {
        Self { kind, views }
    }
    pub fn kind(&self) -> MeldKind {
        self.kind
    }
    pub fn views(&self) -> &[CardView] {
        &self.views
    }
    pub fn len(&self) -> usize {
        self.views.len()
    }
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
    pub fn cards(&self) -> impl Iterator<Item = CardId> + '_ {
        self.views.iter().map(CardView::card)
    }
    pub fn jokers(&self) -> usize {
        self.views.iter().filter(|v| v.is_joker()).count()
    }

    /// Checks the meld from scratch, independent of how it was built.
    pub fn is_valid(&self) -> bool {
        let size = self.views.len() >= MIN_MELD;
        let jokers = self.jokers() <= 1;
        let shape = match self.kind {
            MeldKind::Undetermined => false,
            MeldKind::Run => {
                self.views.iter().all(|v| v.suit() == self.views[0].suit())
                    && self.views.windows(2).all(|w| w[1].rank() == w[0].rank() + 1)
                    && self.views.iter().all(|v| !v.suit().is_neutral())
            }
            MeldKind::Set => {
                let suits = self
                    .views
                    .iter()
                    .map(|v| v.suit())
                    .collect::<std::collections::BTreeSet<Suit>>();
                self.views.len() <= MAX_SET
                    && suits.len() == self.views.len()
                    && self.views.iter().all(|v| v.sign() == self.views[0].sign())
                    && self.views.iter().all(|v| !v.suit().is_neutral())
            }
        };
        size && jokers && shape
    }
}

impl std::fmt::Display for Meld {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}[", self.kind)?;
        for (i, view) in self.views.iter().enumerate() {
            match i {
                0 => write!(f, "{}", view)?,
                _ => write!(f, " {}", view)?,
            }
        }
        write!(f, "]")
    }
}

/// Melds that together use every card of a search except the excluded one.
#[derive(Debug, Clone, Default, Hash, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Partition(Vec<Meld>);

impl Partition {
    pub fn melds(&self) -> &[Meld] {
        &self.0
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    /// Every card the partition uses, in meld order.
    pub fn cards(&self) -> Vec<CardId> {
        self.0.iter().flat_map(Meld::cards).collect()
    }
}

impl From<Vec<Meld>> for Partition {
    fn from(melds: Vec<Meld>) -> Self {
        Self(melds)
    }
}
impl From<Partition> for Vec<Meld> {
    fn from(partition: Partition) -> Self {
        partition.0
    }
}

impl std::fmt::Display for Partition {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (i, meld) in self.0.iter().enumerate() {
            match i {
                0 => write!(f, "{}", meld)?,
                _ => write!(f, " {}", meld)?,
            }
        }
        Ok(())
    }
}
