use super::card::Card;
use super::card::CardId;
use super::sign::Sign;
use super::suit::Suit;

/// A branch-local reading of a [`Card`].
///
/// The search places views, not cards, into melds. A view starts as a copy
/// of its card's sign, suit and rank, and may then be reinterpreted: an ace
/// read as rank 1 at the bottom of a run, or a joker resolved to the card it
/// stands in for. The card itself is only referenced by id and never changes,
/// so sibling branches can read the same card differently.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct CardView {
    card: CardId,
    sign: Sign,
    suit: Suit,
    rank: u8,
    joker: bool,
    resolved: bool,
}

impl CardView {
    pub fn card(&self) -> CardId {
        self.card
    }
    pub fn sign(&self) -> Sign {
        self.sign
    }
    pub fn suit(&self) -> Suit {
        self.suit
    }
    pub fn rank(&self) -> u8 {
        self.rank
    }
    /// The source card is a joker, resolved or not.
    pub fn is_joker(&self) -> bool {
        self.joker
    }
    /// An unresolved joker: it does not yet stand for anything.
    pub fn is_wild(&self) -> bool {
        self.joker && !self.resolved
    }
    pub fn is_resolved(&self) -> bool {
        self.resolved
    }
    /// An ace sitting below the two.
    pub fn is_low_ace(&self) -> bool {
        self.sign == Sign::Ace && self.rank == Sign::ACE_LOW
    }

    /// The same ace read as rank 1. Identity for any other card.
    pub fn low(self) -> Self {
        match self.sign {
            Sign::Ace if !self.joker => Self {
                rank: Sign::ACE_LOW,
                ..self
            },
            _ => self,
        }
    }
    /// Resolve a joker to stand in for the card of `rank` in `suit`.
    /// `None` if the rank does not exist or this view is no joker.
    pub fn stand_in(self, rank: u8, suit: Suit) -> Option<Self> {
        match self.joker {
            false => None,
            true => Sign::from_rank(rank).map(|sign| Self {
                sign,
                suit,
                rank,
                resolved: true,
                ..self
            }),
        }
    }
    /// Give a set's joker the suit it ends up representing.
    pub fn with_suit(self, suit: Suit) -> Self {
        debug_assert!(self.joker);
        Self { suit, ..self }
    }
}

impl From<&Card> for CardView {
    fn from(card: &Card) -> Self {
        Self {
            card: card.id(),
            sign: card.sign(),
            suit: card.suit(),
            rank: card.rank(),
            joker: card.is_joker(),
            resolved: false,
        }
    }
}

impl std::fmt::Display for CardView {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.joker {
            true if self.resolved => write!(f, "({}{})", self.sign, self.suit),
            _ => write!(f, "{}{}", self.sign, self.suit),
        }
    }
}
