use crate::cards::Card;
use crate::cards::CardId;

/// The cards a player holds, in search order.
///
/// Bulk additions keep the hand sorted by suit, then sign, then identity.
/// A single card taken from the table goes to the front instead, so it is
/// the first candidate discard the next evaluation looks at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand(Vec<Card>);

impl Hand {
    pub fn empty() -> Self {
        Self::default()
    }
    pub fn cards(&self) -> &[Card] {
        &self.0
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn contains(&self, id: CardId) -> bool {
        self.0.iter().any(|c| c.id() == id)
    }
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.0.iter().find(|c| c.id() == id)
    }
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.0.iter()
    }

    /// Append and re-sort.
    pub fn add_cards(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.0.extend(cards);
        self.0.sort();
    }
    /// Prepend, leaving the rest of the order alone.
    pub fn add_card(&mut self, card: Card) {
        self.0.insert(0, card);
    }
    /// Take a card out of the hand, e.g. to discard it.
    pub fn remove(&mut self, id: CardId) -> Option<Card> {
        self.0
            .iter()
            .position(|c| c.id() == id)
            .map(|i| self.0.remove(i))
    }
}

/// Vec<Card> isomorphism (up to order, this always comes out sorted)
impl From<Vec<Card>> for Hand {
    fn from(cards: Vec<Card>) -> Self {
        let mut hand = Self::empty();
        hand.add_cards(cards);
        hand
    }
}
impl From<Hand> for Vec<Card> {
    fn from(hand: Hand) -> Self {
        hand.0
    }
}

/// str isomorphism
/// this follows from Vec<Card> isomorphism
impl TryFrom<&str> for Hand {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Card::parse(s).map(Self::from)
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (i, card) in self.0.iter().enumerate() {
            match i {
                0 => write!(f, "{}", card)?,
                _ if self.0[i - 1].suit() != card.suit() => write!(f, " | {}", card)?,
                _ => write!(f, " {}", card)?,
            }
        }
        Ok(())
    }
}
