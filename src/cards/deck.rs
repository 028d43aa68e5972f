use super::card::Card;
use super::sign::Sign;
use super::suit::Suit;
use rand::Rng;
use rand::seq::SliceRandom;

/// A stack of physical cards. The top of the deck is the end of the vector.
///
/// A Remi deck is built from `copies` standard decks, each contributing 52
/// ordinary cards and two jokers. Besides drawing, the deck supports cutting
/// (`split`) and the `sign-suit|sign-suit|...` sequence format used to
/// replay an arrangement on another table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deck(Vec<Card>);

impl Deck {
    /// `copies` full decks with two jokers each, unshuffled.
    pub fn new(copies: usize) -> Self {
        Self(
            (0..copies)
                .flat_map(|_| {
                    Sign::all()
                        .into_iter()
                        .flat_map(|sign| Suit::all().map(|suit| Card::new(sign, suit)))
                        .chain([Card::joker(), Card::joker()])
                })
                .collect(),
        )
    }
    pub fn size(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn cards(&self) -> &[Card] {
        &self.0
    }

    /// Shuffle in place and return the resulting sequence.
    pub fn shuffle(&mut self) -> String {
        self.shuffle_with(&mut rand::rng())
    }
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> String {
        self.0.shuffle(rng);
        self.sequence()
    }

    /// Take the top card.
    pub fn draw(&mut self) -> Option<Card> {
        self.0.pop()
    }
    /// Take the top `n` cards, fewer if the deck runs out. Order is kept.
    pub fn draw_many(&mut self, n: usize) -> Vec<Card> {
        let at = self.0.len().saturating_sub(n);
        self.0.split_off(at)
    }
    /// Take `n` cards starting at `position`, counted from the bottom.
    pub fn draw_from(&mut self, position: usize, n: usize) -> Vec<Card> {
        let lo = position.min(self.0.len());
        let hi = position.saturating_add(n).min(self.0.len());
        self.0.drain(lo..hi).collect()
    }
    /// Put a card on top.
    pub fn insert(&mut self, card: Card) {
        self.0.push(card);
    }
    /// Cut at `position` and swap the halves: the card at `position` becomes
    /// the bottom card.
    pub fn split(&mut self, position: usize) {
        let position = position.min(self.0.len());
        self.0.rotate_left(position);
    }

    /// `sign-suit|sign-suit|...`, bottom to top.
    pub fn sequence(&self) -> String {
        self.0
            .iter()
            .map(Card::signature)
            .collect::<Vec<_>>()
            .join("|")
    }
}

/// sequence isomorphism (up to card identity)
impl TryFrom<&str> for Deck {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.trim() {
            "" => Ok(Self::default()),
            s => s
                .split('|')
                .map(Card::from_signature)
                .collect::<Result<Vec<_>, _>>()
                .map(Self),
        }
    }
}

impl From<Deck> for Vec<Card> {
    fn from(deck: Deck) -> Self {
        deck.0
    }
}

impl Iterator for Deck {
    type Item = Card;
    fn next(&mut self) -> Option<Self::Item> {
        self.draw()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn double_deck_size() {
        let deck = Deck::new(2);
        assert!(deck.size() == 108);
        assert!(deck.cards().iter().filter(|c| c.is_joker()).count() == 4);
    }

    #[test]
    fn draws_from_top() {
        let mut deck = Deck::new(1);
        let top = *deck.cards().last().unwrap();
        assert!(deck.draw() == Some(top));
        let three = deck.draw_many(3);
        assert!(three.len() == 3);
        assert!(deck.size() == 50);
    }

    #[test]
    fn returned_card_goes_on_top() {
        let mut deck = Deck::new(1);
        let card = deck.draw_from(0, 1).remove(0);
        deck.insert(card);
        assert!(deck.size() == 54);
        assert!(deck.draw() == Some(card));
    }

    #[test]
    fn draw_from_middle() {
        let mut deck = Deck::new(1);
        let expected = deck.cards()[5..8].to_vec();
        assert!(deck.draw_from(5, 3) == expected);
        assert!(deck.size() == 51);
        assert!(deck.draw_from(100, 3).is_empty());
    }

    #[test]
    fn split_swaps_halves() {
        let mut deck = Deck::new(1);
        let cut = deck.cards()[12];
        let bottom = deck.cards()[0];
        deck.split(12);
        assert!(deck.cards()[0] == cut);
        assert!(deck.cards()[deck.size() - 12] == bottom);
    }

    #[test]
    fn sequence_replays_arrangement() {
        let ref mut rng = SmallRng::seed_from_u64(7);
        let mut deck = Deck::new(2);
        let sequence = deck.shuffle_with(rng);
        let copy = Deck::try_from(sequence.as_str()).unwrap();
        assert!(copy.sequence() == sequence);
        assert!(copy.size() == 108);
        assert!(copy != deck);
    }

    #[test]
    fn sequence_rejects_garbage() {
        assert!(Deck::try_from("7-c|Xc").is_err());
        assert!(Deck::try_from("").unwrap().is_empty());
    }
}
