use super::sign::Sign;
use super::suit::Suit;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// Process-unique identity of a physical card.
///
/// Two decks hold two structurally equal 7♣; their ids differ. Ids are
/// handed out once per [`Card::new`] and never reused.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct CardId(u64);

impl CardId {
    fn next() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A playing card: identity plus the sign and suit printed on it.
///
/// Cards are immutable once dealt. Everything the search wants to reinterpret
/// (a joker standing in for 6♥, an ace read as 1) lives on a
/// [`CardView`](super::view::CardView) instead.
///
/// # Parsing
///
/// Cards parse from two-character strings like `"As"` (ace of spades) or
/// `"Tc"` (ten of clubs). The joker is `"**"`. Use [`Card::parse`] for many.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Card {
    id: CardId,
    sign: Sign,
    suit: Suit,
    face_up: bool,
}

impl Card {
    /// A fresh face-down card with a new identity. Jokers always carry the
    /// neutral suit and ordinary cards never do.
    pub fn new(sign: Sign, suit: Suit) -> Self {
        let suit = match sign {
            Sign::Joker => Suit::N,
            _ => suit,
        };
        debug_assert!(sign.is_joker() || !suit.is_neutral());
        Self {
            id: CardId::next(),
            sign,
            suit,
            face_up: false,
        }
    }
    pub fn joker() -> Self {
        Self::new(Sign::Joker, Suit::N)
    }
    /// Same card, turned over. Identity is kept.
    pub fn flipped(self) -> Self {
        Self {
            face_up: !self.face_up,
            ..self
        }
    }

    pub fn id(&self) -> CardId {
        self.id
    }
    pub fn sign(&self) -> Sign {
        self.sign
    }
    pub fn suit(&self) -> Suit {
        self.suit
    }
    pub fn rank(&self) -> u8 {
        self.sign.rank()
    }
    pub fn is_joker(&self) -> bool {
        self.sign.is_joker()
    }
    pub fn is_face_up(&self) -> bool {
        self.face_up
    }
    /// Value-level key `sign-suit`, e.g. `T-s` or `*-*`. Equal for the two
    /// copies of a card in a double deck.
    pub fn signature(&self) -> String {
        format!("{}-{}", self.sign, self.suit)
    }

    /// Parses a string of concatenated card notations into a vector of cards.
    ///
    /// Whitespace is ignored. Each card is two characters: sign then suit.
    /// Returns an error if any card fails to parse.
    pub fn parse(s: &str) -> Result<Vec<Self>, String> {
        s.replace(char::is_whitespace, "")
            .chars()
            .collect::<Vec<_>>()
            .chunks(2)
            .map(|pair| pair.iter().collect::<String>())
            .map(|pair| Self::try_from(pair.as_str()))
            .collect::<Result<Vec<Self>, _>>()
    }
}

/// Hand order: suit, then sign, then identity so that equal cards from
/// different decks still sort deterministically.
impl Ord for Card {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        std::cmp::Ordering::Equal
            .then_with(|| self.suit.cmp(&other.suit))
            .then_with(|| self.sign.cmp(&other.sign))
            .then_with(|| self.id.cmp(&other.id))
            .then_with(|| self.face_up.cmp(&other.face_up))
    }
}
impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}{}", self.sign, self.suit)
    }
}

/// str isomorphism (up to identity, every parse mints a new card)
impl TryFrom<&str> for Card {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let s = s.trim();
        match s.chars().count() {
            2 => {
                let mut chars = s.chars();
                let sign = chars.next().map(String::from).unwrap_or_default();
                let suit = chars.next().map(String::from).unwrap_or_default();
                let sign = Sign::try_from(sign.as_str())?;
                let suit = Suit::try_from(suit.as_str())?;
                match (sign.is_joker(), suit.is_neutral()) {
                    (true, true) | (false, false) => Ok(Card::new(sign, suit)),
                    (true, false) => Err(format!("joker with a suit: {}", s)),
                    (false, true) => Err(format!("neutral suit on a {}", sign)),
                }
            }
            _ => Err(format!("2 characters: {}", s)),
        }
    }
}

/// `sign-suit` signature, as written in deck sequences
impl Card {
    pub fn from_signature(s: &str) -> Result<Self, String> {
        let (sign, suit) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| format!("broken delimiter: {}", s))?;
        Self::try_from(format!("{}{}", Sign::try_from(sign)?, Suit::try_from(suit)?).as_str())
    }
}
