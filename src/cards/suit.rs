/// Card suit: clubs, diamonds, hearts, spades, plus the neutral suit jokers carry.
///
/// The ordering (C < D < H < S < N) sorts hands and fixes the order in which
/// a set lists its suits. Neutral never takes part in a meld: a joker
/// standing in a set is handed one of the four real suits.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum Suit {
    #[default]
    C = 0,
    D = 1,
    H = 2,
    S = 3,
    N = 4,
}

impl Suit {
    /// The four real suits in canonical order.
    pub const fn all() -> [Suit; 4] {
        [Suit::C, Suit::D, Suit::H, Suit::S]
    }
    pub const fn is_neutral(&self) -> bool {
        matches!(self, Suit::N)
    }
    /// Red suits, for terminal colouring.
    pub fn is_red(&self) -> bool {
        matches!(self, Suit::D | Suit::H)
    }
}

/// u8 isomorphism
impl From<Suit> for u8 {
    fn from(s: Suit) -> u8 {
        s as u8
    }
}
impl TryFrom<u8> for Suit {
    type Error = String;
    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            0 => Ok(Suit::C),
            1 => Ok(Suit::D),
            2 => Ok(Suit::H),
            3 => Ok(Suit::S),
            4 => Ok(Suit::N),
            _ => Err(format!("invalid suit u8: {}", n)),
        }
    }
}

/// u16 bitmask of suits, used to track which suits a set already holds
impl From<Suit> for u16 {
    fn from(s: Suit) -> u16 {
        1 << u8::from(s)
    }
}

/// str isomorphism
impl TryFrom<&str> for Suit {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.trim().to_lowercase().as_str() {
            "c" | "♣" => Ok(Suit::C),
            "d" | "♦" => Ok(Suit::D),
            "h" | "♥" => Ok(Suit::H),
            "s" | "♠" => Ok(Suit::S),
            "*" | "n" => Ok(Suit::N),
            _ => Err(format!("invalid suit str: {}", s)),
        }
    }
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Suit::C => write!(f, "c"),
            Suit::D => write!(f, "d"),
            Suit::H => write!(f, "h"),
            Suit::S => write!(f, "s"),
            Suit::N => write!(f, "*"),
        }
    }
}
