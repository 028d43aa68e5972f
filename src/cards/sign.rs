/// The rank token printed on a card.
///
/// Thirteen ordinary signs plus the joker. The numeric [`Sign::rank`] is a
/// pure function of the sign: 2 through 14 with the ace on top, and the
/// sentinel [`Sign::JOKER_RANK`] for the joker. Reading an ace as 1 is a
/// decision the search makes per branch, see [`Sign::from_rank`].
#[derive(Debug, Default, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum Sign {
    #[default]
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
    Joker,
}

impl Sign {
    pub const JOKER_RANK: u8 = 0;
    pub const ACE_LOW: u8 = 1;
    pub const ACE_HIGH: u8 = 14;

    /// The thirteen ordinary signs, low to high.
    pub const fn all() -> [Sign; 13] {
        [
            Sign::Two,
            Sign::Three,
            Sign::Four,
            Sign::Five,
            Sign::Six,
            Sign::Seven,
            Sign::Eight,
            Sign::Nine,
            Sign::Ten,
            Sign::Jack,
            Sign::Queen,
            Sign::King,
            Sign::Ace,
        ]
    }
    pub const fn is_joker(&self) -> bool {
        matches!(self, Sign::Joker)
    }
    pub const fn rank(&self) -> u8 {
        match self {
            Sign::Joker => Self::JOKER_RANK,
            s => *s as u8 + 2,
        }
    }
    /// Inverse of [`Sign::rank`] over ordinary cards. Rank 1 reads as the low
    /// ace; nothing maps past the high ace.
    pub const fn from_rank(rank: u8) -> Option<Sign> {
        match rank {
            1 | 14 => Some(Sign::Ace),
            2 => Some(Sign::Two),
            3 => Some(Sign::Three),
            4 => Some(Sign::Four),
            5 => Some(Sign::Five),
            6 => Some(Sign::Six),
            7 => Some(Sign::Seven),
            8 => Some(Sign::Eight),
            9 => Some(Sign::Nine),
            10 => Some(Sign::Ten),
            11 => Some(Sign::Jack),
            12 => Some(Sign::Queen),
            13 => Some(Sign::King),
            _ => None,
        }
    }
}

/// str isomorphism
impl TryFrom<&str> for Sign {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.trim().to_uppercase().as_str() {
            "2" => Ok(Sign::Two),
            "3" => Ok(Sign::Three),
            "4" => Ok(Sign::Four),
            "5" => Ok(Sign::Five),
            "6" => Ok(Sign::Six),
            "7" => Ok(Sign::Seven),
            "8" => Ok(Sign::Eight),
            "9" => Ok(Sign::Nine),
            "T" | "10" => Ok(Sign::Ten),
            "J" => Ok(Sign::Jack),
            "Q" => Ok(Sign::Queen),
            "K" => Ok(Sign::King),
            "A" => Ok(Sign::Ace),
            "*" => Ok(Sign::Joker),
            _ => Err(format!("invalid sign str: {}", s)),
        }
    }
}

impl std::fmt::Display for Sign {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Sign::Two => "2",
                Sign::Three => "3",
                Sign::Four => "4",
                Sign::Five => "5",
                Sign::Six => "6",
                Sign::Seven => "7",
                Sign::Eight => "8",
                Sign::Nine => "9",
                Sign::Ten => "T",
                Sign::Jack => "J",
                Sign::Queen => "Q",
                Sign::King => "K",
                Sign::Ace => "A",
                Sign::Joker => "*",
            }
        )
    }
}
