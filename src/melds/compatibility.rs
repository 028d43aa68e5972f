use crate::cards::Card;
use crate::cards::CardView;

/// How a candidate card relates to the last card of an open meld.
///
/// This is the only place meld compatibility is decided. The tracker turns
/// each variant into zero, one or two extended melds; `None` always prunes.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Compatibility {
    None,
    RunExtend,
    SetExtend,
    /// The meld's last card is an unresolved joker; the candidate decides
    /// what it stands in for.
    JokerAsPrior,
    /// The candidate is a joker and will stand in for whatever continues the
    /// meld.
    JokerAsCandidate,
}

impl Compatibility {
    pub fn classify(last: &CardView, candidate: &Card) -> Self {
        match (last.is_wild(), candidate.is_joker()) {
            (true, false) => Self::JokerAsPrior,
            (false, true) => Self::JokerAsCandidate,
            (true, true) => Self::None,
            (false, false) if Self::follows(last, candidate) => Self::RunExtend,
            (false, false) if last.sign() == candidate.sign() => Self::SetExtend,
            (false, false) => Self::None,
        }
    }
    fn follows(last: &CardView, candidate: &Card) -> bool {
        last.suit() == candidate.suit() && candidate.rank() == last.rank() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(s: &str) -> CardView {
        CardView::from(&Card::try_from(s).unwrap())
    }
    fn card(s: &str) -> Card {
        Card::try_from(s).unwrap()
    }

    #[test]
    fn run_needs_suit_and_successor() {
        assert!(Compatibility::classify(&view("5h"), &card("6h")) == Compatibility::RunExtend);
        assert!(Compatibility::classify(&view("5h"), &card("6s")) == Compatibility::None);
        assert!(Compatibility::classify(&view("5h"), &card("7h")) == Compatibility::None);
        assert!(Compatibility::classify(&view("6h"), &card("5h")) == Compatibility::None);
    }

    #[test]
    fn set_needs_sign() {
        assert!(Compatibility::classify(&view("7c"), &card("7s")) == Compatibility::SetExtend);
        assert!(Compatibility::classify(&view("7c"), &card("7c")) == Compatibility::SetExtend);
    }

    #[test]
    fn ace_follows_king_and_low_ace_precedes_two() {
        assert!(Compatibility::classify(&view("Kd"), &card("Ad")) == Compatibility::RunExtend);
        assert!(Compatibility::classify(&view("Ad"), &card("2d")) == Compatibility::None);
        assert!(Compatibility::classify(&view("Ad").low(), &card("2d")) == Compatibility::RunExtend);
    }

    #[test]
    fn jokers() {
        let wild = CardView::from(&Card::joker());
        assert!(Compatibility::classify(&wild, &card("9s")) == Compatibility::JokerAsPrior);
        assert!(Compatibility::classify(&view("9s"), &Card::joker()) == Compatibility::JokerAsCandidate);
        assert!(Compatibility::classify(&wild, &Card::joker()) == Compatibility::None);
        let resolved = wild.stand_in(8, crate::cards::Suit::S).unwrap();
        assert!(Compatibility::classify(&resolved, &card("9s")) == Compatibility::RunExtend);
    }
}
