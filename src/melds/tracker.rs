use super::compatibility::Compatibility;
use super::kind::MeldKind;
use super::meld::Meld;
use crate::MAX_SET;
use crate::MIN_MELD;
use crate::cards::Card;
use crate::cards::CardView;
use crate::cards::Sign;
use crate::cards::Suit;
use crate::search::SearchError;

/// Length, kind and joker usage of the meld being built.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq)]
pub struct MeldState {
    pub length: usize,
    pub kind: MeldKind,
    pub has_joker: bool,
}

impl MeldState {
    pub fn is_open(&self) -> bool {
        self.length < MIN_MELD
    }
}

/// The open meld on one search branch.
///
/// Trackers are values: every accepted extension returns a new tracker and
/// leaves the old one untouched for sibling branches.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Tracker {
    views: Vec<CardView>,
    state: MeldState,
    suits: u16,
}

impl Tracker {
    /// Open a meld with a single view, already committed to `kind`.
    pub fn seed(view: CardView, kind: MeldKind) -> Self {
        Self {
            suits: Self::suit_bit(&view),
            state: MeldState {
                length: 1,
                kind,
                has_joker: view.is_joker(),
            },
            views: vec![view],
        }
    }

    /// The ways a card can open a meld. An ace opens twice, once read as 1
    /// for a run from the bottom and once as itself; a King can only open a
    /// set since nothing continues a run past the ace. A joker opens wild.
    pub fn seeds(card: &Card) -> Vec<Self> {
        let view = CardView::from(card);
        match card.sign() {
            Sign::Ace => vec![
                Self::seed(view.low(), MeldKind::Run),
                Self::seed(view, MeldKind::Set),
            ],
            Sign::King => vec![Self::seed(view, MeldKind::Set)],
            _ => vec![Self::seed(view, MeldKind::Undetermined)],
        }
    }

    pub fn state(&self) -> MeldState {
        self.state
    }
    pub fn views(&self) -> &[CardView] {
        &self.views
    }
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
    pub fn last(&self) -> Result<&CardView, SearchError> {
        self.views
            .last()
            .ok_or(SearchError::ProtocolViolation("extending an empty meld"))
    }

    /// Every tracker that results from appending `candidate`. Empty when the
    /// candidate is pruned; two trackers when a joker can read either as a
    /// run or as a set card.
    pub fn grow(&self, candidate: &Card) -> Result<Vec<Self>, SearchError> {
        let last = *self.last()?;
        let kind = self.state.kind;
        let view = CardView::from(candidate);
        let mut grown = Vec::with_capacity(2);
        match Compatibility::classify(&last, candidate) {
            Compatibility::None => {}
            Compatibility::RunExtend => {
                if kind.admits_run() {
                    grown.push(self.push(view, MeldKind::Run));
                }
            }
            Compatibility::SetExtend => {
                if kind.admits_set() && self.fits_set(candidate.suit()) {
                    grown.push(self.push(view, MeldKind::Set));
                }
            }
            Compatibility::JokerAsPrior => {
                if self.state.length != 1 {
                    return Err(SearchError::ProtocolViolation("unresolved joker inside a meld"));
                }
                // a leading joker never stands in front of an ace
                if kind.admits_run() && candidate.sign() != Sign::Ace {
                    if let Some(joker) = last.stand_in(candidate.rank() - 1, candidate.suit()) {
                        grown.push(Self::seed(joker, MeldKind::Run).push(view, MeldKind::Run));
                    }
                }
                if kind.admits_set() {
                    if let Some(joker) = last.stand_in(candidate.rank(), Suit::N) {
                        grown.push(Self::seed(joker, MeldKind::Set).push(view, MeldKind::Set));
                    }
                }
            }
            Compatibility::JokerAsCandidate => {
                if self.state.has_joker {
                    return Ok(grown);
                }
                if kind.admits_run() {
                    if let Some(joker) = view.stand_in(last.rank() + 1, last.suit()) {
                        grown.push(self.push(joker, MeldKind::Run));
                    }
                }
                if kind.admits_set() && self.state.length < MAX_SET {
                    if let Some(joker) = view.stand_in(last.rank(), Suit::N) {
                        grown.push(self.push(joker, MeldKind::Set));
                    }
                }
            }
        }
        Ok(grown)
    }

    /// The closed meld, if long enough. A joker inside a set takes the
    /// lowest suit the set is missing.
    pub fn close(&self) -> Option<Meld> {
        if self.state.is_open() {
            return None;
        }
        let missing = Suit::all()
            .into_iter()
            .find(|s| self.suits & u16::from(*s) == 0)
            .unwrap_or(Suit::N);
        let views = self
            .views
            .iter()
            .map(|v| match (self.state.kind, v.is_joker()) {
                (MeldKind::Set, true) => v.with_suit(missing),
                _ => *v,
            })
            .collect();
        Some(Meld::new(self.state.kind, views))
    }

    /// A set takes at most one card per suit, in ascending suit order so
    /// that every set is built exactly one way.
    fn fits_set(&self, suit: Suit) -> bool {
        self.state.length < MAX_SET && !suit.is_neutral() && u16::from(suit) > self.suits
    }
    fn push(&self, view: CardView, kind: MeldKind) -> Self {
        let mut views = self.views.clone();
        views.push(view);
        Self {
            suits: self.suits | Self::suit_bit(&view),
            state: MeldState {
                length: self.state.length + 1,
                kind,
                has_joker: self.state.has_joker || view.is_joker(),
            },
            views,
        }
    }
    fn suit_bit(view: &CardView) -> u16 {
        match view.is_joker() {
            true => 0,
            false => u16::from(view.suit()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(s: &str) -> Card {
        Card::try_from(s).unwrap()
    }
    fn natural(s: &str) -> Tracker {
        Tracker::seeds(&card(s)).pop().unwrap()
    }
    fn grow(tracker: &Tracker, s: &str) -> Vec<Tracker> {
        tracker.grow(&card(s)).unwrap()
    }

    #[test]
    fn empty_meld_cannot_grow() {
        let result = Tracker::default().grow(&card("5h"));
        assert!(matches!(result, Err(SearchError::ProtocolViolation(_))));
    }

    #[test]
    fn run_then_no_set() {
        let run = grow(&natural("5h"), "6h").pop().unwrap();
        assert!(run.state().kind == MeldKind::Run);
        assert!(grow(&run, "6s").is_empty());
        assert!(grow(&run, "7h").len() == 1);
    }

    #[test]
    fn set_suits_ascend_and_never_repeat() {
        let set = grow(&natural("7d"), "7h").pop().unwrap();
        assert!(set.state().kind == MeldKind::Set);
        assert!(grow(&set, "7c").is_empty());
        assert!(grow(&set, "7h").is_empty());
        assert!(grow(&set, "7s").len() == 1);
    }

    #[test]
    fn set_stops_at_four() {
        let set = ["7d", "7h", "7s"]
            .into_iter()
            .fold(natural("7c"), |t, s| grow(&t, s).pop().unwrap());
        assert!(set.state().length == 4);
        assert!(set.grow(&Card::joker()).unwrap().is_empty());
    }

    #[test]
    fn ace_opens_low_or_high() {
        let seeds = Tracker::seeds(&card("Ac"));
        assert!(seeds.len() == 2);
        assert!(grow(&seeds[0], "2c").len() == 1);
        assert!(grow(&seeds[0], "Ad").is_empty());
        assert!(grow(&seeds[1], "2c").is_empty());
        assert!(grow(&seeds[1], "Ad").len() == 1);
    }

    #[test]
    fn king_opens_sets_only() {
        let seeds = Tracker::seeds(&card("Ks"));
        assert!(seeds.len() == 1);
        assert!(grow(&seeds[0], "As").is_empty());
        let joker = seeds[0].grow(&Card::joker()).unwrap();
        assert!(joker.len() == 1);
        assert!(joker[0].state().kind == MeldKind::Set);
    }

    #[test]
    fn trailing_joker_reads_both_ways() {
        let grown = natural("5h").grow(&Card::joker()).unwrap();
        assert!(grown.len() == 2);
        let run = &grown[0];
        assert!(run.state().kind == MeldKind::Run && run.state().has_joker);
        assert!(run.views()[1].sign() == Sign::Six && run.views()[1].suit() == Suit::H);
        let set = &grown[1];
        assert!(set.state().kind == MeldKind::Set);
        assert!(set.views()[1].sign() == Sign::Five);
    }

    #[test]
    fn leading_joker_resolves_below() {
        let wild = Tracker::seed(CardView::from(&Card::joker()), MeldKind::Undetermined);
        let grown = grow(&wild, "6h");
        assert!(grown.len() == 2);
        assert!(grown[0].views()[0].sign() == Sign::Five);
        assert!(grown[0].views()[0].suit() == Suit::H);
        assert!(grow(&wild, "Ah").len() == 1);
        assert!(grow(&wild, "2h")[0].views()[0].is_low_ace());
    }

    #[test]
    fn one_joker_per_meld() {
        let run = natural("5h").grow(&Card::joker()).unwrap().remove(0);
        assert!(run.grow(&Card::joker()).unwrap().is_empty());
    }

    #[test]
    fn no_joker_above_the_ace() {
        let run = grow(&natural("Qs"), "Ks").pop().unwrap();
        let run = grow(&run, "As").pop().unwrap();
        assert!(run.grow(&Card::joker()).unwrap().is_empty());
    }

    #[test]
    fn closing_hands_joker_a_missing_suit() {
        let set = grow(&natural("9c"), "9h").pop().unwrap();
        let set = set.grow(&Card::joker()).unwrap().pop().unwrap();
        let meld = set.close().unwrap();
        assert!(meld.is_valid());
        assert!(meld.views()[2].suit() == Suit::D);
        assert!(natural("9c").close().is_none());
    }
}
