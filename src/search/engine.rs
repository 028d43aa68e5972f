use super::config::Config;
use super::diagnostics::Diagnostics;
use super::error::SearchError;
use super::exclusion::Exclusion;
use crate::MAX_HAND;
use crate::cards::Card;
use crate::cards::CardId;
use crate::cards::Sign;
use crate::cards::Suit;
use crate::melds::Meld;
use crate::melds::Partition;
use crate::melds::Tracker;
use std::collections::HashMap;
use std::collections::HashSet;
use std::rc::Rc;
use std::time::Instant;

/// Partitions of one subset of the hand, shared between memo and callers.
type Solved = Rc<Vec<Vec<Meld>>>;
/// Order-free identity of a meld: which cards, read as what.
type MeldKey = Vec<(CardId, Sign, Suit)>;

/// Backtracking search for every way a set of cards splits into melds.
///
/// Remaining cards are a bitmask over positions in `cards`, the same trick
/// a bitset hand uses. The partitions of a mask depend on the mask alone,
/// so they are memoized and reused across every exclusion run on the same
/// `Search`. To make each partition appear exactly once, the meld built
/// first must contain the mask's anchor, its first non-joker card; the
/// rest of the partition is the solution of the smaller mask.
///
/// Melds grow one card at a time through [`Tracker::grow`]. Whenever a
/// meld holding the anchor reaches three cards it is closed on one branch
/// and keeps growing on another, so both `5♥6♥7♥ | 8♥9♥T♥` and
/// `5♥6♥7♥8♥9♥T♥` are found.
///
/// The configured timeout starts counting when the `Search` is created and
/// covers every exclusion run on it.
pub struct Search<'a> {
    cards: &'a [Card],
    config: &'a Config,
    deadline: Option<Instant>,
    memo: HashMap<u64, Solved>,
    stats: Diagnostics,
    spent: usize,
}

impl<'a> Search<'a> {
    pub fn new(cards: &'a [Card], config: &'a Config) -> Self {
        Self {
            cards,
            config,
            deadline: config.deadline(),
            memo: HashMap::new(),
            stats: Diagnostics::default(),
            spent: 0,
        }
    }
    /// Replace the deadline, e.g. to share one across parallel searches.
    pub fn until(self, deadline: Option<Instant>) -> Self {
        Self { deadline, ..self }
    }
    pub fn diagnostics(&self) -> Diagnostics {
        self.stats
    }

    /// Every partition of the cards minus the excluded one.
    pub fn run(&mut self, exclusion: Exclusion) -> Result<Vec<Partition>, SearchError> {
        self.spent = 0;
        let mask = self.mask(exclusion)?;
        let solved = self.solve(mask)?;
        self.stats.partitions += solved.len();
        log::debug!(
            "{:<16}{:<16}{:<16}{}",
            "searched",
            exclusion,
            format!("{} partitions", solved.len()),
            format!("{} steps", self.spent),
        );
        Ok(solved.iter().cloned().map(Partition::from).collect())
    }

    /// Every distinct meld the given card can be part of.
    pub fn melds_through(&mut self, id: CardId) -> Result<Vec<Meld>, SearchError> {
        self.spent = 0;
        let mask = self.mask(Exclusion::Nothing)?;
        let anchor = self.position(id).ok_or(SearchError::InvalidExclusion(id))?;
        Ok(self
            .melds(mask, anchor)?
            .into_iter()
            .map(|(meld, _)| meld)
            .collect())
    }

    fn solve(&mut self, mask: u64) -> Result<Solved, SearchError> {
        if let Some(solved) = self.memo.get(&mask) {
            return Ok(Rc::clone(solved));
        }
        self.step()?;
        let solved = match (mask, self.anchor(mask)) {
            (0, _) => vec![Vec::new()],
            (_, None) => Vec::new(),
            (_, Some(anchor)) => {
                let mut solved = Vec::new();
                for (meld, used) in self.melds(mask, anchor)? {
                    let rest = self.solve(mask & !used)?;
                    for tail in rest.iter() {
                        solved.push(
                            std::iter::once(meld.clone())
                                .chain(tail.iter().cloned())
                                .collect(),
                        );
                    }
                }
                solved
            }
        };
        let solved = Rc::new(solved);
        self.memo.insert(mask, Rc::clone(&solved));
        Ok(solved)
    }

    /// Distinct closed melds within `mask` that contain `anchor`, each with
    /// the positions it uses.
    fn melds(&mut self, mask: u64, anchor: usize) -> Result<Vec<(Meld, u64)>, SearchError> {
        let cards = self.cards;
        let ref mut found = Vec::new();
        let ref mut seen = HashSet::new();
        for i in Self::bits(mask) {
            for seed in Tracker::seeds(&cards[i]) {
                let used = 1 << i;
                self.extend(seed, used, mask & !used, anchor, found, seen)?;
            }
        }
        Ok(std::mem::take(found))
    }

    fn extend(
        &mut self,
        tracker: Tracker,
        used: u64,
        free: u64,
        anchor: usize,
        found: &mut Vec<(Meld, u64)>,
        seen: &mut HashSet<MeldKey>,
    ) -> Result<(), SearchError> {
        self.step()?;
        log::trace!(
            "{:<16}{:<8}{}",
            "extend",
            tracker.state().kind,
            tracker
                .views()
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" "),
        );
        if used & (1 << anchor) != 0 {
            if let Some(meld) = tracker.close() {
                if seen.insert(Self::key(&meld)) {
                    found.push((meld, used));
                }
            }
        }
        let cards = self.cards;
        for i in Self::bits(free) {
            let grown = tracker.grow(&cards[i])?;
            if grown.is_empty() {
                self.stats.pruned += 1;
            }
            for next in grown {
                self.extend(next, used | 1 << i, free & !(1 << i), anchor, found, seen)?;
            }
        }
        Ok(())
    }

    /// One recursive step: honour cancellation, the deadline and the
    /// expansion ceiling.
    fn step(&mut self) -> Result<(), SearchError> {
        if self.config.cancel.is_cancelled() {
            return Err(SearchError::Cancelled);
        }
        if self.deadline.is_some_and(|d| Instant::now() >= d) {
            return Err(SearchError::Cancelled);
        }
        if self.spent >= self.config.max_expansions {
            return Err(SearchError::ExpansionLimit(self.config.max_expansions));
        }
        self.spent += 1;
        self.stats.expansions += 1;
        Ok(())
    }

    fn mask(&self, exclusion: Exclusion) -> Result<u64, SearchError> {
        let n = self.cards.len();
        let full = if n > MAX_HAND {
            return Err(SearchError::HandTooLarge(n));
        } else if n == MAX_HAND {
            u64::MAX
        } else {
            (1u64 << n) - 1
        };
        match exclusion {
            Exclusion::Nothing => Ok(full),
            Exclusion::Card(id) => self
                .position(id)
                .map(|i| full & !(1 << i))
                .ok_or(SearchError::InvalidExclusion(id)),
        }
    }
    fn position(&self, id: CardId) -> Option<usize> {
        self.cards.iter().position(|c| c.id() == id)
    }
    fn anchor(&self, mask: u64) -> Option<usize> {
        Self::bits(mask).find(|i| !self.cards[*i].is_joker())
    }
    fn key(meld: &Meld) -> MeldKey {
        let mut key = meld
            .views()
            .iter()
            .map(|v| (v.card(), v.sign(), v.suit()))
            .collect::<Vec<_>>();
        key.sort();
        key
    }
    /// Set positions of a mask, lowest first.
    fn bits(mut mask: u64) -> impl Iterator<Item = usize> {
        std::iter::from_fn(move || match mask {
            0 => None,
            _ => {
                let i = mask.trailing_zeros() as usize;
                mask &= mask - 1;
                Some(i)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Deck;
    use crate::melds::MeldKind;
    use crate::search::Cancel;

    fn search(cards: &[Card], exclusion: Exclusion) -> Vec<Partition> {
        let ref config = Config::default().with_max_expansions(usize::MAX);
        Search::new(cards, config).run(exclusion).unwrap()
    }
    fn cards(s: &str) -> Vec<Card> {
        Card::parse(s).unwrap()
    }
    fn complete(cards: &[Card], exclusion: Exclusion, partition: &Partition) -> bool {
        let mut used = partition.cards();
        used.extend(exclusion.card());
        used.sort();
        let mut all = cards.iter().map(Card::id).collect::<Vec<_>>();
        all.sort();
        used == all
    }

    #[test]
    fn four_sevens_make_one_set() {
        let hand = cards("7c 7s 7h 7d");
        let found = search(&hand, Exclusion::Nothing);
        assert!(found.len() == 1);
        assert!(found[0].len() == 1);
        assert!(found[0].melds()[0].kind() == MeldKind::Set);
        assert!(found[0].melds()[0].len() == 4);
        let found = search(&hand, Exclusion::from(hand[0].id()));
        assert!(found.len() == 1);
        assert!(found[0].melds()[0].len() == 3);
    }

    #[test]
    fn leftover_must_be_the_excluded_card() {
        let hand = cards("3s 4s 5s 6s");
        let whole = search(&hand, Exclusion::Nothing);
        assert!(whole.len() == 1);
        assert!(whole[0].melds()[0].len() == 4);
        assert!(search(&hand, Exclusion::from(hand[3].id())).len() == 1);
        assert!(search(&hand, Exclusion::from(hand[0].id())).len() == 1);
        assert!(search(&hand, Exclusion::from(hand[1].id())).is_empty());
        assert!(search(&hand, Exclusion::from(hand[2].id())).is_empty());
    }

    #[test]
    fn joker_extends_run_either_end() {
        let hand = cards("** 5h 6h 7h");
        let whole = search(&hand, Exclusion::Nothing);
        assert!(whole.len() == 2);
        let stands = whole
            .iter()
            .flat_map(|p| p.melds()[0].views().iter().filter(|v| v.is_joker()).copied())
            .map(|v| v.to_string())
            .collect::<HashSet<_>>();
        assert!(stands == HashSet::from(["(4h)".to_string(), "(8h)".to_string()]));
        let without = search(&hand, Exclusion::from(hand[0].id()));
        assert!(without.len() == 1);
        assert!(without[0].melds()[0].jokers() == 0);
        let gap = search(&hand, Exclusion::from(hand[2].id()));
        assert!(gap.len() == 1);
        assert!(gap[0].melds()[0].views()[1].to_string() == "(6h)");
    }

    #[test]
    fn no_run_wraps_past_king() {
        for hand in ["Qh Kh 2h", "Kh Ah 2h", "Kc Ks Ac 2c"] {
            let hand = cards(hand);
            assert!(search(&hand, Exclusion::Nothing).is_empty());
        }
        assert!(search(&cards("Qh Kh Ah"), Exclusion::Nothing).len() == 1);
    }

    #[test]
    fn two_kings_without_an_ace() {
        let hand = cards("Jh Qh Kh Ks Kc");
        let ref config = Config::default().with_max_expansions(usize::MAX);
        let ref mut engine = Search::new(&hand, config);
        for exclusion in std::iter::once(Exclusion::Nothing).chain(hand.iter().map(|c| c.id().into())) {
            assert!(engine.run(exclusion).unwrap().is_empty());
        }
        let melds = engine.melds_through(hand[2].id()).unwrap();
        assert!(melds.len() == 2);
        for meld in melds.iter().filter(|m| m.kind() == MeldKind::Run) {
            assert!(meld.len() == 3);
            assert!(meld.views().iter().all(|v| v.sign() != Sign::Ace));
            assert!(meld.views().last().map(|v| v.rank()) == Some(Sign::King.rank()));
        }
        assert!(melds.iter().any(|m| m.kind() == MeldKind::Set && m.len() == 3));
    }

    #[test]
    fn ace_plays_low_or_high_but_not_both() {
        let low = search(&cards("Ac 2c 3c"), Exclusion::Nothing);
        assert!(low.len() == 1);
        assert!(low[0].melds()[0].views()[0].is_low_ace());
        let high = search(&cards("Qc Kc Ac"), Exclusion::Nothing);
        assert!(high.len() == 1);
        assert!(high[0].melds()[0].views()[2].rank() == Sign::ACE_HIGH);
        assert!(search(&cards("Ac 2c 3c Qc Kc"), Exclusion::Nothing).is_empty());
        assert!(search(&cards("Ac 2c 3c Qc Kc Ac"), Exclusion::Nothing).len() == 2);
    }

    #[test]
    fn joker_fills_a_set() {
        let found = search(&cards("9c 9h **"), Exclusion::Nothing);
        assert!(found.len() == 1);
        let meld = &found[0].melds()[0];
        assert!(meld.kind() == MeldKind::Set);
        assert!(meld.is_valid());
    }

    #[test]
    fn duplicate_cards_stay_distinct() {
        let hand = cards("7c 7c 7h 7s");
        assert!(search(&hand, Exclusion::Nothing).is_empty());
        let first = search(&hand, Exclusion::from(hand[0].id()));
        let second = search(&hand, Exclusion::from(hand[1].id()));
        assert!(first.len() == 1 && second.len() == 1);
        assert!(first[0].cards().contains(&hand[1].id()));
        assert!(second[0].cards().contains(&hand[0].id()));
    }

    #[test]
    fn full_hand_partitions_are_complete_and_valid() {
        let hand = cards("7c 3s 4s 5s 6s 7s 7h 7d 8d 9d Td Ac 2c 3c Kh");
        let ref config = Config::default().with_max_expansions(usize::MAX);
        let ref mut engine = Search::new(&hand, config);
        let mut total = 0;
        for exclusion in std::iter::once(Exclusion::Nothing).chain(hand.iter().map(|c| c.id().into())) {
            for partition in engine.run(exclusion).unwrap() {
                assert!(complete(&hand, exclusion, &partition));
                assert!(partition.melds().iter().all(Meld::is_valid));
                assert!(exclusion == Exclusion::from(hand[14].id()));
                total += 1;
            }
        }
        assert!(total == 3);
        assert!(engine.diagnostics().partitions == 3);
        assert!(engine.diagnostics().pruned > 0);
    }

    #[test]
    fn jokers_in_a_crowded_hand() {
        let hand = cards("** ** 4h 5h 6h 6c 6d 9s Ts Js");
        let ref config = Config::default().with_max_expansions(usize::MAX);
        let ref mut engine = Search::new(&hand, config);
        for exclusion in std::iter::once(Exclusion::Nothing).chain(hand.iter().map(|c| c.id().into())) {
            for partition in engine.run(exclusion).unwrap() {
                assert!(complete(&hand, exclusion, &partition));
                assert!(partition.melds().iter().all(Meld::is_valid));
            }
        }
        assert!(engine.diagnostics().partitions > 0);
    }

    #[test]
    fn memo_does_not_change_answers() {
        let hand = cards("** 4h 5h 6h 6c 6d 7h 8h");
        let ref config = Config::default().with_max_expansions(usize::MAX);
        let ref mut shared = Search::new(&hand, config);
        for card in hand.iter() {
            let exclusion = Exclusion::from(card.id());
            let fresh = Search::new(&hand, config).run(exclusion).unwrap();
            let reused = shared.run(exclusion).unwrap();
            assert!(fresh == reused);
        }
    }

    #[test]
    fn exclusion_must_be_in_hand() {
        let hand = cards("3s 4s 5s");
        let stranger = Card::joker();
        let ref config = Config::default();
        let result = Search::new(&hand, config).run(Exclusion::from(stranger.id()));
        assert!(result == Err(SearchError::InvalidExclusion(stranger.id())));
    }

    #[test]
    fn ceiling_stops_the_search() {
        let hand = cards("7c 3s 4s 5s 6s 7s 7h 7d 8d 9d Td Ac 2c 3c Kh");
        let ref config = Config::default().with_max_expansions(3);
        let result = Search::new(&hand, config).run(Exclusion::Nothing);
        assert!(result == Err(SearchError::ExpansionLimit(3)));
    }

    #[test]
    fn cancelled_search_stops() {
        let hand = cards("3s 4s 5s");
        let cancel = Cancel::new();
        cancel.cancel();
        let ref config = Config::default().with_cancel(cancel);
        let result = Search::new(&hand, config).run(Exclusion::Nothing);
        assert!(result == Err(SearchError::Cancelled));
    }

    #[test]
    fn expired_deadline_stops() {
        let hand = cards("3s 4s 5s");
        let ref config = Config::default().with_timeout(std::time::Duration::ZERO);
        let result = Search::new(&hand, config).run(Exclusion::Nothing);
        assert!(result == Err(SearchError::Cancelled));
        let ref config = Config::default().with_timeout(std::time::Duration::from_secs(3600));
        assert!(Search::new(&hand, config).run(Exclusion::Nothing).unwrap().len() == 1);
    }

    #[test]
    fn oversized_hand_is_refused() {
        let hand = Deck::new(2).draw_many(65);
        let ref config = Config::default();
        let result = Search::new(&hand, config).run(Exclusion::Nothing);
        assert!(result == Err(SearchError::HandTooLarge(65)));
    }

    #[test]
    fn melds_through_a_card() {
        let hand = cards("Kh 9h Th Jh Qh Kc Ks");
        let ref config = Config::default();
        let melds = Search::new(&hand, config).melds_through(hand[0].id()).unwrap();
        assert!(melds.iter().all(|m| m.cards().any(|c| c == hand[0].id())));
        assert!(melds.iter().any(|m| m.kind() == MeldKind::Set));
        assert!(melds.iter().any(|m| m.kind() == MeldKind::Run && m.len() == 5));
        assert!(melds.len() == 4);
    }
}
