use super::evaluation::Combination;
use super::evaluation::Evaluation;
use super::evaluation::Failure;
use super::hand::Hand;
use crate::cards::Card;
use crate::cards::CardId;
use crate::melds::Partition;
use crate::search::Combinations;
use crate::search::Config;
use crate::search::Diagnostics;
use crate::search::Exclusion;
use crate::search::Search;
use crate::search::SearchError;
use std::time::Instant;

/// A seat at the table: a name, a hand, and what the hand can make.
///
/// The combination cache belongs to the player and is only valid for the
/// hand it was computed on; every change to the hand drops it.
#[derive(Debug, Clone, Default)]
pub struct Player {
    name: String,
    hand: Hand,
    cache: Combinations,
    config: Config,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
    pub fn with_config(self, config: Config) -> Self {
        Self { config, ..self }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn hand(&self) -> &Hand {
        &self.hand
    }
    pub fn combinations(&self) -> &Combinations {
        &self.cache
    }

    pub fn add_cards_to_hand(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.hand.add_cards(cards);
        self.cache.clear();
    }
    pub fn add_card_to_hand(&mut self, card: Card) {
        self.hand.add_card(card);
        self.cache.clear();
    }
    pub fn discard(&mut self, id: CardId) -> Option<Card> {
        let card = self.hand.remove(id);
        if card.is_some() {
            self.cache.clear();
        }
        card
    }

    /// Every partition of the hand: first with nothing held back, then
    /// holding back each card in hand order. Exclusions already in the
    /// cache are not searched again. A failing exclusion is reported and
    /// skipped; it never costs the others their results.
    pub fn evaluate_combinations(&mut self) -> Evaluation {
        let start = Instant::now();
        let mut diagnostics = Diagnostics::default();
        let mut failures = Vec::new();
        let exclusions = self.exclusions();
        let mut search = Search::new(self.hand.cards(), &self.config);
        for exclusion in exclusions.iter().copied() {
            if self.cache.contains(&exclusion) {
                diagnostics.hits += 1;
                continue;
            }
            match search.run(exclusion) {
                Ok(partitions) => self.cache.insert(exclusion, partitions),
                Err(error) => failures.push(self.failure(exclusion, error)),
            }
        }
        diagnostics += search.diagnostics();
        self.report(&exclusions, failures, diagnostics, start)
    }

    /// Same answer as [`Player::evaluate_combinations`], one rayon task per
    /// uncached exclusion. Tasks keep their own memo; the cache is written
    /// once all of them are done.
    #[cfg(feature = "parallel")]
    pub fn evaluate_combinations_parallel(&mut self) -> Evaluation {
        use rayon::iter::IntoParallelRefIterator;
        use rayon::iter::ParallelIterator;
        let start = Instant::now();
        let mut diagnostics = Diagnostics::default();
        let mut failures = Vec::new();
        let exclusions = self.exclusions();
        let pending = exclusions
            .iter()
            .copied()
            .filter(|e| !self.cache.contains(e))
            .collect::<Vec<_>>();
        diagnostics.hits += exclusions.len() - pending.len();
        let cards = self.hand.cards();
        let config = &self.config;
        let deadline = config.deadline();
        let results = pending
            .par_iter()
            .map(|exclusion| {
                let mut search = Search::new(cards, config).until(deadline);
                let result = search.run(*exclusion);
                (*exclusion, result, search.diagnostics())
            })
            .collect::<Vec<(Exclusion, Result<Vec<Partition>, SearchError>, Diagnostics)>>();
        for (exclusion, result, stats) in results {
            diagnostics += stats;
            match result {
                Ok(partitions) => self.cache.insert(exclusion, partitions),
                Err(error) => failures.push(self.failure(exclusion, error)),
            }
        }
        self.report(&exclusions, failures, diagnostics, start)
    }

    /// Whether `card` would join at least one meld with cards from this
    /// hand, e.g. before taking it from the discard pile.
    pub fn can_meld_with(&self, card: &Card) -> Result<bool, SearchError> {
        let cards = std::iter::once(*card)
            .chain(self.hand.iter().copied())
            .collect::<Vec<_>>();
        let melds = Search::new(&cards, &self.config).melds_through(card.id())?;
        log::debug!("{:<16}{:<16}{} melds", self.name, card, melds.len());
        Ok(!melds.is_empty())
    }

    fn exclusions(&self) -> Vec<Exclusion> {
        match self.hand.is_empty() {
            true => Vec::new(),
            false => std::iter::once(Exclusion::Nothing)
                .chain(self.hand.iter().map(|c| Exclusion::from(c.id())))
                .collect(),
        }
    }
    fn failure(&self, exclusion: Exclusion, error: SearchError) -> Failure {
        log::warn!(
            "{:<16}{:<16}{}",
            self.name,
            self.describe(exclusion),
            error
        );
        Failure { exclusion, error }
    }
    fn describe(&self, exclusion: Exclusion) -> String {
        exclusion
            .card()
            .and_then(|id| self.hand.get(id))
            .map(Card::signature)
            .unwrap_or_else(|| exclusion.to_string())
    }
    fn report(
        &self,
        exclusions: &[Exclusion],
        failures: Vec<Failure>,
        diagnostics: Diagnostics,
        start: Instant,
    ) -> Evaluation {
        let combinations = exclusions
            .iter()
            .filter_map(|e| self.cache.get(e).map(|partitions| (*e, partitions)))
            .flat_map(|(exclusion, partitions)| {
                partitions.iter().cloned().map(move |partition| Combination {
                    exclusion,
                    partition,
                })
            })
            .collect::<Vec<_>>();
        let evaluation = Evaluation {
            combinations,
            failures,
            diagnostics,
            elapsed: start.elapsed(),
        };
        log::info!("{:<16}{}", self.name, evaluation);
        evaluation
    }
}
