//! Deck construction and lookup.
//!
//! The deck holds the cards in display order. Order only matters for the
//! presentation layer; the engine addresses cards by `CardId` through an
//! id-to-position index.

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::card::{Card, CardId, PairId};
use crate::core::{CardTheme, DeckError, GameRng};

/// A dealt deck: `2P` cards in display order.
///
/// Uses an `im::Vector` so observers can take O(1) snapshots.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(try_from = "Vector<Card>", into = "Vector<Card>")]
pub struct Deck {
    cards: Vector<Card>,
    index: FxHashMap<CardId, usize>,
}

impl Deck {
    /// Build and shuffle a deck: two cards per theme, ids starting at `first_id`.
    ///
    /// Cards are created pair by pair (ids `first_id`, `first_id + 1` for
    /// theme 0, and so on) and then shuffled with Fisher-Yates.
    pub fn deal(themes: &[CardTheme], first_id: u32, rng: &mut GameRng) -> Self {
        let mut cards = Self::unshuffled(themes, first_id);
        rng.shuffle(&mut cards);
        Self::from_cards(cards)
    }

    /// Build a deck in a fixed order of pair ids.
    ///
    /// `pair_order` must name every theme index exactly twice. Ids are
    /// assigned in display order starting at `first_id`.
    pub fn arranged(themes: &[CardTheme], first_id: u32, pair_order: &[u32]) -> Self {
        let cards = pair_order
            .iter()
            .enumerate()
            .map(|(pos, &pair)| {
                let theme = themes
                    .get(pair as usize)
                    .unwrap_or_else(|| panic!("pair {} has no theme", pair));
                Card::new(offset_id(first_id, pos), PairId::new(pair), theme)
            })
            .collect::<Vec<_>>();
        let deck = Self::from_cards(cards);
        assert_eq!(
            deck.pair_count(),
            themes.len(),
            "arranged deck must use every theme"
        );
        deck
    }

    /// Wrap pre-built cards, checking deck invariants.
    ///
    /// Panics if ids repeat or any pair id does not have exactly two members.
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        match Self::try_from_cards(cards) {
            Ok(deck) => deck,
            Err(err) => panic!("invalid deck: {}", err),
        }
    }

    /// Wrap pre-built cards, returning the first broken invariant.
    pub fn try_from_cards(cards: impl IntoIterator<Item = Card>) -> Result<Self, DeckError> {
        let cards: Vector<Card> = cards.into_iter().collect();
        let mut index = FxHashMap::default();
        let mut counts: FxHashMap<PairId, usize> = FxHashMap::default();
        for (pos, card) in cards.iter().enumerate() {
            if index.insert(card.id, pos).is_some() {
                return Err(DeckError::DuplicateId(card.id.raw()));
            }
            *counts.entry(card.pair_id).or_default() += 1;
        }

        let mut unpaired: Vec<_> = counts.into_iter().filter(|&(_, n)| n != 2).collect();
        unpaired.sort_unstable();
        if let Some(&(pair, count)) = unpaired.first() {
            return Err(DeckError::UnpairedCard {
                pair: pair.raw(),
                count,
            });
        }

        Ok(Self { cards, index })
    }

    fn unshuffled(themes: &[CardTheme], first_id: u32) -> Vec<Card> {
        let mut cards = Vec::with_capacity(themes.len() * 2);
        for (pair, theme) in themes.iter().enumerate() {
            for copy in 0..2 {
                let id = offset_id(first_id, pair * 2 + copy);
                cards.push(Card::new(id, PairId::new(pair as u32), theme));
            }
        }
        cards
    }

    /// All cards in display order.
    #[must_use]
    pub fn cards(&self) -> &Vector<Card> {
        &self.cards
    }

    /// Iterate over cards in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// True if the deck has no cards (before the first deal).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of distinct pairs.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.cards.len() / 2
    }

    /// Display position of a card.
    #[must_use]
    pub fn position(&self, id: CardId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Look up a card by id.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.position(id).and_then(|pos| self.cards.get(pos))
    }

    /// Card at a display position.
    #[must_use]
    pub fn at(&self, pos: usize) -> Option<&Card> {
        self.cards.get(pos)
    }

    /// Mutate a card in place and return a copy of the result.
    pub fn update(&mut self, id: CardId, f: impl FnOnce(&mut Card)) -> Option<Card> {
        let pos = self.position(id)?;
        let card = self.cards.get_mut(pos)?;
        f(card);
        Some(card.clone())
    }

    /// Ids of cards that can still be flipped.
    pub fn face_down_ids(&self) -> impl Iterator<Item = CardId> + '_ {
        self.cards.iter().filter(|c| c.is_face_down()).map(|c| c.id)
    }

    /// Number of matched cards.
    #[must_use]
    pub fn matched_count(&self) -> usize {
        self.cards.iter().filter(|c| c.is_matched).count()
    }

    /// Id of the other card of a pair.
    #[must_use]
    pub fn partner_of(&self, id: CardId) -> Option<CardId> {
        let card = self.get(id)?;
        self.cards.iter().find(|c| card.pairs_with(c)).map(|c| c.id)
    }

    /// Highest card id in the deck.
    #[must_use]
    pub fn max_id(&self) -> Option<CardId> {
        self.cards.iter().map(|c| c.id).max()
    }

    /// Pair ids in display order.
    pub fn pair_order(&self) -> impl Iterator<Item = PairId> + '_ {
        self.cards.iter().map(|c| c.pair_id)
    }
}

/// Id `offset` places after `first_id`. Panics if the id space runs out.
fn offset_id(first_id: u32, offset: usize) -> CardId {
    u32::try_from(offset)
        .ok()
        .and_then(|offset| first_id.checked_add(offset))
        .map(CardId::new)
        .unwrap_or_else(|| panic!("card id overflow: {} + {}", first_id, offset))
}

impl PartialEq for Deck {
    fn eq(&self, other: &Self) -> bool {
        self.cards == other.cards
    }
}

impl Eq for Deck {}

impl TryFrom<Vector<Card>> for Deck {
    type Error = DeckError;

    fn try_from(cards: Vector<Card>) -> Result<Self, Self::Error> {
        Self::try_from_cards(cards)
    }
}

impl From<Deck> for Vector<Card> {
    fn from(deck: Deck) -> Self {
        deck.cards
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::default_themes;

    #[test]
    fn test_deal_has_two_of_each_pair() {
        let mut rng = GameRng::new(42);
        let deck = Deck::deal(&default_themes(), 0, &mut rng);

        assert_eq!(deck.len(), 16);
        assert_eq!(deck.pair_count(), 8);

        let mut counts = [0usize; 8];
        for card in deck.iter() {
            counts[card.pair_id.raw() as usize] += 1;
        }
        assert_eq!(counts, [2; 8]);
    }

    #[test]
    fn test_deal_assigns_ids_from_base() {
        let mut rng = GameRng::new(1);
        let deck = Deck::deal(&default_themes(), 100, &mut rng);

        let mut ids: Vec<u32> = deck.iter().map(|c| c.id.raw()).collect();
        ids.sort_unstable();
        assert_eq!(ids, (100..116).collect::<Vec<_>>());
    }

    #[test]
    fn test_deal_cards_start_face_down() {
        let mut rng = GameRng::new(42);
        let deck = Deck::deal(&default_themes(), 0, &mut rng);

        assert!(deck.iter().all(Card::is_face_down));
        assert_eq!(deck.face_down_ids().count(), 16);
        assert_eq!(deck.matched_count(), 0);
    }

    #[test]
    fn test_deal_is_deterministic() {
        let a = Deck::deal(&default_themes(), 0, &mut GameRng::new(9));
        let b = Deck::deal(&default_themes(), 0, &mut GameRng::new(9));
        assert!(a.pair_order().eq(b.pair_order()));
    }

    #[test]
    fn test_symbols_follow_pairs() {
        let themes = default_themes();
        let deck = Deck::deal(&themes, 0, &mut GameRng::new(5));

        for card in deck.iter() {
            let theme = &themes[card.pair_id.raw() as usize];
            assert_eq!(card.symbol, theme.symbol);
            assert_eq!(card.gradient_start, theme.gradient_start);
        }
    }

    #[test]
    fn test_arranged() {
        let themes = default_themes();
        let deck = Deck::arranged(&themes, 0, &[0, 1, 0, 2, 1, 2, 3, 3, 4, 4, 5, 5, 6, 6, 7, 7]);

        assert_eq!(deck.at(0).unwrap().symbol, "🚀");
        assert_eq!(deck.at(1).unwrap().symbol, "🎮");
        assert_eq!(deck.at(2).unwrap().pair_id, PairId::new(0));
        assert_eq!(deck.at(2).unwrap().id, CardId::new(2));
        assert_eq!(deck.partner_of(CardId::new(0)), Some(CardId::new(2)));
    }

    #[test]
    #[should_panic(expected = "card id overflow")]
    fn test_deal_rejects_id_overflow() {
        let themes = vec![CardTheme::plain("A"), CardTheme::plain("B")];
        Deck::deal(&themes, u32::MAX - 2, &mut GameRng::new(1));
    }

    #[test]
    fn test_max_id() {
        let themes = vec![CardTheme::plain("A"), CardTheme::plain("B")];
        let deck = Deck::arranged(&themes, 40, &[1, 0, 0, 1]);
        assert_eq!(deck.max_id(), Some(CardId::new(43)));
        assert_eq!(Deck::default().max_id(), None);
    }

    #[test]
    #[should_panic(expected = "expected 2")]
    fn test_arranged_rejects_triple() {
        let themes = vec![CardTheme::plain("A"), CardTheme::plain("B")];
        Deck::arranged(&themes, 0, &[0, 0, 0, 1]);
    }

    #[test]
    #[should_panic(expected = "duplicate card id")]
    fn test_from_cards_rejects_duplicate_ids() {
        let theme = CardTheme::plain("A");
        let card = Card::new(CardId::new(0), PairId::new(0), &theme);
        Deck::from_cards(vec![card.clone(), card]);
    }

    #[test]
    fn test_update_and_lookup() {
        let mut deck = Deck::deal(&default_themes(), 0, &mut GameRng::new(3));
        let id = deck.at(4).unwrap().id;

        let updated = deck.update(id, |c| c.is_flipped = true).unwrap();
        assert!(updated.is_flipped);
        assert!(deck.get(id).unwrap().is_flipped);
        assert_eq!(deck.position(id), Some(4));
        assert_eq!(deck.face_down_ids().count(), 15);

        assert!(deck.update(CardId::new(999), |c| c.is_flipped = true).is_none());
        assert!(deck.get(CardId::new(999)).is_none());
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut deck = Deck::deal(&default_themes(), 0, &mut GameRng::new(3));
        let snapshot = deck.cards().clone();
        let id = deck.at(0).unwrap().id;

        deck.update(id, |c| c.is_matched = true);

        assert!(!snapshot[0].is_matched);
        assert!(deck.at(0).unwrap().is_matched);
    }

    #[test]
    fn test_try_from_cards_reports_unpaired() {
        let theme = CardTheme::plain("A");
        let err = Deck::try_from_cards(vec![Card::new(CardId::new(0), PairId::new(3), &theme)])
            .unwrap_err();
        assert_eq!(err, DeckError::UnpairedCard { pair: 3, count: 1 });
    }

    #[test]
    fn test_serde_rejects_broken_deck() {
        let theme = CardTheme::plain("A");
        let cards = vec![Card::new(CardId::new(0), PairId::new(0), &theme)];
        let json = serde_json::to_string(&cards).unwrap();
        assert!(serde_json::from_str::<Deck>(&json).is_err());
    }

    #[test]
    fn test_serde_rebuilds_index() {
        let deck = Deck::deal(&default_themes(), 0, &mut GameRng::new(11));
        let json = serde_json::to_string(&deck).unwrap();
        let restored: Deck = serde_json::from_str(&json).unwrap();

        for card in deck.iter() {
            assert_eq!(restored.position(card.id), deck.position(card.id));
        }
    }
}
