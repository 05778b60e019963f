//! Market feed state.

use crate::swipe::SwipeCard;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A binary market shown as a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Market {
    /// Market ID.
    pub id: String,
    /// Market question/title.
    pub question: String,
    /// Resolution criteria.
    #[serde(default)]
    pub description: String,
    /// Market image URL.
    #[serde(default)]
    pub image: Option<String>,
    /// Probability of "yes" in whole percent.
    pub yes_probability: u8,
    /// Total amount staked.
    pub stake_volume: Decimal,
    /// Date the market resolves.
    pub resolve_date: NaiveDate,
}

impl Market {
    /// Probability of "no" in whole percent.
    pub fn no_probability(&self) -> u8 {
        100u8.saturating_sub(self.yes_probability)
    }

    /// Resolution date formatted like `Dec 31, 2026`.
    pub fn resolve_label(&self) -> String {
        self.resolve_date.format("%b %-d, %Y").to_string()
    }
}

/// State for the market feed.
#[derive(Debug, Default)]
pub struct MarketState {
    /// All loaded markets.
    pub markets: Vec<Market>,
    /// Currently selected card index.
    pub selected_index: Option<usize>,
    /// Whether markets are currently loading.
    pub loading: bool,
    /// Swipe state per market ID.
    cards: HashMap<String, SwipeCard>,
    /// Columns a drag must travel to commit.
    swipe_threshold: u16,
}

impl MarketState {
    /// Create an empty feed whose cards commit after `swipe_threshold` columns.
    pub fn new(swipe_threshold: u16) -> Self {
        Self {
            swipe_threshold,
            ..Default::default()
        }
    }

    /// Replace the market list, keeping gesture state for markets still present.
    pub fn set_markets(&mut self, markets: Vec<Market>) {
        self.cards
            .retain(|id, _| markets.iter().any(|m| &m.id == id));
        self.selected_index = if markets.is_empty() {
            None
        } else {
            Some(self.selected_index.unwrap_or(0).min(markets.len() - 1))
        };
        self.markets = markets;
        self.loading = false;
    }

    /// Get the currently selected market.
    pub fn selected_market(&self) -> Option<&Market> {
        self.selected_index.and_then(|i| self.markets.get(i))
    }

    /// Find a market by ID.
    pub fn market(&self, id: &str) -> Option<&Market> {
        self.markets.iter().find(|m| m.id == id)
    }

    /// Swipe state of a card, if it was ever touched.
    pub fn card(&self, id: &str) -> Option<&SwipeCard> {
        self.cards.get(id)
    }

    /// Swipe state of a card, created idle on first use.
    pub fn card_mut(&mut self, id: &str) -> &mut SwipeCard {
        let threshold = self.swipe_threshold;
        self.cards
            .entry(id.to_string())
            .or_insert_with(|| SwipeCard::new(threshold))
    }

    /// Move the selection by `delta`, abandoning any drag on the old card.
    pub fn scroll(&mut self, delta: i32) {
        if self.markets.is_empty() {
            return;
        }
        if let Some(id) = self.selected_market().map(|m| m.id.clone()) {
            self.card_mut(&id).cancel();
        }
        let current = self.selected_index.unwrap_or(0) as i32;
        let max_index = self.markets.len().saturating_sub(1);
        let new_index = (current + delta).max(0) as usize;
        self.selected_index = Some(new_index.min(max_index));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock_markets;
    use crate::swipe::{CardPhase, SwipeDirection};

    #[test]
    fn test_probabilities_and_date() {
        let market = &mock_markets()[0];
        assert_eq!(market.yes_probability, 68);
        assert_eq!(market.no_probability(), 32);
        assert_eq!(market.resolve_label(), "Dec 31, 2026");
    }

    #[test]
    fn test_cards_are_independent() {
        let mut state = MarketState::new(5);
        state.set_markets(mock_markets());

        state.card_mut("1").fling(SwipeDirection::Right);
        assert_eq!(
            state.card("1").map(|c| c.phase()),
            Some(CardPhase::Committed(SwipeDirection::Right))
        );
        assert_eq!(state.card("2"), None);
        assert_eq!(state.card_mut("2").phase(), CardPhase::Idle);
    }

    #[test]
    fn test_scroll_clamps_and_cancels_drag() {
        let mut state = MarketState::new(5);
        state.set_markets(mock_markets());
        assert_eq!(state.selected_index, Some(0));

        state.card_mut("1").begin(10);
        state.scroll(1);
        assert_eq!(state.card("1").map(|c| c.phase()), Some(CardPhase::Idle));

        state.scroll(100);
        assert_eq!(state.selected_index, Some(7));
        state.scroll(-100);
        assert_eq!(state.selected_index, Some(0));
    }

    #[test]
    fn test_deserialize_catalog_entry() {
        let raw = r#"{
            "id": "9",
            "question": "Will it snow in Lisbon?",
            "yesProbability": 3,
            "stakeVolume": 12.5,
            "resolveDate": "2026-02-01"
        }"#;
        let market: Market = serde_json::from_str(raw).unwrap();
        assert_eq!(market.no_probability(), 97);
        assert_eq!(market.image, None);
        assert_eq!(market.resolve_label(), "Feb 1, 2026");
    }
}
