//! Betslip state.

use crate::storage::{BETSLIP_KEY, Storage};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Side of a pending bet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BetSide {
    Yes,
    No,
}

impl std::fmt::Display for BetSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Yes => write!(f, "YES"),
            Self::No => write!(f, "NO"),
        }
    }
}

/// One pending wager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BetRecord {
    /// Market ID. Unique within a betslip.
    pub id: String,
    /// Market question as it read when the bet was created.
    pub question: String,
    /// Side of the bet.
    pub side: BetSide,
    /// Stake in currency units.
    pub amount: Decimal,
}

/// What an upsert did to the betslip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BetslipChange {
    Added,
    Updated,
}

/// The list of pending bets, mirrored to persistent storage.
///
/// Every mutating operation persists before returning: a non-empty list is
/// written under [`BETSLIP_KEY`], an empty list deletes the key.
#[derive(Debug)]
pub struct Betslip {
    bets: Vec<BetRecord>,
    storage: Storage,
    /// Currently selected row in the betslip panel.
    pub selected_index: Option<usize>,
}

impl Betslip {
    /// Load the betslip persisted in `storage`.
    ///
    /// Unreadable data is logged and replaced by an empty betslip.
    pub fn load(storage: Storage) -> Self {
        let bets = match storage.get_json::<Vec<BetRecord>>(BETSLIP_KEY) {
            Ok(Some(bets)) => bets,
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::error!("Error loading betslip: {}", e);
                Vec::new()
            }
        };

        tracing::debug!(count = bets.len(), "Betslip loaded");

        Self {
            bets,
            storage,
            selected_index: None,
        }
    }

    /// Insert a bet, or replace side and amount of the bet on the same market.
    ///
    /// An existing bet keeps its position and its original question.
    pub fn add_or_update(
        &mut self,
        id: impl Into<String>,
        question: impl Into<String>,
        side: BetSide,
        amount: Decimal,
    ) -> BetslipChange {
        let id = id.into();
        let change = match self.bets.iter_mut().find(|b| b.id == id) {
            Some(existing) => {
                existing.side = side;
                existing.amount = amount;
                BetslipChange::Updated
            }
            None => {
                self.bets.push(BetRecord {
                    id,
                    question: question.into(),
                    side,
                    amount,
                });
                BetslipChange::Added
            }
        };
        self.persist_or_log();
        change
    }

    /// Remove the bet on market `id`. Returns whether a bet was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.bets.len();
        self.bets.retain(|b| b.id != id);
        let removed = self.bets.len() != before;
        if removed {
            self.clamp_selection();
            self.persist_or_log();
        }
        removed
    }

    /// Replace the amount of the bet on market `id`.
    ///
    /// Negative amounts are ignored. Returns whether the bet changed.
    pub fn update_amount(&mut self, id: &str, amount: Decimal) -> bool {
        if amount < Decimal::ZERO {
            tracing::debug!(id, %amount, "Ignoring negative bet amount");
            return false;
        }

        match self.bets.iter_mut().find(|b| b.id == id) {
            Some(bet) => {
                bet.amount = amount;
                self.persist_or_log();
                true
            }
            None => false,
        }
    }

    /// Remove every bet.
    pub fn clear(&mut self) {
        self.bets.clear();
        self.selected_index = None;
        self.persist_or_log();
    }

    /// Write the betslip to storage, or delete the key when empty.
    pub fn persist(&self) -> crate::Result<()> {
        if self.bets.is_empty() {
            self.storage.delete(BETSLIP_KEY)
        } else {
            self.storage.set_json(BETSLIP_KEY, &self.bets)
        }
    }

    fn persist_or_log(&self) {
        if let Err(e) = self.persist() {
            tracing::warn!("Failed to persist betslip: {}", e);
        }
    }

    /// All bets in insertion order.
    pub fn bets(&self) -> &[BetRecord] {
        &self.bets
    }

    /// The bet on market `id`, if any.
    pub fn get(&self, id: &str) -> Option<&BetRecord> {
        self.bets.iter().find(|b| b.id == id)
    }

    /// Number of bets.
    pub fn len(&self) -> usize {
        self.bets.len()
    }

    /// Whether the betslip is empty.
    pub fn is_empty(&self) -> bool {
        self.bets.is_empty()
    }

    /// Sum of all amounts, or `None` when it does not fit in a `Decimal`.
    pub fn total(&self) -> Option<Decimal> {
        checked_total(&self.bets)
    }

    /// The bet on the selected row.
    pub fn selected_bet(&self) -> Option<&BetRecord> {
        self.selected_index.and_then(|i| self.bets.get(i))
    }

    /// Move the row selection by `delta`.
    pub fn scroll(&mut self, delta: i32) {
        if self.bets.is_empty() {
            self.selected_index = None;
            return;
        }
        let current = self.selected_index.unwrap_or(0) as i32;
        let max_index = self.bets.len().saturating_sub(1);
        let new_index = (current + delta).max(0) as usize;
        self.selected_index = Some(new_index.min(max_index));
    }

    fn clamp_selection(&mut self) {
        self.selected_index = match self.selected_index {
            _ if self.bets.is_empty() => None,
            Some(i) => Some(i.min(self.bets.len() - 1)),
            None => None,
        };
    }
}

/// Sum of the amounts of `bets` without overflowing.
pub fn checked_total(bets: &[BetRecord]) -> Option<Decimal> {
    bets.iter()
        .try_fold(Decimal::ZERO, |sum, bet| sum.checked_add(bet.amount))
}
