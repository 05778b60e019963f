//! Mapping committed swipes onto the betslip.

use super::SwipeDirection;
use crate::state::{BetSide, Betslip, BetslipChange, DefaultAmount, Market};

/// What the user asked for on a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BetIntent {
    /// Stake the default amount on "yes".
    Yes,
    /// Not interested; drop any pending bet on the market.
    No,
}

impl From<SwipeDirection> for BetIntent {
    fn from(direction: SwipeDirection) -> Self {
        match direction {
            SwipeDirection::Right => Self::Yes,
            SwipeDirection::Left => Self::No,
        }
    }
}

/// Result of applying an intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentOutcome {
    /// A new bet was appended.
    Added,
    /// The existing bet on the market was replaced in place.
    Updated,
    /// The pending bet on the market was dropped.
    Removed,
    /// Nothing to do (e.g. "no" on a market without a bet).
    Unchanged,
    /// "Yes" without a usable default amount. Nothing was recorded.
    NotActionable,
}

/// Apply `intent` for `market`.
///
/// "Yes" records the default amount on the yes side and is refused while no
/// positive default exists. "No" removes any bet on the market.
pub fn apply_intent(
    intent: BetIntent,
    market: &Market,
    betslip: &mut Betslip,
    default_amount: &DefaultAmount,
) -> IntentOutcome {
    match intent {
        BetIntent::Yes => {
            let Some(amount) = default_amount.get().filter(|_| default_amount.is_actionable())
            else {
                tracing::debug!(market = %market.id, "Yes intent refused: no default amount");
                return IntentOutcome::NotActionable;
            };

            match betslip.add_or_update(&market.id, &market.question, BetSide::Yes, amount) {
                BetslipChange::Added => {
                    tracing::info!(market = %market.id, %amount, "Bet added");
                    IntentOutcome::Added
                }
                BetslipChange::Updated => {
                    tracing::info!(market = %market.id, %amount, "Bet updated");
                    IntentOutcome::Updated
                }
            }
        }
        BetIntent::No => {
            if betslip.remove(&market.id) {
                tracing::info!(market = %market.id, "Bet removed");
                IntentOutcome::Removed
            } else {
                IntentOutcome::Unchanged
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock_markets;
    use crate::storage::Storage;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn setup() -> (Market, Betslip, DefaultAmount) {
        let storage = Storage::in_memory();
        let market = mock_markets().remove(0);
        (
            market,
            Betslip::load(storage.clone()),
            DefaultAmount::new(storage),
        )
    }

    #[test]
    fn test_direction_mapping() {
        assert_eq!(BetIntent::from(SwipeDirection::Right), BetIntent::Yes);
        assert_eq!(BetIntent::from(SwipeDirection::Left), BetIntent::No);
    }

    #[test]
    fn test_yes_with_default_adds_bet() {
        let (market, mut slip, mut default) = setup();
        default.set(dec!(0.1));

        let outcome = apply_intent(BetIntent::Yes, &market, &mut slip, &default);
        assert_eq!(outcome, IntentOutcome::Added);
        assert_eq!(slip.len(), 1);
        let bet = slip.get("1").unwrap();
        assert_eq!(bet.side, BetSide::Yes);
        assert_eq!(bet.amount, dec!(0.1));
        assert_eq!(bet.question, market.question);
    }

    #[test]
    fn test_second_yes_uses_new_default() {
        let (market, mut slip, mut default) = setup();
        default.set(dec!(0.1));
        apply_intent(BetIntent::Yes, &market, &mut slip, &default);

        default.set(dec!(0.25));
        let outcome = apply_intent(BetIntent::Yes, &market, &mut slip, &default);
        assert_eq!(outcome, IntentOutcome::Updated);
        assert_eq!(slip.len(), 1);
        assert_eq!(slip.get("1").unwrap().amount, dec!(0.25));
    }

    #[test]
    fn test_no_without_bet_is_unchanged() {
        let (market, mut slip, default) = setup();
        let outcome = apply_intent(BetIntent::No, &market, &mut slip, &default);
        assert_eq!(outcome, IntentOutcome::Unchanged);
        assert!(slip.is_empty());
    }

    #[test]
    fn test_no_removes_bet() {
        let (market, mut slip, mut default) = setup();
        default.set(dec!(0.1));
        apply_intent(BetIntent::Yes, &market, &mut slip, &default);

        let outcome = apply_intent(BetIntent::No, &market, &mut slip, &default);
        assert_eq!(outcome, IntentOutcome::Removed);
        assert!(slip.is_empty());
    }

    #[test]
    fn test_yes_without_default_is_refused() {
        let (market, mut slip, default) = setup();
        let outcome = apply_intent(BetIntent::Yes, &market, &mut slip, &default);
        assert_eq!(outcome, IntentOutcome::NotActionable);
        assert!(slip.is_empty());
    }
}
