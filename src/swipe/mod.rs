//! Swipe handling for market cards.
//!
//! [`SwipeCard`] turns pointer or key input into at most one committed
//! direction per gesture; [`apply_intent`] turns that direction into a
//! betslip mutation.

mod gesture;
mod intent;

pub use gesture::{CardPhase, SwipeCard, SwipeDirection};
pub use intent::{BetIntent, IntentOutcome, apply_intent};
