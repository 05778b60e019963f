//! Default bet amount and persisted session flags.

use crate::storage::{DEFAULT_AMOUNT_KEY, FIRST_LOGIN_KEY, Storage};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse user-typed amount text.
///
/// Returns `None` for anything that is not a plain decimal number.
pub fn parse_amount(input: &str) -> Option<Decimal> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed).ok()
}

/// The amount applied to every "yes" swipe.
#[derive(Debug)]
pub struct DefaultAmount {
    value: Option<Decimal>,
    storage: Storage,
}

impl DefaultAmount {
    /// Create an unset default amount bound to `storage`.
    pub fn new(storage: Storage) -> Self {
        Self {
            value: None,
            storage,
        }
    }

    /// Read the stored value into memory.
    ///
    /// Missing, malformed or non-positive values leave the setting unset.
    pub fn load(&mut self) -> Option<Decimal> {
        self.value = match self.storage.get_json::<Decimal>(DEFAULT_AMOUNT_KEY) {
            Ok(Some(amount)) if amount > Decimal::ZERO => Some(amount),
            Ok(Some(amount)) => {
                tracing::warn!(%amount, "Ignoring stored non-positive default amount");
                None
            }
            Ok(None) => None,
            Err(e) => {
                tracing::error!("Error loading default amount: {}", e);
                None
            }
        };
        self.value
    }

    /// Set and persist a new default. Only strictly positive amounts are accepted.
    pub fn set(&mut self, amount: Decimal) -> bool {
        if amount <= Decimal::ZERO {
            tracing::debug!(%amount, "Rejected default amount");
            return false;
        }

        self.value = Some(amount);
        if let Err(e) = self.storage.set_json(DEFAULT_AMOUNT_KEY, &amount) {
            tracing::warn!("Failed to persist default amount: {}", e);
        }
        tracing::info!(%amount, "Default amount set");
        true
    }

    /// Current value.
    pub fn get(&self) -> Option<Decimal> {
        self.value
    }

    /// Whether a "yes" swipe can be acted on.
    pub fn is_actionable(&self) -> bool {
        self.value.is_some_and(|v| v > Decimal::ZERO)
    }
}

/// Flags that outlive a session.
#[derive(Debug, Clone)]
pub struct SessionFlags {
    storage: Storage,
}

impl SessionFlags {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// Whether the first-login prompt has been shown before.
    pub fn first_login_seen(&self) -> bool {
        match self.storage.get(FIRST_LOGIN_KEY) {
            Ok(value) => value.is_some(),
            Err(e) => {
                tracing::warn!("Failed to read first-login flag: {}", e);
                false
            }
        }
    }

    /// Record that the first-login prompt has been shown.
    pub fn mark_first_login_seen(&self) {
        if let Err(e) = self.storage.set_json(FIRST_LOGIN_KEY, &true) {
            tracing::warn!("Failed to persist first-login flag: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("0.1"), Some(dec!(0.1)));
        assert_eq!(parse_amount("  2.50 "), Some(dec!(2.5)));
        assert_eq!(parse_amount("-5"), Some(dec!(-5)));
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("1.2.3"), None);
    }

    #[test]
    fn test_set_rejects_non_positive() {
        let mut amount = DefaultAmount::new(Storage::in_memory());
        assert!(!amount.set(dec!(0)));
        assert!(!amount.set(dec!(-1)));
        assert_eq!(amount.get(), None);
        assert!(!amount.is_actionable());

        assert!(amount.set(dec!(0.1)));
        assert_eq!(amount.get(), Some(dec!(0.1)));
        assert!(amount.is_actionable());
    }

    #[test]
    fn test_set_persists_across_sessions() {
        let storage = Storage::in_memory();
        DefaultAmount::new(storage.clone()).set(dec!(0.25));

        let mut next_session = DefaultAmount::new(storage);
        assert_eq!(next_session.get(), None);
        assert_eq!(next_session.load(), Some(dec!(0.25)));
    }

    #[test]
    fn test_load_legacy_plain_number() {
        let storage = Storage::new(MemoryStore::with_entries([(DEFAULT_AMOUNT_KEY, "0.5")]));
        let mut amount = DefaultAmount::new(storage);
        assert_eq!(amount.load(), Some(dec!(0.5)));
    }

    #[test]
    fn test_load_garbage_stays_unset() {
        let storage = Storage::new(MemoryStore::with_entries([(DEFAULT_AMOUNT_KEY, "lots")]));
        let mut amount = DefaultAmount::new(storage);
        assert_eq!(amount.load(), None);
        assert!(!amount.is_actionable());
    }

    #[test]
    fn test_first_login_flag() {
        let storage = Storage::in_memory();
        let flags = SessionFlags::new(storage.clone());
        assert!(!flags.first_login_seen());

        flags.mark_first_login_seen();
        assert!(SessionFlags::new(storage).first_login_seen());
    }
}
