//! Market catalog sources.

use crate::error::{Error, Result};
use crate::state::Market;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::path::PathBuf;

/// Read-only source of markets for a session.
#[cfg_attr(test, mockall::automock)]
pub trait MarketCatalog: Send + Sync {
    /// All markets to show in the feed, in display order.
    fn markets(&self) -> Result<Vec<Market>>;
}

/// Built-in catalog of sample markets.
#[derive(Debug, Default, Clone, Copy)]
pub struct MockCatalog;

impl MarketCatalog for MockCatalog {
    fn markets(&self) -> Result<Vec<Market>> {
        Ok(mock_markets())
    }
}

/// Catalog read from a JSON array of markets.
#[derive(Debug, Clone)]
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl MarketCatalog for FileCatalog {
    fn markets(&self) -> Result<Vec<Market>> {
        let raw = std::fs::read_to_string(&self.path).map_err(|e| {
            Error::config(format!("cannot read catalog {}: {}", self.path.display(), e))
        })?;
        let markets: Vec<Market> = serde_json::from_str(&raw)?;

        if let Some(bad) = markets.iter().find(|m| m.yes_probability > 100) {
            return Err(Error::invalid_input(format!(
                "market {} has yes probability {}%",
                bad.id, bad.yes_probability
            )));
        }

        // Ids key swipe state and betslip records.
        let mut seen = HashSet::new();
        if let Some(dup) = markets.iter().find(|m| !seen.insert(m.id.as_str())) {
            return Err(Error::invalid_input(format!(
                "market id {} appears more than once",
                dup.id
            )));
        }
        Ok(markets)
    }
}

fn market(
    id: &str,
    question: &str,
    description: &str,
    image: &str,
    yes_probability: u8,
    stake_volume: Decimal,
    resolve_date: (i32, u32, u32),
) -> Market {
    let (year, month, day) = resolve_date;
    Market {
        id: id.to_string(),
        question: question.to_string(),
        description: description.to_string(),
        image: Some(image.to_string()),
        yes_probability,
        stake_volume,
        resolve_date: NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN),
    }
}

/// The sample markets bundled with the app.
pub fn mock_markets() -> Vec<Market> {
    use rust_decimal_macros::dec;

    vec![
        market(
            "1",
            "Will Bitcoin hit $150k by end of 2026?",
            "Price must close above $150,000 on Dec 31, 2026",
            "https://images.unsplash.com/photo-1518546305927-5a555bb7020d?w=200&h=200&fit=crop",
            68,
            dec!(245.8),
            (2026, 12, 31),
        ),
        market(
            "2",
            "Will AI replace 50% of software jobs by 2026?",
            "Based on industry employment statistics",
            "https://images.unsplash.com/photo-1485827404703-89b55fcc595e?w=200&h=200&fit=crop",
            42,
            dec!(189.3),
            (2026, 12, 31),
        ),
        market(
            "3",
            "Will Solana have more daily transactions than Ethereum in 2026?",
            "Average daily transactions over 2026",
            "https://images.unsplash.com/photo-1639762681485-074b7f938ba0?w=200&h=200&fit=crop",
            55,
            dec!(312.5),
            (2026, 12, 31),
        ),
        market(
            "4",
            "Will the Fed cut rates by 1.5% in 2026?",
            "Total rate cuts must equal or exceed 1.5%",
            "https://images.unsplash.com/photo-1611974789855-9c2a0a7236a3?w=200&h=200&fit=crop",
            38,
            dec!(156.2),
            (2026, 12, 31),
        ),
        market(
            "5",
            "Will GPT-6 be released before Q3 2026?",
            "Public release date must be before July 1, 2026",
            "https://images.unsplash.com/photo-1677442136019-21780ecad995?w=200&h=200&fit=crop",
            72,
            dec!(278.9),
            (2026, 7, 1),
        ),
        market(
            "6",
            "Will Ethereum ETF trading volume exceed $10B in 2026?",
            "Total trading volume must exceed $10 billion",
            "https://images.unsplash.com/photo-1639762681485-074b7f938ba0?w=200&h=200&fit=crop",
            61,
            dec!(201.4),
            (2026, 12, 31),
        ),
        market(
            "7",
            "Will US unemployment rate exceed 5% by Q2 2026?",
            "Based on BLS monthly unemployment reports",
            "https://images.unsplash.com/photo-1454165804606-c3d57bc86b40?w=200&h=200&fit=crop",
            29,
            dec!(134.7),
            (2026, 6, 30),
        ),
        market(
            "8",
            "Will Tesla stock reach $400 by end of 2026?",
            "Closing price must be at or above $400 on Dec 31, 2026",
            "https://images.unsplash.com/photo-1558618666-fcd25c85cd64?w=200&h=200&fit=crop",
            48,
            dec!(167.3),
            (2026, 12, 31),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn temp_file() -> PathBuf {
        std::env::temp_dir().join(format!("gingermarket-catalog-{}.json", uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_mock_catalog_ids_are_unique() {
        let markets = MockCatalog.markets().unwrap();
        assert_eq!(markets.len(), 8);
        let ids: HashSet<&str> = markets.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids.len(), 8);
    }

    #[test]
    fn test_file_catalog_round_trip() {
        let path = temp_file();
        std::fs::write(&path, serde_json::to_string(&mock_markets()).unwrap()).unwrap();

        let loaded = FileCatalog::new(&path).markets().unwrap();
        assert_eq!(loaded, mock_markets());

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_file_catalog_rejects_bad_probability() {
        let path = temp_file();
        let raw = r#"[{"id":"x","question":"?","yesProbability":140,"stakeVolume":1,"resolveDate":"2026-01-01"}]"#;
        std::fs::write(&path, raw).unwrap();

        assert!(matches!(
            FileCatalog::new(&path).markets(),
            Err(Error::InvalidInput(_))
        ));

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_file_catalog_rejects_duplicate_ids() {
        let path = temp_file();
        let mut markets = mock_markets();
        markets[3].id = markets[0].id.clone();
        std::fs::write(&path, serde_json::to_string(&markets).unwrap()).unwrap();

        assert!(matches!(
            FileCatalog::new(&path).markets(),
            Err(Error::InvalidInput(_))
        ));

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(FileCatalog::new(temp_file()).markets().is_err());
    }
}
