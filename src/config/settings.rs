//! Configuration settings for Gingermarket.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix for configuration overrides.
///
/// Nested keys use a double underscore, e.g. `GINGERMARKET__BETTING__CURRENCY`.
pub const ENV_PREFIX: &str = "GINGERMARKET";

/// Main configuration struct.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Persistent store configuration.
    pub storage: StorageConfig,
    /// Wallet configuration.
    pub wallet: WalletConfig,
    /// Betting configuration.
    pub betting: BettingConfig,
    /// Market catalog configuration.
    pub catalog: CatalogConfig,
    /// UI configuration.
    pub ui: UiConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
    /// Key bindings.
    pub keybindings: KeyBindings,
}

impl Config {
    /// Load configuration from file, returning default if file doesn't exist.
    pub fn load_or_default() -> crate::Result<Self> {
        Self::load(None)
    }

    /// Load configuration from file, layered under environment overrides.
    pub fn load(path: Option<PathBuf>) -> crate::Result<Self> {
        let config_path = path.unwrap_or_else(default_config_path);
        Self::load_from(&config_path)
    }

    fn load_from(config_path: &Path) -> crate::Result<Self> {
        let settings = ::config::Config::builder()
            .add_source(
                ::config::File::from(config_path.to_path_buf())
                    .format(::config::FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Save configuration to file.
    pub fn save(&self, path: Option<PathBuf>) -> crate::Result<()> {
        let config_path = path.unwrap_or_else(default_config_path);

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::config(e.to_string()))?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }
}

fn default_config_path() -> PathBuf {
    super::config_dir()
        .map(|p| p.join("config.toml"))
        .unwrap_or_else(|_| PathBuf::from("config.toml"))
}

/// Persistent store configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path of the storage file. Defaults to `storage.json` in the data directory.
    pub path: Option<PathBuf>,
    /// Keep everything in memory for this session only.
    pub ephemeral: bool,
}

/// Wallet configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletConfig {
    /// Environment variable holding a hex private key.
    /// A throwaway key is generated when the variable is unset.
    pub private_key_env: String,
    /// Connect the wallet as soon as the app starts.
    pub auto_connect: bool,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            private_key_env: "GINGERMARKET_PRIVATE_KEY".to_string(),
            auto_connect: false,
        }
    }
}

/// Betting configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BettingConfig {
    /// Currency label shown next to amounts.
    pub currency: String,
    /// Value pre-filled in the default amount prompt.
    pub prompt_amount: Decimal,
    /// Horizontal travel (in columns) a drag must cover to commit a swipe.
    pub swipe_threshold: u16,
}

impl Default for BettingConfig {
    fn default() -> Self {
        Self {
            currency: "SOL".to_string(),
            prompt_amount: dec!(0.1),
            swipe_threshold: 12,
        }
    }
}

/// Market catalog configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// JSON file with markets. The built-in mock catalog is used when unset.
    pub path: Option<PathBuf>,
}

/// UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Tick rate in milliseconds for UI updates.
    pub tick_rate_ms: u64,
    /// Enable mouse support (drag to swipe).
    pub mouse_support: bool,
    /// Show help bar.
    pub show_help_bar: bool,
    /// Height of a market card in rows.
    pub card_height: u16,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 250,
            mouse_support: true,
            show_help_bar: true,
            card_height: 9,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    pub filter: String,
    /// Log file name prefix inside the log directory.
    pub file_name: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "gingermarket=info".to_string(),
            file_name: "gingermarket.log".to_string(),
        }
    }
}

/// Key bindings configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    /// Quit the application.
    pub quit: String,
    /// Show help.
    pub help: String,
    /// Select previous card / row.
    pub up: String,
    /// Select next card / row.
    pub down: String,
    /// Swipe the selected card left.
    pub swipe_left: String,
    /// Swipe the selected card right.
    pub swipe_right: String,
    /// "Yes" button.
    pub yes: String,
    /// "No" button.
    pub no: String,
    /// Confirm input.
    pub select: String,
    /// Cancel/back.
    pub back: String,
    /// Open or close the betslip.
    pub betslip: String,
    /// Connect the wallet.
    pub connect: String,
    /// Edit the default amount.
    pub default_amount: String,
    /// Edit the amount of the selected bet.
    pub edit_amount: String,
    /// Remove the selected bet.
    pub remove_bet: String,
    /// Empty the betslip.
    pub clear_betslip: String,
    /// Place every bet in the betslip.
    pub place_bets: String,
    /// Cycle header tabs.
    pub next_tab: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            quit: "q".to_string(),
            help: "?".to_string(),
            up: "k".to_string(),
            down: "j".to_string(),
            swipe_left: "h".to_string(),
            swipe_right: "l".to_string(),
            yes: "y".to_string(),
            no: "n".to_string(),
            select: "Enter".to_string(),
            back: "Esc".to_string(),
            betslip: "b".to_string(),
            connect: "c".to_string(),
            default_amount: "a".to_string(),
            edit_amount: "e".to_string(),
            remove_bet: "x".to_string(),
            clear_betslip: "Ctrl+x".to_string(),
            place_bets: "p".to_string(),
            next_tab: "Tab".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("gingermarket-{}-{}", uuid::Uuid::new_v4(), name))
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = Config::load(Some(temp_path("absent.toml"))).unwrap();
        assert_eq!(config.betting.currency, "SOL");
        assert_eq!(config.betting.prompt_amount, dec!(0.1));
        assert_eq!(config.keybindings.swipe_right, "l");
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("config.toml");
        let mut config = Config::default();
        config.betting.swipe_threshold = 20;
        config.storage.ephemeral = true;
        config.save(Some(path.clone())).unwrap();

        let loaded = Config::load(Some(path.clone())).unwrap();
        assert_eq!(loaded.betting.swipe_threshold, 20);
        assert!(loaded.storage.ephemeral);
        assert_eq!(loaded.ui.card_height, 9);

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let path = temp_path("partial.toml");
        std::fs::write(&path, "[betting]\ncurrency = \"USDC\"\n").unwrap();

        let loaded = Config::load(Some(path.clone())).unwrap();
        assert_eq!(loaded.betting.currency, "USDC");
        assert_eq!(loaded.betting.swipe_threshold, 12);
        assert_eq!(loaded.wallet.private_key_env, "GINGERMARKET_PRIVATE_KEY");

        let _ = std::fs::remove_file(path);
    }
}
