//! Wallet connection.

use crate::config::WalletConfig;
use crate::error::{Error, Result};
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;

/// Something that can hand out the user's wallet address.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WalletConnector: Send + Sync {
    /// Connect and return the wallet address.
    async fn connect(&self) -> Result<String>;
}

/// A wallet backed by a local private key.
///
/// Without a configured key a throwaway key is generated on every connect.
pub struct LocalWallet {
    private_key: Option<String>,
}

impl LocalWallet {
    /// Read the key from the environment variable named in `config`.
    pub fn from_config(config: &WalletConfig) -> Self {
        let private_key = std::env::var(&config.private_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty());
        Self { private_key }
    }

    /// Use an explicit hex private key.
    pub fn with_private_key(key: impl Into<String>) -> Self {
        Self {
            private_key: Some(key.into()),
        }
    }

    /// Always generate a fresh key.
    pub fn ephemeral() -> Self {
        Self { private_key: None }
    }
}

impl std::fmt::Debug for LocalWallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalWallet")
            .field("has_private_key", &self.private_key.is_some())
            .finish()
    }
}

#[async_trait]
impl WalletConnector for LocalWallet {
    async fn connect(&self) -> Result<String> {
        let signer = match &self.private_key {
            Some(key) => key
                .trim()
                .parse::<PrivateKeySigner>()
                .map_err(|e| Error::wallet(format!("invalid private key: {}", e)))?,
            None => {
                tracing::info!("No private key configured, using a throwaway wallet");
                PrivateKeySigner::random()
            }
        };

        Ok(signer.address().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_key_address() {
        let wallet = LocalWallet::with_private_key(
            "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318",
        );
        let address = tokio_test::block_on(wallet.connect()).unwrap();
        assert_eq!(
            address.to_lowercase(),
            "0x2c7536e3605d9c16a7a3d7b1898e529396a65c23"
        );
    }

    #[test]
    fn test_invalid_key() {
        let wallet = LocalWallet::with_private_key("not-a-key");
        let result = tokio_test::block_on(wallet.connect());
        assert!(matches!(result, Err(Error::Wallet(_))));
    }

    #[test]
    fn test_ephemeral_wallet_has_address() {
        let address = tokio_test::block_on(LocalWallet::ephemeral().connect()).unwrap();
        assert!(address.starts_with("0x"));
        assert_eq!(address.len(), 42);
    }

    #[test]
    fn test_debug_hides_key() {
        let wallet = LocalWallet::with_private_key("secret");
        assert!(!format!("{:?}", wallet).contains("secret"));
    }
}
