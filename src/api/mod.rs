//! External boundaries: market catalog, wallet, and bet submission.
//!
//! Each boundary is a trait so the app can run against the bundled mock
//! catalog and a local wallet, and tests can swap in mocks. The free
//! functions here drive the [`Store`] through one round trip with a boundary.

mod catalog;
mod submitter;
mod wallet;

pub use catalog::{FileCatalog, MarketCatalog, MockCatalog, mock_markets};
pub use submitter::{BetSubmitter, LoggingSubmitter, SubmissionReceipt};
pub use wallet::{LocalWallet, WalletConnector};

use crate::state::{Action, Notification, Store};

/// Fetch markets from `catalog` into the store.
pub fn load_markets(catalog: &dyn MarketCatalog, store: &mut Store) {
    store.reduce(Action::LoadMarkets);

    match catalog.markets() {
        Ok(markets) => store.reduce(Action::MarketsLoaded(markets)),
        Err(e) => {
            tracing::error!("Failed to load markets: {}", e);
            store.markets.loading = false;
            store.reduce(Action::ShowNotification(Notification::error(format!(
                "Failed to load markets: {}",
                e
            ))));
        }
    }
}

/// Connect the wallet and record the outcome.
pub async fn connect_wallet(connector: &dyn WalletConnector, store: &mut Store) {
    if store.app.wallet.is_connected() {
        return;
    }
    store.reduce(Action::ConnectWallet);

    match connector.connect().await {
        Ok(address) => store.reduce(Action::WalletConnected(address)),
        Err(e) => {
            tracing::warn!("Wallet connection failed: {}", e);
            store.reduce(Action::WalletFailed(e.to_string()));
        }
    }
}

/// Submit every bet in the betslip as one batch.
pub async fn place_all(submitter: &dyn BetSubmitter, store: &mut Store) {
    if store.betslip.is_empty() || store.app.submitting {
        return;
    }

    let bets = store.betslip.bets().to_vec();
    store.reduce(Action::PlaceAllBets);

    let result = submitter.submit(&bets).await.map_err(|e| {
        tracing::error!("Bet submission failed: {}", e);
        e.to_string()
    });
    store.reduce(Action::BetsSubmitted(result));
}
