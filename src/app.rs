//! Main application module.
//!
//! This module contains the main `App` struct that coordinates
//! the event loop, state management, and rendering.

use crate::api::{
    self, BetSubmitter, FileCatalog, LocalWallet, LoggingSubmitter, MarketCatalog, MockCatalog,
    WalletConnector,
};
use crate::config::{Config, StorageConfig, storage_path};
use crate::error::{Error, Result};
use crate::events::{EventConfig, EventHandler};
use crate::state::{Action, Notification, Store};
use crate::storage::{FileStore, Storage};
use crate::ui::Ui;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use tokio::sync::mpsc;

/// The main application.
pub struct App {
    /// Terminal.
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Application store.
    store: Store,
    /// Event handler.
    event_handler: EventHandler,
    /// Action receiver.
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// Source of markets.
    catalog: Box<dyn MarketCatalog>,
    /// Wallet used by the connect action.
    wallet: Box<dyn WalletConnector>,
    /// Execution backend for the betslip.
    submitter: Box<dyn BetSubmitter>,
    /// Configuration.
    config: Config,
}

impl App {
    /// Create a new application.
    pub async fn new(config: Config) -> Result<Self> {
        // Open storage before touching the terminal so errors print normally
        let storage = open_storage(&config.storage)?;

        let catalog: Box<dyn MarketCatalog> = match &config.catalog.path {
            Some(path) => {
                tracing::info!(path = %path.display(), "Using market catalog file");
                Box::new(FileCatalog::new(path))
            }
            None => Box::new(MockCatalog),
        };

        // Set up terminal
        enable_raw_mode().map_err(|e| Error::terminal(e.to_string()))?;
        let mut stdout = io::stdout();
        if config.ui.mouse_support {
            execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        } else {
            execute!(stdout, EnterAlternateScreen)?;
        }
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        // Create action channel
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        // Create store
        let store = Store::new(action_tx, storage, &config.betting);

        // Create event handler
        let event_handler =
            EventHandler::new(config.keybindings.clone(), EventConfig::from(&config.ui));

        Ok(Self {
            terminal,
            store,
            event_handler,
            action_rx,
            catalog,
            wallet: Box::new(LocalWallet::from_config(&config.wallet)),
            submitter: Box::new(LoggingSubmitter),
            config,
        })
    }

    /// Run the application event loop.
    pub async fn run(&mut self) -> Result<()> {
        // Load initial data
        self.store.dispatch(Action::LoadMarkets)?;
        if self.config.wallet.auto_connect {
            self.store.dispatch(Action::ConnectWallet)?;
        }

        // Main event loop
        loop {
            // Update event handler with current state
            self.event_handler.update_store_snapshot(&self.store);

            // Render UI
            self.terminal.draw(|frame| {
                Ui::render(frame, &self.store, &self.config.ui, &self.config.keybindings);
            })?;

            // Handle events and actions
            tokio::select! {
                // Handle terminal events
                result = self.event_handler.next() => {
                    match result {
                        Ok(Some(action)) => self.handle_action(action).await,
                        Ok(None) => {}
                        Err(e) if e.is_recoverable() => {
                            tracing::warn!("Ignoring input error: {}", e);
                        }
                        Err(e) => return Err(e),
                    }
                }

                // Handle actions from the channel
                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action).await;
                }
            }

            // Check if we should quit
            if self.store.app.should_quit {
                tracing::info!("Shutting down");
                break;
            }
        }

        Ok(())
    }

    /// Handle an action, running boundary calls before reducing.
    async fn handle_action(&mut self, action: Action) {
        match action {
            Action::LoadMarkets => api::load_markets(self.catalog.as_ref(), &mut self.store),
            Action::ConnectWallet => {
                api::connect_wallet(self.wallet.as_ref(), &mut self.store).await
            }
            Action::PlaceAllBets => {
                if self.store.betslip.is_empty() {
                    self.store
                        .reduce(Action::ShowNotification(Notification::warning(
                            "Your betslip is empty",
                        )));
                } else {
                    api::place_all(self.submitter.as_ref(), &mut self.store).await;
                }
            }
            // Let the store handle the action
            action => self.store.reduce(action),
        }
    }
}

/// Build the storage handle described by `config`.
fn open_storage(config: &StorageConfig) -> Result<Storage> {
    if config.ephemeral {
        tracing::info!("Using in-memory storage");
        return Ok(Storage::in_memory());
    }

    let path = storage_path(config)?;
    let store = FileStore::open(&path)?;
    tracing::info!(path = %store.path().display(), "Using storage file");
    Ok(Storage::new(store))
}

impl Drop for App {
    fn drop(&mut self) {
        // Restore terminal state
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        );
        let _ = self.terminal.show_cursor();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ephemeral_storage() {
        let config = StorageConfig {
            ephemeral: true,
            ..StorageConfig::default()
        };
        let storage = open_storage(&config).unwrap();
        storage.set("key", "value").unwrap();
        assert_eq!(storage.get("key").unwrap(), Some("value".to_string()));
    }

    #[test]
    fn test_file_storage_at_configured_path() {
        let path =
            std::env::temp_dir().join(format!("gingermarket-app-{}.json", uuid::Uuid::new_v4()));
        let config = StorageConfig {
            path: Some(path.clone()),
            ephemeral: false,
        };

        let storage = open_storage(&config).unwrap();
        storage.set("key", "value").unwrap();
        assert!(path.exists());

        let _ = std::fs::remove_file(path);
    }
}
