//! # Gingermarket - swipeable prediction market feed
//!
//! A terminal user interface that presents binary prediction markets as a
//! feed of cards. Swiping a card right stages a "yes" bet at the user's
//! default amount, swiping left drops it again. Staged bets live in a
//! betslip that survives restarts and is submitted as one batch.
//!
//! ## Architecture
//!
//! - **App**: Terminal lifecycle and the event loop
//! - **UI**: Layout and rendering logic
//! - **API**: Market catalog, wallet and bet submission boundaries
//! - **State**: Centralized state management
//! - **Swipe**: Card gesture state machine and bet intents
//! - **Storage**: Persistent key-value store
//! - **Events**: Input handling and event processing
//! - **Config**: Configuration management

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod state;
pub mod storage;
pub mod swipe;
pub mod ui;

pub use app::App;
pub use config::Config;
pub use error::{Error, Result};
pub use state::{Action, Store};
