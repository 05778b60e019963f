//! State management for Gingermarket.
//!
//! This module provides centralized state management with a unidirectional
//! data flow pattern inspired by Redux/Elm architecture: input produces an
//! [`Action`], [`Store::reduce`] applies it, and the UI renders the result.

mod app_state;
mod betslip_state;
mod market_state;
mod settings_state;

pub use app_state::{
    AppState, InputMode, InputTarget, Overlay, Tab, WalletStatus, truncate_address,
};
pub use betslip_state::{BetRecord, BetSide, Betslip, BetslipChange, checked_total};
pub use market_state::{Market, MarketState};
pub use settings_state::{DefaultAmount, SessionFlags, parse_amount};

use crate::api::SubmissionReceipt;
use crate::config::BettingConfig;
use crate::error::Result;
use crate::storage::Storage;
use crate::swipe::{BetIntent, IntentOutcome, SwipeDirection, apply_intent};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tokio::sync::mpsc;

/// Actions that can be dispatched to modify state.
#[derive(Debug, Clone)]
pub enum Action {
    // Navigation
    SetTab(Tab),
    NextTab,
    ToggleHelp,
    ToggleBetslip,
    CloseOverlay,

    // Market feed
    LoadMarkets,
    MarketsLoaded(Vec<Market>),
    ScrollUp,
    ScrollDown,
    GoToTop,
    GoToBottom,

    // Swipe gestures on the selected card
    PointerDown(u16),
    PointerDrag(u16),
    PointerUp(u16),
    Swipe(SwipeDirection),

    // Betslip
    RemoveSelectedBet,
    EditSelectedBet,
    ClearBetslip,
    PlaceAllBets,
    BetsSubmitted(std::result::Result<SubmissionReceipt, String>),

    // Default amount
    EditDefaultAmount,
    SetDefaultAmount(Decimal),

    // Text input
    InputChar(char),
    InputBackspace,
    InputLeft,
    InputRight,
    SubmitInput,
    CancelInput,

    // Wallet
    ConnectWallet,
    WalletConnected(String),
    WalletFailed(String),

    // Notifications
    ShowNotification(Notification),
    DismissNotification,
    Tick,

    // Quit
    Quit,
}

/// A notification to display to the user.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub duration_secs: u64,
    pub created_at: DateTime<Utc>,
}

/// Notification severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl Notification {
    fn new(message: impl Into<String>, level: NotificationLevel, duration_secs: u64) -> Self {
        Self {
            message: message.into(),
            level,
            duration_secs,
            created_at: Utc::now(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, NotificationLevel::Info, 3)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, NotificationLevel::Success, 3)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, NotificationLevel::Warning, 5)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NotificationLevel::Error, 10)
    }

    /// Whether the notification has been shown long enough.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.created_at).num_seconds() >= self.duration_secs as i64
    }
}

/// The global state store.
#[derive(Debug)]
pub struct Store {
    /// Application state.
    pub app: AppState,
    /// Market feed state.
    pub markets: MarketState,
    /// Pending bets.
    pub betslip: Betslip,
    /// Amount used for "yes" swipes.
    pub default_amount: DefaultAmount,
    /// Persisted session flags.
    pub flags: SessionFlags,
    /// Currency label for amounts.
    pub currency: String,
    /// Value pre-filled in the default amount prompt.
    prompt_amount: Decimal,
    /// Action sender for dispatching actions.
    action_tx: mpsc::UnboundedSender<Action>,
}

impl Store {
    /// Create a new store reading persisted state from `storage`.
    pub fn new(
        action_tx: mpsc::UnboundedSender<Action>,
        storage: Storage,
        betting: &BettingConfig,
    ) -> Self {
        Self {
            app: AppState::default(),
            markets: MarketState::new(betting.swipe_threshold),
            betslip: Betslip::load(storage.clone()),
            default_amount: DefaultAmount::new(storage.clone()),
            flags: SessionFlags::new(storage),
            currency: betting.currency.clone(),
            prompt_amount: betting.prompt_amount,
            action_tx,
        }
    }

    /// Dispatch an action to the store.
    pub fn dispatch(&self, action: Action) -> Result<()> {
        self.action_tx
            .send(action)
            .map_err(|e| crate::Error::channel(e.to_string()))
    }

    /// Whether the "yes" affordance is enabled.
    pub fn yes_enabled(&self) -> bool {
        self.default_amount.is_actionable()
    }

    /// Apply an action to update state.
    pub fn reduce(&mut self, action: Action) {
        match action {
            // Navigation
            Action::SetTab(tab) => self.app.current_tab = tab,
            Action::NextTab => self.app.current_tab = self.app.current_tab.next(),
            Action::ToggleHelp => {
                self.app.overlay = if self.app.overlay == Overlay::Help {
                    Overlay::None
                } else {
                    Overlay::Help
                };
            }
            Action::ToggleBetslip => self.toggle_betslip(),
            Action::CloseOverlay => self.close_overlay(),

            // Market feed
            Action::LoadMarkets => self.markets.loading = true,
            Action::MarketsLoaded(markets) => {
                tracing::info!(count = markets.len(), "Markets loaded");
                self.markets.set_markets(markets);
            }
            Action::ScrollUp => self.scroll(-1),
            Action::ScrollDown => self.scroll(1),
            Action::GoToTop => self.scroll(i32::MIN / 2),
            Action::GoToBottom => self.scroll(i32::MAX / 2),

            // Swipe gestures
            Action::PointerDown(x) => {
                if let Some(id) = self.swipeable_card() {
                    self.markets.card_mut(&id).begin(x);
                }
            }
            Action::PointerDrag(x) => {
                if let Some(id) = self.swipeable_card() {
                    self.markets.card_mut(&id).drag(x);
                }
            }
            Action::PointerUp(x) => {
                if let Some(id) = self.swipeable_card()
                    && let Some(direction) = self.markets.card_mut(&id).release(x)
                {
                    self.handle_swipe(&id, direction);
                }
            }
            Action::Swipe(direction) => {
                if let Some(id) = self.swipeable_card()
                    && let Some(direction) = self.markets.card_mut(&id).fling(direction)
                {
                    self.handle_swipe(&id, direction);
                }
            }

            // Betslip
            Action::RemoveSelectedBet => {
                if let Some(id) = self.betslip.selected_bet().map(|b| b.id.clone()) {
                    self.betslip.remove(&id);
                }
            }
            Action::EditSelectedBet => {
                if let Some(bet) = self.betslip.selected_bet() {
                    let target = InputTarget::BetAmount(bet.id.clone());
                    let initial = bet.amount.to_string();
                    self.app.start_input(target, initial);
                }
            }
            Action::ClearBetslip => self.betslip.clear(),
            Action::PlaceAllBets => self.app.submitting = true,
            Action::BetsSubmitted(result) => self.finish_submission(result),

            // Default amount
            Action::EditDefaultAmount => self.open_default_amount(false),
            Action::SetDefaultAmount(amount) => {
                if self.default_amount.set(amount) {
                    self.close_default_amount_form();
                }
            }

            // Text input
            Action::InputChar(c) => {
                if self.app.is_editing() && (c.is_ascii_digit() || c == '.' || c == '-') {
                    self.app.push_char(c);
                }
            }
            Action::InputBackspace => self.app.pop_char(),
            Action::InputLeft => self.app.cursor_left(),
            Action::InputRight => self.app.cursor_right(),
            Action::SubmitInput => self.submit_input(),
            Action::CancelInput => {
                self.app.cancel_input();
                if matches!(self.app.overlay, Overlay::DefaultAmount { .. }) {
                    self.app.overlay = Overlay::None;
                }
            }

            // Wallet
            Action::ConnectWallet => self.app.wallet = WalletStatus::Connecting,
            Action::WalletConnected(address) => self.on_wallet_connected(address),
            Action::WalletFailed(error) => {
                self.app.wallet = WalletStatus::Disconnected;
                self.app.notification =
                    Some(Notification::error(format!("Wallet connection failed: {}", error)));
            }

            // Notifications
            Action::ShowNotification(notification) => {
                self.app.notification = Some(notification);
            }
            Action::DismissNotification => self.app.notification = None,
            Action::Tick => {
                if self
                    .app
                    .notification
                    .as_ref()
                    .is_some_and(|n| n.is_expired(Utc::now()))
                {
                    self.app.notification = None;
                }
            }

            // Quit
            Action::Quit => self.app.should_quit = true,
        }
    }

    /// The selected card when the feed is in front and not covered by a popup.
    fn swipeable_card(&self) -> Option<String> {
        if self.app.current_tab != Tab::Markets || self.app.overlay != Overlay::None {
            return None;
        }
        self.markets.selected_market().map(|m| m.id.clone())
    }

    fn handle_swipe(&mut self, id: &str, direction: SwipeDirection) {
        let Some(market) = self.markets.market(id).cloned() else {
            tracing::debug!(id, "Swipe on unknown market ignored");
            return;
        };

        let intent = BetIntent::from(direction);
        tracing::debug!(id, ?intent, "Swipe committed");

        match apply_intent(intent, &market, &mut self.betslip, &self.default_amount) {
            IntentOutcome::Added | IntentOutcome::Updated => {
                let amount = self.default_amount.get().unwrap_or_default();
                self.app.notification = Some(Notification::success(format!(
                    "YES {} {} on \"{}\"",
                    amount, self.currency, market.question
                )));
            }
            IntentOutcome::Removed => {
                self.app.notification = Some(Notification::info("Removed from betslip"));
            }
            IntentOutcome::Unchanged => {}
            IntentOutcome::NotActionable => {
                let message = if self.app.wallet.is_connected() {
                    "Set a default amount (a) before betting yes"
                } else {
                    "Connect your wallet (c) and set a default amount to bet yes"
                };
                self.app.notification = Some(Notification::warning(message));
            }
        }
    }

    fn scroll(&mut self, delta: i32) {
        match self.app.overlay {
            Overlay::Betslip => self.betslip.scroll(delta),
            Overlay::None if self.app.current_tab == Tab::Markets => self.markets.scroll(delta),
            _ => {}
        }
    }

    fn toggle_betslip(&mut self) {
        match self.app.overlay {
            Overlay::Betslip => self.close_overlay(),
            Overlay::None | Overlay::Help => {
                self.app.overlay = Overlay::Betslip;
                if self.betslip.selected_index.is_none() && !self.betslip.is_empty() {
                    self.betslip.selected_index = Some(0);
                }
            }
            Overlay::DefaultAmount { .. } => {}
        }
    }

    fn close_overlay(&mut self) {
        if self.app.is_editing() {
            self.app.cancel_input();
        }
        self.app.overlay = Overlay::None;
    }

    fn on_wallet_connected(&mut self, address: String) {
        tracing::info!(address = %truncate_address(&address), "Wallet connected");
        self.app.wallet = WalletStatus::Connected { address };

        if !self.flags.first_login_seen() {
            // Flag is recorded when the prompt is shown, not when it is answered.
            self.flags.mark_first_login_seen();
            self.open_default_amount(true);
        } else if let Some(amount) = self.default_amount.load() {
            tracing::debug!(%amount, "Loaded default amount");
        }
    }

    fn open_default_amount(&mut self, first_login: bool) {
        let initial = self.default_amount.get().unwrap_or(self.prompt_amount);
        self.app.overlay = Overlay::DefaultAmount { first_login };
        self.app
            .start_input(InputTarget::DefaultAmount, initial.to_string());
    }

    fn close_default_amount_form(&mut self) {
        if matches!(self.app.overlay, Overlay::DefaultAmount { .. }) {
            self.app.overlay = Overlay::None;
        }
        if self.app.input_target == Some(InputTarget::DefaultAmount) {
            self.app.cancel_input();
        }
    }

    fn submit_input(&mut self) {
        let Some((target, text)) = self.app.finish_input() else {
            return;
        };

        match target {
            InputTarget::DefaultAmount => {
                let accepted = parse_amount(&text).is_some_and(|a| self.default_amount.set(a));
                if accepted {
                    self.app.overlay = Overlay::None;
                } else {
                    // Refused: the form stays open with what was typed.
                    self.app.start_input(InputTarget::DefaultAmount, text);
                }
            }
            InputTarget::BetAmount(id) => {
                let accepted =
                    parse_amount(&text).is_some_and(|a| self.betslip.update_amount(&id, a));
                if !accepted && self.betslip.get(&id).is_some() {
                    self.app.start_input(InputTarget::BetAmount(id), text);
                }
            }
        }
    }

    fn finish_submission(&mut self, result: std::result::Result<SubmissionReceipt, String>) {
        self.app.submitting = false;
        self.betslip.clear();
        if self.app.overlay == Overlay::Betslip {
            self.app.overlay = Overlay::None;
        }

        self.app.notification = Some(match result {
            Ok(receipt) => Notification::success(format!(
                "Placing {} bets for {:.4} {}",
                receipt.count, receipt.total, self.currency
            )),
            Err(error) => Notification::error(format!("Bet submission failed: {}", error)),
        });
    }
}
