//! UI rendering using ratatui.
//!
//! This module contains all TUI components and rendering logic.

mod layout;
mod widgets;

pub use layout::Layout;
pub use widgets::{
    BetslipPanel, DefaultAmountPrompt, HelpPanel, KeyHints, MarketFeed, Placeholder, StatusBar,
    TabBar,
};

use crate::config::{KeyBindings, UiConfig};
use crate::state::{Overlay, Store, Tab};
use ratatui::Frame;

/// Main UI renderer.
pub struct Ui;

impl Ui {
    /// Render the entire UI, labelling hints with the configured `keys`.
    pub fn render(frame: &mut Frame, store: &Store, config: &UiConfig, keys: &KeyBindings) {
        let layout = Layout::new(frame.area(), config.show_help_bar);

        // Render status bar
        StatusBar::render(frame, layout.status_area, store, keys);

        // Render tab bar
        TabBar::render(frame, layout.tab_area, store);

        // Render main content based on current tab
        match store.app.current_tab {
            Tab::Markets => {
                MarketFeed::render(frame, layout.main_area, store, keys, config.card_height)
            }
            tab => Placeholder::render(frame, layout.main_area, tab),
        }

        if config.show_help_bar {
            KeyHints::render(frame, layout.help_area, store, keys);
        }

        // Render popup if open
        match store.app.overlay {
            Overlay::Betslip => BetslipPanel::render(frame, layout.main_area, store, keys),
            Overlay::DefaultAmount { first_login } => {
                DefaultAmountPrompt::render(frame, layout.main_area, store, first_login)
            }
            Overlay::Help => HelpPanel::render(frame, frame.area(), keys),
            Overlay::None => {}
        }

        // Render notification if present
        if let Some(notification) = &store.app.notification {
            widgets::render_notification(frame, layout.notification_area, notification);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock_markets;
    use crate::config::BettingConfig;
    use crate::state::Action;
    use crate::storage::Storage;
    use crate::swipe::SwipeDirection;
    use ratatui::{Terminal, backend::TestBackend};
    use rust_decimal_macros::dec;
    use tokio::sync::mpsc;

    fn store() -> Store {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut store = Store::new(tx, Storage::in_memory(), &BettingConfig::default());
        store.reduce(Action::MarketsLoaded(mock_markets()));
        store
    }

    fn draw(store: &Store) -> String {
        draw_with_keys(store, &KeyBindings::default())
    }

    fn draw_with_keys(store: &Store, keys: &KeyBindings) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal
            .draw(|frame| Ui::render(frame, store, &UiConfig::default(), keys))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_feed_shows_first_market() {
        let screen = draw(&store());
        assert!(screen.contains("Will Bitcoin hit $150k by end of 2026?"));
        assert!(screen.contains("Connect Wallet (c)"));
        assert!(screen.contains("Resolves Dec 31, 2026"));
    }

    #[test]
    fn test_betslip_panel_total() {
        let mut store = store();
        store.reduce(Action::SetDefaultAmount(dec!(0.1)));
        store.reduce(Action::Swipe(SwipeDirection::Right));
        store.reduce(Action::DismissNotification);
        store.reduce(Action::ToggleBetslip);

        let screen = draw(&store);
        assert!(screen.contains("Betslip (1)"));
        assert!(screen.contains("Total: 0.1000 SOL"));
    }

    #[test]
    fn test_betslip_total_overflow() {
        let mut store = store();
        store.reduce(Action::SetDefaultAmount(rust_decimal::Decimal::MAX));
        store.reduce(Action::Swipe(SwipeDirection::Right));
        store.reduce(Action::ScrollDown);
        store.reduce(Action::Swipe(SwipeDirection::Right));
        store.reduce(Action::DismissNotification);
        store.reduce(Action::ToggleBetslip);

        let screen = draw(&store);
        assert!(screen.contains("Betslip (2)"));
        assert!(screen.contains("Total: overflow"));
    }

    #[test]
    fn test_hints_follow_remapped_keys() {
        let keys = KeyBindings {
            swipe_left: "s".to_string(),
            swipe_right: "d".to_string(),
            connect: "w".to_string(),
            ..KeyBindings::default()
        };

        let screen = draw_with_keys(&store(), &keys);
        assert!(screen.contains("No (s)"));
        assert!(screen.contains("Connect Wallet (w)"));
        assert!(!screen.contains("Connect Wallet (c)"));
    }

    #[test]
    fn test_empty_betslip_message() {
        let mut store = store();
        store.reduce(Action::ToggleBetslip);
        assert!(draw(&store).contains("Your betslip is empty"));
    }

    #[test]
    fn test_placeholder_tab() {
        let mut store = store();
        store.reduce(Action::SetTab(Tab::History));
        assert!(draw(&store).contains("Nothing in History yet"));
    }
}
