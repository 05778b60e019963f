//! Event handler for processing input events.

use super::{EventConfig, InputEvent};
use crate::config::KeyBindings;
use crate::error::Result;
use crate::state::{Action, InputMode, Overlay, Store, Tab};
use crate::swipe::SwipeDirection;
use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent,
    MouseEventKind,
};
use std::time::Instant;

/// Handles input events and produces actions.
pub struct EventHandler {
    /// Key bindings.
    keybindings: KeyBindings,
    /// Tick rate and mouse settings.
    config: EventConfig,
    /// Store reference for state-aware handling.
    store_snapshot: Option<StoreSnapshot>,
    /// When the last tick was emitted.
    last_tick: Instant,
}

/// Snapshot of relevant store state for event handling.
#[derive(Debug, Clone)]
struct StoreSnapshot {
    input_mode: InputMode,
    overlay: Overlay,
    current_tab: Tab,
}

impl EventHandler {
    /// Create a new event handler.
    pub fn new(keybindings: KeyBindings, config: EventConfig) -> Self {
        Self {
            keybindings,
            config,
            store_snapshot: None,
            last_tick: Instant::now(),
        }
    }

    /// Update the store snapshot for state-aware event handling.
    pub fn update_store_snapshot(&mut self, store: &Store) {
        self.store_snapshot = Some(StoreSnapshot {
            input_mode: store.app.input_mode,
            overlay: store.app.overlay,
            current_tab: store.app.current_tab,
        });
    }

    /// Get the next action from user input, or a tick when the tick rate elapses.
    pub async fn next(&mut self) -> Result<Option<Action>> {
        let timeout = self
            .config
            .tick_rate
            .saturating_sub(self.last_tick.elapsed());

        if event::poll(timeout)? {
            let action = match event::read()? {
                CrosstermEvent::Key(key) => self.handle_key(key),
                CrosstermEvent::Mouse(mouse) => self.handle_mouse(mouse),
                // Terminal will automatically redraw
                _ => None,
            };
            if action.is_some() {
                return Ok(action);
            }
        }

        if self.last_tick.elapsed() >= self.config.tick_rate {
            self.last_tick = Instant::now();
            return Ok(Some(Action::Tick));
        }
        Ok(None)
    }

    /// Handle a key event and return an optional action.
    fn handle_key(&self, key: KeyEvent) -> Option<Action> {
        // Only process key press events
        if key.kind != KeyEventKind::Press {
            return None;
        }

        let snapshot = self.store_snapshot.as_ref()?;
        let input = InputEvent::from(key);

        // Ctrl+c always quits
        if input.matches("Ctrl+c") {
            return Some(Action::Quit);
        }

        if snapshot.input_mode == InputMode::Editing {
            return self.handle_editing_mode(key, &input);
        }

        match snapshot.overlay {
            Overlay::Betslip => self.handle_betslip(key, &input),
            Overlay::Help => self.handle_help(&input),
            Overlay::DefaultAmount { .. } => {
                if input.matches(&self.keybindings.back) {
                    Some(Action::CloseOverlay)
                } else {
                    None
                }
            }
            Overlay::None => self.handle_normal_mode(key, &input, snapshot),
        }
    }

    /// Handle a mouse event and return an optional action.
    fn handle_mouse(&self, mouse: MouseEvent) -> Option<Action> {
        if !self.config.mouse_capture {
            return None;
        }

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => Some(Action::PointerDown(mouse.column)),
            MouseEventKind::Drag(MouseButton::Left) => Some(Action::PointerDrag(mouse.column)),
            MouseEventKind::Up(MouseButton::Left) => Some(Action::PointerUp(mouse.column)),
            MouseEventKind::ScrollUp => Some(Action::ScrollUp),
            MouseEventKind::ScrollDown => Some(Action::ScrollDown),
            _ => None,
        }
    }

    fn handle_normal_mode(
        &self,
        key: KeyEvent,
        input: &InputEvent,
        snapshot: &StoreSnapshot,
    ) -> Option<Action> {
        // Global shortcuts
        if input.matches(&self.keybindings.quit) {
            return Some(Action::Quit);
        }
        if input.matches(&self.keybindings.help) {
            return Some(Action::ToggleHelp);
        }
        if input.matches(&self.keybindings.connect) {
            return Some(Action::ConnectWallet);
        }
        if input.matches(&self.keybindings.betslip) {
            return Some(Action::ToggleBetslip);
        }
        if input.matches(&self.keybindings.default_amount) {
            return Some(Action::EditDefaultAmount);
        }
        if input.matches(&self.keybindings.back) {
            return Some(Action::DismissNotification);
        }

        // Tab switching
        if input.matches(&self.keybindings.next_tab) {
            return Some(Action::NextTab);
        }
        if let Some(digit) = input.char().and_then(|c| c.to_digit(10))
            && let Some(tab) = (digit as usize)
                .checked_sub(1)
                .and_then(|i| Tab::ALL.get(i).copied())
        {
            return Some(Action::SetTab(tab));
        }

        if snapshot.current_tab != Tab::Markets {
            return None;
        }

        // Feed navigation
        if input.matches(&self.keybindings.up) || key.code == KeyCode::Up {
            return Some(Action::ScrollUp);
        }
        if input.matches(&self.keybindings.down) || key.code == KeyCode::Down {
            return Some(Action::ScrollDown);
        }
        if key.code == KeyCode::Home {
            return Some(Action::GoToTop);
        }
        if key.code == KeyCode::End {
            return Some(Action::GoToBottom);
        }

        // Swipes on the selected card
        if input.matches(&self.keybindings.swipe_left)
            || input.matches(&self.keybindings.no)
            || key.code == KeyCode::Left
        {
            return Some(Action::Swipe(SwipeDirection::Left));
        }
        if input.matches(&self.keybindings.swipe_right)
            || input.matches(&self.keybindings.yes)
            || key.code == KeyCode::Right
        {
            return Some(Action::Swipe(SwipeDirection::Right));
        }

        None
    }

    fn handle_betslip(&self, key: KeyEvent, input: &InputEvent) -> Option<Action> {
        if input.matches(&self.keybindings.quit) {
            return Some(Action::Quit);
        }
        if input.matches(&self.keybindings.betslip) {
            return Some(Action::ToggleBetslip);
        }
        if input.matches(&self.keybindings.back) {
            return Some(Action::CloseOverlay);
        }
        if input.matches(&self.keybindings.up) || key.code == KeyCode::Up {
            return Some(Action::ScrollUp);
        }
        if input.matches(&self.keybindings.down) || key.code == KeyCode::Down {
            return Some(Action::ScrollDown);
        }
        if input.matches(&self.keybindings.edit_amount) || input.matches(&self.keybindings.select)
        {
            return Some(Action::EditSelectedBet);
        }
        if input.matches(&self.keybindings.clear_betslip) {
            return Some(Action::ClearBetslip);
        }
        if input.matches(&self.keybindings.remove_bet) || key.code == KeyCode::Delete {
            return Some(Action::RemoveSelectedBet);
        }
        if input.matches(&self.keybindings.place_bets) {
            return Some(Action::PlaceAllBets);
        }

        None
    }

    fn handle_help(&self, input: &InputEvent) -> Option<Action> {
        if input.matches(&self.keybindings.quit) {
            Some(Action::Quit)
        } else if input.matches(&self.keybindings.help) || input.matches(&self.keybindings.back) {
            Some(Action::ToggleHelp)
        } else {
            None
        }
    }

    fn handle_editing_mode(&self, key: KeyEvent, input: &InputEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc => Some(Action::CancelInput),
            KeyCode::Enter => Some(Action::SubmitInput),
            KeyCode::Backspace => Some(Action::InputBackspace),
            KeyCode::Left => Some(Action::InputLeft),
            KeyCode::Right => Some(Action::InputRight),
            KeyCode::Char(c) if !input.ctrl() => Some(Action::InputChar(c)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock_markets;
    use crate::config::BettingConfig;
    use crate::storage::Storage;
    use crossterm::event::KeyModifiers;
    use tokio::sync::mpsc;

    fn store() -> Store {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut store = Store::new(tx, Storage::in_memory(), &BettingConfig::default());
        store.reduce(Action::MarketsLoaded(mock_markets()));
        store
    }

    fn handler_for(store: &Store) -> EventHandler {
        let mut handler = EventHandler::new(KeyBindings::default(), EventConfig::default());
        handler.update_store_snapshot(store);
        handler
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn action_name(action: Option<Action>) -> String {
        format!("{:?}", action)
    }

    #[test]
    fn test_no_snapshot_no_action() {
        let handler = EventHandler::new(KeyBindings::default(), EventConfig::default());
        assert!(handler.handle_key(key(KeyCode::Char('q'))).is_none());
    }

    #[test]
    fn test_swipe_keys_on_feed() {
        let store = store();
        let handler = handler_for(&store);

        for code in [KeyCode::Char('l'), KeyCode::Char('y'), KeyCode::Right] {
            assert_eq!(
                action_name(handler.handle_key(key(code))),
                "Some(Swipe(Right))"
            );
        }
        for code in [KeyCode::Char('h'), KeyCode::Char('n'), KeyCode::Left] {
            assert_eq!(
                action_name(handler.handle_key(key(code))),
                "Some(Swipe(Left))"
            );
        }
    }

    #[test]
    fn test_swipe_keys_ignored_on_other_tabs() {
        let mut store = store();
        store.reduce(Action::SetTab(Tab::Portfolio));
        let handler = handler_for(&store);

        assert!(handler.handle_key(key(KeyCode::Char('l'))).is_none());
        assert_eq!(
            action_name(handler.handle_key(key(KeyCode::Char('1')))),
            "Some(SetTab(Markets))"
        );
    }

    #[test]
    fn test_betslip_keys() {
        let mut store = store();
        store.reduce(Action::ToggleBetslip);
        let handler = handler_for(&store);

        assert_eq!(
            action_name(handler.handle_key(key(KeyCode::Char('x')))),
            "Some(RemoveSelectedBet)"
        );
        assert_eq!(
            action_name(handler.handle_key(KeyEvent::new(
                KeyCode::Char('x'),
                KeyModifiers::CONTROL
            ))),
            "Some(ClearBetslip)"
        );
        assert_eq!(
            action_name(handler.handle_key(key(KeyCode::Char('p')))),
            "Some(PlaceAllBets)"
        );
        assert_eq!(
            action_name(handler.handle_key(key(KeyCode::Esc))),
            "Some(CloseOverlay)"
        );
        // Swipes do not reach the feed behind the panel.
        assert!(handler.handle_key(key(KeyCode::Char('l'))).is_none());
    }

    #[test]
    fn test_editing_captures_keys() {
        let mut store = store();
        store.reduce(Action::EditDefaultAmount);
        let handler = handler_for(&store);

        assert_eq!(
            action_name(handler.handle_key(key(KeyCode::Char('q')))),
            "Some(InputChar('q'))"
        );
        assert_eq!(
            action_name(handler.handle_key(key(KeyCode::Enter))),
            "Some(SubmitInput)"
        );
        assert_eq!(
            action_name(handler.handle_key(key(KeyCode::Esc))),
            "Some(CancelInput)"
        );
    }

    #[test]
    fn test_mouse_gesture() {
        let store = store();
        let handler = handler_for(&store);
        let mouse = |kind| MouseEvent {
            kind,
            column: 42,
            row: 10,
            modifiers: KeyModifiers::NONE,
        };

        assert_eq!(
            action_name(handler.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left)))),
            "Some(PointerDown(42))"
        );
        assert_eq!(
            action_name(handler.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left)))),
            "Some(PointerDrag(42))"
        );
        assert_eq!(
            action_name(handler.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left)))),
            "Some(PointerUp(42))"
        );

        let handler = EventHandler::new(
            KeyBindings::default(),
            EventConfig::default().with_mouse_capture(false),
        );
        assert!(
            handler
                .handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left)))
                .is_none()
        );
    }
}
