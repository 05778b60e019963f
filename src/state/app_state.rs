//! Application-level state.

use super::Notification;

/// Header tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Markets,
    Trades,
    Portfolio,
    History,
}

impl Tab {
    /// All tabs in display order.
    pub const ALL: [Tab; 4] = [Tab::Markets, Tab::Trades, Tab::Portfolio, Tab::History];

    /// Display title.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Markets => "Markets",
            Self::Trades => "Trades",
            Self::Portfolio => "Portfolio",
            Self::History => "History",
        }
    }

    /// The tab after this one, wrapping around.
    pub fn next(&self) -> Self {
        match self {
            Self::Markets => Self::Trades,
            Self::Trades => Self::Portfolio,
            Self::Portfolio => Self::History,
            Self::History => Self::Markets,
        }
    }
}

/// Popup drawn over the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overlay {
    #[default]
    None,
    /// The betslip panel.
    Betslip,
    /// Default amount form. `first_login` marks the one-time prompt.
    DefaultAmount { first_login: bool },
    /// Keybinding help.
    Help,
}

/// Input mode for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing an amount into the input buffer.
    Editing,
}

/// What the input buffer is being typed for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputTarget {
    /// The default bet amount.
    DefaultAmount,
    /// The amount of the bet on a market.
    BetAmount(String),
}

/// Wallet connection state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WalletStatus {
    #[default]
    Disconnected,
    Connecting,
    Connected { address: String },
}

impl WalletStatus {
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected { .. })
    }

    /// Address shortened to its first and last four characters.
    pub fn short_address(&self) -> Option<String> {
        match self {
            Self::Connected { address } => Some(truncate_address(address)),
            _ => None,
        }
    }
}

/// Shorten an address to `abcd...wxyz`.
pub fn truncate_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 8 {
        return address.to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

/// Global application state.
#[derive(Debug, Default)]
pub struct AppState {
    /// Active header tab.
    pub current_tab: Tab,
    /// Open popup.
    pub overlay: Overlay,
    /// Current input mode.
    pub input_mode: InputMode,
    /// Target of the input buffer while editing.
    pub input_target: Option<InputTarget>,
    /// Current notification.
    pub notification: Option<Notification>,
    /// Wallet connection.
    pub wallet: WalletStatus,
    /// A bet submission is in flight.
    pub submitting: bool,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Current input text.
    pub input_buffer: String,
    /// Cursor position in input buffer.
    pub cursor_position: usize,
}

impl AppState {
    /// Check if in an input mode.
    pub fn is_editing(&self) -> bool {
        self.input_mode == InputMode::Editing
    }

    /// Start editing with `initial` text in the buffer.
    pub fn start_input(&mut self, target: InputTarget, initial: impl Into<String>) {
        self.input_buffer = initial.into();
        self.cursor_position = self.input_buffer.chars().count();
        self.input_target = Some(target);
        self.input_mode = InputMode::Editing;
    }

    /// Leave edit mode, returning the target and typed text.
    pub fn finish_input(&mut self) -> Option<(InputTarget, String)> {
        let target = self.input_target.take()?;
        let text = std::mem::take(&mut self.input_buffer);
        self.cursor_position = 0;
        self.input_mode = InputMode::Normal;
        Some((target, text))
    }

    /// Abandon edit mode.
    pub fn cancel_input(&mut self) {
        self.input_target = None;
        self.input_mode = InputMode::Normal;
        self.clear_input();
    }

    /// Clear the input buffer.
    pub fn clear_input(&mut self) {
        self.input_buffer.clear();
        self.cursor_position = 0;
    }

    /// Add a character at the cursor.
    pub fn push_char(&mut self, c: char) {
        let byte_index = self.byte_index();
        self.input_buffer.insert(byte_index, c);
        self.cursor_position += 1;
    }

    /// Remove the character before the cursor.
    pub fn pop_char(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            let byte_index = self.byte_index();
            self.input_buffer.remove(byte_index);
        }
    }

    /// Move cursor left.
    pub fn cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    /// Move cursor right.
    pub fn cursor_right(&mut self) {
        if self.cursor_position < self.input_buffer.chars().count() {
            self.cursor_position += 1;
        }
    }

    fn byte_index(&self) -> usize {
        self.input_buffer
            .char_indices()
            .nth(self.cursor_position)
            .map(|(i, _)| i)
            .unwrap_or(self.input_buffer.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_address() {
        assert_eq!(
            truncate_address("0x71C7656EC7ab88b098defB751B7401B5f6d8976F"),
            "0x71...976F"
        );
        assert_eq!(truncate_address("short"), "short");
    }

    #[test]
    fn test_input_editing() {
        let mut app = AppState::default();
        app.start_input(InputTarget::DefaultAmount, "0.1");
        assert!(app.is_editing());

        app.pop_char();
        app.push_char('5');
        app.cursor_left();
        app.push_char('0');
        app.push_char('1');

        assert_eq!(
            app.finish_input(),
            Some((InputTarget::DefaultAmount, "0.015".to_string()))
        );
        assert!(!app.is_editing());
        assert_eq!(app.finish_input(), None);
    }

    #[test]
    fn test_tab_cycle() {
        let mut tab = Tab::default();
        for _ in 0..Tab::ALL.len() {
            tab = tab.next();
        }
        assert_eq!(tab, Tab::Markets);
    }
}
