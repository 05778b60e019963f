//! Bottom key hint line.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::config::KeyBindings;
use crate::state::{Overlay, Store};

/// One-line summary of the keys that apply right now.
pub struct KeyHints;

impl KeyHints {
    /// Render the hints for the current mode.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store, keys: &KeyBindings) {
        let browse = format!("{}/{}", keys.down, keys.up);
        let hints: Vec<(&str, &str)> = if store.app.is_editing() {
            vec![
                (keys.select.as_str(), "save"),
                (keys.back.as_str(), "cancel"),
                ("←/→", "move cursor"),
            ]
        } else {
            match store.app.overlay {
                Overlay::Betslip => vec![
                    (browse.as_str(), "select"),
                    (keys.edit_amount.as_str(), "edit"),
                    (keys.remove_bet.as_str(), "remove"),
                    (keys.place_bets.as_str(), "place all"),
                    (keys.betslip.as_str(), "close"),
                ],
                Overlay::Help => vec![(keys.help.as_str(), "close help")],
                Overlay::DefaultAmount { .. } => vec![(keys.back.as_str(), "close")],
                Overlay::None => vec![
                    (keys.swipe_left.as_str(), "no"),
                    (keys.swipe_right.as_str(), "yes"),
                    (browse.as_str(), "browse"),
                    (keys.betslip.as_str(), "betslip"),
                    (keys.connect.as_str(), "connect"),
                    (keys.default_amount.as_str(), "amount"),
                    (keys.quit.as_str(), "quit"),
                ],
            }
        };

        let mut spans = vec![Span::raw(" ")];
        for (key, label) in hints {
            spans.push(Span::styled(key, Style::default().fg(Color::Cyan)));
            spans.push(Span::styled(
                format!(" {}  ", label),
                Style::default().fg(Color::DarkGray),
            ));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
