//! Status bar widget.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::config::KeyBindings;
use crate::state::{Store, WalletStatus};

/// Status bar widget.
pub struct StatusBar;

impl StatusBar {
    /// Render the status bar.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store, keys: &KeyBindings) {
        let wallet = match &store.app.wallet {
            WalletStatus::Connected { .. } => Span::styled(
                format!(
                    "● {}",
                    store.app.wallet.short_address().unwrap_or_default()
                ),
                Style::default().fg(Color::Green),
            ),
            WalletStatus::Connecting => Span::styled(
                "◌ Connecting...",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            ),
            WalletStatus::Disconnected => {
                Span::styled(
                    format!("○ Connect Wallet ({})", keys.connect),
                    Style::default().fg(Color::Red),
                )
            }
        };

        let default_amount = match store.default_amount.get() {
            Some(amount) => Span::styled(
                format!("Default: {} {}", amount, store.currency),
                Style::default().fg(Color::Yellow),
            ),
            None => Span::styled(
                format!("Default: not set ({})", keys.default_amount),
                Style::default().fg(Color::Gray),
            ),
        };

        let betslip_badge = if store.betslip.is_empty() {
            Span::styled(
                format!(" Betslip ({}) ", keys.betslip),
                Style::default().fg(Color::Gray),
            )
        } else {
            Span::styled(
                format!(" Betslip [{}] ", store.betslip.len()),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            )
        };

        let help_hint = Span::styled(
            format!(" {} help ", keys.help),
            Style::default().fg(Color::Gray),
        );

        // Create the status line
        let left_content = vec![
            Span::styled(
                " 🫚 Gingermarket ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | "),
            wallet,
            Span::raw(" | "),
            default_amount,
        ];

        let status_line = Line::from(left_content);

        // Calculate padding for the right-aligned badge
        let left_len = status_line.width();
        let right_len = betslip_badge.width() + help_hint.width();
        let padding = usize::from(area.width).saturating_sub(left_len + right_len);

        let mut full_line = status_line.spans;
        full_line.push(Span::raw(" ".repeat(padding)));
        full_line.push(betslip_badge);
        full_line.push(help_hint);

        let paragraph =
            Paragraph::new(Line::from(full_line)).style(Style::default().bg(Color::DarkGray));

        frame.render_widget(paragraph, area);
    }
}
