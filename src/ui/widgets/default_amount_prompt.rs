//! Default bet amount form.

use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::super::layout::centered_rect;
use crate::state::{Store, parse_amount};
use rust_decimal::Decimal;

/// Popup asking for the amount used on "yes" swipes.
pub struct DefaultAmountPrompt;

impl DefaultAmountPrompt {
    /// Render the prompt. `first_login` selects the welcome copy.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store, first_login: bool) {
        let popup_area = centered_rect(50, 40, area);
        frame.render_widget(Clear, popup_area);

        let intro = if first_login {
            "Welcome! Pick the amount placed each time you swipe right on a market."
        } else {
            "Amount placed each time you swipe right on a market."
        };

        let buffer = &store.app.input_buffer;
        let valid = parse_amount(buffer).is_some_and(|a| a > Decimal::ZERO);

        let mut text = vec![
            Line::from(Span::styled(intro, Style::default().fg(Color::White))),
            Line::from(""),
            Line::from(vec![
                Span::styled("> ", Style::default().fg(Color::Cyan)),
                Span::styled(
                    buffer.as_str(),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(" {}", store.currency),
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
            Line::from(""),
        ];

        if !valid && !buffer.is_empty() {
            text.push(Line::from(Span::styled(
                "Enter an amount greater than 0",
                Style::default().fg(Color::Red),
            )));
        }
        text.push(Line::from(vec![
            Span::styled("[Enter]", Style::default().fg(Color::Cyan)),
            Span::raw(" save  "),
            Span::styled("[Esc]", Style::default().fg(Color::Cyan)),
            Span::raw(if first_login { " skip" } else { " cancel" }),
        ]));

        let block = Block::default()
            .title(" Default Bet Amount ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow));
        let inner = block.inner(popup_area);

        let paragraph = Paragraph::new(text)
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, popup_area);

        // Cursor on the input line; the intro may wrap onto a second row.
        let intro_rows = (intro.chars().count() as u16).div_ceil(inner.width.max(1));
        let cursor_x = inner.x + 2 + store.app.cursor_position as u16;
        let cursor_y = inner.y + intro_rows + 1;
        if store.app.is_editing() && cursor_x < inner.right() && cursor_y < inner.bottom() {
            frame.set_cursor_position(Position::new(cursor_x, cursor_y));
        }
    }
}
