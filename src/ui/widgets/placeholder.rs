//! Empty view for tabs without content.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::state::Tab;

/// Placeholder body for a tab.
pub struct Placeholder;

impl Placeholder {
    /// Render the placeholder for `tab`.
    pub fn render(frame: &mut Frame, area: Rect, tab: Tab) {
        let block = Block::default()
            .title(format!(" {} ", tab.title()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("Nothing in {} yet", tab.title()),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )),
            Line::from(Span::styled(
                "Press 1 to go back to the markets",
                Style::default().fg(Color::DarkGray),
            )),
        ];

        let paragraph = Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
    }
}
