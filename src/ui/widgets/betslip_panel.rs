//! Betslip panel widget.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState},
};

use super::super::layout::centered_rect;
use crate::config::KeyBindings;
use crate::state::{BetSide, InputTarget, Store};

/// Floating panel listing pending bets.
pub struct BetslipPanel;

impl BetslipPanel {
    /// Render the betslip panel over `area`.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store, keys: &KeyBindings) {
        let popup_area = centered_rect(70, 70, area);

        // Clear the area behind the popup
        frame.render_widget(Clear, popup_area);

        let title = if store.app.submitting {
            " Betslip - placing bets... ".to_string()
        } else {
            format!(" Betslip ({}) ", store.betslip.len())
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta));
        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        if store.betslip.is_empty() {
            let text = vec![
                Line::from(""),
                Line::from(Span::styled(
                    "Your betslip is empty",
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    "Swipe right on a market to add a bet",
                    Style::default().fg(Color::DarkGray),
                )),
            ];
            frame.render_widget(
                Paragraph::new(text).alignment(Alignment::Center),
                inner,
            );
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // Bets
                Constraint::Length(1), // Total
                Constraint::Length(1), // Key hints
            ])
            .split(inner);

        render_table(frame, chunks[0], store);

        let total = match store.betslip.total() {
            Some(total) => Span::styled(
                format!("{:.4} {}", total, store.currency),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            None => Span::styled("overflow", Style::default().fg(Color::Red)),
        };
        let total = Line::from(vec![
            Span::styled("Total: ", Style::default().fg(Color::Gray)),
            total,
        ]);
        frame.render_widget(Paragraph::new(total).alignment(Alignment::Right), chunks[1]);

        let hints: Line = [
            (keys.edit_amount.as_str(), " edit  "),
            (keys.remove_bet.as_str(), " remove  "),
            (keys.clear_betslip.as_str(), " clear  "),
            (keys.place_bets.as_str(), " place all bets  "),
            (keys.back.as_str(), " close"),
        ]
        .into_iter()
        .flat_map(|(key, label)| {
            [
                Span::styled(format!("[{}]", key), Style::default().fg(Color::Cyan)),
                Span::raw(label),
            ]
        })
        .collect();
        frame.render_widget(
            Paragraph::new(hints).style(Style::default().fg(Color::DarkGray)),
            chunks[2],
        );
    }
}

fn render_table(frame: &mut Frame, area: Rect, store: &Store) {
    let header_cells = ["Market", "Side", "Amount"].iter().map(|h| {
        Cell::from(*h).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    });
    let header = Row::new(header_cells).height(1).bottom_margin(1);

    let editing_id = match &store.app.input_target {
        Some(InputTarget::BetAmount(id)) if store.app.is_editing() => Some(id.as_str()),
        _ => None,
    };

    let rows = store.betslip.bets().iter().map(|bet| {
        let side_style = match bet.side {
            BetSide::Yes => Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD),
            BetSide::No => Style::default()
                .fg(Color::Black)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD),
        };

        let amount = if editing_id == Some(bet.id.as_str()) {
            Cell::from(format!("{}▏ {}", store.app.input_buffer, store.currency)).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::UNDERLINED),
            )
        } else {
            Cell::from(format!("{} {}", bet.amount, store.currency))
        };

        let cells = vec![
            Cell::from(truncate_string(&bet.question, 60)),
            Cell::from(format!(" {} ", bet.side)).style(side_style),
            amount,
        ];

        Row::new(cells).height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Min(20),
            Constraint::Length(6),
            Constraint::Length(16),
        ],
    )
    .header(header)
    .row_highlight_style(Style::default().bg(Color::DarkGray))
    .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(store.betslip.selected_index);

    frame.render_stateful_widget(table, area, &mut state);
}

fn truncate_string(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("short", 10), "short");
        assert_eq!(truncate_string("a longer question", 10), "a longe...");
    }
}
