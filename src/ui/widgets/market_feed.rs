//! Swipeable market card feed.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};
use std::ops::Range;

use super::super::layout::shift_rect;
use crate::config::KeyBindings;
use crate::state::{Market, Store};
use crate::swipe::CardPhase;

/// Market card feed widget.
pub struct MarketFeed;

impl MarketFeed {
    /// Render the feed with cards `card_height` rows tall.
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        store: &Store,
        keys: &KeyBindings,
        card_height: u16,
    ) {
        let block = Block::default()
            .title(format!(" Markets ({}) ", store.markets.markets.len()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if store.markets.markets.is_empty() {
            let text = if store.markets.loading {
                "Loading markets..."
            } else {
                "No markets available"
            };
            let paragraph = Paragraph::new(Span::styled(
                text,
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ))
            .alignment(Alignment::Center);
            frame.render_widget(paragraph, inner);
            return;
        }

        let card_height = card_height.max(6);
        let per_page = usize::from((inner.height / card_height).max(1));
        let selected = store.markets.selected_index.unwrap_or(0);
        let range = visible_range(selected, store.markets.markets.len(), per_page);

        for (row, index) in range.enumerate() {
            let y = inner.y + row as u16 * card_height;
            let height = card_height.min(inner.bottom().saturating_sub(y));
            if height < 3 {
                break;
            }
            let slot = Rect::new(inner.x + 1, y, inner.width.saturating_sub(2), height);
            let market = &store.markets.markets[index];
            render_card(frame, slot, inner, market, store, keys, index == selected);
        }
    }
}

/// Indices of the cards that fit on screen with `selected` in view.
fn visible_range(selected: usize, count: usize, per_page: usize) -> Range<usize> {
    let start = (selected + 1).saturating_sub(per_page);
    start..(start + per_page).min(count)
}

/// Widths of the yes and no parts of a `width`-column bar.
fn split_bar(yes_probability: u8, width: u16) -> (u16, u16) {
    let yes = (u32::from(width) * u32::from(yes_probability.min(100)) + 50) / 100;
    let yes = yes as u16;
    (yes, width - yes)
}

fn render_card(
    frame: &mut Frame,
    slot: Rect,
    bounds: Rect,
    market: &Market,
    store: &Store,
    keys: &KeyBindings,
    selected: bool,
) {
    let card = store.markets.card(&market.id);
    let offset = if selected {
        card.map(|c| c.offset()).unwrap_or(0)
    } else {
        0
    };
    let area = shift_rect(slot, offset, bounds);
    if area.width < 4 {
        return;
    }

    // Border warms up as the drag approaches the commit threshold.
    let border_color = match card {
        Some(c)
            if selected
                && matches!(c.phase(), CardPhase::Dragging { .. })
                && c.progress().abs() >= 0.5 =>
        {
            match (c.past_threshold(), c.progress() > 0.0) {
                (true, true) => Color::Green,
                (true, false) => Color::Red,
                (false, true) => Color::LightGreen,
                (false, false) => Color::LightRed,
            }
        }
        _ if selected => Color::Cyan,
        _ => Color::DarkGray,
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(if selected {
            BorderType::Thick
        } else {
            BorderType::Rounded
        })
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Question and description
            Constraint::Length(1), // Probability bar
            Constraint::Length(1), // Volume and resolution
            Constraint::Length(1), // Affordances
        ])
        .split(inner);

    let text = vec![
        Line::from(Span::styled(
            market.question.as_str(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            market.description.as_str(),
            Style::default().fg(Color::Gray),
        )),
    ];
    frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: true }), rows[0]);

    // Probability bar
    let yes_label = format!("YES {}% ", market.yes_probability);
    let no_label = format!(" {}% NO", market.no_probability());
    let bar_width = rows[1]
        .width
        .saturating_sub((yes_label.len() + no_label.len()) as u16);
    let (yes_width, no_width) = split_bar(market.yes_probability, bar_width);
    let bar = Line::from(vec![
        Span::styled(
            yes_label,
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("█".repeat(usize::from(yes_width)), Style::default().fg(Color::Green)),
        Span::styled("█".repeat(usize::from(no_width)), Style::default().fg(Color::Red)),
        Span::styled(
            no_label,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
    ]);
    frame.render_widget(Paragraph::new(bar), rows[1]);

    let stats = Line::from(vec![
        Span::styled(
            format!("{:.1} {}", market.stake_volume, store.currency),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(" volume", Style::default().fg(Color::DarkGray)),
        Span::raw("  ·  "),
        Span::styled(
            format!("Resolves {}", market.resolve_label()),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(stats), rows[2]);

    render_affordances(frame, rows[3], market, store, keys, selected);
}

fn render_affordances(
    frame: &mut Frame,
    area: Rect,
    market: &Market,
    store: &Store,
    keys: &KeyBindings,
    selected: bool,
) {
    let no = Span::styled(
        format!("← No ({})", keys.swipe_left),
        Style::default().fg(Color::Red),
    );
    let yes = if store.yes_enabled() {
        Span::styled(
            format!("Yes ({}) →", keys.swipe_right),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(
            format!("Yes (set amount: {}) →", keys.default_amount),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::CROSSED_OUT),
        )
    };

    let middle = match store.betslip.get(&market.id) {
        Some(bet) => Span::styled(
            format!("In betslip: {} {} {}", bet.side, bet.amount, store.currency),
            Style::default().fg(Color::Magenta),
        ),
        None => Span::raw(""),
    };

    let line = if selected {
        let used = no.width() + yes.width() + middle.width();
        let gap = usize::from(area.width).saturating_sub(used) / 2;
        Line::from(vec![
            no,
            Span::raw(" ".repeat(gap)),
            middle,
            Span::raw(" ".repeat(gap)),
            yes,
        ])
    } else {
        Line::from(middle)
    };
    frame.render_widget(Paragraph::new(line), area);
}
