//! Help panel widget.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::super::layout::centered_rect;
use crate::config::KeyBindings;

/// Help sections as (title, [(keys, description)]) using the configured bindings.
fn sections(keys: &KeyBindings) -> Vec<(&'static str, Vec<(String, &'static str)>)> {
    vec![
        (
            "Feed",
            vec![
                (format!("{}/↓", keys.down), "Next market"),
                (format!("{}/↑", keys.up), "Previous market"),
                (
                    format!("{}/→/{}", keys.swipe_right, keys.yes),
                    "Swipe right: bet yes",
                ),
                (
                    format!("{}/←/{}", keys.swipe_left, keys.no),
                    "Swipe left: drop bet",
                ),
                ("drag".to_string(), "Swipe the selected card with the mouse"),
                ("1-4".to_string(), "Switch tabs"),
                (keys.next_tab.clone(), "Next tab"),
            ],
        ),
        (
            "Betting",
            vec![
                (keys.connect.clone(), "Connect wallet"),
                (keys.default_amount.clone(), "Set default amount"),
                (keys.betslip.clone(), "Open/close betslip"),
            ],
        ),
        (
            "Betslip",
            vec![
                (keys.edit_amount.clone(), "Edit selected amount"),
                (keys.remove_bet.clone(), "Remove selected bet"),
                (keys.clear_betslip.clone(), "Clear betslip"),
                (keys.place_bets.clone(), "Place all bets"),
            ],
        ),
        (
            "General",
            vec![
                (keys.back.clone(), "Close popup / dismiss"),
                (keys.help.clone(), "Toggle help"),
                (keys.quit.clone(), "Quit"),
            ],
        ),
    ]
}

/// Help panel showing keybindings.
pub struct HelpPanel;

impl HelpPanel {
    /// Render the help panel.
    pub fn render(frame: &mut Frame, area: Rect, keys: &KeyBindings) {
        let popup_area = centered_rect(60, 80, area);

        // Clear the area behind the popup
        frame.render_widget(Clear, popup_area);

        let mut help_text = Vec::new();
        for (i, (title, entries)) in sections(keys).into_iter().enumerate() {
            if i > 0 {
                help_text.push(Line::from(""));
            }
            help_text.push(Line::from(vec![Span::styled(
                title,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )]));
            for (key, description) in entries {
                help_text.push(Line::from(vec![
                    Span::styled(format!("  {:<8}", key), Style::default().fg(Color::Cyan)),
                    Span::raw(description),
                ]));
            }
        }

        let help = Paragraph::new(help_text)
            .block(
                Block::default()
                    .title(" Help ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            )
            .style(Style::default().fg(Color::White));

        frame.render_widget(help, popup_area);
    }
}
