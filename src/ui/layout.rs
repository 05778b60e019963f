//! Layout management for the TUI.

use ratatui::layout::{Constraint, Direction, Layout as RatatuiLayout, Rect};

/// UI layout areas.
pub struct Layout {
    /// Status bar area (top).
    pub status_area: Rect,
    /// Tab bar area.
    pub tab_area: Rect,
    /// Main content area.
    pub main_area: Rect,
    /// Key hint line (bottom), empty when hidden.
    pub help_area: Rect,
    /// Notification area (overlaid).
    pub notification_area: Rect,
}

impl Layout {
    /// Create a new layout from the terminal area.
    pub fn new(area: Rect, show_help_bar: bool) -> Self {
        let chunks = RatatuiLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Status bar
                Constraint::Length(1), // Tab bar
                Constraint::Min(0),    // Main content
                Constraint::Length(u16::from(show_help_bar)),
            ])
            .split(area);

        // Notification toast sits near the bottom of the main area
        let width = area.width.saturating_sub(4).min(70);
        let notification_area = Rect {
            x: area.x + (area.width.saturating_sub(width)) / 2,
            y: chunks[2].bottom().saturating_sub(3).max(chunks[2].y),
            width,
            height: 3.min(chunks[2].height),
        };

        Self {
            status_area: chunks[0],
            tab_area: chunks[1],
            main_area: chunks[2],
            help_area: chunks[3],
            notification_area,
        }
    }
}

/// Create a centered popup area.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    RatatuiLayout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Move `rect` horizontally by `offset`, cropping it to `bounds`.
pub fn shift_rect(rect: Rect, offset: i32, bounds: Rect) -> Rect {
    let left = (i32::from(rect.x) + offset).max(i32::from(bounds.x));
    let right = (i32::from(rect.right()) + offset).min(i32::from(bounds.right()));
    if right <= left {
        return Rect { width: 0, ..rect };
    }
    Rect {
        x: left as u16,
        width: (right - left) as u16,
        ..rect
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_shift_rect_right_crops() {
        let bounds = Rect::new(0, 0, 40, 10);
        let card = Rect::new(2, 1, 36, 5);
        assert_eq!(shift_rect(card, 5, bounds), Rect::new(7, 1, 33, 5));
    }

    #[test]
    fn test_shift_rect_left_crops() {
        let bounds = Rect::new(0, 0, 40, 10);
        let card = Rect::new(2, 1, 36, 5);
        assert_eq!(shift_rect(card, -6, bounds), Rect::new(0, 1, 32, 5));
    }

    #[test]
    fn test_shift_rect_off_screen() {
        let bounds = Rect::new(0, 0, 40, 10);
        let card = Rect::new(2, 1, 36, 5);
        assert_eq!(shift_rect(card, 100, bounds).width, 0);
    }

    #[test]
    fn test_layout_small_terminal() {
        let layout = Layout::new(Rect::new(0, 0, 10, 3), true);
        assert!(layout.notification_area.height <= layout.main_area.height);
    }
}
