//! Screen layout definitions for the TUI

use ratatui::layout::{Constraint, Layout, Rect};

/// Height of the navigation bar (border + row + border)
pub const NAV_HEIGHT: u16 = 3;

/// Height of the status bar
pub const STATUS_HEIGHT: u16 = 1;

/// Widest a page body grows before it is centred
pub const MAX_CONTENT_WIDTH: u16 = 110;

/// Screen areas for the main layout
#[derive(Debug, Clone, Copy)]
pub struct ScreenAreas {
    /// Navigation bar with page tabs and theme toggle
    pub nav: Rect,

    /// Page body
    pub content: Rect,

    /// Notices and key hints
    pub status: Rect,
}

/// Create the main screen layout
pub fn create(area: Rect) -> ScreenAreas {
    let [nav, content, status] = Layout::vertical([
        Constraint::Length(NAV_HEIGHT),
        Constraint::Min(3),
        Constraint::Length(STATUS_HEIGHT),
    ])
    .areas(area);

    ScreenAreas {
        nav,
        content,
        status,
    }
}

/// Area a page view draws into: the content row, capped in width
pub fn page_area(screen: Rect) -> Rect {
    centered_width(create(screen).content, MAX_CONTENT_WIDTH)
}

/// Horizontally centre `area` to at most `max_width` columns
pub fn centered_width(area: Rect, max_width: u16) -> Rect {
    centered_rect(area, max_width, area.height)
}

/// A `width` x `height` rectangle centred in `area`, clamped to it
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_areas_contiguous() {
        let area = Rect::new(0, 0, 80, 24);
        let layout = create(area);

        assert_eq!(layout.nav.height, NAV_HEIGHT);
        assert_eq!(layout.status.height, STATUS_HEIGHT);
        assert_eq!(layout.content.y, NAV_HEIGHT);
        assert_eq!(
            layout.nav.height + layout.content.height + layout.status.height,
            area.height
        );
        assert_eq!(layout.status.y, 23);
    }

    #[test]
    fn test_centered_width_caps_wide_screens() {
        let area = Rect::new(0, 0, 200, 10);
        let centered = centered_width(area, MAX_CONTENT_WIDTH);
        assert_eq!(centered.width, MAX_CONTENT_WIDTH);
        assert_eq!(centered.x, 45);

        let narrow = Rect::new(0, 0, 60, 10);
        assert_eq!(centered_width(narrow, MAX_CONTENT_WIDTH).width, 60);
    }

    #[test]
    fn test_page_area_sits_between_bars() {
        let page = page_area(Rect::new(0, 0, 80, 24));
        assert_eq!(page, Rect::new(0, NAV_HEIGHT, 80, 24 - NAV_HEIGHT - STATUS_HEIGHT));
    }

    #[test]
    fn test_centered_rect_is_clamped() {
        let area = Rect::new(10, 5, 20, 6);
        let rect = centered_rect(area, 40, 4);
        assert_eq!(rect, Rect::new(10, 6, 20, 4));
    }
}
