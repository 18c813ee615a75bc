use tui::layout::{Constraint, Layout, Rect, Size};

pub const HEADER_HEIGHT: u16 = 2;
pub const TAB_BAR_HEIGHT: u16 = 3;
pub const SIDEBAR_WIDTH: u16 = 44;

/// Pre-computed layout areas for the main draw loop.
pub struct LayoutAreas {
    pub header: Rect,
    pub sidebar: Rect,
    pub tab_bar: [Rect; 2],
    pub main: Rect,
}

impl LayoutAreas {
    pub fn new(size: Size) -> Self {
        let rect = Rect::new(0, 0, size.width, size.height);
        Self::from_rect(rect, false)
    }

    pub fn update(&mut self, area: Rect, full_screen: bool) {
        *self = Self::from_rect(area, full_screen);
    }

    fn from_rect(area: Rect, full_screen: bool) -> Self {
        if full_screen {
            let [main] = Layout::vertical([Constraint::Fill(1)]).areas(area);
            return LayoutAreas {
                header: Rect::ZERO,
                sidebar: Rect::ZERO,
                tab_bar: [Rect::ZERO, Rect::ZERO],
                main,
            };
        }

        let [header, body] =
            Layout::vertical([Constraint::Length(HEADER_HEIGHT), Constraint::Fill(1)]).areas(area);

        // Narrow terminals give the sidebar a third of the width at most.
        let sidebar_width = SIDEBAR_WIDTH.min(body.width / 3);
        let [sidebar, content] =
            Layout::horizontal([Constraint::Length(sidebar_width), Constraint::Fill(1)]).areas(body);

        let [tab, main] = Layout::vertical([
            Constraint::Length(TAB_BAR_HEIGHT),
            Constraint::Fill(1),
        ])
        .areas(content);

        LayoutAreas {
            header,
            sidebar,
            tab_bar: Self::split_tab_bar(tab),
            main,
        }
    }

    fn split_tab_bar(area: Rect) -> [Rect; 2] {
        Layout::horizontal([Constraint::Percentage(85), Constraint::Percentage(15)]).areas(area)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_screen_gives_everything_to_main() {
        let mut layout = LayoutAreas::new(Size::new(120, 40));
        layout.update(Rect::new(0, 0, 120, 40), true);
        assert_eq!(layout.main, Rect::new(0, 0, 120, 40));
        assert_eq!(layout.sidebar, Rect::ZERO);
    }

    #[test]
    fn sidebar_sits_left_of_tabs_and_main() {
        let layout = LayoutAreas::new(Size::new(150, 40));
        assert_eq!(layout.header.height, HEADER_HEIGHT);
        assert_eq!(layout.sidebar.width, SIDEBAR_WIDTH);
        assert_eq!(layout.tab_bar[0].x, SIDEBAR_WIDTH);
        assert_eq!(layout.main.y, HEADER_HEIGHT + TAB_BAR_HEIGHT);
        assert_eq!(layout.main.width, 150 - SIDEBAR_WIDTH);
    }

    #[test]
    fn narrow_terminal_caps_the_sidebar() {
        let layout = LayoutAreas::new(Size::new(60, 30));
        assert_eq!(layout.sidebar.width, 20);
    }
}
