use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs, Widget},
};

use crate::{ui::state::Route, util::colors};

pub const TABS: [Route; 2] = [Route::Home, Route::Registration];

/// The tab a route belongs to. Album details live under home.
pub fn tab_index(route: &Route) -> usize {
    match route {
        Route::Registration => 1,
        Route::Home | Route::AlbumDetail(_) => 0,
    }
}

pub fn next_tab(route: &Route) -> Route {
    TABS[(tab_index(route) + 1) % TABS.len()].clone()
}

pub fn prev_tab(route: &Route) -> Route {
    TABS[(tab_index(route) + TABS.len() - 1) % TABS.len()].clone()
}

pub struct Header<'a> {
    route: &'a Route,
}

impl<'a> Header<'a> {
    pub fn new(route: &'a Route) -> Self {
        Self { route }
    }
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .border_style(Style::default().fg(colors::NEUTRAL))
            .title(Span::styled(
                " albumdeck ",
                Style::default()
                    .fg(colors::PRIMARY)
                    .add_modifier(Modifier::BOLD),
            ));
        let inner = block.inner(area);
        block.render(area, buf);

        let [tabs_area, title_area] =
            Layout::horizontal([Constraint::Min(1), Constraint::Length(24)]).areas(inner);

        Tabs::new(TABS.iter().map(|r| r.title()))
            .select(tab_index(self.route))
            .style(Style::default().fg(colors::TEXT))
            .highlight_style(
                Style::default()
                    .fg(colors::PRIMARY)
                    .add_modifier(Modifier::BOLD),
            )
            .render(tabs_area, buf);

        Paragraph::new(Line::from(self.route.title()).right_aligned())
            .style(Style::default().fg(colors::TEXT))
            .render(title_area, buf);
    }
}
