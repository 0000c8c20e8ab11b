use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::{
    ui::{app::App, components::header::Header},
    util::colors,
};

pub struct AppLayout<'a> {
    pub app: &'a mut App,
}

impl<'a> AppLayout<'a> {
    pub fn new(app: &'a mut App) -> Self {
        Self { app }
    }

    pub fn render(self, f: &mut Frame, area: Rect) {
        let buf = f.buffer_mut();
        buf.set_style(area, Style::new().bg(colors::BACKGROUND));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(area);

        let header_area = chunks[0];
        let content_area = chunks[1];
        let footer_area = chunks[2];

        let route = self.app.router.current_route();
        f.render_widget(Header::new(&route), header_area);

        let content_block = Block::default()
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .border_style(Style::default().fg(colors::NEUTRAL));
        let content_inner = content_block.inner(content_area);
        f.render_widget(content_block, content_area);

        self.app
            .router
            .render(f, content_inner, &self.app.state, &self.app.ctx);

        if let Some(toast) = &self.app.state.ui.toast {
            f.render_widget(toast, content_inner);
        }

        let footer = Paragraph::new(Line::from(Span::styled(
            self.app.router.hints(),
            Style::default().fg(colors::NEUTRAL),
        )));
        f.render_widget(footer, footer_area);
    }
}
