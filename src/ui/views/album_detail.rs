use async_trait::async_trait;
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::{
    catalog::{Album, CatalogError},
    event::events::Event,
    ui::{
        components::spinner::Spinner,
        context::AppContext,
        state::{AppState, Route},
        traits::{Action, View},
    },
    util::colors,
};

#[derive(Debug, Clone, PartialEq)]
enum DetailState {
    Loading,
    Loaded(Box<Album>),
    NotFound,
    Failed(String),
}

pub struct AlbumDetail {
    id: String,
    state: DetailState,
}

impl AlbumDetail {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        let state = if id.trim().is_empty() {
            DetailState::Failed("Invalid album ID".to_string())
        } else {
            DetailState::Loading
        };
        Self { id, state }
    }

    pub fn is_loading(&self) -> bool {
        self.state == DetailState::Loading
    }

    pub fn album(&self) -> Option<&Album> {
        match &self.state {
            DetailState::Loaded(album) => Some(album.as_ref()),
            _ => None,
        }
    }

    fn apply(&mut self, outcome: &Result<Album, CatalogError>) {
        self.state = match outcome {
            Ok(album) => DetailState::Loaded(Box::new(album.clone())),
            Err(CatalogError::AlbumNotFound) => DetailState::NotFound,
            Err(e) => DetailState::Failed(e.to_string()),
        };
    }

    fn render_album(album: &Album, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(0)])
            .split(area);

        let year = album
            .release_year()
            .map(|y| y.to_string())
            .unwrap_or_else(|| "Unknown year".to_string());

        let header = Paragraph::new(vec![
            Line::from(Span::styled(
                album.name.clone(),
                Style::default()
                    .add_modifier(Modifier::BOLD)
                    .fg(colors::PRIMARY),
            )),
            Line::from(format!("By {}", album.artist_names())),
            Line::from(format!("{} • {}", year, album.album_type)),
        ])
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .padding(Padding::new(1, 1, 0, 1)),
        );
        f.render_widget(header, chunks[0]);

        let mut lines = vec![
            Line::from(format!("Release date: {}", album.release_date)),
            Line::from(format!("Tracks: {}", album.total_tracks)),
        ];
        if let Some(cover) = album.cover_url() {
            lines.push(Line::from(format!("Cover: {cover}")));
        }
        if let Some(url) = album.spotify_url() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("Open in Spotify: {url}"),
                Style::default().fg(colors::SECONDARY),
            )));
        }

        f.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .block(Block::default().padding(Padding::new(1, 1, 1, 0))),
            chunks[1],
        );
    }

    fn render_message(f: &mut Frame, area: Rect, title: &str, detail: &str, color: Color) {
        let text = vec![
            Line::from(Span::styled(
                title.to_string(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                detail.to_string(),
                Style::default().fg(colors::TEXT),
            )),
        ];
        f.render_widget(
            Paragraph::new(text).centered().wrap(Wrap { trim: true }),
            area,
        );
    }
}

#[async_trait]
impl View for AlbumDetail {
    fn route(&self) -> Route {
        Route::AlbumDetail(self.id.clone())
    }

    fn hints(&self) -> &'static str {
        match self.state {
            DetailState::Loaded(_) => "o open in Spotify • b back to search • q quit",
            _ => "b back to search • q quit",
        }
    }

    fn render(&mut self, f: &mut Frame, area: Rect, _state: &AppState, _ctx: &AppContext) {
        match &self.state {
            DetailState::Loading => {
                let spinner = Spinner::new("Loading album details...")
                    .style(Style::default().fg(colors::PRIMARY));
                f.render_widget(spinner, area);
            }
            DetailState::Loaded(album) => Self::render_album(album, f, area),
            DetailState::NotFound => Self::render_message(
                f,
                area,
                "Album not found",
                "The album you're looking for doesn't exist or has been removed. Press b to go back to search.",
                colors::TEXT,
            ),
            DetailState::Failed(message) => Self::render_message(
                f,
                area,
                "Error",
                message,
                colors::ERROR,
            ),
        }
    }

    async fn handle_input(
        &mut self,
        key: KeyEvent,
        _state: &AppState,
        _ctx: &AppContext,
    ) -> Option<Action> {
        match key.code {
            KeyCode::Char('b') | KeyCode::Esc => Some(Action::Navigate(Route::Home)),
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('o') => {
                let url = self.album()?.spotify_url()?.to_string();
                Some(Action::Open(url))
            }
            _ => None,
        }
    }

    async fn on_event(&mut self, event: &Event, _ctx: &AppContext) {
        if let Event::AlbumLoaded { id, outcome } = event {
            if *id == self.id {
                self.apply(outcome);
            }
        }
    }
}
