use async_trait::async_trait;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tokio::sync::watch;

use crate::{
    catalog::{CatalogState, HistoryView, SearchQuery},
    event::events::Event,
    ui::{
        components::{
            album_grid::{self, AlbumGrid, CARD_HEIGHT},
            spinner::Spinner,
            toast::Toast,
        },
        context::AppContext,
        state::{AppState, Route},
        traits::{Action, View},
    },
    util::colors,
};

pub struct Home {
    input: String,
    is_editing: bool,
    selected: usize,
    first_row: usize,
    per_row: usize,
    catalog: watch::Receiver<CatalogState>,
    snapshot: CatalogState,
    history: HistoryView,
    recent: Vec<SearchQuery>,
}

impl Home {
    pub fn new(ctx: &AppContext) -> Self {
        let catalog = ctx.catalog.subscribe();
        let snapshot = catalog.borrow().clone();
        let mut history = ctx.catalog.subscribe_history();
        let recent = history.recent_five();

        Self {
            input: String::new(),
            is_editing: true,
            selected: 0,
            first_row: 0,
            per_row: 1,
            catalog,
            snapshot,
            history,
            recent,
        }
    }

    fn submit(&mut self, ctx: &AppContext) {
        let query = self.input.trim();
        if query.is_empty() {
            return;
        }
        let _ = ctx.event_tx.send(Event::Search(query.to_string()));
        self.is_editing = false;
        self.selected = 0;
        self.first_row = 0;
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.snapshot.results.len();
        if len == 0 {
            return;
        }
        let target = self.selected as isize + delta;
        self.selected = target.clamp(0, len as isize - 1) as usize;
    }

    fn render_recent(&self, f: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled("Recent: ", Style::default().fg(colors::TEXT))];
        if self.recent.is_empty() {
            spans.push(Span::styled(
                "no searches yet",
                Style::default().fg(colors::NEUTRAL),
            ));
        }
        for (i, query) in self.recent.iter().enumerate() {
            spans.push(Span::styled(
                format!("[{}] {}", i + 1, query.query),
                Style::default().fg(colors::SECONDARY),
            ));
            spans.push(Span::raw("  "));
        }
        f.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_results(&mut self, f: &mut Frame, area: Rect) {
        if self.snapshot.loading {
            let spinner = Spinner::new("Searching...").style(Style::default().fg(colors::PRIMARY));
            f.render_widget(spinner, area);
            return;
        }

        if self.snapshot.authenticating {
            let spinner =
                Spinner::new("Connecting to Spotify...").style(Style::default().fg(colors::NEUTRAL));
            f.render_widget(spinner, area);
            return;
        }

        if !self.snapshot.authenticated {
            f.render_widget(
                Paragraph::new("Not connected. Press Ctrl+R to reconnect")
                    .style(Style::default().fg(colors::ERROR))
                    .centered(),
                area,
            );
            return;
        }

        let albums = &self.snapshot.results;
        if albums.is_empty() {
            let message = if self.input.trim().is_empty() {
                "Type an album, artist or keyword and press Enter"
            } else {
                "No albums found"
            };
            f.render_widget(
                Paragraph::new(message)
                    .style(Style::default().fg(colors::NEUTRAL))
                    .centered(),
                area,
            );
            return;
        }

        let visible_rows = (area.height / CARD_HEIGHT).max(1) as usize;
        self.selected = self.selected.min(albums.len() - 1);
        self.first_row =
            album_grid::scroll_to(self.selected, self.per_row, self.first_row, visible_rows);

        let selected = (!self.is_editing).then_some(self.selected);
        let grid = AlbumGrid::new(albums, self.per_row)
            .selected(selected)
            .first_row(self.first_row);
        f.render_widget(grid, area);
    }
}

#[async_trait]
impl View for Home {
    fn route(&self) -> Route {
        Route::Home
    }

    fn hints(&self) -> &'static str {
        if self.is_editing {
            "Enter search • Esc browse results • Tab registration • Ctrl+C quit"
        } else {
            "/ edit • ←↑↓→ move • Enter open • 1-5 recent • r retry • Ctrl+R reconnect • q quit"
        }
    }

    fn render(&mut self, f: &mut Frame, area: Rect, state: &AppState, _ctx: &AppContext) {
        self.per_row = album_grid::items_per_row(state.ui.viewport_width);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(1),
            ])
            .split(area);

        let input_style = if self.is_editing {
            Style::default().fg(colors::PRIMARY)
        } else {
            Style::default().fg(colors::NEUTRAL)
        };
        let input_block = Block::default()
            .borders(Borders::ALL)
            .title("Search albums")
            .border_style(input_style);
        f.render_widget(Paragraph::new(self.input.as_str()).block(input_block), chunks[0]);
        if self.is_editing {
            let cursor_x = chunks[0].x + 1 + self.input.chars().count() as u16;
            f.set_cursor_position((
                cursor_x.min(chunks[0].right().saturating_sub(2)),
                chunks[0].y + 1,
            ));
        }

        self.render_recent(f, chunks[1]);
        self.render_results(f, chunks[2]);
    }

    async fn handle_input(
        &mut self,
        key: KeyEvent,
        _state: &AppState,
        ctx: &AppContext,
    ) -> Option<Action> {
        if self.is_editing {
            return match key.code {
                KeyCode::Char(_) if key.modifiers.contains(KeyModifiers::CONTROL) => None,
                KeyCode::Enter => {
                    self.submit(ctx);
                    Some(Action::None)
                }
                KeyCode::Char(c) => {
                    self.input.push(c);
                    Some(Action::None)
                }
                KeyCode::Backspace => {
                    self.input.pop();
                    Some(Action::None)
                }
                KeyCode::Esc | KeyCode::Down => {
                    self.is_editing = false;
                    Some(Action::None)
                }
                _ => None,
            };
        }

        match key.code {
            KeyCode::Char('/') | KeyCode::Char('i') => {
                self.is_editing = true;
                Some(Action::None)
            }
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Left | KeyCode::Char('h') => {
                self.move_selection(-1);
                Some(Action::None)
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.move_selection(1);
                Some(Action::None)
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if self.selected < self.per_row {
                    self.is_editing = true;
                } else {
                    self.move_selection(-(self.per_row as isize));
                }
                Some(Action::None)
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_selection(self.per_row as isize);
                Some(Action::None)
            }
            KeyCode::Enter => {
                let album = self.snapshot.results.get(self.selected)?;
                Some(Action::Navigate(Route::AlbumDetail(album.id.clone())))
            }
            KeyCode::Char(c @ '1'..='5') => {
                let index = c as usize - '1' as usize;
                let query = self.recent.get(index)?.query.clone();
                self.input = query;
                self.submit(ctx);
                Some(Action::None)
            }
            KeyCode::Char('r') => {
                ctx.catalog.clear_error();
                self.submit(ctx);
                Some(Action::None)
            }
            _ => None,
        }
    }

    fn on_tick(&mut self, ctx: &AppContext) -> Option<Action> {
        if self.history.has_changed() {
            self.recent = self.history.recent_five();
        }

        if !self.catalog.has_changed().unwrap_or(false) {
            return None;
        }
        self.snapshot = self.catalog.borrow_and_update().clone();

        let error = self.snapshot.error.take()?;
        ctx.catalog.clear_error();
        Some(Action::Notify(Toast::error(error.to_string())))
    }
}
