use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthChar;

use crate::{catalog::Album, util::colors};

pub const CARD_HEIGHT: u16 = 5;

/// How many cards fit side by side at a given terminal width.
pub fn items_per_row(width: u16) -> usize {
    match width {
        0..80 => 1,
        80..120 => 3,
        120..160 => 4,
        _ => 5,
    }
}

pub fn row_count(len: usize, per_row: usize) -> usize {
    len.div_ceil(per_row.max(1))
}

pub fn albums_for_row(albums: &[Album], row: usize, per_row: usize) -> &[Album] {
    let per_row = per_row.max(1);
    let start = (row * per_row).min(albums.len());
    let end = (start + per_row).min(albums.len());
    &albums[start..end]
}

/// Smallest first row that keeps `selected` on screen, moving as little as
/// possible from `first_row`.
pub fn scroll_to(selected: usize, per_row: usize, first_row: usize, visible_rows: usize) -> usize {
    let row = selected / per_row.max(1);
    let visible_rows = visible_rows.max(1);
    if row < first_row {
        row
    } else if row >= first_row + visible_rows {
        row + 1 - visible_rows
    } else {
        first_row
    }
}

pub fn truncate(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            if width > 0 {
                while used + 1 > width {
                    if let Some(last) = out.pop() {
                        used -= last.width().unwrap_or(0);
                    } else {
                        break;
                    }
                }
                out.push('…');
            }
            return out;
        }
        used += w;
        out.push(c);
    }
    out
}

pub struct AlbumGrid<'a> {
    albums: &'a [Album],
    per_row: usize,
    selected: Option<usize>,
    first_row: usize,
}

impl<'a> AlbumGrid<'a> {
    pub fn new(albums: &'a [Album], per_row: usize) -> Self {
        Self {
            albums,
            per_row: per_row.max(1),
            selected: None,
            first_row: 0,
        }
    }

    pub fn selected(mut self, selected: Option<usize>) -> Self {
        self.selected = selected;
        self
    }

    pub fn first_row(mut self, first_row: usize) -> Self {
        self.first_row = first_row;
        self
    }

    fn card(album: &Album, width: usize, is_selected: bool) -> Paragraph<'static> {
        let border_style = if is_selected {
            Style::default().fg(colors::PRIMARY)
        } else {
            Style::default().fg(colors::NEUTRAL)
        };
        let title_style = if is_selected {
            Style::default()
                .fg(colors::PRIMARY)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };

        let year = album
            .release_year()
            .map(|y| y.to_string())
            .unwrap_or_default();

        Paragraph::new(vec![
            Line::from(Span::styled(truncate(&album.name, width), title_style)),
            Line::from(truncate(&album.artist_names(), width)),
            Line::from(Span::styled(
                truncate(&format!("{} • {}", year, album.album_type), width),
                Style::default().fg(colors::TEXT),
            )),
        ])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_set(border::ROUNDED)
                .border_style(border_style),
        )
    }
}

impl Widget for AlbumGrid<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let visible_rows = (area.height / CARD_HEIGHT).max(1) as usize;
        let total_rows = row_count(self.albums.len(), self.per_row);
        let last_row = (self.first_row + visible_rows).min(total_rows);

        let row_areas = Layout::vertical(vec![Constraint::Length(CARD_HEIGHT); visible_rows])
            .split(area);
        let column_constraints = vec![Constraint::Ratio(1, self.per_row as u32); self.per_row];

        for (row, row_area) in (self.first_row..last_row).zip(row_areas.iter()) {
            let cells = Layout::horizontal(column_constraints.clone()).split(*row_area);
            let albums = albums_for_row(self.albums, row, self.per_row);

            for (column, (album, cell)) in albums.iter().zip(cells.iter()).enumerate() {
                let index = row * self.per_row + column;
                let text_width = cell.width.saturating_sub(2) as usize;
                Self::card(album, text_width, self.selected == Some(index)).render(*cell, buf);
            }
        }
    }
}
