use std::time::{Duration, Instant};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    symbols::border,
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::util::colors;

pub const ERROR_DURATION: Duration = Duration::from_secs(5);
pub const NOTICE_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

/// A transient notification shown above the active view.
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub expires_at: Instant,
}

impl Toast {
    pub fn new(message: impl Into<String>, kind: ToastKind, duration: Duration) -> Self {
        Self {
            message: message.into(),
            kind,
            expires_at: Instant::now() + duration,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Info, NOTICE_DURATION)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Success, NOTICE_DURATION)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Error, ERROR_DURATION)
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    fn color(&self) -> ratatui::style::Color {
        match self.kind {
            ToastKind::Info => colors::TEXT,
            ToastKind::Success => colors::SUCCESS,
            ToastKind::Error => colors::ERROR,
        }
    }

    /// Centered at the top of `area`, sized to the message.
    pub fn area(&self, area: Rect) -> Rect {
        let width = (self.message.width() as u16)
            .saturating_add(4)
            .min(area.width);
        let inner_width = width.saturating_sub(2).max(1);
        let lines = (self.message.width() as u16).div_ceil(inner_width).max(1);
        let height = (lines + 2).min(area.height);

        Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y,
            width,
            height,
        }
    }
}

impl Widget for &Toast {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let toast_area = self.area(area);
        if toast_area.width < 3 || toast_area.height < 3 {
            return;
        }

        Clear.render(toast_area, buf);
        let style = Style::default().fg(self.color());
        Paragraph::new(self.message.as_str())
            .style(style.add_modifier(Modifier::BOLD))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_set(border::ROUNDED)
                    .border_style(style)
                    .style(Style::default().bg(colors::BACKGROUND)),
            )
            .render(toast_area, buf);
    }
}
