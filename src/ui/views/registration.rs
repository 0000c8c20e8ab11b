use std::time::Duration;

use async_trait::async_trait;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tracing::info;

use crate::{
    event::events::Event,
    form::{Field, RegistrationForm, SubmitOutcome},
    ui::{
        components::toast::Toast,
        context::AppContext,
        state::{AppState, Route},
        traits::{Action, View},
    },
    util::colors,
};

pub const REDIRECT_DELAY: Duration = Duration::from_secs(2);
const FIELD_HEIGHT: u16 = 4;

pub struct Registration {
    form: RegistrationForm,
    focus: Field,
    hide_password: bool,
}

impl Default for Registration {
    fn default() -> Self {
        Self::new()
    }
}

impl Registration {
    pub fn new() -> Self {
        Self {
            form: RegistrationForm::new(),
            focus: Field::Email,
            hide_password: true,
        }
    }

    fn focus_on(&mut self, field: Field) {
        self.form.touch(self.focus);
        self.focus = field;
    }

    fn submit(&mut self, ctx: &AppContext) -> Action {
        match self.form.submit() {
            SubmitOutcome::Accepted(registration) => {
                info!("Registered user {}", registration.username);
                self.focus = Field::Email;
                let _ = ctx
                    .event_tx
                    .send(Event::NavigateAfter(Route::Home, REDIRECT_DELAY));
                Action::Notify(Toast::success("Registration successful!"))
            }
            SubmitOutcome::Rejected => {
                Action::Notify(Toast::error("Please fix the errors in the form"))
            }
        }
    }

    fn display_value(&self, field: Field) -> String {
        let value = self.form.value(field);
        if field == Field::Password && self.hide_password {
            "•".repeat(value.chars().count())
        } else {
            value.to_string()
        }
    }

    fn render_field(&self, f: &mut Frame, area: Rect, field: Field) {
        let focused = self.focus == field;
        let error = self.form.error_message(field);

        let border_color = match (focused, error.is_some()) {
            (_, true) => colors::ERROR,
            (true, false) => colors::PRIMARY,
            (false, false) => colors::NEUTRAL,
        };

        let mut title = field.label().to_string();
        if field == Field::Password {
            title.push_str(if self.hide_password {
                " (Ctrl+T show)"
            } else {
                " (Ctrl+T hide)"
            });
        }

        let [input_area, error_area] =
            Layout::vertical([Constraint::Length(3), Constraint::Length(1)]).areas(area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(border_color));
        f.render_widget(
            Paragraph::new(self.display_value(field)).block(block),
            input_area,
        );

        if focused {
            let len = self.display_value(field).chars().count() as u16;
            f.set_cursor_position((
                (input_area.x + 1 + len).min(input_area.right().saturating_sub(2)),
                input_area.y + 1,
            ));
        }

        if let Some(message) = error {
            f.render_widget(
                Paragraph::new(Span::styled(message, Style::default().fg(colors::ERROR))),
                error_area,
            );
        }
    }
}

#[async_trait]
impl View for Registration {
    fn route(&self) -> Route {
        Route::Registration
    }

    fn hints(&self) -> &'static str {
        "↑↓ move • Enter register • Ctrl+T show password • Ctrl+L reset • Esc home"
    }

    fn render(&mut self, f: &mut Frame, area: Rect, _state: &AppState, _ctx: &AppContext) {
        let width = area.width.min(72);
        let area = Rect {
            x: area.x + (area.width - width) / 2,
            width,
            ..area
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(FIELD_HEIGHT),
                Constraint::Length(FIELD_HEIGHT),
                Constraint::Length(FIELD_HEIGHT),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(area);

        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "Create an account",
                Style::default()
                    .fg(colors::PRIMARY)
                    .add_modifier(Modifier::BOLD),
            ))),
            chunks[0],
        );

        for (field, chunk) in Field::ALL.into_iter().zip(&chunks[1..4]) {
            self.render_field(f, *chunk, field);
        }

        let submit_style = if self.form.is_valid() {
            Style::default()
                .fg(colors::BACKGROUND)
                .bg(colors::PRIMARY)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors::NEUTRAL)
        };
        f.render_widget(
            Paragraph::new(Span::styled(" Register ", submit_style)).centered(),
            chunks[4],
        );
    }

    async fn handle_input(
        &mut self,
        key: KeyEvent,
        _state: &AppState,
        ctx: &AppContext,
    ) -> Option<Action> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('t') if ctrl => {
                self.hide_password = !self.hide_password;
                Some(Action::None)
            }
            KeyCode::Char('l') if ctrl => {
                self.form.reset();
                self.focus = Field::Email;
                Some(Action::None)
            }
            KeyCode::Char(_) if ctrl => None,
            KeyCode::Tab | KeyCode::Down => {
                self.focus_on(self.focus.next());
                Some(Action::None)
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus_on(self.focus.prev());
                Some(Action::None)
            }
            KeyCode::Enter => Some(self.submit(ctx)),
            KeyCode::Backspace => {
                self.form.pop_char(self.focus);
                Some(Action::None)
            }
            KeyCode::Char(c) => {
                self.form.push_char(self.focus, c);
                Some(Action::None)
            }
            KeyCode::Esc => Some(Action::Navigate(Route::Home)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{catalog::testing::FakeApi, ui::testing::context};
    use std::sync::Arc;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    async fn fill(view: &mut Registration, text: &str, ctx: &AppContext) {
        let state = AppState::default();
        for c in text.chars() {
            view.handle_input(key(KeyCode::Char(c)), &state, ctx).await;
        }
    }

    #[tokio::test]
    async fn test_valid_submit_notifies_and_schedules_redirect() {
        let (ctx, rx) = context(Arc::new(FakeApi::default()));
        let state = AppState::default();
        let mut view = Registration::new();

        fill(&mut view, "user@example.com", &ctx).await;
        view.handle_input(key(KeyCode::Tab), &state, &ctx).await;
        fill(&mut view, "alice", &ctx).await;
        view.handle_input(key(KeyCode::Tab), &state, &ctx).await;
        fill(&mut view, "Secret123", &ctx).await;

        match view.handle_input(key(KeyCode::Enter), &state, &ctx).await {
            Some(Action::Notify(toast)) => assert_eq!(toast.message, "Registration successful!"),
            other => panic!("unexpected action: {other:?}"),
        }
        match rx.try_recv() {
            Ok(Event::NavigateAfter(route, delay)) => {
                assert_eq!(route, Route::Home);
                assert_eq!(delay, REDIRECT_DELAY);
            }
            other => panic!("unexpected event: {other:?}"),
        }
        assert_eq!(view.form.value(Field::Email), "");
        assert_eq!(view.focus, Field::Email);
    }

    #[tokio::test]
    async fn test_invalid_submit_shows_errors_without_redirect() {
        let (ctx, rx) = context(Arc::new(FakeApi::default()));
        let mut view = Registration::new();

        fill(&mut view, "not-an-email", &ctx).await;
        let action = view
            .handle_input(key(KeyCode::Enter), &AppState::default(), &ctx)
            .await;

        match action {
            Some(Action::Notify(toast)) => {
                assert_eq!(toast.message, "Please fix the errors in the form")
            }
            other => panic!("unexpected action: {other:?}"),
        }
        assert!(rx.try_recv().is_err());
        assert_eq!(
            view.form.error_message(Field::Username),
            Some("Username is required")
        );
    }

    #[tokio::test]
    async fn test_leaving_field_marks_it_touched() {
        let (ctx, _rx) = context(Arc::new(FakeApi::default()));
        let mut view = Registration::new();

        view.handle_input(key(KeyCode::Down), &AppState::default(), &ctx)
            .await;

        assert_eq!(view.focus, Field::Username);
        assert_eq!(view.form.error_message(Field::Email), Some("Email is required"));
        assert_eq!(view.form.error_message(Field::Username), None);
    }

    #[tokio::test]
    async fn test_password_visibility_and_reset() {
        let (ctx, _rx) = context(Arc::new(FakeApi::default()));
        let state = AppState::default();
        let mut view = Registration::new();
        view.focus = Field::Password;

        fill(&mut view, "Ab1", &ctx).await;
        assert_eq!(view.display_value(Field::Password), "•••");

        let toggle = KeyEvent::new(KeyCode::Char('t'), KeyModifiers::CONTROL);
        view.handle_input(toggle, &state, &ctx).await;
        assert_eq!(view.display_value(Field::Password), "Ab1");

        let reset = KeyEvent::new(KeyCode::Char('l'), KeyModifiers::CONTROL);
        view.handle_input(reset, &state, &ctx).await;
        assert_eq!(view.form.value(Field::Password), "");
        assert_eq!(view.focus, Field::Email);
        assert!(!view.form.is_touched());
    }
}
