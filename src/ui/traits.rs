use async_trait::async_trait;
use ratatui::crossterm::event::KeyEvent;
use ratatui::{Frame, layout::Rect};

use crate::{
    event::events::Event,
    ui::{
        components::toast::Toast,
        context::AppContext,
        state::{AppState, Route},
    },
};

#[derive(Debug, Clone)]
pub enum Action {
    Quit,
    Back,
    Navigate(Route),
    NextTab,
    PreviousTab,
    Reconnect,
    /// Open a web link outside the terminal.
    Open(String),
    Notify(Toast),
    /// Key consumed, nothing else to do.
    None,
}

#[async_trait]
pub trait View: Send {
    fn route(&self) -> Route;

    /// Key bindings shown in the footer.
    fn hints(&self) -> &'static str {
        ""
    }

    fn render(&mut self, f: &mut Frame, area: Rect, state: &AppState, ctx: &AppContext);

    async fn handle_input(
        &mut self,
        key: KeyEvent,
        state: &AppState,
        ctx: &AppContext,
    ) -> Option<Action>;

    async fn on_event(&mut self, _event: &Event, _ctx: &AppContext) {}

    /// Runs every tick while the view is on top of the stack.
    fn on_tick(&mut self, _ctx: &AppContext) -> Option<Action> {
        None
    }
}
