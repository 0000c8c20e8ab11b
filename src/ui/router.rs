use crate::event::events::Event;
use crate::ui::context::AppContext;
use crate::ui::state::{AppState, Route};
use crate::ui::traits::{Action, View};
use ratatui::Frame;
use ratatui::crossterm::event::KeyEvent;
use ratatui::layout::Rect;

/// A stack of views with the root (home) view at the bottom. Popped views
/// are dropped, which releases their subscriptions.
pub struct Router {
    stack: Vec<Box<dyn View>>,
}

impl Router {
    pub fn new(root: Box<dyn View>) -> Self {
        Self { stack: vec![root] }
    }

    pub fn push(&mut self, view: Box<dyn View>) {
        self.stack.push(view);
    }

    pub fn pop(&mut self) {
        if self.stack.len() > 1 {
            self.stack.pop();
        }
    }

    pub fn pop_to_root(&mut self) {
        self.stack.truncate(1);
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn current_route(&self) -> Route {
        self.stack
            .last()
            .map(|view| view.route())
            .unwrap_or_default()
    }

    pub fn hints(&self) -> &'static str {
        self.stack.last().map(|view| view.hints()).unwrap_or_default()
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, state: &AppState, ctx: &AppContext) {
        if let Some(view) = self.stack.last_mut() {
            view.render(f, area, state, ctx);
        }
    }

    pub async fn handle_input(
        &mut self,
        key: KeyEvent,
        state: &AppState,
        ctx: &AppContext,
    ) -> Option<Action> {
        match self.stack.last_mut() {
            Some(view) => view.handle_input(key, state, ctx).await,
            None => None,
        }
    }

    pub async fn on_event(&mut self, event: &Event, ctx: &AppContext) {
        for view in &mut self.stack {
            view.on_event(event, ctx).await;
        }
    }

    pub fn on_tick(&mut self, ctx: &AppContext) -> Option<Action> {
        self.stack.last_mut().and_then(|view| view.on_tick(ctx))
    }
}
