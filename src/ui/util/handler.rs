use std::time::Instant;

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{info, warn};

use crate::{
    event::events::Event,
    ui::{
        app::App,
        components::{header, toast::Toast},
        input::InputHandler,
        state::Route,
        traits::Action,
        tui::{TerminalEvent, Tui},
        views::{AlbumDetail, Registration},
    },
    util::{
        open::open_in_browser,
        task::{ALBUM_LOOKUP, AUTHENTICATE, REDIRECT, SEARCH},
    },
};

pub struct EventHandler;

impl EventHandler {
    pub async fn handle_events(app: &mut App, tui: &mut Tui) -> color_eyre::Result<bool> {
        let mut should_render = false;
        if let Some(evt) = tui.next().await {
            if Self::handle_event(app, evt, tui).await? {
                should_render = true;
            }
        }

        while let Ok(evt) = app.event_rx.try_recv() {
            Self::handle_action(app, evt).await;
            should_render = true;
        }

        Ok(should_render)
    }

    pub async fn handle_event(
        app: &mut App,
        evt: TerminalEvent,
        tui: &mut Tui,
    ) -> color_eyre::Result<bool> {
        match evt {
            TerminalEvent::Init => Self::handle_action(app, Event::Authenticate).await,
            TerminalEvent::Quit => app.should_quit = true,
            TerminalEvent::FocusGained => {
                app.has_focus = true;
                tui.clear()?;
            }
            TerminalEvent::FocusLost => app.has_focus = false,
            TerminalEvent::Resize(width, _) => app.state.ui.viewport_width = width,
            TerminalEvent::Key(key) => Self::handle_key_event(app, key).await,
            TerminalEvent::Tick => {
                Self::on_tick(app).await;
                return Ok(app.has_focus);
            }
        }

        Ok(true)
    }

    async fn on_tick(app: &mut App) {
        if app
            .state
            .ui
            .toast
            .as_ref()
            .is_some_and(|toast| toast.is_expired(Instant::now()))
        {
            app.state.ui.toast = None;
        }

        if let Some(action) = app.router.on_tick(&app.ctx) {
            Self::dispatch_action(app, action).await;
        }
    }

    pub async fn handle_action(app: &mut App, evt: Event) {
        app.router.on_event(&evt, &app.ctx).await;

        match evt {
            Event::Authenticate => {
                let catalog = app.ctx.catalog.clone();
                let tx = app.ctx.event_tx.clone();
                app.task_manager.spawn(
                    AUTHENTICATE,
                    tokio::spawn(async move {
                        let outcome = catalog.authenticate().await;
                        let _ = tx.send(Event::Authenticated(outcome));
                    }),
                );
            }
            Event::Authenticated(Ok(())) => {
                if let Some(route) = app.pending_route.take() {
                    Self::navigate(app, route);
                }
            }
            Event::Authenticated(Err(e)) => {
                warn!("Could not connect to Spotify: {}", e);
            }
            Event::Search(query) => {
                let catalog = app.ctx.catalog.clone();
                app.task_manager.spawn(
                    SEARCH,
                    tokio::spawn(async move {
                        catalog.search(&query).await;
                    }),
                );
            }
            Event::AlbumLoaded { .. } => {}
            Event::Navigate(route) => Self::navigate(app, route),
            Event::NavigateAfter(route, delay) => {
                let tx = app.ctx.event_tx.clone();
                app.task_manager.spawn(
                    REDIRECT,
                    tokio::spawn(async move {
                        tokio::time::sleep(delay).await;
                        let _ = tx.send(Event::Navigate(route));
                    }),
                );
            }
            Event::Notify(toast) => app.state.ui.toast = Some(toast),
        }
    }

    pub fn navigate(app: &mut App, route: Route) {
        if app.router.current_route() == route {
            return;
        }
        info!("Navigating to {}", route.path());

        match route {
            Route::Home => {
                app.task_manager.abort(ALBUM_LOOKUP);
                app.task_manager.abort(REDIRECT);
                app.router.pop_to_root();
            }
            Route::Registration => {
                app.task_manager.abort(ALBUM_LOOKUP);
                app.router.pop_to_root();
                app.router.push(Box::new(Registration::new()));
            }
            Route::AlbumDetail(id) => {
                app.task_manager.abort(REDIRECT);
                app.router.push(Box::new(AlbumDetail::new(id.clone())));
                if id.trim().is_empty() {
                    return;
                }

                let catalog = app.ctx.catalog.clone();
                let tx = app.ctx.event_tx.clone();
                app.task_manager.spawn(
                    ALBUM_LOOKUP,
                    tokio::spawn(async move {
                        let outcome = catalog.lookup(&id).await;
                        let _ = tx.send(Event::AlbumLoaded { id, outcome });
                    }),
                );
            }
        }
    }

    fn open_external(app: &mut App, url: &str) {
        match open_in_browser(url) {
            Ok(()) => app.state.ui.toast = Some(Toast::info("Opened in browser")),
            Err(e) => {
                warn!("Failed to open {}: {}", url, e);
                app.state.ui.toast = Some(Toast::error(format!("Could not open {url}")));
            }
        }
    }

    async fn handle_key_event(app: &mut App, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL {
            app.should_quit = true;
            return;
        }

        let action = app.router.handle_input(key, &app.state, &app.ctx).await;
        if let Some(action) = action {
            Self::dispatch_action(app, action).await;
            return;
        }

        if let Some(action) = InputHandler::handle_key(key) {
            Self::dispatch_action(app, action).await;
        }
    }

    async fn dispatch_action(app: &mut App, action: Action) {
        match action {
            Action::Quit => app.should_quit = true,
            Action::Back => {
                app.task_manager.abort(ALBUM_LOOKUP);
                app.router.pop();
            }
            Action::Navigate(route) => Self::navigate(app, route),
            Action::NextTab => {
                let route = header::next_tab(&app.router.current_route());
                Self::navigate(app, route);
            }
            Action::PreviousTab => {
                let route = header::prev_tab(&app.router.current_route());
                Self::navigate(app, route);
            }
            Action::Reconnect => {
                app.state.ui.toast = Some(Toast::info("Reconnecting to Spotify..."));
                Self::handle_action(app, Event::Authenticate).await;
            }
            Action::Open(url) => Self::open_external(app, &url),
            Action::Notify(toast) => app.state.ui.toast = Some(toast),
            Action::None => {}
        }
    }
}
