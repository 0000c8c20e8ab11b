use std::{fs, path::Path, sync::Arc};

use flume::Receiver;
use ratatui::Frame;
use tracing::{info, warn};

use crate::{
    catalog::{
        CatalogClient, SearchHistory,
        storage::{FileStore, KeyValueStore, MemoryStore},
    },
    config::Config,
    event::events::Event,
    http::SpotifyApi,
    util::task::TaskManager,
};

use super::{
    context::AppContext,
    layout::AppLayout,
    router::Router,
    state::{AppState, Route},
    tui::{self, TerminalEvent},
    util::handler::EventHandler,
    views::Home,
};

pub struct App {
    pub event_rx: Receiver<Event>,
    pub router: Router,
    pub state: AppState,
    pub ctx: AppContext,
    pub task_manager: TaskManager,
    /// Route requested on start-up, opened once the client is authenticated.
    pub pending_route: Option<Route>,
    pub has_focus: bool,
    pub should_quit: bool,
}

impl App {
    pub async fn new(config: Config, initial_route: Route) -> color_eyre::Result<Self> {
        let (event_tx, event_rx) = flume::unbounded();

        let history = SearchHistory::new(history_store(config.data_dir()));
        let api = Arc::new(SpotifyApi::new(&config)?);
        let catalog = Arc::new(CatalogClient::new(api, config.credentials.clone(), history));

        let ctx = AppContext { catalog, event_tx };
        let router = Router::new(Box::new(Home::new(&ctx)));

        Ok(Self::with_parts(event_rx, router, ctx, initial_route))
    }

    pub fn with_parts(
        event_rx: Receiver<Event>,
        router: Router,
        ctx: AppContext,
        initial_route: Route,
    ) -> Self {
        Self {
            event_rx,
            router,
            state: AppState::default(),
            ctx,
            task_manager: TaskManager::new(),
            pending_route: (initial_route != Route::Home).then_some(initial_route),
            has_focus: true,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> color_eyre::Result<()> {
        let mut tui = tui::Tui::new()?;
        tui.enter()?;

        self.state.ui.viewport_width = tui.size()?.width;
        EventHandler::handle_event(self, TerminalEvent::Init, &mut tui).await?;
        while !self.should_quit {
            if self.has_focus {
                tui.draw(|f| self.ui(f))?;
            }

            EventHandler::handle_events(self, &mut tui).await?;
        }

        self.task_manager.abort_all();
        tui.exit()?;
        Ok(())
    }

    fn ui(&mut self, frame: &mut Frame) {
        let area = frame.area();
        AppLayout::new(self).render(frame, area);
    }
}

/// File-backed history store, or an in-memory one when `dir` is unusable.
fn history_store(dir: &Path) -> Arc<dyn KeyValueStore> {
    match fs::create_dir_all(dir) {
        Ok(()) => {
            info!("Storing search history in {}", dir.display());
            Arc::new(FileStore::new(dir))
        }
        Err(e) => {
            warn!("Search history will not persist: {}", e);
            Arc::new(MemoryStore::new())
        }
    }
}
