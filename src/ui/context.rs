use std::sync::Arc;

use flume::Sender;

use crate::{catalog::CatalogClient, event::events::Event};

/// Shared services handed to every view.
pub struct AppContext {
    pub catalog: Arc<CatalogClient>,
    pub event_tx: Sender<Event>,
}
