use std::sync::Arc;

use flume::Receiver;

use crate::{
    catalog::testing::{FakeApi, catalog},
    event::events::Event,
    ui::context::AppContext,
};

/// A context backed by [`FakeApi`], plus the receiving end of its event bus.
pub fn context(api: Arc<FakeApi>) -> (AppContext, Receiver<Event>) {
    let (event_tx, event_rx) = flume::unbounded();
    let ctx = AppContext {
        catalog: Arc::new(catalog(api)),
        event_tx,
    };
    (ctx, event_rx)
}
