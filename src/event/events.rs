use std::time::Duration;

use crate::{
    catalog::{Album, CatalogError},
    ui::{components::toast::Toast, state::Route},
};

#[derive(Debug, Clone)]
pub enum Event {
    // Events
    Authenticated(Result<(), CatalogError>),
    AlbumLoaded {
        id: String,
        outcome: Result<Album, CatalogError>,
    },

    // Commands
    Authenticate,
    Search(String),
    Navigate(Route),
    NavigateAfter(Route, Duration),
    Notify(Toast),
}
