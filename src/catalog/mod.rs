pub mod client;
pub mod history;
pub mod model;
pub mod storage;

pub use client::{CatalogClient, CatalogError, CatalogState};
pub use history::{HistoryView, SearchHistory};
pub use model::{Album, Artist, SearchQuery};

#[cfg(test)]
pub mod testing;
