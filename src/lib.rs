pub mod catalog;
pub mod config;
pub mod event;
pub mod form;
pub mod http;
pub mod ui;
pub mod util;
