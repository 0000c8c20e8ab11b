use std::{
    fs::{self, File},
    io,
    path::Path,
};

use color_eyre::eyre::Result;
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    EnvFilter, Layer, fmt::writer::BoxMakeWriter, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::config::Config;

pub const LOG_FILE: &str = concat!(env!("CARGO_PKG_NAME"), ".log");

fn open_log_file(dir: &Path) -> io::Result<File> {
    fs::create_dir_all(dir)?;
    File::create(dir.join(LOG_FILE))
}

/// The terminal belongs to the UI, so traces go to a file in the data dir.
/// Without a usable data dir, traces are discarded.
pub fn initialize_logging(config: &Config) -> Result<()> {
    let writer = match open_log_file(config.data_dir()) {
        Ok(file) => BoxMakeWriter::new(file),
        Err(_) => BoxMakeWriter::new(io::sink),
    };

    let filter = EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));

    let file_subscriber = tracing_subscriber::fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_writer(writer)
        .with_target(false)
        .with_ansi(false)
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(file_subscriber)
        .with(ErrorLayer::default())
        .try_init()?;

    Ok(())
}
