use std::env::var;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing::{level_filters::LevelFilter, warn};
use tracing_subscriber::{
    Layer, filter::EnvFilter, fmt::writer::BoxMakeWriter, layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Initialize tracing to stderr with the default level.
pub fn init_tracing() {
    initialize_tracing(LevelFilter::INFO, BoxMakeWriter::new(std::io::stderr), true);
}

/// Initialize tracing while a TUI owns the terminal.
///
/// Logs are appended to `path`, or discarded when no file is configured.
pub fn init_tracing_to_file(path: Option<&Path>) -> std::io::Result<()> {
    let writer = match path {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(std::io::sink),
    };
    initialize_tracing(LevelFilter::INFO, writer, false);
    Ok(())
}

fn initialize_tracing(level: LevelFilter, writer: BoxMakeWriter, ansi: bool) {
    let env_filter = EnvFilter::builder().with_default_directive(level.into()).from_env_lossy();

    let log_format = var("RUST_LOG_FORMAT")
        .inspect_err(|error| {
            warn!("Failed to read RUST_LOG_FORMAT, falling back to default: {error}")
        })
        .unwrap_or_default();

    let log_layer = match log_format.as_str() {
        "json" => tracing_subscriber::fmt::layer()
            .json()
            .with_writer(writer)
            .with_filter(env_filter)
            .boxed(),
        _ => tracing_subscriber::fmt::layer()
            .compact()
            .without_time()
            .with_ansi(ansi)
            .with_writer(writer)
            .with_filter(env_filter)
            .boxed(),
    };

    // A second init (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry().with(log_layer).try_init();
}
