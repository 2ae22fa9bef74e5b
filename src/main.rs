//! Binary entry point: install logging, start with an empty record store, and
//! drive the Ratatui event loop until the user exits. Nothing is persisted.
use medicine_manager::config::{self, APP_VERSION};
use medicine_manager::{run_app, App, RecordStore};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    info!("Medicine Manager starting v{APP_VERSION}");

    let mut app = App::new(RecordStore::new());
    run_app(&mut app)
}
