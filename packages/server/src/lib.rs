//! Process bootstrap shared by the `notes-server` and `dump-notes` binaries.

use notes_api::Settings;
use notes_store::PgStore;
use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Connect to the configured database and apply migrations.
pub async fn connect(settings: &Settings) -> anyhow::Result<PgStore> {
    tracing::info!(
        host = %settings.database.host,
        database = %settings.database.name,
        "connecting to database"
    );
    let store = PgStore::connect(&settings.database.url(), settings.database.pool).await?;
    Ok(store)
}
