//! Print every stored note. Credentials come from `config.toml` / the
//! environment (e.g. `DATABASE_PASSWORD`), exactly as for the server.

use anyhow::Context;
use notes_api::Settings;
use notes_store::NoteStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    notes_server::init_tracing();

    let settings = Settings::new().context("Failed to load settings")?;
    let store = notes_server::connect(&settings)
        .await
        .context("Failed to connect to database")?;

    let notes = store.list().await;
    store.close().await;

    for note in notes.context("Failed to list notes")? {
        let important = if note.important { "important" } else { "-" };
        println!(
            "{} {} [{}] {}",
            note.id,
            note.date.to_rfc3339(),
            important,
            note.content
        );
    }
    Ok(())
}
