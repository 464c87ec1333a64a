//! nestkv usage walkthrough
//!
//! Runs a nested-transaction session against a `Database<String>` with
//! tracing output enabled. Set `RUST_LOG=nestkv=trace` for per-write logs.

use nestkv::{Database, NestError, Result};
use tracing_subscriber::{fmt, EnvFilter};

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,nestkv=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    tracing::info!("nestkv v{}", nestkv::VERSION);

    if let Err(e) = run() {
        tracing::error!("Demo failed: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut db: Database<String> = Database::new();

    // Seed the committed store through a top-level transaction
    db.start_transaction();
    db.set("user:1", "alice".to_string())?;
    db.set("user:2", "bob".to_string())?;
    db.commit()?;
    tracing::info!("Committed {} users", db.committed_len());

    // An outer transaction stages an update without publishing it
    db.start_transaction();
    db.set("user:1", "alice-renamed".to_string())?;

    // A nested transaction experiments and rolls back
    db.start_transaction();
    db.delete("user:2")?;
    match db.get("user:2") {
        Err(NestError::KeyNotFound) => {
            tracing::info!("user:2 staged as deleted inside the inner transaction")
        }
        other => tracing::warn!("Unexpected inner read: {:?}", other),
    }
    db.rollback()?;

    // The rollback discarded the delete; the outer rename is still staged
    tracing::info!("user:2 after inner rollback: {}", db.get("user:2")?);
    tracing::info!("user:1 staged in outer transaction: {}", db.get("user:1")?);

    db.commit()?;
    tracing::info!(
        "After outer commit: user:1 = {}, {} committed keys",
        db.get("user:1")?,
        db.committed_len()
    );

    // A top-level commit publishes only the keys its transaction touched;
    // user:2 did not survive the outer commit above.
    match db.get("user:2") {
        Err(NestError::KeyNotFound) => tracing::info!("user:2 was not carried over"),
        other => tracing::warn!("Unexpected final read: {:?}", other),
    }

    Ok(())
}
