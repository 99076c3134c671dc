use std::fs::OpenOptions;
use std::path::Path;
use std::sync::{Arc, Once};

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

static TRACING_INIT: Once = Once::new();

/// Send tracing output to a log file next to the ledger at `info` level. The
/// terminal UI owns stdout, so nothing is ever written there.
pub(crate) fn init(log_path: &Path) -> Result<()> {
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;

    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::new("info");

        // Another subscriber may already be installed (e.g. by a test harness)
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Arc::new(log_file))
            .try_init();
    });
    Ok(())
}
