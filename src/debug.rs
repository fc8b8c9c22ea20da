// File logging, enabled with --debug
// The terminal UI owns stdout and stderr, so events go to a file in the temp dir

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "foosball-debug.log";
const DEFAULT_FILTER: &str = "foosball=debug";

pub fn log_path() -> PathBuf {
    std::env::temp_dir().join(LOG_FILE_NAME)
}

/// Install the global subscriber
///
/// # Arguments
/// * `enabled` - Whether debug logging should be enabled (controlled by --debug flag)
///
/// # Behavior
/// - If enabled=false: Returns immediately, events are discarded
/// - If enabled=true: Truncates the log file and routes every event there,
///   filtered by `RUST_LOG` (default `foosball=debug`)
pub fn init(enabled: bool) -> anyhow::Result<()> {
    if !enabled {
        return Ok(());
    }

    let path = log_path();
    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("installing log subscriber: {e}"))?;

    tracing::info!(path = %path.display(), "Debug logging started");
    Ok(())
}
