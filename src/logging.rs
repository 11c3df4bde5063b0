use std::fs::{self, File};
use std::path::Path;
use std::sync::{Mutex, Once};

use tracing_subscriber::EnvFilter;

use crate::errors::LedgerError;

static TRACING_INIT: Once = Once::new();

/// Sends tracing output to `path`, since the terminal belongs to the UI.
///
/// The filter comes from `RUST_LOG` and defaults to `expense_log=info`.
/// Only the first call installs a subscriber.
pub fn init_logging(path: &Path) -> Result<(), LedgerError> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = File::options().create(true).append(true).open(path)?;

    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("expense_log=info"));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .try_init();
    });
    Ok(())
}
