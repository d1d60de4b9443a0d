//! Init command - Bootstraps or verifies the storage file.

use crate::cli::args::InitArgs;
use crate::config::Config;
use crate::errors::AppResult;
use crate::store::RecordStore;

/// Execute the init command: open the store (creating the file when
/// absent) and report what it holds.
pub async fn execute(args: InitArgs, mut config: Config) -> AppResult<()> {
    if let Some(path) = args.storage {
        config.storage_path = path;
    }

    let store = RecordStore::open(config.storage_path)?;
    let doc = store.document();

    tracing::info!(
        path = %store.path().display(),
        users = doc.main.len(),
        first_names = doc.first_names.len(),
        second_names = doc.second_names.len(),
        birth_dates = doc.birth_dates.len(),
        "storage ready"
    );

    Ok(())
}
