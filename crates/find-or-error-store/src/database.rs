//! Opening and closing the persistent store.

use crate::config::StoreConfig;
use crate::error::Result;
use crate::rocks::RocksStore;

/// Open the `RocksDB` store described by `config`.
///
/// # Errors
///
/// Returns an error if the database cannot be opened.
pub fn connect(config: &StoreConfig) -> Result<RocksStore> {
    let store = RocksStore::open_with(&config.path, config.create_if_missing)?;
    tracing::info!(path = %config.path, "Connected to document store");
    Ok(store)
}

/// Flush and close a store opened with [`connect`].
///
/// # Errors
///
/// Returns an error if pending writes cannot be flushed.
pub fn disconnect(store: RocksStore) -> Result<()> {
    store.flush()?;
    drop(store);
    tracing::info!("Disconnected from document store");
    Ok(())
}
