//! Database schema definitions and column families.

/// Column family names for the `RocksDB` database.
pub mod cf {
    /// Documents of every collection, keyed by `collection || 0x00 || document_id`.
    pub const DOCUMENTS: &str = "documents";
}

/// Field under which every stored document carries its identifier.
pub const ID_FIELD: &str = "_id";

/// Returns all column family names for database initialization.
#[must_use]
pub fn all_column_families() -> Vec<&'static str> {
    vec![cf::DOCUMENTS]
}
