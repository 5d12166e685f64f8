//! Error types for the archive layer.

use raidforge_types::RaidId;

/// Errors that can occur during archive operations.
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    /// No raid exists under the given id (or its header was never
    /// finalized and the operation only accepts finished raids).
    #[error("no archived raid {0}")]
    NotFound(RaidId),

    /// The backing store failed. Carries the store's own description —
    /// the core can't do better than report it.
    #[error("archive storage error: {0}")]
    Storage(String),
}
