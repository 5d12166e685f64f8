//! Error types for host collaborator calls.

use raidforge_types::CharId;

/// Errors that can cross the host boundary.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// The identity service has never seen this character.
    #[error("unknown character {0}")]
    UnknownIdentity(CharId),

    /// The points ledger rejected or failed an operation.
    #[error("ledger error: {0}")]
    Ledger(String),

    /// A message could not be handed to the host for delivery.
    /// Delivery itself is best-effort and never reported back.
    #[error("delivery error: {0}")]
    Delivery(String),
}
