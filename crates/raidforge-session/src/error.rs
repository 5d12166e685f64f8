//! Error types for roster operations.

use raidforge_types::CharId;

/// Errors that can occur while mutating a raid's roster.
///
/// All of these are refusals, not failures: the session is left exactly
/// as it was, and each maps to a user-facing message at the host layer.
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    /// The raid is closed and the operation requires open admission.
    #[error("the raid is closed")]
    SessionClosed,

    /// No raider exists for the given main identity.
    #[error("{0} is not participating in the raid")]
    NotParticipating(CharId),

    /// The raider is already active on the given character.
    #[error("{0} is already participating in the raid")]
    AlreadyParticipating(CharId),

    /// Leave requested by a raider who is already inactive.
    #[error("{0} is not active in the raid")]
    NotActive(CharId),

    /// Kick requested for a raider who is already inactive.
    #[error("{0} is already set as inactive")]
    AlreadyInactive(CharId),

    /// Open requested while the raid is already open.
    #[error("the raid is already open")]
    AlreadyOpen,

    /// Close requested while the raid is already closed.
    #[error("the raid is already closed")]
    AlreadyClosed,
}
