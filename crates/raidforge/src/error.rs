//! Unified error type for the Raidforge coordinator.

use raidforge_archive::ArchiveError;
use raidforge_host::HostError;
use raidforge_session::RosterError;

/// Top-level error returned by coordinator operations.
///
/// Wraps the per-layer errors and adds the conditions only the
/// coordinator can detect (session presence, preset lookup, announce
/// capability). The `#[from]` attributes let `?` convert layer errors
/// automatically. Every variant is locally recoverable: the host maps it
/// to a user-facing message and the coordinator stays in a well-defined
/// state.
#[derive(Debug, thiserror::Error)]
pub enum RaidforgeError {
    /// No raid is running and the operation needs one.
    #[error("no raid is running")]
    NoActiveSession,

    /// Start was requested while a raid is already running.
    #[error("the raid \"{0}\" is already running")]
    SessionAlreadyActive(String),

    /// The ledger's preset catalog has no entry under this name.
    #[error("no point preset named \"{0}\"")]
    UnknownPreset(String),

    /// The host cannot send mass messages, so announcements are off.
    #[error("the host has no mass messaging capability")]
    AnnounceUnavailable,

    /// A roster-level refusal (closed raid, not participating, ...).
    #[error(transparent)]
    Roster(#[from] RosterError),

    /// An archive-level failure (lookup miss, storage).
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    /// A host-collaborator failure (unknown identity, ledger).
    #[error(transparent)]
    Host(#[from] HostError),
}
