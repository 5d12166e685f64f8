//! Typed results of coordinator operations.
//!
//! Every operation returns one of these instead of preformatted chat
//! text — rendering, highlighting, and pagination belong to the host.

use raidforge_archive::{RaidDetail, RaidHeader};
use raidforge_host::LeaderClaim;
use raidforge_session::{ActiveCheckEntry, AddAction, JoinAction};
use raidforge_types::{CharId, Character, PointsPreset, RaidId};

/// Result of starting a raid.
#[derive(Debug, Clone)]
pub struct StartOutcome {
    /// Archive correlation id for the new session.
    pub raid_id: RaidId,
    /// Whether the initiator also took the leader role. The session is
    /// created either way.
    pub leadership: LeaderClaim,
    /// How-to-join text for distribution to prospective raiders.
    pub join_instructions: String,
}

/// Result of a join request.
#[derive(Debug, Clone)]
pub struct JoinOutcome {
    /// Which roster transition the join performed.
    pub action: JoinAction,
    /// Whether the joiner still needs an invitation to the raid channel
    /// (only ever set for brand-new roster entries; membership state is
    /// the host's call).
    pub needs_invite: bool,
}

/// Result of a privileged add.
#[derive(Debug, Clone)]
pub struct AddOutcome {
    pub action: AddAction,
    /// As in [`JoinOutcome::needs_invite`].
    pub needs_invite: bool,
}

/// Result of one point-distribution pass over the roster.
///
/// The pass is best-effort: one participant's failure never aborts the
/// rest, so all four tallies can be non-zero at once.
#[derive(Debug, Clone)]
pub struct DistributeOutcome {
    /// The preset that was applied.
    pub preset: PointsPreset,
    /// Raiders whose account was granted the preset amount.
    pub granted: usize,
    /// Active raiders skipped because their account is disabled.
    pub disabled: usize,
    /// Raiders skipped because they are inactive.
    pub inactive: usize,
    /// Per-participant grant failures, reported but not fatal.
    pub failed: Vec<(CharId, String)>,
}

/// Result of an end-and-save request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndOutcome {
    /// No points were distributed and `force` was off: the session is
    /// untouched and the caller should ask for confirmation.
    ConfirmationRequired,
    /// The raid was archived and the session discarded.
    Saved {
        raid_id: RaidId,
        participants: usize,
    },
}

/// Read-only snapshot of the running raid.
#[derive(Debug, Clone)]
pub struct RaidStatus {
    pub name: String,
    /// The character that started the raid.
    pub leader: Character,
    /// Unix seconds.
    pub started_at: u64,
    pub is_open: bool,
    /// Currently active raiders, as their representing characters.
    pub active_roster: Vec<Character>,
}

/// The typed reply of [`RaidCoordinator::execute`](crate::RaidCoordinator::execute).
///
/// One variant per command, carrying the matching outcome.
#[derive(Debug, Clone)]
pub enum RaidReply {
    Started(StartOutcome),
    Cancelled,
    Joined(JoinOutcome),
    Left,
    Added(AddOutcome),
    Kicked,
    Opened,
    Closed,
    PointsDistributed(DistributeOutcome),
    End(EndOutcome),
    Announced { notified: usize },
    Status(RaidStatus),
    ActiveCheck(Vec<Vec<ActiveCheckEntry>>),
    History(Vec<RaidHeader>),
    HistoryDetail(RaidDetail),
}
