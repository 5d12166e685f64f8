//! Archived raid records.

use raidforge_types::{CharId, RaidId};
use serde::{Deserialize, Serialize};

/// The header row for one raid.
///
/// Written open-ended (`ended_at == 0`) at raid start and completed by
/// `finalize`. Immutable once finalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaidHeader {
    pub raid_id: RaidId,
    pub name: String,
    /// The character that started the raid.
    pub leader: CharId,
    /// Unix seconds.
    pub started_at: u64,
    /// Unix seconds; 0 while the raid is still running (or was cancelled).
    pub ended_at: u64,
}

impl RaidHeader {
    /// Whether this raid finished and was saved. Headers that never
    /// finalize (cancelled raids) stay open-ended forever.
    pub fn is_finalized(&self) -> bool {
        self.ended_at != 0
    }

    /// Raid duration in seconds, if finished.
    pub fn duration_secs(&self) -> Option<u64> {
        self.is_finalized()
            .then(|| self.ended_at.saturating_sub(self.started_at))
    }
}

/// One participant's final outcome in a finished raid.
///
/// `raider_id` is the character that was *active* when the raid ended —
/// alternate switches during the raid are not retroactively reconciled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantRow {
    pub raider_id: CharId,
    pub points: i64,
    pub left_at: Option<u64>,
    pub kicked_at: Option<u64>,
    pub kick_reason: Option<String>,
}

/// A finished raid with its participant rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaidDetail {
    pub header: RaidHeader,
    /// Ordered by descending points.
    pub participants: Vec<ParticipantRow>,
}

impl RaidDetail {
    /// Sum of points over all participants.
    pub fn total_points(&self) -> i64 {
        self.participants.iter().map(|p| p.points).sum()
    }
}
