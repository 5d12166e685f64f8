//! In-memory reference implementation of [`RaidArchive`].

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use raidforge_types::{CharId, RaidId};
use tokio::sync::Mutex;

use crate::{ArchiveError, ParticipantRow, RaidArchive, RaidDetail, RaidHeader};

/// A raid archive backed by a `HashMap`.
///
/// Used by tests and demos, and fine for hosts that accept losing history
/// on restart. Interior mutability through a single async `Mutex` — the
/// archive sees one write per raid lifecycle, so contention is a non-issue.
#[derive(Default)]
pub struct MemoryArchive {
    raids: Mutex<HashMap<RaidId, (RaidHeader, Vec<ParticipantRow>)>>,
    next_id: AtomicU64,
}

impl MemoryArchive {
    pub fn new() -> Self {
        Self {
            raids: Mutex::new(HashMap::new()),
            // Ids start at 1; 0 reads too much like "absent".
            next_id: AtomicU64::new(1),
        }
    }
}

impl RaidArchive for MemoryArchive {
    async fn create(
        &self,
        name: &str,
        leader: CharId,
        started_at: u64,
    ) -> Result<RaidId, ArchiveError> {
        let raid_id = RaidId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let header = RaidHeader {
            raid_id,
            name: name.to_string(),
            leader,
            started_at,
            ended_at: 0,
        };

        self.raids.lock().await.insert(raid_id, (header, Vec::new()));
        tracing::debug!(%raid_id, name, "archive header created");
        Ok(raid_id)
    }

    async fn finalize(
        &self,
        raid_id: RaidId,
        ended_at: u64,
        participants: Vec<ParticipantRow>,
    ) -> Result<(), ArchiveError> {
        let mut raids = self.raids.lock().await;
        let (header, rows) = raids
            .get_mut(&raid_id)
            .ok_or(ArchiveError::NotFound(raid_id))?;

        header.ended_at = ended_at;
        *rows = participants;
        tracing::debug!(%raid_id, rows = rows.len(), "archive finalized");
        Ok(())
    }

    async fn get_detail(&self, raid_id: RaidId) -> Result<RaidDetail, ArchiveError> {
        let raids = self.raids.lock().await;
        let (header, rows) = raids
            .get(&raid_id)
            .ok_or(ArchiveError::NotFound(raid_id))?;

        let mut participants = rows.clone();
        participants.sort_by(|a, b| b.points.cmp(&a.points));

        Ok(RaidDetail {
            header: header.clone(),
            participants,
        })
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<RaidHeader>, ArchiveError> {
        let raids = self.raids.lock().await;
        let mut headers: Vec<RaidHeader> = raids
            .values()
            .map(|(header, _)| header.clone())
            .filter(RaidHeader::is_finalized)
            .collect();

        headers.sort_by(|a, b| b.ended_at.cmp(&a.ended_at));
        headers.truncate(limit);
        Ok(headers)
    }
}
