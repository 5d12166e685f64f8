//! The archive storage contract.

use raidforge_types::{CharId, RaidId};

use crate::{ArchiveError, ParticipantRow, RaidDetail, RaidHeader};

/// Durable storage for finished raids.
///
/// The coordinator drives this in two steps: `create` at raid start (so
/// the id exists for correlation), `finalize` exactly once at raid end.
/// A raid that is cancelled simply never finalizes; its header stays
/// open-ended and is excluded from listings.
///
/// Finalization is a single logical transaction from the caller's
/// perspective: the end timestamp plus every participant row. Backends
/// are encouraged — not required — to make it atomic; the coordinator
/// treats a mid-write failure as best-effort and reports it.
///
/// # Trait bounds
///
/// `Send + Sync` so a coordinator shared across tasks can call the store
/// from any of them.
pub trait RaidArchive: Send + Sync {
    /// Writes an open-ended header and returns the new raid's id.
    fn create(
        &self,
        name: &str,
        leader: CharId,
        started_at: u64,
    ) -> impl std::future::Future<Output = Result<RaidId, ArchiveError>> + Send;

    /// Completes a header with its end timestamp and participant rows.
    ///
    /// Called exactly once per raid, at save time.
    fn finalize(
        &self,
        raid_id: RaidId,
        ended_at: u64,
        participants: Vec<ParticipantRow>,
    ) -> impl std::future::Future<Output = Result<(), ArchiveError>> + Send;

    /// Fetches one raid's header and rows, ordered by descending points.
    ///
    /// # Errors
    /// [`ArchiveError::NotFound`] if the id was never created.
    fn get_detail(
        &self,
        raid_id: RaidId,
    ) -> impl std::future::Future<Output = Result<RaidDetail, ArchiveError>> + Send;

    /// Most recent finalized headers, newest end time first.
    ///
    /// Open-ended headers (running or cancelled raids) never appear.
    fn list_recent(
        &self,
        limit: usize,
    ) -> impl std::future::Future<Output = Result<Vec<RaidHeader>, ArchiveError>> + Send;
}
