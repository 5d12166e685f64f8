//! Raid-leader role hook.

use raidforge_types::Character;

/// Outcome of attempting to take the leader role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaderClaim {
    /// The candidate now holds the leader role.
    Granted,
    /// Someone who outranks the candidate already holds it. The raid
    /// session is created anyway — leadership and the session are
    /// independent authorities — but the caller is told who won.
    Denied { current: Character },
}

/// The host's separately-tracked "current leader" role.
///
/// Distinct from the starter the session records permanently: this role
/// can be reassigned over the raid's lifetime by the host's own leader
/// commands, without touching the session.
pub trait LeaderTracker: Send + Sync + 'static {
    /// Tries to establish `candidate` as the current leader.
    fn claim(
        &self,
        candidate: &Character,
    ) -> impl std::future::Future<Output = LeaderClaim> + Send;
}
