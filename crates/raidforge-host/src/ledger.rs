//! Points ledger hook.

use raidforge_types::{CharId, PointsPreset};

use crate::HostError;

/// The state of one participant's point account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerAccount {
    /// Disabled accounts never receive grants; distributions log a
    /// "missed points" entry for them instead.
    pub disabled: bool,
}

/// The host's point account service, keyed by main identity.
///
/// Grants and log entries always name the acting character (`actor`) so
/// the ledger's own audit trail shows who dished points out.
pub trait PointsLedger: Send + Sync + 'static {
    /// Fetches the account state for a main identity.
    fn account(
        &self,
        main: CharId,
    ) -> impl std::future::Future<Output = Result<LedgerAccount, HostError>> + Send;

    /// Applies a point delta to a main identity's account.
    fn grant(
        &self,
        main: CharId,
        actor: CharId,
        label: &str,
        amount: i64,
    ) -> impl std::future::Future<Output = Result<(), HostError>> + Send;

    /// Appends a free-text entry to a main identity's account log.
    fn log(
        &self,
        main: CharId,
        actor: CharId,
        message: &str,
    ) -> impl std::future::Future<Output = Result<(), HostError>> + Send;

    /// Looks up a named preset in the catalog. `None` if absent — the
    /// coordinator turns that into its own `UnknownPreset` error.
    fn preset(
        &self,
        name: &str,
    ) -> impl std::future::Future<Output = Result<Option<PointsPreset>, HostError>> + Send;
}
