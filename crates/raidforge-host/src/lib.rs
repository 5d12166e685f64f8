//! Host collaborator hooks for Raidforge.
//!
//! Raidforge doesn't resolve identities, store points, or deliver chat
//! messages itself — the embedding host already does all of that. This
//! crate defines the traits the coordinator calls across that boundary:
//!
//! - [`IdentityResolver`] — map any character to its main and alt set
//! - [`PointsLedger`] — point accounts, grants, log entries, presets
//! - [`ChatHost`] — notifications, broadcasts, presence, channel state
//! - [`LeaderTracker`] — the separately-tracked raid-leader role
//!
//! Each trait is a thin async seam in the style of an authentication
//! hook: the host implements it against its real services in production
//! and against hash maps in tests.

mod chat;
mod error;
mod identity;
mod leader;
mod ledger;

pub use chat::ChatHost;
pub use error::HostError;
pub use identity::IdentityResolver;
pub use leader::{LeaderClaim, LeaderTracker};
pub use ledger::{LedgerAccount, PointsLedger};
