//! # Raidforge
//!
//! Raid session coordination for in-game communities.
//!
//! Raidforge runs the one raid a deployment hosts at a time: who is
//! participating (with alternate characters consolidated down to one
//! record per player), whether the raid is open for joiners, how reward
//! points get dished out, and what lands in the permanent archive when
//! the raid ends.
//!
//! The host environment — the chat bot or game server embedding this
//! crate — plugs in through four traits:
//!
//! - [`IdentityResolver`] maps any character to its alt profile,
//! - [`PointsLedger`] owns point accounts and the preset catalog,
//! - [`ChatHost`] delivers notifications, broadcasts, and presence,
//! - [`LeaderTracker`] arbitrates the separately-held leader role,
//!
//! plus a [`RaidArchive`] implementation for persistence
//! ([`MemoryArchive`] ships for tests and single-process setups).
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use raidforge::prelude::*;
//!
//! let coordinator = RaidCoordinator::new(identity, ledger, chat, leaders, archive);
//!
//! let started = coordinator.start("Mitaar Hero", &alice).await?;
//! coordinator.join(&bob).await?;
//! coordinator.distribute_points("boss kill", &alice).await?;
//! coordinator.end_and_save(false, &alice).await?;
//! ```
//!
//! Commands arriving as chat input can instead be parsed into a
//! [`RaidCommand`] and routed through [`RaidCoordinator::execute`].

mod coordinator;
mod error;
mod outcome;

pub use coordinator::{CoordinatorConfig, RaidCoordinator};
pub use error::RaidforgeError;
pub use outcome::{
    AddOutcome, DistributeOutcome, EndOutcome, JoinOutcome, RaidReply, RaidStatus, StartOutcome,
};

pub use raidforge_archive::{
    ArchiveError, MemoryArchive, ParticipantRow, RaidArchive, RaidDetail, RaidHeader,
};
pub use raidforge_host::{
    ChatHost, HostError, IdentityResolver, LeaderClaim, LeaderTracker, LedgerAccount, PointsLedger,
};
pub use raidforge_session::{
    ActiveCheckEntry, AddAction, JoinAction, Raider, RaidSession, RosterError,
};
pub use raidforge_types::{AltProfile, CharId, Character, PointsPreset, RaidCommand, RaidId};

/// Everything a host integration typically needs.
pub mod prelude {
    pub use crate::{
        AltProfile, CharId, Character, ChatHost, CoordinatorConfig, EndOutcome, IdentityResolver,
        LeaderClaim, LeaderTracker, LedgerAccount, MemoryArchive, PointsLedger, PointsPreset,
        RaidArchive, RaidCommand, RaidCoordinator, RaidId, RaidReply, RaidforgeError,
    };
}
