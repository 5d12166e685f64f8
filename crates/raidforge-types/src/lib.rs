//! Shared types for Raidforge.
//!
//! This crate defines the vocabulary the other crates speak:
//!
//! - **Identifiers** ([`CharId`], [`RaidId`]) — newtype wrappers that keep
//!   a character id from being confused with an archive id.
//! - **Value types** ([`Character`], [`AltProfile`], [`PointsPreset`]) —
//!   what the host's identity and ledger services hand back to the core.
//! - **Commands** ([`RaidCommand`]) — the strongly-typed operation requests
//!   the host's command layer produces after parsing and permission checks.
//!
//! Nothing here holds state or performs I/O. The crate sits at the bottom
//! of the dependency graph so every other crate can use these types.

mod character;
mod command;
mod ids;

pub use character::{AltProfile, Character, PointsPreset};
pub use command::RaidCommand;
pub use ids::{CharId, RaidId};
