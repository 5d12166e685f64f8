//! Raid session state machine for Raidforge.
//!
//! This crate owns the in-memory model of one running raid: the roster of
//! [`Raider`] records, the admission policy, the active/inactive/kicked
//! participation sub-states, and the point bookkeeping that feeds the
//! archive when the raid ends.
//!
//! # Key types
//!
//! - [`RaidSession`] — one running raid: roster, admission, lifecycle
//! - [`Raider`] — one participant, tracked by their main identity
//! - [`JoinAction`] / [`AddAction`] — which transition a join/add performed
//! - [`RosterError`] — every way a roster operation can be refused
//!
//! # Concurrency note
//!
//! `RaidSession` is NOT thread-safe by itself — it is plain mutable state.
//! This is intentional: the coordinator in the `raidforge` crate owns the
//! single session behind a lock and serializes every mutation. Keeping the
//! state machine synchronous makes it trivially testable.

mod active_check;
mod error;
mod raid;
mod raider;
mod time;

pub use active_check::{ActiveCheckBatches, ActiveCheckEntry};
pub use error::RosterError;
pub use raid::{AddAction, JoinAction, RaidSession};
pub use raider::Raider;
pub use time::unix_now;
