//! Raid history persistence for Raidforge.
//!
//! This crate specifies the read/write contract for finished raids and
//! ships an in-memory reference store. The storage engine itself is a host
//! concern — a deployment backs [`RaidArchive`] with whatever database the
//! host already runs; [`MemoryArchive`] exists for tests, demos, and hosts
//! that don't care about durability across restarts.
//!
//! # Lifecycle
//!
//! ```text
//! create() ──→ [open-ended header] ──→ finalize() ──→ [finished raid]
//!                     │                                    │
//!                     └── (raid cancelled: header orphaned, │
//!                          never listed)                    ▼
//!                                              get_detail() / list_recent()
//! ```
//!
//! The header is written at raid *start* so the archive id exists for
//! correlation even if the raid is later cancelled. Orphaned headers keep
//! `ended_at == 0` forever and never surface in listings.

mod error;
mod memory;
mod record;
mod store;

pub use error::ArchiveError;
pub use memory::MemoryArchive;
pub use record::{ParticipantRow, RaidDetail, RaidHeader};
pub use store::RaidArchive;
