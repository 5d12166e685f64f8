//! Identifier newtypes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A unique identifier for a character (one in-game identity).
///
/// A real participant usually owns several characters — a "main" and any
/// number of alternates. The host's identity service maps any `CharId` to
/// the main that groups them; this crate never assumes which is which.
///
/// `#[serde(transparent)]` keeps the JSON representation a plain number,
/// matching what the host's storage layer stores for character ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharId(pub u64);

impl fmt::Display for CharId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C-{}", self.0)
    }
}

/// A unique identifier for an archived raid.
///
/// Assigned by the archive when the open-ended header is written at raid
/// start, so the in-memory session and its archive row can be correlated
/// even if the raid is later cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RaidId(pub u64);

impl fmt::Display for RaidId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R-{}", self.0)
    }
}
