//! Active-check roster batching.
//!
//! Raid leaders periodically verify that everyone on the roster is really
//! at the keyboard. The host renders each batch as one clickable check
//! (ten names fit comfortably in one chat page); the batching itself is a
//! pure view over the roster and never touches session state.

use raidforge_types::CharId;

use crate::Raider;

/// One roster entry in an active-check listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveCheckEntry {
    /// The character currently representing the participant.
    pub character: CharId,
    /// Display name for that character (raw id if the join-time snapshot
    /// doesn't cover it).
    pub name: String,
    /// Whether the raider currently counts as active.
    pub is_active: bool,
}

/// Lazy iterator over active-check batches.
///
/// Yields `Vec<ActiveCheckEntry>` groups of at most `batch_size` entries,
/// covering every raider exactly once in roster order. Restartable by
/// asking the session for a fresh iterator.
pub struct ActiveCheckBatches<'a> {
    roster: &'a [Raider],
    batch_size: usize,
    cursor: usize,
}

impl<'a> ActiveCheckBatches<'a> {
    pub(crate) fn new(roster: &'a [Raider], batch_size: usize) -> Self {
        Self {
            roster,
            // A zero batch size would loop forever; clamp to one.
            batch_size: batch_size.max(1),
            cursor: 0,
        }
    }
}

impl Iterator for ActiveCheckBatches<'_> {
    type Item = Vec<ActiveCheckEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.roster.len() {
            return None;
        }

        let end = (self.cursor + self.batch_size).min(self.roster.len());
        let batch = self.roster[self.cursor..end]
            .iter()
            .map(|raider| ActiveCheckEntry {
                character: raider.active_id(),
                name: raider.active_name(),
                is_active: raider.is_active(),
            })
            .collect();
        self.cursor = end;
        Some(batch)
    }
}
