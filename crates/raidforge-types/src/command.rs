//! The typed command surface.
//!
//! The host's command layer parses chat input ("raid kick Bob afk") and
//! runs its own permission checks. What crosses into the core is one of
//! these variants — every required field present and typed, nothing left
//! for the core to re-parse.

use serde::{Deserialize, Serialize};

use crate::{CharId, RaidId};

/// A raid operation request, validated at the boundary.
///
/// `#[serde(tag = "type")]` produces internally tagged JSON:
///   `{ "type": "Kick", "character": 42, "reason": "afk" }`
/// so hosts that ship commands over a wire get a self-describing shape.
///
/// The acting character (who issued the command) is not part of the
/// command — it is passed alongside when dispatching, the same way the
/// host's command layer carries the sender separately from the arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RaidCommand {
    /// Start a new raid with the given label.
    Start { name: String },

    /// Discard the current raid without archiving anything.
    Cancel,

    /// Join the current raid as the sending character.
    Join,

    /// Leave the current raid.
    Leave,

    /// Privileged: add a character to the raid, bypassing admission.
    Add { character: CharId },

    /// Privileged: mark a raider inactive with a recorded reason.
    Kick { character: CharId, reason: String },

    /// Privileged: open the raid for new participants.
    Open,

    /// Privileged: close the raid for new participants.
    Close,

    /// Privileged: grant a named point preset to all active raiders.
    DistributePoints { preset: String },

    /// End the raid and archive the results.
    ///
    /// `force` skips the confirmation step when no points were
    /// distributed. Defaults to `false` when absent from the wire shape.
    End {
        #[serde(default)]
        force: bool,
    },

    /// Privileged: announce the raid to online members not yet in it.
    Announce { message: Option<String> },

    /// Show the current raid status.
    Status,

    /// Privileged: produce the active-check roster batches.
    ActiveCheck,

    /// List recently finished raids.
    History,

    /// Show the archived detail of one raid.
    HistoryDetail { raid_id: RaidId },
}
