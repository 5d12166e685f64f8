//! Character and ledger value types.

use serde::{Deserialize, Serialize};

use crate::CharId;

/// One in-game identity: an id plus its display name.
///
/// The core never resolves names itself — it keeps whatever the host's
/// identity service returned, so roster displays and notifications can
/// name characters without another lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: CharId,
    pub name: String,
}

impl Character {
    pub fn new(id: CharId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// The result of resolving any character to its main and linked alternates.
///
/// `alts` is ordered with the main first, mirroring what the host's alt
/// service returns. The set is a snapshot: callers that hold onto a profile
/// do not see alts linked or unlinked afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AltProfile {
    /// The canonical identity grouping all alternates of one participant.
    pub main: Character,
    /// Every linked character, main included, in the host's order.
    pub alts: Vec<Character>,
}

impl AltProfile {
    /// Profile for a character with no linked alternates.
    pub fn solo(character: Character) -> Self {
        Self {
            main: character.clone(),
            alts: vec![character],
        }
    }

    pub fn main_id(&self) -> CharId {
        self.main.id
    }

    /// Looks up one of the linked characters by id.
    pub fn find(&self, id: CharId) -> Option<&Character> {
        self.alts.iter().find(|c| c.id == id)
    }
}

/// A named, pre-configured point amount used for batch distribution.
///
/// Presets live in the ledger's catalog ("trash", "boss", ...). The core
/// only ever looks them up by name and applies the amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsPreset {
    pub name: String,
    pub points: i64,
}
