//! The participation record for one main identity.

use raidforge_types::{AltProfile, CharId, Character};
use serde::{Deserialize, Serialize};

/// One participant's record within a raid session.
///
/// A raider is keyed by `main_id` — the canonical identity grouping all of
/// a participant's alternates — but is represented on the roster by
/// whichever linked character is currently `active_id`. The alt set is a
/// snapshot taken when the raider first joined; it is not re-resolved if
/// the host's alt links change mid-raid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Raider {
    /// Canonical identity for this participant. Immutable once created.
    main_id: CharId,
    /// Linked characters known at join time, main first.
    known_alts: Vec<Character>,
    /// Which character currently represents this participant.
    active_id: CharId,
    /// Points granted during this session. Never decreases.
    accumulated_points: i64,
    /// Whether this raider counts toward the active roster.
    is_active: bool,
    /// When the raider last left voluntarily (unix seconds).
    left_at: Option<u64>,
    /// When the raider was last kicked (unix seconds).
    kicked_at: Option<u64>,
    /// Why the raider was last kicked.
    kick_reason: Option<String>,
}

impl Raider {
    /// Creates an active raider from a resolved alt profile.
    pub fn new(profile: AltProfile, active_id: CharId) -> Self {
        Self {
            main_id: profile.main_id(),
            known_alts: profile.alts,
            active_id,
            accumulated_points: 0,
            is_active: true,
            left_at: None,
            kicked_at: None,
            kick_reason: None,
        }
    }

    pub fn main_id(&self) -> CharId {
        self.main_id
    }

    pub fn active_id(&self) -> CharId {
        self.active_id
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn accumulated_points(&self) -> i64 {
        self.accumulated_points
    }

    pub fn left_at(&self) -> Option<u64> {
        self.left_at
    }

    pub fn kicked_at(&self) -> Option<u64> {
        self.kicked_at
    }

    pub fn kick_reason(&self) -> Option<&str> {
        self.kick_reason.as_deref()
    }

    /// The character currently representing this participant.
    ///
    /// `None` if `active_id` is an alt linked after this raider joined —
    /// the snapshot doesn't know its name. Callers must fall back to
    /// displaying the raw id.
    pub fn active_char(&self) -> Option<&Character> {
        self.known_alts.iter().find(|c| c.id == self.active_id)
    }

    /// The display name of the active character, or the raw id when the
    /// snapshot doesn't cover it.
    pub fn active_name(&self) -> String {
        self.active_char()
            .map(|c| c.name.clone())
            .unwrap_or_else(|| self.active_id.to_string())
    }

    /// Switches which character represents this participant.
    ///
    /// Returns the previously active id.
    pub(crate) fn switch_active(&mut self, to: CharId) -> CharId {
        std::mem::replace(&mut self.active_id, to)
    }

    /// Marks the raider active again, clearing any left/kicked markers.
    pub(crate) fn reactivate(&mut self) {
        self.is_active = true;
        self.left_at = None;
        self.kicked_at = None;
        self.kick_reason = None;
    }

    /// Marks the raider inactive because they left.
    pub(crate) fn mark_left(&mut self, at: u64) {
        self.is_active = false;
        self.left_at = Some(at);
    }

    /// Marks the raider inactive because they were kicked.
    pub(crate) fn mark_kicked(&mut self, at: u64, reason: String) {
        self.is_active = false;
        self.kicked_at = Some(at);
        self.kick_reason = Some(reason);
    }

    /// Records a granted point amount.
    pub(crate) fn add_points(&mut self, amount: i64) {
        self.accumulated_points += amount;
    }
}
