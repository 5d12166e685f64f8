//! The raid session state machine.

use raidforge_types::{AltProfile, CharId, Character, RaidId};
use serde::{Deserialize, Serialize};

use crate::active_check::ActiveCheckBatches;
use crate::time::unix_now;
use crate::{Raider, RosterError};

/// Which transition a [`RaidSession::join`] performed.
///
/// Joining is the most overloaded operation in the state machine: the same
/// request means four different things depending on whether the main is
/// already on the roster, which alt they arrive on, and whether they are
/// currently active. Callers use this to pick the right announcement and
/// ledger log entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinAction {
    /// A brand-new main joined the roster.
    Joined,
    /// An inactive raider returned on their last active character.
    Rejoined,
    /// An active raider switched to a different alternate.
    /// Never gated on admission — the participant is already in.
    SwitchedAlt { previous: CharId },
    /// An inactive raider returned on a different alternate.
    SwitchedAndRejoined { previous: CharId },
}

/// Which transition a privileged [`RaidSession::add`] performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddAction {
    /// A brand-new main was placed on the roster (admission bypassed).
    Added,
    /// An existing inactive raider was set active again.
    Reactivated,
}

/// One running raid: roster, admission policy, and point bookkeeping.
///
/// # Invariants
///
/// - At most one [`Raider`] exists per main identity.
/// - Roster order is join order and never changes.
/// - `accumulated_points` never decreases within a session.
///
/// The session knows nothing about ledgers, archives, or messaging — those
/// live behind the coordinator. Every method either performs its transition
/// completely or returns a [`RosterError`] leaving the session untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaidSession {
    /// Free-text label, e.g. "Mitaar Hero".
    name: String,
    /// When the session was created (unix seconds).
    started_at: u64,
    /// Who started the session. The *current* leader is tracked by a
    /// separate host collaborator and may be reassigned independently.
    leader: Character,
    /// Participation records in join order.
    roster: Vec<Raider>,
    /// Whether new participants may join.
    is_open: bool,
    /// Whether any point distribution has happened. Gates the
    /// confirmation step on ending a raid with no rewards recorded.
    points_distributed: bool,
    /// Archive correlation id, assigned when the open-ended header is
    /// written at start time.
    archive_id: RaidId,
}

impl RaidSession {
    /// Creates an open session with the initiator as its first raider.
    ///
    /// `started_at` is supplied by the caller so the session and its
    /// archive header carry the identical timestamp.
    pub fn start(
        name: impl Into<String>,
        leader_profile: AltProfile,
        leader_active: CharId,
        archive_id: RaidId,
        started_at: u64,
    ) -> Self {
        let name = name.into();
        let leader = leader_profile
            .find(leader_active)
            .cloned()
            .unwrap_or_else(|| leader_profile.main.clone());

        let session = Self {
            name: name.clone(),
            started_at,
            leader,
            roster: vec![Raider::new(leader_profile, leader_active)],
            is_open: true,
            points_distributed: false,
            archive_id,
        };

        tracing::info!(raid = %name, archive_id = %archive_id, "raid started");
        session
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn started_at(&self) -> u64 {
        self.started_at
    }

    pub fn leader(&self) -> &Character {
        &self.leader
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn points_distributed(&self) -> bool {
        self.points_distributed
    }

    pub fn archive_id(&self) -> RaidId {
        self.archive_id
    }

    /// The full roster in join order.
    pub fn roster(&self) -> &[Raider] {
        &self.roster
    }

    /// Looks up a raider by main identity.
    pub fn raider(&self, main_id: CharId) -> Option<&Raider> {
        self.roster.iter().find(|r| r.main_id() == main_id)
    }

    fn raider_mut(&mut self, main_id: CharId) -> Option<&mut Raider> {
        self.roster.iter_mut().find(|r| r.main_id() == main_id)
    }

    /// Whether the given main identity has a roster record (any state).
    pub fn contains(&self, main_id: CharId) -> bool {
        self.raider(main_id).is_some()
    }

    /// Raiders currently counting toward the active roster.
    pub fn active_raiders(&self) -> impl Iterator<Item = &Raider> {
        self.roster.iter().filter(|r| r.is_active())
    }

    /// A participant joins (or re-joins, or switches alts) on `joining`.
    ///
    /// `profile` is the resolved alt set for the joining character. The
    /// profile snapshot is only stored when this creates a new raider;
    /// existing raiders keep the snapshot from their first join.
    ///
    /// Admission (`is_open`) gates every path except an alt switch by an
    /// already-active raider — that participant is already in, so moving
    /// them to another character is always allowed.
    pub fn join(
        &mut self,
        profile: &AltProfile,
        joining: CharId,
    ) -> Result<JoinAction, RosterError> {
        let main_id = profile.main_id();
        let is_open = self.is_open;
        let raid = self.name.clone();

        // Index lookup so the no-match arm can push onto the roster.
        let Some(idx) = self.roster.iter().position(|r| r.main_id() == main_id) else {
            // Brand-new main: plain admission check.
            if !is_open {
                return Err(RosterError::SessionClosed);
            }
            self.roster.push(Raider::new(profile.clone(), joining));
            tracing::info!(raid = %raid, %main_id, character = %joining, "raider joined");
            return Ok(JoinAction::Joined);
        };
        let raider = &mut self.roster[idx];

        if raider.active_id() == joining {
            if raider.is_active() {
                return Err(RosterError::AlreadyParticipating(joining));
            }
            // Returning on the same character they last played.
            if !is_open {
                return Err(RosterError::SessionClosed);
            }
            raider.reactivate();
            tracing::info!(raid = %raid, %main_id, character = %joining, "raider rejoined");
            Ok(JoinAction::Rejoined)
        } else if raider.is_active() {
            let previous = raider.switch_active(joining);
            tracing::info!(
                raid = %raid,
                %main_id,
                from = %previous,
                to = %joining,
                "raider switched alt"
            );
            Ok(JoinAction::SwitchedAlt { previous })
        } else {
            // Returning on a different alternate: admission applies.
            if !is_open {
                return Err(RosterError::SessionClosed);
            }
            let previous = raider.switch_active(joining);
            raider.reactivate();
            tracing::info!(
                raid = %raid,
                %main_id,
                from = %previous,
                to = %joining,
                "raider switched alt and rejoined"
            );
            Ok(JoinAction::SwitchedAndRejoined { previous })
        }
    }

    /// A participant leaves voluntarily.
    pub fn leave(&mut self, main_id: CharId) -> Result<(), RosterError> {
        let raid = self.name.clone();
        let raider = self
            .raider_mut(main_id)
            .ok_or(RosterError::NotParticipating(main_id))?;
        if !raider.is_active() {
            return Err(RosterError::NotActive(main_id));
        }

        raider.mark_left(unix_now());
        tracing::info!(raid = %raid, %main_id, "raider left");
        Ok(())
    }

    /// Privileged add: places or reactivates a raider, bypassing admission.
    pub fn add(
        &mut self,
        profile: &AltProfile,
        active: CharId,
    ) -> Result<AddAction, RosterError> {
        let main_id = profile.main_id();
        let raid = self.name.clone();

        let Some(idx) = self.roster.iter().position(|r| r.main_id() == main_id) else {
            self.roster.push(Raider::new(profile.clone(), active));
            tracing::info!(raid = %raid, %main_id, character = %active, "raider added");
            return Ok(AddAction::Added);
        };
        let raider = &mut self.roster[idx];

        if raider.is_active() {
            return Err(RosterError::AlreadyParticipating(main_id));
        }
        raider.reactivate();
        tracing::info!(raid = %raid, %main_id, "raider reactivated");
        Ok(AddAction::Reactivated)
    }

    /// Privileged kick: marks a raider inactive with a recorded reason.
    pub fn kick(&mut self, main_id: CharId, reason: &str) -> Result<(), RosterError> {
        let raid = self.name.clone();
        let raider = self
            .raider_mut(main_id)
            .ok_or(RosterError::NotParticipating(main_id))?;
        if !raider.is_active() {
            return Err(RosterError::AlreadyInactive(main_id));
        }

        raider.mark_kicked(unix_now(), reason.to_string());
        tracing::info!(raid = %raid, %main_id, reason, "raider kicked");
        Ok(())
    }

    /// Opens the raid for new participants.
    pub fn open(&mut self) -> Result<(), RosterError> {
        if self.is_open {
            return Err(RosterError::AlreadyOpen);
        }
        self.is_open = true;
        tracing::info!(raid = %self.name, "raid opened");
        Ok(())
    }

    /// Closes the raid for new participants.
    pub fn close(&mut self) -> Result<(), RosterError> {
        if !self.is_open {
            return Err(RosterError::AlreadyClosed);
        }
        self.is_open = false;
        tracing::info!(raid = %self.name, "raid closed");
        Ok(())
    }

    /// Records that a point distribution pass has happened.
    pub fn mark_points_distributed(&mut self) {
        self.points_distributed = true;
    }

    /// Grants points to one raider's session total.
    ///
    /// The coordinator calls this only after the ledger accepted the
    /// grant, so the roster total and the ledger never disagree in the
    /// raider's favor.
    pub fn grant_points(&mut self, main_id: CharId, amount: i64) -> Result<(), RosterError> {
        let raider = self
            .raider_mut(main_id)
            .ok_or(RosterError::NotParticipating(main_id))?;
        raider.add_points(amount);
        Ok(())
    }

    /// Lazy, restartable active-check batches over the full roster.
    ///
    /// Batching is purely a presentation concern. The contract the caller
    /// relies on: stable roster order, full coverage, no duplicates.
    pub fn active_check(&self, batch_size: usize) -> ActiveCheckBatches<'_> {
        ActiveCheckBatches::new(&self.roster, batch_size)
    }
}
