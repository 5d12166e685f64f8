//! The session coordinator: the single process-wide raid holder.

use tokio::sync::RwLock;

use raidforge_archive::{ParticipantRow, RaidArchive, RaidDetail, RaidHeader};
use raidforge_host::{ChatHost, IdentityResolver, LeaderTracker, PointsLedger};
use raidforge_session::{unix_now, AddAction, JoinAction, RaidSession};
use raidforge_types::{CharId, Character, RaidCommand};

use crate::{
    AddOutcome, DistributeOutcome, EndOutcome, JoinOutcome, RaidReply, RaidStatus,
    RaidforgeError, StartOutcome,
};

/// Tuning knobs for the coordinator.
#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    /// Entries per active-check batch (one chat page's worth).
    pub active_check_batch: usize,
    /// How many finished raids a history listing returns.
    pub history_limit: usize,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            active_check_batch: 10,
            history_limit: 30,
        }
    }
}

/// Coordinates the one raid session a deployment may run at a time.
///
/// Owns the session slot (`RwLock<Option<RaidSession>>`) and the handles
/// to every host collaborator. All command-level operations live here;
/// each one fails with [`RaidforgeError::NoActiveSession`] when no raid
/// is running, except [`start`](Self::start).
///
/// # Concurrency
///
/// The single-session invariant is enforced by construction: one
/// coordinator per deployment, one slot inside it. Mutating operations
/// take the write lock for their whole compound sequence, so a roster
/// read-compute-mutate never interleaves with another mutation. Reads
/// (status, active check) share the read lock. Collaborator calls are
/// awaited inside the lock — none of them is long-running beyond what
/// the host's own command timeout already covers.
pub struct RaidCoordinator<I, L, C, T, A>
where
    I: IdentityResolver,
    L: PointsLedger,
    C: ChatHost,
    T: LeaderTracker,
    A: RaidArchive,
{
    identity: I,
    ledger: L,
    chat: C,
    leaders: T,
    archive: A,
    config: CoordinatorConfig,
    session: RwLock<Option<RaidSession>>,
}

impl<I, L, C, T, A> RaidCoordinator<I, L, C, T, A>
where
    I: IdentityResolver,
    L: PointsLedger,
    C: ChatHost,
    T: LeaderTracker,
    A: RaidArchive,
{
    /// Creates a coordinator with no running session.
    pub fn new(identity: I, ledger: L, chat: C, leaders: T, archive: A) -> Self {
        Self {
            identity,
            ledger,
            chat,
            leaders,
            archive,
            config: CoordinatorConfig::default(),
            session: RwLock::new(None),
        }
    }

    /// Overrides the default configuration.
    pub fn with_config(mut self, config: CoordinatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Whether a raid is currently running.
    pub async fn has_session(&self) -> bool {
        self.session.read().await.is_some()
    }

    // ---------------------------------------------------------------------
    // Lifecycle
    // ---------------------------------------------------------------------

    /// Starts a new raid with `initiator` as its first raider.
    ///
    /// Writes the open-ended archive header first so the raid id exists
    /// even if the raid is later cancelled, then attempts the leadership
    /// claim. A denied claim does not block the start — leadership and
    /// the raid session are independent authorities — the outcome simply
    /// reports who holds the role.
    pub async fn start(
        &self,
        name: &str,
        initiator: &Character,
    ) -> Result<StartOutcome, RaidforgeError> {
        let mut guard = self.session.write().await;
        if let Some(existing) = guard.as_ref() {
            return Err(RaidforgeError::SessionAlreadyActive(
                existing.name().to_string(),
            ));
        }

        let profile = self.identity.resolve(initiator.id).await?;
        let as_char = profile
            .find(initiator.id)
            .cloned()
            .unwrap_or_else(|| profile.main.clone());
        let leadership = self.leaders.claim(&as_char).await;

        // One timestamp for both records, so the archive header and the
        // session never disagree about when the raid began.
        let started_at = unix_now();
        let raid_id = self
            .archive
            .create(name, initiator.id, started_at)
            .await?;
        *guard = Some(RaidSession::start(
            name,
            profile,
            initiator.id,
            raid_id,
            started_at,
        ));

        let join_instructions = join_instructions(name);
        self.broadcast(format!(
            "{} has started the raid \"{name}\". {join_instructions}",
            as_char.name
        ))
        .await;

        Ok(StartOutcome {
            raid_id,
            leadership,
            join_instructions,
        })
    }

    /// Discards the running raid without archiving anything.
    ///
    /// The open-ended archive header written at start stays behind; it
    /// never surfaces in history listings.
    pub async fn cancel(&self, sender: &Character) -> Result<(), RaidforgeError> {
        let mut guard = self.session.write().await;
        let session = guard.take().ok_or(RaidforgeError::NoActiveSession)?;

        tracing::info!(raid = %session.name(), by = %sender.id, "raid cancelled");
        self.broadcast(format!(
            "{} cancelled the raid \"{}\".",
            sender.name,
            session.name()
        ))
        .await;
        Ok(())
    }

    /// Ends the raid and archives the results.
    ///
    /// When no points were distributed and `force` is off, nothing
    /// changes and the caller gets [`EndOutcome::ConfirmationRequired`]
    /// back — the deliberate two-step guard against closing a raid with
    /// no rewards recorded. Each participant row records the character
    /// that was *active* at the end; alt switches are not reconciled
    /// back to the joining identity.
    ///
    /// If the archive write fails the session stays in place, so the
    /// save can be retried.
    pub async fn end_and_save(
        &self,
        force: bool,
        _sender: &Character,
    ) -> Result<EndOutcome, RaidforgeError> {
        let mut guard = self.session.write().await;
        let session = guard.as_ref().ok_or(RaidforgeError::NoActiveSession)?;

        if !session.points_distributed() && !force {
            return Ok(EndOutcome::ConfirmationRequired);
        }

        let raid_id = session.archive_id();
        let raid = session.name().to_string();
        let rows: Vec<ParticipantRow> = session
            .roster()
            .iter()
            .map(|r| ParticipantRow {
                raider_id: r.active_id(),
                points: r.accumulated_points(),
                left_at: r.left_at(),
                kicked_at: r.kicked_at(),
                kick_reason: r.kick_reason().map(String::from),
            })
            .collect();
        let participants = rows.len();

        self.archive.finalize(raid_id, unix_now(), rows).await?;
        *guard = None;

        tracing::info!(raid = %raid, %raid_id, participants, "raid saved and ended");
        self.broadcast("Raid saved and ended.".to_string()).await;

        Ok(EndOutcome::Saved {
            raid_id,
            participants,
        })
    }

    // ---------------------------------------------------------------------
    // Participation
    // ---------------------------------------------------------------------

    /// The sender joins the raid (or rejoins, or switches alts).
    pub async fn join(&self, sender: &Character) -> Result<JoinOutcome, RaidforgeError> {
        // Session presence is checked before anything else, so a missing
        // raid never surfaces as an identity or roster error.
        let mut guard = self.session.write().await;
        let session = guard.as_mut().ok_or(RaidforgeError::NoActiveSession)?;

        let profile = self.identity.resolve(sender.id).await?;
        let main_id = profile.main_id();
        let raid = session.name().to_string();

        let action = session.join(&profile, sender.id)?;

        // Announcements and ledger audit entries per transition,
        // matching what participants expect to read in the raid channel.
        match &action {
            JoinAction::Joined => {
                self.log_entry(main_id, sender.id, format!("Joined raid {raid}"))
                    .await;
                self.broadcast(format!("{} joined the raid.", sender.name)).await;
            }
            JoinAction::Rejoined => {
                self.log_entry(main_id, sender.id, format!("Joined raid {raid}"))
                    .await;
                self.broadcast(format!(
                    "{} returned to actively participating in the raid.",
                    sender.name
                ))
                .await;
            }
            JoinAction::SwitchedAlt { previous } => {
                self.log_entry(
                    main_id,
                    sender.id,
                    format!("Switched to alt {} in raid {raid}", sender.name),
                )
                .await;
                self.broadcast(format!(
                    "{} joined the raid with a different alt, {}.",
                    char_name(&profile, *previous),
                    sender.name
                ))
                .await;
            }
            JoinAction::SwitchedAndRejoined { previous } => {
                self.log_entry(
                    main_id,
                    sender.id,
                    format!("Switched to alt {} in raid {raid}", sender.name),
                )
                .await;
                self.log_entry(main_id, sender.id, format!("Joined raid {raid}"))
                    .await;
                self.broadcast(format!(
                    "{} returned to actively participate with a different alt, {}.",
                    char_name(&profile, *previous),
                    sender.name
                ))
                .await;
            }
        }

        let needs_invite = matches!(action, JoinAction::Joined)
            && !self.chat.in_channel(sender.id).await;

        Ok(JoinOutcome {
            action,
            needs_invite,
        })
    }

    /// The sender leaves the raid.
    pub async fn leave(&self, sender: &Character) -> Result<(), RaidforgeError> {
        let mut guard = self.session.write().await;
        let session = guard.as_mut().ok_or(RaidforgeError::NoActiveSession)?;

        let profile = self.identity.resolve(sender.id).await?;
        let main_id = profile.main_id();
        let raid = session.name().to_string();

        session.leave(main_id)?;

        self.log_entry(main_id, sender.id, format!("Left raid {raid}")).await;
        self.broadcast(format!("{} left the raid.", sender.name)).await;
        Ok(())
    }

    /// Privileged: places (or reactivates) a character on the roster,
    /// bypassing the admission policy.
    pub async fn add_participant(
        &self,
        target: CharId,
        requested_by: &Character,
    ) -> Result<AddOutcome, RaidforgeError> {
        let mut guard = self.session.write().await;
        let session = guard.as_mut().ok_or(RaidforgeError::NoActiveSession)?;

        let profile = self.identity.resolve(target).await?;
        let main_id = profile.main_id();
        let target_name = char_name(&profile, target);
        let raid = session.name().to_string();

        let action = session.add(&profile, target)?;

        self.log_entry(main_id, requested_by.id, format!("Added to raid {raid}"))
            .await;
        let notice = match action {
            AddAction::Added => {
                format!("You have been added to the raid \"{raid}\".")
            }
            AddAction::Reactivated => {
                format!("You have been set as active in the raid \"{raid}\".")
            }
        };
        self.notify(target, notice).await;
        tracing::debug!(character = %target_name, by = %requested_by.id, "participant added");

        let needs_invite = matches!(action, AddAction::Added)
            && !self.chat.in_channel(target).await;

        Ok(AddOutcome {
            action,
            needs_invite,
        })
    }

    /// Privileged: marks a raider inactive with a recorded reason.
    pub async fn kick(
        &self,
        target: CharId,
        reason: &str,
        requested_by: &Character,
    ) -> Result<(), RaidforgeError> {
        let mut guard = self.session.write().await;
        let session = guard.as_mut().ok_or(RaidforgeError::NoActiveSession)?;

        let profile = self.identity.resolve(target).await?;
        let main_id = profile.main_id();
        let raid = session.name().to_string();

        session.kick(main_id, reason)?;

        self.log_entry(
            main_id,
            requested_by.id,
            format!("Kicked from raid {raid} with reason: {reason}"),
        )
        .await;
        self.notify(
            target,
            format!("You have been kicked from raid \"{raid}\" with reason: {reason}"),
        )
        .await;
        Ok(())
    }

    /// Privileged: opens the raid for new participants.
    pub async fn open(&self, sender: &Character) -> Result<(), RaidforgeError> {
        let mut guard = self.session.write().await;
        let session = guard.as_mut().ok_or(RaidforgeError::NoActiveSession)?;
        session.open()?;
        self.broadcast(format!("Raid has been opened by {}.", sender.name)).await;
        Ok(())
    }

    /// Privileged: closes the raid for new participants.
    pub async fn close(&self, sender: &Character) -> Result<(), RaidforgeError> {
        let mut guard = self.session.write().await;
        let session = guard.as_mut().ok_or(RaidforgeError::NoActiveSession)?;
        session.close()?;
        self.broadcast(format!("Raid has been closed by {}.", sender.name)).await;
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Points
    // ---------------------------------------------------------------------

    /// Privileged: grants a named preset to every active raider.
    ///
    /// Best-effort over the roster in join order: a disabled account or a
    /// failed ledger grant never aborts the rest of the pass, and the
    /// session's per-raider totals only move when the ledger accepted the
    /// grant. Inactive raiders get a "missed points" ledger entry.
    pub async fn distribute_points(
        &self,
        preset_name: &str,
        requested_by: &Character,
    ) -> Result<DistributeOutcome, RaidforgeError> {
        let mut guard = self.session.write().await;
        let session = guard.as_mut().ok_or(RaidforgeError::NoActiveSession)?;

        let preset = self
            .ledger
            .preset(preset_name)
            .await?
            .ok_or_else(|| RaidforgeError::UnknownPreset(preset_name.to_string()))?;
        let raid = session.name().to_string();
        let actor = requested_by.id;

        // The distribution attempt counts even if every grant fails:
        // ending the raid no longer needs the confirmation step.
        session.mark_points_distributed();

        let mut outcome = DistributeOutcome {
            preset: preset.clone(),
            granted: 0,
            disabled: 0,
            inactive: 0,
            failed: Vec::new(),
        };

        for i in 0..session.roster().len() {
            let (main_id, is_active) = {
                let raider = &session.roster()[i];
                (raider.main_id(), raider.is_active())
            };

            if !is_active {
                self.log_entry(
                    main_id,
                    actor,
                    format!(
                        "Was inactive during raid {raid} when points for {} were dished out",
                        preset.name
                    ),
                )
                .await;
                outcome.inactive += 1;
                continue;
            }

            let account = match self.ledger.account(main_id).await {
                Ok(account) => account,
                Err(err) => {
                    tracing::warn!(%main_id, error = %err, "ledger account lookup failed");
                    outcome.failed.push((main_id, err.to_string()));
                    continue;
                }
            };

            if account.disabled {
                self.log_entry(
                    main_id,
                    actor,
                    format!(
                        "Participated in raid with a disabled account, missed points from {}",
                        preset.name
                    ),
                )
                .await;
                outcome.disabled += 1;
                continue;
            }

            match self
                .ledger
                .grant(main_id, actor, &preset.name, preset.points)
                .await
            {
                Ok(()) => {
                    session.grant_points(main_id, preset.points)?;
                    outcome.granted += 1;
                }
                Err(err) => {
                    tracing::warn!(%main_id, error = %err, "point grant failed");
                    outcome.failed.push((main_id, err.to_string()));
                }
            }
        }

        tracing::info!(
            raid = %raid,
            preset = %preset.name,
            granted = outcome.granted,
            disabled = outcome.disabled,
            inactive = outcome.inactive,
            failed = outcome.failed.len(),
            "points distributed"
        );
        self.broadcast(format!(
            "{} points added to all active raiders for \"{}\".",
            preset.points, preset.name
        ))
        .await;

        Ok(outcome)
    }

    // ---------------------------------------------------------------------
    // Queries & announcements
    // ---------------------------------------------------------------------

    /// Read-only snapshot of the running raid.
    pub async fn status(&self) -> Result<RaidStatus, RaidforgeError> {
        let guard = self.session.read().await;
        let session = guard.as_ref().ok_or(RaidforgeError::NoActiveSession)?;

        Ok(RaidStatus {
            name: session.name().to_string(),
            leader: session.leader().clone(),
            started_at: session.started_at(),
            is_open: session.is_open(),
            active_roster: session
                .active_raiders()
                .map(|r| Character::new(r.active_id(), r.active_name()))
                .collect(),
        })
    }

    /// Active-check batches over the full roster, in stable join order.
    pub async fn active_check(
        &self,
    ) -> Result<Vec<Vec<raidforge_session::ActiveCheckEntry>>, RaidforgeError> {
        let guard = self.session.read().await;
        let session = guard.as_ref().ok_or(RaidforgeError::NoActiveSession)?;
        Ok(session.active_check(self.config.active_check_batch).collect())
    }

    /// Announces the raid to online members not already participating.
    ///
    /// Returns how many members were messaged. Members are deduplicated
    /// by main identity so nobody gets the announcement twice across
    /// alts; identities the resolver no longer knows are skipped.
    pub async fn announce(&self, message: Option<&str>) -> Result<usize, RaidforgeError> {
        let guard = self.session.read().await;
        let session = guard.as_ref().ok_or(RaidforgeError::NoActiveSession)?;

        if !self.chat.mass_messaging() {
            return Err(RaidforgeError::AnnounceUnavailable);
        }

        let mut text = format!(
            "{} has started the raid \"{}\". {}",
            session.leader().name,
            session.name(),
            join_instructions(session.name())
        );
        if let Some(extra) = message {
            text.push(' ');
            text.push_str(extra);
        }

        let mut notified = 0;
        let mut seen_mains = std::collections::HashSet::new();
        for member in self.chat.all_members().await {
            let main_id = match self.identity.resolve(member).await {
                Ok(profile) => profile.main_id(),
                Err(err) => {
                    tracing::warn!(%member, error = %err, "skipping unresolvable member");
                    continue;
                }
            };
            if session.contains(main_id) || seen_mains.contains(&main_id) {
                continue;
            }
            // Skip offline characters without consuming the main's dedup
            // slot: the same player may be online on another alt later in
            // the member list.
            if !self.chat.is_online(member).await {
                continue;
            }
            seen_mains.insert(main_id);
            if let Err(err) = self.chat.mass_message(member, &text).await {
                tracing::warn!(%member, error = %err, "announcement delivery failed");
                continue;
            }
            notified += 1;
        }

        tracing::info!(raid = %session.name(), notified, "raid announced");
        Ok(notified)
    }

    /// Most recently finished raids, newest first.
    pub async fn history(&self) -> Result<Vec<RaidHeader>, RaidforgeError> {
        Ok(self.archive.list_recent(self.config.history_limit).await?)
    }

    /// Archived detail of one raid, rows ordered by descending points.
    pub async fn history_detail(
        &self,
        raid_id: raidforge_types::RaidId,
    ) -> Result<RaidDetail, RaidforgeError> {
        Ok(self.archive.get_detail(raid_id).await?)
    }

    // ---------------------------------------------------------------------
    // Dispatch
    // ---------------------------------------------------------------------

    /// Routes a typed command to the matching operation.
    ///
    /// The host's command layer parses chat input into a [`RaidCommand`]
    /// and runs its permission checks *before* calling this; the
    /// coordinator trusts that privileged variants arrive pre-authorized.
    pub async fn execute(
        &self,
        command: RaidCommand,
        sender: &Character,
    ) -> Result<RaidReply, RaidforgeError> {
        match command {
            RaidCommand::Start { name } => {
                Ok(RaidReply::Started(self.start(&name, sender).await?))
            }
            RaidCommand::Cancel => {
                self.cancel(sender).await?;
                Ok(RaidReply::Cancelled)
            }
            RaidCommand::Join => Ok(RaidReply::Joined(self.join(sender).await?)),
            RaidCommand::Leave => {
                self.leave(sender).await?;
                Ok(RaidReply::Left)
            }
            RaidCommand::Add { character } => Ok(RaidReply::Added(
                self.add_participant(character, sender).await?,
            )),
            RaidCommand::Kick { character, reason } => {
                self.kick(character, &reason, sender).await?;
                Ok(RaidReply::Kicked)
            }
            RaidCommand::Open => {
                self.open(sender).await?;
                Ok(RaidReply::Opened)
            }
            RaidCommand::Close => {
                self.close(sender).await?;
                Ok(RaidReply::Closed)
            }
            RaidCommand::DistributePoints { preset } => Ok(RaidReply::PointsDistributed(
                self.distribute_points(&preset, sender).await?,
            )),
            RaidCommand::End { force } => {
                Ok(RaidReply::End(self.end_and_save(force, sender).await?))
            }
            RaidCommand::Announce { message } => Ok(RaidReply::Announced {
                notified: self.announce(message.as_deref()).await?,
            }),
            RaidCommand::Status => Ok(RaidReply::Status(self.status().await?)),
            RaidCommand::ActiveCheck => {
                Ok(RaidReply::ActiveCheck(self.active_check().await?))
            }
            RaidCommand::History => Ok(RaidReply::History(self.history().await?)),
            RaidCommand::HistoryDetail { raid_id } => Ok(RaidReply::HistoryDetail(
                self.history_detail(raid_id).await?,
            )),
        }
    }

    // ---------------------------------------------------------------------
    // Best-effort delivery helpers
    // ---------------------------------------------------------------------

    /// Sends to the raid channel; delivery failure is logged, never fatal.
    async fn broadcast(&self, message: String) {
        if let Err(err) = self.chat.broadcast(&message).await {
            tracing::warn!(error = %err, "broadcast failed");
        }
    }

    /// Private notification; delivery failure is logged, never fatal.
    async fn notify(&self, character: CharId, message: String) {
        if let Err(err) = self.chat.notify(character, &message).await {
            tracing::warn!(%character, error = %err, "notification failed");
        }
    }

    /// Ledger audit entry; the roster already reflects intent, so a
    /// failed entry is logged and forgotten rather than propagated.
    async fn log_entry(&self, main: CharId, actor: CharId, message: String) {
        if let Err(err) = self.ledger.log(main, actor, &message).await {
            tracing::warn!(%main, error = %err, "ledger log entry failed");
        }
    }
}

/// The how-to-join text distributed at start and on announcements.
fn join_instructions(raid_name: &str) -> String {
    format!(
        "To join the raid \"{raid_name}\", send the raid join command. \
         Once in, enable LFT so the leader can find you, then move to \
         the raid's starting location. Ask for help if you're in doubt \
         of where to go."
    )
}

fn char_name(profile: &raidforge_types::AltProfile, id: CharId) -> String {
    profile
        .find(id)
        .map(|c| c.name.clone())
        .unwrap_or_else(|| id.to_string())
}
