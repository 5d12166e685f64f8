//! Integration tests for the raid coordinator using mock host collaborators.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use raidforge::{
    AltProfile, CharId, Character, ChatHost, EndOutcome, HostError, IdentityResolver, JoinAction,
    LeaderClaim, LeaderTracker, LedgerAccount, MemoryArchive, PointsLedger, PointsPreset,
    RaidCommand, RaidCoordinator, RaidReply, RaidforgeError, RosterError,
};

// =========================================================================
// Mock collaborators
// =========================================================================

/// Fixed alt-profile directory, keyed by every character id it knows.
#[derive(Clone)]
struct MockIdentity {
    profiles: Arc<HashMap<CharId, AltProfile>>,
}

impl MockIdentity {
    fn new(profiles: Vec<AltProfile>) -> Self {
        let mut map = HashMap::new();
        for profile in profiles {
            for c in std::iter::once(&profile.main).chain(profile.alts.iter()) {
                map.insert(c.id, profile.clone());
            }
        }
        Self {
            profiles: Arc::new(map),
        }
    }
}

impl IdentityResolver for MockIdentity {
    async fn resolve(&self, character: CharId) -> Result<AltProfile, HostError> {
        self.profiles
            .get(&character)
            .cloned()
            .ok_or(HostError::UnknownIdentity(character))
    }
}

/// In-memory point accounts with a preset catalog and failure injection.
#[derive(Clone)]
struct MockLedger {
    points: Arc<Mutex<HashMap<CharId, i64>>>,
    logs: Arc<Mutex<Vec<(CharId, String)>>>,
    disabled: Arc<Mutex<HashSet<CharId>>>,
    failing: Arc<Mutex<HashSet<CharId>>>,
    presets: Arc<HashMap<String, i64>>,
}

impl MockLedger {
    fn new() -> Self {
        let presets = HashMap::from([("trash".to_string(), 10), ("boss".to_string(), 25)]);
        Self {
            points: Arc::default(),
            logs: Arc::default(),
            disabled: Arc::default(),
            failing: Arc::default(),
            presets: Arc::new(presets),
        }
    }

    fn disable(&self, main: CharId) {
        self.disabled.lock().unwrap().insert(main);
    }

    fn fail_grants_for(&self, main: CharId) {
        self.failing.lock().unwrap().insert(main);
    }

    fn points_of(&self, main: CharId) -> i64 {
        self.points.lock().unwrap().get(&main).copied().unwrap_or(0)
    }

    fn logs_for(&self, main: CharId) -> Vec<String> {
        self.logs
            .lock()
            .unwrap()
            .iter()
            .filter(|(id, _)| *id == main)
            .map(|(_, msg)| msg.clone())
            .collect()
    }
}

impl PointsLedger for MockLedger {
    async fn account(&self, main: CharId) -> Result<LedgerAccount, HostError> {
        Ok(LedgerAccount {
            disabled: self.disabled.lock().unwrap().contains(&main),
        })
    }

    async fn grant(
        &self,
        main: CharId,
        _actor: CharId,
        _label: &str,
        amount: i64,
    ) -> Result<(), HostError> {
        if self.failing.lock().unwrap().contains(&main) {
            return Err(HostError::Ledger("grant rejected".to_string()));
        }
        *self.points.lock().unwrap().entry(main).or_insert(0) += amount;
        Ok(())
    }

    async fn log(&self, main: CharId, _actor: CharId, message: &str) -> Result<(), HostError> {
        self.logs.lock().unwrap().push((main, message.to_string()));
        Ok(())
    }

    async fn preset(&self, name: &str) -> Result<Option<PointsPreset>, HostError> {
        Ok(self.presets.get(name).map(|&points| PointsPreset {
            name: name.to_string(),
            points,
        }))
    }
}

/// Records every delivery; presence and membership are set per test.
#[derive(Clone)]
struct MockChat {
    broadcasts: Arc<Mutex<Vec<String>>>,
    privates: Arc<Mutex<Vec<(CharId, String)>>>,
    mass: Arc<Mutex<Vec<(CharId, String)>>>,
    mass_capable: bool,
    online: Arc<Mutex<HashSet<CharId>>>,
    members: Arc<Mutex<Vec<CharId>>>,
    channel: Arc<Mutex<HashSet<CharId>>>,
}

impl MockChat {
    fn new() -> Self {
        Self {
            broadcasts: Arc::default(),
            privates: Arc::default(),
            mass: Arc::default(),
            mass_capable: true,
            online: Arc::default(),
            members: Arc::default(),
            channel: Arc::default(),
        }
    }

    fn without_mass_messaging() -> Self {
        Self {
            mass_capable: false,
            ..Self::new()
        }
    }

    fn set_online(&self, character: CharId) {
        self.online.lock().unwrap().insert(character);
    }

    fn add_member(&self, character: CharId) {
        self.members.lock().unwrap().push(character);
    }

    fn put_in_channel(&self, character: CharId) {
        self.channel.lock().unwrap().insert(character);
    }

    fn broadcast_log(&self) -> Vec<String> {
        self.broadcasts.lock().unwrap().clone()
    }

    fn private_log(&self) -> Vec<(CharId, String)> {
        self.privates.lock().unwrap().clone()
    }

    fn mass_log(&self) -> Vec<(CharId, String)> {
        self.mass.lock().unwrap().clone()
    }
}

impl ChatHost for MockChat {
    async fn notify(&self, character: CharId, message: &str) -> Result<(), HostError> {
        self.privates
            .lock()
            .unwrap()
            .push((character, message.to_string()));
        Ok(())
    }

    async fn broadcast(&self, message: &str) -> Result<(), HostError> {
        self.broadcasts.lock().unwrap().push(message.to_string());
        Ok(())
    }

    fn mass_messaging(&self) -> bool {
        self.mass_capable
    }

    async fn mass_message(&self, character: CharId, message: &str) -> Result<(), HostError> {
        self.mass
            .lock()
            .unwrap()
            .push((character, message.to_string()));
        Ok(())
    }

    async fn is_online(&self, character: CharId) -> bool {
        self.online.lock().unwrap().contains(&character)
    }

    async fn all_members(&self) -> Vec<CharId> {
        self.members.lock().unwrap().clone()
    }

    async fn in_channel(&self, character: CharId) -> bool {
        self.channel.lock().unwrap().contains(&character)
    }
}

/// First claimant wins; later claimants are told who holds the role.
#[derive(Clone)]
struct MockLeaders {
    current: Arc<Mutex<Option<Character>>>,
}

impl MockLeaders {
    fn new() -> Self {
        Self {
            current: Arc::default(),
        }
    }
}

impl LeaderTracker for MockLeaders {
    async fn claim(&self, candidate: &Character) -> LeaderClaim {
        let mut current = self.current.lock().unwrap();
        match current.as_ref() {
            Some(holder) => LeaderClaim::Denied {
                current: holder.clone(),
            },
            None => {
                *current = Some(candidate.clone());
                LeaderClaim::Granted
            }
        }
    }
}

// =========================================================================
// Fixture
// =========================================================================

type TestCoordinator =
    RaidCoordinator<MockIdentity, MockLedger, MockChat, MockLeaders, MemoryArchive>;

/// Alice (main 1, alt 2), Bob (main 11, alt 12), Carol (main 21, alt 22),
/// Dave (main 31, no alts).
struct World {
    ledger: MockLedger,
    chat: MockChat,
    coordinator: TestCoordinator,
}

fn alice() -> Character {
    Character::new(CharId(1), "Alice")
}

fn bob() -> Character {
    Character::new(CharId(11), "Bob")
}

fn bob_alt() -> Character {
    Character::new(CharId(12), "BobAlt")
}

fn carol() -> Character {
    Character::new(CharId(21), "Carol")
}

fn dave() -> Character {
    Character::new(CharId(31), "Dave")
}

fn world_with_chat(chat: MockChat) -> World {
    let identity = MockIdentity::new(vec![
        AltProfile {
            main: alice(),
            alts: vec![alice(), Character::new(CharId(2), "AliceAlt")],
        },
        AltProfile {
            main: bob(),
            alts: vec![bob(), bob_alt()],
        },
        AltProfile {
            main: carol(),
            alts: vec![carol(), Character::new(CharId(22), "CarolAlt")],
        },
        AltProfile::solo(dave()),
    ]);
    let ledger = MockLedger::new();
    let coordinator = RaidCoordinator::new(
        identity,
        ledger.clone(),
        chat.clone(),
        MockLeaders::new(),
        MemoryArchive::new(),
    );
    World {
        ledger,
        chat,
        coordinator,
    }
}

fn world() -> World {
    world_with_chat(MockChat::new())
}

// =========================================================================
// Lifecycle
// =========================================================================

#[tokio::test]
async fn test_start_creates_session_and_grants_leadership() {
    let w = world();

    let outcome = w.coordinator.start("Mitaar Hero", &alice()).await.unwrap();

    assert_eq!(outcome.leadership, LeaderClaim::Granted);
    assert!(w.coordinator.has_session().await);
    assert!(
        w.chat.broadcast_log()[0].contains("Mitaar Hero"),
        "start must be announced in the raid channel"
    );
}

#[tokio::test]
async fn test_start_while_running_is_rejected() {
    let w = world();
    w.coordinator.start("First", &alice()).await.unwrap();

    let result = w.coordinator.start("Second", &bob()).await;

    assert!(matches!(
        result,
        Err(RaidforgeError::SessionAlreadyActive(name)) if name == "First"
    ));
}

#[tokio::test]
async fn test_start_denied_leadership_still_creates_session() {
    let w = world();
    w.coordinator.start("First", &alice()).await.unwrap();
    w.coordinator.end_and_save(true, &alice()).await.unwrap();

    // The leader role is still held by Alice from the first raid.
    let outcome = w.coordinator.start("Second", &bob()).await.unwrap();

    assert!(matches!(
        outcome.leadership,
        LeaderClaim::Denied { ref current } if current.id == alice().id
    ));
    assert!(w.coordinator.has_session().await);
}

#[tokio::test]
async fn test_cancel_discards_session_without_archiving() {
    let w = world();
    w.coordinator.start("Doomed", &alice()).await.unwrap();

    w.coordinator.cancel(&alice()).await.unwrap();

    assert!(!w.coordinator.has_session().await);
    // The open-ended header must never surface in history.
    assert!(w.coordinator.history().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_cancel_without_session_fails() {
    let w = world();
    assert!(matches!(
        w.coordinator.cancel(&alice()).await,
        Err(RaidforgeError::NoActiveSession)
    ));
}

#[tokio::test]
async fn test_end_without_distribution_requires_confirmation() {
    let w = world();
    w.coordinator.start("Raid", &alice()).await.unwrap();

    let outcome = w.coordinator.end_and_save(false, &alice()).await.unwrap();

    assert_eq!(outcome, EndOutcome::ConfirmationRequired);
    assert!(w.coordinator.has_session().await, "session must be untouched");
}

#[tokio::test]
async fn test_end_force_skips_confirmation() {
    let w = world();
    w.coordinator.start("Raid", &alice()).await.unwrap();

    let outcome = w.coordinator.end_and_save(true, &alice()).await.unwrap();

    assert!(matches!(outcome, EndOutcome::Saved { participants: 1, .. }));
    assert!(!w.coordinator.has_session().await);
}

#[tokio::test]
async fn test_end_after_distribution_needs_no_force() {
    let w = world();
    w.coordinator.start("Raid", &alice()).await.unwrap();
    w.coordinator
        .distribute_points("trash", &alice())
        .await
        .unwrap();

    let outcome = w.coordinator.end_and_save(false, &alice()).await.unwrap();

    assert!(matches!(outcome, EndOutcome::Saved { .. }));
}

// =========================================================================
// Participation
// =========================================================================

#[tokio::test]
async fn test_join_adds_raider_and_logs_ledger_entry() {
    let w = world();
    w.coordinator.start("Raid", &alice()).await.unwrap();

    let outcome = w.coordinator.join(&bob()).await.unwrap();

    assert_eq!(outcome.action, JoinAction::Joined);
    assert!(
        w.ledger.logs_for(bob().id).iter().any(|m| m.contains("Joined raid Raid")),
        "join must leave an account log entry"
    );
}

#[tokio::test]
async fn test_join_closed_raid_is_refused() {
    let w = world();
    w.coordinator.start("Raid", &alice()).await.unwrap();
    w.coordinator.close(&alice()).await.unwrap();

    let result = w.coordinator.join(&bob()).await;

    assert!(matches!(
        result,
        Err(RaidforgeError::Roster(RosterError::SessionClosed))
    ));
}

#[tokio::test]
async fn test_join_flags_invite_when_outside_raid_channel() {
    let w = world();
    w.chat.put_in_channel(alice().id);
    w.coordinator.start("Raid", &alice()).await.unwrap();

    let outcome = w.coordinator.join(&bob()).await.unwrap();

    assert!(outcome.needs_invite, "Bob is not in the raid channel yet");
}

#[tokio::test]
async fn test_join_no_invite_when_already_in_channel() {
    let w = world();
    w.chat.put_in_channel(bob().id);
    w.coordinator.start("Raid", &alice()).await.unwrap();

    let outcome = w.coordinator.join(&bob()).await.unwrap();

    assert!(!outcome.needs_invite);
}

#[tokio::test]
async fn test_join_on_alt_switches_without_admission_check() {
    let w = world();
    w.coordinator.start("Raid", &alice()).await.unwrap();
    w.coordinator.join(&bob()).await.unwrap();
    w.coordinator.close(&alice()).await.unwrap();

    let outcome = w.coordinator.join(&bob_alt()).await.unwrap();

    assert_eq!(
        outcome.action,
        JoinAction::SwitchedAlt { previous: bob().id }
    );
    assert!(!outcome.needs_invite, "switching is never a fresh join");
}

#[tokio::test]
async fn test_leave_then_rejoin_round_trip() {
    let w = world();
    w.coordinator.start("Raid", &alice()).await.unwrap();
    w.coordinator.join(&bob()).await.unwrap();

    w.coordinator.leave(&bob()).await.unwrap();
    let outcome = w.coordinator.join(&bob()).await.unwrap();

    assert_eq!(outcome.action, JoinAction::Rejoined);
}

#[tokio::test]
async fn test_add_participant_bypasses_closed_raid_and_notifies() {
    let w = world();
    w.coordinator.start("Raid", &alice()).await.unwrap();
    w.coordinator.close(&alice()).await.unwrap();

    w.coordinator
        .add_participant(bob().id, &alice())
        .await
        .unwrap();

    let status = w.coordinator.status().await.unwrap();
    assert_eq!(status.active_roster.len(), 2);
    assert!(
        w.chat
            .private_log()
            .iter()
            .any(|(to, msg)| *to == bob().id && msg.contains("added to the raid")),
        "the added character must get a private notice"
    );
}

#[tokio::test]
async fn test_kick_notifies_target_with_reason() {
    let w = world();
    w.coordinator.start("Raid", &alice()).await.unwrap();
    w.coordinator.join(&bob()).await.unwrap();

    w.coordinator.kick(bob().id, "afk", &alice()).await.unwrap();

    let status = w.coordinator.status().await.unwrap();
    assert_eq!(status.active_roster.len(), 1, "Bob is off the active roster");
    assert!(
        w.chat
            .private_log()
            .iter()
            .any(|(to, msg)| *to == bob().id && msg.contains("afk")),
        "kick notice must carry the reason"
    );
}

#[tokio::test]
async fn test_kick_resolves_target_through_their_alt() {
    // Kicking by any of the target's characters hits the one roster record.
    let w = world();
    w.coordinator.start("Raid", &alice()).await.unwrap();
    w.coordinator.join(&bob()).await.unwrap();

    w.coordinator
        .kick(bob_alt().id, "afk", &alice())
        .await
        .unwrap();

    let status = w.coordinator.status().await.unwrap();
    assert_eq!(status.active_roster.len(), 1);
}

// =========================================================================
// Points
// =========================================================================

#[tokio::test]
async fn test_distribute_unknown_preset_fails_without_marking() {
    let w = world();
    w.coordinator.start("Raid", &alice()).await.unwrap();

    let result = w.coordinator.distribute_points("nope", &alice()).await;

    assert!(matches!(result, Err(RaidforgeError::UnknownPreset(_))));
    // The failed lookup must not count as a distribution.
    let outcome = w.coordinator.end_and_save(false, &alice()).await.unwrap();
    assert_eq!(outcome, EndOutcome::ConfirmationRequired);
}

#[tokio::test]
async fn test_distribute_grants_to_all_active_raiders() {
    let w = world();
    w.coordinator.start("Raid", &alice()).await.unwrap();
    w.coordinator.join(&bob()).await.unwrap();

    let outcome = w.coordinator
        .distribute_points("trash", &alice())
        .await
        .unwrap();

    assert_eq!(outcome.granted, 2);
    assert_eq!(w.ledger.points_of(alice().id), 10);
    assert_eq!(w.ledger.points_of(bob().id), 10);
}

#[tokio::test]
async fn test_distribute_credits_alt_points_to_the_main_account() {
    let w = world();
    w.coordinator.start("Raid", &alice()).await.unwrap();
    w.coordinator.join(&bob()).await.unwrap();
    w.coordinator.join(&bob_alt()).await.unwrap();

    w.coordinator
        .distribute_points("boss", &alice())
        .await
        .unwrap();

    assert_eq!(w.ledger.points_of(bob().id), 25, "main account gets the points");
    assert_eq!(w.ledger.points_of(bob_alt().id), 0);
}

#[tokio::test]
async fn test_distribute_skips_inactive_with_log_entry() {
    let w = world();
    w.coordinator.start("Raid", &alice()).await.unwrap();
    w.coordinator.join(&bob()).await.unwrap();
    w.coordinator.kick(bob().id, "afk", &alice()).await.unwrap();

    let outcome = w.coordinator
        .distribute_points("trash", &alice())
        .await
        .unwrap();

    assert_eq!(outcome.granted, 1);
    assert_eq!(outcome.inactive, 1);
    assert_eq!(w.ledger.points_of(bob().id), 0);
    assert!(
        w.ledger
            .logs_for(bob().id)
            .iter()
            .any(|m| m.contains("inactive during raid")),
        "skipped raiders get an explanatory log entry"
    );
}

#[tokio::test]
async fn test_distribute_skips_disabled_account_with_log_entry() {
    let w = world();
    w.ledger.disable(bob().id);
    w.coordinator.start("Raid", &alice()).await.unwrap();
    w.coordinator.join(&bob()).await.unwrap();

    let outcome = w.coordinator
        .distribute_points("trash", &alice())
        .await
        .unwrap();

    assert_eq!(outcome.granted, 1);
    assert_eq!(outcome.disabled, 1);
    assert_eq!(w.ledger.points_of(bob().id), 0);
    assert!(
        w.ledger
            .logs_for(bob().id)
            .iter()
            .any(|m| m.contains("disabled account")),
    );
}

#[tokio::test]
async fn test_distribute_collects_grant_failures_without_aborting() {
    let w = world();
    w.ledger.fail_grants_for(bob().id);
    w.coordinator.start("Raid", &alice()).await.unwrap();
    w.coordinator.join(&bob()).await.unwrap();
    w.coordinator.join(&carol()).await.unwrap();

    let outcome = w.coordinator
        .distribute_points("trash", &alice())
        .await
        .unwrap();

    // The failure is reported; everyone after Bob still gets paid.
    assert_eq!(outcome.granted, 2);
    assert_eq!(outcome.failed.len(), 1);
    assert_eq!(outcome.failed[0].0, bob().id);
    assert_eq!(w.ledger.points_of(carol().id), 10);
}

// =========================================================================
// Archival
// =========================================================================

#[tokio::test]
async fn test_full_raid_lifecycle_archives_correct_rows() {
    let w = world();
    let started = w.coordinator.start("Mitaar Hero", &alice()).await.unwrap();
    w.coordinator.join(&bob()).await.unwrap();
    w.coordinator.join(&bob_alt()).await.unwrap(); // Bob switches alts
    w.coordinator.kick(bob().id, "afk", &alice()).await.unwrap();
    w.coordinator
        .distribute_points("trash", &alice())
        .await
        .unwrap();

    let outcome = w.coordinator.end_and_save(false, &alice()).await.unwrap();
    assert!(matches!(outcome, EndOutcome::Saved { participants: 2, .. }));

    let detail = w.coordinator.history_detail(started.raid_id).await.unwrap();
    assert_eq!(detail.participants.len(), 2);

    // Rows come back in descending point order: Alice first.
    let alice_row = &detail.participants[0];
    assert_eq!(alice_row.raider_id, alice().id);
    assert_eq!(alice_row.points, 10);

    // Bob ends the raid on his alt, kicked, with zero points.
    let bob_row = &detail.participants[1];
    assert_eq!(bob_row.raider_id, bob_alt().id);
    assert_eq!(bob_row.points, 0);
    assert!(bob_row.kicked_at.is_some());
    assert_eq!(bob_row.kick_reason.as_deref(), Some("afk"));
}

#[tokio::test]
async fn test_history_lists_finished_raids_newest_first() {
    let w = world();
    w.coordinator.start("First", &alice()).await.unwrap();
    w.coordinator.end_and_save(true, &alice()).await.unwrap();
    w.coordinator.start("Second", &alice()).await.unwrap();
    w.coordinator.end_and_save(true, &alice()).await.unwrap();
    w.coordinator.start("Orphan", &alice()).await.unwrap();
    w.coordinator.cancel(&alice()).await.unwrap();

    let history = w.coordinator.history().await.unwrap();

    let names: Vec<&str> = history.iter().map(|h| h.name.as_str()).collect();
    assert_eq!(names, vec!["Second", "First"]);
}

#[tokio::test]
async fn test_archive_header_start_matches_session_start() {
    let w = world();
    let started = w.coordinator.start("Raid", &alice()).await.unwrap();
    let status = w.coordinator.status().await.unwrap();
    w.coordinator.end_and_save(true, &alice()).await.unwrap();

    let detail = w.coordinator.history_detail(started.raid_id).await.unwrap();

    assert_eq!(detail.header.started_at, status.started_at);
}

// =========================================================================
// Announce
// =========================================================================

#[tokio::test]
async fn test_announce_requires_mass_messaging_capability() {
    let w = world_with_chat(MockChat::without_mass_messaging());
    w.coordinator.start("Raid", &alice()).await.unwrap();

    let result = w.coordinator.announce(None).await;

    assert!(matches!(result, Err(RaidforgeError::AnnounceUnavailable)));
    assert!(w.chat.mass_log().is_empty());
}

#[tokio::test]
async fn test_announce_targets_online_non_participants_once_per_main() {
    let w = world();
    // Membership: Alice (participating), Bob (offline), Carol on both her
    // characters (online), Dave (online).
    for member in [alice().id, bob().id, carol().id, CharId(22), dave().id] {
        w.chat.add_member(member);
    }
    w.chat.set_online(alice().id);
    w.chat.set_online(carol().id);
    w.chat.set_online(CharId(22));
    w.chat.set_online(dave().id);
    w.coordinator.start("Raid", &alice()).await.unwrap();

    let notified = w.coordinator.announce(Some("Bring stims.")).await.unwrap();

    assert_eq!(notified, 2, "Carol once and Dave once");
    let recipients: Vec<CharId> = w.chat.mass_log().iter().map(|(to, _)| *to).collect();
    assert_eq!(recipients, vec![carol().id, dave().id]);
    assert!(w.chat.mass_log()[0].1.contains("Bring stims."));
}

#[tokio::test]
async fn test_announce_reaches_online_alt_of_offline_main() {
    // Carol's main is offline but she is online on her alt. The offline
    // main must not consume her dedup slot — the alt still gets the
    // announcement, exactly once.
    let w = world();
    w.chat.add_member(carol().id);
    w.chat.add_member(CharId(22));
    w.chat.set_online(CharId(22));
    w.coordinator.start("Raid", &alice()).await.unwrap();

    let notified = w.coordinator.announce(None).await.unwrap();

    assert_eq!(notified, 1);
    let recipients: Vec<CharId> = w.chat.mass_log().iter().map(|(to, _)| *to).collect();
    assert_eq!(recipients, vec![CharId(22)]);
}

// =========================================================================
// Error precedence
// =========================================================================

#[tokio::test]
async fn test_missing_session_takes_precedence_over_other_failures() {
    // Without a raid, every operation reports NoActiveSession — not the
    // error of whichever later check would also have failed.
    let w = world_with_chat(MockChat::without_mass_messaging());

    let result = w.coordinator.distribute_points("nope", &alice()).await;
    assert!(
        matches!(result, Err(RaidforgeError::NoActiveSession)),
        "unknown preset must not mask the missing session"
    );

    let result = w.coordinator.announce(None).await;
    assert!(
        matches!(result, Err(RaidforgeError::NoActiveSession)),
        "missing mass messaging must not mask the missing session"
    );

    let stranger = Character::new(CharId(99), "Stranger");
    let result = w.coordinator.join(&stranger).await;
    assert!(
        matches!(result, Err(RaidforgeError::NoActiveSession)),
        "unknown identity must not mask the missing session"
    );

    let result = w.coordinator.kick(CharId(99), "afk", &alice()).await;
    assert!(matches!(result, Err(RaidforgeError::NoActiveSession)));
}

// =========================================================================
// Status & active check
// =========================================================================

#[tokio::test]
async fn test_status_reflects_roster_and_admission() {
    let w = world();
    w.coordinator.start("Raid", &alice()).await.unwrap();
    w.coordinator.join(&bob()).await.unwrap();
    w.coordinator.close(&alice()).await.unwrap();

    let status = w.coordinator.status().await.unwrap();

    assert_eq!(status.name, "Raid");
    assert_eq!(status.leader.id, alice().id);
    assert!(!status.is_open);
    let names: Vec<&str> = status.active_roster.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Alice", "Bob"]);
}

#[tokio::test]
async fn test_active_check_covers_full_roster_in_join_order() {
    let w = world();
    w.coordinator.start("Raid", &alice()).await.unwrap();
    w.coordinator.join(&bob()).await.unwrap();
    w.coordinator.join(&carol()).await.unwrap();
    w.coordinator.leave(&bob()).await.unwrap();

    let batches = w.coordinator.active_check().await.unwrap();

    // Default batch size is 10: everything fits in one batch, and the
    // inactive raider is still listed.
    assert_eq!(batches.len(), 1);
    let names: Vec<&str> = batches[0].iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Alice", "Bob", "Carol"]);
    assert!(!batches[0][1].is_active);
}

// =========================================================================
// Command dispatch
// =========================================================================

#[tokio::test]
async fn test_execute_routes_start_and_join() {
    let w = world();

    let reply = w.coordinator
        .execute(
            RaidCommand::Start {
                name: "Raid".to_string(),
            },
            &alice(),
        )
        .await
        .unwrap();
    assert!(matches!(reply, RaidReply::Started(_)));

    let reply = w.coordinator
        .execute(RaidCommand::Join, &bob())
        .await
        .unwrap();
    assert!(matches!(reply, RaidReply::Joined(_)));
}

#[tokio::test]
async fn test_execute_end_defaults_to_confirmation() {
    let w = world();
    w.coordinator.start("Raid", &alice()).await.unwrap();

    let reply = w.coordinator
        .execute(RaidCommand::End { force: false }, &alice())
        .await
        .unwrap();

    assert!(matches!(
        reply,
        RaidReply::End(EndOutcome::ConfirmationRequired)
    ));
}

#[tokio::test]
async fn test_execute_without_session_surfaces_no_active_session() {
    let w = world();

    let result = w.coordinator.execute(RaidCommand::Status, &alice()).await;

    assert!(matches!(result, Err(RaidforgeError::NoActiveSession)));
}
