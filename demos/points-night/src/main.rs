//! A scripted raid night against in-memory host services.
//!
//! Runs one full raid lifecycle — start, joins, an alt switch, a kick,
//! a point distribution, save — and prints the archived result. Useful
//! as a wiring reference for real host integrations.
//!
//! Run with `RUST_LOG=debug` to watch the coordinator's tracing output.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use raidforge::prelude::*;
use raidforge::HostError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// ---------------------------------------------------------------------------
// In-memory host services
// ---------------------------------------------------------------------------

/// Alt directory with a fixed roster of players.
struct Directory {
    profiles: HashMap<CharId, AltProfile>,
}

impl Directory {
    fn new(profiles: Vec<AltProfile>) -> Self {
        let mut map = HashMap::new();
        for profile in profiles {
            for c in std::iter::once(&profile.main).chain(profile.alts.iter()) {
                map.insert(c.id, profile.clone());
            }
        }
        Self { profiles: map }
    }
}

impl IdentityResolver for Directory {
    async fn resolve(&self, character: CharId) -> Result<AltProfile, HostError> {
        self.profiles
            .get(&character)
            .cloned()
            .ok_or(HostError::UnknownIdentity(character))
    }
}

/// Point accounts plus a two-entry preset catalog.
struct Ledger {
    points: Mutex<HashMap<CharId, i64>>,
    presets: HashMap<String, i64>,
}

impl Ledger {
    fn new() -> Self {
        Self {
            points: Mutex::new(HashMap::new()),
            presets: HashMap::from([("trash".to_string(), 10), ("boss".to_string(), 25)]),
        }
    }
}

impl PointsLedger for Ledger {
    async fn account(&self, _main: CharId) -> Result<LedgerAccount, HostError> {
        Ok(LedgerAccount { disabled: false })
    }

    async fn grant(
        &self,
        main: CharId,
        _actor: CharId,
        label: &str,
        amount: i64,
    ) -> Result<(), HostError> {
        let mut points = self.points.lock().map_err(|_| poisoned())?;
        *points.entry(main).or_insert(0) += amount;
        println!("[ledger] {main} +{amount} ({label})");
        Ok(())
    }

    async fn log(&self, main: CharId, _actor: CharId, message: &str) -> Result<(), HostError> {
        println!("[ledger] {main} log: {message}");
        Ok(())
    }

    async fn preset(&self, name: &str) -> Result<Option<PointsPreset>, HostError> {
        Ok(self.presets.get(name).map(|&points| PointsPreset {
            name: name.to_string(),
            points,
        }))
    }
}

fn poisoned() -> HostError {
    HostError::Ledger("point store lock poisoned".to_string())
}

/// Prints deliveries to stdout instead of a chat network.
struct Stdchat {
    members: Vec<CharId>,
    online: HashSet<CharId>,
}

impl ChatHost for Stdchat {
    async fn notify(&self, character: CharId, message: &str) -> Result<(), HostError> {
        println!("[tell {character}] {message}");
        Ok(())
    }

    async fn broadcast(&self, message: &str) -> Result<(), HostError> {
        println!("[raid] {message}");
        Ok(())
    }

    fn mass_messaging(&self) -> bool {
        true
    }

    async fn mass_message(&self, character: CharId, message: &str) -> Result<(), HostError> {
        println!("[mass -> {character}] {message}");
        Ok(())
    }

    async fn is_online(&self, character: CharId) -> bool {
        self.online.contains(&character)
    }

    async fn all_members(&self) -> Vec<CharId> {
        self.members.clone()
    }

    async fn in_channel(&self, _character: CharId) -> bool {
        // Everyone in this demo already sits in the raid channel.
        true
    }
}

/// Single-slot leader role, first claimant wins.
struct Leaders {
    current: Mutex<Option<Character>>,
}

impl LeaderTracker for Leaders {
    async fn claim(&self, candidate: &Character) -> LeaderClaim {
        let Ok(mut current) = self.current.lock() else {
            return LeaderClaim::Granted;
        };
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

// ---------------------------------------------------------------------------
// The scripted night
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let alice = Character::new(CharId(1), "Alice");
    let bob = Character::new(CharId(11), "Bob");
    let bob_alt = Character::new(CharId(12), "Bobdoc");
    let carol = Character::new(CharId(21), "Carol");

    let directory = Directory::new(vec![
        AltProfile::solo(alice.clone()),
        AltProfile {
            main: bob.clone(),
            alts: vec![bob.clone(), bob_alt.clone()],
        },
        AltProfile::solo(carol.clone()),
    ]);
    let chat = Stdchat {
        members: vec![alice.id, bob.id, carol.id],
        online: HashSet::from([alice.id, bob.id, carol.id]),
    };
    let leaders = Leaders {
        current: Mutex::new(None),
    };

    let coordinator = RaidCoordinator::new(
        directory,
        Ledger::new(),
        chat,
        leaders,
        MemoryArchive::new(),
    );

    let started = coordinator.start("Mitaar Hero", &alice).await?;
    println!("raid {} started, instructions: {}", started.raid_id, started.join_instructions);

    coordinator.announce(Some("Bring reflect bracers.")).await?;

    coordinator.join(&bob).await?;
    coordinator.join(&carol).await?;

    // Bob relogs onto his doctor.
    coordinator.join(&bob_alt).await?;

    // First boss down.
    coordinator.distribute_points("boss", &alice).await?;

    // Carol goes missing during the active check and gets removed.
    coordinator.kick(carol.id, "missed active check", &alice).await?;
    coordinator.distribute_points("trash", &alice).await?;

    match coordinator.end_and_save(false, &alice).await? {
        EndOutcome::Saved { raid_id, participants } => {
            println!("saved raid {raid_id} with {participants} participants");
            let detail = coordinator.history_detail(raid_id).await?;
            for row in &detail.participants {
                println!(
                    "  {}: {} points{}",
                    row.raider_id,
                    row.points,
                    row.kick_reason
                        .as_deref()
                        .map(|r| format!(" (kicked: {r})"))
                        .unwrap_or_default()
                );
            }
        }
        EndOutcome::ConfirmationRequired => {
            println!("end needs confirmation (no points were distributed)");
        }
    }

    Ok(())
}
