//! Integration tests for saving and loading the chronicle from disk

use admirals_chronicle::chronicle::{Chronicle, FirstContact};
use admirals_chronicle::fleet::ShipClass;
use admirals_chronicle::onboarding::Milestone;
use admirals_chronicle::persistence::{ChronicleStore, FileStorage, StateStorage, STORAGE_KEY};
use admirals_chronicle::progression::{AdmiralRank, ModulePhase};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde_json::{json, Value};

/// A session saved to disk comes back identical in a new store
#[test]
fn test_file_store_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    let saved = {
        let mut store = ChronicleStore::new(FileStorage::new(dir.path()));
        let mut chronicle = store.load();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(matches!(
            chronicle.first_contact(&mut rng),
            FirstContact::NewCadet { .. }
        ));
        chronicle.complete_onboarding_phase(Milestone::WelcomeCeremony);
        chronicle.advance_onboarding_step();
        chronicle.complete_academy();
        chronicle.add_ship(ShipClass::Schooner);
        chronicle.sync_fleet_size(7);
        store.save(&chronicle).unwrap();
        chronicle.snapshot()
    };

    let store = ChronicleStore::new(FileStorage::new(dir.path()));
    let mut reloaded = store.load();
    assert_eq!(reloaded.snapshot(), saved);
    assert_eq!(reloaded.reported_fleet_size(), 7);
    assert_eq!(reloaded.fleet_size(), 2);

    // Onboarding is in progress, so first contact leaves the profile alone
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    assert_eq!(reloaded.first_contact(&mut rng), FirstContact::InProgress);
    assert_eq!(reloaded.snapshot(), saved);
}

/// The document on disk uses the envelope and stored field names
#[test]
fn test_document_shape_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = ChronicleStore::new(FileStorage::new(dir.path()));

    let mut chronicle = Chronicle::new();
    chronicle.gain_experience(1600);
    store.save(&chronicle).unwrap();

    let raw = std::fs::read_to_string(dir.path().join(format!("{}.json", STORAGE_KEY))).unwrap();
    let document: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(document["version"], 0);

    let state = &document["state"];
    assert_eq!(state["level"], 5);
    assert_eq!(state["rank"], "quantum-quartermaster");
    assert_eq!(state["unlockedPhases"], json!(["academy", "helm", "command"]));
    assert_eq!(state["currentPhase"], "academy");
    assert_eq!(state["activeShip"], Value::Null);
    assert_eq!(state["hasCompletedOnboarding"], false);
}

/// Hand-edited documents with stale or broken fields still load
#[test]
fn test_hand_edited_document_is_repaired() {
    let dir = tempfile::tempdir().unwrap();
    let mut storage = FileStorage::new(dir.path());
    let document = json!({
        "state": {
            "level": 9,
            "rank": "consciousness-commander",
            "experience": 260,
            "currentPhase": "loom",
            "unlockedPhases": ["helm", "warp-drive"],
            "activeShip": "6f1c1f34-6a57-4ec7-9f1b-1f8f3f0e1a11",
            "ships": [
                {"id": "0a3c5f2e-5d2a-4b73-9d0c-1c2b3a4d5e6f", "name": "Old Faithful",
                 "class": "canoe", "acquired": "2024-02-01T10:00:00Z",
                 "status": "docked", "experience": 40},
                {"id": "nope"}
            ],
            "achievements": [
                {"id": "first-steps", "title": "First Steps", "description": "x",
                 "category": "academy", "unlocked": true,
                 "unlockedAt": "2024-02-01T10:00:00Z"},
                {"id": "ghost", "title": "Ghost", "description": "x",
                 "category": "academy", "unlocked": true}
            ],
            "helmMastery": 180,
            "admiralName": "Ada",
            "callSign": "ADM-0001-ADAL"
        },
        "version": 0
    });
    storage.set_item(STORAGE_KEY, &document.to_string()).unwrap();

    let chronicle = ChronicleStore::new(storage).load();

    assert_eq!(chronicle.level(), 2);
    assert_eq!(chronicle.rank(), AdmiralRank::DataDeckhand);
    assert_eq!(chronicle.current_phase(), ModulePhase::Academy);
    assert!(chronicle.is_phase_unlocked(ModulePhase::Academy));
    assert!(chronicle.is_phase_unlocked(ModulePhase::Helm));
    assert!(!chronicle.is_phase_unlocked(ModulePhase::Loom));
    assert_eq!(chronicle.fleet_size(), 1);
    assert!(chronicle.active_ship().is_none());
    assert_eq!(chronicle.helm_mastery(), 100);
    assert_eq!(chronicle.achievements().len(), 5);
    assert!(chronicle.achievement("first-steps").map(|a| a.unlocked).unwrap_or(false));
    assert!(chronicle.achievement("ghost").is_none());
    assert_eq!(chronicle.admiral().name, "Ada");
}

/// A returning admiral is greeted without changes
#[test]
fn test_returning_admiral_after_reload() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = ChronicleStore::new(FileStorage::new(dir.path()));

    let mut chronicle = store.load();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    chronicle.first_contact(&mut rng);
    chronicle.finish_onboarding();
    store.save(&chronicle).unwrap();

    let mut reloaded = store.load();
    let before = reloaded.snapshot();
    assert_eq!(reloaded.first_contact(&mut rng), FirstContact::ReturningAdmiral);
    assert_eq!(reloaded.snapshot(), before);
    assert_eq!(reloaded.admiral().name, "Admiral");
}

/// Documents from the earlier app use descriptive ship ids
#[test]
fn test_document_with_descriptive_ship_ids_loads() {
    let dir = tempfile::tempdir().unwrap();
    let mut storage = FileStorage::new(dir.path());
    let document = json!({
        "state": {
            "level": 1,
            "experience": 200,
            "rank": "syntax-sailor",
            "academyCompleted": true,
            "ships": [
                {"id": "ship-academy-graduate", "name": "Academy Graduate", "class": "dinghy",
                 "acquired": "2024-05-01T09:30:00.000Z", "status": "active", "experience": 0}
            ],
            "activeShip": "ship-academy-graduate",
            "fleetSize": 1
        },
        "version": 0
    });
    storage.set_item(STORAGE_KEY, &document.to_string()).unwrap();

    let mut store = ChronicleStore::new(storage);
    let chronicle = store.load();

    assert!(chronicle.academy_completed());
    assert_eq!(chronicle.fleet_size(), 1);
    let active = chronicle.active_ship().unwrap();
    assert_eq!(active.class, ShipClass::Dinghy);
    assert_eq!(active.name, "Academy Graduate");

    // The reissued id is what gets written back
    store.save(&chronicle).unwrap();
    let reloaded = store.load();
    assert_eq!(reloaded.active_ship().map(|s| s.id), Some(active.id));
}
