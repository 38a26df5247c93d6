//! Stress test: many identities from one key, all with unique IDs, all
//! verifying; concurrent verification of the built-in fixture.

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use mkm_identity::storage::{save_record, HULK_JSON};
use mkm_identity::{IdentityRecord, Immortals, NetworkType};

fn hulk() -> IdentityRecord {
    IdentityRecord::from_json(HULK_JSON).unwrap()
}

#[test]
fn stress_100_seeds_unique_ids() {
    let key = hulk().private_key.private_key().unwrap();
    let mut ids = HashSet::new();

    for i in 0..100 {
        let record = IdentityRecord::from_private_key(
            &key,
            &format!("agent-{i}"),
            vec![format!("Agent {i}")],
            NetworkType::Main,
        )
        .expect("build should succeed");

        assert!(
            ids.insert(record.id.to_string()),
            "Duplicate ID found: {}",
            record.id
        );
        assert!(record.verify().is_valid, "record {i} should verify");
    }

    assert_eq!(ids.len(), 100);
}

#[test]
fn stress_registry_loads_50_records() {
    let key = hulk().private_key.private_key().unwrap();
    let dir = tempfile::tempdir().unwrap();

    for i in 0..50 {
        let record = IdentityRecord::from_private_key(
            &key,
            &format!("bot-{i}"),
            vec![format!("Bot {i}")],
            NetworkType::Robot,
        )
        .unwrap();
        save_record(&record, &dir.path().join(format!("bot-{i}.json"))).unwrap();
    }

    let mut immortals = Immortals::builtin().unwrap();
    let admitted = immortals.load_dir(dir.path()).unwrap();
    assert_eq!(admitted, 50);
    assert_eq!(immortals.len(), 51);
    assert!(immortals
        .identifiers()
        .iter()
        .filter(|id| id.network() == NetworkType::Robot)
        .all(|id| id.name().map_or(false, |n| n.starts_with("bot-"))));
}

#[test]
fn stress_concurrent_fixture_verification() {
    let record = Arc::new(hulk());
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let record = Arc::clone(&record);
            thread::spawn(move || (0..10).all(|_| record.verify().is_valid))
        })
        .collect();

    for handle in handles {
        assert!(handle.join().expect("thread panicked"));
    }
}
