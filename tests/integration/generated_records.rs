//! Integration tests: generating, saving and reloading new identities.

use mkm_identity::crypto::{PrivateKey, DEFAULT_KEY_BITS};
use mkm_identity::storage::{load_record, read_public_meta, save_record};
use mkm_identity::{IdentityRecord, Identifier, Immortals, MetaType, NetworkType};

#[test]
fn generated_record_is_valid() {
    let record = IdentityRecord::generate(
        "moky",
        vec!["Albert Moky".to_string(), "老狗".to_string()],
        NetworkType::Main,
        DEFAULT_KEY_BITS,
    )
    .expect("generate failed");

    assert_eq!(record.id.name(), Some("moky"));
    assert!(record.id.is_user());
    assert_eq!(record.name(), Some("Albert Moky"));

    let result = record.verify();
    assert!(result.is_valid, "errors: {:?}", result.errors);
    assert_eq!(result.profile_signature, Some(true));
}

#[test]
fn generated_record_survives_disk_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("moky.json");
    let record = IdentityRecord::generate(
        "moky",
        vec!["Moky".to_string()],
        NetworkType::Main,
        DEFAULT_KEY_BITS,
    )
    .unwrap();

    save_record(&record, &path).unwrap();
    let loaded = load_record(&path).unwrap();
    assert_eq!(loaded, record);
    loaded.verify_strict().unwrap();

    let (id, meta) = read_public_meta(&path).unwrap();
    assert_eq!(Identifier::parse(&id).unwrap(), record.id);
    assert!(meta.match_identifier(&record.id));
}

#[test]
fn generated_station_has_station_address() {
    let record = IdentityRecord::generate(
        "gsp-s001",
        vec!["Genesis Station".to_string()],
        NetworkType::Station,
        DEFAULT_KEY_BITS,
    )
    .unwrap();
    assert_eq!(record.id.network(), NetworkType::Station);
    assert!(record.verify().is_valid);
}

#[test]
fn generated_record_admitted_to_registry() {
    let record = IdentityRecord::generate(
        "thor",
        vec!["Thor".to_string()],
        NetworkType::Main,
        DEFAULT_KEY_BITS,
    )
    .unwrap();
    let mut immortals = Immortals::builtin().unwrap();
    let id = immortals.insert(record.clone()).unwrap();
    assert_eq!(id, record.id);
    assert_eq!(immortals.len(), 2);
    assert_eq!(immortals.profile(&id).unwrap().name(), Some("Thor"));
}

#[test]
fn ex_eth_record_from_known_key() {
    let key =
        PrivateKey::from_ecc_text("4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318")
            .unwrap();
    let record = IdentityRecord::build(
        MetaType::ExEth,
        &key,
        Some("vitalik"),
        vec!["Vitalik".to_string()],
        NetworkType::Main,
    )
    .unwrap();
    assert_eq!(
        record.id,
        Identifier::parse("vitalik@0x2c7536E3605D9C16a7a3D7b1898e529396a65c23").unwrap()
    );
    assert!(record.verify().is_valid);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vitalik.json");
    save_record(&record, &path).unwrap();
    let loaded = load_record(&path).unwrap();
    assert_eq!(loaded, record);

    let (id, meta) = read_public_meta(&path).unwrap();
    assert_eq!(id, record.id.to_string());
    assert_eq!(meta.version, MetaType::ExEth);

    let mut immortals = Immortals::builtin().unwrap();
    immortals.insert(loaded).unwrap();
    assert!(immortals.private_key(&record.id).is_ok());
}

#[test]
fn eth_record_has_no_name() {
    let record = IdentityRecord::generate_meta(
        MetaType::Eth,
        Some("ignored"),
        vec!["Anon".to_string()],
        NetworkType::Main,
        DEFAULT_KEY_BITS,
    )
    .unwrap();
    assert_eq!(record.id.name(), None);
    assert!(record.id.address().is_eth());
    assert!(record.meta.match_identifier(&record.id));
    assert!(record.verify().is_valid);
}
