//! Edge case tests: malformed records, tampered fields, unusual IDs and
//! PEM framing.

use mkm_identity::crypto::pem::PemBlock;
use mkm_identity::storage::HULK_JSON;
use mkm_identity::{
    Address, IdentityError, IdentityRecord, Identifier, Immortals, MetaType, StructureViolation,
};
use serde_json::Value;

fn hulk_value() -> Value {
    serde_json::from_str(HULK_JSON).unwrap()
}

fn record_from(value: Value) -> mkm_identity::Result<IdentityRecord> {
    IdentityRecord::from_json(&value.to_string())
}

// === Parsing Edge Cases ===

#[test]
fn edge_missing_top_level_fields_rejected() {
    for field in ["ID", "meta", "privateKey", "profile"] {
        let mut value = hulk_value();
        value.as_object_mut().unwrap().remove(field);
        assert!(record_from(value).is_err(), "record without {field} parsed");
    }
}

#[test]
fn edge_string_version_accepted() {
    let mut value = hulk_value();
    value["meta"]["version"] = Value::String("MKM".into());
    let record = record_from(value).unwrap();
    assert_eq!(record.meta.version, MetaType::Mkm);
    assert!(record.verify().is_valid);
}

#[test]
fn edge_unknown_version_rejected() {
    let mut value = hulk_value();
    value["meta"]["version"] = Value::from(42);
    assert!(record_from(value).is_err());
}

#[test]
fn edge_invalid_top_level_id_rejected() {
    let mut value = hulk_value();
    value["ID"] = Value::String("hulk@not-a-real-address".into());
    assert!(record_from(value).is_err());
}

#[test]
fn edge_names_must_be_strings() {
    let mut value = hulk_value();
    value["profile"]["names"] = serde_json::json!([1, 2]);
    assert!(record_from(value).is_err());
}

// === Structural Edge Cases ===

#[test]
fn edge_empty_names_is_structure_violation() {
    let mut value = hulk_value();
    value["profile"]["names"] = serde_json::json!([]);
    let record = record_from(value).unwrap();
    let result = record.verify();
    assert_eq!(result.structure, vec![StructureViolation::NoNames]);
    assert!(result.meta_valid && result.meta_matches_id && result.key_pair_matches);
    assert!(!result.is_valid);
}

#[test]
fn edge_pem_without_end_marker() {
    let mut value = hulk_value();
    let data = value["privateKey"]["data"].as_str().unwrap().to_string();
    let truncated = data.replace("-----END RSA PRIVATE KEY-----", "");
    value["privateKey"]["data"] = Value::String(truncated);
    let record = record_from(value).unwrap();
    let violations = record.check_structure();
    assert!(matches!(
        violations.as_slice(),
        [StructureViolation::PrivateKeyPem(_)]
    ));
    assert!(!record.verify().key_pair_matches);
}

#[test]
fn edge_pem_with_swapped_end_label() {
    let text = HULK_JSON;
    let value: Value = serde_json::from_str(text).unwrap();
    let data = value["meta"]["key"]["data"].as_str().unwrap();
    let swapped = data.replace("-----END PUBLIC KEY-----", "-----END RSA PUBLIC KEY-----");
    let err = PemBlock::parse(&swapped).unwrap_err();
    assert!(matches!(err, IdentityError::InvalidPem(_)));
}

#[test]
fn edge_private_key_with_surrounding_text() {
    let mut value = hulk_value();
    let data = value["privateKey"]["data"].as_str().unwrap().to_string();
    value["privateKey"]["data"] = Value::String(format!("exported by keytool\n{data}\n"));
    let record = record_from(value).unwrap();
    assert!(record.verify().is_valid);
}

// === Cryptographic Edge Cases ===

#[test]
fn edge_fingerprint_with_transport_prefix() {
    let mut value = hulk_value();
    let fingerprint = value["meta"]["fingerprint"].as_str().unwrap().to_string();
    value["meta"]["fingerprint"] = Value::String(format!("base64,{fingerprint}"));
    let record = record_from(value).unwrap();
    assert!(record.verify().is_valid);
}

#[test]
fn edge_truncated_fingerprint() {
    let mut value = hulk_value();
    value["meta"]["fingerprint"] = Value::String("jIPGWpWSbR/DQH6ol3t9DQ==".into());
    let record = record_from(value).unwrap();
    let result = record.verify();
    assert!(!result.meta_valid);
    assert!(!result.is_valid);
}

#[test]
fn edge_id_on_other_network_does_not_match() {
    let record = IdentityRecord::from_json(HULK_JSON).unwrap();
    let group_address = record
        .meta
        .generate_address(mkm_identity::NetworkType::Group)
        .unwrap();
    let group_id = Identifier::new(Some("hulk".into()), group_address, None);
    // same meta, other network: the meta itself still owns this ID
    assert!(record.meta.match_identifier(&group_id));
    assert_ne!(group_id, record.id);
}

#[test]
fn edge_meta_key_swapped_for_other_key() {
    let mut value = hulk_value();
    let other = IdentityRecord::generate(
        "other",
        vec!["Other".into()],
        mkm_identity::NetworkType::Main,
        1024,
    )
    .unwrap();
    value["meta"]["key"] = serde_json::to_value(&other.meta.key).unwrap();
    let record = record_from(value).unwrap();
    let result = record.verify();
    assert!(!result.meta_valid, "fingerprint must not verify under another key");
    assert!(!result.key_pair_matches);
    assert!(Immortals::new().insert(record).is_err());
}

// === Identifier Edge Cases ===

#[test]
fn edge_identifier_terminal_with_slashes() {
    let id = Identifier::parse("hulk@4YeVEN3aUnvC1DNUufCq1bs9zoBSJTzVEj/a/b").unwrap();
    assert_eq!(id.terminal(), Some("a/b"));
    assert_eq!(id.to_string(), "hulk@4YeVEN3aUnvC1DNUufCq1bs9zoBSJTzVEj/a/b");
}

#[test]
fn edge_identifier_unicode_name() {
    let id = Identifier::parse("浩克@4YeVEN3aUnvC1DNUufCq1bs9zoBSJTzVEj").unwrap();
    assert_eq!(id.name(), Some("浩克"));
}

#[test]
fn edge_address_with_non_base58_chars() {
    // right length, '0' is not in the alphabet
    assert!(Address::parse("0YeVEN3aUnvC1DNUufCq1bs9zoBSJTzVEj").is_err());
}
