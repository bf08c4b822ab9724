//! Tests for strongly-typed identifiers

use core_kernel::{ClaimId, ReceiptId, UserId};
use uuid::Uuid;

#[test]
fn test_prefixed_display() {
    assert!(ClaimId::new().to_string().starts_with("CLM-"));
    assert!(UserId::new().to_string().starts_with("USR-"));
    assert!(ReceiptId::new().to_string().starts_with("RCPT-"));
}

#[test]
fn test_parse_with_and_without_prefix() {
    let id = ClaimId::new();

    let with_prefix: ClaimId = id.to_string().parse().unwrap();
    assert_eq!(id, with_prefix);

    let bare: ClaimId = id.as_uuid().to_string().parse().unwrap();
    assert_eq!(id, bare);
}

#[test]
fn test_parse_rejects_garbage() {
    assert!("not-a-uuid".parse::<UserId>().is_err());
}

#[test]
fn test_serde_is_transparent() {
    let uuid = Uuid::new_v4();
    let id = UserId::from_uuid(uuid);

    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, format!("\"{}\"", uuid));

    let back: UserId = serde_json::from_str(&json).unwrap();
    assert_eq!(id, back);
}
