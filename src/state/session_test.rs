use super::*;
use crate::net::types::RecordId;
use crate::util::storage::MemoryStorage;

fn farmer() -> Identity {
    Identity { id: RecordId::Int(1), name: "A".to_owned(), role: Role::Farmer }
}

#[test]
fn restore_from_empty_storage_is_signed_out() {
    let store = SessionStore::restore(MemoryStorage::new());
    assert!(store.identity().is_none());
    assert!(store.credential().is_none());
    assert!(!store.is_authenticated());
    assert_eq!(store.epoch(), 0);
}

#[test]
fn restore_reads_identity_and_credential() {
    let storage = MemoryStorage::with_items([
        (USER_KEY, r#"{"id":1,"name":"A","role":"farmer"}"#),
        (TOKEN_KEY, "t"),
    ]);
    let store = SessionStore::restore(storage);
    assert_eq!(store.identity(), Some(&farmer()));
    assert_eq!(store.credential(), Some("t"));
    assert_eq!(store.role(), Some(Role::Farmer));
}

#[test]
fn malformed_identity_restores_as_no_session() {
    let storage = MemoryStorage::with_items([(USER_KEY, "{not json"), (TOKEN_KEY, "t")]);
    let store = SessionStore::restore(storage);
    assert!(store.identity().is_none());
    assert!(store.credential().is_none());
    assert_eq!(store.storage().get_item(USER_KEY), None);
    assert_eq!(store.storage().get_item(TOKEN_KEY), None);
}

#[test]
fn identity_with_unknown_role_restores_as_no_session() {
    let storage = MemoryStorage::with_items([
        (USER_KEY, r#"{"id":1,"name":"A","role":"admin"}"#),
        (TOKEN_KEY, "t"),
    ]);
    let store = SessionStore::restore(storage);
    assert!(!store.is_authenticated());
}

#[test]
fn credential_without_identity_is_discarded() {
    let storage = MemoryStorage::with_items([(TOKEN_KEY, "orphan")]);
    let store = SessionStore::restore(storage);
    assert!(store.credential().is_none());
    assert_eq!(store.storage().get_item(TOKEN_KEY), None);
}

#[test]
fn establish_after_login_response_reports_identity_and_credential() {
    let mut store = SessionStore::restore(MemoryStorage::new());
    store.establish(farmer(), "t");

    assert_eq!(store.identity(), Some(&farmer()));
    assert_eq!(store.credential(), Some("t"));
    assert_eq!(store.storage().get_item(TOKEN_KEY), Some("t".to_owned()));
    let stored: Identity = serde_json::from_str(&store.storage().get_item(USER_KEY).unwrap()).unwrap();
    assert_eq!(stored, farmer());
}

#[test]
fn logout_leaves_no_residue() {
    let mut store = SessionStore::restore(MemoryStorage::new());
    for _ in 0..3 {
        store.establish(farmer(), "t");
        store.logout();

        assert!(store.identity().is_none());
        assert!(store.credential().is_none());
        assert_eq!(store.storage().get_item(USER_KEY), None);
        assert_eq!(store.storage().get_item(TOKEN_KEY), None);
    }
}

#[test]
fn empty_credential_deletes_storage_entry() {
    let mut store = SessionStore::restore(MemoryStorage::new());
    store.set_credential("t");
    assert_eq!(store.storage().get_item(TOKEN_KEY), Some("t".to_owned()));
    store.set_credential("");
    assert_eq!(store.storage().get_item(TOKEN_KEY), None);
    assert!(store.credential().is_none());
}

#[test]
fn every_mutation_advances_epoch() {
    let mut store = SessionStore::restore(MemoryStorage::new());
    let start = store.epoch();
    store.establish(farmer(), "t");
    let after_login = store.epoch();
    assert!(after_login > start);
    store.logout();
    assert!(store.epoch() > after_login);
}
