use super::*;
use agricompass::net::types::{Identity, RecordId, Role};
use agricompass::state::session::SessionStore;

#[test]
fn missing_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::open(dir.path().join("absent.json"));
    assert_eq!(storage.get_item("k"), None);
    assert!(!storage.path().exists());
}

#[test]
fn values_survive_reopen_and_parents_are_created() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("session.json");

    let mut storage = FileStorage::open(&path);
    storage.set_item("k", "v").unwrap();

    let reopened = FileStorage::open(&path);
    assert_eq!(reopened.get_item("k"), Some("v".to_owned()));
}

#[test]
fn removal_is_flushed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let mut storage = FileStorage::open(&path);
    storage.set_item("a", "1").unwrap();
    storage.set_item("b", "2").unwrap();
    storage.remove_item("a").unwrap();

    let reopened = FileStorage::open(&path);
    assert_eq!(reopened.get_item("a"), None);
    assert_eq!(reopened.get_item("b"), Some("2".to_owned()));
}

#[test]
fn removing_absent_key_does_not_create_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let mut storage = FileStorage::open(&path);
    storage.remove_item("missing").unwrap();
    assert!(!path.exists());
}

#[test]
fn corrupt_file_opens_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    fs::write(&path, "{not json").unwrap();

    let storage = FileStorage::open(&path);
    assert_eq!(storage.get_item("k"), None);
}

#[test]
fn session_persists_across_restore() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    let farmer = Identity { id: RecordId::Int(1), name: "A".to_owned(), role: Role::Farmer };

    let mut store = SessionStore::restore(FileStorage::open(&path));
    store.establish(farmer.clone(), "t");
    drop(store);

    let mut restored = SessionStore::restore(FileStorage::open(&path));
    assert_eq!(restored.identity(), Some(&farmer));
    assert_eq!(restored.credential(), Some("t"));

    restored.logout();
    let after_logout = SessionStore::restore(FileStorage::open(&path));
    assert!(!after_logout.is_authenticated());
}
