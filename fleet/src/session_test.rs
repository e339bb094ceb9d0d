use super::*;

#[test]
fn fresh_session_is_not_authenticated() {
    let session = Session::new(MemoryStorage::default());
    assert!(!session.is_authenticated());
    assert_eq!(session.token(), None);
}

#[test]
fn set_token_persists_under_fixed_key() {
    let storage = MemoryStorage::default();
    let session = Session::new(storage.clone());
    session.set_token("abc");

    assert!(session.is_authenticated());
    assert_eq!(storage.load(TOKEN_KEY), Some("abc".to_owned()));
}

#[test]
fn token_survives_a_new_session_over_the_same_storage() {
    let storage = MemoryStorage::default();
    Session::new(storage.clone()).set_token("abc");

    let reloaded = Session::new(storage);
    assert_eq!(reloaded.token(), Some("abc".to_owned()));
}

#[test]
fn clear_removes_token() {
    let session = Session::new(MemoryStorage::default());
    session.set_token("abc");
    session.clear();
    assert!(!session.is_authenticated());
}

#[test]
fn blank_token_counts_as_absent() {
    let session = Session::new(MemoryStorage::default());
    session.set_token("   ");
    assert!(!session.is_authenticated());
}
