use super::*;

// =========================================================
// Helpers
// =========================================================

fn profile(name: &str, email: &str) -> UserProfile {
    UserProfile {
        name: name.to_string(),
        email: email.to_string(),
    }
}

fn open_with(entries: &[(&str, &str)]) -> (SessionStore<MemoryStorage>, MemoryStorage) {
    let storage = MemoryStorage::new();
    for (k, v) in entries {
        storage.set(k, v);
    }
    (SessionStore::open(storage.clone()), storage)
}

// =========================================================
// initialize
// =========================================================

#[test]
fn test_initialize_on_empty_storage_is_unauthenticated() {
    let (store, _) = open_with(&[]);
    assert!(!store.is_authenticated());
    assert_eq!(store.role(), &Role::Unknown);
    assert!(store.user().is_none());
}

#[test]
fn test_initialize_restores_persisted_session() {
    let (store, _) = open_with(&[
        (TOKEN_KEY, "abc"),
        (ROLE_KEY, "admin"),
        (USER_KEY, r#"{"name":"A","email":"a@x.com"}"#),
    ]);

    assert!(store.is_authenticated());
    assert_eq!(store.token(), Some("abc"));
    assert_eq!(store.role(), &Role::Admin);
    assert_eq!(store.user().map(|u| u.name.as_str()), Some("A"));
}

#[test]
fn test_initialize_drops_malformed_profile_only() {
    let (store, _) = open_with(&[
        (TOKEN_KEY, "abc"),
        (ROLE_KEY, "user"),
        (USER_KEY, "{broken"),
    ]);

    assert!(store.user().is_none());
    assert_eq!(store.token(), Some("abc"));
    assert_eq!(store.role(), &Role::User);
    assert!(store.is_authenticated());
}

#[test]
fn test_initialize_treats_blank_token_as_absent() {
    let (store, _) = open_with(&[(TOKEN_KEY, ""), (ROLE_KEY, "admin")]);
    assert!(!store.is_authenticated());
    // a stale admin role without a token grants nothing
    assert!(!store.is_admin());
}

#[test]
fn test_initialize_accepts_null_profile() {
    let (store, _) = open_with(&[(TOKEN_KEY, "abc"), (USER_KEY, "null")]);
    assert!(store.is_authenticated());
    assert!(store.user().is_none());
}

// =========================================================
// login
// =========================================================

#[test]
fn test_login_persists_all_three_keys() {
    let (mut store, storage) = open_with(&[]);

    store
        .login(SessionGrant::new("tok-1", "user", Some(profile("Jane", "jane@example.com"))))
        .unwrap();

    assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("tok-1"));
    assert_eq!(storage.get(ROLE_KEY).as_deref(), Some("user"));
    let stored: UserProfile = serde_json::from_str(&storage.get(USER_KEY).unwrap()).unwrap();
    assert_eq!(stored, profile("Jane", "jane@example.com"));
}

#[test]
fn test_login_is_visible_to_the_next_read() {
    let (mut store, _) = open_with(&[]);
    assert!(!store.is_authenticated());

    store.login(SessionGrant::new("tok-1", "user", None)).unwrap();

    assert!(store.is_authenticated());
    assert_eq!(store.session().token(), Some("tok-1"));
}

#[test]
fn test_login_overwrites_every_field() {
    let (mut store, storage) = open_with(&[]);

    store
        .login(SessionGrant::new("t1", "admin", Some(profile("One", "one@x.com"))))
        .unwrap();
    store
        .login(SessionGrant::new("t2", "user", Some(profile("Two", "two@x.com"))))
        .unwrap();

    assert_eq!(store.token(), Some("t2"));
    assert_eq!(store.role(), &Role::User);
    assert_eq!(store.user(), Some(&profile("Two", "two@x.com")));

    // a fresh store over the same storage sees the same thing
    let reopened = SessionStore::open(storage);
    assert_eq!(reopened.session(), store.session());
}

#[test]
fn test_login_without_profile_removes_previous_profile() {
    let (mut store, storage) = open_with(&[]);

    store
        .login(SessionGrant::new("t1", "user", Some(profile("One", "one@x.com"))))
        .unwrap();
    store.login(SessionGrant::new("t2", "user", None)).unwrap();

    assert!(store.user().is_none());
    assert!(!storage.contains(USER_KEY));
    assert!(store.is_authenticated());
}

#[test]
fn test_login_rejects_empty_token() {
    let (mut store, storage) = open_with(&[]);

    let result = store.login(SessionGrant::new("  ", "admin", None));

    assert_eq!(result, Err(SessionError::EmptyToken));
    assert!(!store.is_authenticated());
    assert!(storage.is_empty());
}

// =========================================================
// logout
// =========================================================

#[test]
fn test_logout_clears_memory_and_storage() {
    let (mut store, storage) = open_with(&[]);
    store
        .login(SessionGrant::new("tok", "admin", Some(profile("A", "a@x.com"))))
        .unwrap();

    store.logout();

    assert_eq!(store.session(), &Session::anonymous());
    assert!(!storage.contains(TOKEN_KEY));
    assert!(!storage.contains(ROLE_KEY));
    assert!(!storage.contains(USER_KEY));
}

#[test]
fn test_logout_is_idempotent() {
    let (mut store, storage) = open_with(&[]);
    store.login(SessionGrant::new("tok", "user", None)).unwrap();

    store.logout();
    let once = store.session().clone();
    store.logout();

    assert_eq!(store.session(), &once);
    assert_eq!(store.token(), None);
    assert_eq!(store.role().as_str(), "");
    assert!(store.user().is_none());
    assert!(storage.is_empty());
}

#[test]
fn test_logout_leaves_foreign_keys_alone() {
    let (mut store, storage) = open_with(&[("i18nextLng", "de")]);
    store.login(SessionGrant::new("tok", "user", None)).unwrap();

    store.logout();

    assert_eq!(storage.get("i18nextLng").as_deref(), Some("de"));
    assert_eq!(storage.len(), 1);
}

// =========================================================
// derived state
// =========================================================

#[test]
fn test_admin_requires_token_and_role() {
    let (mut store, _) = open_with(&[]);
    store.login(SessionGrant::new("t", "user", None)).unwrap();
    assert!(!store.is_admin());

    store.login(SessionGrant::new("t", "admin", None)).unwrap();
    assert!(store.is_admin());

    store.logout();
    assert!(!store.is_admin());
}

#[test]
fn test_display_name_prefers_name_then_email() {
    let session: Session = SessionGrant::new("t", "user", Some(profile("", "x@y.com"))).into();
    assert_eq!(session.display_name(), Some("x@y.com"));

    let session: Session = SessionGrant::new("t", "user", Some(profile("Ann", "ann@x.com"))).into();
    assert_eq!(session.display_name(), Some("Ann"));

    assert_eq!(Session::anonymous().display_name(), None);
}
