//! Session store
//!
//! Single source of truth for "who is signed in, with which credential".
//! The store is generic over its durable storage so the browser build can
//! back it with `window.localStorage` while tests use [`MemoryStorage`].
//!
//! State machine: `Unauthenticated` (initial, after `logout`) and
//! `Authenticated` (after any `login`). There is no partial update: `login`
//! replaces the whole (token, role, user) triple and `logout` clears it.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use farmvizion_shared::{Role, UserProfile};
use thiserror::Error;

pub const TOKEN_KEY: &str = "authToken";
pub const ROLE_KEY: &str = "userRole";
pub const USER_KEY: &str = "userInfo";

// =========================================================
// Storage abstraction
// =========================================================

/// String key/value storage that survives a page reload.
///
/// Writes are best-effort: implementations report failure through the
/// returned `bool` and never panic.
pub trait SessionStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> bool;
    fn delete(&self, key: &str) -> bool;
}

/// In-process storage. Clones share the same map, so a test can keep a
/// handle and inspect what the store persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        true
    }

    fn delete(&self, key: &str) -> bool {
        self.entries.borrow_mut().remove(key);
        true
    }
}

// =========================================================
// Session model
// =========================================================

/// Snapshot of the current session.
///
/// `role` and `user` only mean something while `token` is present; every
/// access check goes through [`Session::is_authenticated`] first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    token: Option<String>,
    role: Role,
    user: Option<UserProfile>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn role(&self) -> &Role {
        &self.role
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.is_authenticated() && self.role.is_admin()
    }

    /// Name for greetings: the profile name, else the email, else nothing.
    pub fn display_name(&self) -> Option<&str> {
        if !self.is_authenticated() {
            return None;
        }
        self.user.as_ref().map(|u| {
            if u.name.trim().is_empty() {
                u.email.as_str()
            } else {
                u.name.as_str()
            }
        })
    }
}

/// The canonical (token, role, user) tuple every sign-in flow produces.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionGrant {
    pub token: String,
    pub role: Role,
    pub user: Option<UserProfile>,
}

impl SessionGrant {
    pub fn new(token: impl Into<String>, role: impl Into<Role>, user: Option<UserProfile>) -> Self {
        Self {
            token: token.into(),
            role: role.into(),
            user,
        }
    }
}

impl From<SessionGrant> for Session {
    fn from(grant: SessionGrant) -> Self {
        Self {
            token: Some(grant.token),
            role: grant.role,
            user: grant.user,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("a session needs a non-empty token")]
    EmptyToken,
}

// =========================================================
// Store
// =========================================================

pub struct SessionStore<S: SessionStorage> {
    storage: S,
    session: Session,
}

impl<S: SessionStorage> SessionStore<S> {
    /// Creates an empty store. Call [`SessionStore::initialize`] once before
    /// the first route is rendered.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            session: Session::anonymous(),
        }
    }

    /// `new` followed by `initialize`.
    pub fn open(storage: S) -> Self {
        let mut store = Self::new(storage);
        store.initialize();
        store
    }

    /// Loads the persisted triple.
    ///
    /// Each key is read independently. A user entry that fails to parse is
    /// dropped (and logged) without touching the token or role.
    pub fn initialize(&mut self) {
        let token = self
            .storage
            .get(TOKEN_KEY)
            .filter(|t| !t.trim().is_empty());
        let role = self
            .storage
            .get(ROLE_KEY)
            .map(Role::from)
            .unwrap_or_default();
        let user = self.storage.get(USER_KEY).and_then(|raw| {
            serde_json::from_str::<Option<UserProfile>>(&raw)
                .inspect_err(|e| tracing::warn!(error = %e, "ignoring malformed stored profile"))
                .ok()
                .flatten()
        });

        self.session = Session { token, role, user };
        tracing::debug!(
            authenticated = self.session.is_authenticated(),
            role = %self.session.role,
            "session restored"
        );
    }

    /// Replaces the whole session, in storage and in memory.
    pub fn login(&mut self, grant: SessionGrant) -> Result<(), SessionError> {
        if grant.token.trim().is_empty() {
            tracing::warn!("rejected login without a token");
            return Err(SessionError::EmptyToken);
        }

        self.storage.set(TOKEN_KEY, &grant.token);
        self.storage.set(ROLE_KEY, grant.role.as_str());
        match grant.user.as_ref().map(serde_json::to_string) {
            Some(Ok(json)) => {
                self.storage.set(USER_KEY, &json);
            }
            Some(Err(e)) => {
                tracing::warn!(error = %e, "could not persist profile");
                self.storage.delete(USER_KEY);
            }
            None => {
                self.storage.delete(USER_KEY);
            }
        }

        tracing::info!(role = %grant.role, has_profile = grant.user.is_some(), "signed in");
        self.session = grant.into();
        Ok(())
    }

    /// Clears storage and memory. Safe to call when already signed out.
    pub fn logout(&mut self) {
        self.storage.delete(TOKEN_KEY);
        self.storage.delete(ROLE_KEY);
        self.storage.delete(USER_KEY);

        if self.session.is_authenticated() {
            tracing::info!("signed out");
        }
        self.session = Session::anonymous();
    }

    /// Current in-memory session. Reads never touch storage.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Bearer token, `None` while signed out.
    pub fn token(&self) -> Option<&str> {
        self.session.token()
    }

    /// `Role::Unknown` while signed out.
    pub fn role(&self) -> &Role {
        self.session.role()
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.session.user()
    }

    /// True once a grant with a token has been accepted.
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Signed in with the admin role.
    pub fn is_admin(&self) -> bool {
        self.session.is_admin()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

#[cfg(test)]
mod tests;
