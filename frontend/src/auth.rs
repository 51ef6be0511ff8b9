//! Reactive session context.
//!
//! Wraps the [`SessionStore`] in a context object so any component can read
//! the session or sign in/out without prop threading. The router is handed
//! [`AuthContext::session_signal`] and never reaches into this module.

use leptos::prelude::*;

use crate::api::SessionHandle;
use crate::session::{Session, SessionError, SessionGrant, SessionStore};
use crate::web::LocalStorage;

#[derive(Clone, Copy)]
pub struct AuthContext {
    store: StoredValue<SessionStore<LocalStorage>>,
    session: ReadSignal<Session>,
    set_session: WriteSignal<Session>,
}

impl AuthContext {
    /// Opens the store (reading `localStorage` once) and mirrors it into a
    /// signal.
    pub fn new() -> Self {
        let store = SessionStore::open(LocalStorage);
        let (session, set_session) = signal(store.session().clone());
        Self {
            store: StoredValue::new(store),
            session,
            set_session,
        }
    }

    pub fn session(&self) -> ReadSignal<Session> {
        self.session
    }

    /// Session signal for the router.
    pub fn session_signal(&self) -> Signal<Session> {
        self.session.into()
    }

    pub fn is_authenticated(&self) -> Signal<bool> {
        let session = self.session;
        Signal::derive(move || session.with(Session::is_authenticated))
    }

    pub fn is_admin(&self) -> Signal<bool> {
        let session = self.session;
        Signal::derive(move || session.with(Session::is_admin))
    }

    /// Replaces the session. The signal is updated before this returns, so a
    /// navigation issued right after already sees the new state.
    pub fn login(&self, grant: SessionGrant) -> Result<(), SessionError> {
        let updated = self.store.try_update_value(|store| {
            store.login(grant)?;
            Ok(store.session().clone())
        });
        match updated {
            Some(Ok(session)) => {
                self.set_session.set(session);
                Ok(())
            }
            Some(Err(e)) => Err(e),
            None => {
                tracing::warn!("login after the session store was disposed");
                Ok(())
            }
        }
    }

    pub fn logout(&self) {
        self.store.update_value(|store| store.logout());
        self.set_session.set(Session::anonymous());
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionHandle for AuthContext {
    fn token(&self) -> Option<String> {
        self.session
            .with_untracked(|s| s.token().map(str::to_string))
    }

    fn expire(&self) {
        self.logout();
    }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}
