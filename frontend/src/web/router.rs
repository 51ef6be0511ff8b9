//! Router service.
//!
//! Owns every `window.history` call. Each navigation, each `popstate` and
//! each session change goes through [`resolve_route`] before the route
//! signal is touched, so a guarded view is never rendered for a session
//! that may not see it.

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::route::{AppRoute, GuardDecision, resolve, resolve_route};
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HistoryMode {
    Push,
    Replace,
}

/// Current location as a routable path. Legacy `/#/about` links are
/// honoured when the real path is the root.
fn current_location() -> String {
    let Some(location) = web_sys::window().map(|w| w.location()) else {
        return "/".to_string();
    };
    let path = location.pathname().unwrap_or_else(|_| "/".to_string());
    let hash = location.hash().unwrap_or_default();
    if path == "/" && hash.starts_with("#/") {
        hash
    } else {
        path
    }
}

fn write_history(path: &str, mode: HistoryMode) {
    let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
        return;
    };
    let result = match mode {
        HistoryMode::Push => history.push_state_with_url(&JsValue::NULL, "", Some(path)),
        HistoryMode::Replace => history.replace_state_with_url(&JsValue::NULL, "", Some(path)),
    };
    if let Err(e) = result {
        tracing::warn!(path, error = ?e, "history update failed");
    }
}

fn scroll_to_top() {
    if let Some(window) = web_sys::window() {
        window.scroll_to_with_x_and_y(0.0, 0.0);
    }
}

#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    session: Signal<Session>,
}

impl RouterService {
    fn new(session: Signal<Session>) -> Self {
        let decision = session.with_untracked(|s| resolve(&current_location(), s));
        if let GuardDecision::Redirect(target) = &decision {
            tracing::debug!(%target, "initial location denied");
            write_history(&target.to_path(), HistoryMode::Replace);
        }
        let (current_route, set_route) = signal(decision.into_route());

        Self {
            current_route,
            set_route,
            session,
        }
    }

    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// Navigates to `path` (pushing a history entry).
    pub fn navigate(&self, path: &str) {
        self.navigate_to(AppRoute::from_path(path));
    }

    pub fn navigate_to(&self, route: AppRoute) {
        let decision = self
            .session
            .with_untracked(|s| resolve_route(route.clone(), s));
        match &decision {
            GuardDecision::Render(target) => {
                tracing::debug!(%target, "navigate");
            }
            GuardDecision::Redirect(target) => {
                tracing::debug!(requested = %route, %target, "navigation denied, redirecting");
            }
        }
        // The denied path never enters the history, so back cannot return to it.
        let target = decision.into_route();
        write_history(&target.to_path(), HistoryMode::Push);
        self.set_route.set(target);
        scroll_to_top();
    }

    /// Back/forward buttons.
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;
        let session = self.session;

        let closure = Closure::<dyn Fn()>::new(move || {
            let decision = session.with_untracked(|s| resolve(&current_location(), s));
            if let GuardDecision::Redirect(target) = &decision {
                tracing::debug!(%target, "history entry denied, redirecting");
                write_history(&target.to_path(), HistoryMode::Replace);
            }
            set_route.set(decision.into_route());
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // Listener lives as long as the page.
        closure.forget();
    }

    /// Re-checks the current route whenever the session changes.
    fn setup_session_redirect(&self) {
        let current_route = self.current_route;
        let set_route = self.set_route;
        let session = self.session;

        Effect::new(move |_| {
            let route = current_route.get_untracked();
            let decision = session.with(|s| resolve_route(route, s));
            if let GuardDecision::Redirect(target) = decision {
                tracing::debug!(%target, "session changed, current route no longer allowed");
                write_history(&target.to_path(), HistoryMode::Replace);
                set_route.set(target);
            }
        });
    }
}

fn provide_router(session: Signal<Session>) -> RouterService {
    let router = RouterService::new(session);
    router.init_popstate_listener();
    router.setup_session_redirect();
    provide_context(router);
    router
}

pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// Components
// ============================================================================

#[component]
pub fn Router(session: Signal<Session>, children: Children) -> impl IntoView {
    provide_router(session);
    children()
}

#[component]
pub fn RouterOutlet(matcher: fn(AppRoute) -> AnyView) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}

/// In-app link: a real `href` for middle-click and copy, client-side
/// navigation for plain clicks.
#[component]
pub fn Link(
    #[prop(into)] to: String,
    #[prop(into, optional)] class: String,
    children: Children,
) -> impl IntoView {
    let router = use_router();
    let target = to.clone();
    let on_click = move |ev: leptos::ev::MouseEvent| {
        if ev.ctrl_key() || ev.meta_key() || ev.shift_key() || ev.button() != 0 {
            return;
        }
        ev.prevent_default();
        router.navigate(&target);
    };

    view! {
        <a href=to class=class on:click=on_click>
            {children()}
        </a>
    }
}
