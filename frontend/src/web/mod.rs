//! Thin wrappers over browser APIs (fetch, localStorage, history, timers,
//! host-page SDKs). Everything above this module is plain Rust.

pub mod google;
mod http;
pub mod phone;
pub mod route;
pub mod router;
mod storage;
mod timer;

pub use http::FetchHttpClient;
pub use storage::LocalStorage;
pub use timer::Timeout;

/// Blocking `window.confirm`; `false` when there is no window.
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}
