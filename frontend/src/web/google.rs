//! Google Identity Services button.
//!
//! Expects the GIS script (`https://accounts.google.com/gsi/client`) to be
//! loaded by the host page; the button hands us an ID token ("credential")
//! that the backend exchanges for a session.

use js_sys::{Object, Reflect};
use thiserror::Error;
use wasm_bindgen::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GoogleButtonError {
    #[error("Google Sign-In is not available right now.")]
    Unavailable,
    #[error("Google Sign-In could not be started: {0}")]
    Init(String),
}

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["google", "accounts", "id"], js_name = initialize, catch)]
    fn gis_initialize(config: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(js_namespace = ["google", "accounts", "id"], js_name = renderButton, catch)]
    fn gis_render_button(parent: &web_sys::HtmlElement, options: &JsValue) -> Result<(), JsValue>;
}

fn gis_loaded() -> bool {
    let global = js_sys::global();
    ["google", "accounts", "id"]
        .into_iter()
        .try_fold(JsValue::from(global), |obj, key| {
            Reflect::get(&obj, &JsValue::from_str(key))
                .ok()
                .filter(|v| !v.is_undefined() && !v.is_null())
        })
        .is_some()
}

fn set(obj: &Object, key: &str, value: &JsValue) -> Result<(), GoogleButtonError> {
    Reflect::set(obj, &JsValue::from_str(key), value)
        .map(|_| ())
        .map_err(|e| GoogleButtonError::Init(format!("{e:?}")))
}

/// Renders the Google button into `container`. `on_credential` receives the
/// credential string, or an empty string when Google returned none.
pub fn render_button(
    client_id: &str,
    container: &web_sys::HtmlElement,
    on_credential: impl Fn(String) + 'static,
) -> Result<(), GoogleButtonError> {
    if client_id.is_empty() || !gis_loaded() {
        return Err(GoogleButtonError::Unavailable);
    }

    let callback = Closure::<dyn Fn(JsValue)>::new(move |response: JsValue| {
        let credential = Reflect::get(&response, &JsValue::from_str("credential"))
            .ok()
            .and_then(|v| v.as_string())
            .unwrap_or_default();
        on_credential(credential);
    });

    let config = Object::new();
    set(&config, "client_id", &JsValue::from_str(client_id))?;
    set(&config, "callback", callback.as_ref())?;
    gis_initialize(&config).map_err(|e| GoogleButtonError::Init(format!("{e:?}")))?;

    let options = Object::new();
    set(&options, "theme", &JsValue::from_str("outline"))?;
    set(&options, "size", &JsValue::from_str("large"))?;
    set(&options, "text", &JsValue::from_str("signin_with"))?;
    gis_render_button(container, &options)
        .map_err(|e| GoogleButtonError::Init(format!("{e:?}")))?;

    // GIS keeps calling back for the lifetime of the page.
    callback.forget();
    tracing::debug!("google button rendered");
    Ok(())
}
