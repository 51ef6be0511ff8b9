//! One-shot `setTimeout` wrapper.

use wasm_bindgen::prelude::*;

/// Runs a callback once after a delay. Dropping the handle cancels it, so a
/// page that unmounts before the delay elapses never sees the callback.
pub struct Timeout {
    handle: Option<i32>,
    _closure: Closure<dyn FnMut()>,
}

impl Timeout {
    pub fn new<F>(millis: u32, callback: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        let closure = Closure::once(callback);
        let handle = web_sys::window().and_then(|window| {
            window
                .set_timeout_with_callback_and_timeout_and_arguments_0(
                    closure.as_ref().unchecked_ref(),
                    millis.min(i32::MAX as u32) as i32,
                )
                .inspect_err(|e| tracing::warn!(error = ?e, "setTimeout failed"))
                .ok()
        });

        Self {
            handle,
            _closure: closure,
        }
    }

    pub fn cancel(&mut self) {
        if let (Some(handle), Some(window)) = (self.handle.take(), web_sys::window()) {
            window.clear_timeout_with_handle(handle);
        }
    }
}

impl Drop for Timeout {
    fn drop(&mut self) {
        self.cancel();
    }
}
