//! Phone OTP bridge.
//!
//! The SMS provider SDK lives in the host page and is exposed as
//! `window.farmvizionPhoneAuth` with two promise-returning methods:
//! `sendCode(phone)` and `confirm(code) -> { phoneNumber }`. Errors are
//! expected to carry a provider `code` such as `auth/invalid-phone-number`.

use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::credentials::{PhoneAuthError, PhoneVerifier, VerifiedPhone, is_e164};

const BRIDGE: &str = "farmvizionPhoneAuth";

#[derive(Debug, Clone, Copy, Default)]
pub struct JsPhoneVerifier;

impl JsPhoneVerifier {
    fn bridge() -> Result<JsValue, PhoneAuthError> {
        let bridge = Reflect::get(&js_sys::global(), &JsValue::from_str(BRIDGE))
            .map_err(|_| PhoneAuthError::Unavailable)?;
        if bridge.is_undefined() || bridge.is_null() {
            return Err(PhoneAuthError::Unavailable);
        }
        Ok(bridge)
    }

    async fn call(method: &str, arg: &str) -> Result<JsValue, PhoneAuthError> {
        let bridge = Self::bridge()?;
        let function: Function = Reflect::get(&bridge, &JsValue::from_str(method))
            .ok()
            .and_then(|f| f.dyn_into().ok())
            .ok_or(PhoneAuthError::Unavailable)?;
        let promise: Promise = function
            .call1(&bridge, &JsValue::from_str(arg))
            .map_err(provider_error)?
            .dyn_into()
            .map_err(|_| PhoneAuthError::Provider(format!("{method} did not return a promise")))?;
        JsFuture::from(promise).await.map_err(provider_error)
    }
}

fn provider_error(err: JsValue) -> PhoneAuthError {
    let field = |name: &str| {
        Reflect::get(&err, &JsValue::from_str(name))
            .ok()
            .and_then(|v| v.as_string())
    };
    match field("code").as_deref() {
        Some("auth/invalid-phone-number") => PhoneAuthError::InvalidNumber,
        Some("auth/invalid-verification-code") | Some("auth/code-expired") => {
            PhoneAuthError::InvalidCode
        }
        code => {
            let detail = field("message")
                .or_else(|| code.map(str::to_string))
                .unwrap_or_else(|| format!("{err:?}"));
            tracing::warn!(%detail, "phone provider error");
            PhoneAuthError::Provider(detail)
        }
    }
}

#[async_trait::async_trait(?Send)]
impl PhoneVerifier for JsPhoneVerifier {
    async fn send_code(&self, phone: &str) -> Result<(), PhoneAuthError> {
        if !is_e164(phone) {
            return Err(PhoneAuthError::InvalidNumber);
        }
        Self::call("sendCode", phone).await?;
        tracing::info!("verification code sent");
        Ok(())
    }

    async fn confirm(&self, code: &str) -> Result<VerifiedPhone, PhoneAuthError> {
        if code.trim().is_empty() {
            return Err(PhoneAuthError::InvalidCode);
        }
        let result = Self::call("confirm", code.trim()).await?;
        let phone_number = Reflect::get(&result, &JsValue::from_str("phoneNumber"))
            .ok()
            .and_then(|v| v.as_string())
            .filter(|p| !p.is_empty())
            .ok_or_else(|| PhoneAuthError::Provider("no phone number in result".to_string()))?;
        Ok(VerifiedPhone { phone_number })
    }
}
