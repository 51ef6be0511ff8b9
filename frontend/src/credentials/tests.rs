use std::cell::RefCell;

use farmvizion_shared::{HttpMethod, UserProfile};
use serde_json::json;

use super::*;
use crate::request::{MockHttpClient, TransportError};
use crate::session::{MemoryStorage, SessionStore};

const BASE: &str = "http://api.test";

fn service() -> AuthService<MockHttpClient> {
    AuthService::new(ApiClient::new(BASE, MockHttpClient::new()))
}

fn mock(svc: &AuthService<MockHttpClient>) -> &MockHttpClient {
    svc.api.client()
}

fn jane() -> UserProfile {
    UserProfile {
        name: "Jane".into(),
        email: "jane@example.com".into(),
    }
}

// =========================================================
// Outcome normalisation
// =========================================================

#[test]
fn test_every_provider_normalises_to_the_same_grant() {
    let res = AuthResponse {
        token: Some("tok".into()),
        role: Role::Admin,
        user: Some(jane()),
    };
    let expected = SessionGrant::new("tok", Role::Admin, Some(jane()));

    for outcome in [
        CredentialOutcome::EmailPassword(res.clone()),
        CredentialOutcome::Google(res.clone()),
        CredentialOutcome::Phone(res),
    ] {
        assert_eq!(outcome.into_grant().unwrap(), expected);
    }
}

#[test]
fn test_missing_profile_is_kept_optional() {
    let res = AuthResponse {
        token: Some("tok".into()),
        role: Role::User,
        user: None,
    };
    let grant = CredentialOutcome::EmailPassword(res).into_grant().unwrap();
    assert!(grant.user.is_none());
}

#[test]
fn test_tokenless_response_is_rejected_per_provider() {
    let empty = AuthResponse::default();

    let err = CredentialOutcome::EmailPassword(empty.clone())
        .into_grant()
        .unwrap_err();
    assert_eq!(err.user_message(), "Invalid response from server.");

    let err = CredentialOutcome::Google(empty.clone()).into_grant().unwrap_err();
    assert_eq!(err.user_message(), "Invalid response from Google sign-in.");

    let blank = AuthResponse {
        token: Some("  ".into()),
        ..empty
    };
    let err = CredentialOutcome::Phone(blank).into_grant().unwrap_err();
    assert_eq!(err.user_message(), PHONE_SIGN_IN_FAILED);
}

#[test]
fn test_oauth_redirect_defaults_to_user_role() {
    let grant = CredentialOutcome::OAuthRedirect {
        token: Some("redirect-tok".into()),
    }
    .into_grant()
    .unwrap();

    assert_eq!(grant, SessionGrant::new("redirect-tok", Role::User, None));

    let err = CredentialOutcome::OAuthRedirect { token: None }
        .into_grant()
        .unwrap_err();
    assert!(matches!(err, AuthFlowError::InvalidResponse(_)));
}

// =========================================================
// Email / password
// =========================================================

#[tokio::test]
async fn test_password_sign_in_then_login_once() {
    let svc = service();
    mock(&svc).mock_response(
        HttpMethod::Post,
        "http://api.test/api/login",
        200,
        json!({ "token": "tok-123", "role": "user", "user": { "name": "Jane", "email": "jane@example.com" } }),
    );

    let grant = svc
        .sign_in_with_password(" jane@example.com ", "secret")
        .await
        .unwrap();

    let mut store = SessionStore::open(MemoryStorage::new());
    store.login(grant).unwrap();
    assert!(store.is_authenticated());
    assert_eq!(store.user(), Some(&jane()));

    assert_eq!(mock(&svc).request_count(), 1);
    let body: serde_json::Value =
        serde_json::from_str(mock(&svc).last_request().unwrap().body.as_deref().unwrap()).unwrap();
    assert_eq!(body["email"], "jane@example.com");
}

#[tokio::test]
async fn test_password_sign_in_accepts_null_role() {
    let svc = service();
    mock(&svc).mock_response(
        HttpMethod::Post,
        "http://api.test/api/login",
        200,
        json!({ "token": "t", "role": null }),
    );

    let grant = svc.sign_in_with_password("a@x.com", "pw").await.unwrap();

    assert_eq!(grant, SessionGrant::new("t", Role::Unknown, None));
    let mut store = SessionStore::open(MemoryStorage::new());
    store.login(grant).unwrap();
    assert!(store.is_authenticated());
    assert!(!store.is_admin());
}

#[tokio::test]
async fn test_partial_profile_does_not_block_sign_in() {
    let svc = service();
    mock(&svc).mock_response(
        HttpMethod::Post,
        "http://api.test/api/login",
        200,
        json!({ "token": "t", "user": { "name": "X" } }),
    );

    let grant = svc.sign_in_with_password("x@x.com", "pw").await.unwrap();

    assert_eq!(grant.token, "t");
    assert_eq!(grant.user.as_ref().map(|u| u.name.as_str()), Some("X"));
    let mut store = SessionStore::open(MemoryStorage::new());
    store.login(grant).unwrap();
    assert_eq!(store.session().display_name(), Some("X"));
}

#[tokio::test]
async fn test_password_sign_in_shows_backend_error() {
    let svc = service();
    mock(&svc).mock_response(
        HttpMethod::Post,
        "http://api.test/api/login",
        401,
        json!({ "error": "Invalid email or password" }),
    );

    let err = svc.sign_in_with_password("a@x.com", "nope").await.unwrap_err();

    assert_eq!(err.user_message(), "Invalid email or password");
}

#[tokio::test]
async fn test_password_sign_in_without_error_field_uses_fallback() {
    let svc = service();
    mock(&svc).mock_response(HttpMethod::Post, "http://api.test/api/login", 500, json!({}));

    let err = svc.sign_in_with_password("a@x.com", "pw").await.unwrap_err();

    assert_eq!(err.user_message(), SIGN_IN_FAILED);
}

#[tokio::test]
async fn test_password_sign_in_network_failure() {
    let svc = service();
    mock(&svc).mock_failure(
        HttpMethod::Post,
        "http://api.test/api/login",
        TransportError::Network("offline".into()),
    );

    let err = svc.sign_in_with_password("a@x.com", "pw").await.unwrap_err();

    assert_eq!(err.user_message(), crate::api::NETWORK_ERROR_MESSAGE);
}

#[tokio::test]
async fn test_blank_credentials_send_nothing() {
    let svc = service();
    let err = svc.sign_in_with_password("", "pw").await.unwrap_err();
    assert!(matches!(err, AuthFlowError::Validation(_)));
    assert_eq!(mock(&svc).request_count(), 0);
}

// =========================================================
// Google
// =========================================================

#[tokio::test]
async fn test_google_without_credential_sends_nothing() {
    let svc = service();

    let err = svc.sign_in_with_google("").await.unwrap_err();

    assert_eq!(err.user_message(), "No Google credential received.");
    assert_eq!(mock(&svc).request_count(), 0);
}

#[tokio::test]
async fn test_google_exchange_posts_credential() {
    let svc = service();
    mock(&svc).mock_response(
        HttpMethod::Post,
        "http://api.test/api/auth/google",
        200,
        json!({ "token": "g-tok", "role": "admin", "user": { "name": "Ann", "email": "ann@x.com" } }),
    );

    let grant = svc.sign_in_with_google("id-token").await.unwrap();

    assert_eq!(grant.role, Role::Admin);
    let sent = mock(&svc).last_request().unwrap();
    assert_eq!(sent.body.as_deref(), Some(r#"{"credential":"id-token"}"#));
}

// =========================================================
// Phone
// =========================================================

struct FakeVerifier {
    pending: RefCell<Option<String>>,
}

#[async_trait::async_trait(?Send)]
impl PhoneVerifier for FakeVerifier {
    async fn send_code(&self, phone: &str) -> Result<(), PhoneAuthError> {
        if !is_e164(phone) {
            return Err(PhoneAuthError::InvalidNumber);
        }
        *self.pending.borrow_mut() = Some(phone.to_string());
        Ok(())
    }

    async fn confirm(&self, code: &str) -> Result<VerifiedPhone, PhoneAuthError> {
        let phone = self.pending.borrow().clone().ok_or(PhoneAuthError::NoPendingCode)?;
        if code != "123456" {
            return Err(PhoneAuthError::InvalidCode);
        }
        Ok(VerifiedPhone { phone_number: phone })
    }
}

#[tokio::test]
async fn test_phone_flow_verifies_before_exchange() {
    let svc = service();
    mock(&svc).mock_response(
        HttpMethod::Post,
        "http://api.test/api/auth/phone",
        200,
        json!({ "token": "p-tok", "role": "user" }),
    );
    let verifier = FakeVerifier {
        pending: RefCell::new(None),
    };

    assert_eq!(
        verifier.confirm("123456").await.unwrap_err(),
        PhoneAuthError::NoPendingCode
    );
    verifier.send_code("+919876543210").await.unwrap();
    assert_eq!(
        verifier.confirm("000000").await.unwrap_err(),
        PhoneAuthError::InvalidCode
    );
    let verified = verifier.confirm("123456").await.unwrap();

    let grant = svc.sign_in_with_phone(&verified).await.unwrap();

    assert_eq!(grant.token, "p-tok");
    assert_eq!(mock(&svc).request_count(), 1);
}

#[test]
fn test_e164_shape() {
    assert!(is_e164("+14155552671"));
    assert!(is_e164("+919876543210"));
    assert!(!is_e164("14155552671"));
    assert!(!is_e164("+0123456789"));
    assert!(!is_e164("+1 415 555"));
    assert!(!is_e164("+1234"));
}

#[test]
fn test_phone_errors_render_as_messages() {
    let err: AuthFlowError = PhoneAuthError::InvalidCode.into();
    assert_eq!(err.user_message(), "Invalid OTP");
}

// =========================================================
// Registration and password reset
// =========================================================

fn form() -> RegistrationForm {
    RegistrationForm {
        name: "Jane".into(),
        email: "jane@example.com".into(),
        password: "secret123".into(),
        confirm_password: "secret123".into(),
        phone: None,
    }
}

#[tokio::test]
async fn test_register_rejects_mismatched_passwords() {
    let svc = service();
    let mut f = form();
    f.confirm_password = "other".into();

    let err = svc.register(&f).await.unwrap_err();

    assert_eq!(err.user_message(), "Passwords do not match.");
    assert_eq!(mock(&svc).request_count(), 0);
}

#[tokio::test]
async fn test_register_omits_confirmation_and_blank_phone() {
    let svc = service();
    mock(&svc).mock_response(HttpMethod::Post, "http://api.test/api/register", 201, json!({}));
    let mut f = form();
    f.phone = Some(" ".into());

    let msg = svc.register(&f).await.unwrap();

    assert_eq!(msg, REGISTRATION_DONE);
    let body: serde_json::Value =
        serde_json::from_str(mock(&svc).last_request().unwrap().body.as_deref().unwrap()).unwrap();
    assert_eq!(
        body,
        json!({ "name": "Jane", "email": "jane@example.com", "password": "secret123" })
    );
}

#[tokio::test]
async fn test_register_and_sign_in_makes_two_requests() {
    let svc = service();
    mock(&svc).mock_response(HttpMethod::Post, "http://api.test/api/register", 201, json!({}));
    mock(&svc).mock_response(
        HttpMethod::Post,
        "http://api.test/api/login",
        200,
        json!({ "token": "new-tok", "role": "user", "user": { "name": "Jane", "email": "jane@example.com" } }),
    );

    let grant = svc.register_and_sign_in(&form()).await.unwrap();

    assert_eq!(grant.token, "new-tok");
    assert_eq!(mock(&svc).request_count(), 2);
}

#[tokio::test]
async fn test_register_failure_stops_before_sign_in() {
    let svc = service();
    mock(&svc).mock_response(
        HttpMethod::Post,
        "http://api.test/api/register",
        409,
        json!({ "error": "Email already registered" }),
    );

    let err = svc.register_and_sign_in(&form()).await.unwrap_err();

    assert_eq!(err.user_message(), "Email already registered");
    assert_eq!(mock(&svc).request_count(), 1);
}

#[tokio::test]
async fn test_request_reset_requires_email() {
    let svc = service();
    let err = svc.request_password_reset("  ").await.unwrap_err();
    assert_eq!(err.user_message(), "Please enter email");
    assert_eq!(mock(&svc).request_count(), 0);
}

#[tokio::test]
async fn test_request_reset_prefers_backend_message() {
    let svc = service();
    mock(&svc).mock_response(
        HttpMethod::Post,
        "http://api.test/api/request-reset",
        200,
        json!({ "message": "Check your inbox" }),
    );
    assert_eq!(
        svc.request_password_reset("a@x.com").await.unwrap(),
        "Check your inbox"
    );

    mock(&svc).mock_response(HttpMethod::Post, "http://api.test/api/request-reset", 200, json!({}));
    assert_eq!(
        svc.request_password_reset("a@x.com").await.unwrap(),
        RESET_EMAIL_SENT
    );
}

#[tokio::test]
async fn test_reset_password_sends_token_and_new_password() {
    let svc = service();
    mock(&svc).mock_response(HttpMethod::Post, "http://api.test/api/reset-password", 200, json!({}));

    let msg = svc.reset_password("reset-tok", "n3w-pass", "n3w-pass").await.unwrap();

    assert_eq!(msg, PASSWORD_RESET_DONE);
    let body: serde_json::Value =
        serde_json::from_str(mock(&svc).last_request().unwrap().body.as_deref().unwrap()).unwrap();
    assert_eq!(body, json!({ "token": "reset-tok", "newPassword": "n3w-pass" }));
}

#[tokio::test]
async fn test_reset_password_mismatch_and_failure() {
    let svc = service();
    let err = svc.reset_password("t", "a", "b").await.unwrap_err();
    assert_eq!(err.user_message(), "Passwords do not match.");

    mock(&svc).mock_response(HttpMethod::Post, "http://api.test/api/reset-password", 400, json!({}));
    let err = svc.reset_password("t", "a", "a").await.unwrap_err();
    assert_eq!(err.user_message(), RESET_FAILED);
}
