use std::cell::RefCell;
use std::rc::Rc;

use farmvizion_shared::{
    Ack, DeleteDetectionRequest, DeleteUserRequest, DeviceCredentials, HttpMethod,
    LatestSensorRequest, ListDetectionsRequest, ListUsersRequest, LoginRequest, Role, UserProfile,
};
use serde_json::json;

use super::*;
use crate::request::MockHttpClient;
use crate::session::{MemoryStorage, SessionGrant, SessionStore};

const BASE: &str = "http://api.test";

fn client() -> ApiClient<MockHttpClient> {
    ApiClient::new(format!("{BASE}/"), MockHttpClient::new())
}

#[derive(Clone)]
struct SharedStore(Rc<RefCell<SessionStore<MemoryStorage>>>);

impl SharedStore {
    fn signed_in(token: &str, role: &str) -> Self {
        let mut store = SessionStore::open(MemoryStorage::new());
        store
            .login(SessionGrant::new(
                token,
                role,
                Some(UserProfile {
                    name: "Ann".into(),
                    email: "ann@x.com".into(),
                }),
            ))
            .unwrap();
        Self(Rc::new(RefCell::new(store)))
    }
}

impl SessionHandle for SharedStore {
    fn token(&self) -> Option<String> {
        self.0.borrow().token().map(str::to_string)
    }

    fn expire(&self) {
        self.0.borrow_mut().logout();
    }
}

// =========================================================
// Request building
// =========================================================

#[tokio::test]
async fn test_post_sends_json_body_and_content_type() {
    let api = client();
    api.client().mock_response(
        HttpMethod::Post,
        "http://api.test/api/login",
        200,
        json!({ "token": "t", "role": "user" }),
    );

    let res = api
        .send(&LoginRequest {
            email: "a@x.com".into(),
            password: "pw".into(),
        })
        .await
        .unwrap();

    assert_eq!(res.token.as_deref(), Some("t"));
    assert_eq!(res.role, Role::User);

    let sent = api.client().last_request().unwrap();
    assert_eq!(sent.header("Content-Type"), Some("application/json"));
    assert_eq!(sent.header("Authorization"), None);
    let body: serde_json::Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
    assert_eq!(body, json!({ "email": "a@x.com", "password": "pw" }));
}

#[tokio::test]
async fn test_get_has_no_body() {
    let api = client();
    api.client()
        .mock_response(HttpMethod::Get, "http://api.test/api/admin/users", 200, json!([]));

    let users = api.send_authorized(&ListUsersRequest, Some("tok")).await.unwrap();

    assert!(users.is_empty());
    let sent = api.client().last_request().unwrap();
    assert!(sent.body.is_none());
    assert_eq!(sent.header("Authorization"), Some("Bearer tok"));
}

#[tokio::test]
async fn test_request_headers_are_forwarded() {
    let api = client();
    api.client().mock_response(
        HttpMethod::Get,
        "http://api.test/api/edge/sensors/latest",
        200,
        json!({ "temperature": 21.5, "timestamp": "2024-05-01T10:00:00Z" }),
    );

    let req = LatestSensorRequest(DeviceCredentials {
        device_id: "dev-1".into(),
        api_key: "key-1".into(),
    });
    api.send(&req).await.unwrap();

    let sent = api.client().last_request().unwrap();
    assert_eq!(sent.header("x-device-id"), Some("dev-1"));
    assert_eq!(sent.header("x-api-key"), Some("key-1"));
}

#[tokio::test]
async fn test_detection_events_list_and_delete_carry_device_key() {
    let api = client();
    let creds = DeviceCredentials {
        device_id: "dev-1".into(),
        api_key: "key-1".into(),
    };
    api.client().mock_response(
        HttpMethod::Get,
        "http://api.test/api/edge/get/detected",
        200,
        json!([
            { "id": 7, "timestamp": "2024-05-01T10:00:00Z", "labels": ["person"], "snapshotPath": "snaps/7.jpg", "clipPath": null },
            { "id": 6, "timestamp": "2024-05-01T09:00:00Z", "labels": [] }
        ]),
    );
    api.client()
        .mock_raw(HttpMethod::Delete, "http://api.test/api/delete/detected/7", 200, "");

    let events = api.send(&ListDetectionsRequest(creds.clone())).await.unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].labels, vec!["person".to_string()]);
    assert_eq!(events[0].snapshot_path.as_deref(), Some("snaps/7.jpg"));
    assert!(events[1].clip_path.is_none());

    api.send(&DeleteDetectionRequest {
        credentials: creds,
        id: 7,
    })
    .await
    .unwrap();

    let sent = api.client().last_request().unwrap();
    assert_eq!(sent.method, HttpMethod::Delete);
    assert_eq!(sent.header("x-api-key"), Some("key-1"));
    assert_eq!(sent.header("Authorization"), None);
}

#[tokio::test]
async fn test_missing_token_sends_nothing() {
    let api = client();

    let err = api.send_authorized(&ListUsersRequest, None).await.unwrap_err();
    assert_eq!(err, ApiError::MissingToken);

    let err = api.send_authorized(&ListUsersRequest, Some("")).await.unwrap_err();
    assert_eq!(err, ApiError::MissingToken);

    assert_eq!(api.client().request_count(), 0);
    assert_eq!(err.user_message("ignored"), MISSING_TOKEN_MESSAGE);
}

// =========================================================
// Error mapping
// =========================================================

#[tokio::test]
async fn test_backend_message_wins_over_fallback() {
    let api = client();
    api.client().mock_response(
        HttpMethod::Post,
        "http://api.test/api/login",
        400,
        json!({ "error": "Invalid credentials" }),
    );

    let err = api
        .send(&LoginRequest {
            email: "a@x.com".into(),
            password: "bad".into(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(400));
    assert_eq!(err.user_message("Login failed"), "Invalid credentials");
}

#[tokio::test]
async fn test_plain_text_error_uses_fallback() {
    let api = client();
    api.client().mock_raw(
        HttpMethod::Delete,
        "http://api.test/api/admin/users/7",
        500,
        "Internal Server Error",
    );

    let err = api
        .send_authorized(&DeleteUserRequest { id: 7 }, Some("tok"))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Backend { status: 500, message: None }));
    assert_eq!(err.user_message("Failed to delete user"), "Failed to delete user");
}

#[tokio::test]
async fn test_status_classes() {
    let api = client();
    let url = "http://api.test/api/admin/users";

    api.client().mock_response(HttpMethod::Get, url, 401, json!({ "message": "expired" }));
    let err = api.send_authorized(&ListUsersRequest, Some("tok")).await.unwrap_err();
    assert!(err.is_auth_rejection());
    assert_eq!(err.backend_message(), Some("expired"));

    api.client().mock_response(HttpMethod::Get, url, 403, json!({}));
    let err = api.send_authorized(&ListUsersRequest, Some("tok")).await.unwrap_err();
    assert!(matches!(err, ApiError::Forbidden { status: 403, .. }));
    assert!(!err.is_auth_rejection());
}

#[tokio::test]
async fn test_non_array_list_is_invalid_response() {
    let api = client();
    api.client().mock_response(
        HttpMethod::Get,
        "http://api.test/api/admin/users",
        200,
        json!({ "users": [] }),
    );

    let err = api.send_authorized(&ListUsersRequest, Some("tok")).await.unwrap_err();

    assert!(matches!(err, ApiError::InvalidResponse(_)));
    assert_eq!(err.user_message("Failed to fetch users"), INVALID_DATA_MESSAGE);
}

#[tokio::test]
async fn test_network_failure_maps_to_transport() {
    let api = client();
    api.client().mock_failure(
        HttpMethod::Get,
        "http://api.test/api/admin/users",
        TransportError::Network("connection refused".into()),
    );

    let err = api.send_authorized(&ListUsersRequest, Some("tok")).await.unwrap_err();

    assert!(matches!(err, ApiError::Transport(_)));
    assert_eq!(err.status(), None);
    assert_eq!(err.user_message("whatever"), NETWORK_ERROR_MESSAGE);
}

#[tokio::test]
async fn test_empty_success_body_is_an_ack() {
    let api = client();
    api.client()
        .mock_raw(HttpMethod::Delete, "http://api.test/api/admin/users/3", 204, "");

    let ack = api
        .send_authorized(&DeleteUserRequest { id: 3 }, Some("tok"))
        .await
        .unwrap();

    assert_eq!(ack, Ack::default());
}

// =========================================================
// Session-bound calls
// =========================================================

#[tokio::test]
async fn test_authorized_api_uses_session_token() {
    let store = SharedStore::signed_in("abc", "admin");
    let api = AuthorizedApi::new(client(), store.clone());
    api.api.client().mock_response(
        HttpMethod::Get,
        "http://api.test/api/admin/users",
        200,
        json!([]),
    );

    api.send(&ListUsersRequest).await.unwrap();

    let sent = api.api.client().last_request().unwrap();
    assert_eq!(sent.header("Authorization"), Some("Bearer abc"));
    assert!(store.0.borrow().is_authenticated());
}

#[tokio::test]
async fn test_unauthorized_response_ends_session() {
    let store = SharedStore::signed_in("stale", "admin");
    let api = AuthorizedApi::new(client(), store.clone());
    api.api.client().mock_response(
        HttpMethod::Get,
        "http://api.test/api/admin/users",
        401,
        json!({ "message": "Token expired" }),
    );

    let err = api.send(&ListUsersRequest).await.unwrap_err();

    assert!(err.is_auth_rejection());
    let store = store.0.borrow();
    assert!(!store.is_authenticated());
    assert!(store.storage().is_empty());
}

#[tokio::test]
async fn test_forbidden_response_keeps_session() {
    let store = SharedStore::signed_in("tok", "user");
    let api = AuthorizedApi::new(client(), store.clone());
    api.api.client().mock_response(
        HttpMethod::Get,
        "http://api.test/api/admin/users",
        403,
        json!({ "message": "Admins only" }),
    );

    let err = api.send(&ListUsersRequest).await.unwrap_err();

    assert_eq!(err.user_message("Failed to fetch users"), "Admins only");
    assert!(store.0.borrow().is_authenticated());
}

#[tokio::test]
async fn test_signed_out_session_yields_missing_token() {
    let store = SharedStore::signed_in("tok", "user");
    store.0.borrow_mut().logout();
    let api = AuthorizedApi::new(client(), store);

    let err = api.send(&ListUsersRequest).await.unwrap_err();

    assert_eq!(err, ApiError::MissingToken);
    assert_eq!(api.api.client().request_count(), 0);
}
