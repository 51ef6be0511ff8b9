//! Wire models shared by every Farmvizion client surface.
//!
//! Nothing in here touches the browser: the crate compiles and tests on any
//! target. Field names follow the backend's JSON exactly (camelCase for most
//! resources, snake_case for edge sensor readings).

use serde::{Deserialize, Deserializer, Serialize};

pub mod admin;
pub mod farm;
pub mod protocol;

pub use admin::*;
pub use farm::*;
pub use protocol::*;

// =========================================================
// Constants
// =========================================================

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const HEADER_DEVICE_ID: &str = "x-device-id";
pub const HEADER_API_KEY: &str = "x-api-key";
pub const CONTENT_TYPE_JSON: &str = "application/json";

// =========================================================
// Roles
// =========================================================

/// Role identifier issued by the backend.
///
/// The set is open: anything other than `admin` / `user` is kept verbatim so
/// it survives a storage round trip, and the empty string (or JSON `null`)
/// means "unknown".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum Role {
    #[default]
    Unknown,
    Admin,
    User,
    Other(String),
}

impl Role {
    /// Raw role string as the backend sends it.
    pub fn as_str(&self) -> &str {
        match self {
            Role::Unknown => "",
            Role::Admin => "admin",
            Role::User => "user",
            Role::Other(raw) => raw,
        }
    }

    /// Only the exact `admin` role counts.
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl From<&str> for Role {
    fn from(raw: &str) -> Self {
        match raw {
            "" => Role::Unknown,
            "admin" => Role::Admin,
            "user" => Role::User,
            other => Role::Other(other.to_string()),
        }
    }
}

impl From<String> for Role {
    fn from(raw: String) -> Self {
        Role::from(raw.as_str())
    }
}

impl From<Option<String>> for Role {
    fn from(raw: Option<String>) -> Self {
        raw.map(Role::from).unwrap_or_default()
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =========================================================
// Authentication payloads
// =========================================================

/// Display profile attached to a session.
///
/// Phone and Google sign-ins may leave either field out or null; both read
/// as empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
}

impl UserProfile {
    /// Neither a name nor an email to show.
    pub fn is_blank(&self) -> bool {
        self.name.trim().is_empty() && self.email.trim().is_empty()
    }
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Profile attached to a credential response. Anything that does not decode
/// to a usable profile is dropped so the token still gets through.
fn lenient_profile<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<UserProfile>, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    match serde_json::from_value::<UserProfile>(value) {
        Ok(profile) if !profile.is_blank() => Ok(Some(profile)),
        Ok(_) => Ok(None),
        Err(e) => {
            tracing::warn!(error = %e, "dropping undecodable user profile");
            Ok(None)
        }
    }
}

/// Body returned by every credential endpoint (`/api/login`,
/// `/api/auth/google`, `/api/auth/phone`).
///
/// Older backend builds omit `user` and sometimes `role`, so both are
/// optional here and normalised later. A malformed profile never fails the
/// whole response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub role: Role,
    #[serde(default, deserialize_with = "lenient_profile")]
    pub user: Option<UserProfile>,
}

/// Error body shape used by the backend. Auth endpoints fill `error`, the
/// admin endpoints fill `message`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// First non-blank message, `error` taking precedence.
    pub fn into_message(self) -> Option<String> {
        [self.error, self.message]
            .into_iter()
            .flatten()
            .find(|m| !m.trim().is_empty())
    }
}

/// Acknowledgement for mutations whose body the client does not use.
///
/// Accepts any JSON (or an empty body) and only picks up a top-level
/// `message` string when one is present.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Ack {
    pub message: Option<String>,
}

impl<'de> Deserialize<'de> for Ack {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        let message = value
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string);
        Ok(Ack { message })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_raw_strings() {
        assert_eq!(Role::from("admin"), Role::Admin);
        assert_eq!(Role::from("user"), Role::User);
        assert_eq!(Role::from(""), Role::Unknown);
        assert_eq!(Role::from("agronomist"), Role::Other("agronomist".into()));
        assert_eq!(String::from(Role::Other("agronomist".into())), "agronomist");
        // exact match only
        assert_eq!(Role::from("Admin"), Role::Other("Admin".into()));
    }

    #[test]
    fn auth_response_tolerates_missing_user_and_role() {
        let res: AuthResponse = serde_json::from_str(r#"{"token":"abc"}"#).unwrap();
        assert_eq!(res.token.as_deref(), Some("abc"));
        assert_eq!(res.role, Role::Unknown);
        assert!(res.user.is_none());

        let res: AuthResponse = serde_json::from_str(
            r#"{"token":"t","role":"admin","user":{"name":"A","email":"a@x.com"}}"#,
        )
        .unwrap();
        assert!(res.role.is_admin());
        assert_eq!(res.user.unwrap().name, "A");
    }

    #[test]
    fn auth_response_keeps_token_with_null_role() {
        let res: AuthResponse = serde_json::from_str(r#"{"token":"t","role":null}"#).unwrap();
        assert_eq!(res.token.as_deref(), Some("t"));
        assert_eq!(res.role, Role::Unknown);
    }

    #[test]
    fn auth_response_keeps_token_with_partial_profile() {
        let res: AuthResponse = serde_json::from_str(
            r#"{"token":"t","user":{"name":"Phone User","phone":"+491701234567"}}"#,
        )
        .unwrap();
        assert_eq!(res.token.as_deref(), Some("t"));
        let user = res.user.unwrap();
        assert_eq!(user.name, "Phone User");
        assert_eq!(user.email, "");

        let res: AuthResponse =
            serde_json::from_str(r#"{"token":"t","user":{"name":"G","email":null}}"#).unwrap();
        assert_eq!(res.user.map(|u| u.name).as_deref(), Some("G"));
    }

    #[test]
    fn auth_response_drops_unusable_profile() {
        let res: AuthResponse =
            serde_json::from_str(r#"{"token":"t","user":"not-a-profile"}"#).unwrap();
        assert_eq!(res.token.as_deref(), Some("t"));
        assert!(res.user.is_none());

        let res: AuthResponse = serde_json::from_str(r#"{"token":"t","user":{}}"#).unwrap();
        assert!(res.user.is_none());

        let res: AuthResponse = serde_json::from_str(r#"{"token":"t","user":null}"#).unwrap();
        assert!(res.user.is_none());
    }

    #[test]
    fn error_body_prefers_error_over_message() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"error":"Invalid credentials","message":"x"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("Invalid credentials"));

        let body: ErrorBody = serde_json::from_str(r#"{"error":"  ","message":"Forbidden"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("Forbidden"));

        assert_eq!(ErrorBody::default().into_message(), None);
    }

    #[test]
    fn ack_accepts_any_json() {
        let ack: Ack = serde_json::from_str(r#"{"message":"Password reset email sent!"}"#).unwrap();
        assert_eq!(ack.message.as_deref(), Some("Password reset email sent!"));

        let ack: Ack = serde_json::from_str(r#"[1,2,3]"#).unwrap();
        assert_eq!(ack.message, None);

        let ack: Ack = serde_json::from_str("null").unwrap();
        assert_eq!(ack.message, None);
    }
}
