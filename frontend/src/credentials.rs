//! Credential acquisition.
//!
//! Every sign-in path (email/password, Google, phone OTP, OAuth redirect)
//! produces a [`CredentialOutcome`], which is normalised to one
//! [`SessionGrant`] before anything touches the session store.

use farmvizion_shared::{
    AuthResponse, GoogleAuthRequest, LoginRequest, PhoneAuthRequest, RegisterRequest,
    RequestResetRequest, ResetPasswordRequest, Role,
};
use thiserror::Error;

use crate::api::{ApiClient, ApiError};
use crate::request::HttpClient;
use crate::session::SessionGrant;

pub const SIGN_IN_FAILED: &str = "Sign in failed. Please check your credentials.";
pub const GOOGLE_SIGN_IN_FAILED: &str = "Google Sign-in failed. Try again.";
pub const PHONE_SIGN_IN_FAILED: &str = "Failed to authenticate via phone.";
pub const REGISTRATION_FAILED: &str = "Registration failed.";
pub const RESET_REQUEST_FAILED: &str = "Failed to reset password. Please try again.";
pub const RESET_FAILED: &str = "Failed to reset password.";

pub const RESET_EMAIL_SENT: &str = "Password reset email sent!";
pub const PASSWORD_RESET_DONE: &str = "Password reset successfully.";
pub const REGISTRATION_DONE: &str = "Registration successful!";

// =========================================================
// Errors
// =========================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AuthFlowError {
    /// Rejected before any request was made.
    #[error("{0}")]
    Validation(&'static str),
    /// The backend answered 2xx without a usable credential.
    #[error("{0}")]
    InvalidResponse(&'static str),
    #[error("{fallback}")]
    Request {
        #[source]
        source: ApiError,
        fallback: &'static str,
    },
    #[error(transparent)]
    Phone(#[from] PhoneAuthError),
}

impl AuthFlowError {
    fn request(fallback: &'static str) -> impl FnOnce(ApiError) -> Self {
        move |source| AuthFlowError::Request { source, fallback }
    }

    pub fn user_message(&self) -> String {
        match self {
            AuthFlowError::Request { source, fallback } => source.user_message(fallback),
            other => other.to_string(),
        }
    }
}

/// Failures reported by the OTP provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PhoneAuthError {
    #[error("Phone sign-in is not available right now.")]
    Unavailable,
    #[error("Invalid phone number format. Please use E.164 format (e.g., +1234567890).")]
    InvalidNumber,
    #[error("Please request a verification code first.")]
    NoPendingCode,
    #[error("Invalid OTP")]
    InvalidCode,
    #[error("An error occurred during authentication. Please try again.")]
    Provider(String),
}

// =========================================================
// Outcomes
// =========================================================

/// Result of one credential exchange, tagged by provider.
#[derive(Debug, Clone, PartialEq)]
pub enum CredentialOutcome {
    EmailPassword(AuthResponse),
    Google(AuthResponse),
    Phone(AuthResponse),
    /// Token handed over in the redirect URL after a server-side OAuth dance.
    OAuthRedirect { token: Option<String> },
}

impl CredentialOutcome {
    pub fn provider(&self) -> &'static str {
        match self {
            CredentialOutcome::EmailPassword(_) => "password",
            CredentialOutcome::Google(_) => "google",
            CredentialOutcome::Phone(_) => "phone",
            CredentialOutcome::OAuthRedirect { .. } => "oauth-redirect",
        }
    }

    /// Normalises the outcome to the tuple the session store accepts.
    pub fn into_grant(self) -> Result<SessionGrant, AuthFlowError> {
        let provider = self.provider();
        let (res, invalid) = match self {
            CredentialOutcome::EmailPassword(res) => (res, "Invalid response from server."),
            CredentialOutcome::Google(res) => (res, "Invalid response from Google sign-in."),
            CredentialOutcome::Phone(res) => (res, PHONE_SIGN_IN_FAILED),
            CredentialOutcome::OAuthRedirect { token } => {
                let token = non_blank(token).ok_or(AuthFlowError::InvalidResponse(
                    "Sign-in link is missing its token.",
                ))?;
                return Ok(SessionGrant::new(token, Role::User, None));
            }
        };

        match non_blank(res.token) {
            Some(token) => Ok(SessionGrant::new(token, res.role, res.user)),
            None => {
                tracing::warn!(provider, "credential response carried no token");
                Err(AuthFlowError::InvalidResponse(invalid))
            }
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// =========================================================
// Phone verification
// =========================================================

/// Phone number the OTP provider has confirmed ownership of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedPhone {
    pub phone_number: String,
}

/// Out-of-band OTP verification (SMS provider behind a host-page bridge).
#[async_trait::async_trait(?Send)]
pub trait PhoneVerifier {
    async fn send_code(&self, phone: &str) -> Result<(), PhoneAuthError>;
    async fn confirm(&self, code: &str) -> Result<VerifiedPhone, PhoneAuthError>;
}

/// `+` followed by 8 to 15 digits, no leading zero.
pub fn is_e164(phone: &str) -> bool {
    let Some(digits) = phone.strip_prefix('+') else {
        return false;
    };
    (8..=15).contains(&digits.len())
        && digits.bytes().all(|b| b.is_ascii_digit())
        && !digits.starts_with('0')
}

// =========================================================
// Forms
// =========================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub phone: Option<String>,
}

impl RegistrationForm {
    fn validate(&self) -> Result<RegisterRequest, AuthFlowError> {
        if self.name.trim().is_empty() || self.email.trim().is_empty() || self.password.is_empty()
        {
            return Err(AuthFlowError::Validation("Please fill in all required fields."));
        }
        if self.password != self.confirm_password {
            return Err(AuthFlowError::Validation("Passwords do not match."));
        }
        Ok(RegisterRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            phone: non_blank(self.phone.clone()),
        })
    }
}

// =========================================================
// Service
// =========================================================

/// Backend calls behind the sign-in, registration and password pages.
///
/// Each method makes at most one request (`register_and_sign_in` makes two)
/// and never touches the session; callers pass the returned grant to
/// `login` themselves.
#[derive(Clone)]
pub struct AuthService<C: HttpClient> {
    api: ApiClient<C>,
}

impl<C: HttpClient> AuthService<C> {
    pub fn new(api: ApiClient<C>) -> Self {
        Self { api }
    }

    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<SessionGrant, AuthFlowError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AuthFlowError::Validation("Please enter email and password."));
        }
        let req = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let res = self
            .api
            .send(&req)
            .await
            .map_err(AuthFlowError::request(SIGN_IN_FAILED))?;
        CredentialOutcome::EmailPassword(res).into_grant()
    }

    pub async fn sign_in_with_google(&self, credential: &str) -> Result<SessionGrant, AuthFlowError> {
        if credential.trim().is_empty() {
            return Err(AuthFlowError::Validation("No Google credential received."));
        }
        let req = GoogleAuthRequest {
            credential: credential.to_string(),
        };
        let res = self
            .api
            .send(&req)
            .await
            .map_err(AuthFlowError::request(GOOGLE_SIGN_IN_FAILED))?;
        CredentialOutcome::Google(res).into_grant()
    }

    pub async fn sign_in_with_phone(
        &self,
        phone: &VerifiedPhone,
    ) -> Result<SessionGrant, AuthFlowError> {
        let req = PhoneAuthRequest {
            phone: phone.phone_number.clone(),
        };
        let res = self
            .api
            .send(&req)
            .await
            .map_err(AuthFlowError::request(PHONE_SIGN_IN_FAILED))?;
        CredentialOutcome::Phone(res).into_grant()
    }

    /// Creates the account. Returns the backend's confirmation text.
    pub async fn register(&self, form: &RegistrationForm) -> Result<String, AuthFlowError> {
        let req = form.validate()?;
        let ack = self
            .api
            .send(&req)
            .await
            .map_err(AuthFlowError::request(REGISTRATION_FAILED))?;
        tracing::info!("account registered");
        Ok(ack.message.unwrap_or_else(|| REGISTRATION_DONE.to_string()))
    }

    /// Registers, then signs in with the same credentials.
    pub async fn register_and_sign_in(
        &self,
        form: &RegistrationForm,
    ) -> Result<SessionGrant, AuthFlowError> {
        self.register(form).await?;
        self.sign_in_with_password(&form.email, &form.password).await
    }

    pub async fn request_password_reset(&self, email: &str) -> Result<String, AuthFlowError> {
        if email.trim().is_empty() {
            return Err(AuthFlowError::Validation("Please enter email"));
        }
        let req = RequestResetRequest {
            email: email.trim().to_string(),
        };
        let ack = self
            .api
            .send(&req)
            .await
            .map_err(AuthFlowError::request(RESET_REQUEST_FAILED))?;
        Ok(ack.message.unwrap_or_else(|| RESET_EMAIL_SENT.to_string()))
    }

    pub async fn reset_password(
        &self,
        token: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> Result<String, AuthFlowError> {
        if new_password != confirm_password {
            return Err(AuthFlowError::Validation("Passwords do not match."));
        }
        if new_password.is_empty() {
            return Err(AuthFlowError::Validation("Please enter a new password."));
        }
        let req = ResetPasswordRequest {
            token: token.to_string(),
            new_password: new_password.to_string(),
        };
        let ack = self
            .api
            .send(&req)
            .await
            .map_err(AuthFlowError::request(RESET_FAILED))?;
        Ok(ack.message.unwrap_or_else(|| PASSWORD_RESET_DONE.to_string()))
    }
}

#[cfg(test)]
mod tests;
