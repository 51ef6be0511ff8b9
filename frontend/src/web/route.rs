//! Route table and guards.
//!
//! Pure data: no DOM access, so every navigation decision can be tested
//! against a plain [`Session`].

use std::fmt::Display;

use crate::session::Session;

/// Every page of the client.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    #[default]
    Home,
    About,
    Team,
    Contact,
    SignIn,
    Register,
    ForgotPassword,
    ResetPassword {
        token: String,
    },
    Terms,
    Privacy,
    /// Farm planning (signed-in users).
    FarmPlan,
    /// Back office (admins).
    Admin,
    MyFarm,
    DeviceDashboard {
        id: String,
    },
    /// Landing page of the server-side Google OAuth redirect.
    GoogleCallback,
    NotFound,
}

impl AppRoute {
    /// Parses a location path.
    ///
    /// Accepts hash-style paths (`#/about`), ignores the query string and
    /// fragment, and tolerates a trailing slash.
    pub fn from_path(path: &str) -> Self {
        let path = path.strip_prefix('#').unwrap_or(path);
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Self::Home,
            ["about"] => Self::About,
            ["team"] => Self::Team,
            ["contact"] => Self::Contact,
            ["signin"] | ["login"] => Self::SignIn,
            ["register"] => Self::Register,
            ["forgotpassword"] => Self::ForgotPassword,
            ["reset-password", token] => Self::ResetPassword {
                token: token.to_string(),
            },
            ["terms"] => Self::Terms,
            ["privacy"] => Self::Privacy,
            ["farmplan"] => Self::FarmPlan,
            ["admin"] => Self::Admin,
            ["myfarm"] => Self::MyFarm,
            ["dashboard", id] => Self::DeviceDashboard { id: id.to_string() },
            ["auth", "google", "success"] => Self::GoogleCallback,
            _ => Self::NotFound,
        }
    }

    pub fn to_path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::About => "/about".to_string(),
            Self::Team => "/team".to_string(),
            Self::Contact => "/contact".to_string(),
            Self::SignIn => "/signin".to_string(),
            Self::Register => "/register".to_string(),
            Self::ForgotPassword => "/forgotpassword".to_string(),
            Self::ResetPassword { token } => format!("/reset-password/{token}"),
            Self::Terms => "/terms".to_string(),
            Self::Privacy => "/privacy".to_string(),
            Self::FarmPlan => "/farmplan".to_string(),
            Self::Admin => "/admin".to_string(),
            Self::MyFarm => "/myfarm".to_string(),
            Self::DeviceDashboard { id } => format!("/dashboard/{id}"),
            Self::GoogleCallback => "/auth/google/success".to_string(),
            Self::NotFound => "/404".to_string(),
        }
    }

    pub fn guard(&self) -> RouteGuard {
        match self {
            Self::FarmPlan => RouteGuard::Authenticated,
            Self::Admin => RouteGuard::Admin,
            Self::SignIn | Self::Register => RouteGuard::Guest,
            _ => RouteGuard::Public,
        }
    }

    /// Where a denied protected route sends the user.
    pub fn auth_failure_redirect() -> Self {
        Self::SignIn
    }

    /// Where a signed-in user lands when opening a guest-only page.
    pub fn guest_redirect() -> Self {
        Self::Home
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

// =========================================================
// Guards
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteGuard {
    Public,
    /// Requires a token.
    Authenticated,
    /// Requires a token and the admin role.
    Admin,
    /// Sign-in style pages that a signed-in user has no business on.
    Guest,
}

/// Outcome of a guard check.
///
/// The router writes only the route carried by the decision. A user
/// navigation pushes it, so the denied path never enters the history.
/// Initial load, `popstate` and session-change redirects replace the
/// current entry instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Render(AppRoute),
    Redirect(AppRoute),
}

impl GuardDecision {
    pub fn route(&self) -> &AppRoute {
        match self {
            Self::Render(route) | Self::Redirect(route) => route,
        }
    }

    pub fn into_route(self) -> AppRoute {
        match self {
            Self::Render(route) | Self::Redirect(route) => route,
        }
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirect(_))
    }
}

impl RouteGuard {
    /// Checks `route` against the current session. Nothing is cached: call
    /// this on every navigation.
    pub fn evaluate(&self, route: AppRoute, session: &Session) -> GuardDecision {
        let allowed = match self {
            Self::Public => true,
            Self::Authenticated => session.is_authenticated(),
            Self::Admin => session.is_admin(),
            Self::Guest => !session.is_authenticated(),
        };

        match (allowed, self) {
            (true, _) => GuardDecision::Render(route),
            (false, Self::Guest) => GuardDecision::Redirect(AppRoute::guest_redirect()),
            (false, _) => GuardDecision::Redirect(AppRoute::auth_failure_redirect()),
        }
    }
}

/// Parses `path` and runs the guard of the resulting route.
pub fn resolve(path: &str, session: &Session) -> GuardDecision {
    resolve_route(AppRoute::from_path(path), session)
}

pub fn resolve_route(route: AppRoute, session: &Session) -> GuardDecision {
    route.guard().evaluate(route, session)
}

#[cfg(test)]
mod tests;
