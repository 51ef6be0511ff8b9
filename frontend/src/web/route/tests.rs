use farmvizion_shared::UserProfile;

use super::*;
use crate::session::{MemoryStorage, SessionGrant, SessionStore};

fn profile(name: &str, email: &str) -> Option<UserProfile> {
    Some(UserProfile {
        name: name.to_string(),
        email: email.to_string(),
    })
}

fn session(token: &str, role: &str) -> Session {
    SessionGrant::new(token, role, None).into()
}

// =========================================================
// Path table
// =========================================================

#[test]
fn test_paths_round_trip() {
    let routes = [
        AppRoute::Home,
        AppRoute::About,
        AppRoute::Team,
        AppRoute::Contact,
        AppRoute::SignIn,
        AppRoute::Register,
        AppRoute::ForgotPassword,
        AppRoute::ResetPassword {
            token: "abc123".into(),
        },
        AppRoute::Terms,
        AppRoute::Privacy,
        AppRoute::FarmPlan,
        AppRoute::Admin,
        AppRoute::MyFarm,
        AppRoute::DeviceDashboard { id: "42".into() },
        AppRoute::GoogleCallback,
    ];
    for route in routes {
        assert_eq!(AppRoute::from_path(&route.to_path()), route, "{route}");
    }
}

#[test]
fn test_path_normalisation() {
    assert_eq!(AppRoute::from_path(""), AppRoute::Home);
    assert_eq!(AppRoute::from_path("/about/"), AppRoute::About);
    assert_eq!(AppRoute::from_path("#/terms"), AppRoute::Terms);
    assert_eq!(AppRoute::from_path("/signin?next=/admin"), AppRoute::SignIn);
    assert_eq!(AppRoute::from_path("/login"), AppRoute::SignIn);
    assert_eq!(
        AppRoute::from_path("/auth/google/success?token=xyz"),
        AppRoute::GoogleCallback
    );
}

#[test]
fn test_unknown_and_incomplete_paths() {
    assert_eq!(AppRoute::from_path("/nope"), AppRoute::NotFound);
    assert_eq!(AppRoute::from_path("/dashboard"), AppRoute::NotFound);
    assert_eq!(AppRoute::from_path("/dashboard/1/extra"), AppRoute::NotFound);
    assert_eq!(AppRoute::from_path("/reset-password/"), AppRoute::NotFound);
}

#[test]
fn test_guard_table() {
    assert_eq!(AppRoute::FarmPlan.guard(), RouteGuard::Authenticated);
    assert_eq!(AppRoute::Admin.guard(), RouteGuard::Admin);
    assert_eq!(AppRoute::SignIn.guard(), RouteGuard::Guest);
    assert_eq!(AppRoute::MyFarm.guard(), RouteGuard::Public);
    assert_eq!(
        AppRoute::DeviceDashboard { id: "1".into() }.guard(),
        RouteGuard::Public
    );
}

// =========================================================
// Guard decisions
// =========================================================

#[test]
fn test_authenticated_guard_redirects_anonymous() {
    let decision = resolve("/farmplan", &Session::anonymous());
    assert_eq!(decision, GuardDecision::Redirect(AppRoute::SignIn));
    assert!(decision.is_redirect());
}

#[test]
fn test_denied_navigation_yields_only_the_redirect_path() {
    for requested in [AppRoute::Admin, AppRoute::FarmPlan] {
        let decision = resolve_route(requested.clone(), &Session::anonymous());
        let written = decision.into_route().to_path();
        assert_eq!(written, "/signin");
        assert_ne!(written, requested.to_path());
    }
}

#[test]
fn test_authenticated_guard_renders_for_any_role() {
    for role in ["user", "admin", "", "agronomist"] {
        assert_eq!(
            resolve("/farmplan", &session("t", role)),
            GuardDecision::Render(AppRoute::FarmPlan)
        );
    }
}

#[test]
fn test_admin_guard() {
    assert_eq!(
        resolve("/admin", &Session::anonymous()),
        GuardDecision::Redirect(AppRoute::SignIn)
    );
    assert_eq!(
        resolve("/admin", &session("t", "user")),
        GuardDecision::Redirect(AppRoute::SignIn)
    );
    assert_eq!(
        resolve("/admin", &session("t", "Admin")),
        GuardDecision::Redirect(AppRoute::SignIn)
    );
    assert_eq!(
        resolve("/admin", &session("t", "admin")),
        GuardDecision::Render(AppRoute::Admin)
    );
}

#[test]
fn test_stale_admin_role_without_token_is_denied() {
    let storage = MemoryStorage::new();
    crate::session::SessionStorage::set(&storage, crate::session::ROLE_KEY, "admin");
    let store = SessionStore::open(storage);

    assert_eq!(
        resolve("/admin", store.session()),
        GuardDecision::Redirect(AppRoute::SignIn)
    );
}

#[test]
fn test_guest_pages_bounce_signed_in_users_home() {
    assert_eq!(
        resolve("/signin", &session("t", "user")),
        GuardDecision::Redirect(AppRoute::Home)
    );
    assert_eq!(
        resolve("/register", &Session::anonymous()),
        GuardDecision::Render(AppRoute::Register)
    );
}

#[test]
fn test_public_pages_always_render() {
    for path in ["/", "/about", "/myfarm", "/dashboard/7", "/reset-password/x", "/nope"] {
        assert!(!resolve(path, &Session::anonymous()).is_redirect(), "{path}");
    }
}

// =========================================================
// End-to-end with the session store
// =========================================================

#[test]
fn test_login_navigate_logout_navigate() {
    let mut store = SessionStore::open(MemoryStorage::new());
    assert!(!store.is_authenticated());

    store
        .login(SessionGrant::new(
            "tok-123",
            "user",
            profile("Jane", "jane@example.com"),
        ))
        .unwrap();
    assert!(store.is_authenticated());
    assert_eq!(
        resolve("/farmplan", store.session()),
        GuardDecision::Render(AppRoute::FarmPlan)
    );

    store.logout();
    let decision = resolve("/farmplan", store.session());
    assert_eq!(decision, GuardDecision::Redirect(AppRoute::SignIn));
    assert_eq!(decision.route().to_path(), "/signin");
}

#[test]
fn test_admin_then_role_downgrade() {
    let mut store = SessionStore::open(MemoryStorage::new());

    store
        .login(SessionGrant::new("tok-456", "admin", profile("Ann", "ann@x.com")))
        .unwrap();
    assert_eq!(
        resolve("/admin", store.session()),
        GuardDecision::Render(AppRoute::Admin)
    );

    store
        .login(SessionGrant::new("tok-789", "user", profile("Bob", "bob@x.com")))
        .unwrap();
    assert_eq!(
        resolve("/admin", store.session()),
        GuardDecision::Redirect(AppRoute::SignIn)
    );
}
