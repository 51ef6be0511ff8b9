use crate::auth::use_auth;
use crate::components::alert::Spinner;
use crate::credentials::CredentialOutcome;
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use leptos::prelude::*;

/// `token` query parameter of the current URL.
fn query_token() -> Option<String> {
    let search = web_sys::window()?.location().search().ok()?;
    web_sys::UrlSearchParams::new_with_str(&search)
        .ok()?
        .get("token")
}

/// Landing page of the server-side Google OAuth redirect.
#[component]
pub fn GoogleCallbackPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    Effect::new(move |_| {
        let outcome = CredentialOutcome::OAuthRedirect {
            token: query_token(),
        };
        let signed_in = outcome
            .into_grant()
            .map_err(|e| e.to_string())
            .and_then(|grant| auth.login(grant).map_err(|e| e.to_string()));
        match signed_in {
            Ok(()) => {
                tracing::info!("signed in from oauth redirect");
                router.navigate_to(AppRoute::Home);
            }
            Err(msg) => {
                tracing::warn!(%msg, "oauth redirect without usable token");
                router.navigate_to(AppRoute::SignIn);
            }
        }
    });

    view! { <Spinner label="Signing you in..." /> }
}
