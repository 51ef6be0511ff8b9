//! Farmvizion web client.
//!
//! Layers, bottom up:
//! - `web`: browser API wrappers, the route table and the router service
//! - `session`: persisted sign-in state
//! - `api` / `credentials`: backend calls and the sign-in flows
//! - `auth` / `services`: reactive context handed to the views
//! - `components`: pages

mod api;
mod auth;
pub mod config;
mod credentials;
mod forms;
pub mod logging;
mod request;
mod services;
mod session;
mod web;

mod components {
    pub mod admin;
    pub mod alert;
    pub mod country_code;
    pub mod device_dashboard;
    pub mod farm_plan;
    pub mod icons;
    pub mod layout;
    pub mod my_farm;
    pub mod oauth_callback;
    pub mod pages;
    pub mod password;
    pub mod register;
    pub mod sign_in;
}

use crate::auth::AuthContext;
use crate::components::admin::AdminPage;
use crate::components::device_dashboard::DeviceDashboardPage;
use crate::components::farm_plan::FarmPlanPage;
use crate::components::layout::Layout;
use crate::components::my_farm::MyFarmPage;
use crate::components::oauth_callback::GoogleCallbackPage;
use crate::components::pages::{
    AboutPage, ContactPage, HomePage, NotFoundPage, PrivacyPage, TeamPage, TermsPage,
};
use crate::components::password::{ForgotPasswordPage, ResetPasswordPage};
use crate::components::register::RegisterPage;
use crate::components::sign_in::SignInPage;
use crate::config::AppConfig;
use crate::services::Services;

use leptos::prelude::*;

use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// Maps an already-guarded route to its page.
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::About => view! { <AboutPage /> }.into_any(),
        AppRoute::Team => view! { <TeamPage /> }.into_any(),
        AppRoute::Contact => view! { <ContactPage /> }.into_any(),
        AppRoute::SignIn => view! { <SignInPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::ForgotPassword => view! { <ForgotPasswordPage /> }.into_any(),
        AppRoute::ResetPassword { token } => view! { <ResetPasswordPage token=token /> }.into_any(),
        AppRoute::Terms => view! { <TermsPage /> }.into_any(),
        AppRoute::Privacy => view! { <PrivacyPage /> }.into_any(),
        AppRoute::FarmPlan => view! { <FarmPlanPage /> }.into_any(),
        AppRoute::Admin => view! { <AdminPage /> }.into_any(),
        AppRoute::MyFarm => view! { <MyFarmPage /> }.into_any(),
        AppRoute::DeviceDashboard { id } => view! { <DeviceDashboardPage id=id /> }.into_any(),
        AppRoute::GoogleCallback => view! { <GoogleCallbackPage /> }.into_any(),
        AppRoute::NotFound => view! { <NotFoundPage /> }.into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_context(Services::new(AppConfig::from_build_env()));

    // session restored from storage before the first guard decision
    let auth = AuthContext::new();
    provide_context(auth);

    view! {
        <Router session=auth.session_signal()>
            <Layout>
                <RouterOutlet matcher=route_matcher />
            </Layout>
        </Router>
    }
}
