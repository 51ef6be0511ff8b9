//! Back office: one tab per resource, a shared loading flag and one banner.

mod crops;
mod devices;
mod farms;
mod queries;
mod users;

use crate::api::{ApiError, MISSING_TOKEN_MESSAGE};
use crate::auth::use_auth;
use crate::components::alert::NoticeBanner;
use crate::components::icons::LogOut;
use crate::forms::Notice;
use crate::services::{SessionApi, use_session_api};
use crate::web;
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use farmvizion_shared::ApiRequest;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crops::CropsTab;
use devices::DevicesTab;
use farms::FarmsTab;
use queries::QueriesTab;
use users::UsersTab;

/// Banner text for a failed admin call. A rejected token reads the same as
/// a missing one, since the session is gone either way.
fn admin_error_message(err: &ApiError, fallback: &str) -> String {
    if err.is_auth_rejection() {
        MISSING_TOKEN_MESSAGE.to_string()
    } else {
        err.user_message(fallback)
    }
}

/// State shared by every tab.
#[derive(Clone, Copy)]
pub struct AdminState {
    pub loading: RwSignal<bool>,
    pub notice: RwSignal<Option<Notice>>,
    api: StoredValue<SessionApi>,
}

impl AdminState {
    fn new() -> Self {
        Self {
            loading: RwSignal::new(false),
            notice: RwSignal::new(None),
            api: StoredValue::new(use_session_api()),
        }
    }

    /// Sends `req` with the bearer token. `on_ok` gets the decoded response;
    /// a failure goes to the banner.
    pub fn run<R, F>(&self, req: R, fallback: &'static str, on_ok: F)
    where
        R: ApiRequest + 'static,
        F: FnOnce(R::Response) + 'static,
    {
        let Some(api) = self.api.try_get_value() else {
            return;
        };
        let state = *self;
        state.loading.set(true);
        spawn_local(async move {
            match api.send(&req).await {
                Ok(res) => on_ok(res),
                Err(e) => {
                    tracing::warn!(path = R::PATH, error = %e, "admin request failed");
                    state.fail(admin_error_message(&e, fallback));
                }
            }
            state.loading.set(false);
        });
    }

    pub fn succeed(&self, msg: &str) {
        self.notice.set(Some(Notice::success(msg)));
    }

    pub fn fail(&self, msg: impl Into<String>) {
        self.notice.set(Some(Notice::error(msg)));
    }

    pub fn clear(&self) {
        self.notice.set(None);
    }

    pub fn confirm_delete(&self, what: &str) -> bool {
        web::confirm(&format!("Are you sure you want to delete this {what}?"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AdminTab {
    Users,
    Crops,
    Farms,
    Devices,
    Queries,
}

impl AdminTab {
    const ALL: [AdminTab; 5] = [
        AdminTab::Users,
        AdminTab::Crops,
        AdminTab::Farms,
        AdminTab::Devices,
        AdminTab::Queries,
    ];

    fn label(&self) -> &'static str {
        match self {
            AdminTab::Users => "Users",
            AdminTab::Crops => "Crops",
            AdminTab::Farms => "Farms",
            AdminTab::Devices => "Devices",
            AdminTab::Queries => "Queries",
        }
    }
}

#[component]
pub fn AdminPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let state = AdminState::new();
    let (tab, set_tab) = signal(AdminTab::Users);

    let on_logout = move |_| {
        auth.logout();
        router.navigate_to(AppRoute::SignIn);
    };

    view! {
        <div class="max-w-7xl mx-auto space-y-6">
            <div class="navbar bg-base-100 rounded-box shadow-xl">
                <div class="flex-1">
                    <span class="text-xl font-bold px-2">"Admin Dashboard"</span>
                    <Show when=move || state.loading.get()>
                        <span class="loading loading-spinner loading-sm text-primary"></span>
                    </Show>
                </div>
                <button on:click=on_logout class="btn btn-outline btn-error btn-sm gap-2">
                    <LogOut attr:class="h-4 w-4" />
                    "Logout"
                </button>
            </div>

            <div role="tablist" class="tabs tabs-boxed">
                {AdminTab::ALL
                    .into_iter()
                    .map(|t| view! {
                        <a
                            role="tab"
                            class=move || if tab.get() == t { "tab tab-active" } else { "tab" }
                            on:click=move |_| {
                                state.clear();
                                set_tab.set(t);
                            }
                        >
                            {t.label()}
                        </a>
                    })
                    .collect_view()}
            </div>

            <NoticeBanner notice=state.notice />

            {move || match tab.get() {
                AdminTab::Users => view! { <UsersTab state=state /> }.into_any(),
                AdminTab::Crops => view! { <CropsTab state=state /> }.into_any(),
                AdminTab::Farms => view! { <FarmsTab state=state /> }.into_any(),
                AdminTab::Devices => view! { <DevicesTab state=state /> }.into_any(),
                AdminTab::Queries => view! { <QueriesTab state=state /> }.into_any(),
            }}
        </div>
    }
}

/// Labelled text input bound to a signal.
#[component]
fn TextField(
    label: &'static str,
    value: RwSignal<String>,
    #[prop(optional)] kind: Option<&'static str>,
    #[prop(optional)] placeholder: Option<&'static str>,
) -> impl IntoView {
    view! {
        <label class="form-control w-full">
            <span class="label-text">{label}</span>
            <input
                type=kind.unwrap_or("text")
                placeholder=placeholder.unwrap_or_default()
                class="input input-bordered input-sm w-full"
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        </label>
    }
}

/// Labelled select bound to a signal; the empty option means "unset".
#[component]
fn SelectField(
    label: &'static str,
    value: RwSignal<String>,
    options: &'static [&'static str],
    #[prop(optional)] prompt: Option<&'static str>,
) -> impl IntoView {
    view! {
        <label class="form-control w-full">
            <span class="label-text">{label}</span>
            <select
                class="select select-bordered select-sm w-full"
                prop:value=move || value.get()
                on:change=move |ev| value.set(event_target_value(&ev))
            >
                <option value="">{prompt.unwrap_or("Select")}</option>
                {options
                    .iter()
                    .map(|o| view! { <option value=*o>{*o}</option> })
                    .collect_view()}
            </select>
        </label>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::TransportError;

    #[test]
    fn test_rejected_token_reads_as_missing_token() {
        let err = ApiError::Unauthorized {
            status: 401,
            message: Some("jwt expired".into()),
        };
        assert_eq!(admin_error_message(&err, "Failed to fetch users"), MISSING_TOKEN_MESSAGE);
        assert_eq!(
            admin_error_message(&ApiError::MissingToken, "Failed to fetch users"),
            MISSING_TOKEN_MESSAGE
        );
    }

    #[test]
    fn test_other_failures_keep_backend_message_or_fallback() {
        let forbidden = ApiError::Forbidden {
            status: 403,
            message: Some("Admins only".into()),
        };
        assert_eq!(admin_error_message(&forbidden, "Failed to fetch users"), "Admins only");

        let backend = ApiError::Backend {
            status: 500,
            message: None,
        };
        assert_eq!(admin_error_message(&backend, "Failed to delete crop"), "Failed to delete crop");

        let network = ApiError::Transport(TransportError::Network("offline".into()));
        assert_ne!(admin_error_message(&network, "Failed to delete crop"), "Failed to delete crop");
    }
}
