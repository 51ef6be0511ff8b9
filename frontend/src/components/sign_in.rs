use crate::auth::{AuthContext, use_auth};
use crate::components::alert::NoticeBanner;
use crate::components::icons::ArrowLeft;
use crate::credentials::{AuthFlowError, PhoneAuthError, PhoneVerifier};
use crate::forms::Notice;
use crate::services::use_services;
use crate::session::SessionGrant;
use crate::web::google;
use crate::web::phone::JsPhoneVerifier;
use crate::web::route::AppRoute;
use crate::web::router::{Link, RouterService, use_router};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Hands a finished credential exchange to the session and moves on.
///
/// `login` runs before `navigate`, so the guard for `target` already sees
/// the new session.
pub fn complete_sign_in(
    auth: AuthContext,
    router: RouterService,
    notice: RwSignal<Option<Notice>>,
    result: Result<SessionGrant, AuthFlowError>,
    target: AppRoute,
) {
    let outcome = match result {
        Ok(grant) => auth.login(grant).map_err(|e| e.to_string()),
        Err(e) => Err(e.user_message()),
    };
    match outcome {
        Ok(()) => {
            tracing::info!(%target, "signed in");
            router.navigate_to(target);
        }
        Err(msg) => {
            tracing::warn!(%msg, "sign-in failed");
            notice.set(Some(Notice::error(msg)));
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoginMethod {
    Email,
    Google,
    Phone,
}

#[component]
pub fn SignInPage() -> impl IntoView {
    let (method, set_method) = signal(Option::<LoginMethod>::None);
    let notice = RwSignal::new(Option::<Notice>::None);

    let choose = move |m: LoginMethod| {
        move |_| {
            notice.set(None);
            set_method.set(Some(m));
        }
    };

    view! {
        <div class="hero min-h-[70vh]">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <div class="card-body">
                        <NoticeBanner notice=notice />
                        {move || match method.get() {
                            None => view! {
                                <h2 class="card-title text-2xl justify-center mb-4">"Choose a login method"</h2>
                                <div class="space-y-3">
                                    <button class="btn btn-success w-full" on:click=choose(LoginMethod::Email)>
                                        "Login with Email"
                                    </button>
                                    <button class="btn btn-outline w-full" on:click=choose(LoginMethod::Google)>
                                        "Login with Google"
                                    </button>
                                    <button class="btn btn-info w-full" on:click=choose(LoginMethod::Phone)>
                                        "Login with Phone"
                                    </button>
                                </div>
                                <p class="mt-6 text-sm text-center">
                                    "Don't have an account? "
                                    <Link to="/register" class="link link-success">"Register here"</Link>
                                </p>
                            }
                            .into_any(),
                            Some(m) => view! {
                                <button
                                    class="btn btn-ghost btn-sm self-start gap-1"
                                    on:click=move |_| {
                                        notice.set(None);
                                        set_method.set(None);
                                    }
                                >
                                    <ArrowLeft attr:class="h-4 w-4" />
                                    "Back"
                                </button>
                                {match m {
                                    LoginMethod::Email => view! { <EmailSignIn notice=notice /> }.into_any(),
                                    LoginMethod::Google => view! { <GoogleSignIn notice=notice /> }.into_any(),
                                    LoginMethod::Phone => view! { <PhoneSignIn notice=notice /> }.into_any(),
                                }}
                            }
                            .into_any(),
                        }}
                    </div>
                </div>
            </div>
        </div>
    }
}

#[component]
fn EmailSignIn(notice: RwSignal<Option<Notice>>) -> impl IntoView {
    let services = use_services();
    let auth = use_auth();
    let router = use_router();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (show_password, set_show_password) = signal(false);
    let (is_submitting, set_is_submitting) = signal(false);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        notice.set(None);
        set_is_submitting.set(true);

        let service = services.auth_service();
        let email = email.get_untracked();
        let password = password.get_untracked();
        spawn_local(async move {
            let result = service.sign_in_with_password(&email, &password).await;
            complete_sign_in(auth, router, notice, result, AppRoute::MyFarm);
            set_is_submitting.set(false);
        });
    };

    view! {
        <form class="space-y-4" on:submit=on_submit>
            <h2 class="card-title text-2xl">"Sign In"</h2>
            <input
                type="email"
                placeholder="Email"
                class="input input-bordered w-full"
                prop:value=email
                on:input=move |ev| set_email.set(event_target_value(&ev))
                required
            />
            <div class="join w-full">
                <input
                    type=move || if show_password.get() { "text" } else { "password" }
                    placeholder="Password"
                    class="input input-bordered join-item w-full"
                    prop:value=password
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                    required
                />
                <button
                    type="button"
                    class="btn join-item"
                    on:click=move |_| set_show_password.update(|v| *v = !*v)
                >
                    {move || if show_password.get() { "Hide" } else { "Show" }}
                </button>
            </div>
            <button class="btn btn-success w-full" disabled=move || is_submitting.get()>
                {move || if is_submitting.get() {
                    view! { <span class="loading loading-spinner"></span> "Signing in..." }.into_any()
                } else {
                    "Sign In".into_any()
                }}
            </button>
            <p class="text-right">
                <Link to="/forgotpassword" class="link link-success text-sm">"Forgot Password?"</Link>
            </p>
        </form>
    }
}

#[component]
fn GoogleSignIn(notice: RwSignal<Option<Notice>>) -> impl IntoView {
    let services = use_services();
    let auth = use_auth();
    let router = use_router();
    let container = NodeRef::<leptos::html::Div>::new();

    Effect::new(move |_| {
        let Some(el) = container.get() else {
            return;
        };
        let client_id = services.config.google_client_id.clone();
        let service = services.auth_service();
        let rendered = google::render_button(&client_id, &el, move |credential| {
            let service = service.clone();
            notice.set(None);
            spawn_local(async move {
                let result = service.sign_in_with_google(&credential).await;
                complete_sign_in(auth, router, notice, result, AppRoute::MyFarm);
            });
        });
        if let Err(e) = rendered {
            tracing::warn!(error = %e, "google button unavailable");
            notice.set(Some(Notice::error(e.to_string())));
        }
    });

    view! {
        <h2 class="card-title text-2xl">"Sign in with Google"</h2>
        <div node_ref=container class="flex justify-center py-4"></div>
    }
}

#[component]
fn PhoneSignIn(notice: RwSignal<Option<Notice>>) -> impl IntoView {
    let service = StoredValue::new(use_services().auth_service());
    let auth = use_auth();
    let router = use_router();
    let verifier = JsPhoneVerifier;

    let (phone, set_phone) = signal(String::new());
    let (otp, set_otp) = signal(String::new());
    let (code_sent, set_code_sent) = signal(false);
    let (is_busy, set_is_busy) = signal(false);

    let send_code = move |_| {
        notice.set(None);
        set_is_busy.set(true);
        let phone = phone.get_untracked().trim().to_string();
        spawn_local(async move {
            match verifier.send_code(&phone).await {
                Ok(()) => {
                    set_code_sent.set(true);
                    notice.set(Some(Notice::success("Verification code sent.")));
                }
                Err(e) => notice.set(Some(Notice::error(e.to_string()))),
            }
            set_is_busy.set(false);
        });
    };

    let verify_code = move |_| {
        notice.set(None);
        if !code_sent.get_untracked() {
            notice.set(Some(Notice::error(PhoneAuthError::NoPendingCode.to_string())));
            return;
        }
        set_is_busy.set(true);
        let service = service.get_value();
        let code = otp.get_untracked();
        spawn_local(async move {
            let result = match verifier.confirm(&code).await {
                Ok(verified) => service.sign_in_with_phone(&verified).await,
                Err(e) => Err(AuthFlowError::from(e)),
            };
            complete_sign_in(auth, router, notice, result, AppRoute::MyFarm);
            set_is_busy.set(false);
        });
    };

    view! {
        <h2 class="card-title text-2xl">"Sign in with Phone"</h2>
        <input
            type="tel"
            placeholder="Enter phone number (e.g. +919876543210)"
            class="input input-bordered w-full"
            prop:value=phone
            on:input=move |ev| set_phone.set(event_target_value(&ev))
        />
        <button class="btn btn-success w-full" disabled=move || is_busy.get() on:click=send_code>
            "Send OTP"
        </button>
        <Show when=move || code_sent.get()>
            <input
                type="text"
                inputmode="numeric"
                placeholder="Enter OTP"
                class="input input-bordered w-full"
                prop:value=otp
                on:input=move |ev| set_otp.set(event_target_value(&ev))
            />
            <button class="btn btn-info w-full" disabled=move || is_busy.get() on:click=verify_code>
                "Verify OTP"
            </button>
        </Show>
        <div id="recaptcha-container"></div>
    }
}
