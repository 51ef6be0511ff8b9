use crate::components::alert::NoticeBanner;
use crate::forms::Notice;
use crate::services::use_services;
use crate::web::Timeout;
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Delay before a successful reset sends the user to sign-in.
const REDIRECT_AFTER_RESET_MS: u32 = 3_000;

#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
    let services = use_services();
    let (email, set_email) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let notice = RwSignal::new(Option::<Notice>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        notice.set(None);
        set_is_submitting.set(true);

        let service = services.auth_service();
        let email = email.get_untracked();
        spawn_local(async move {
            match service.request_password_reset(&email).await {
                Ok(msg) => notice.set(Some(Notice::success(msg))),
                Err(e) => notice.set(Some(Notice::error(e.user_message()))),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-[60vh]">
            <div class="card w-full max-w-md shadow-2xl bg-base-100">
                <form class="card-body" on:submit=on_submit>
                    <h2 class="card-title text-2xl">"Forgot Password"</h2>
                    <p class="text-sm text-base-content/70">
                        "Enter your email and we will send you a link to reset your password."
                    </p>
                    <NoticeBanner notice=notice />
                    <input
                        type="email"
                        placeholder="Email"
                        class="input input-bordered w-full"
                        prop:value=email
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                    />
                    <button class="btn btn-success w-full mt-2" disabled=move || is_submitting.get()>
                        "Send Reset Link"
                    </button>
                    <Link to="/signin" class="link link-hover text-sm">"Back to sign in"</Link>
                </form>
            </div>
        </div>
    }
}

#[component]
pub fn ResetPasswordPage(token: String) -> impl IntoView {
    let services = use_services();
    let router = use_router();
    let (new_password, set_new_password) = signal(String::new());
    let (confirm_password, set_confirm_password) = signal(String::new());
    let (show_password, set_show_password) = signal(false);
    let (is_submitting, set_is_submitting) = signal(false);
    let notice = RwSignal::new(Option::<Notice>::None);
    // dropped with the page, which cancels a pending redirect
    let redirect = StoredValue::new_local(Option::<Timeout>::None);
    let token = StoredValue::new(token);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        notice.set(None);
        set_is_submitting.set(true);

        let service = services.auth_service();
        let token = token.get_value();
        let new_password = new_password.get_untracked();
        let confirm_password = confirm_password.get_untracked();
        spawn_local(async move {
            match service
                .reset_password(&token, &new_password, &confirm_password)
                .await
            {
                Ok(msg) => {
                    notice.set(Some(Notice::success(msg)));
                    let timeout = Timeout::new(REDIRECT_AFTER_RESET_MS, move || {
                        router.navigate_to(AppRoute::SignIn);
                    });
                    redirect.try_update_value(|slot| *slot = Some(timeout));
                }
                Err(e) => notice.set(Some(Notice::error(e.user_message()))),
            }
            set_is_submitting.set(false);
        });
    };

    let password_kind = move || if show_password.get() { "text" } else { "password" };

    view! {
        <div class="hero min-h-[60vh]">
            <div class="card w-full max-w-md shadow-2xl bg-base-100">
                <form class="card-body" on:submit=on_submit>
                    <h2 class="card-title text-2xl text-success">"Reset Your Password"</h2>
                    <NoticeBanner notice=notice />
                    <input
                        type=password_kind
                        placeholder="New Password"
                        class="input input-bordered w-full"
                        prop:value=new_password
                        on:input=move |ev| set_new_password.set(event_target_value(&ev))
                        required
                    />
                    <input
                        type=password_kind
                        placeholder="Confirm Password"
                        class="input input-bordered w-full"
                        prop:value=confirm_password
                        on:input=move |ev| set_confirm_password.set(event_target_value(&ev))
                        required
                    />
                    <label class="label cursor-pointer justify-start gap-2">
                        <input
                            type="checkbox"
                            class="checkbox checkbox-sm"
                            prop:checked=show_password
                            on:change=move |_| set_show_password.update(|v| *v = !*v)
                        />
                        <span class="label-text">"Show passwords"</span>
                    </label>
                    <button class="btn btn-success w-full" disabled=move || is_submitting.get()>
                        "Reset Password"
                    </button>
                </form>
            </div>
        </div>
    }
}
