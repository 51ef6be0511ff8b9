use crate::auth::use_auth;
use crate::components::alert::NoticeBanner;
use crate::components::country_code::PhoneField;
use crate::components::sign_in::complete_sign_in;
use crate::credentials::RegistrationForm;
use crate::forms::Notice;
use crate::services::use_services;
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};
use farmvizion_shared::{DEFAULT_COUNTRY_CODE, compose_phone};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn RegisterPage() -> impl IntoView {
    let services = use_services();
    let auth = use_auth();
    let router = use_router();

    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());
    let country_code = RwSignal::new(DEFAULT_COUNTRY_CODE.to_string());
    let phone = RwSignal::new(String::new());
    let (show_password, set_show_password) = signal(false);
    let (is_submitting, set_is_submitting) = signal(false);
    let notice = RwSignal::new(Option::<Notice>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        notice.set(None);

        let form = RegistrationForm {
            name: name.get_untracked(),
            email: email.get_untracked(),
            password: password.get_untracked(),
            confirm_password: confirm_password.get_untracked(),
            phone: compose_phone(&country_code.get_untracked(), &phone.get_untracked()),
        };
        let service = services.auth_service();
        set_is_submitting.set(true);
        spawn_local(async move {
            let result = service.register_and_sign_in(&form).await;
            complete_sign_in(auth, router, notice, result, AppRoute::Home);
            set_is_submitting.set(false);
        });
    };

    let text_input = move |kind: &'static str, placeholder: &'static str, value: RwSignal<String>| {
        view! {
            <input
                type=kind
                placeholder=placeholder
                class="input input-bordered w-full"
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
                required
            />
        }
    };
    let password_kind = move || if show_password.get() { "text" } else { "password" };

    view! {
        <div class="hero min-h-[70vh]">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body space-y-2" on:submit=on_submit>
                        <h2 class="card-title text-2xl justify-center text-success">
                            "Farmer Registration"
                        </h2>
                        <NoticeBanner notice=notice />
                        {text_input("text", "Full Name", name)}
                        {text_input("email", "Email", email)}
                        <PhoneField code=country_code local=phone />
                        <input
                            type=password_kind
                            placeholder="Password"
                            class="input input-bordered w-full"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                            required
                        />
                        <input
                            type=password_kind
                            placeholder="Confirm Password"
                            class="input input-bordered w-full"
                            prop:value=move || confirm_password.get()
                            on:input=move |ev| confirm_password.set(event_target_value(&ev))
                            required
                        />
                        <label class="label cursor-pointer justify-start gap-2">
                            <input
                                type="checkbox"
                                class="checkbox checkbox-sm"
                                prop:checked=move || show_password.get()
                                on:change=move |_| set_show_password.update(|v| *v = !*v)
                            />
                            <span class="label-text">"Show passwords"</span>
                        </label>
                        <button class="btn btn-success w-full" disabled=move || is_submitting.get()>
                            {move || if is_submitting.get() {
                                view! { <span class="loading loading-spinner"></span> "Registering..." }.into_any()
                            } else {
                                "Register".into_any()
                            }}
                        </button>
                        <p class="text-sm text-center">
                            "Already have an account? "
                            <Link to="/signin" class="link link-success">"Sign in"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
