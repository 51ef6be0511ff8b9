use crate::auth::use_auth;
use crate::components::alert::{NoticeBanner, Spinner};
use crate::components::icons::{Leaf, Plus, RefreshCw};
use crate::forms::{Notice, check_device_link};
use crate::services::use_session_api;
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use farmvizion_shared::{IotDevice, LinkDeviceRequest, ListIotDevicesRequest};
use leptos::prelude::*;
use leptos::task::spawn_local;

const DEVICES_FAILED: &str = "Failed to fetch devices";
const LINK_FAILED: &str = "Linking failed";

#[component]
pub fn MyFarmPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let api = StoredValue::new(use_session_api());

    let devices = RwSignal::new(Vec::<IotDevice>::new());
    let (loading, set_loading) = signal(true);
    let (show_form, set_show_form) = signal(false);
    let device_id = RwSignal::new(String::new());
    let api_key = RwSignal::new(String::new());
    let notice = RwSignal::new(Option::<Notice>::None);

    let load_devices = move || {
        let api = api.get_value();
        set_loading.set(true);
        spawn_local(async move {
            match api.send(&ListIotDevicesRequest).await {
                Ok(list) => devices.set(list),
                Err(e) => notice.set(Some(Notice::error(e.user_message(DEVICES_FAILED)))),
            }
            set_loading.set(false);
        });
    };

    // reload whenever the signed-in identity changes
    Effect::new(move |_| {
        auth.session().track();
        load_devices();
    });

    let link_device = move |_| {
        notice.set(None);
        let id = device_id.get_untracked().trim().to_string();
        let key = api_key.get_untracked().trim().to_string();
        if let Err(msg) = check_device_link(&id, &key) {
            notice.set(Some(Notice::error(msg)));
            return;
        }
        let api = api.get_value();
        spawn_local(async move {
            let req = LinkDeviceRequest {
                device_id: id,
                api_key: key,
            };
            match api.send(&req).await {
                Ok(_) => {
                    tracing::info!("device linked");
                    notice.set(Some(Notice::success("Device linked successfully")));
                    device_id.set(String::new());
                    api_key.set(String::new());
                    set_show_form.set(false);
                    load_devices();
                }
                Err(e) => notice.set(Some(Notice::error(e.user_message(LINK_FAILED)))),
            }
        });
    };

    let welcome = move || {
        auth.session().with(|s| {
            s.display_name()
                .map(str::to_string)
                .unwrap_or_else(|| "Guest".to_string())
        })
    };
    let email = move || {
        auth.session().with(|s| {
            s.user()
                .filter(|u| !u.email.is_empty() && u.email != u.name)
                .map(|u| u.email.clone())
        })
    };

    view! {
        <div class="max-w-5xl mx-auto space-y-6">
            <div class="text-center">
                <h2 class="text-2xl font-bold text-success">"🌿 Welcome " {welcome}</h2>
                {move || email().map(|e| view! { <div class="text-success/80">{e}</div> })}
            </div>

            <div class="card bg-base-100 shadow">
                <div class="card-body">
                    <div class="flex items-center justify-between">
                        <h1 class="flex items-center gap-3 text-3xl font-extrabold text-success">
                            <Leaf attr:class="w-8 h-8" />
                            "My Devices"
                        </h1>
                        <div class="flex gap-2">
                            <button class="btn btn-ghost btn-sm" aria-label="Refresh" on:click=move |_| load_devices()>
                                <RefreshCw attr:class="h-4 w-4" />
                            </button>
                            <button
                                class="btn btn-success btn-sm gap-1"
                                on:click=move |_| set_show_form.update(|v| *v = !*v)
                            >
                                <Plus attr:class="h-4 w-4" />
                                "Link Device"
                            </button>
                        </div>
                    </div>

                    <Show when=move || show_form.get()>
                        <div class="bg-base-200 rounded-box p-4 space-y-2 max-w-md">
                            <label class="form-control">
                                <span class="label-text">"Enter Device ID"</span>
                                <input
                                    type="text"
                                    class="input input-bordered"
                                    prop:value=move || device_id.get()
                                    on:input=move |ev| device_id.set(event_target_value(&ev))
                                />
                            </label>
                            <label class="form-control">
                                <span class="label-text">"Enter Key"</span>
                                <input
                                    type="text"
                                    class="input input-bordered"
                                    prop:value=move || api_key.get()
                                    on:input=move |ev| api_key.set(event_target_value(&ev))
                                />
                            </label>
                            <div class="flex gap-2">
                                <button class="btn btn-primary btn-sm" on:click=link_device>"Submit"</button>
                                <button
                                    class="btn btn-ghost btn-sm"
                                    on:click=move |_| {
                                        set_show_form.set(false);
                                        notice.set(None);
                                    }
                                >
                                    "Cancel"
                                </button>
                            </div>
                        </div>
                    </Show>

                    <NoticeBanner notice=notice />

                    <Show when=move || !loading.get() fallback=|| view! { <Spinner /> }>
                        <div class="overflow-x-auto">
                            <table class="table table-zebra">
                                <thead>
                                    <tr>
                                        <th>"ID"</th>
                                        <th>"Device Name"</th>
                                        <th>"Allocated"</th>
                                        <th>"Status"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <Show
                                        when=move || devices.with(|d| !d.is_empty())
                                        fallback=|| view! {
                                            <tr><td colspan="4" class="text-center">"No devices found"</td></tr>
                                        }
                                    >
                                        <For
                                            each=move || devices.get()
                                            key=|d| d.id
                                            children=move |device| {
                                                let id = device.id;
                                                view! {
                                                    <tr
                                                        class="hover cursor-pointer"
                                                        on:click=move |_| router.navigate_to(AppRoute::DeviceDashboard { id: id.to_string() })
                                                    >
                                                        <td>{device.id}</td>
                                                        <td>{device.display_name().to_string()}</td>
                                                        <td>{device.allocated.clone().unwrap_or_default()}</td>
                                                        <td>{device.status.clone().unwrap_or_default()}</td>
                                                    </tr>
                                                }
                                            }
                                        />
                                    </Show>
                                </tbody>
                            </table>
                        </div>
                    </Show>
                </div>
            </div>
        </div>
    }
}
