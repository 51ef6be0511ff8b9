use crate::components::alert::{NoticeBanner, Spinner};
use crate::components::icons::{ArrowLeft, Droplet, Thermometer};
use crate::forms::Notice;
use crate::services::{use_services, use_session_api};
use crate::web;
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use farmvizion_shared::{
    DeleteAllDetectionsRequest, DeleteDetectionRequest, DetectionEvent, DeviceCredentials,
    DeviceDetail, DeviceDetailRequest, LatestSensorRequest, ListDetectionsRequest,
    SensorHistoryRequest, SensorReading,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

const DEVICE_FAILED: &str = "Failed to fetch device";
const SENSOR_FAILED: &str = "Failed to fetch sensor data";
const DETECTIONS_FAILED: &str = "Failed to fetch detection events";
const DETECTION_DELETE_FAILED: &str = "Failed to delete detection event";

/// Width of a 0-100 gauge bar.
fn gauge_width(value: Option<f64>, scale: f64) -> String {
    let pct = (value.unwrap_or(0.0) * scale).clamp(0.0, 100.0);
    format!("width: {pct}%")
}

fn or_na(value: Option<String>) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| "N/A".to_string())
}

fn reading(value: Option<f64>, unit: &str) -> String {
    value
        .map(|v| format!("{v}{unit}"))
        .unwrap_or_else(|| "N/A".to_string())
}

#[component]
pub fn DeviceDashboardPage(id: String) -> impl IntoView {
    let router = use_router();
    let api = StoredValue::new(use_session_api());
    let device = RwSignal::new(Option::<DeviceDetail>::None);
    let (loading, set_loading) = signal(true);
    let notice = RwSignal::new(Option::<Notice>::None);

    Effect::new(move |_| {
        let api = api.get_value();
        let req = DeviceDetailRequest { id: id.clone() };
        spawn_local(async move {
            match api.send(&req).await {
                Ok(detail) => device.set(Some(detail)),
                Err(e) => notice.set(Some(Notice::error(e.user_message(DEVICE_FAILED)))),
            }
            set_loading.set(false);
        });
    });

    view! {
        <div class="card bg-base-100 shadow-lg max-w-5xl mx-auto">
            <div class="card-body space-y-6">
                <button
                    class="btn btn-ghost btn-sm self-start gap-1 text-success"
                    aria-label="Go back"
                    on:click=move |_| router.navigate_to(AppRoute::MyFarm)
                >
                    <ArrowLeft attr:class="h-5 w-5" />
                    "Back"
                </button>
                <NoticeBanner notice=notice />
                <Show when=move || !loading.get() fallback=|| view! { <Spinner label="Loading device details..." /> }>
                    {move || device.get().map(|d| view! { <DeviceSummary device=d /> })}
                </Show>
                {move || device.get().map(|d| view! { <SensorPanel device_id=d.device_id /> })}
            </div>
        </div>
    }
}

#[component]
fn DeviceSummary(device: DeviceDetail) -> impl IntoView {
    let title = device
        .device_name
        .clone()
        .or_else(|| device.name.clone())
        .unwrap_or_else(|| device.device_id.clone());

    view! {
        <div class="space-y-1">
            <h1 class="text-3xl font-bold text-success">{title}</h1>
            <p class="text-sm text-base-content/60">{format!("Device ID: {}", device.device_id)}</p>
        </div>
        <div class="grid grid-cols-1 md:grid-cols-2 gap-8">
            <div class="space-y-4">
                <p><strong>"Status: "</strong>{or_na(device.status.clone())}</p>
                <p><strong>"Allocated: "</strong>{device.allocated.clone().unwrap_or_else(|| "No".to_string())}</p>
                <p><strong>"Soil Type: "</strong>{or_na(device.soil_type.clone())}</p>
                <div>
                    <span class="flex items-center gap-2 text-sm font-medium">
                        <Droplet attr:class="h-4 w-4 text-info" />
                        "Soil Water Level"
                    </span>
                    <div class="w-full bg-base-300 rounded h-3 mt-1">
                        <div class="bg-info h-3 rounded" style=gauge_width(device.soil_water_level, 1.0)></div>
                    </div>
                    <p class="text-xs text-base-content/60">{reading(device.soil_water_level, "%")}</p>
                </div>
                <div>
                    <span class="flex items-center gap-2 text-sm font-medium">
                        <Thermometer attr:class="h-4 w-4 text-error" />
                        "Temperature"
                    </span>
                    <div class="w-full bg-base-300 rounded h-3 mt-1">
                        <div class="bg-error h-3 rounded" style=gauge_width(device.temperature, 2.0)></div>
                    </div>
                    <p class="text-xs text-base-content/60">{reading(device.temperature, "°C")}</p>
                </div>
                <div>
                    <span class="text-sm font-medium">"Humidity"</span>
                    <div class="w-full bg-base-300 rounded h-3 mt-1">
                        <div class="bg-accent h-3 rounded" style=gauge_width(device.humidity, 1.0)></div>
                    </div>
                    <p class="text-xs text-base-content/60">{reading(device.humidity, "%")}</p>
                </div>
            </div>
            <div class="space-y-2">
                <p><strong>"Crop Name: "</strong>{or_na(device.crop_name.clone())}</p>
                <p><strong>"Crop Type: "</strong>{or_na(device.crop_type.clone())}</p>
                <div class="flex gap-4 mt-4">
                    {device.crop_image_url.clone().map(|src| view! {
                        <img src=src alt="Crop" class="w-40 h-40 object-cover rounded-box shadow" />
                    })}
                    {device.farm_image_url.clone().map(|src| view! {
                        <img src=src alt="Farm" class="w-40 h-40 object-cover rounded-box shadow" />
                    })}
                </div>
            </div>
        </div>
    }
}

/// Live readings from the edge sensor service, unlocked with the device key.
#[component]
fn SensorPanel(device_id: String) -> impl IntoView {
    let sensors = StoredValue::new(use_services().sensors());
    let device_id = StoredValue::new(device_id);
    let api_key = RwSignal::new(String::new());
    let latest = RwSignal::new(Option::<SensorReading>::None);
    let history = RwSignal::new(Vec::<SensorReading>::new());
    let unlocked = RwSignal::new(Option::<DeviceCredentials>::None);
    let (loading, set_loading) = signal(false);
    let notice = RwSignal::new(Option::<Notice>::None);

    let load = move |_| {
        notice.set(None);
        let key = api_key.get_untracked().trim().to_string();
        if key.is_empty() {
            notice.set(Some(Notice::error("Please enter the device API key.")));
            return;
        }
        let credentials = DeviceCredentials {
            device_id: device_id.get_value(),
            api_key: key,
        };
        let sensors = sensors.get_value();
        set_loading.set(true);
        unlocked.set(Some(credentials.clone()));
        spawn_local(async move {
            let latest_req = LatestSensorRequest(credentials.clone());
            let history_req = SensorHistoryRequest(credentials);
            let (latest_res, history_res) =
                futures::join!(sensors.send(&latest_req), sensors.send(&history_req));
            match latest_res {
                Ok(reading) => latest.set(Some(reading)),
                Err(e) => {
                    latest.set(None);
                    notice.set(Some(Notice::error(e.user_message(SENSOR_FAILED))));
                }
            }
            // history is best effort
            history.set(history_res.unwrap_or_else(|e| {
                tracing::warn!(error = %e, "sensor history unavailable");
                Vec::new()
            }));
            set_loading.set(false);
        });
    };

    view! {
        <div class="divider">"Sensor data"</div>
        <div class="join w-full max-w-md">
            <input
                type="password"
                placeholder="Device API key"
                class="input input-bordered join-item w-full"
                prop:value=move || api_key.get()
                on:input=move |ev| api_key.set(event_target_value(&ev))
            />
            <button class="btn btn-success join-item" disabled=move || loading.get() on:click=load>
                "Load readings"
            </button>
        </div>
        <NoticeBanner notice=notice />
        {move || latest.get().map(|r| view! {
            <div class="stats stats-vertical md:stats-horizontal shadow w-full">
                <SensorStat label="Temperature" value=format!("{} °C", r.temperature) icon="🌡️" />
                <SensorStat label="Humidity" value=format!("{} %", r.humidity) icon="💧" />
                <SensorStat label="Soil Moisture" value=format!("{} %", r.soil_moisture) icon="🌱" />
                <SensorStat label="Water Level" value=format!("{} %", r.water_level) icon="🚰" />
                <SensorStat label="Plant Status" value=r.plant_status.clone() icon="🌿" />
            </div>
            <p class="text-sm text-base-content/60">
                {format!(
                    "Pest level {} · Health index {} · {}",
                    r.pest_level,
                    r.plant_health_index,
                    r.display_time(),
                )}
            </p>
        })}
        <Show when=move || history.with(|h| !h.is_empty())>
            <div class="overflow-x-auto">
                <table class="table table-xs table-zebra">
                    <thead>
                        <tr>
                            <th>"Time"</th>
                            <th>"Temp (°C)"</th>
                            <th>"Humidity (%)"</th>
                            <th>"Soil (%)"</th>
                            <th>"Water (%)"</th>
                            <th>"Status"</th>
                            <th>"Pest"</th>
                            <th>"Health"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || history.get()
                            key=|r| (r.id, r.timestamp.clone())
                            children=|r| view! {
                                <tr>
                                    <td>{r.display_time()}</td>
                                    <td>{r.temperature}</td>
                                    <td>{r.humidity}</td>
                                    <td>{r.soil_moisture}</td>
                                    <td>{r.water_level}</td>
                                    <td>{r.plant_status.clone()}</td>
                                    <td>{r.pest_level}</td>
                                    <td>{r.plant_health_index}</td>
                                </tr>
                            }
                        />
                    </tbody>
                </table>
            </div>
        </Show>
        {move || unlocked.get().map(|credentials| view! { <DetectedEvents credentials=credentials /> })}
    }
}

/// Camera detections stored by the edge service for this device.
#[component]
fn DetectedEvents(credentials: DeviceCredentials) -> impl IntoView {
    let services = use_services();
    let media_base = services.config.sensor_base_url.clone();
    let sensors = StoredValue::new(services.sensors());
    let credentials = StoredValue::new(credentials);
    let events = RwSignal::new(Vec::<DetectionEvent>::new());
    let (loading, set_loading) = signal(true);
    let notice = RwSignal::new(Option::<Notice>::None);

    Effect::new(move |_| {
        let sensors = sensors.get_value();
        let req = ListDetectionsRequest(credentials.get_value());
        spawn_local(async move {
            match sensors.send(&req).await {
                Ok(list) => events.set(list),
                Err(e) => {
                    tracing::warn!(error = %e, "detection events unavailable");
                    notice.set(Some(Notice::error(e.user_message(DETECTIONS_FAILED))));
                }
            }
            set_loading.set(false);
        });
    });

    let delete_one = move |id: i64| {
        notice.set(None);
        let sensors = sensors.get_value();
        let req = DeleteDetectionRequest {
            credentials: credentials.get_value(),
            id,
        };
        spawn_local(async move {
            match sensors.send(&req).await {
                Ok(_) => events.update(|list| list.retain(|e| e.id != id)),
                Err(e) => notice.set(Some(Notice::error(e.user_message(DETECTION_DELETE_FAILED)))),
            }
        });
    };

    let delete_all = move |_| {
        if !web::confirm("Are you sure you want to delete all detection events?") {
            return;
        }
        notice.set(None);
        let sensors = sensors.get_value();
        let req = DeleteAllDetectionsRequest(credentials.get_value());
        spawn_local(async move {
            match sensors.send(&req).await {
                Ok(_) => events.set(Vec::new()),
                Err(e) => notice.set(Some(Notice::error(e.user_message(DETECTION_DELETE_FAILED)))),
            }
        });
    };

    let base = StoredValue::new(media_base);
    let labels = |event: &DetectionEvent| {
        event
            .labels
            .iter()
            .map(|label| view! { <span class="badge badge-success badge-outline">{label.clone()}</span> })
            .collect_view()
    };

    view! {
        <div class="divider">"AI Detection Events"</div>
        <NoticeBanner notice=notice />
        {move || {
            if loading.get() {
                return view! { <Spinner label="Loading detection data..." /> }.into_any();
            }
            let list = events.get();
            let Some((latest, previous)) = list.split_first() else {
                return view! {
                    <p class="text-center text-base-content/60">"No detections recorded yet."</p>
                }
                .into_any();
            };
            let latest_id = latest.id;
            let base = base.get_value();
            view! {
                <div class="space-y-4">
                    <div class="card bg-base-200">
                        <div class="card-body p-4 space-y-2">
                            <div class="flex justify-between items-center">
                                <h4 class="font-semibold text-success">"Latest Detection"</h4>
                                <button class="btn btn-ghost btn-xs text-error" on:click=move |_| delete_one(latest_id)>
                                    "Delete"
                                </button>
                            </div>
                            <p class="text-sm text-base-content/60">{latest.display_time()}</p>
                            <div class="flex flex-wrap gap-2">{labels(latest)}</div>
                            {latest.snapshot_url(&base).map(|src| view! {
                                <img src=src alt="Snapshot" class="w-full max-h-60 object-cover rounded-box" />
                            })}
                            {latest.clip_url(&base).map(|href| view! {
                                <a href=href target="_blank" rel="noopener noreferrer" class="link link-success text-sm">
                                    "▶ Watch Clip"
                                </a>
                            })}
                        </div>
                    </div>
                    <Show when={
                        let has_previous = !previous.is_empty();
                        move || has_previous
                    }>
                        <h4 class="font-semibold text-success">"Previous Events"</h4>
                    </Show>
                    <div class="grid grid-cols-1 sm:grid-cols-2 gap-3 max-h-80 overflow-y-auto">
                        {previous
                            .iter()
                            .map(|event| {
                                let id = event.id;
                                view! {
                                    <div class="flex items-start gap-3 border border-base-300 rounded-box p-2">
                                        {event.snapshot_url(&base).map(|src| view! {
                                            <img src=src alt="Snap" class="w-16 h-16 object-cover rounded" />
                                        })}
                                        <div class="flex flex-col gap-1">
                                            <span class="text-xs text-base-content/60">{event.display_time()}</span>
                                            <div class="flex flex-wrap gap-1">{labels(event)}</div>
                                            {event.clip_url(&base).map(|href| view! {
                                                <a href=href target="_blank" rel="noopener noreferrer" class="link link-success text-xs">
                                                    "▶ Clip"
                                                </a>
                                            })}
                                            <button class="btn btn-ghost btn-xs text-error self-start" on:click=move |_| delete_one(id)>
                                                "Delete"
                                            </button>
                                        </div>
                                    </div>
                                }
                            })
                            .collect_view()}
                    </div>
                    <div class="flex justify-end">
                        <button class="btn btn-outline btn-error btn-sm" on:click=delete_all>"Delete All"</button>
                    </div>
                </div>
            }
            .into_any()
        }}
    }
}

#[component]
fn SensorStat(
    #[prop(into)] label: String,
    #[prop(into)] value: String,
    #[prop(into)] icon: String,
) -> impl IntoView {
    view! {
        <div class="stat">
            <div class="stat-figure text-2xl">{icon}</div>
            <div class="stat-title">{label}</div>
            <div class="stat-value text-xl">{value}</div>
        </div>
    }
}
