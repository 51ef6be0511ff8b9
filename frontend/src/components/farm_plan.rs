use crate::api::ApiError;
use crate::components::alert::NoticeBanner;
use crate::forms::{Notice, check_farm_plan_query, parse_optional};
use crate::services::use_services;
use farmvizion_shared::{CropKind, FarmPlanQuery, GrowingConditions, recommend_crops};
use leptos::prelude::*;
use leptos::task::spawn_local;

const QUERY_FAILED: &str = "Something went wrong. Please try again later.";
const QUERY_NETWORK_FAILED: &str = "Failed to submit. Please check your network.";

/// Message body sent with the enquiry, listing the crops the farmer ticked.
fn enquiry_message(message: &str, crops: &[CropKind]) -> String {
    let message = message.trim();
    if crops.is_empty() {
        return message.to_string();
    }
    let labels: Vec<&str> = crops.iter().map(CropKind::label).collect();
    let interest = format!("Interested crops: {}", labels.join(", "));
    if message.is_empty() {
        interest
    } else {
        format!("{message}\n\n{interest}")
    }
}

#[component]
pub fn FarmPlanPage() -> impl IntoView {
    let api = StoredValue::new(use_services().api());
    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let message = RwSignal::new(String::new());
    let selected = RwSignal::new(Vec::<CropKind>::new());
    let (submitted, set_submitted) = signal(false);
    let (is_submitting, set_is_submitting) = signal(false);
    let notice = RwSignal::new(Option::<Notice>::None);

    let toggle = move |crop: CropKind| {
        selected.update(|list| {
            if let Some(pos) = list.iter().position(|c| *c == crop) {
                list.remove(pos);
            } else {
                list.push(crop);
            }
        })
    };

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        notice.set(None);

        let query = FarmPlanQuery {
            name: name.get_untracked().trim().to_string(),
            email: email.get_untracked().trim().to_string(),
            message: enquiry_message(&message.get_untracked(), &selected.get_untracked()),
        };
        if let Err(msg) = check_farm_plan_query(&query) {
            notice.set(Some(Notice::error(msg)));
            return;
        }

        let api = api.get_value();
        set_is_submitting.set(true);
        spawn_local(async move {
            match api.send(&query).await {
                Ok(_) => set_submitted.set(true),
                Err(ApiError::Transport(_)) => {
                    notice.set(Some(Notice::error(QUERY_NETWORK_FAILED)))
                }
                Err(e) => notice.set(Some(Notice::error(e.user_message(QUERY_FAILED)))),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="max-w-3xl mx-auto">
            <Show
                when=move || !submitted.get()
                fallback=|| view! {
                    <div class="alert alert-success text-lg">
                        "🎉 Congratulations! Your journey with Farmvizion has begun. Let's make this world a better place to live and grow."
                    </div>
                }
            >
                <form class="card bg-base-100 shadow-xl" on:submit=on_submit>
                    <div class="card-body space-y-4">
                        <h2 class="card-title text-2xl text-success">"🌿 Plan your farm"</h2>
                        <NoticeBanner notice=notice />

                        <CropAdvisor />

                        <div>
                            <h3 class="font-semibold mb-2">"Which crops interest you?"</h3>
                            <div class="grid grid-cols-2 md:grid-cols-4 gap-3">
                                {CropKind::ALL
                                    .into_iter()
                                    .map(|crop| {
                                        let is_selected = move || selected.with(|l| l.contains(&crop));
                                        view! {
                                            <label class=move || if is_selected() {
                                                "card border-2 border-success cursor-pointer p-4"
                                            } else {
                                                "card border-2 border-base-300 cursor-pointer p-4"
                                            }>
                                                <span class="font-medium">{crop.label()}</span>
                                                <input
                                                    type="checkbox"
                                                    class="checkbox checkbox-success checkbox-sm mt-2"
                                                    prop:checked=is_selected
                                                    on:change=move |_| toggle(crop)
                                                />
                                            </label>
                                        }
                                    })
                                    .collect_view()}
                            </div>
                        </div>

                        <input
                            type="text"
                            placeholder="Your Name"
                            class="input input-bordered w-full"
                            prop:value=move || name.get()
                            on:input=move |ev| name.set(event_target_value(&ev))
                            required
                        />
                        <input
                            type="email"
                            placeholder="Your Email"
                            class="input input-bordered w-full"
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                            required
                        />
                        <textarea
                            placeholder="Tell us more about your farm or needs..."
                            rows=5
                            class="textarea textarea-bordered w-full"
                            prop:value=move || message.get()
                            on:input=move |ev| message.set(event_target_value(&ev))
                        ></textarea>
                        <button class="btn btn-success" disabled=move || is_submitting.get()>
                            "🌾 Submit"
                        </button>
                    </div>
                </form>
            </Show>
        </div>
    }
}

/// Crop suggestions for manually entered growing conditions.
#[component]
fn CropAdvisor() -> impl IntoView {
    let temperature = RwSignal::new(String::new());
    let humidity = RwSignal::new(String::new());
    let soil_moisture = RwSignal::new(String::new());

    let recommendation = move || -> Result<Option<Vec<CropKind>>, &'static str> {
        let t = parse_optional::<f64>(&temperature.get())?;
        let h = parse_optional::<f64>(&humidity.get())?;
        let m = parse_optional::<f64>(&soil_moisture.get())?;
        Ok(match (t, h, m) {
            (Some(temperature), Some(humidity), Some(soil_moisture)) => {
                Some(recommend_crops(GrowingConditions {
                    temperature,
                    humidity,
                    soil_moisture,
                }))
            }
            _ => None,
        })
    };

    let field = move |label: &'static str, placeholder: &'static str, value: RwSignal<String>| {
        view! {
            <label class="form-control">
                <span class="label-text">{label}</span>
                <input
                    type="number"
                    step="any"
                    placeholder=placeholder
                    class="input input-bordered input-sm"
                    prop:value=move || value.get()
                    on:input=move |ev| value.set(event_target_value(&ev))
                />
            </label>
        }
    };

    view! {
        <div class="bg-base-200 rounded-box p-4 space-y-3">
            <h3 class="font-semibold">"Crop recommendation"</h3>
            <div class="grid grid-cols-1 md:grid-cols-3 gap-3">
                {field("Temperature (°C)", "e.g. 22", temperature)}
                {field("Humidity (%)", "e.g. 55", humidity)}
                {field("Soil moisture (0-1)", "e.g. 0.18", soil_moisture)}
            </div>
            {move || match recommendation() {
                Err(msg) => view! { <p class="text-error text-sm">{msg}</p> }.into_any(),
                Ok(None) => view! {
                    <p class="text-sm text-base-content/70">"Enter all three values to see suggestions."</p>
                }
                .into_any(),
                Ok(Some(crops)) if crops.is_empty() => view! {
                    <p class="text-sm">"No crop in our catalogue suits these conditions."</p>
                }
                .into_any(),
                Ok(Some(crops)) => view! {
                    <div class="flex flex-wrap gap-2 items-center">
                        <span class="text-sm">"Recommended:"</span>
                        {crops
                            .into_iter()
                            .map(|c| view! { <span class="badge badge-success">{c.label()}</span> })
                            .collect_view()}
                    </div>
                }
                .into_any(),
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enquiry_message_lists_selected_crops() {
        assert_eq!(enquiry_message("  hello ", &[]), "hello");
        assert_eq!(
            enquiry_message("", &[CropKind::Rice, CropKind::Olive]),
            "Interested crops: Rice, Olive"
        );
        assert_eq!(
            enquiry_message("2 acres", &[CropKind::Wheat]),
            "2 acres\n\nInterested crops: Wheat"
        );
    }
}
