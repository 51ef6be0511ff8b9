use farmvizion_shared::COUNTRY_CODES;
use leptos::prelude::*;

/// Dial-prefix picker paired with a local number input.
#[component]
pub fn PhoneField(code: RwSignal<String>, local: RwSignal<String>) -> impl IntoView {
    view! {
        <div class="join w-full">
            <select
                class="select select-bordered join-item"
                aria-label="Country code"
                prop:value=move || code.get()
                on:change=move |ev| code.set(event_target_value(&ev))
            >
                {COUNTRY_CODES
                    .iter()
                    .map(|(prefix, country)| view! {
                        <option value=*prefix>{format!("{country} ({prefix})")}</option>
                    })
                    .collect_view()}
            </select>
            <input
                type="tel"
                placeholder="Phone number (optional)"
                class="input input-bordered join-item w-full"
                prop:value=move || local.get()
                on:input=move |ev| local.set(event_target_value(&ev))
            />
        </div>
    }
}
