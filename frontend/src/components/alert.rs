use crate::components::icons::Leaf;
use crate::forms::Notice;
use leptos::prelude::*;

/// Inline success/error banner. Clicking the close button clears it.
#[component]
pub fn NoticeBanner(notice: RwSignal<Option<Notice>>) -> impl IntoView {
    move || {
        notice.get().map(|n| {
            let class = if n.is_error() {
                "alert alert-error text-sm py-2 mb-4"
            } else {
                "alert alert-success text-sm py-2 mb-4"
            };
            view! {
                <div role="alert" class=class>
                    <Leaf attr:class="h-5 w-5 shrink-0" />
                    <span class="flex-1">{n.message().to_string()}</span>
                    <button
                        type="button"
                        class="btn btn-ghost btn-xs"
                        aria-label="Dismiss"
                        on:click=move |_| notice.set(None)
                    >
                        "✕"
                    </button>
                </div>
            }
        })
    }
}

#[component]
pub fn Spinner(#[prop(optional, into)] label: Option<String>) -> impl IntoView {
    view! {
        <div class="flex items-center justify-center gap-2 py-8 text-base-content/70">
            <span class="loading loading-spinner loading-md text-primary"></span>
            {label}
        </div>
    }
}
