use super::{AdminState, TextField};
use crate::components::icons::{Pencil, Trash2};
use crate::forms::check_query_update;
use farmvizion_shared::{
    DeleteQueryRequest, ListQueriesRequest, SupportQuery, SupportQueryInput, UpdateQueryRequest,
};
use leptos::prelude::*;

/// Farm plan enquiries submitted from the public site.
#[component]
pub fn QueriesTab(state: AdminState) -> impl IntoView {
    let queries = RwSignal::new(Vec::<SupportQuery>::new());
    let editing = RwSignal::new(Option::<i64>::None);
    let email = RwSignal::new(String::new());
    let message = RwSignal::new(String::new());
    let status = RwSignal::new(String::new());

    let load = move || {
        state.run(ListQueriesRequest, "Failed to fetch queries", move |list| {
            queries.set(list)
        });
    };
    Effect::new(move |_| load());

    let close = move || {
        editing.set(None);
        for field in [email, message, status] {
            field.set(String::new());
        }
    };

    let save = move |_| {
        state.clear();
        let Some(id) = editing.get_untracked() else {
            return;
        };
        let query = SupportQueryInput {
            email: email.get_untracked().trim().to_string(),
            message: message.get_untracked(),
            status: status.get_untracked().trim().to_string(),
        };
        if let Err(msg) = check_query_update(&query) {
            state.fail(msg);
            return;
        }
        state.run(UpdateQueryRequest { id, query }, "Failed to update query", move |_| {
            state.succeed("Query updated successfully!");
            close();
            load();
        });
    };

    let delete = move |id: i64| {
        if !state.confirm_delete("query") {
            return;
        }
        state.clear();
        state.run(DeleteQueryRequest { id }, "Failed to delete query", move |_| {
            state.succeed("Query deleted successfully!");
            load();
        });
    };

    let edit = move |query: &SupportQuery| {
        state.clear();
        let input = SupportQueryInput::from(query);
        email.set(input.email);
        message.set(input.message);
        status.set(input.status);
        editing.set(Some(query.id));
    };

    view! {
        <div class="card bg-base-100 shadow">
            <div class="card-body space-y-4">
                <h2 class="card-title">"Queries"</h2>
                <Show when=move || editing.get().is_some()>
                    <div class="bg-base-200 rounded-box p-4 space-y-3">
                        <div class="grid grid-cols-1 md:grid-cols-2 gap-3">
                            <TextField label="Email" value=email kind="email" />
                            <TextField label="Status" value=status placeholder="e.g. Resolved" />
                        </div>
                        <label class="form-control">
                            <span class="label-text">"Message"</span>
                            <textarea
                                rows=4
                                class="textarea textarea-bordered"
                                prop:value=move || message.get()
                                on:input=move |ev| message.set(event_target_value(&ev))
                            ></textarea>
                        </label>
                        <div class="flex gap-2">
                            <button class="btn btn-primary btn-sm" on:click=save disabled=move || state.loading.get()>
                                "Update Query"
                            </button>
                            <button class="btn btn-ghost btn-sm" on:click=move |_| close()>"Cancel"</button>
                        </div>
                    </div>
                </Show>

                <div class="overflow-x-auto">
                    <table class="table table-zebra table-sm">
                        <thead>
                            <tr>
                                <th>"ID"</th>
                                <th>"Name"</th>
                                <th>"Email"</th>
                                <th>"Message"</th>
                                <th>"Status"</th>
                                <th>"Actions"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || queries.get()
                                key=|q| q.id
                                children=move |query| {
                                    let id = query.id;
                                    let row = StoredValue::new(query.clone());
                                    view! {
                                        <tr>
                                            <td>{query.id}</td>
                                            <td>{query.name.clone()}</td>
                                            <td>{query.email.clone()}</td>
                                            <td class="whitespace-pre-wrap max-w-md">{query.message.clone()}</td>
                                            <td>
                                                <span class="badge badge-outline">{query.status.clone()}</span>
                                            </td>
                                            <td class="flex gap-1">
                                                <button
                                                    class="btn btn-ghost btn-xs"
                                                    aria-label="Edit"
                                                    on:click=move |_| row.with_value(|q| edit(q))
                                                >
                                                    <Pencil attr:class="h-4 w-4" />
                                                </button>
                                                <button
                                                    class="btn btn-ghost btn-xs text-error"
                                                    aria-label="Delete"
                                                    on:click=move |_| delete(id)
                                                >
                                                    <Trash2 attr:class="h-4 w-4" />
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
                </div>
            </div>
        </div>
    }
}
