use super::{AdminState, TextField};
use crate::components::icons::{Pencil, Plus, Trash2};
use crate::forms::{check_crop, optional_text, parse_optional};
use farmvizion_shared::{
    Crop, CropInput, CreateCropRequest, DeleteCropRequest, ListCropsRequest, UpdateCropRequest,
};
use leptos::prelude::*;

#[derive(Clone, Copy)]
struct CropForm {
    name: RwSignal<String>,
    kind: RwSignal<String>,
    season: RwSignal<String>,
    unit: RwSignal<String>,
    price: RwSignal<String>,
    notes: RwSignal<String>,
}

impl CropForm {
    fn new() -> Self {
        Self {
            name: RwSignal::new(String::new()),
            kind: RwSignal::new(String::new()),
            season: RwSignal::new(String::new()),
            unit: RwSignal::new(String::new()),
            price: RwSignal::new(String::new()),
            notes: RwSignal::new(String::new()),
        }
    }

    fn fields(&self) -> [RwSignal<String>; 6] {
        [self.name, self.kind, self.season, self.unit, self.price, self.notes]
    }

    fn read(&self) -> Result<CropInput, &'static str> {
        let input = CropInput {
            name: self.name.get_untracked().trim().to_string(),
            kind: optional_text(&self.kind.get_untracked()),
            season: optional_text(&self.season.get_untracked()),
            unit: optional_text(&self.unit.get_untracked()),
            price_per_unit: parse_optional(&self.price.get_untracked())?,
            notes: optional_text(&self.notes.get_untracked()),
        };
        check_crop(&input)?;
        Ok(input)
    }

    fn fill(&self, crop: &Crop) {
        let input = CropInput::from(crop);
        self.name.set(input.name);
        self.kind.set(input.kind.unwrap_or_default());
        self.season.set(input.season.unwrap_or_default());
        self.unit.set(input.unit.unwrap_or_default());
        self.price
            .set(input.price_per_unit.map(|p| p.to_string()).unwrap_or_default());
        self.notes.set(input.notes.unwrap_or_default());
    }

    fn reset(&self) {
        self.fields().iter().for_each(|f| f.set(String::new()));
    }
}

#[component]
pub fn CropsTab(state: AdminState) -> impl IntoView {
    let crops = RwSignal::new(Vec::<Crop>::new());
    let form = CropForm::new();
    let editing = RwSignal::new(Option::<i64>::None);

    let load = move || {
        state.run(ListCropsRequest, "Failed to fetch crops", move |list| {
            crops.set(list)
        });
    };
    Effect::new(move |_| load());

    let save = move |_| {
        state.clear();
        let crop = match form.read() {
            Ok(crop) => crop,
            Err(msg) => {
                state.fail(msg);
                return;
            }
        };
        let done = move |msg: &'static str| {
            state.succeed(msg);
            editing.set(None);
            form.reset();
            load();
        };
        match editing.get_untracked() {
            Some(id) => state.run(UpdateCropRequest { id, crop }, "Failed to update crop", move |_| {
                done("Crop updated successfully!")
            }),
            None => state.run(CreateCropRequest { crop }, "Failed to create crop", move |_| {
                done("Crop created successfully!")
            }),
        }
    };

    let delete = move |id: i64| {
        if !state.confirm_delete("crop") {
            return;
        }
        state.clear();
        state.run(DeleteCropRequest { id }, "Failed to delete crop", move |_| {
            state.succeed("Crop deleted successfully!");
            load();
        });
    };

    view! {
        <div class="card bg-base-100 shadow">
            <div class="card-body space-y-4">
                <h2 class="card-title">
                    {move || if editing.get().is_some() { "Edit Crop" } else { "Create Crop" }}
                </h2>
                <div class="grid grid-cols-1 md:grid-cols-3 gap-3">
                    <TextField label="Name" value=form.name />
                    <TextField label="Type" value=form.kind />
                    <TextField label="Season" value=form.season />
                    <TextField label="Unit" value=form.unit placeholder="kg" />
                    <TextField label="Price per Unit" value=form.price kind="number" />
                    <TextField label="Notes" value=form.notes />
                </div>
                <div class="flex gap-2">
                    <button class="btn btn-primary btn-sm gap-1" on:click=save disabled=move || state.loading.get()>
                        <Plus attr:class="h-4 w-4" />
                        {move || if editing.get().is_some() { "Update Crop" } else { "Create Crop" }}
                    </button>
                    <Show when=move || editing.get().is_some()>
                        <button
                            class="btn btn-ghost btn-sm"
                            on:click=move |_| {
                                editing.set(None);
                                form.reset();
                            }
                        >
                            "Cancel"
                        </button>
                    </Show>
                </div>

                <div class="overflow-x-auto">
                    <table class="table table-zebra table-sm">
                        <thead>
                            <tr>
                                <th>"ID"</th>
                                <th>"Name"</th>
                                <th>"Type"</th>
                                <th>"Season"</th>
                                <th>"Unit"</th>
                                <th>"Price"</th>
                                <th>"Notes"</th>
                                <th>"Actions"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || crops.get()
                                key=|c| c.id
                                children=move |crop| {
                                    let id = crop.id;
                                    let row = StoredValue::new(crop.clone());
                                    view! {
                                        <tr>
                                            <td>{crop.id}</td>
                                            <td>{crop.name.clone()}</td>
                                            <td>{crop.kind.clone().unwrap_or_default()}</td>
                                            <td>{crop.season.clone().unwrap_or_default()}</td>
                                            <td>{crop.unit.clone().unwrap_or_default()}</td>
                                            <td>{crop.price_per_unit.map(|p| p.to_string()).unwrap_or_default()}</td>
                                            <td>{crop.notes.clone().unwrap_or_default()}</td>
                                            <td class="flex gap-1">
                                                <button
                                                    class="btn btn-ghost btn-xs"
                                                    aria-label="Edit"
                                                    on:click=move |_| {
                                                        state.clear();
                                                        row.with_value(|c| form.fill(c));
                                                        editing.set(Some(id));
                                                    }
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
