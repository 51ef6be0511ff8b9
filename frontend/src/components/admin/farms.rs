use super::{AdminState, TextField};
use crate::components::icons::{Pencil, Plus, Trash2};
use crate::forms::{check_farm, optional_text, parse_optional};
use farmvizion_shared::{
    CreateFarmRequest, DeleteFarmRequest, Farm, FarmInput, ListFarmsRequest, UpdateFarmRequest,
};
use leptos::prelude::*;

fn show<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[derive(Clone, Copy)]
struct FarmForm {
    soil_type: RwSignal<String>,
    soil_water_level: RwSignal<String>,
    temperature: RwSignal<String>,
    humidity: RwSignal<String>,
    crop_id: RwSignal<String>,
    image_url: RwSignal<String>,
}

impl FarmForm {
    fn new() -> Self {
        Self {
            soil_type: RwSignal::new(String::new()),
            soil_water_level: RwSignal::new(String::new()),
            temperature: RwSignal::new(String::new()),
            humidity: RwSignal::new(String::new()),
            crop_id: RwSignal::new(String::new()),
            image_url: RwSignal::new(String::new()),
        }
    }

    fn read(&self) -> Result<FarmInput, &'static str> {
        let input = FarmInput {
            soil_type: self.soil_type.get_untracked().trim().to_string(),
            soil_water_level: parse_optional(&self.soil_water_level.get_untracked())?,
            temperature: parse_optional(&self.temperature.get_untracked())?,
            humidity: parse_optional(&self.humidity.get_untracked())?,
            crop_id: parse_optional(&self.crop_id.get_untracked())?,
            farm_image_url: optional_text(&self.image_url.get_untracked()),
        };
        check_farm(&input)?;
        Ok(input)
    }

    fn fill(&self, farm: &Farm) {
        let input = FarmInput::from(farm);
        self.soil_type.set(input.soil_type);
        self.soil_water_level.set(show(input.soil_water_level));
        self.temperature.set(show(input.temperature));
        self.humidity.set(show(input.humidity));
        self.crop_id.set(show(input.crop_id));
        self.image_url.set(input.farm_image_url.unwrap_or_default());
    }

    fn reset(&self) {
        for field in [
            self.soil_type,
            self.soil_water_level,
            self.temperature,
            self.humidity,
            self.crop_id,
            self.image_url,
        ] {
            field.set(String::new());
        }
    }
}

#[component]
pub fn FarmsTab(state: AdminState) -> impl IntoView {
    let farms = RwSignal::new(Vec::<Farm>::new());
    let form = FarmForm::new();
    let editing = RwSignal::new(Option::<i64>::None);

    let load = move || {
        state.run(ListFarmsRequest, "Failed to fetch farms", move |list| {
            farms.set(list)
        });
    };
    Effect::new(move |_| load());

    let save = move |_| {
        state.clear();
        let farm = match form.read() {
            Ok(farm) => farm,
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
            Some(id) => state.run(UpdateFarmRequest { id, farm }, "Failed to update farm", move |_| {
                done("Farm updated successfully!")
            }),
            None => state.run(CreateFarmRequest { farm }, "Failed to create farm", move |_| {
                done("Farm created successfully!")
            }),
        }
    };

    let delete = move |id: i64| {
        if !state.confirm_delete("farm") {
            return;
        }
        state.clear();
        state.run(DeleteFarmRequest { id }, "Failed to delete farm", move |_| {
            state.succeed("Farm deleted successfully!");
            load();
        });
    };

    view! {
        <div class="card bg-base-100 shadow">
            <div class="card-body space-y-4">
                <h2 class="card-title">
                    {move || if editing.get().is_some() { "Edit Farm" } else { "Create Farm" }}
                </h2>
                <div class="grid grid-cols-1 md:grid-cols-3 gap-3">
                    <TextField label="Soil Type" value=form.soil_type />
                    <TextField label="Soil Water Level" value=form.soil_water_level kind="number" />
                    <TextField label="Temperature" value=form.temperature kind="number" />
                    <TextField label="Humidity" value=form.humidity kind="number" />
                    <TextField label="Crop ID" value=form.crop_id kind="number" />
                    <TextField label="Farm Image URL" value=form.image_url kind="url" />
                </div>
                <div class="flex gap-2">
                    <button class="btn btn-primary btn-sm gap-1" on:click=save disabled=move || state.loading.get()>
                        <Plus attr:class="h-4 w-4" />
                        {move || if editing.get().is_some() { "Update Farm" } else { "Create Farm" }}
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
                                <th>"Soil Type"</th>
                                <th>"Water Level"</th>
                                <th>"Temperature"</th>
                                <th>"Humidity"</th>
                                <th>"Crop ID"</th>
                                <th>"Image"</th>
                                <th>"Actions"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || farms.get()
                                key=|f| f.id
                                children=move |farm| {
                                    let id = farm.id;
                                    let row = StoredValue::new(farm.clone());
                                    view! {
                                        <tr>
                                            <td>{farm.id}</td>
                                            <td>{farm.soil_type.clone()}</td>
                                            <td>{show(farm.soil_water_level)}</td>
                                            <td>{show(farm.temperature)}</td>
                                            <td>{show(farm.humidity)}</td>
                                            <td>{show(farm.crop_id)}</td>
                                            <td>
                                                {farm.farm_image_url.clone().map(|src| view! {
                                                    <img src=src alt="Farm" class="w-12 h-12 object-cover rounded" />
                                                })}
                                            </td>
                                            <td class="flex gap-1">
                                                <button
                                                    class="btn btn-ghost btn-xs"
                                                    aria-label="Edit"
                                                    on:click=move |_| {
                                                        state.clear();
                                                        row.with_value(|f| form.fill(f));
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

#[cfg(test)]
mod tests {
    use super::show;

    #[test]
    fn test_show_blank_for_missing() {
        assert_eq!(show::<f64>(None), "");
        assert_eq!(show(Some(12.5)), "12.5");
        assert_eq!(show(Some(3_i64)), "3");
    }
}
