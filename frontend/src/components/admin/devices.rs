use super::{AdminState, SelectField, TextField};
use crate::components::icons::{Pencil, Trash2};
use crate::forms::check_device;
use farmvizion_shared::{
    DEVICE_ALLOCATIONS, DEVICE_STATUSES, DeleteDeviceRequest, Device, DeviceInput,
    ListDevicesRequest, UpdateDeviceRequest,
};
use leptos::prelude::*;

/// Devices are provisioned elsewhere; the back office only edits and removes them.
#[component]
pub fn DevicesTab(state: AdminState) -> impl IntoView {
    let devices = RwSignal::new(Vec::<Device>::new());
    let editing = RwSignal::new(Option::<i64>::None);
    let device_id = RwSignal::new(String::new());
    let name = RwSignal::new(String::new());
    let allocated = RwSignal::new(String::new());
    let status = RwSignal::new(String::new());

    let load = move || {
        state.run(ListDevicesRequest, "Failed to fetch devices", move |list| {
            devices.set(list)
        });
    };
    Effect::new(move |_| load());

    let close = move || {
        editing.set(None);
        for field in [device_id, name, allocated, status] {
            field.set(String::new());
        }
    };

    let save = move |_| {
        state.clear();
        let Some(id) = editing.get_untracked() else {
            return;
        };
        let device = DeviceInput {
            device_id: device_id.get_untracked().trim().to_string(),
            name: name.get_untracked().trim().to_string(),
            allocated: Some(allocated.get_untracked()).filter(|a| !a.is_empty()),
            status: status.get_untracked(),
        };
        if let Err(msg) = check_device(&device) {
            state.fail(msg);
            return;
        }
        state.run(UpdateDeviceRequest { id, device }, "Failed to update device", move |_| {
            state.succeed("Device updated successfully!");
            close();
            load();
        });
    };

    let delete = move |id: i64| {
        if !state.confirm_delete("device") {
            return;
        }
        state.clear();
        state.run(DeleteDeviceRequest { id }, "Failed to delete device", move |_| {
            state.succeed("Device deleted successfully!");
            load();
        });
    };

    let edit = move |device: &Device| {
        state.clear();
        let input = DeviceInput::from(device);
        device_id.set(input.device_id);
        name.set(input.name);
        allocated.set(input.allocated.unwrap_or_default());
        status.set(input.status);
        editing.set(Some(device.id));
    };

    view! {
        <div class="card bg-base-100 shadow">
            <div class="card-body space-y-4">
                <h2 class="card-title">"Devices"</h2>
                <Show when=move || editing.get().is_some()>
                    <div class="bg-base-200 rounded-box p-4 space-y-3">
                        <div class="grid grid-cols-1 md:grid-cols-4 gap-3">
                            <TextField label="Device ID" value=device_id />
                            <TextField label="Name" value=name />
                            <SelectField label="Allocated" value=allocated options=DEVICE_ALLOCATIONS prompt="Select Allocation" />
                            <SelectField label="Status" value=status options=DEVICE_STATUSES prompt="Select Status" />
                        </div>
                        <div class="flex gap-2">
                            <button class="btn btn-primary btn-sm" on:click=save disabled=move || state.loading.get()>
                                "Update Device"
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
                                <th>"Device ID"</th>
                                <th>"Name"</th>
                                <th>"Allocated"</th>
                                <th>"Status"</th>
                                <th>"User"</th>
                                <th>"Farm"</th>
                                <th>"Actions"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || devices.get()
                                key=|d| d.id
                                children=move |device| {
                                    let id = device.id;
                                    let row = StoredValue::new(device.clone());
                                    view! {
                                        <tr>
                                            <td>{device.id}</td>
                                            <td>{device.device_id.clone()}</td>
                                            <td>{device.name.clone()}</td>
                                            <td>{device.allocated.clone().unwrap_or_default()}</td>
                                            <td>{device.status.clone()}</td>
                                            <td>{device.user_id.map(|u| u.to_string()).unwrap_or_default()}</td>
                                            <td>{device.farm_id.map(|f| f.to_string()).unwrap_or_default()}</td>
                                            <td class="flex gap-1">
                                                <button
                                                    class="btn btn-ghost btn-xs"
                                                    aria-label="Edit"
                                                    on:click=move |_| row.with_value(|d| edit(d))
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
