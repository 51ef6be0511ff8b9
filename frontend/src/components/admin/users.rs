use super::{AdminState, SelectField, TextField};
use crate::components::country_code::PhoneField;
use crate::components::icons::{Pencil, Plus, Trash2};
use crate::forms::{check_new_password, check_new_user, check_user_update};
use farmvizion_shared::{
    AdminResetPasswordRequest, AdminUser, CreateUserRequest, DEFAULT_COUNTRY_CODE,
    DeleteUserRequest, ListUsersRequest, Role, UpdateUserRequest, UserInput, compose_phone,
    split_phone,
};
use leptos::prelude::*;

const ROLES: &[&str] = &["admin", "user"];
const USER_TYPES: &[&str] = &["admin", "user"];

/// Signals backing the create/edit form.
#[derive(Clone, Copy)]
struct UserForm {
    email: RwSignal<String>,
    name: RwSignal<String>,
    location: RwSignal<String>,
    user_type: RwSignal<String>,
    role: RwSignal<String>,
    country_code: RwSignal<String>,
    phone: RwSignal<String>,
    password: RwSignal<String>,
}

impl UserForm {
    fn new() -> Self {
        Self {
            email: RwSignal::new(String::new()),
            name: RwSignal::new(String::new()),
            location: RwSignal::new(String::new()),
            user_type: RwSignal::new(String::new()),
            role: RwSignal::new(String::new()),
            country_code: RwSignal::new(DEFAULT_COUNTRY_CODE.to_string()),
            phone: RwSignal::new(String::new()),
            password: RwSignal::new(String::new()),
        }
    }

    fn read(&self) -> UserInput {
        UserInput {
            email: self.email.get_untracked().trim().to_string(),
            name: self.name.get_untracked().trim().to_string(),
            location: self.location.get_untracked().trim().to_string(),
            user_type: self.user_type.get_untracked(),
            role: Role::from(self.role.get_untracked().as_str()),
            phone: compose_phone(&self.country_code.get_untracked(), &self.phone.get_untracked()),
        }
    }

    fn fill(&self, user: &AdminUser) {
        let input = UserInput::from(user);
        self.email.set(input.email);
        self.name.set(input.name);
        self.location.set(input.location);
        self.user_type.set(input.user_type);
        self.role.set(input.role.as_str().to_string());
        let (code, local) = input
            .phone
            .as_deref()
            .map(split_phone)
            .unwrap_or((DEFAULT_COUNTRY_CODE, String::new()));
        self.country_code.set(code.to_string());
        self.phone.set(local);
        self.password.set(String::new());
    }

    fn reset(&self) {
        for field in [self.email, self.name, self.location, self.user_type, self.role, self.phone, self.password] {
            field.set(String::new());
        }
        self.country_code.set(DEFAULT_COUNTRY_CODE.to_string());
    }
}

#[component]
pub fn UsersTab(state: AdminState) -> impl IntoView {
    let users = RwSignal::new(Vec::<AdminUser>::new());
    let form = UserForm::new();
    let editing = RwSignal::new(Option::<i64>::None);
    let resetting = RwSignal::new(Option::<i64>::None);
    let new_password = RwSignal::new(String::new());

    let load = move || {
        state.run(ListUsersRequest, "Failed to fetch users", move |list| {
            users.set(list)
        });
    };
    Effect::new(move |_| load());

    let save = move |_| {
        state.clear();
        let input = form.read();
        match editing.get_untracked() {
            Some(id) => {
                if let Err(msg) = check_user_update(&input) {
                    state.fail(msg);
                    return;
                }
                state.run(
                    UpdateUserRequest { id, user: input },
                    "Failed to update user",
                    move |_| {
                        state.succeed("User updated successfully!");
                        editing.set(None);
                        form.reset();
                        load();
                    },
                );
            }
            None => {
                let password = form.password.get_untracked();
                if let Err(msg) = check_new_user(&input, &password) {
                    state.fail(msg);
                    return;
                }
                state.run(
                    CreateUserRequest { user: input, password },
                    "Failed to create user",
                    move |_| {
                        state.succeed("User created successfully!");
                        form.reset();
                        load();
                    },
                );
            }
        }
    };

    let cancel = move |_| {
        editing.set(None);
        form.reset();
    };

    let delete = move |id: i64| {
        if !state.confirm_delete("user") {
            return;
        }
        state.clear();
        state.run(DeleteUserRequest { id }, "Failed to delete user", move |_| {
            state.succeed("User deleted successfully!");
            load();
        });
    };

    let submit_reset = move |_| {
        state.clear();
        let Some(id) = resetting.get_untracked() else {
            return;
        };
        let password = new_password.get_untracked();
        if let Err(msg) = check_new_password(&password) {
            state.fail(msg);
            return;
        }
        state.run(
            AdminResetPasswordRequest {
                id,
                new_password: password,
            },
            "Failed to reset password",
            move |_| {
                state.succeed("Password reset successfully!");
                resetting.set(None);
                new_password.set(String::new());
            },
        );
    };

    view! {
        <div class="card bg-base-100 shadow">
            <div class="card-body space-y-4">
                <h2 class="card-title">
                    {move || if editing.get().is_some() { "Edit User" } else { "Create User" }}
                </h2>
                <div class="grid grid-cols-1 md:grid-cols-3 gap-3">
                    <TextField label="Email" value=form.email kind="email" />
                    <TextField label="Name" value=form.name />
                    <TextField label="Location" value=form.location />
                    <SelectField label="User Type" value=form.user_type options=USER_TYPES prompt="Select User Type" />
                    <SelectField label="Role" value=form.role options=ROLES prompt="Select Role" />
                    <label class="form-control w-full">
                        <span class="label-text">"Phone"</span>
                        <PhoneField code=form.country_code local=form.phone />
                    </label>
                    <Show when=move || editing.get().is_none()>
                        <TextField label="Password" value=form.password kind="password" />
                    </Show>
                </div>
                <div class="flex gap-2">
                    <button class="btn btn-primary btn-sm gap-1" on:click=save disabled=move || state.loading.get()>
                        <Plus attr:class="h-4 w-4" />
                        {move || if editing.get().is_some() { "Update User" } else { "Create User" }}
                    </button>
                    <Show when=move || editing.get().is_some()>
                        <button class="btn btn-ghost btn-sm" on:click=cancel>"Cancel"</button>
                    </Show>
                </div>

                <Show when=move || resetting.get().is_some()>
                    <div class="bg-base-200 rounded-box p-4 flex flex-wrap items-end gap-2">
                        <TextField label="New Password" value=new_password kind="password" placeholder="At least 8 characters" />
                        <button class="btn btn-warning btn-sm" on:click=submit_reset>"Reset Password"</button>
                        <button
                            class="btn btn-ghost btn-sm"
                            on:click=move |_| {
                                resetting.set(None);
                                new_password.set(String::new());
                            }
                        >
                            "Cancel"
                        </button>
                    </div>
                </Show>

                <div class="overflow-x-auto">
                    <table class="table table-zebra table-sm">
                        <thead>
                            <tr>
                                <th>"ID"</th>
                                <th>"Email"</th>
                                <th>"Name"</th>
                                <th>"Location"</th>
                                <th>"User Type"</th>
                                <th>"Role"</th>
                                <th>"Phone"</th>
                                <th>"Actions"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || users.get()
                                key=|u| u.id
                                children=move |user| {
                                    let id = user.id;
                                    let row = StoredValue::new(user.clone());
                                    view! {
                                        <tr>
                                            <td>{user.id}</td>
                                            <td>{user.email.clone()}</td>
                                            <td>{user.name.clone()}</td>
                                            <td>{user.location.clone()}</td>
                                            <td>{user.user_type.clone()}</td>
                                            <td>{user.role.to_string()}</td>
                                            <td>{user.phone.clone().unwrap_or_else(|| "-".to_string())}</td>
                                            <td class="flex gap-1">
                                                <button
                                                    class="btn btn-ghost btn-xs"
                                                    aria-label="Edit"
                                                    on:click=move |_| {
                                                        state.clear();
                                                        row.with_value(|u| form.fill(u));
                                                        editing.set(Some(id));
                                                    }
                                                >
                                                    <Pencil attr:class="h-4 w-4" />
                                                </button>
                                                <button
                                                    class="btn btn-ghost btn-xs"
                                                    on:click=move |_| {
                                                        new_password.set(String::new());
                                                        resetting.set(Some(id));
                                                    }
                                                >
                                                    "Reset PW"
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
