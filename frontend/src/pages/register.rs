use leptos::*;
use leptos_router::*;
use shared::{RegisterRequest, Role};

use crate::api::{ApiClient, AuthState};

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

#[component]
pub fn Register() -> impl IntoView {
    let auth_state = expect_context::<AuthState>();
    let navigate = use_navigate();

    let name = create_rw_signal(String::new());
    let email = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let role = create_rw_signal(Role::Student);
    let roll = create_rw_signal(String::new());
    let branch = create_rw_signal(String::new());
    let employee_id = create_rw_signal(String::new());
    let phone = create_rw_signal(String::new());
    let error = create_rw_signal(Option::<String>::None);
    let loading = create_rw_signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let nav = navigate.clone();
        let auth = auth_state.clone();

        loading.set(true);
        error.set(None);

        // Only the fields belonging to the chosen role travel with the
        // request; the others stay None.
        let request = match role.get() {
            Role::Student => RegisterRequest {
                name: name.get(),
                email: email.get(),
                password: password.get(),
                role: Role::Student,
                roll: non_empty(roll.get()),
                branch: non_empty(branch.get()),
                employee_id: None,
                phone: None,
            },
            Role::Teacher => RegisterRequest {
                name: name.get(),
                email: email.get(),
                password: password.get(),
                role: Role::Teacher,
                roll: None,
                branch: None,
                employee_id: non_empty(employee_id.get()),
                phone: non_empty(phone.get()),
            },
        };

        wasm_bindgen_futures::spawn_local(async move {
            match ApiClient::register(request).await {
                Ok(response) => {
                    auth.set_auth(response);
                    nav("/", Default::default());
                }
                Err(e) => {
                    error.set(Some(e));
                    loading.set(false);
                }
            }
        });
    };

    view! {
        <div class="auth-container">
            <div class="auth-card card">
                <div class="auth-header">
                    <h1 class="auth-title">"Create Account"</h1>
                    <p class="auth-subtitle">"Join Smart Attendance"</p>
                </div>

                {move || error.get().map(|e| view! {
                    <div class="alert alert-error">{e}</div>
                })}

                <form on:submit=on_submit>
                    <div class="form-group">
                        <label class="form-label" for="name">"Full Name"</label>
                        <input
                            type="text"
                            id="name"
                            class="form-input"
                            placeholder="Enter your full name"
                            prop:value=move || name.get()
                            on:input=move |ev| name.set(event_target_value(&ev))
                            required
                        />
                    </div>

                    <div class="form-group">
                        <label class="form-label" for="email">"Email"</label>
                        <input
                            type="email"
                            id="email"
                            class="form-input"
                            placeholder="Enter your email"
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                            required
                        />
                    </div>

                    <div class="form-group">
                        <label class="form-label" for="password">"Password"</label>
                        <input
                            type="password"
                            id="password"
                            class="form-input"
                            placeholder="At least 8 characters"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                            required
                        />
                    </div>

                    <div class="form-group">
                        <label class="form-label" for="role">"I am a"</label>
                        <select
                            id="role"
                            class="form-input"
                            on:change=move |ev| {
                                role.set(event_target_value(&ev).parse().unwrap_or(Role::Student));
                            }
                        >
                            <option value="student" selected=move || role.get() == Role::Student>
                                "Student"
                            </option>
                            <option value="teacher" selected=move || role.get() == Role::Teacher>
                                "Teacher"
                            </option>
                        </select>
                    </div>

                    <Show when=move || role.get() == Role::Student fallback=|| ()>
                        <div class="form-group">
                            <label class="form-label" for="roll">"Roll Number"</label>
                            <input
                                type="text"
                                id="roll"
                                class="form-input"
                                placeholder="e.g. 2101"
                                prop:value=move || roll.get()
                                on:input=move |ev| roll.set(event_target_value(&ev))
                            />
                        </div>
                        <div class="form-group">
                            <label class="form-label" for="branch">"Branch"</label>
                            <input
                                type="text"
                                id="branch"
                                class="form-input"
                                placeholder="e.g. Computer Science"
                                prop:value=move || branch.get()
                                on:input=move |ev| branch.set(event_target_value(&ev))
                            />
                        </div>
                    </Show>

                    <Show when=move || role.get() == Role::Teacher fallback=|| ()>
                        <div class="form-group">
                            <label class="form-label" for="employee-id">"Employee ID"</label>
                            <input
                                type="text"
                                id="employee-id"
                                class="form-input"
                                placeholder="Enter your employee ID"
                                prop:value=move || employee_id.get()
                                on:input=move |ev| employee_id.set(event_target_value(&ev))
                            />
                        </div>
                        <div class="form-group">
                            <label class="form-label" for="phone">"Phone"</label>
                            <input
                                type="tel"
                                id="phone"
                                class="form-input"
                                placeholder="Enter your phone number"
                                prop:value=move || phone.get()
                                on:input=move |ev| phone.set(event_target_value(&ev))
                            />
                        </div>
                    </Show>

                    <button
                        type="submit"
                        class="btn btn-primary"
                        style="width: 100%; margin-top: 1rem;"
                        disabled=move || loading.get()
                    >
                        {move || if loading.get() { "Creating account..." } else { "Sign Up" }}
                    </button>
                </form>

                <p style="text-align: center; margin-top: 1rem; color: var(--text-muted);">
                    "Already have an account? "
                    <a href="/login" style="color: var(--primary-color);">"Sign in"</a>
                </p>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_non_empty_filters_blank_input() {
        assert_eq!(non_empty("CS".to_string()), Some("CS".to_string()));
        assert_eq!(non_empty(String::new()), None);
        assert_eq!(non_empty("   ".to_string()), None);
    }

    #[wasm_bindgen_test]
    fn test_role_select_values_parse() {
        assert_eq!("student".parse::<Role>().unwrap(), Role::Student);
        assert_eq!("teacher".parse::<Role>().unwrap(), Role::Teacher);
    }
}
