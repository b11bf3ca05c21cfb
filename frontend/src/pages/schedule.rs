use leptos::*;
use shared::{CreateSubjectRequest, Subject};

use crate::api::{ApiClient, AuthState};
use crate::components::loading::Loading;

#[component]
pub fn SchedulePage() -> impl IntoView {
    let auth_state = expect_context::<AuthState>();

    let subjects = create_rw_signal(Vec::<Subject>::new());
    let name = create_rw_signal(String::new());
    let code = create_rw_signal(String::new());
    let loading = create_rw_signal(true);
    let saving = create_rw_signal(false);
    let error = create_rw_signal(Option::<String>::None);

    create_effect(move |_| {
        wasm_bindgen_futures::spawn_local(async move {
            match ApiClient::list_subjects().await {
                Ok(s) => {
                    subjects.set(s);
                    loading.set(false);
                }
                Err(e) => {
                    error.set(Some(e));
                    loading.set(false);
                }
            }
        });
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        saving.set(true);
        error.set(None);

        let request = CreateSubjectRequest {
            name: name.get(),
            code: code.get(),
        };

        wasm_bindgen_futures::spawn_local(async move {
            match ApiClient::create_subject(request).await {
                Ok(subject) => {
                    subjects.update(|list| list.push(subject));
                    name.set(String::new());
                    code.set(String::new());
                    saving.set(false);
                }
                Err(e) => {
                    error.set(Some(e));
                    saving.set(false);
                }
            }
        });
    };

    let can_manage = move || {
        auth_state
            .user
            .get()
            .map(|user| user.role.can_manage_subjects())
            .unwrap_or(false)
    };

    view! {
        <div class="dashboard-header">
            <h1 class="dashboard-title">"Schedule"</h1>
        </div>

        {move || error.get().map(|e| view! {
            <div class="alert alert-error">{e}</div>
        })}

        <Show when=move || loading.get() fallback=|| ()>
            <Loading />
        </Show>

        <Show when=move || !loading.get() fallback=|| ()>
            {move || {
                let list = subjects.get();
                if list.is_empty() {
                    view! {
                        <div class="card empty-state">
                            <p>"No subjects scheduled yet."</p>
                        </div>
                    }.into_view()
                } else {
                    view! {
                        <div class="card">
                            {list.into_iter().map(|subject| {
                                view! {
                                    <div class="subject-row">
                                        <span>{subject.name}</span>
                                        <span class="subject-code">{subject.code}</span>
                                    </div>
                                }
                            }).collect_view()}
                        </div>
                    }.into_view()
                }
            }}
        </Show>

        <Show when=can_manage fallback=|| ()>
            <div class="card">
                <h3 class="card-title">"Add Subject"</h3>
                <form on:submit=on_submit>
                    <div class="form-group">
                        <label class="form-label" for="subject-name">"Name"</label>
                        <input
                            type="text"
                            id="subject-name"
                            class="form-input"
                            placeholder="e.g. Operating Systems"
                            prop:value=move || name.get()
                            on:input=move |ev| name.set(event_target_value(&ev))
                            required
                        />
                    </div>
                    <div class="form-group">
                        <label class="form-label" for="subject-code">"Code"</label>
                        <input
                            type="text"
                            id="subject-code"
                            class="form-input"
                            placeholder="e.g. CS301"
                            prop:value=move || code.get()
                            on:input=move |ev| code.set(event_target_value(&ev))
                            required
                        />
                    </div>
                    <button
                        type="submit"
                        class="btn btn-primary"
                        disabled=move || saving.get()
                    >
                        {move || if saving.get() { "Adding..." } else { "Add Subject" }}
                    </button>
                </form>
            </div>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use shared::Role;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_only_teachers_manage_subjects() {
        assert!(Role::Teacher.can_manage_subjects());
        assert!(!Role::Student.can_manage_subjects());
    }
}
