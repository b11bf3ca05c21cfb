use leptos::*;
use leptos_router::*;
use shared::LoginRequest;

use crate::api::{ApiClient, AuthState};

#[component]
pub fn Login() -> impl IntoView {
    let auth_state = expect_context::<AuthState>();
    let navigate = use_navigate();

    let email = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let error = create_rw_signal(Option::<String>::None);
    let loading = create_rw_signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let nav = navigate.clone();
        let auth = auth_state.clone();

        loading.set(true);
        error.set(None);

        let request = LoginRequest {
            email: email.get(),
            password: password.get(),
        };

        wasm_bindgen_futures::spawn_local(async move {
            match ApiClient::login(request).await {
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
                    <h1 class="auth-title">"Smart Attendance"</h1>
                    <p class="auth-subtitle">"Sign in to your account"</p>
                </div>

                {move || error.get().map(|e| view! {
                    <div class="alert alert-error">{e}</div>
                })}

                <form on:submit=on_submit>
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
                            placeholder="Enter your password"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                            required
                        />
                    </div>

                    <button
                        type="submit"
                        class="btn btn-primary"
                        style="width: 100%; margin-top: 1rem;"
                        disabled=move || loading.get()
                    >
                        {move || if loading.get() { "Signing in..." } else { "Sign In" }}
                    </button>
                </form>

                <p style="text-align: center; margin-top: 1rem; color: var(--text-muted);">
                    "Don't have an account? "
                    <a href="/register" style="color: var(--primary-color);">"Sign up"</a>
                </p>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_button_text_states() {
        let text = |loading: bool| if loading { "Signing in..." } else { "Sign In" };
        assert_eq!(text(false), "Sign In");
        assert_eq!(text(true), "Signing in...");
    }

    #[wasm_bindgen_test]
    fn test_css_classes() {
        assert_eq!("auth-container", "auth-container");
        assert_eq!("auth-card card", "auth-card card");
        assert_eq!("alert alert-error", "alert alert-error");
    }
}
