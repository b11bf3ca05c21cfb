use leptos::*;
use leptos_router::*;
use shared::{UpdateSettingsRequest, UserSettings};

use crate::api::{ApiClient, AuthState};
use crate::app::{Theme, ThemeContext};

#[component]
pub fn SettingsPage() -> impl IntoView {
    let auth_state = expect_context::<AuthState>();
    let theme_ctx = expect_context::<ThemeContext>();
    let navigate = use_navigate();

    let settings = create_rw_signal(Option::<UserSettings>::None);
    let error = create_rw_signal(Option::<String>::None);
    let saved = create_rw_signal(false);

    create_effect(move |_| {
        wasm_bindgen_futures::spawn_local(async move {
            match ApiClient::get_settings().await {
                Ok(s) => settings.set(Some(s)),
                Err(e) => error.set(Some(e)),
            }
        });
    });

    let on_toggle_theme = move |_| {
        let next = theme_ctx.theme.get().toggled();
        theme_ctx.set(next);

        let request = UpdateSettingsRequest {
            theme: Some(next.as_str().to_string()),
            email_low_attendance: None,
        };
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = ApiClient::update_settings(request).await {
                error.set(Some(e));
            }
        });
    };

    let on_toggle_alerts = move |ev: web_sys::Event| {
        let enabled = event_target_checked(&ev);
        saved.set(false);

        let request = UpdateSettingsRequest {
            theme: None,
            email_low_attendance: Some(enabled),
        };
        wasm_bindgen_futures::spawn_local(async move {
            match ApiClient::update_settings(request).await {
                Ok(s) => {
                    settings.set(Some(s));
                    saved.set(true);
                }
                Err(e) => error.set(Some(e)),
            }
        });
    };

    let auth_for_logout = auth_state.clone();
    let on_logout = move |_| {
        auth_for_logout.logout();
        navigate("/login", Default::default());
    };

    view! {
        <div class="dashboard-header">
            <h1 class="dashboard-title">"Settings"</h1>
        </div>

        {move || error.get().map(|e| view! {
            <div class="alert alert-error">{e}</div>
        })}
        <Show when=move || saved.get() fallback=|| ()>
            <div class="alert alert-success">"Settings saved"</div>
        </Show>

        <div class="card">
            <h3 class="card-title">"Account Information"</h3>
            {move || {
                auth_state.user.get().map(|user| view! {
                    <div style="margin-top: 1rem;">
                        <div class="form-group">
                            <label class="form-label">"Name"</label>
                            <p>{user.name}</p>
                        </div>
                        <div class="form-group">
                            <label class="form-label">"Email"</label>
                            <p>{user.email}</p>
                        </div>
                        <div class="form-group">
                            <label class="form-label">"Role"</label>
                            <p>{user.role.as_str()}</p>
                        </div>
                    </div>
                })
            }}
        </div>

        <div class="card">
            <h3 class="card-title">"Appearance"</h3>
            <div class="form-group" style="margin-top: 1rem;">
                <label class="form-label">"Theme"</label>
                <button type="button" class="btn btn-outline" on:click=on_toggle_theme>
                    {move || match theme_ctx.theme.get() {
                        Theme::Light => "Switch to dark mode",
                        Theme::Dark => "Switch to light mode",
                    }}
                </button>
            </div>
        </div>

        <div class="card">
            <h3 class="card-title">"Notifications"</h3>
            <div class="form-group" style="margin-top: 1rem;">
                <label class="form-label">
                    <input
                        type="checkbox"
                        prop:checked=move || {
                            settings.get().map(|s| s.email_low_attendance).unwrap_or(false)
                        }
                        on:change=on_toggle_alerts
                    />
                    " Email me monthly low-attendance alerts"
                </label>
            </div>
        </div>

        <div class="card">
            <button type="button" class="btn btn-outline" on:click=on_logout>
                "Log out"
            </button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use crate::app::Theme;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_theme_button_labels() {
        let label = |theme: Theme| match theme {
            Theme::Light => "Switch to dark mode",
            Theme::Dark => "Switch to light mode",
        };
        assert_eq!(label(Theme::Light), "Switch to dark mode");
        assert_eq!(label(Theme::Dark), "Switch to light mode");
    }
}
