use gloo_storage::{LocalStorage, Storage};
use leptos::*;
use leptos_router::*;

use crate::api::AuthState;
use crate::components::header::Header;
use crate::pages::{
    analytics::AnalyticsPage, attendance::AttendancePage, dashboard::Dashboard, login::Login,
    register::Register, reports::ReportsPage, schedule::SchedulePage, settings::SettingsPage,
    students::StudentsPage,
};

const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(&self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Anything unrecognized in storage falls back to light.
    pub fn from_stored(value: &str) -> Theme {
        match value {
            "dark" => Theme::Dark,
            _ => Theme::Light,
        }
    }
}

/// Theme state shared by the chrome and the settings page, persisted to
/// localStorage and mirrored onto `<html data-theme>` for the stylesheet.
#[derive(Clone, Copy)]
pub struct ThemeContext {
    pub theme: RwSignal<Theme>,
}

impl ThemeContext {
    pub fn new() -> Self {
        let stored: Option<String> = LocalStorage::get(THEME_KEY).ok();
        let theme = stored
            .as_deref()
            .map(Theme::from_stored)
            .unwrap_or_default();

        Self {
            theme: create_rw_signal(theme),
        }
    }

    pub fn set(&self, theme: Theme) {
        LocalStorage::set(THEME_KEY, &theme.as_str()).ok();
        self.theme.set(theme);
    }
}

impl Default for ThemeContext {
    fn default() -> Self {
        Self::new()
    }
}

#[component]
pub fn App() -> impl IntoView {
    let auth_state = AuthState::new();
    provide_context(auth_state.clone());

    let theme_ctx = ThemeContext::new();
    provide_context(theme_ctx);

    create_effect(move |_| {
        let theme = theme_ctx.theme.get();
        if let Some(root) = document().document_element() {
            let _ = root.set_attribute("data-theme", theme.as_str());
        }
    });

    view! {
        <Router>
            <main>
                <Routes>
                    <Route path="/login" view=Login />
                    <Route path="/register" view=Register />
                    <Route path="/" view=AppLayout>
                        <Route path="" view=Dashboard />
                        <Route path="/dashboard" view=Dashboard />
                        <Route path="/attendance" view=AttendancePage />
                        <Route path="/students" view=StudentsPage />
                        <Route path="/analytics" view=AnalyticsPage />
                        <Route path="/reports" view=ReportsPage />
                        <Route path="/manage-schedule" view=SchedulePage />
                        <Route path="/settings" view=SettingsPage />
                    </Route>
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn AppLayout() -> impl IntoView {
    let auth_state = expect_context::<AuthState>();
    let theme_ctx = expect_context::<ThemeContext>();
    let set_theme = Callback::new(move |theme| theme_ctx.set(theme));

    view! {
        <Show
            when=move || auth_state.is_authenticated()
            fallback=|| view! { <RedirectToLogin /> }
        >
            <Header theme=theme_ctx.theme set_theme=set_theme />
            <div class="container">
                <Outlet />
            </div>
        </Show>
    }
}

#[component]
fn RedirectToLogin() -> impl IntoView {
    let navigate = use_navigate();
    navigate("/login", Default::default());
    view! {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_theme_round_trip() {
        assert_eq!(Theme::Light.as_str(), "light");
        assert_eq!(Theme::Dark.as_str(), "dark");
        assert_eq!(Theme::from_stored("dark"), Theme::Dark);
        assert_eq!(Theme::from_stored("light"), Theme::Light);
    }

    #[wasm_bindgen_test]
    fn test_theme_unknown_value_falls_back_to_light() {
        assert_eq!(Theme::from_stored("solarized"), Theme::Light);
        assert_eq!(Theme::from_stored(""), Theme::Light);
    }

    #[wasm_bindgen_test]
    fn test_theme_toggle() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
    }
}
