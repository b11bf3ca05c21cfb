use leptos::*;
use shared::DashboardStats;

use crate::api::{ApiClient, AuthState};
use crate::components::card::StatCard;
use crate::components::loading::Loading;

#[component]
pub fn Dashboard() -> impl IntoView {
    let auth_state = expect_context::<AuthState>();

    let stats = create_rw_signal(Option::<DashboardStats>::None);
    let loading = create_rw_signal(true);
    let error = create_rw_signal(Option::<String>::None);

    create_effect(move |_| {
        wasm_bindgen_futures::spawn_local(async move {
            match ApiClient::get_dashboard_stats().await {
                Ok(s) => {
                    stats.set(Some(s));
                    loading.set(false);
                }
                Err(e) => {
                    error.set(Some(e));
                    loading.set(false);
                }
            }
        });
    });

    let greeting = move || {
        auth_state
            .user
            .get()
            .map(|user| format!("Welcome back, {}", user.name))
            .unwrap_or_else(|| "Welcome".to_string())
    };

    view! {
        <div class="dashboard-header">
            <h1 class="dashboard-title">{greeting}</h1>
        </div>

        {move || error.get().map(|e| view! {
            <div class="alert alert-error">{e}</div>
        })}

        <Show when=move || loading.get() fallback=|| ()>
            <Loading />
        </Show>

        {move || stats.get().map(|s| view! {
            <div class="stat-grid">
                <StatCard label="Students" value=s.student_count.to_string() />
                <StatCard label="Subjects" value=s.subject_count.to_string() />
                <StatCard label="Marked Today" value=s.marked_today.to_string() />
                <StatCard
                    label="Average Attendance"
                    value=format!("{:.1}%", s.average_attendance)
                />
            </div>
        })}
    }
}

#[cfg(test)]
mod tests {
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_average_attendance_formatting() {
        assert_eq!(format!("{:.1}%", 72.456), "72.5%");
        assert_eq!(format!("{:.1}%", 0.0), "0.0%");
    }

    #[wasm_bindgen_test]
    fn test_greeting_fallback() {
        let user: Option<&str> = None;
        let greeting = user
            .map(|name| format!("Welcome back, {}", name))
            .unwrap_or_else(|| "Welcome".to_string());
        assert_eq!(greeting, "Welcome");
    }
}
