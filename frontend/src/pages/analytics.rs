use leptos::*;
use shared::StudentSummary;

use crate::api::ApiClient;
use crate::components::card::StatCard;
use crate::components::loading::Loading;

/// Roster split into attendance bands: (healthy, at-risk, low).
fn attendance_bands(students: &[StudentSummary]) -> (usize, usize, usize) {
    let mut healthy = 0;
    let mut at_risk = 0;
    let mut low = 0;
    for student in students {
        if student.percentage >= 90.0 {
            healthy += 1;
        } else if student.percentage >= 75.0 {
            at_risk += 1;
        } else {
            low += 1;
        }
    }
    (healthy, at_risk, low)
}

fn average_percentage(students: &[StudentSummary]) -> f64 {
    if students.is_empty() {
        return 0.0;
    }
    let total: f64 = students.iter().map(|s| s.percentage).sum();
    total / students.len() as f64
}

#[component]
pub fn AnalyticsPage() -> impl IntoView {
    let students = create_rw_signal(Vec::<StudentSummary>::new());
    let loading = create_rw_signal(true);
    let error = create_rw_signal(Option::<String>::None);

    create_effect(move |_| {
        wasm_bindgen_futures::spawn_local(async move {
            match ApiClient::list_students().await {
                Ok(s) => {
                    students.set(s);
                    loading.set(false);
                }
                Err(e) => {
                    error.set(Some(e));
                    loading.set(false);
                }
            }
        });
    });

    view! {
        <div class="dashboard-header">
            <h1 class="dashboard-title">"Analytics"</h1>
        </div>

        {move || error.get().map(|e| view! {
            <div class="alert alert-error">{e}</div>
        })}

        <Show when=move || loading.get() fallback=|| ()>
            <Loading />
        </Show>

        <Show when=move || !loading.get() fallback=|| ()>
            {move || {
                let list = students.get();
                let (healthy, at_risk, low) = attendance_bands(&list);
                let average = average_percentage(&list);
                view! {
                    <div class="stat-grid">
                        <StatCard label="Class Average" value=format!("{:.1}%", average) />
                        <StatCard label="90% and above" value=healthy.to_string() />
                        <StatCard label="75% to 90%" value=at_risk.to_string() />
                        <StatCard label="Below 75%" value=low.to_string() />
                    </div>
                }
            }}
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::StudentSummary;
    use uuid::Uuid;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn student(percentage: f64) -> StudentSummary {
        StudentSummary {
            id: Uuid::new_v4(),
            roll: "2101".to_string(),
            name: "Test Student".to_string(),
            percentage,
        }
    }

    #[wasm_bindgen_test]
    fn test_attendance_bands() {
        let students = vec![student(95.0), student(90.0), student(80.0), student(40.0)];
        assert_eq!(attendance_bands(&students), (2, 1, 1));
    }

    #[wasm_bindgen_test]
    fn test_attendance_bands_empty() {
        assert_eq!(attendance_bands(&[]), (0, 0, 0));
    }

    #[wasm_bindgen_test]
    fn test_average_percentage() {
        let students = vec![student(100.0), student(50.0)];
        assert_eq!(average_percentage(&students), 75.0);
        assert_eq!(average_percentage(&[]), 0.0);
    }
}
