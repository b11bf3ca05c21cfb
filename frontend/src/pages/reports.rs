use leptos::*;
use shared::AttendanceLogEntry;

use crate::api::ApiClient;
use crate::components::loading::Loading;

const REPORT_LIMIT: usize = 50;

fn presence_label(present: bool) -> &'static str {
    if present {
        "Present"
    } else {
        "Absent"
    }
}

#[component]
pub fn ReportsPage() -> impl IntoView {
    let entries = create_rw_signal(Vec::<AttendanceLogEntry>::new());
    let loading = create_rw_signal(true);
    let error = create_rw_signal(Option::<String>::None);

    create_effect(move |_| {
        wasm_bindgen_futures::spawn_local(async move {
            match ApiClient::recent_attendance(REPORT_LIMIT).await {
                Ok(e) => {
                    entries.set(e);
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
            <h1 class="dashboard-title">"Reports"</h1>
        </div>

        {move || error.get().map(|e| view! {
            <div class="alert alert-error">{e}</div>
        })}

        <Show when=move || loading.get() fallback=|| ()>
            <Loading />
        </Show>

        <Show when=move || !loading.get() fallback=|| ()>
            {move || {
                let list = entries.get();
                if list.is_empty() {
                    view! {
                        <div class="card empty-state">
                            <p>"No attendance has been recorded yet."</p>
                        </div>
                    }.into_view()
                } else {
                    view! {
                        <div class="card">
                            {list.into_iter().map(|entry| {
                                let status_class = if entry.present {
                                    "badge badge-success"
                                } else {
                                    "badge badge-warning"
                                };
                                view! {
                                    <div class="report-row">
                                        <span class="report-date">{entry.date.to_string()}</span>
                                        <span class="report-subject">{entry.subject_name}</span>
                                        <span class="report-student">
                                            {format!("{} ({})", entry.student_name, entry.roll)}
                                        </span>
                                        <span class=status_class>
                                            {presence_label(entry.present)}
                                        </span>
                                    </div>
                                }
                            }).collect_view()}
                        </div>
                    }.into_view()
                }
            }}
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_presence_labels() {
        assert_eq!(presence_label(true), "Present");
        assert_eq!(presence_label(false), "Absent");
    }
}
