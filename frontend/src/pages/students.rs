use leptos::*;
use shared::{StudentProfile, StudentSummary};
use uuid::Uuid;

use crate::api::ApiClient;
use crate::components::loading::Loading;

const LOW_ATTENDANCE_THRESHOLD: f64 = 75.0;

fn is_low_attendance(percentage: f64) -> bool {
    percentage < LOW_ATTENDANCE_THRESHOLD
}

#[component]
pub fn StudentsPage() -> impl IntoView {
    let students = create_rw_signal(Vec::<StudentSummary>::new());
    let profile = create_rw_signal(Option::<StudentProfile>::None);
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

    let load_profile = move |id: Uuid| {
        wasm_bindgen_futures::spawn_local(async move {
            match ApiClient::get_student_profile(&id).await {
                Ok(p) => profile.set(Some(p)),
                Err(e) => error.set(Some(e)),
            }
        });
    };

    view! {
        <div class="dashboard-header">
            <h1 class="dashboard-title">"Students"</h1>
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
                if list.is_empty() {
                    view! {
                        <div class="card empty-state">
                            <p>"No students registered yet."</p>
                        </div>
                    }.into_view()
                } else {
                    view! {
                        <div class="card">
                            {list.into_iter().map(|student| {
                                let id = student.id;
                                let low = is_low_attendance(student.percentage);
                                view! {
                                    <div
                                        class="student-row"
                                        on:click=move |_| load_profile(id)
                                    >
                                        <span class="student-roll">{student.roll}</span>
                                        <span class="student-name">{student.name}</span>
                                        <span class="student-percentage">
                                            {format!("{:.1}%", student.percentage)}
                                        </span>
                                        <Show when=move || low fallback=|| ()>
                                            <span class="badge badge-warning">"Low"</span>
                                        </Show>
                                    </div>
                                }
                            }).collect_view()}
                        </div>
                    }.into_view()
                }
            }}
        </Show>

        {move || profile.get().map(|p| {
            view! {
                <div class="card">
                    <h3 class="card-title">{p.name.clone()}</h3>
                    <div class="profile-meta">
                        <span>{format!("Roll: {}", p.roll)}</span>
                        {p.branch.clone().map(|b| view! { <span>{format!("Branch: {}", b)}</span> })}
                        {p.year.map(|y| view! { <span>{format!("Year: {}", y)}</span> })}
                        <span>{p.email.clone()}</span>
                    </div>

                    <p class="profile-summary-line">
                        {format!(
                            "{} of {} classes attended ({:.1}%)",
                            p.attendance.present, p.attendance.total_classes, p.attendance.percentage
                        )}
                    </p>

                    <h4>"By subject"</h4>
                    {p.subjects.iter().map(|subject| {
                        view! {
                            <div class="subject-row">
                                <span>{format!("{} ({})", subject.name, subject.code)}</span>
                                <span>{format!("{:.1}%", subject.attendance.percentage)}</span>
                            </div>
                        }
                    }).collect_view()}

                    <h4>"Recent"</h4>
                    {p.recent_attendance.iter().map(|record| {
                        let status = if record.present { "present" } else { "absent" };
                        view! {
                            <div class="subject-row">
                                <span>{record.date.to_string()}</span>
                                <span>{status}</span>
                            </div>
                        }
                    }).collect_view()}
                </div>
            }
        })}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_low_attendance_threshold() {
        assert!(is_low_attendance(74.9));
        assert!(is_low_attendance(0.0));
        assert!(!is_low_attendance(75.0));
        assert!(!is_low_attendance(100.0));
    }

    #[wasm_bindgen_test]
    fn test_percentage_display() {
        assert_eq!(format!("{:.1}%", 71.25), "71.2%");
    }
}
