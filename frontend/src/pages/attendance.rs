use leptos::*;
use shared::{
    ConfirmAttendanceRequest, DetectedFace, MarkAttendanceRequest, MatchStatus, Subject,
};
use uuid::Uuid;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::api::ApiClient;
use crate::components::icons;
use crate::components::loading::Loading;

fn status_class(status: MatchStatus) -> &'static str {
    match status {
        MatchStatus::Confident => "badge badge-success",
        MatchStatus::Uncertain => "badge badge-warning",
        MatchStatus::Unknown => "badge",
    }
}

/// Confident matches start out ticked; anything weaker needs the teacher's
/// explicit confirmation.
fn default_present(status: MatchStatus) -> bool {
    status == MatchStatus::Confident
}

#[component]
pub fn AttendancePage() -> impl IntoView {
    let subjects = create_rw_signal(Vec::<Subject>::new());
    let subject_id = create_rw_signal(Option::<Uuid>::None);
    let image = create_rw_signal(Option::<String>::None);
    let faces = create_rw_signal(Vec::<(DetectedFace, RwSignal<bool>)>::new());
    let recognizing = create_rw_signal(false);
    let confirming = create_rw_signal(false);
    let error = create_rw_signal(Option::<String>::None);
    let notice = create_rw_signal(Option::<String>::None);

    create_effect(move |_| {
        wasm_bindgen_futures::spawn_local(async move {
            match ApiClient::list_subjects().await {
                Ok(s) => subjects.set(s),
                Err(e) => error.set(Some(e)),
            }
        });
    });

    let on_file_change = move |ev: web_sys::Event| {
        let input = event_target::<web_sys::HtmlInputElement>(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        let Ok(reader) = web_sys::FileReader::new() else {
            error.set(Some("Could not read the selected image".to_string()));
            return;
        };

        let reader_for_result = reader.clone();
        let onloadend = Closure::<dyn FnMut(web_sys::ProgressEvent)>::new(move |_| {
            if let Ok(value) = reader_for_result.result() {
                if let Some(data_url) = value.as_string() {
                    image.set(Some(data_url));
                    faces.set(Vec::new());
                    notice.set(None);
                }
            }
        });
        reader.set_onloadend(Some(onloadend.as_ref().unchecked_ref()));
        // The closure must outlive the async read.
        onloadend.forget();

        if reader.read_as_data_url(&file).is_err() {
            error.set(Some("Could not read the selected image".to_string()));
        }
    };

    let on_recognize = move |_| {
        let (Some(id), Some(data_url)) = (subject_id.get(), image.get()) else {
            error.set(Some("Pick a subject and capture a photo first".to_string()));
            return;
        };

        recognizing.set(true);
        error.set(None);
        notice.set(None);

        let request = MarkAttendanceRequest {
            image: data_url,
            subject_id: id,
        };

        wasm_bindgen_futures::spawn_local(async move {
            match ApiClient::mark_attendance(request).await {
                Ok(response) => {
                    if response.count == 0 {
                        notice.set(Some("No faces recognized in this photo".to_string()));
                    }
                    faces.set(
                        response
                            .faces
                            .into_iter()
                            .map(|face| {
                                let present = create_rw_signal(default_present(face.status));
                                (face, present)
                            })
                            .collect(),
                    );
                    recognizing.set(false);
                }
                Err(e) => {
                    error.set(Some(e));
                    recognizing.set(false);
                }
            }
        });
    };

    let on_confirm = move |_| {
        let Some(id) = subject_id.get() else {
            return;
        };

        let mut present_students = Vec::new();
        let mut absent_students = Vec::new();
        for (face, present) in faces.get() {
            if let Some(student) = face.student {
                if present.get() {
                    present_students.push(student.id);
                } else {
                    absent_students.push(student.id);
                }
            }
        }

        confirming.set(true);
        error.set(None);

        let request = ConfirmAttendanceRequest {
            subject_id: id,
            present_students,
            absent_students,
        };

        wasm_bindgen_futures::spawn_local(async move {
            match ApiClient::confirm_attendance(request).await {
                Ok(response) => {
                    notice.set(Some(format!(
                        "Attendance saved: {} present, {} absent",
                        response.present_updated, response.absent_updated
                    )));
                    faces.set(Vec::new());
                    image.set(None);
                    confirming.set(false);
                }
                Err(e) => {
                    error.set(Some(e));
                    confirming.set(false);
                }
            }
        });
    };

    view! {
        <div class="dashboard-header">
            <h1 class="dashboard-title">"Mark Attendance"</h1>
        </div>

        {move || error.get().map(|e| view! {
            <div class="alert alert-error">{e}</div>
        })}
        {move || notice.get().map(|n| view! {
            <div class="alert alert-success">{n}</div>
        })}

        <div class="card">
            <div class="form-group">
                <label class="form-label" for="subject">"Subject"</label>
                <select
                    id="subject"
                    class="form-input"
                    on:change=move |ev| {
                        subject_id.set(Uuid::parse_str(&event_target_value(&ev)).ok());
                    }
                >
                    <option value="">"Select a subject"</option>
                    {move || subjects.get().into_iter().map(|subject| {
                        view! {
                            <option value=subject.id.to_string()>
                                {format!("{} ({})", subject.name, subject.code)}
                            </option>
                        }
                    }).collect_view()}
                </select>
            </div>

            <div class="form-group">
                <label class="form-label" for="photo">
                    {icons::camera()}
                    " Classroom photo"
                </label>
                <input
                    type="file"
                    id="photo"
                    class="form-input"
                    accept="image/*"
                    capture="environment"
                    on:change=on_file_change
                />
            </div>

            {move || image.get().map(|data_url| view! {
                <img class="capture-preview" src=data_url alt="Captured classroom photo" />
            })}

            <button
                type="button"
                class="btn btn-primary"
                disabled=move || recognizing.get()
                on:click=on_recognize
            >
                {move || if recognizing.get() { "Recognizing..." } else { "Recognize Faces" }}
            </button>
        </div>

        <Show when=move || recognizing.get() fallback=|| ()>
            <Loading />
        </Show>

        <Show when=move || !faces.get().is_empty() fallback=|| ()>
            <div class="card">
                <h3 class="card-title">"Recognized Students"</h3>
                {move || faces.get().into_iter().map(|(face, present)| {
                    let label = face
                        .student
                        .as_ref()
                        .map(|s| format!("{} ({})", s.name, s.roll))
                        .unwrap_or_else(|| "Unknown face".to_string());
                    let has_student = face.student.is_some();

                    view! {
                        <div class="face-row">
                            <span class=status_class(face.status)>
                                {face.status.as_str()}
                            </span>
                            <span class="face-name">{label}</span>
                            <Show when=move || has_student fallback=|| ()>
                                <label class="face-present">
                                    <input
                                        type="checkbox"
                                        prop:checked=move || present.get()
                                        on:change=move |ev| {
                                            present.set(event_target_checked(&ev));
                                        }
                                    />
                                    " Present"
                                </label>
                            </Show>
                        </div>
                    }
                }).collect_view()}

                <button
                    type="button"
                    class="btn btn-primary"
                    style="margin-top: 1rem;"
                    disabled=move || confirming.get()
                    on:click=on_confirm
                >
                    {move || if confirming.get() { "Saving..." } else { "Confirm Attendance" }}
                </button>
            </div>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_status_badge_classes() {
        assert_eq!(status_class(MatchStatus::Confident), "badge badge-success");
        assert_eq!(status_class(MatchStatus::Uncertain), "badge badge-warning");
        assert_eq!(status_class(MatchStatus::Unknown), "badge");
    }

    #[wasm_bindgen_test]
    fn test_only_confident_matches_default_to_present() {
        assert!(default_present(MatchStatus::Confident));
        assert!(!default_present(MatchStatus::Uncertain));
        assert!(!default_present(MatchStatus::Unknown));
    }
}
