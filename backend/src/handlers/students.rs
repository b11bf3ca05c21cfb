use actix_web::{web, HttpRequest, HttpResponse, Result};
use uuid::Uuid;

use crate::middleware::auth::authenticate;
use crate::models::AppState;
use crate::services::attendance::strip_data_url_header;
use crate::services::students::{self as students_service, StudentsError};
use crate::services::subjects as subjects_service;
use shared::{ApiError, ApiSuccess, RegisterFaceRequest, Role};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/students")
            .route("", web::get().to(list_students))
            .route("/{id}", web::get().to(get_student))
            .route("/{id}/register-face", web::post().to(register_face))
            .route("/{id}/face", web::delete().to(delete_face)),
    );
}

async fn list_students(state: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse> {
    if let Err(e) = authenticate(&state.db, &req, &state.config.jwt_secret).await {
        return Ok(e.to_response());
    }

    match students_service::list_students(&state.db).await {
        Ok(students) => Ok(HttpResponse::Ok().json(ApiSuccess::new(students))),
        Err(e) => {
            log::error!("Error listing students: {:?}", e);
            Ok(HttpResponse::InternalServerError().json(ApiError {
                error: "internal_error".to_string(),
                message: "Failed to list students".to_string(),
            }))
        }
    }
}

async fn get_student(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    if let Err(e) = authenticate(&state.db, &req, &state.config.jwt_secret).await {
        return Ok(e.to_response());
    }

    match students_service::get_student_profile(&state.db, &path.into_inner()).await {
        Ok(profile) => Ok(HttpResponse::Ok().json(ApiSuccess::new(profile))),
        Err(StudentsError::StudentNotFound) => Ok(HttpResponse::NotFound().json(ApiError {
            error: "not_found".to_string(),
            message: "Student not found".to_string(),
        })),
        Err(e) => {
            log::error!("Error fetching student profile: {:?}", e);
            Ok(HttpResponse::InternalServerError().json(ApiError {
                error: "internal_error".to_string(),
                message: "Failed to fetch student profile".to_string(),
            }))
        }
    }
}

async fn register_face(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: web::Json<RegisterFaceRequest>,
) -> Result<HttpResponse> {
    let caller = match authenticate(&state.db, &req, &state.config.jwt_secret).await {
        Ok(user) => user,
        Err(e) => return Ok(e.to_response()),
    };

    let student_id = path.into_inner();
    let student = match students_service::get_student_row(&state.db, &student_id).await {
        Ok(Some(student)) => student,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiError {
                error: "not_found".to_string(),
                message: "Student not found".to_string(),
            }));
        }
        Err(e) => {
            log::error!("Error fetching student: {:?}", e);
            return Ok(HttpResponse::InternalServerError().json(ApiError {
                error: "internal_error".to_string(),
                message: "Failed to fetch student".to_string(),
            }));
        }
    };

    // Students may only register their own face; teachers may register anyone's
    let owns_record = student.user_id == caller.id.to_string();
    if caller.role != Role::Teacher && !owns_record {
        return Ok(HttpResponse::Forbidden().json(ApiError {
            error: "forbidden".to_string(),
            message: "You can only register your own face".to_string(),
        }));
    }

    let image_base64 = strip_data_url_header(&body.image).to_string();

    match state.ml.register_face_base64(&student_id, &image_base64).await {
        Ok(response) if response.success => {
            if let Err(e) =
                subjects_service::set_student_verified(&state.db, &student_id, true).await
            {
                log::error!("Error verifying enrollments: {:?}", e);
                return Ok(HttpResponse::InternalServerError().json(ApiError {
                    error: "internal_error".to_string(),
                    message: "Face registered but enrollment update failed".to_string(),
                }));
            }
            Ok(HttpResponse::Ok().json(ApiSuccess::new(response.message)))
        }
        Ok(response) => Ok(HttpResponse::BadRequest().json(ApiError {
            error: "face_registration_failed".to_string(),
            message: response.message,
        })),
        Err(e) => {
            log::error!("ML service error during face registration: {}", e);
            Ok(HttpResponse::ServiceUnavailable().json(ApiError {
                error: "ml_unavailable".to_string(),
                message: format!("ML service unavailable: {}", e),
            }))
        }
    }
}

async fn delete_face(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let caller = match authenticate(&state.db, &req, &state.config.jwt_secret).await {
        Ok(user) => user,
        Err(e) => return Ok(e.to_response()),
    };

    let student_id = path.into_inner();
    let student = match students_service::get_student_row(&state.db, &student_id).await {
        Ok(Some(student)) => student,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiError {
                error: "not_found".to_string(),
                message: "Student not found".to_string(),
            }));
        }
        Err(e) => {
            log::error!("Error fetching student: {:?}", e);
            return Ok(HttpResponse::InternalServerError().json(ApiError {
                error: "internal_error".to_string(),
                message: "Failed to fetch student".to_string(),
            }));
        }
    };

    let owns_record = student.user_id == caller.id.to_string();
    if caller.role != Role::Teacher && !owns_record {
        return Ok(HttpResponse::Forbidden().json(ApiError {
            error: "forbidden".to_string(),
            message: "You can only remove your own face data".to_string(),
        }));
    }

    match state.ml.delete_embeddings(&student_id).await {
        Ok(()) => {
            if let Err(e) =
                subjects_service::set_student_verified(&state.db, &student_id, false).await
            {
                log::error!("Error unverifying enrollments: {:?}", e);
                return Ok(HttpResponse::InternalServerError().json(ApiError {
                    error: "internal_error".to_string(),
                    message: "Embeddings deleted but enrollment update failed".to_string(),
                }));
            }
            Ok(HttpResponse::Ok().json(ApiSuccess::new(())))
        }
        Err(e) => {
            log::error!("ML service error deleting embeddings: {}", e);
            Ok(HttpResponse::ServiceUnavailable().json(ApiError {
                error: "ml_unavailable".to_string(),
                message: format!("ML service unavailable: {}", e),
            }))
        }
    }
}
