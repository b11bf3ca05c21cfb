use actix_web::{web, HttpRequest, HttpResponse, Result};
use uuid::Uuid;

use crate::middleware::auth::{authenticate, require_role};
use crate::models::AppState;
use crate::services::subjects::{self as subjects_service, SubjectsError};
use shared::{ApiError, ApiSuccess, CreateSubjectRequest, Role};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/subjects")
            .route("", web::get().to(list_subjects))
            .route("", web::post().to(create_subject))
            .route("/{id}/enroll", web::post().to(enroll)),
    );
}

async fn list_subjects(state: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse> {
    if let Err(e) = authenticate(&state.db, &req, &state.config.jwt_secret).await {
        return Ok(e.to_response());
    }

    match subjects_service::list_subjects(&state.db).await {
        Ok(subjects) => Ok(HttpResponse::Ok().json(ApiSuccess::new(subjects))),
        Err(e) => {
            log::error!("Error listing subjects: {:?}", e);
            Ok(HttpResponse::InternalServerError().json(ApiError {
                error: "internal_error".to_string(),
                message: "Failed to list subjects".to_string(),
            }))
        }
    }
}

async fn create_subject(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<CreateSubjectRequest>,
) -> Result<HttpResponse> {
    let caller = match authenticate(&state.db, &req, &state.config.jwt_secret).await {
        Ok(user) => user,
        Err(e) => return Ok(e.to_response()),
    };
    if let Err(e) = require_role(&caller, Role::Teacher) {
        return Ok(e.to_response());
    }

    let request = body.into_inner();

    if request.name.trim().is_empty() || request.code.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiError {
            error: "validation_error".to_string(),
            message: "Name and code are required".to_string(),
        }));
    }

    match subjects_service::create_subject(&state.db, &caller.id, &request).await {
        Ok(subject) => Ok(HttpResponse::Created().json(ApiSuccess::new(subject))),
        Err(SubjectsError::CodeAlreadyExists) => Ok(HttpResponse::BadRequest().json(ApiError {
            error: "duplicate_code".to_string(),
            message: "Subject code already exists".to_string(),
        })),
        Err(e) => {
            log::error!("Error creating subject: {:?}", e);
            Ok(HttpResponse::InternalServerError().json(ApiError {
                error: "internal_error".to_string(),
                message: "Failed to create subject".to_string(),
            }))
        }
    }
}

async fn enroll(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let caller = match authenticate(&state.db, &req, &state.config.jwt_secret).await {
        Ok(user) => user,
        Err(e) => return Ok(e.to_response()),
    };

    match subjects_service::enroll_student(&state.db, &path.into_inner(), &caller.id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiSuccess::new(()))),
        Err(SubjectsError::SubjectNotFound) => Ok(HttpResponse::NotFound().json(ApiError {
            error: "not_found".to_string(),
            message: "Subject not found".to_string(),
        })),
        Err(SubjectsError::StudentNotFound) => Ok(HttpResponse::BadRequest().json(ApiError {
            error: "not_a_student".to_string(),
            message: "Only students can enroll in subjects".to_string(),
        })),
        Err(e) => {
            log::error!("Error enrolling student: {:?}", e);
            Ok(HttpResponse::InternalServerError().json(ApiError {
                error: "internal_error".to_string(),
                message: "Failed to enroll in subject".to_string(),
            }))
        }
    }
}
