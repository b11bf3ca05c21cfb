use actix_web::{web, HttpRequest, HttpResponse, Result};
use serde::Deserialize;

use crate::middleware::auth::{authenticate, require_role};
use crate::models::AppState;
use crate::services::attendance::{self as attendance_service, AttendanceError};
use shared::{ApiError, ApiSuccess, ConfirmAttendanceRequest, MarkAttendanceRequest, Role};

const DEFAULT_RECENT_LIMIT: i64 = 50;
const MAX_RECENT_LIMIT: i64 = 500;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/attendance")
            .route("/mark", web::post().to(mark))
            .route("/confirm", web::post().to(confirm))
            .route("/recent", web::get().to(recent)),
    );
}

async fn mark(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<MarkAttendanceRequest>,
) -> Result<HttpResponse> {
    let caller = match authenticate(&state.db, &req, &state.config.jwt_secret).await {
        Ok(user) => user,
        Err(e) => return Ok(e.to_response()),
    };
    if let Err(e) = require_role(&caller, Role::Teacher) {
        return Ok(e.to_response());
    }

    let request = body.into_inner();

    if request.image.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiError {
            error: "validation_error".to_string(),
            message: "An image is required".to_string(),
        }));
    }

    match attendance_service::mark_attendance(&state.db, &state.ml, &request.subject_id, &request.image)
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiSuccess::new(response))),
        Err(AttendanceError::SubjectNotFound) => Ok(HttpResponse::NotFound().json(ApiError {
            error: "not_found".to_string(),
            message: "Subject not found".to_string(),
        })),
        Err(AttendanceError::InvalidImage) => Ok(HttpResponse::BadRequest().json(ApiError {
            error: "invalid_image".to_string(),
            message: "Image payload is not valid base64".to_string(),
        })),
        Err(AttendanceError::MlService(e)) => {
            log::error!("ML service error during recognition: {}", e);
            Ok(HttpResponse::ServiceUnavailable().json(ApiError {
                error: "ml_unavailable".to_string(),
                message: format!("ML service unavailable: {}", e),
            }))
        }
        Err(e) => {
            log::error!("Error marking attendance: {:?}", e);
            Ok(HttpResponse::InternalServerError().json(ApiError {
                error: "internal_error".to_string(),
                message: "Failed to mark attendance".to_string(),
            }))
        }
    }
}

async fn confirm(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<ConfirmAttendanceRequest>,
) -> Result<HttpResponse> {
    let caller = match authenticate(&state.db, &req, &state.config.jwt_secret).await {
        Ok(user) => user,
        Err(e) => return Ok(e.to_response()),
    };
    if let Err(e) = require_role(&caller, Role::Teacher) {
        return Ok(e.to_response());
    }

    match attendance_service::confirm_attendance(&state.db, &body.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiSuccess::new(response))),
        Err(AttendanceError::SubjectNotFound) => Ok(HttpResponse::NotFound().json(ApiError {
            error: "not_found".to_string(),
            message: "Subject not found".to_string(),
        })),
        Err(e) => {
            log::error!("Error confirming attendance: {:?}", e);
            Ok(HttpResponse::InternalServerError().json(ApiError {
                error: "internal_error".to_string(),
                message: "Failed to confirm attendance".to_string(),
            }))
        }
    }
}

#[derive(Debug, Deserialize)]
struct RecentQuery {
    limit: Option<i64>,
}

async fn recent(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<RecentQuery>,
) -> Result<HttpResponse> {
    if let Err(e) = authenticate(&state.db, &req, &state.config.jwt_secret).await {
        return Ok(e.to_response());
    }

    let limit = query
        .limit
        .unwrap_or(DEFAULT_RECENT_LIMIT)
        .clamp(1, MAX_RECENT_LIMIT);

    match attendance_service::recent_entries(&state.db, limit).await {
        Ok(entries) => Ok(HttpResponse::Ok().json(ApiSuccess::new(entries))),
        Err(e) => {
            log::error!("Error fetching attendance log: {:?}", e);
            Ok(HttpResponse::InternalServerError().json(ApiError {
                error: "internal_error".to_string(),
                message: "Failed to fetch attendance log".to_string(),
            }))
        }
    }
}
