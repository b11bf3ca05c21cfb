use actix_web::{web, HttpRequest, HttpResponse, Result};

use crate::middleware::auth::authenticate;
use crate::models::AppState;
use crate::services::settings as settings_service;
use shared::{ApiError, ApiSuccess, UpdateSettingsRequest};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/settings")
            .route("", web::get().to(get_settings))
            .route("", web::put().to(update_settings)),
    );
}

async fn get_settings(state: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse> {
    let caller = match authenticate(&state.db, &req, &state.config.jwt_secret).await {
        Ok(user) => user,
        Err(e) => return Ok(e.to_response()),
    };

    match settings_service::get_settings(&state.db, &caller.id).await {
        Ok(settings) => Ok(HttpResponse::Ok().json(ApiSuccess::new(settings))),
        Err(e) => {
            log::error!("Error fetching settings: {:?}", e);
            Ok(HttpResponse::InternalServerError().json(ApiError {
                error: "internal_error".to_string(),
                message: "Failed to fetch settings".to_string(),
            }))
        }
    }
}

async fn update_settings(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<UpdateSettingsRequest>,
) -> Result<HttpResponse> {
    let caller = match authenticate(&state.db, &req, &state.config.jwt_secret).await {
        Ok(user) => user,
        Err(e) => return Ok(e.to_response()),
    };

    match settings_service::update_settings(&state.db, &caller.id, &body.into_inner()).await {
        Ok(settings) => Ok(HttpResponse::Ok().json(ApiSuccess::new(settings))),
        Err(e) => {
            log::error!("Error updating settings: {:?}", e);
            Ok(HttpResponse::InternalServerError().json(ApiError {
                error: "internal_error".to_string(),
                message: "Failed to update settings".to_string(),
            }))
        }
    }
}
