use actix_web::{web, HttpRequest, HttpResponse, Result};

use crate::middleware::auth::authenticate;
use crate::models::AppState;
use crate::services::statistics;
use shared::{ApiError, ApiSuccess};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/dashboard").route("", web::get().to(get_stats)));
}

async fn get_stats(state: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse> {
    if let Err(e) = authenticate(&state.db, &req, &state.config.jwt_secret).await {
        return Ok(e.to_response());
    }

    match statistics::dashboard_stats(&state.db).await {
        Ok(stats) => Ok(HttpResponse::Ok().json(ApiSuccess::new(stats))),
        Err(e) => {
            log::error!("Error computing dashboard stats: {:?}", e);
            Ok(HttpResponse::InternalServerError().json(ApiError {
                error: "internal_error".to_string(),
                message: "Failed to compute dashboard stats".to_string(),
            }))
        }
    }
}
