use actix_web::{web, HttpResponse, Result};
use serde_json::json;

use crate::models::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health));
}

async fn health(state: web::Data<AppState>) -> Result<HttpResponse> {
    let ml_healthy = state.ml.health_check().await;

    Ok(HttpResponse::Ok().json(json!({
        "status": "healthy",
        "ml_service": if ml_healthy { "healthy" } else { "unreachable" },
    })))
}
