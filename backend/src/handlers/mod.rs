use actix_web::web;

pub mod attendance;
pub mod auth;
pub mod dashboard;
pub mod health;
pub mod settings;
pub mod students;
pub mod subjects;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(health::configure)
            .configure(auth::configure)
            .configure(students::configure)
            .configure(subjects::configure)
            .configure(attendance::configure)
            .configure(settings::configure)
            .configure(dashboard::configure),
    );
}
