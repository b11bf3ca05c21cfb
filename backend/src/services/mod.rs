pub mod alerts;
pub mod attendance;
pub mod auth;
pub mod ml_client;
pub mod settings;
pub mod statistics;
pub mod students;
pub mod subjects;
