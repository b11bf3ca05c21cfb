pub mod analytics;
pub mod attendance;
pub mod dashboard;
pub mod login;
pub mod register;
pub mod reports;
pub mod schedule;
pub mod settings;
pub mod students;
