use sqlx::SqlitePool;

use crate::config::Config;
use crate::services::ml_client::MlClient;

pub mod attendance;
pub mod student;
pub mod subject;
pub mod user;
pub mod user_settings;

pub use attendance::*;
pub use student::*;
pub use subject::*;
pub use user::*;
pub use user_settings::*;

/// Application state shared across all handlers
pub struct AppState {
    pub db: SqlitePool,
    pub config: Config,
    pub ml: MlClient,
}
