use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Database model for per-user settings
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct UserSettingsRow {
    pub user_id: String,
    pub theme: String,
    pub email_low_attendance: bool,
}

impl UserSettingsRow {
    pub fn to_shared(&self) -> shared::UserSettings {
        shared::UserSettings {
            theme: self.theme.clone(),
            email_low_attendance: self.email_low_attendance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_row_to_shared() {
        let row = UserSettingsRow {
            user_id: "u1".to_string(),
            theme: "dark".to_string(),
            email_low_attendance: true,
        };

        let shared = row.to_shared();

        assert_eq!(shared.theme, "dark");
        assert!(shared.email_low_attendance);
    }
}
