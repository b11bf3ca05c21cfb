use sqlx::SqlitePool;
use uuid::Uuid;

use crate::models::UserSettingsRow;
use shared::{UpdateSettingsRequest, UserSettings};

fn default_settings() -> UserSettings {
    UserSettings {
        theme: "light".to_string(),
        email_low_attendance: false,
    }
}

/// A user without a settings row gets the defaults.
pub async fn get_settings(pool: &SqlitePool, user_id: &Uuid) -> Result<UserSettings, sqlx::Error> {
    let row: Option<UserSettingsRow> =
        sqlx::query_as("SELECT * FROM user_settings WHERE user_id = ?")
            .bind(user_id.to_string())
            .fetch_optional(pool)
            .await?;

    Ok(row.map(|r| r.to_shared()).unwrap_or_else(default_settings))
}

/// Partial update: absent fields keep their current value.
pub async fn update_settings(
    pool: &SqlitePool,
    user_id: &Uuid,
    request: &UpdateSettingsRequest,
) -> Result<UserSettings, sqlx::Error> {
    let current = get_settings(pool, user_id).await?;

    let theme = request.theme.clone().unwrap_or(current.theme);
    let email_low_attendance = request
        .email_low_attendance
        .unwrap_or(current.email_low_attendance);

    sqlx::query(
        r#"
        INSERT INTO user_settings (user_id, theme, email_low_attendance)
        VALUES (?, ?, ?)
        ON CONFLICT(user_id) DO UPDATE SET
            theme = excluded.theme,
            email_low_attendance = excluded.email_low_attendance
        "#,
    )
    .bind(user_id.to_string())
    .bind(&theme)
    .bind(email_low_attendance)
    .execute(pool)
    .await?;

    Ok(UserSettings {
        theme,
        email_low_attendance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = default_settings();
        assert_eq!(settings.theme, "light");
        assert!(!settings.email_low_attendance);
    }
}
