use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for users
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct UserRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub branch: Option<String>,
    pub employee_id: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRow {
    pub fn to_shared(&self) -> shared::User {
        shared::User {
            id: Uuid::parse_str(&self.id).unwrap(),
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role.parse().unwrap(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::Role;

    #[test]
    fn test_user_row_to_shared() {
        let now = Utc::now();
        let id = Uuid::new_v4();

        let row = UserRow {
            id: id.to_string(),
            name: "Ravi Kumar".to_string(),
            email: "ravi@example.com".to_string(),
            password_hash: "hashed".to_string(),
            role: "student".to_string(),
            branch: Some("CS".to_string()),
            employee_id: None,
            phone: None,
            created_at: now,
            updated_at: now,
        };

        let shared = row.to_shared();

        assert_eq!(shared.id, id);
        assert_eq!(shared.name, "Ravi Kumar");
        assert_eq!(shared.email, "ravi@example.com");
        assert_eq!(shared.role, Role::Student);
    }
}
