use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for subjects
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct SubjectRow {
    pub id: String,
    pub name: String,
    pub code: String,
    pub teacher_id: String,
    pub created_at: DateTime<Utc>,
}

impl SubjectRow {
    pub fn to_shared(&self) -> shared::Subject {
        shared::Subject {
            id: Uuid::parse_str(&self.id).unwrap(),
            name: self.name.clone(),
            code: self.code.clone(),
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_row_to_shared() {
        let now = Utc::now();
        let id = Uuid::new_v4();

        let row = SubjectRow {
            id: id.to_string(),
            name: "Operating Systems".to_string(),
            code: "CS301".to_string(),
            teacher_id: Uuid::new_v4().to_string(),
            created_at: now,
        };

        let shared = row.to_shared();

        assert_eq!(shared.id, id);
        assert_eq!(shared.name, "Operating Systems");
        assert_eq!(shared.code, "CS301");
    }
}
