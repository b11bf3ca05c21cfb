use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for student records. The display name and email live on
/// the linked user row.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct StudentRow {
    pub id: String,
    pub user_id: String,
    pub roll: String,
    pub branch: Option<String>,
    pub year: Option<i32>,
}

impl StudentRow {
    pub fn to_summary(&self, name: String, percentage: f64) -> shared::StudentSummary {
        shared::StudentSummary {
            id: Uuid::parse_str(&self.id).unwrap(),
            roll: self.roll.clone(),
            name,
            percentage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_row_to_summary() {
        let id = Uuid::new_v4();
        let row = StudentRow {
            id: id.to_string(),
            user_id: Uuid::new_v4().to_string(),
            roll: "2101".to_string(),
            branch: Some("CS".to_string()),
            year: Some(2),
        };

        let summary = row.to_summary("Ravi Kumar".to_string(), 72.0);

        assert_eq!(summary.id, id);
        assert_eq!(summary.roll, "2101");
        assert_eq!(summary.name, "Ravi Kumar");
        assert_eq!(summary.percentage, 72.0);
    }
}
