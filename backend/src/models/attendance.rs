use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for attendance records. At most one row exists per
/// student, subject and date.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct AttendanceRow {
    pub id: String,
    pub student_id: String,
    pub subject_id: String,
    pub date: NaiveDate,
    pub period: Option<i32>,
    pub present: bool,
    pub created_at: DateTime<Utc>,
}

impl AttendanceRow {
    pub fn to_shared(&self) -> shared::AttendanceRecord {
        shared::AttendanceRecord {
            id: Uuid::parse_str(&self.id).unwrap(),
            subject_id: Uuid::parse_str(&self.subject_id).unwrap(),
            date: self.date,
            period: self.period,
            present: self.present,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attendance_row_to_shared() {
        let id = Uuid::new_v4();
        let subject_id = Uuid::new_v4();

        let row = AttendanceRow {
            id: id.to_string(),
            student_id: Uuid::new_v4().to_string(),
            subject_id: subject_id.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 11).unwrap(),
            period: Some(3),
            present: true,
            created_at: Utc::now(),
        };

        let shared = row.to_shared();

        assert_eq!(shared.id, id);
        assert_eq!(shared.subject_id, subject_id);
        assert_eq!(shared.period, Some(3));
        assert!(shared.present);
    }
}
