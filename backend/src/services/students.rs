use sqlx::SqlitePool;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{AttendanceRow, StudentRow, SubjectRow, UserRow};
use shared::{AttendanceRecord, AttendanceSummary, StudentProfile, StudentSummary, SubjectAttendance};

const RECENT_LIMIT: i64 = 5;

#[derive(Debug, Error)]
pub enum StudentsError {
    #[error("Student not found")]
    StudentNotFound,
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub(crate) fn percentage(present: i64, total: i64) -> f64 {
    if total == 0 {
        0.0
    } else {
        round2(present as f64 / total as f64 * 100.0)
    }
}

// Rough exam-score forecast carried over from the old reporting sheet.
fn forecast_score(percentage: f64) -> i32 {
    if percentage < 50.0 {
        2
    } else {
        5
    }
}

/// Attendance stats for one student, optionally narrowed to one subject.
pub async fn build_attendance_summary(
    pool: &SqlitePool,
    student_id: &str,
    subject_id: Option<&str>,
) -> Result<AttendanceSummary, sqlx::Error> {
    let (total, present) = match subject_id {
        Some(subject_id) => {
            let total = sqlx::query_scalar::<_, i64>(
                "SELECT COUNT(*) FROM attendance_records WHERE student_id = ? AND subject_id = ?",
            )
            .bind(student_id)
            .bind(subject_id)
            .fetch_one(pool)
            .await?;

            let present = sqlx::query_scalar::<_, i64>(
                "SELECT COUNT(*) FROM attendance_records WHERE student_id = ? AND subject_id = ? AND present = 1",
            )
            .bind(student_id)
            .bind(subject_id)
            .fetch_one(pool)
            .await?;

            (total, present)
        }
        None => {
            let total = sqlx::query_scalar::<_, i64>(
                "SELECT COUNT(*) FROM attendance_records WHERE student_id = ?",
            )
            .bind(student_id)
            .fetch_one(pool)
            .await?;

            let present = sqlx::query_scalar::<_, i64>(
                "SELECT COUNT(*) FROM attendance_records WHERE student_id = ? AND present = 1",
            )
            .bind(student_id)
            .fetch_one(pool)
            .await?;

            (total, present)
        }
    };

    let pct = percentage(present, total);

    Ok(AttendanceSummary {
        total_classes: total,
        present,
        absent: total - present,
        percentage: pct,
        forecasted_score: forecast_score(pct),
    })
}

pub async fn recent_records(
    pool: &SqlitePool,
    student_id: &str,
    limit: i64,
) -> Result<Vec<AttendanceRecord>, sqlx::Error> {
    let rows: Vec<AttendanceRow> = sqlx::query_as(
        "SELECT * FROM attendance_records WHERE student_id = ? ORDER BY date DESC, created_at DESC LIMIT ?",
    )
    .bind(student_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(|r| r.to_shared()).collect())
}

pub async fn list_students(pool: &SqlitePool) -> Result<Vec<StudentSummary>, StudentsError> {
    let students: Vec<StudentRow> = sqlx::query_as("SELECT * FROM students ORDER BY roll")
        .fetch_all(pool)
        .await?;

    let mut summaries = Vec::with_capacity(students.len());
    for student in students {
        let name: String = sqlx::query_scalar("SELECT name FROM users WHERE id = ?")
            .bind(&student.user_id)
            .fetch_optional(pool)
            .await?
            .unwrap_or_default();

        let summary = build_attendance_summary(pool, &student.id, None).await?;
        summaries.push(student.to_summary(name, summary.percentage));
    }

    Ok(summaries)
}

pub async fn get_student_row(
    pool: &SqlitePool,
    student_id: &Uuid,
) -> Result<Option<StudentRow>, StudentsError> {
    let student: Option<StudentRow> = sqlx::query_as("SELECT * FROM students WHERE id = ?")
        .bind(student_id.to_string())
        .fetch_optional(pool)
        .await?;

    Ok(student)
}

pub async fn get_student_by_user(
    pool: &SqlitePool,
    user_id: &Uuid,
) -> Result<Option<StudentRow>, StudentsError> {
    let student: Option<StudentRow> = sqlx::query_as("SELECT * FROM students WHERE user_id = ?")
        .bind(user_id.to_string())
        .fetch_optional(pool)
        .await?;

    Ok(student)
}

pub async fn get_student_profile(
    pool: &SqlitePool,
    student_id: &Uuid,
) -> Result<StudentProfile, StudentsError> {
    let student: StudentRow = sqlx::query_as("SELECT * FROM students WHERE id = ?")
        .bind(student_id.to_string())
        .fetch_optional(pool)
        .await?
        .ok_or(StudentsError::StudentNotFound)?;

    let user: UserRow = sqlx::query_as("SELECT * FROM users WHERE id = ?")
        .bind(&student.user_id)
        .fetch_optional(pool)
        .await?
        .ok_or(StudentsError::StudentNotFound)?;

    let overall = build_attendance_summary(pool, &student.id, None).await?;

    let subject_rows: Vec<SubjectRow> = sqlx::query_as(
        r#"
        SELECT sub.* FROM subjects sub
        JOIN subject_students ss ON ss.subject_id = sub.id
        WHERE ss.student_id = ?
        ORDER BY sub.name
        "#,
    )
    .bind(&student.id)
    .fetch_all(pool)
    .await?;

    let mut subjects = Vec::with_capacity(subject_rows.len());
    for subject in subject_rows {
        let summary = build_attendance_summary(pool, &student.id, Some(&subject.id)).await?;
        subjects.push(SubjectAttendance {
            id: Uuid::parse_str(&subject.id).unwrap(),
            name: subject.name.clone(),
            code: subject.code.clone(),
            attendance: summary,
        });
    }

    let recent_attendance = recent_records(pool, &student.id, RECENT_LIMIT).await?;

    Ok(StudentProfile {
        id: Uuid::parse_str(&student.id).unwrap(),
        user_id: Uuid::parse_str(&student.user_id).unwrap(),
        name: user.name,
        email: user.email,
        roll: student.roll,
        branch: student.branch,
        year: student.year,
        subjects,
        attendance: overall,
        recent_attendance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_rounds_to_two_decimals() {
        assert_eq!(percentage(2, 3), 66.67);
        assert_eq!(percentage(1, 3), 33.33);
        assert_eq!(percentage(3, 4), 75.0);
    }

    #[test]
    fn test_percentage_zero_classes() {
        assert_eq!(percentage(0, 0), 0.0);
    }

    #[test]
    fn test_forecast_score_bands() {
        assert_eq!(forecast_score(0.0), 2);
        assert_eq!(forecast_score(49.99), 2);
        assert_eq!(forecast_score(50.0), 5);
        assert_eq!(forecast_score(100.0), 5);
    }
}
