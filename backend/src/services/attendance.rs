use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{NaiveDate, Utc};
use sqlx::{FromRow, SqlitePool};
use thiserror::Error;
use uuid::Uuid;

use crate::services::ml_client::{MlClient, MlFace, MlServiceError};
use shared::{
    AttendanceLogEntry, ConfirmAttendanceRequest, ConfirmAttendanceResponse, DetectedFace,
    MarkAttendanceResponse, MatchStatus, MatchedStudent,
};

// distance thresholds
const CONFIDENT_THRESHOLD: f32 = 0.50;
const UNCERTAIN_THRESHOLD: f32 = 0.60;

#[derive(Debug, Error)]
pub enum AttendanceError {
    #[error("Subject not found")]
    SubjectNotFound,
    #[error("Invalid image payload")]
    InvalidImage,
    #[error("ML service unavailable: {0}")]
    MlService(#[from] MlServiceError),
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

/// Strip a `data:image/...;base64,` header if one is present.
pub fn strip_data_url_header(image: &str) -> &str {
    match image.split_once(',') {
        Some((_, rest)) => rest,
        None => image,
    }
}

fn classify(distance: f32) -> MatchStatus {
    if distance < CONFIDENT_THRESHOLD {
        MatchStatus::Confident
    } else if distance < UNCERTAIN_THRESHOLD {
        MatchStatus::Uncertain
    } else {
        MatchStatus::Unknown
    }
}

/// Run face recognition over a classroom photo for one subject. Only
/// students with a verified enrollment take part in the match.
pub async fn mark_attendance(
    pool: &SqlitePool,
    ml: &MlClient,
    subject_id: &Uuid,
    image: &str,
) -> Result<MarkAttendanceResponse, AttendanceError> {
    let subject_exists =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM subjects WHERE id = ?")
            .bind(subject_id.to_string())
            .fetch_one(pool)
            .await?;

    if subject_exists == 0 {
        return Err(AttendanceError::SubjectNotFound);
    }

    let student_ids: Vec<String> = sqlx::query_scalar(
        "SELECT student_id FROM subject_students WHERE subject_id = ? AND verified = 1",
    )
    .bind(subject_id.to_string())
    .fetch_all(pool)
    .await?;

    if student_ids.is_empty() {
        return Ok(MarkAttendanceResponse {
            faces: Vec::new(),
            count: 0,
        });
    }

    let image_base64 = strip_data_url_header(image);
    STANDARD
        .decode(image_base64)
        .map_err(|_| AttendanceError::InvalidImage)?;

    let response = ml.recognize_faces(image_base64, &student_ids).await?;

    let mut faces = Vec::with_capacity(response.faces.len());
    for face in response.faces {
        faces.push(enrich_face(pool, face).await?);
    }
    let count = faces.len();

    log::debug!("Recognized {} face(s) for subject {}", count, subject_id);

    Ok(MarkAttendanceResponse { faces, count })
}

/// Re-classify by distance and attach roll/name from the database.
async fn enrich_face(pool: &SqlitePool, face: MlFace) -> Result<DetectedFace, sqlx::Error> {
    let status = classify(face.distance);

    let student = if status != MatchStatus::Unknown && !face.student_id.is_empty() {
        let row: Option<(String, String)> = sqlx::query_as(
            r#"
            SELECT s.roll, u.name FROM students s
            JOIN users u ON u.id = s.user_id
            WHERE s.id = ?
            "#,
        )
        .bind(&face.student_id)
        .fetch_optional(pool)
        .await?;

        row.and_then(|(roll, name)| {
            Uuid::parse_str(&face.student_id)
                .ok()
                .map(|id| MatchedStudent { id, roll, name })
        })
    } else {
        None
    };

    Ok(DetectedFace {
        region: face.region,
        status,
        distance: Some(face.distance),
        confidence: Some(face.confidence),
        student,
    })
}

/// Persist the reviewed attendance. A student already marked today for this
/// subject is left untouched and does not count as updated.
pub async fn confirm_attendance(
    pool: &SqlitePool,
    request: &ConfirmAttendanceRequest,
) -> Result<ConfirmAttendanceResponse, AttendanceError> {
    let subject_exists =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM subjects WHERE id = ?")
            .bind(request.subject_id.to_string())
            .fetch_one(pool)
            .await?;

    if subject_exists == 0 {
        return Err(AttendanceError::SubjectNotFound);
    }

    let today = Utc::now().date_naive();

    let present_updated =
        insert_records(pool, &request.subject_id, &request.present_students, today, true).await?;
    let absent_updated =
        insert_records(pool, &request.subject_id, &request.absent_students, today, false).await?;

    Ok(ConfirmAttendanceResponse {
        present_updated,
        absent_updated,
    })
}

async fn insert_records(
    pool: &SqlitePool,
    subject_id: &Uuid,
    students: &[Uuid],
    date: NaiveDate,
    present: bool,
) -> Result<i64, sqlx::Error> {
    let mut updated = 0;
    for student_id in students {
        // The unique (student, subject, date) index makes re-marking a no-op
        let result = sqlx::query(
            r#"
            INSERT OR IGNORE INTO attendance_records (id, student_id, subject_id, date, period, present, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(student_id.to_string())
        .bind(subject_id.to_string())
        .bind(date)
        .bind(Option::<i32>::None)
        .bind(present)
        .bind(Utc::now())
        .execute(pool)
        .await?;

        updated += result.rows_affected() as i64;
    }

    Ok(updated)
}

#[derive(Debug, FromRow)]
struct LogRow {
    id: String,
    date: NaiveDate,
    period: Option<i32>,
    present: bool,
    student_name: String,
    roll: String,
    subject_name: String,
}

pub async fn recent_entries(
    pool: &SqlitePool,
    limit: i64,
) -> Result<Vec<AttendanceLogEntry>, AttendanceError> {
    let rows: Vec<LogRow> = sqlx::query_as(
        r#"
        SELECT a.id, a.date, a.period, a.present,
               u.name AS student_name, s.roll, sub.name AS subject_name
        FROM attendance_records a
        JOIN students s ON s.id = a.student_id
        JOIN users u ON u.id = s.user_id
        JOIN subjects sub ON sub.id = a.subject_id
        ORDER BY a.created_at DESC
        LIMIT ?
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| AttendanceLogEntry {
            id: Uuid::parse_str(&row.id).unwrap(),
            date: row.date,
            period: row.period,
            present: row.present,
            student_name: row.student_name,
            roll: row.roll,
            subject_name: row.subject_name,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_data_url_header() {
        assert_eq!(
            strip_data_url_header("data:image/jpeg;base64,abc123"),
            "abc123"
        );
        assert_eq!(strip_data_url_header("abc123"), "abc123");
    }

    #[test]
    fn test_classify_confident_below_first_threshold() {
        assert_eq!(classify(0.0), MatchStatus::Confident);
        assert_eq!(classify(0.49), MatchStatus::Confident);
    }

    #[test]
    fn test_classify_uncertain_between_thresholds() {
        assert_eq!(classify(0.50), MatchStatus::Uncertain);
        assert_eq!(classify(0.59), MatchStatus::Uncertain);
    }

    #[test]
    fn test_classify_unknown_beyond_second_threshold() {
        assert_eq!(classify(0.60), MatchStatus::Unknown);
        assert_eq!(classify(1.0), MatchStatus::Unknown);
    }

    #[test]
    fn test_stripped_payload_decodes_as_base64() {
        let stripped = strip_data_url_header("data:image/png;base64,aGVsbG8=");
        assert!(STANDARD.decode(stripped).is_ok());
        assert!(STANDARD.decode("not base64 ##").is_err());
    }
}
