use chrono::Utc;
use sqlx::SqlitePool;
use thiserror::Error;
use uuid::Uuid;

use crate::models::SubjectRow;
use crate::services::students;
use shared::{CreateSubjectRequest, Subject};

#[derive(Debug, Error)]
pub enum SubjectsError {
    #[error("Subject code already exists")]
    CodeAlreadyExists,
    #[error("Subject not found")]
    SubjectNotFound,
    #[error("Student not found")]
    StudentNotFound,
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

pub async fn list_subjects(pool: &SqlitePool) -> Result<Vec<Subject>, SubjectsError> {
    let rows: Vec<SubjectRow> = sqlx::query_as("SELECT * FROM subjects ORDER BY name")
        .fetch_all(pool)
        .await?;

    Ok(rows.iter().map(|r| r.to_shared()).collect())
}

pub async fn create_subject(
    pool: &SqlitePool,
    teacher_id: &Uuid,
    request: &CreateSubjectRequest,
) -> Result<Subject, SubjectsError> {
    let existing = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM subjects WHERE code = ?")
        .bind(&request.code)
        .fetch_one(pool)
        .await?;

    if existing > 0 {
        return Err(SubjectsError::CodeAlreadyExists);
    }

    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO subjects (id, name, code, teacher_id, created_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(id.to_string())
    .bind(&request.name)
    .bind(&request.code)
    .bind(teacher_id.to_string())
    .bind(now)
    .execute(pool)
    .await?;

    Ok(Subject {
        id,
        name: request.name.clone(),
        code: request.code.clone(),
        created_at: now,
    })
}

/// Enroll the calling user's student record into a subject. The enrollment
/// starts unverified; face registration flips it.
pub async fn enroll_student(
    pool: &SqlitePool,
    subject_id: &Uuid,
    user_id: &Uuid,
) -> Result<(), SubjectsError> {
    let subject_exists =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM subjects WHERE id = ?")
            .bind(subject_id.to_string())
            .fetch_one(pool)
            .await?;

    if subject_exists == 0 {
        return Err(SubjectsError::SubjectNotFound);
    }

    let student = students::get_student_by_user(pool, user_id)
        .await
        .map_err(|e| match e {
            students::StudentsError::DatabaseError(e) => SubjectsError::DatabaseError(e),
            students::StudentsError::StudentNotFound => SubjectsError::StudentNotFound,
        })?
        .ok_or(SubjectsError::StudentNotFound)?;

    sqlx::query(
        r#"
        INSERT OR IGNORE INTO subject_students (subject_id, student_id, verified)
        VALUES (?, ?, 0)
        "#,
    )
    .bind(subject_id.to_string())
    .bind(&student.id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Flip the verified flag on every enrollment of a student; called after
/// the face service accepts or drops their embeddings.
pub async fn set_student_verified(
    pool: &SqlitePool,
    student_id: &Uuid,
    verified: bool,
) -> Result<(), SubjectsError> {
    sqlx::query("UPDATE subject_students SET verified = ? WHERE student_id = ?")
        .bind(verified)
        .bind(student_id.to_string())
        .execute(pool)
        .await?;

    Ok(())
}
