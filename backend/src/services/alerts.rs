use chrono::{Datelike, Duration, NaiveDate, Utc};
use sqlx::SqlitePool;
use std::sync::Arc;
use thiserror::Error;
use tokio::time;
use uuid::Uuid;

use crate::services::students;

pub const LOW_ATTENDANCE_THRESHOLD: f64 = 75.0;

#[derive(Debug, Error)]
pub enum AlertError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

/// Report from one low-attendance sweep
#[derive(Debug, Clone)]
pub struct SweepReport {
    pub teachers_checked: usize,
    pub students_flagged: usize,
    pub alerts_recorded: i64,
}

/// Configuration for the background job scheduler
#[derive(Debug, Clone)]
pub struct JobConfig {
    /// Hour of day to run the sweep (0-23)
    pub check_hour: u32,
    /// Minute of hour to run the sweep (0-59)
    pub check_minute: u32,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            check_hour: 2, // Run at 2:00 AM
            check_minute: 0,
        }
    }
}

/// Alerts are deduplicated per calendar month.
fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// Start the background job scheduler. Runs the low-attendance sweep daily;
/// the per-month alert dedup keeps repeated runs quiet.
pub async fn start_scheduler(pool: Arc<SqlitePool>, config: JobConfig) {
    log::info!(
        "Alert scheduler started. Low-attendance sweep scheduled for {:02}:{:02}",
        config.check_hour,
        config.check_minute
    );

    loop {
        let now = Utc::now();
        let today_check = now
            .date_naive()
            .and_hms_opt(config.check_hour, config.check_minute, 0)
            .unwrap();

        let next_check = if now.naive_utc() < today_check {
            today_check
        } else {
            today_check + Duration::days(1)
        };

        let sleep_duration = (next_check - now.naive_utc())
            .to_std()
            .unwrap_or(std::time::Duration::from_secs(3600));

        log::debug!(
            "Next low-attendance sweep in {} seconds",
            sleep_duration.as_secs()
        );

        time::sleep(sleep_duration).await;

        match run_low_attendance_sweep(&pool).await {
            Ok(report) => log::info!(
                "Low-attendance sweep finished: {} alerts recorded for {} students across {} opted-in teachers",
                report.alerts_recorded,
                report.students_flagged,
                report.teachers_checked
            ),
            Err(e) => log::error!("Low-attendance sweep failed: {}", e),
        }
    }
}

/// Find students sitting below the attendance threshold in subjects taught
/// by teachers who opted in, and record one alert per student, subject and
/// month.
pub async fn run_low_attendance_sweep(pool: &SqlitePool) -> Result<SweepReport, AlertError> {
    let teacher_ids: Vec<String> = sqlx::query_scalar(
        r#"
        SELECT u.id FROM users u
        JOIN user_settings us ON us.user_id = u.id
        WHERE u.role = 'teacher' AND us.email_low_attendance = 1
        "#,
    )
    .fetch_all(pool)
    .await?;

    if teacher_ids.is_empty() {
        log::info!("No teachers have enabled low-attendance alerts");
        return Ok(SweepReport {
            teachers_checked: 0,
            students_flagged: 0,
            alerts_recorded: 0,
        });
    }

    let month = month_key(Utc::now().date_naive());
    let mut students_flagged = 0;
    let mut alerts_recorded = 0i64;

    for teacher_id in &teacher_ids {
        let subject_ids: Vec<String> =
            sqlx::query_scalar("SELECT id FROM subjects WHERE teacher_id = ?")
                .bind(teacher_id)
                .fetch_all(pool)
                .await?;

        for subject_id in subject_ids {
            let student_ids: Vec<String> =
                sqlx::query_scalar("SELECT student_id FROM subject_students WHERE subject_id = ?")
                    .bind(&subject_id)
                    .fetch_all(pool)
                    .await?;

            for student_id in student_ids {
                let summary =
                    students::build_attendance_summary(pool, &student_id, Some(&subject_id))
                        .await?;

                // No classes conducted yet, nothing to flag
                if summary.total_classes == 0 {
                    continue;
                }

                if summary.percentage < LOW_ATTENDANCE_THRESHOLD {
                    students_flagged += 1;

                    let result = sqlx::query(
                        r#"
                        INSERT OR IGNORE INTO attendance_alerts (id, student_id, subject_id, percentage, month, created_at)
                        VALUES (?, ?, ?, ?, ?, ?)
                        "#,
                    )
                    .bind(Uuid::new_v4().to_string())
                    .bind(&student_id)
                    .bind(&subject_id)
                    .bind(summary.percentage)
                    .bind(&month)
                    .bind(Utc::now())
                    .execute(pool)
                    .await?;

                    alerts_recorded += result.rows_affected() as i64;
                }
            }
        }
    }

    Ok(SweepReport {
        teachers_checked: teacher_ids.len(),
        students_flagged,
        alerts_recorded,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_key_format() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(month_key(date), "2024-03");

        let date = NaiveDate::from_ymd_opt(2024, 11, 30).unwrap();
        assert_eq!(month_key(date), "2024-11");
    }

    #[test]
    fn test_job_config_default() {
        let config = JobConfig::default();
        assert_eq!(config.check_hour, 2);
        assert_eq!(config.check_minute, 0);
    }
}
