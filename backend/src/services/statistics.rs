use chrono::Utc;
use sqlx::SqlitePool;

use crate::services::students;
use shared::DashboardStats;

pub async fn dashboard_stats(pool: &SqlitePool) -> Result<DashboardStats, sqlx::Error> {
    let student_count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM students")
        .fetch_one(pool)
        .await?;

    let subject_count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM subjects")
        .fetch_one(pool)
        .await?;

    let today = Utc::now().date_naive();
    let marked_today =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM attendance_records WHERE date = ?")
            .bind(today)
            .fetch_one(pool)
            .await?;

    let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM attendance_records")
        .fetch_one(pool)
        .await?;
    let present =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM attendance_records WHERE present = 1")
            .fetch_one(pool)
            .await?;

    Ok(DashboardStats {
        student_count,
        subject_count,
        marked_today,
        average_attendance: students::percentage(present, total),
    })
}
