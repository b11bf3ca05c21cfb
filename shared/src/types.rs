use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

// ============================================================================
// API Envelope
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSuccess<T> {
    pub data: T,
}

impl<T> ApiSuccess<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub message: String,
}

// ============================================================================
// User Types
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Teacher,
    Student,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Teacher => "teacher",
            Role::Student => "student",
        }
    }

    pub fn can_manage_subjects(&self) -> bool {
        matches!(self, Role::Teacher)
    }

    pub fn can_mark_attendance(&self) -> bool {
        matches!(self, Role::Teacher)
    }
}

#[derive(Debug, Error)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(String);

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "teacher" => Ok(Role::Teacher),
            "student" => Ok(Role::Student),
            other => Err(ParseRoleError(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Registration carries role-specific fields: students have a branch,
/// teachers an employee id and phone number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub roll: Option<String>,
    pub branch: Option<String>,
    pub employee_id: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

// ============================================================================
// Subject Types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSubjectRequest {
    pub name: String,
    pub code: String,
}

// ============================================================================
// Student Types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentSummary {
    pub id: Uuid,
    pub roll: String,
    pub name: String,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectAttendance {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub attendance: AttendanceSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub roll: String,
    pub branch: Option<String>,
    pub year: Option<i32>,
    pub subjects: Vec<SubjectAttendance>,
    pub attendance: AttendanceSummary,
    pub recent_attendance: Vec<AttendanceRecord>,
}

// ============================================================================
// Attendance Types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceSummary {
    pub total_classes: i64,
    pub present: i64,
    pub absent: i64,
    pub percentage: f64,
    pub forecasted_score: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: Uuid,
    pub subject_id: Uuid,
    pub date: NaiveDate,
    pub period: Option<i32>,
    pub present: bool,
}

/// Outcome of matching one detected face against the enrolled students.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Confident,
    Uncertain,
    Unknown,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Confident => "confident",
            MatchStatus::Uncertain => "uncertain",
            MatchStatus::Unknown => "unknown",
        }
    }
}

/// Pixel bounds of a detected face, as reported by the face service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceBox {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchedStudent {
    pub id: Uuid,
    pub roll: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectedFace {
    #[serde(rename = "box")]
    pub region: FaceBox,
    pub status: MatchStatus,
    pub distance: Option<f32>,
    pub confidence: Option<f32>,
    pub student: Option<MatchedStudent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterFaceRequest {
    /// Base64 image, optionally prefixed with a `data:image/...;base64,` header.
    pub image: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkAttendanceRequest {
    /// Base64 image, optionally prefixed with a `data:image/...;base64,` header.
    pub image: String,
    pub subject_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkAttendanceResponse {
    pub faces: Vec<DetectedFace>,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmAttendanceRequest {
    pub subject_id: Uuid,
    pub present_students: Vec<Uuid>,
    pub absent_students: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmAttendanceResponse {
    pub present_updated: i64,
    pub absent_updated: i64,
}

/// One row of the attendance report: a record joined with the names a
/// reader needs to make sense of it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceLogEntry {
    pub id: Uuid,
    pub date: NaiveDate,
    pub period: Option<i32>,
    pub present: bool,
    pub student_name: String,
    pub roll: String,
    pub subject_name: String,
}

// ============================================================================
// Settings Types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSettings {
    pub theme: String,
    pub email_low_attendance: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateSettingsRequest {
    pub theme: Option<String>,
    pub email_low_attendance: Option<bool>,
}

// ============================================================================
// Dashboard Types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    pub student_count: i64,
    pub subject_count: i64,
    pub marked_today: i64,
    pub average_attendance: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        assert_eq!(Role::from_str("teacher").unwrap(), Role::Teacher);
        assert_eq!(Role::from_str("Student").unwrap(), Role::Student);
        assert_eq!(Role::Teacher.as_str(), "teacher");
        assert!(Role::from_str("admin").is_err());
    }

    #[test]
    fn test_role_permissions() {
        assert!(Role::Teacher.can_mark_attendance());
        assert!(!Role::Student.can_mark_attendance());
        assert!(Role::Teacher.can_manage_subjects());
    }

    #[test]
    fn test_match_status_serde_lowercase() {
        let json = serde_json::to_string(&MatchStatus::Confident).unwrap();
        assert_eq!(json, "\"confident\"");

        let status: MatchStatus = serde_json::from_str("\"unknown\"").unwrap();
        assert_eq!(status, MatchStatus::Unknown);
    }

    #[test]
    fn test_detected_face_box_field_name() {
        let face = DetectedFace {
            region: FaceBox {
                top: 10,
                right: 120,
                bottom: 110,
                left: 20,
            },
            status: MatchStatus::Unknown,
            distance: None,
            confidence: None,
            student: None,
        };

        let json = serde_json::to_string(&face).unwrap();
        assert!(json.contains("\"box\""));
        assert!(!json.contains("\"region\""));
    }

    #[test]
    fn test_api_success_wraps_data() {
        let envelope = ApiSuccess::new(42);
        let json = serde_json::to_string(&envelope).unwrap();
        assert_eq!(json, "{\"data\":42}");
    }
}
