use gloo_net::http::Request;
use gloo_storage::{LocalStorage, Storage};
use leptos::*;
use serde::{de::DeserializeOwned, Serialize};
use shared::{
    ApiError, ApiSuccess, AttendanceLogEntry, AuthResponse, ConfirmAttendanceRequest,
    ConfirmAttendanceResponse, CreateSubjectRequest, DashboardStats, LoginRequest,
    MarkAttendanceRequest, MarkAttendanceResponse, RegisterRequest, StudentProfile,
    StudentSummary, Subject, UpdateSettingsRequest, User, UserSettings,
};
use uuid::Uuid;

use crate::identity::IDENTITY_KEY;

const API_BASE: &str = "/api";
const TOKEN_KEY: &str = "auth_token";

#[derive(Clone)]
pub struct AuthState {
    pub token: RwSignal<Option<String>>,
    pub user: RwSignal<Option<User>>,
}

impl AuthState {
    pub fn new() -> Self {
        let stored_token: Option<String> = LocalStorage::get(TOKEN_KEY).ok();
        let stored_user: Option<User> = LocalStorage::get(IDENTITY_KEY).ok();

        Self {
            token: create_rw_signal(stored_token),
            user: create_rw_signal(stored_user),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.get().is_some()
    }

    /// Persist the session. The user record lands under the `"user"` key,
    /// where the header picks it up on its next mount.
    pub fn set_auth(&self, response: AuthResponse) {
        LocalStorage::set(TOKEN_KEY, &response.token).ok();
        LocalStorage::set(IDENTITY_KEY, &response.user).ok();
        self.token.set(Some(response.token));
        self.user.set(Some(response.user));
    }

    pub fn logout(&self) {
        LocalStorage::delete(TOKEN_KEY);
        LocalStorage::delete(IDENTITY_KEY);
        self.token.set(None);
        self.user.set(None);
    }

    pub fn get_token(&self) -> Option<String> {
        self.token.get()
    }
}

impl Default for AuthState {
    fn default() -> Self {
        Self::new()
    }
}

pub struct ApiClient;

impl ApiClient {
    fn get_token() -> Option<String> {
        LocalStorage::get(TOKEN_KEY).ok()
    }

    async fn request<T: DeserializeOwned>(
        method: &str,
        path: &str,
        body: Option<impl Serialize>,
        auth: bool,
    ) -> Result<T, String> {
        let url = format!("{}{}", API_BASE, path);

        let mut request = match method {
            "GET" => Request::get(&url),
            "POST" => Request::post(&url),
            "PUT" => Request::put(&url),
            "DELETE" => Request::delete(&url),
            _ => return Err("Invalid method".to_string()),
        };

        if auth {
            if let Some(token) = Self::get_token() {
                request = request.header("Authorization", &format!("Bearer {}", token));
            }
        }

        let response = if let Some(body) = body {
            request
                .header("Content-Type", "application/json")
                .json(&body)
                .map_err(|e| e.to_string())?
                .send()
                .await
                .map_err(|e| e.to_string())?
        } else {
            request.send().await.map_err(|e| e.to_string())?
        };

        if response.ok() {
            let result: ApiSuccess<T> = response.json().await.map_err(|e| e.to_string())?;
            Ok(result.data)
        } else {
            let error: ApiError = response.json().await.unwrap_or(ApiError {
                error: "unknown".to_string(),
                message: "An unknown error occurred".to_string(),
            });
            Err(error.message)
        }
    }

    // Auth endpoints
    pub async fn register(request: RegisterRequest) -> Result<AuthResponse, String> {
        Self::request("POST", "/auth/register", Some(request), false).await
    }

    pub async fn login(request: LoginRequest) -> Result<AuthResponse, String> {
        Self::request("POST", "/auth/login", Some(request), false).await
    }

    pub async fn get_current_user() -> Result<User, String> {
        Self::request::<User>("GET", "/auth/me", None::<()>, true).await
    }

    // Student endpoints
    pub async fn list_students() -> Result<Vec<StudentSummary>, String> {
        Self::request::<Vec<StudentSummary>>("GET", "/students", None::<()>, true).await
    }

    pub async fn get_student_profile(id: &Uuid) -> Result<StudentProfile, String> {
        Self::request::<StudentProfile>("GET", &format!("/students/{}", id), None::<()>, true)
            .await
    }

    // Subject endpoints
    pub async fn list_subjects() -> Result<Vec<Subject>, String> {
        Self::request::<Vec<Subject>>("GET", "/subjects", None::<()>, true).await
    }

    pub async fn create_subject(request: CreateSubjectRequest) -> Result<Subject, String> {
        Self::request("POST", "/subjects", Some(request), true).await
    }

    // Attendance endpoints
    pub async fn mark_attendance(
        request: MarkAttendanceRequest,
    ) -> Result<MarkAttendanceResponse, String> {
        Self::request("POST", "/attendance/mark", Some(request), true).await
    }

    pub async fn confirm_attendance(
        request: ConfirmAttendanceRequest,
    ) -> Result<ConfirmAttendanceResponse, String> {
        Self::request("POST", "/attendance/confirm", Some(request), true).await
    }

    pub async fn recent_attendance(limit: usize) -> Result<Vec<AttendanceLogEntry>, String> {
        Self::request::<Vec<AttendanceLogEntry>>(
            "GET",
            &format!("/attendance/recent?limit={}", limit),
            None::<()>,
            true,
        )
        .await
    }

    // Dashboard
    pub async fn get_dashboard_stats() -> Result<DashboardStats, String> {
        Self::request::<DashboardStats>("GET", "/dashboard", None::<()>, true).await
    }

    // Settings endpoints
    pub async fn get_settings() -> Result<UserSettings, String> {
        Self::request::<UserSettings>("GET", "/settings", None::<()>, true).await
    }

    pub async fn update_settings(request: UpdateSettingsRequest) -> Result<UserSettings, String> {
        Self::request("PUT", "/settings", Some(request), true).await
    }
}
