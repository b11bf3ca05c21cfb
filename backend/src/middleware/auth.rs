use actix_web::{HttpRequest, HttpResponse};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::services::auth as auth_service;
use shared::{ApiError, Role, User};

/// Extract the caller's user ID from the Authorization header
pub fn extract_user_id(req: &HttpRequest, jwt_secret: &str) -> Result<Uuid, AuthMiddlewareError> {
    let auth_header = req
        .headers()
        .get("Authorization")
        .ok_or(AuthMiddlewareError::MissingToken)?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| AuthMiddlewareError::InvalidToken)?;

    if !auth_str.starts_with("Bearer ") {
        return Err(AuthMiddlewareError::InvalidToken);
    }

    let token = &auth_str[7..];

    auth_service::verify_jwt(token, jwt_secret).map_err(|_| AuthMiddlewareError::InvalidToken)
}

/// Resolve the caller to a full user record.
pub async fn authenticate(
    pool: &SqlitePool,
    req: &HttpRequest,
    jwt_secret: &str,
) -> Result<User, AuthMiddlewareError> {
    let user_id = extract_user_id(req, jwt_secret)?;

    auth_service::get_user_by_id(pool, &user_id)
        .await
        .map_err(|_| AuthMiddlewareError::InvalidToken)?
        .ok_or(AuthMiddlewareError::UnknownUser)
}

pub fn require_role(user: &User, role: Role) -> Result<(), AuthMiddlewareError> {
    if user.role == role {
        Ok(())
    } else {
        Err(AuthMiddlewareError::Forbidden)
    }
}

#[derive(Debug)]
pub enum AuthMiddlewareError {
    MissingToken,
    InvalidToken,
    UnknownUser,
    Forbidden,
}

impl AuthMiddlewareError {
    /// JSON error response matching the failure: 403 for a role mismatch,
    /// 401 for everything else.
    pub fn to_response(&self) -> HttpResponse {
        let body = ApiError {
            error: match self {
                AuthMiddlewareError::Forbidden => "forbidden".to_string(),
                _ => "unauthorized".to_string(),
            },
            message: self.to_string(),
        };

        match self {
            AuthMiddlewareError::Forbidden => HttpResponse::Forbidden().json(body),
            _ => HttpResponse::Unauthorized().json(body),
        }
    }
}

impl std::fmt::Display for AuthMiddlewareError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthMiddlewareError::MissingToken => write!(f, "Missing authorization token"),
            AuthMiddlewareError::InvalidToken => write!(f, "Invalid authorization token"),
            AuthMiddlewareError::UnknownUser => write!(f, "Unknown user"),
            AuthMiddlewareError::Forbidden => write!(f, "Insufficient permissions"),
        }
    }
}

impl std::error::Error for AuthMiddlewareError {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_auth_error_display() {
        assert_eq!(
            AuthMiddlewareError::MissingToken.to_string(),
            "Missing authorization token"
        );
        assert_eq!(
            AuthMiddlewareError::InvalidToken.to_string(),
            "Invalid authorization token"
        );
        assert_eq!(
            AuthMiddlewareError::Forbidden.to_string(),
            "Insufficient permissions"
        );
    }

    #[test]
    fn test_require_role() {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: "Asha Patel".to_string(),
            email: "asha@example.com".to_string(),
            role: Role::Teacher,
            created_at: now,
            updated_at: now,
        };

        assert!(require_role(&user, Role::Teacher).is_ok());
        assert!(require_role(&user, Role::Student).is_err());
    }
}
