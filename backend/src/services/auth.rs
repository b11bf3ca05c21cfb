use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand_core::OsRng;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use thiserror::Error;
use uuid::Uuid;

use crate::models::UserRow;
use shared::{RegisterRequest, Role, User};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Email already registered")]
    EmailAlreadyRegistered,
    #[error("Roll number already registered")]
    RollAlreadyRegistered,
    #[error("Students must provide a roll number")]
    MissingRoll,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
    #[error("Password hashing error")]
    HashingError,
    #[error("JWT error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}

pub async fn register_user(pool: &SqlitePool, request: &RegisterRequest) -> Result<User, AuthError> {
    // Check if the email is taken
    let existing =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE email = ?")
            .bind(&request.email)
            .fetch_one(pool)
            .await?;

    if existing > 0 {
        return Err(AuthError::EmailAlreadyRegistered);
    }

    // Students get a linked student record keyed by roll number
    let roll = match request.role {
        Role::Student => {
            let roll = request
                .roll
                .as_deref()
                .filter(|r| !r.trim().is_empty())
                .ok_or(AuthError::MissingRoll)?;

            let taken = sqlx::query_scalar::<_, i64>(
                "SELECT COUNT(*) FROM students WHERE roll = ?",
            )
            .bind(roll)
            .fetch_one(pool)
            .await?;

            if taken > 0 {
                return Err(AuthError::RollAlreadyRegistered);
            }
            Some(roll.to_string())
        }
        Role::Teacher => None,
    };

    // Hash password
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(request.password.as_bytes(), &salt)
        .map_err(|_| AuthError::HashingError)?
        .to_string();

    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO users (id, name, email, password_hash, role, branch, employee_id, phone, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id.to_string())
    .bind(&request.name)
    .bind(&request.email)
    .bind(&password_hash)
    .bind(request.role.as_str())
    .bind(&request.branch)
    .bind(&request.employee_id)
    .bind(&request.phone)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    if let Some(roll) = roll {
        sqlx::query(
            r#"
            INSERT INTO students (id, user_id, roll, branch, year)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(id.to_string())
        .bind(roll)
        .bind(&request.branch)
        .bind(Option::<i32>::None)
        .execute(pool)
        .await?;
    }

    Ok(User {
        id,
        name: request.name.clone(),
        email: request.email.clone(),
        role: request.role,
        created_at: now,
        updated_at: now,
    })
}

pub async fn login_user(
    pool: &SqlitePool,
    request: &shared::LoginRequest,
) -> Result<User, AuthError> {
    let user: UserRow = sqlx::query_as("SELECT * FROM users WHERE email = ?")
        .bind(&request.email)
        .fetch_optional(pool)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    let parsed_hash =
        PasswordHash::new(&user.password_hash).map_err(|_| AuthError::InvalidCredentials)?;

    Argon2::default()
        .verify_password(request.password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)?;

    Ok(user.to_shared())
}

pub async fn get_user_by_id(pool: &SqlitePool, user_id: &Uuid) -> Result<Option<User>, AuthError> {
    let user: Option<UserRow> = sqlx::query_as("SELECT * FROM users WHERE id = ?")
        .bind(user_id.to_string())
        .fetch_optional(pool)
        .await?;

    Ok(user.map(|u| u.to_shared()))
}

pub fn create_jwt(user_id: &Uuid, secret: &str, expiration_hours: i64) -> Result<String, AuthError> {
    let now = Utc::now();
    let exp = now + Duration::hours(expiration_hours);

    let claims = Claims {
        sub: user_id.to_string(),
        exp: exp.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(token)
}

pub fn verify_jwt(token: &str, secret: &str) -> Result<Uuid, AuthError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;

    Uuid::parse_str(&token_data.claims.sub).map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_verify_jwt() {
        let user_id = Uuid::new_v4();
        let secret = "test-secret";

        let token = create_jwt(&user_id, secret, 24).unwrap();
        let verified_id = verify_jwt(&token, secret).unwrap();

        assert_eq!(user_id, verified_id);
    }

    #[test]
    fn test_verify_jwt_invalid_secret() {
        let user_id = Uuid::new_v4();
        let token = create_jwt(&user_id, "secret1", 24).unwrap();

        let result = verify_jwt(&token, "secret2");
        assert!(result.is_err());
    }

    #[test]
    fn test_password_hashing() {
        let password = "test_password123";
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        let hash = argon2.hash_password(password.as_bytes(), &salt).unwrap();
        let hash_string = hash.to_string();
        let parsed_hash = PasswordHash::new(&hash_string).unwrap();

        assert!(argon2.verify_password(password.as_bytes(), &parsed_hash).is_ok());
        assert!(argon2.verify_password(b"wrong_password", &parsed_hash).is_err());
    }
}
