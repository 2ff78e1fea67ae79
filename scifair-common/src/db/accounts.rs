//! Accounts and sessions
//!
//! Passwords are stored as Argon2id PHC strings (the salt travels inside the
//! string). Sessions are opaque random bearer tokens that expire after the
//! `session_ttl_hours` setting; signing out deletes the row.

use super::init::get_setting_i64;
use super::rows::{format_timestamp, parse_timestamp, parse_uuid};
use crate::models::User;
use crate::{Error, Result};
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::{Duration, Utc};
use rand::Rng;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

fn random_hex(bytes: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..bytes).map(|_| format!("{:02x}", rng.gen::<u8>())).collect()
}

fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| Error::Internal(format!("Password hashing failed: {}", e)))
}

fn password_matches(stored_hash: &str, password: &str) -> Result<bool> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| Error::Internal(format!("Invalid stored password hash: {}", e)))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Oldest session creation time still accepted
async fn session_cutoff(pool: &SqlitePool) -> Result<String> {
    let ttl_hours = get_setting_i64(pool, "session_ttl_hours", DEFAULT_SESSION_TTL_HOURS)
        .await?
        .max(1);
    Ok(format_timestamp(Utc::now() - Duration::hours(ttl_hours)))
}

/// Session lifetime when the `session_ttl_hours` setting is absent (30 days)
pub const DEFAULT_SESSION_TTL_HOURS: i64 = 720;

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn user_from_row(row: &SqliteRow) -> Result<User> {
    let id: String = row.try_get("id")?;
    let created_at: String = row.try_get("created_at")?;
    Ok(User {
        id: parse_uuid(&id)?,
        email: row.try_get("email")?,
        full_name: row.try_get("full_name")?,
        created_at: parse_timestamp(&created_at)?,
    })
}

/// Register a new account
pub async fn create_user(
    pool: &SqlitePool,
    email: &str,
    full_name: &str,
    password: &str,
) -> Result<User> {
    let email = normalize_email(email);
    if email.is_empty() || !email.contains('@') {
        return Err(Error::InvalidInput("A valid email address is required".to_string()));
    }

    let min_length = get_setting_i64(pool, "password_min_length", 6).await?.max(1) as usize;
    if password.chars().count() < min_length {
        return Err(Error::InvalidInput(format!(
            "Password should be at least {} characters",
            min_length
        )));
    }

    let user = User {
        id: Uuid::new_v4(),
        email,
        full_name: full_name.trim().to_string(),
        created_at: Utc::now(),
    };
    let password_hash = hash_password(password)?;

    let inserted = sqlx::query(
        r#"
        INSERT INTO users (id, email, full_name, password_hash, created_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(user.id.to_string())
    .bind(&user.email)
    .bind(&user.full_name)
    .bind(password_hash)
    .bind(format_timestamp(user.created_at))
    .execute(pool)
    .await;

    match inserted {
        Ok(_) => Ok(user),
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(Error::InvalidInput(
            "User already registered".to_string(),
        )),
        Err(e) => Err(e.into()),
    }
}

/// Check credentials; `None` for unknown email or wrong password
pub async fn verify_credentials(
    pool: &SqlitePool,
    email: &str,
    password: &str,
) -> Result<Option<User>> {
    let row = sqlx::query(
        "SELECT id, email, full_name, password_hash, created_at FROM users WHERE email = ?",
    )
    .bind(normalize_email(email))
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let stored_hash: String = row.try_get("password_hash")?;
    if !password_matches(&stored_hash, password)? {
        return Ok(None);
    }

    user_from_row(&row).map(Some)
}

/// Start a session for `user_id` and return its bearer token
pub async fn create_session(pool: &SqlitePool, user_id: Uuid) -> Result<String> {
    let token = random_hex(32);
    sqlx::query("INSERT INTO sessions (token, user_id, created_at) VALUES (?, ?, ?)")
        .bind(&token)
        .bind(user_id.to_string())
        .bind(format_timestamp(Utc::now()))
        .execute(pool)
        .await?;
    Ok(token)
}

/// Resolve a bearer token to its user; expired sessions resolve to `None`
pub async fn find_session_user(pool: &SqlitePool, token: &str) -> Result<Option<User>> {
    let cutoff = session_cutoff(pool).await?;
    let row = sqlx::query(
        r#"
        SELECT u.id, u.email, u.full_name, u.created_at
        FROM sessions s
        JOIN users u ON u.id = s.user_id
        WHERE s.token = ? AND s.created_at > ?
        "#,
    )
    .bind(token)
    .bind(cutoff)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(user_from_row).transpose()
}

/// End a session; unknown tokens are ignored
pub async fn delete_session(pool: &SqlitePool, token: &str) -> Result<()> {
    sqlx::query("DELETE FROM sessions WHERE token = ?")
        .bind(token)
        .execute(pool)
        .await?;
    Ok(())
}

/// Delete sessions older than the configured lifetime, returning how many went
pub async fn purge_expired_sessions(pool: &SqlitePool) -> Result<u64> {
    let cutoff = session_cutoff(pool).await?;
    let result = sqlx::query("DELETE FROM sessions WHERE created_at <= ?")
        .bind(cutoff)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
