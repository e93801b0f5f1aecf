//! Registration and HTTP Basic authentication.
//!
//! Credentials are verified per request: the `Authorization` header is
//! decoded, the user is looked up by email, and the password is checked
//! against the stored argon2 PHC string. Handlers receive the resolved
//! [`CurrentUser`] before any gamification operation runs.

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
  password_hash::SaltString,
};
use axum::{
  Json,
  extract::{FromRequestParts, State},
  http::{HeaderMap, StatusCode, request::Parts},
  response::IntoResponse,
};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;
use rand_core::OsRng;
use serde::Deserialize;
use sparks_core::{store::SparkStore, user::NewUser};

use crate::{AppState, error::ApiError};

/// The authenticated caller, resolved from Basic credentials.
pub struct CurrentUser(pub sparks_core::user::User);

fn basic_credentials(headers: &HeaderMap) -> Result<(String, String), ApiError> {
  let header_val = headers
    .get(axum::http::header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .ok_or(ApiError::Unauthorized)?;

  let encoded = header_val
    .strip_prefix("Basic ")
    .ok_or(ApiError::Unauthorized)?;

  let decoded = B64.decode(encoded).map_err(|_| ApiError::Unauthorized)?;
  let creds =
    std::str::from_utf8(&decoded).map_err(|_| ApiError::Unauthorized)?;

  let (email, password) =
    creds.split_once(':').ok_or(ApiError::Unauthorized)?;
  Ok((email.to_owned(), password.to_owned()))
}

fn verify_password(password: &str, phc: &str) -> Result<(), ApiError> {
  let parsed = PasswordHash::new(phc).map_err(|_| ApiError::Unauthorized)?;
  Argon2::default()
    .verify_password(password.as_bytes(), &parsed)
    .map_err(|_| ApiError::Unauthorized)
}

impl<S> FromRequestParts<AppState<S>> for CurrentUser
where
  S: SparkStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let (email, password) = basic_credentials(&parts.headers)?;

    let user = state
      .store
      .find_user_by_email(&email)
      .await
      .map_err(ApiError::store)?
      .ok_or(ApiError::Unauthorized)?;

    verify_password(&password, &user.password_hash)?;
    Ok(CurrentUser(user))
  }
}

// ─── Register ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RegisterBody {
  pub name:     String,
  pub email:    String,
  pub password: String,
}

fn validate_registration(body: &RegisterBody) -> Result<(), ApiError> {
  if body.name.trim().len() < 2 {
    return Err(ApiError::Validation(
      "name must be at least 2 characters".into(),
    ));
  }
  if !body.email.contains('@') {
    return Err(ApiError::Validation("please provide a valid email".into()));
  }
  if body.password.len() < 6 {
    return Err(ApiError::Validation(
      "password must be at least 6 characters".into(),
    ));
  }
  Ok(())
}

/// `POST /auth/register` — body: `{"name":...,"email":...,"password":...}`
pub async fn register<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<RegisterBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: SparkStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  validate_registration(&body)?;

  let existing = state
    .store
    .find_user_by_email(&body.email)
    .await
    .map_err(ApiError::store)?;
  if existing.is_some() {
    return Err(ApiError::Validation(
      "user already exists with this email".into(),
    ));
  }

  let salt = SaltString::generate(&mut OsRng);
  let password_hash = Argon2::default()
    .hash_password(body.password.as_bytes(), &salt)
    .map_err(|e| ApiError::Store(format!("cannot hash password: {e}").into()))?
    .to_string();

  let user = state
    .store
    .create_user(NewUser {
      name: body.name.trim().to_owned(),
      email: body.email,
      password_hash,
    })
    .await
    .map_err(ApiError::store)?;

  tracing::info!(user_id = %user.user_id, "registered new user");

  Ok((
    StatusCode::CREATED,
    Json(serde_json::json!({
      "message": "user created successfully",
      "user": user,
    })),
  ))
}

/// `GET /auth/me` — the authenticated user's own record.
pub async fn me<S>(
  CurrentUser(user): CurrentUser,
) -> Result<Json<sparks_core::user::User>, ApiError>
where
  S: SparkStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Ok(Json(user))
}
