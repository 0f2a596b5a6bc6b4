use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use tracing::error;

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{CredentialError, LoginRequest, RegisterRequest};
use crate::services::account::AccountService;

fn translate(context: &'static str, generic: &'static str, e: CredentialError) -> AppError {
    match e {
        CredentialError::Validation(msg) => AppError::Validation(msg),
        CredentialError::EmailTaken => AppError::Conflict("Email already exists.".to_string()),
        CredentialError::InvalidCredentials => {
            AppError::Auth("Invalid email or password.".to_string())
        }
        CredentialError::Store(msg) => {
            error!("{}: {}", context, msg);
            AppError::Internal(generic.to_string())
        }
    }
}

#[axum::debug_handler]
pub async fn register(
    State(state): State<Arc<AppConfig>>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let service = AccountService::new(&state);

    service
        .register(request)
        .await
        .map_err(|e| translate("Register error", "Server error during registration.", e))?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User registered successfully!" })),
    ))
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<Arc<AppConfig>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<Value>, AppError> {
    let service = AccountService::new(&state);

    let user = service
        .login(request)
        .await
        .map_err(|e| translate("Login error", "Server error during login.", e))?;

    Ok(Json(json!({
        "message": "Login successful!",
        "user": user,
    })))
}
