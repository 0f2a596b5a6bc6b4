use std::sync::Arc;

use reqwest::Method;
use serde_json::json;
use tracing::{debug, info, warn};

use shared_config::AppConfig;
use shared_database::supabase::{SupabaseClient, SupabaseError};

use crate::models::{CredentialError, LoginRequest, PublicUser, RegisterRequest, UserRecord};
use crate::services::password::{hash_password, verify_password};

pub struct AccountService {
    store: Arc<SupabaseClient>,
}

impl AccountService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: Arc::new(SupabaseClient::new(config)),
        }
    }

    pub async fn register(&self, request: RegisterRequest) -> Result<(), CredentialError> {
        let name = required_field(request.name)?;
        let email = required_field(request.email)?;
        let password = required_field(request.password)?;

        debug!("Registering account for {}", email);

        if self.find_by_email(&email).await?.is_some() {
            return Err(CredentialError::EmailTaken);
        }

        let password_hash = hash_password(&password)
            .map_err(|e| CredentialError::Store(format!("password hashing failed: {}", e)))?;

        let row = json!({
            "name": name,
            "email": email,
            "password_hash": password_hash,
        });

        match self.store.insert::<Vec<UserRecord>>("users", row).await {
            Ok(_) => {}
            // The unique index on users.email decides duplicates; the
            // pre-check above only buys the friendlier error message.
            Err(SupabaseError::Conflict(_)) => return Err(CredentialError::EmailTaken),
            Err(e) => return Err(CredentialError::Store(e.to_string())),
        }

        info!("Registered account for {}", email);
        Ok(())
    }

    pub async fn login(&self, request: LoginRequest) -> Result<PublicUser, CredentialError> {
        let (Some(email), Some(password)) =
            (non_empty(request.email), non_empty(request.password))
        else {
            return Err(CredentialError::InvalidCredentials);
        };

        let Some(user) = self.find_by_email(&email).await? else {
            warn!("Login attempt for unknown email");
            return Err(CredentialError::InvalidCredentials);
        };

        let valid = verify_password(&password, &user.password_hash)
            .map_err(|e| CredentialError::Store(format!("password verification failed: {}", e)))?;

        if !valid {
            warn!("Login attempt with wrong password for {}", user.email);
            return Err(CredentialError::InvalidCredentials);
        }

        info!("Login successful for {}", user.email);
        Ok(PublicUser {
            name: user.name,
            email: user.email,
        })
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, CredentialError> {
        let path = format!("/rest/v1/users?email=eq.{}", urlencoding::encode(email));

        let result: Vec<UserRecord> = self
            .store
            .request(Method::GET, &path, None)
            .await
            .map_err(|e| CredentialError::Store(e.to_string()))?;

        Ok(result.into_iter().next())
    }
}

fn required_field(value: Option<String>) -> Result<String, CredentialError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(CredentialError::Validation(
            "All fields are required.".to_string(),
        )),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn required_field_rejects_missing_and_empty() {
        assert_matches!(required_field(None), Err(CredentialError::Validation(_)));
        assert_matches!(
            required_field(Some(String::new())),
            Err(CredentialError::Validation(_))
        );
        assert_eq!(required_field(Some("ok".into())).unwrap(), "ok");
    }

    #[test]
    fn non_empty_filters_blank_credentials() {
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some(String::new())), None);
        assert_eq!(non_empty(Some("secret".into())), Some("secret".to_string()));
    }
}
