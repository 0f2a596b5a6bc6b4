use std::sync::Arc;

use serde_json::json;
use uuid::Uuid;

use shared_config::AppConfig;

pub struct TestConfig {
    pub supabase_url: String,
    pub supabase_service_key: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            supabase_url: "http://localhost:54321".to_string(),
            supabase_service_key: "test-service-key".to_string(),
        }
    }
}

impl TestConfig {
    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            supabase_url: self.supabase_url.clone(),
            supabase_service_key: self.supabase_service_key.clone(),
            port: 5000,
        }
    }

    /// Config pointed at a wiremock server standing in for the store.
    pub fn for_mock_server(uri: &str) -> Arc<AppConfig> {
        Arc::new(AppConfig {
            supabase_url: uri.to_string(),
            supabase_service_key: "test-service-key".to_string(),
            port: 5000,
        })
    }
}

pub struct MockStoreResponses;

impl MockStoreResponses {
    pub fn user_record(name: &str, email: &str, password_hash: &str) -> serde_json::Value {
        json!({
            "id": Uuid::new_v4(),
            "name": name,
            "email": email,
            "password_hash": password_hash
        })
    }

    pub fn appointment_record(parlour: &str, date: &str, time: &str) -> serde_json::Value {
        json!({
            "id": Uuid::new_v4(),
            "name": "Test Customer",
            "email": "customer@example.com",
            "services": ["Haircut"],
            "parlour": parlour,
            "date": date,
            "time": time,
            "created_at": "2024-01-01T00:00:00Z"
        })
    }

    pub fn unique_violation(constraint: &str) -> serde_json::Value {
        json!({
            "code": "23505",
            "details": null,
            "hint": null,
            "message": format!("duplicate key value violates unique constraint \"{}\"", constraint)
        })
    }
}
