use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client, Method, StatusCode,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error};

use shared_config::AppConfig;

/// Failures surfaced by the document store, classified by response status.
/// `Conflict` is how unique-index violations reach the cells.
#[derive(Error, Debug)]
pub enum SupabaseError {
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("API error ({status}): {message}")]
    Api { status: StatusCode, message: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

pub struct SupabaseClient {
    client: Client,
    base_url: String,
    service_key: String,
}

impl SupabaseClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.supabase_url.clone(),
            service_key: config.supabase_service_key.clone(),
        }
    }

    fn get_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();

        headers.insert("apikey", HeaderValue::from_str(&self.service_key).unwrap());
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.service_key)).unwrap(),
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        headers
    }

    pub async fn request<T>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<T, SupabaseError>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("Store request: {} {}", method, url);

        let mut req = self.client.request(method, &url).headers(self.get_headers());

        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        Self::read_response(req.send().await?).await
    }

    /// Insert a row into a collection and echo the stored representation back.
    pub async fn insert<T>(&self, collection: &str, row: Value) -> Result<T, SupabaseError>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}/rest/v1/{}", self.base_url, collection);
        debug!("Store insert into {}", collection);

        let mut headers = self.get_headers();
        headers.insert("Prefer", HeaderValue::from_static("return=representation"));

        let req = self.client.post(&url).headers(headers).json(&row);
        Self::read_response(req.send().await?).await
    }

    async fn read_response<T>(response: reqwest::Response) -> Result<T, SupabaseError>
    where
        T: DeserializeOwned,
    {
        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Store error ({}): {}", status, error_text);

            return Err(match status {
                StatusCode::CONFLICT => SupabaseError::Conflict(error_text),
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    SupabaseError::Auth(error_text)
                }
                StatusCode::NOT_FOUND => SupabaseError::NotFound(error_text),
                _ => SupabaseError::Api {
                    status,
                    message: error_text,
                },
            });
        }

        let data = response.json::<T>().await?;
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(uri: &str) -> SupabaseClient {
        SupabaseClient::new(&AppConfig {
            supabase_url: uri.to_string(),
            supabase_service_key: "test-service-key".to_string(),
            port: 5000,
        })
    }

    #[tokio::test]
    async fn request_deserializes_success_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/users"))
            .and(header("apikey", "test-service-key"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{"email": "a@b.c"}])),
            )
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server.uri());
        let result: Vec<Value> = client
            .request(Method::GET, "/rest/v1/users", None)
            .await
            .unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0]["email"], "a@b.c");
    }

    #[tokio::test]
    async fn unique_violation_maps_to_conflict() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rest/v1/appointments"))
            .respond_with(ResponseTemplate::new(409).set_body_json(json!({
                "code": "23505",
                "message": "duplicate key value violates unique constraint"
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server.uri());
        let result = client
            .insert::<Vec<Value>>("appointments", json!({"parlour": "Downtown"}))
            .await;

        assert_matches!(result, Err(SupabaseError::Conflict(_)));
    }

    #[tokio::test]
    async fn auth_failures_map_to_auth() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/users"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server.uri());
        let result = client
            .request::<Vec<Value>>(Method::GET, "/rest/v1/users", None)
            .await;

        assert_matches!(result, Err(SupabaseError::Auth(_)));
    }

    #[tokio::test]
    async fn other_statuses_map_to_api() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/users"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server.uri());
        let result = client
            .request::<Vec<Value>>(Method::GET, "/rest/v1/users", None)
            .await;

        assert_matches!(result, Err(SupabaseError::Api { status, .. }) if status == StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn insert_sends_representation_preference() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rest/v1/users"))
            .and(header("Prefer", "return=representation"))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(json!([{"email": "a@b.c"}])),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server.uri());
        let created: Vec<Value> = client
            .insert("users", json!({"email": "a@b.c"}))
            .await
            .unwrap();

        assert_eq!(created[0]["email"], "a@b.c");
    }
}
