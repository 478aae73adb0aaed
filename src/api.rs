//! Blocking client for the fitness backend's REST collections.

use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::config::ApiConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resource {
    User,
    Studio,
    Healthplan,
    Workoutplan,
}

impl Resource {
    pub fn path(self) -> &'static str {
        match self {
            Resource::User => "user",
            Resource::Studio => "studio",
            Resource::Healthplan => "healthplan",
            Resource::Workoutplan => "workoutplan",
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned {status}: {body}")]
    Status { url: String, status: u16, body: String },

    #[error("unexpected response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, resource: Resource) -> String {
        format!("{}/{}", self.base_url, resource.path())
    }

    /// Lists a collection. Records that do not fit `T` are skipped, not fatal.
    pub fn fetch_list<T: DeserializeOwned>(&self, resource: Resource) -> Result<Vec<T>, ApiError> {
        let url = self.url(resource);
        tracing::debug!("GET {}", url);

        let response = self.client.get(&url).send().map_err(|source| {
            tracing::warn!("GET {} failed: {}", url, source);
            ApiError::Transport { url: url.clone(), source }
        })?;

        let response = Self::check_status(&url, response)?;
        let raw = response.json::<Vec<Value>>().map_err(|source| {
            tracing::warn!("Could not decode response from {}: {}", url, source);
            ApiError::Decode { url: url.clone(), source }
        })?;

        let records = raw
            .into_iter()
            .enumerate()
            .filter_map(|(i, record)| match serde_json::from_value(record) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!("Skipping record {} from {}: {}", i, url, e);
                    None
                }
            })
            .collect();
        Ok(records)
    }

    /// Posts `payload`. Any 2xx counts as created; the body is handed back as-is.
    pub fn create_record<P>(&self, resource: Resource, payload: &P) -> Result<Value, ApiError>
    where
        P: Serialize + ?Sized,
    {
        let url = self.url(resource);
        tracing::debug!("POST {}", url);

        let response = self.client.post(&url).json(payload).send().map_err(|source| {
            tracing::warn!("POST {} failed: {}", url, source);
            ApiError::Transport { url: url.clone(), source }
        })?;

        let response = Self::check_status(&url, response)?;
        let body = response.text().unwrap_or_default();
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        match serde_json::from_str::<Value>(&body) {
            Ok(created) => Ok(created),
            Err(_) => Ok(Value::String(body)),
        }
    }

    fn check_status(url: &str, response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().unwrap_or_default();
        tracing::warn!("{} returned {}", url, status);
        Err(ApiError::Status {
            url: url.to_string(),
            status: status.as_u16(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Studio, User};
    use mockito::Matcher;
    use serde_json::json;

    fn client_for(server: &mockito::Server) -> ApiClient {
        ApiClient::new(&ApiConfig {
            base_url: format!("{}/api/v1/", server.url()),
        })
        .unwrap()
    }

    #[test]
    fn base_url_trailing_slash_is_ignored() {
        let server = mockito::Server::new();
        let api = client_for(&server);
        assert_eq!(api.url(Resource::Workoutplan), format!("{}/api/v1/workoutplan", server.url()));
    }

    #[test]
    fn fetch_list_decodes_records() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/api/v1/user")
            .with_header("content-type", "application/json")
            .with_body(
                json!([
                    {"_id": "u1", "firstName": "Ada", "lastName": "Lovelace", "email": "ada@example.com"},
                    {"_id": "u2", "firstName": "Alan", "lastName": "Turing", "email": "alan@example.com"}
                ])
                .to_string(),
            )
            .create();

        let users: Vec<User> = client_for(&server).fetch_list(Resource::User).unwrap();

        mock.assert();
        assert_eq!(users.len(), 2);
        assert_eq!(users[1].display_name(), "Alan Turing");
    }

    #[test]
    fn partial_record_is_skipped_and_the_rest_kept() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/api/v1/studio")
            .with_body(
                json!([
                    {"_id": "s1", "name": "A", "description": "", "location": "NY", "memberIds": ["u1"]},
                    {"_id": "s2", "name": "B", "memberIds": []}
                ])
                .to_string(),
            )
            .create();

        let studios: Vec<Studio> = client_for(&server).fetch_list(Resource::Studio).unwrap();

        assert_eq!(studios.len(), 1);
        assert_eq!(studios[0].id.as_deref(), Some("s1"));
    }

    #[test]
    fn non_success_status_is_an_error() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/api/v1/studio")
            .with_status(500)
            .with_body("boom")
            .create();

        let err = client_for(&server).fetch_list::<Studio>(Resource::Studio).unwrap_err();

        match err {
            ApiError::Status { status, body, .. } => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[test]
    fn unreachable_backend_is_a_transport_error() {
        let api = ApiClient::new(&ApiConfig {
            base_url: "http://127.0.0.1:1/api/v1".into(),
        })
        .unwrap();

        let err = api.fetch_list::<User>(Resource::User).unwrap_err();
        assert!(matches!(err, ApiError::Transport { .. }));
    }

    #[test]
    fn body_that_is_not_a_list_is_a_decode_error() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/api/v1/user")
            .with_body(r#"{"not": "a list"}"#)
            .create();

        let err = client_for(&server).fetch_list::<User>(Resource::User).unwrap_err();
        assert!(matches!(err, ApiError::Decode { .. }));
    }

    #[test]
    fn create_record_posts_json_and_returns_created() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/api/v1/user")
            .match_body(Matcher::Json(json!({
                "firstName": "Grace", "lastName": "Hopper", "email": "grace@example.com"
            })))
            .with_status(201)
            .with_body(
                json!({"_id": "u9", "firstName": "Grace", "lastName": "Hopper", "email": "grace@example.com"})
                    .to_string(),
            )
            .create();

        let payload = User {
            id: None,
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
            email: "grace@example.com".into(),
        };
        let created = client_for(&server).create_record(Resource::User, &payload).unwrap();

        mock.assert();
        assert_eq!(created["_id"], "u9");
    }

    #[test]
    fn created_body_of_any_shape_is_success() {
        let mut server = mockito::Server::new();
        let _partial = server
            .mock("POST", "/api/v1/studio")
            .with_status(201)
            .with_body(r#"{"_id":"s1","name":"Alpha","memberIds":["u1"]}"#)
            .create();
        let _plain = server
            .mock("POST", "/api/v1/user")
            .with_status(200)
            .with_body("created")
            .create();
        let api = client_for(&server);

        let studio = api.create_record(Resource::Studio, &json!({"name": "Alpha"})).unwrap();
        let user = api.create_record(Resource::User, &json!({"email": "a@b.c"})).unwrap();

        assert_eq!(studio, json!({"_id": "s1", "name": "Alpha", "memberIds": ["u1"]}));
        assert_eq!(user, json!("created"));
    }
}
