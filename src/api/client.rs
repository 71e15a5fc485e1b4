use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::api::protocol::{DataEnvelope, ErrorResponse};
use crate::api::{Endpoint, StatusSource};
use crate::config::GlobalConfig;
use crate::error::ForgeError;
use crate::models::project::{Organization, ProjectIdentity};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(config: &GlobalConfig) -> Result<Self, ForgeError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            token: config.token().map(str::to_string),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn request(&self, method: Method, path: &str) -> Result<Vec<u8>, ForgeError> {
        let url = self.url(path);
        tracing::debug!("{} {}", method, url);

        let mut req = self.http.request(method, &url);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }

        let response = req.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(api_error(status, &body));
        }

        Ok(body.to_vec())
    }

    async fn get_data<T: DeserializeOwned>(&self, path: &str) -> Result<T, ForgeError> {
        let body = self.request(Method::GET, path).await?;
        let envelope: DataEnvelope<T> = serde_json::from_slice(&body)?;
        Ok(envelope.data)
    }

    pub async fn get_organization(&self, org_id: &str) -> Result<Organization, ForgeError> {
        self.get_data(&format!("/api/organization/{}", org_id)).await
    }

    pub async fn get_project(
        &self,
        org_id: &str,
        project_id: &str,
    ) -> Result<ProjectIdentity, ForgeError> {
        self.get_data(&format!(
            "/api/organization/{}/project/{}",
            org_id, project_id
        ))
        .await
    }

    pub async fn deploy(&self, org_id: &str, project_id: &str) -> Result<(), ForgeError> {
        self.request(
            Method::POST,
            &format!("/api/organization/{}/project/{}/deploy", org_id, project_id),
        )
        .await?;
        Ok(())
    }

    pub async fn destroy(&self, org_id: &str, project_id: &str) -> Result<(), ForgeError> {
        self.request(
            Method::POST,
            &format!("/api/organization/{}/project/{}/destroy", org_id, project_id),
        )
        .await?;
        Ok(())
    }
}

#[async_trait]
impl StatusSource for ApiClient {
    async fn fetch(&self, endpoint: Endpoint, project_id: &str) -> Result<Vec<u8>, ForgeError> {
        self.request(Method::GET, &endpoint.path(project_id)).await
    }
}

fn api_error(status: StatusCode, body: &[u8]) -> ForgeError {
    let message = match serde_json::from_slice::<ErrorResponse>(body) {
        Ok(err) => err.error,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("unexpected response")
            .to_string(),
    };
    ForgeError::Api {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_urls() {
        let config = GlobalConfig {
            api_url: "http://localhost:8001/".to_string(),
            ..GlobalConfig::default()
        };
        let client = ApiClient::new(&config).unwrap();
        assert_eq!(
            client.url(&Endpoint::DeploymentStatus.path("prj-1")),
            "http://localhost:8001/api/deployment/prj-1"
        );
        assert_eq!(
            client.url(&Endpoint::Health.path("prj-1")),
            "http://localhost:8001/api/health/prj-1"
        );
    }

    #[test]
    fn test_api_error_message() {
        let err = api_error(StatusCode::FORBIDDEN, br#"{"message": "token expired"}"#);
        assert!(matches!(
            err,
            ForgeError::Api { status: 403, ref message } if message == "token expired"
        ));

        let err = api_error(StatusCode::BAD_GATEWAY, b"<html></html>");
        assert_eq!(err.to_string(), "API returned 502: Bad Gateway");
    }
}
