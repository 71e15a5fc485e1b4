pub mod client;
pub mod protocol;

use async_trait::async_trait;

use crate::error::ForgeError;

pub use client::ApiClient;

/// Status API documents fetched by the status pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    DeploymentStatus,
    Health,
}

impl Endpoint {
    pub fn path(&self, project_id: &str) -> String {
        match self {
            Endpoint::DeploymentStatus => format!("/api/deployment/{}", project_id),
            Endpoint::Health => format!("/api/health/{}", project_id),
        }
    }
}

/// Supplies raw response bytes for a project's status documents.
#[async_trait]
pub trait StatusSource: Send + Sync {
    async fn fetch(&self, endpoint: Endpoint, project_id: &str) -> Result<Vec<u8>, ForgeError>;
}
