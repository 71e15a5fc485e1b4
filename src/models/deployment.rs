use chrono::{DateTime, FixedOffset};

/// Build state the backend reports once a deploy has completed.
pub const BUILD_STATE_FINISHED: &str = "finished";

/// Latest deploy operation for a project, as reported by the status API.
#[derive(Debug, Clone, PartialEq)]
pub struct DeploymentStatus {
    pub project_id: String,
    pub kind: String,
    pub executor_id: String,
    pub execution_time: DateTime<FixedOffset>,
    pub build_number: i64,
    pub build_time: DateTime<FixedOffset>,
    pub build_state: String,
}

/// Result of decoding a deployment-status document.
#[derive(Debug, Clone, PartialEq)]
pub enum Deployment {
    /// The project has never been deployed.
    Absent,
    Deployed(DeploymentStatus),
}
