pub mod build_state;
pub mod deployment;
pub mod error;
pub mod fields;
pub mod health;
pub mod report;

use crate::api::{Endpoint, StatusSource};
use crate::error::ForgeError;
use crate::models::deployment::Deployment;
use crate::models::health::InstanceHealth;
use crate::models::project::ProjectIdentity;
use crate::status::report::StatusReport;

/// Decoded documents for one status query.
#[derive(Debug, Clone)]
pub struct StatusSnapshot {
    pub project: ProjectIdentity,
    pub deployment: Deployment,
    /// `None` unless the build finished and health was fetched.
    pub instances: Option<Vec<InstanceHealth>>,
}

impl StatusSnapshot {
    pub fn report(&self) -> StatusReport<'_> {
        StatusReport {
            project: &self.project,
            deployment: &self.deployment,
            instances: self.instances.as_deref(),
        }
    }
}

/// Fetch and decode the deployment status of `project`, then its health if
/// the build has finished. Any transport or decode failure ends the run.
pub async fn run<S>(source: &S, project: ProjectIdentity) -> Result<StatusSnapshot, ForgeError>
where
    S: StatusSource + ?Sized,
{
    let raw = source.fetch(Endpoint::DeploymentStatus, &project.id).await?;
    let deployment = deployment::decode(&raw, &project.id).map_err(|e| logged(&project.id, e))?;

    let fetch_health = match &deployment {
        Deployment::Absent => {
            tracing::debug!(project_id = %project.id, "project has not been deployed");
            false
        }
        Deployment::Deployed(status) => {
            tracing::debug!(
                project_id = %project.id,
                build_number = status.build_number,
                build_state = %status.build_state,
                "decoded deployment status"
            );
            build_state::should_fetch_health(status)
        }
    };
    if !fetch_health {
        return Ok(StatusSnapshot {
            project,
            deployment,
            instances: None,
        });
    }

    let raw = source.fetch(Endpoint::Health, &project.id).await?;
    let instances = health::decode(&raw).map_err(|e| logged(&project.id, e))?;
    tracing::debug!(project_id = %project.id, instances = instances.len(), "decoded health");

    Ok(StatusSnapshot {
        project,
        deployment,
        instances: Some(instances),
    })
}

fn logged(project_id: &str, e: error::DecodeError) -> error::DecodeError {
    tracing::warn!(
        project_id,
        stage = e.stage().as_str(),
        field = e.field().unwrap_or("-"),
        "{}",
        e
    );
    e
}
