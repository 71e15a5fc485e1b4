use crate::models::deployment::{DeploymentStatus, BUILD_STATE_FINISHED};

/// Whether a deploy has finished building.
///
/// The backend's state vocabulary is open-ended, so everything other than
/// `finished` is carried through as the raw string for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildPhase<'a> {
    Finished,
    Pending(&'a str),
}

pub fn resolve(status: &DeploymentStatus) -> BuildPhase<'_> {
    if status.build_state == BUILD_STATE_FINISHED {
        BuildPhase::Finished
    } else {
        BuildPhase::Pending(&status.build_state)
    }
}

pub fn should_fetch_health(status: &DeploymentStatus) -> bool {
    resolve(status) == BuildPhase::Finished
}
