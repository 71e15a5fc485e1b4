use serde::{Deserialize, Serialize};

/// Identity of the selected project, used for report header lines.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ProjectIdentity {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub repo_url: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Organization {
    pub id: String,
    pub name: String,
    pub slug: String,
}
