use serde::{Deserialize, Serialize};

use super::RepositoryPath;

/// Prefix of the SSH clone URL, followed by the repository full name.
pub const SSH_CLONE_URL_PREFIX: &str = "git@github.com:";

const BRANCH_SHORT_MAX_LEN: usize = 10;
const COMMIT_SHORT_LEN: usize = 7;

/// Message published on the build topic.
///
/// Field order is the serialization order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BuildMessage {
    pub repo: String,
    pub branch: String,
    pub branch_short: String,
    pub ssh_clone_url: String,
    pub tag1: String,
    pub tag2: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag3: Option<String>,
}

impl BuildMessage {
    pub fn new(repo_name: &str, repo_full_name: &str, branch: &str, commit: Option<&str>) -> Self {
        Self {
            repo: repo_name.to_owned(),
            branch: branch.to_owned(),
            branch_short: shorten_branch(branch),
            ssh_clone_url: format!("{SSH_CLONE_URL_PREFIX}{repo_full_name}"),
            tag1: repo_name.to_owned(),
            tag2: branch.replace('/', "-"),
            tag3: commit.map(shorten_commit),
        }
    }

    /// Message for a manual trigger, without a webhook event.
    pub fn from_repository(repo: &RepositoryPath, branch: &str, commit: Option<&str>) -> Self {
        Self::new(repo.name(), &repo.full_name(), branch, commit)
    }

    /// UTF-8 JSON representation, as sent on the wire.
    pub fn to_payload(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

/// Last `/` segment, truncated to 10 characters.
pub fn shorten_branch(branch: &str) -> String {
    let segment = branch.rsplit('/').next().unwrap_or(branch);
    segment.chars().take(BRANCH_SHORT_MAX_LEN).collect()
}

/// First 7 characters of a commit hash.
pub fn shorten_commit(hash: &str) -> String {
    hash.chars().take(COMMIT_SHORT_LEN).collect()
}
