use serde::{Deserialize, Serialize};

use crate::{build::BuildMessage, error::ErrorCode};

/// `repo:push` event. Only the fields used to derive a build message are modeled.
#[derive(Debug, Deserialize, Serialize)]
pub struct PushEvent {
    pub repository: Repository,
    pub push: Push,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Repository {
    pub name: String,
    pub full_name: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Push {
    pub changes: Vec<Change>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Change {
    /// `None` when the branch was deleted.
    pub new: Option<Reference>,
    #[serde(default)]
    pub commits: Option<Vec<Commit>>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Reference {
    pub name: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Commit {
    pub hash: String,
}

impl PushEvent {
    /// Build message for the first change of the push.
    pub fn build_message(&self) -> Result<BuildMessage, ErrorCode> {
        let change = self.push.changes.first().ok_or_else(|| {
            ErrorCode::MalformedEventBodyField("push.changes".into(), "no change".into())
        })?;

        let branch = change.new.as_ref().map(|n| n.name.as_str()).ok_or_else(|| {
            ErrorCode::MalformedEventBodyField(
                "push.changes[0].new".into(),
                "no branch reference".into(),
            )
        })?;

        let commit = change
            .commits
            .as_deref()
            .and_then(|c| c.first())
            .map(|c| c.hash.as_str());

        Ok(BuildMessage::new(
            &self.repository.name,
            &self.repository.full_name,
            branch,
            commit,
        ))
    }
}
