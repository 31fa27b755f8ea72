use thiserror::Error;

use crate::pubsub::PubSubError;

use super::ActiveBranches;

#[derive(Error, Debug, Clone)]
pub enum BuildError {
    #[error("The env var PUB_SUB_TOPIC is not set")]
    MissingTopic,
    #[error("{branch} is not present in the ACTIVE_BRANCHES env var ({active_branches}), skip")]
    InactiveBranch {
        branch: String,
        active_branches: ActiveBranches,
    },
    #[error("Could not serialize build message: {0}")]
    Serialization(String),
    #[error("Could not publish build message: {0}")]
    Publish(#[from] PubSubError),
    #[error("Malformed repository path: {0}")]
    MalformedRepositoryPath(String),
}
