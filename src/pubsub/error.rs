use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum PubSubError {
    #[error("Topic '{0}' is not a full topic path and no project is configured")]
    UnresolvedTopic(String),
    #[error("Could not build HTTP client: {0}")]
    CouldNotBuildClient(String),
    #[error("Could not fetch project ID: {0}")]
    CouldNotFetchProject(String),
    #[error("Could not fetch access token: {0}")]
    CouldNotFetchToken(String),
    #[error("Could not publish message: {0}")]
    CouldNotPublish(String),
    #[error("Error code received from Pub/Sub: {0}")]
    BadStatusCode(String),
    #[error("Malformed Pub/Sub response: {0}")]
    MalformedResponse(String),
}
