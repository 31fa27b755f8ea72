use std::{any::Any, time::Duration};

use async_trait::async_trait;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::{
    config::Config,
    server_info::{APP_NAME, APP_VERSION},
};

use super::{PubSubError, Publisher};

const TOKEN_PATH: &str = "/computeMetadata/v1/instance/service-accounts/default/token";
const PROJECT_ID_PATH: &str = "/computeMetadata/v1/project/project-id";

/// How publish requests are authenticated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    /// No authorization header (emulator).
    Anonymous,
    /// Static bearer token.
    Token(String),
    /// Token fetched from the metadata server at this root URL.
    MetadataServer(String),
}

/// Pub/Sub REST client.
#[derive(Debug)]
pub struct PubSubClient {
    client: reqwest::Client,
    api_url: String,
    project_id: Option<String>,
    credentials: Credentials,
}

#[derive(Serialize)]
struct PublishRequest {
    messages: Vec<PubSubMessage>,
}

#[derive(Serialize)]
struct PubSubMessage {
    data: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PublishResponse {
    #[serde(default)]
    message_ids: Vec<String>,
}

#[derive(Deserialize)]
struct AccessToken {
    access_token: String,
}

impl PubSubClient {
    pub fn new<T: Into<String>>(
        api_url: T,
        project_id: Option<String>,
        credentials: Credentials,
    ) -> Result<Self, PubSubError> {
        let client = reqwest::ClientBuilder::new()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("{APP_NAME}/{APP_VERSION}"))
            .build()
            .map_err(|e| PubSubError::CouldNotBuildClient(e.to_string()))?;
        let api_url: String = api_url.into();

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_owned(),
            project_id,
            credentials,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, PubSubError> {
        let project_id = config.project_id().map(|p| p.to_owned());

        if let Some(host) = config.emulator_host() {
            return Self::new(format!("http://{host}"), project_id, Credentials::Anonymous);
        }

        let credentials = match config.pubsub_token() {
            Some(token) => Credentials::Token(token.to_owned()),
            None => Credentials::MetadataServer(config.metadata_url().to_owned()),
        };

        Self::new(config.pubsub_api_url(), project_id, credentials)
    }

    /// Qualify a topic as `projects/<project>/topics/<topic>`.
    ///
    /// Without a configured project, the project is asked to the metadata
    /// server when the client authenticates through it.
    pub async fn topic_path(&self, topic: &str) -> Result<String, PubSubError> {
        if topic.starts_with("projects/") {
            return Ok(topic.to_owned());
        }

        let project = match (&self.project_id, &self.credentials) {
            (Some(project), _) => project.clone(),
            (None, Credentials::MetadataServer(root_url)) => {
                self.metadata_project_id(root_url).await?
            }
            (None, _) => return Err(PubSubError::UnresolvedTopic(topic.to_owned())),
        };

        Ok(format!("projects/{project}/topics/{topic}"))
    }

    async fn metadata_project_id(&self, root_url: &str) -> Result<String, PubSubError> {
        let root_url = root_url.trim_end_matches('/');
        let project = self
            .client
            .get(format!("{root_url}{PROJECT_ID_PATH}"))
            .header("Metadata-Flavor", "Google")
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| PubSubError::CouldNotFetchProject(e.to_string()))?
            .text()
            .await
            .map_err(|e| PubSubError::CouldNotFetchProject(e.to_string()))?;

        let project = project.trim();
        if project.is_empty() {
            return Err(PubSubError::CouldNotFetchProject("empty project ID".into()));
        }

        Ok(project.to_owned())
    }

    async fn access_token(&self) -> Result<Option<String>, PubSubError> {
        match &self.credentials {
            Credentials::Anonymous => Ok(None),
            Credentials::Token(token) => Ok(Some(token.clone())),
            Credentials::MetadataServer(root_url) => {
                let root_url = root_url.trim_end_matches('/');
                let token: AccessToken = self
                    .client
                    .get(format!("{root_url}{TOKEN_PATH}"))
                    .header("Metadata-Flavor", "Google")
                    .send()
                    .await
                    .and_then(|r| r.error_for_status())
                    .map_err(|e| PubSubError::CouldNotFetchToken(e.to_string()))?
                    .json()
                    .await
                    .map_err(|e| PubSubError::CouldNotFetchToken(e.to_string()))?;

                Ok(Some(token.access_token))
            }
        }
    }
}

#[async_trait]
impl Publisher for PubSubClient {
    #[tracing::instrument(skip(self, payload), fields(payload_len = payload.len()))]
    async fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<String, PubSubError> {
        let topic_path = self.topic_path(topic).await?;
        let data = PublishRequest {
            messages: vec![PubSubMessage {
                data: base64::engine::general_purpose::STANDARD.encode(payload),
            }],
        };

        let root_url = &self.api_url;
        let mut request = self
            .client
            .post(format!("{root_url}/v1/{topic_path}:publish"))
            .json(&data);
        if let Some(token) = self.access_token().await? {
            request = request.bearer_auth(token);
        }

        let resp = request
            .send()
            .await
            .map_err(|e| PubSubError::CouldNotPublish(e.to_string()))?;

        let response: PublishResponse = resp
            .error_for_status()
            .map_err(|e| PubSubError::BadStatusCode(e.to_string()))?
            .json()
            .await
            .map_err(|e| PubSubError::MalformedResponse(e.to_string()))?;

        let message_id = response
            .message_ids
            .into_iter()
            .next()
            .ok_or_else(|| PubSubError::MalformedResponse("no message ID returned".into()))?;

        tracing::info!(
            message = "Message published",
            topic = %topic_path,
            message_id = %message_id
        );

        Ok(message_id)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
