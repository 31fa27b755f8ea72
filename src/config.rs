use std::{net::SocketAddr, str::FromStr};

use url::Url;

use crate::build::ActiveBranches;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Malformed bind IP: '{0}'. Make sure you entered a valid IP.")]
    MalformedBindIp(String),
    #[error("Malformed URL for {0}: '{1}'.")]
    MalformedUrl(&'static str, String),
}

#[derive(Debug, Clone)]
pub struct Config {
    telemetry_url: Option<String>,
    webhook_secret: Option<String>,
    bind_ip: String,
    pubsub_topic: Option<String>,
    active_branches: ActiveBranches,
    project_id: Option<String>,
    pubsub_api_url: String,
    pubsub_token: Option<String>,
    emulator_host: Option<String>,
    metadata_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            telemetry_url: env_to_str("BH_TELEMETRY_URL"),
            webhook_secret: env_to_str("BH_WEBHOOK_SECRET"),
            bind_ip: env_to_str("BH_BIND_IP").unwrap_or_else(|| "127.0.0.1:3000".into()),
            pubsub_topic: env_to_str("PUB_SUB_TOPIC"),
            active_branches: env_to_str("ACTIVE_BRANCHES")
                .map(|v| ActiveBranches::parse(&v))
                .unwrap_or_default(),
            project_id: env_to_str("GOOGLE_CLOUD_PROJECT"),
            pubsub_api_url: env_to_str("BH_PUBSUB_API_URL")
                .unwrap_or_else(|| "https://pubsub.googleapis.com".into()),
            pubsub_token: env_to_str("BH_PUBSUB_TOKEN"),
            emulator_host: env_to_str("PUBSUB_EMULATOR_HOST"),
            metadata_url: env_to_str("BH_METADATA_URL")
                .unwrap_or_else(|| "http://metadata.google.internal".into()),
        }
    }

    pub fn empty() -> Self {
        Self {
            telemetry_url: None,
            webhook_secret: None,
            bind_ip: "".into(),
            pubsub_topic: None,
            active_branches: ActiveBranches::default(),
            project_id: None,
            pubsub_api_url: "".into(),
            pubsub_token: None,
            emulator_host: None,
            metadata_url: "".into(),
        }
    }

    pub fn telemetry_url(&self) -> Option<&str> {
        self.telemetry_url.as_deref()
    }

    pub fn webhook_secret(&self) -> Option<&str> {
        self.webhook_secret.as_deref()
    }

    pub fn bind_ip(&self) -> &str {
        &self.bind_ip
    }

    pub fn pubsub_topic(&self) -> Option<&str> {
        self.pubsub_topic.as_deref()
    }

    pub fn active_branches(&self) -> &ActiveBranches {
        &self.active_branches
    }

    pub fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }

    pub fn pubsub_api_url(&self) -> &str {
        &self.pubsub_api_url
    }

    pub fn pubsub_token(&self) -> Option<&str> {
        self.pubsub_token.as_deref()
    }

    pub fn emulator_host(&self) -> Option<&str> {
        self.emulator_host.as_deref()
    }

    pub fn metadata_url(&self) -> &str {
        &self.metadata_url
    }

    pub fn set_telemetry_url<T: Into<String>>(&mut self, value: T) {
        self.telemetry_url = Some(value.into());
    }

    pub fn set_webhook_secret<T: Into<String>>(&mut self, value: T) {
        self.webhook_secret = Some(value.into());
    }

    pub fn set_bind_ip<T: Into<String>>(&mut self, value: T) {
        self.bind_ip = value.into();
    }

    /// An empty value unsets the topic.
    pub fn set_pubsub_topic<T: Into<String>>(&mut self, value: T) {
        let value: String = value.into();
        self.pubsub_topic = Some(value).filter(|s| !s.is_empty());
    }

    pub fn set_active_branches(&mut self, value: &str) {
        self.active_branches = ActiveBranches::parse(value);
    }

    pub fn set_project_id<T: Into<String>>(&mut self, value: T) {
        self.project_id = Some(value.into());
    }

    pub fn set_pubsub_api_url<T: Into<String>>(&mut self, value: T) {
        self.pubsub_api_url = value.into();
    }

    pub fn set_pubsub_token<T: Into<String>>(&mut self, value: T) {
        self.pubsub_token = Some(value.into());
    }

    pub fn set_emulator_host<T: Into<String>>(&mut self, value: T) {
        self.emulator_host = Some(value.into());
    }

    pub fn set_metadata_url<T: Into<String>>(&mut self, value: T) {
        self.metadata_url = value.into();
    }

    /// Startup checks. A missing topic is not an error here: it is reported per request.
    pub fn validate_configuration(&self) -> Result<(), ConfigError> {
        let _ = SocketAddr::from_str(&self.bind_ip)
            .map_err(|_| ConfigError::MalformedBindIp(self.bind_ip.clone()))?;

        if self.emulator_host.is_none() {
            let _ = Url::parse(&self.pubsub_api_url).map_err(|_| {
                ConfigError::MalformedUrl("Pub/Sub API", self.pubsub_api_url.clone())
            })?;

            if self.pubsub_token.is_none() {
                let _ = Url::parse(&self.metadata_url).map_err(|_| {
                    ConfigError::MalformedUrl("metadata server", self.metadata_url.clone())
                })?;
            }
        }

        Ok(())
    }
}

fn env_to_str(env_key: &str) -> Option<String> {
    std::env::var(env_key).ok().filter(|s| !s.is_empty())
}
