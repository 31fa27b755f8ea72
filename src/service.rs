use std::sync::Arc;

use crate::{
    config::Config,
    pubsub::{PubSubClient, PubSubError, Publisher},
};

/// Process-wide services, built once at startup and shared by every request.
#[derive(Debug, Clone)]
pub struct ServiceHandler {
    publisher: Arc<dyn Publisher>,
}

impl ServiceHandler {
    pub fn new(publisher: Arc<dyn Publisher>) -> Self {
        Self { publisher }
    }

    pub fn new_defaults(config: &Config) -> Result<Self, PubSubError> {
        Ok(Self {
            publisher: Arc::new(PubSubClient::from_config(config)?),
        })
    }

    pub fn publisher(&self) -> &dyn Publisher {
        self.publisher.as_ref()
    }
}
