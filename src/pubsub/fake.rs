use std::any::Any;

use async_trait::async_trait;
use pseudo::Mock;

use crate::service::ServiceHandler;

use super::{PubSubError, Publisher};

#[derive(Debug)]
pub struct FakePublisher {
    pub publish: Mock<(String, Vec<u8>), Result<String, PubSubError>>,
}

impl FakePublisher {
    pub fn new() -> Self {
        Self {
            publish: Mock::new(Ok("1".into())),
        }
    }

    /// Payloads received so far, decoded as JSON.
    pub fn published_json(&self) -> Vec<serde_json::Value> {
        self.publish
            .calls()
            .into_iter()
            .map(|(_, payload)| serde_json::from_slice(&payload).unwrap())
            .collect()
    }

    pub fn extract(services: &ServiceHandler) -> &FakePublisher {
        services
            .publisher()
            .as_any()
            .downcast_ref::<FakePublisher>()
            .unwrap()
    }
}

#[async_trait]
impl Publisher for FakePublisher {
    async fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<String, PubSubError> {
        self.publish.call((topic.to_owned(), payload))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
