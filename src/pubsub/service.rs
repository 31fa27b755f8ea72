use std::any::Any;

use async_trait::async_trait;

use super::PubSubError;

/// Topic publish capability.
#[async_trait]
pub trait Publisher: std::fmt::Debug + Send + Sync {
    /// Publish `payload` on `topic`, returning the message ID assigned by the bus.
    async fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<String, PubSubError>;

    fn as_any(&self) -> &dyn Any;
}
