mod client;
mod error;
mod service;

#[cfg(test)]
pub(crate) mod fake;

pub use self::client::{Credentials, PubSubClient};
pub use self::error::PubSubError;
pub use self::service::Publisher;
