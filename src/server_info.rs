use serde::Serialize;

use crate::config::Config;

pub const APP_NAME: &str = "buildhook";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Serialize)]
pub struct ServerInfo {
    message: String,
    version: String,
    topic: Option<String>,
    active_branches: Vec<String>,
}

impl ServerInfo {
    pub fn new(config: &Config) -> Self {
        Self {
            message: format!("{}, ready to dispatch builds!", APP_NAME),
            version: APP_VERSION.into(),
            topic: config.pubsub_topic().map(|t| t.to_owned()),
            active_branches: config.active_branches().as_slice().to_vec(),
        }
    }
}
