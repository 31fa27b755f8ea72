//! Webhook-triggered build dispatch.
//!
//! Receives Bitbucket `repo:push` events, derives a build message and
//! publishes it on a Pub/Sub topic for a downstream build system.

pub mod backends;
pub mod build;
pub mod cmdargs;
pub mod config;
pub mod crypto;
pub mod error;
pub mod http;
pub mod logging;
pub mod pubsub;
pub mod server_info;
pub mod service;
