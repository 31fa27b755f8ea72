pub mod middleware;

use axum::{extract::Extension, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    build::{BuildMessage, BuildTrigger},
    config::Config,
    error::ErrorCode,
    service::ServiceHandler,
};

use super::PushEvent;

const PUBLISHED_MESSAGE: &str = "Message published.";

/// Successful webhook response.
#[derive(Debug, Serialize)]
pub struct PublishReceipt {
    message: &'static str,
    message_id: String,
    build: BuildMessage,
    payload: Value,
}

fn pretty_print_json(s: &str) -> String {
    serde_json::from_str::<Value>(s)
        .and_then(|n| serde_json::to_string_pretty(&n))
        .unwrap_or_default()
}

#[tracing::instrument(skip(config, services, body), fields(body_pretty = %pretty_print_json(&body)))]
pub async fn webhook(
    config: Extension<Config>,
    services: Extension<ServiceHandler>,
    body: String,
) -> Result<Json<PublishReceipt>, ErrorCode> {
    let trigger = BuildTrigger::from_config(&config)?;

    let payload: Value = parse_body(&body)?;
    let push_event: PushEvent = parse_body(&body)?;
    let build = push_event.build_message().map_err(log_rejection)?;

    let message_id = trigger.dispatch(&services, &build).await?;

    Ok(Json(PublishReceipt {
        message: PUBLISHED_MESSAGE,
        message_id,
        build,
        payload,
    }))
}

fn parse_body<'a, T: Deserialize<'a>>(body: &'a str) -> Result<T, ErrorCode> {
    serde_json::from_str(body)
        .map_err(ErrorCode::MalformedEventBody)
        .map_err(log_rejection)
}

fn log_rejection(err: ErrorCode) -> ErrorCode {
    tracing::error!("{}", err);
    err
}
