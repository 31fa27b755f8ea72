use axum::http::StatusCode;
use serde::Serialize;
use thiserror::Error;

use crate::build::BuildError;

#[derive(Debug, Error)]
pub enum ErrorCode {
    InvalidSignature,
    MalformedEventBody(#[from] serde_json::Error),
    MalformedEventBodyField(String, String),
    MissingTopicConfiguration,
    InactiveBranch(String),
    PublishFailed(String),
    UnhandledError(String),
}

#[derive(Serialize)]
pub struct ErrorCodeDetail {
    #[serde(skip)]
    status_code: StatusCode,
    internal_code: u32,
    message: String,
}

impl ErrorCode {
    pub fn details(&self) -> ErrorCodeDetail {
        self.into()
    }
}

impl ErrorCodeDetail {
    pub fn with_status_code<T: Into<String>>(
        status_code: StatusCode,
        internal_code: u32,
        message: T,
    ) -> Self {
        Self {
            internal_code,
            status_code,
            message: message.into(),
        }
    }

    pub fn bad_request<T: Into<String>>(internal_code: u32, message: T) -> Self {
        Self::with_status_code(StatusCode::BAD_REQUEST, internal_code, message)
    }

    pub fn server_error<T: Into<String>>(internal_code: u32, message: T) -> Self {
        Self::with_status_code(StatusCode::INTERNAL_SERVER_ERROR, internal_code, message)
    }

    pub fn status_code(&self) -> StatusCode {
        self.status_code
    }

    pub fn internal_code(&self) -> u32 {
        self.internal_code
    }
}

impl From<&ErrorCode> for ErrorCodeDetail {
    fn from(value: &ErrorCode) -> Self {
        match value {
            ErrorCode::InvalidSignature => Self::bad_request(1, "Invalid X-Hub-Signature signature"),
            ErrorCode::MalformedEventBody(e) => {
                Self::bad_request(2, format!("Malformed event body: '{}'", e))
            }
            ErrorCode::MalformedEventBodyField(field, e) => Self::bad_request(
                3,
                format!("Malformed event body field '{}': '{}'", field, e),
            ),
            ErrorCode::InactiveBranch(e) => Self::bad_request(4, e),
            ErrorCode::MissingTopicConfiguration => {
                Self::server_error(10, "The env var PUB_SUB_TOPIC is not set")
            }
            ErrorCode::PublishFailed(e) => {
                Self::server_error(11, format!("Publish failed: '{}'", e))
            }
            ErrorCode::UnhandledError(e) => {
                Self::server_error(99, format!("Unhandled error: '{}'", e))
            }
        }
    }
}

impl From<BuildError> for ErrorCode {
    fn from(value: BuildError) -> Self {
        match value {
            BuildError::MissingTopic => Self::MissingTopicConfiguration,
            e @ BuildError::InactiveBranch { .. } => Self::InactiveBranch(e.to_string()),
            BuildError::Publish(e) => Self::PublishFailed(e.to_string()),
            e => Self::UnhandledError(e.to_string()),
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let detail = ErrorCodeDetail::from(self);
        f.write_str(&detail.message)
    }
}
