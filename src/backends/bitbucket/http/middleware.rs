use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use axum::{
    body::{Body, HttpBody},
    http::{Method, Request},
    response::{IntoResponse, Response},
};

use tower::{Layer, Service};

use crate::{crypto::is_valid_signature, error::ErrorCode};

const SIGNATURE_HEADER: &str = "X-Hub-Signature";
const SIGNATURE_PREFIX: &str = "sha256=";

/// Checks the HMAC-SHA256 signature of POST bodies when a secret is configured.
pub struct VerifySignatureLayer {
    secret: Option<String>,
}

impl VerifySignatureLayer {
    pub fn new(secret: Option<String>) -> Self {
        Self { secret }
    }
}

impl<S> Layer<S> for VerifySignatureLayer {
    type Service = VerifySignatureMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        VerifySignatureMiddleware::new(self.secret.clone(), inner)
    }
}

#[derive(Clone)]
pub struct VerifySignatureMiddleware<S> {
    secret: Option<String>,
    inner: S,
}

impl<S> VerifySignatureMiddleware<S> {
    pub fn new(secret: Option<String>, inner: S) -> Self {
        Self { secret, inner }
    }
}

type BoxFuture<'a, Output> = Pin<Box<dyn Future<Output = Output> + Send + 'a>>;

impl<S> Service<Request<Body>> for VerifySignatureMiddleware<S>
where
    S: Service<Request<Body>, Response = Response> + Send + 'static + Clone,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request<Body>) -> Self::Future {
        let mut inner = self.inner.clone();
        let secret = self.secret.clone();
        let fut = async move {
            let is_post = request.method() == Method::POST;
            if let (Some(secret), true) = (secret, is_post) {
                let signature = request
                    .headers()
                    .get(SIGNATURE_HEADER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.strip_prefix(SIGNATURE_PREFIX))
                    .map(|v| v.to_owned());

                let signature = match signature {
                    Some(s) => s,
                    None => {
                        tracing::error!("Missing or malformed {} header", SIGNATURE_HEADER);
                        return Ok(ErrorCode::InvalidSignature.into_response());
                    }
                };

                let mut body = Vec::<u8>::new();
                let request_body = request.body_mut();
                while let Some(chunk) = request_body.data().await {
                    match chunk {
                        Ok(d) => body.extend(d),
                        Err(e) => {
                            return Ok(ErrorCode::UnhandledError(e.to_string()).into_response())
                        }
                    }
                }

                if !is_valid_signature(&signature, &body, &secret) {
                    tracing::error!("Invalid webhook signature");
                    return Ok(ErrorCode::InvalidSignature.into_response());
                }

                *request.body_mut() = body.into();
            }

            let future = inner.call(request);
            let response: Response = future.await?;
            Ok(response)
        };

        Box::pin(fut)
    }
}
