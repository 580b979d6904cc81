use std::future::Future;
use std::ops::Deref;
use std::pin::Pin;

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use bytes::BytesMut;
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use serde_json::error::Category;
use tracing::{debug, warn};

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::web::trace_ctx;

/// Upper bound for a command body. Every command is a handful of ids and
/// one short value.
pub const MAX_COMMAND_BODY: usize = 4 * 1024;

/// JSON command body whose failures render as Problem Details.
///
/// Oversized bodies, parse errors and type errors all become a 400
/// `BAD_REQUEST` with a sanitized detail instead of actix's plain-text JSON
/// error.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> FromRequest for ValidatedJson<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let mut payload = payload.take();
        let route = req.path().to_string();

        Box::pin(async move {
            let body = read_body(&mut payload, MAX_COMMAND_BODY).await?;
            serde_json::from_slice::<T>(&body)
                .map(ValidatedJson)
                .map_err(|e| {
                    debug!(
                        trace_id = %trace_ctx::trace_id(),
                        route = %route,
                        error = %e,
                        body_size = body.len(),
                        "Command body rejected"
                    );
                    AppError::bad_request(ErrorCode::BadRequest, rejection_detail(&e))
                })
        })
    }
}

async fn read_body(payload: &mut Payload, limit: usize) -> Result<BytesMut, AppError> {
    let mut body = BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk.map_err(|e| {
            warn!(trace_id = %trace_ctx::trace_id(), error = %e, "Failed to read request body");
            AppError::bad_request(ErrorCode::BadRequest, "Failed to read request body")
        })?;
        if body.len() + chunk.len() > limit {
            return Err(AppError::bad_request(
                ErrorCode::BadRequest,
                format!("Request body exceeds {limit} bytes"),
            ));
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

/// Client-facing detail for a rejected body; never echoes body content.
fn rejection_detail(error: &serde_json::Error) -> String {
    match error.classify() {
        Category::Syntax => format!("Invalid JSON at line {}", error.line()),
        // from_slice never does I/O; a short read is the only way to get here
        Category::Eof | Category::Io => "Invalid JSON: unexpected end of input".to_string(),
        Category::Data => "Invalid JSON: wrong types for one or more fields".to_string(),
    }
}
