use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use tracing::Span;

use crate::error::AppError;
use crate::errors::ErrorCode;

pub const MAX_CHANNEL_ID_LEN: usize = 64;

/// Channel id from the `{channel_id}` path segment.
///
/// Accepts 1 to 64 ASCII alphanumerics, `-` or `_`. Records the id on the
/// current request span.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ChannelId(pub String);

impl ChannelId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn parse(raw: &str) -> Result<Self, AppError> {
        if raw.is_empty() || raw.len() > MAX_CHANNEL_ID_LEN {
            return Err(AppError::bad_request(
                ErrorCode::InvalidChannelId,
                format!("Channel id must be 1-{MAX_CHANNEL_ID_LEN} characters"),
            ));
        }
        if !raw
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
        {
            return Err(AppError::bad_request(
                ErrorCode::InvalidChannelId,
                format!("Invalid channel id: {raw}"),
            ));
        }
        Ok(Self(raw.to_string()))
    }
}

impl FromRequest for ChannelId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = req
            .match_info()
            .get("channel_id")
            .ok_or_else(|| {
                AppError::bad_request(ErrorCode::InvalidChannelId, "Missing channel_id parameter")
            })
            .and_then(ChannelId::parse)
            .inspect(|id| {
                Span::current().record("channel_id", id.as_str());
            });
        ready(result)
    }
}
