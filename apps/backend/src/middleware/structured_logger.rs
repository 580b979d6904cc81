use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::{Error as ActixError, HttpMessage, HttpRequest};
use futures_util::future::LocalBoxFuture;
use tracing::{error, info, warn};

/// Access log: one `request_completed` line per request, tagged with the
/// matched route template and, on channel routes, the channel id. Level
/// follows the status class.
pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let method = req.method().clone();
        let path = req.path().to_string();
        let trace_id = req
            .extensions()
            .get::<String>()
            .cloned()
            .unwrap_or_else(|| "unknown".to_string());

        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;
            // routing has run by now, so the response's request knows its pattern
            let line = match &result {
                Ok(res) => AccessLine::matched(res.request(), res.status()),
                Err(err) => AccessLine {
                    route: path,
                    channel_id: None,
                    status: err.as_response_error().status_code(),
                },
            };
            line.emit(
                method.as_str(),
                start.elapsed().as_micros() as u64,
                &trace_id,
            );
            result
        })
    }
}

struct AccessLine {
    route: String,
    channel_id: Option<String>,
    status: StatusCode,
}

impl AccessLine {
    fn matched(req: &HttpRequest, status: StatusCode) -> Self {
        Self {
            // unrouted requests (404s) fall back to the raw path
            route: req
                .match_pattern()
                .unwrap_or_else(|| req.path().to_string()),
            channel_id: req.match_info().get("channel_id").map(str::to_string),
            status,
        }
    }

    fn emit(&self, method: &str, duration_us: u64, trace_id: &str) {
        let route = self.route.as_str();
        let channel_id = self.channel_id.as_deref().unwrap_or("-");
        let status_code = self.status.as_u16();
        if self.status.is_server_error() {
            error!(http.method = %method, http.route = %route, channel_id, http.status_code = status_code, duration_us, trace_id, "request_completed");
        } else if self.status.is_client_error() {
            warn!(http.method = %method, http.route = %route, channel_id, http.status_code = status_code, duration_us, trace_id, "request_completed");
        } else {
            info!(http.method = %method, http.route = %route, channel_id, http.status_code = status_code, duration_us, trace_id, "request_completed");
        }
    }
}
