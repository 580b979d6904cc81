use actix_web::web;

use crate::error::AppError;
use crate::errors::ErrorCode;

pub mod commands;
pub mod health;
pub mod veto;

/// Register every route. `main` and the integration tests share this.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/health").configure(health::configure_routes));
    cfg.service(web::scope("/api/commands").configure(commands::configure_routes));
    cfg.service(web::scope("/api/channels").configure(veto::configure_routes));
}

/// Fallback for unmatched paths, rendered as Problem Details.
pub async fn not_found() -> Result<actix_web::HttpResponse, AppError> {
    Err(AppError::not_found(ErrorCode::NotFound, "No such endpoint"))
}
