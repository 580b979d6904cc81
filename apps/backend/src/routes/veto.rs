//! Channel-scoped veto endpoints. Every mutating call answers with the
//! messages the platform adapter should deliver, in order.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::state::{ActorId, ChoiceKind};
use crate::error::AppError;
use crate::extractors::{ChannelId, ValidatedJson};
use crate::services::{Outbound, StartCoinflip, VetoService};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StartCoinflipRequest {
    pub initiator_id: ActorId,
    #[serde(default)]
    pub opponent_id: Option<ActorId>,
    #[serde(default)]
    pub initiator_label: Option<String>,
    #[serde(default)]
    pub opponent_label: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CoinflipSideRequest {
    pub actor_id: ActorId,
    pub side: String,
}

#[derive(Debug, Deserialize)]
pub struct FormatRequest {
    pub actor_id: ActorId,
    pub format: String,
}

#[derive(Debug, Deserialize)]
pub struct VetoChoiceRequest {
    pub actor_id: ActorId,
    /// Kind of prompt being answered; a stale prompt is rejected.
    pub step: ChoiceKind,
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct MessagesResponse {
    pub messages: Vec<Outbound>,
}

fn service(app_state: &web::Data<AppState>) -> VetoService {
    app_state.veto_service()
}

fn messages(messages: Vec<Outbound>) -> HttpResponse {
    HttpResponse::Ok().json(MessagesResponse { messages })
}

async fn start_coinflip(
    channel: ChannelId,
    body: ValidatedJson<StartCoinflipRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let out = service(&app_state).start_coinflip(
        channel.as_str(),
        StartCoinflip {
            initiator: body.initiator_id,
            opponent: body.opponent_id,
            initiator_label: body.initiator_label,
            opponent_label: body.opponent_label,
        },
    )?;
    Ok(messages(out))
}

async fn choose_coinflip_side(
    channel: ChannelId,
    body: ValidatedJson<CoinflipSideRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let out = service(&app_state).choose_coinflip_side(channel.as_str(), &body.actor_id, &body.side)?;
    Ok(messages(out))
}

async fn choose_format(
    channel: ChannelId,
    body: ValidatedJson<FormatRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let out = service(&app_state).choose_match_format(channel.as_str(), &body.actor_id, &body.format)?;
    Ok(messages(out))
}

async fn submit_veto_choice(
    channel: ChannelId,
    body: ValidatedJson<VetoChoiceRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    debug!(actor_id = %body.actor_id, step = body.step.as_str(), value = %body.value, "Veto choice received");
    let out = service(&app_state).submit_veto_choice(
        channel.as_str(),
        &body.actor_id,
        body.step,
        &body.value,
    )?;
    Ok(messages(out))
}

async fn end_session(
    channel: ChannelId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let out = service(&app_state).force_end(channel.as_str())?;
    Ok(messages(out))
}

async fn get_session(
    channel: ChannelId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let view = service(&app_state).session_view(channel.as_str())?;
    Ok(HttpResponse::Ok().json(view))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/{channel_id}/coinflip", web::post().to(start_coinflip))
        .route("/{channel_id}/coinflip/side", web::post().to(choose_coinflip_side))
        .route("/{channel_id}/format", web::post().to(choose_format))
        .route("/{channel_id}/veto", web::post().to(submit_veto_choice))
        .route("/{channel_id}/session", web::get().to(get_session))
        .route("/{channel_id}/session", web::delete().to(end_session));
}
