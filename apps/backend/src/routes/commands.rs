//! Slash-command definitions for the platform adapter to register.

use actix_web::{web, HttpResponse};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct CommandOption {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub required: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommandDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub options: Vec<CommandOption>,
}

pub fn command_definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition {
            name: "coinflip",
            description: "Flip a coin to decide who picks the match format",
            options: vec![CommandOption {
                name: "opponent",
                description: "The opposing team captain",
                kind: "user",
                required: true,
            }],
        },
        CommandDefinition {
            name: "endveto",
            description: "Force end an active veto session in the current channel",
            options: Vec::new(),
        },
    ]
}

async fn list_commands() -> HttpResponse {
    HttpResponse::Ok().json(command_definitions())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(list_commands));
}
