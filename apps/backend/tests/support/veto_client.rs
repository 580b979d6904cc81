//! Thin request helpers over a test service.

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, Error};
use serde_json::{json, Value};

pub struct VetoClient<'a, S> {
    app: &'a S,
    channel: String,
}

impl<'a, S> VetoClient<'a, S>
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    pub fn new(app: &'a S, channel: &str) -> Self {
        Self {
            app,
            channel: channel.to_string(),
        }
    }

    async fn post(&self, path: &str, body: Value) -> ServiceResponse<BoxBody> {
        let req = test::TestRequest::post()
            .uri(&format!("/api/channels/{}{path}", self.channel))
            .set_json(body)
            .to_request();
        test::call_service(self.app, req).await
    }

    pub async fn start(&self, initiator: &str, opponent: &str) -> ServiceResponse<BoxBody> {
        self.post(
            "/coinflip",
            json!({ "initiator_id": initiator, "opponent_id": opponent }),
        )
        .await
    }

    pub async fn call_coin(&self, actor: &str, side: &str) -> ServiceResponse<BoxBody> {
        self.post("/coinflip/side", json!({ "actor_id": actor, "side": side }))
            .await
    }

    pub async fn format(&self, actor: &str, format: &str) -> ServiceResponse<BoxBody> {
        self.post("/format", json!({ "actor_id": actor, "format": format }))
            .await
    }

    pub async fn veto(&self, actor: &str, step: &str, value: &str) -> ServiceResponse<BoxBody> {
        self.post(
            "/veto",
            json!({ "actor_id": actor, "step": step, "value": value }),
        )
        .await
    }

    pub async fn session(&self) -> ServiceResponse<BoxBody> {
        let req = test::TestRequest::get()
            .uri(&format!("/api/channels/{}/session", self.channel))
            .to_request();
        test::call_service(self.app, req).await
    }

    pub async fn end(&self) -> ServiceResponse<BoxBody> {
        let req = test::TestRequest::delete()
            .uri(&format!("/api/channels/{}/session", self.channel))
            .to_request();
        test::call_service(self.app, req).await
    }
}
