use actix_web::{web, App, HttpServer};
use tracing::{error, info};
use veto_backend::config::VetoConfig;
use veto_backend::middleware::{RequestTrace, StructuredLogger, TraceSpan};
use veto_backend::routes;
use veto_backend::services::SessionSweeper;
use veto_backend::state::build_state;

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    let config = match VetoConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    let app_state = build_state().with_config(config.clone()).build();
    let sweeper = SessionSweeper::spawn(
        app_state.sessions.clone(),
        app_state.pending.clone(),
        &config,
    );

    info!(
        host = %config.host,
        port = config.port,
        session_max_age_secs = config.session_max_age.as_secs(),
        sweep_interval_secs = config.sweep_interval.as_secs(),
        seeded_coin = config.coin_seed.is_some(),
        "Starting veto backend"
    );

    let data = web::Data::new(app_state);

    let result = HttpServer::new(move || {
        App::new()
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
            .default_service(web::to(routes::not_found))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await;

    sweeper.shutdown().await;
    info!("Veto backend stopped");
    result
}
