use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::application_router;
use axum_prometheus::PrometheusMetricLayer;
use lead_prospector::config::AppConfig;
use lead_prospector::error::AppError;
use lead_prospector::telemetry;
use std::sync::atomic::Ordering;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let app_state = AppState::new(prometheus_handle, config.collection.clone());
    let readiness_flag = app_state.readiness.clone();

    let app = application_router(app_state).layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        daily_lead_limit = config.collection.daily_lead_limit,
        lgpd = config.privacy.lgpd_compliance,
        "lead prospecting service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
