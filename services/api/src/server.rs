use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryWellnessRepository};
use crate::routes::with_wellness_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use rugby_hub::config::AppConfig;
use rugby_hub::error::AppError;
use rugby_hub::telemetry;
use rugby_hub::wellness::{TrendConfig, WellnessService};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry, config.environment)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryWellnessRepository::default());
    let trend_config = TrendConfig {
        stable_epsilon: config.wellness.trend_epsilon,
        ..TrendConfig::default()
    };
    let wellness_service = Arc::new(WellnessService::new(repository, trend_config));

    let app = with_wellness_routes(wellness_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        trend_epsilon = config.wellness.trend_epsilon,
        "rugby hub api ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
