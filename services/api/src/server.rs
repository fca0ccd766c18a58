use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryLeadRepository, LogMailNotifier};
use crate::routes::with_lead_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use paint_estimate::config::AppConfig;
use paint_estimate::error::AppError;
use paint_estimate::leads::LeadService;
use paint_estimate::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
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

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryLeadRepository::default());
    let notifier = Arc::new(LogMailNotifier::new(
        config.notifications.lead_recipient.clone(),
    ));
    let lead_service = Arc::new(LeadService::new(repository, notifier));

    let app = with_lead_routes(lead_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        lead_notifications = config.notifications.lead_recipient.is_some(),
        "painting estimate service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
