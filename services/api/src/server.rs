use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryAssessmentRepository, InMemoryCaseworkerQueue};
use crate::routes::with_assessment_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use home_intake::config::AppConfig;
use home_intake::error::AppError;
use home_intake::telemetry::{self, LogSink};
use home_intake::workflows::assessment::IntakeService;
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

    telemetry::init(&config.telemetry, LogSink::Stdout)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryAssessmentRepository::default());
    let queue = Arc::new(InMemoryCaseworkerQueue::default());
    let intake_service = Arc::new(
        IntakeService::new(repository, queue).with_reference_date(config.scoring.reference_date),
    );

    let app = with_assessment_routes(intake_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        reference_date = ?config.scoring.reference_date,
        "housing intake triage ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
