use crate::cli::ServeArgs;
use crate::infra::{definition_source, AppState};
use crate::routes::with_survey_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use career_survey::config::AppConfig;
use career_survey::error::AppError;
use career_survey::telemetry;
use career_survey::workflows::survey::{ReasonSynthesizer, SurveyService};
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

    let source = definition_source(&config.surveys, std::mem::take(&mut args.data_dirs));
    info!(directories = ?source.directories(), "survey definitions search path");
    let survey_service = Arc::new(SurveyService::new(
        Arc::new(source),
        ReasonSynthesizer::default(),
    ));

    let app = with_survey_routes(survey_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "career survey scoring service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
