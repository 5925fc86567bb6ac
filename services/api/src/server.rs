use crate::cli::ServeArgs;
use crate::demo::sample_stores;
use crate::infra::{load_match_config, AppState, Services, Stores};
use crate::routes::app_router;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};
use volunteer_hub::config::AppConfig;
use volunteer_hub::error::AppError;
use volunteer_hub::telemetry;
use volunteer_hub::workflows::matching::MatchEngine;
use volunteer_hub::workflows::roster::MemberRepository;

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
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let stores = if args.seed_demo {
        sample_stores()
    } else {
        Stores::load(&config.data)?
    };
    if stores.members.list().map_or(true, |members| members.is_empty()) {
        warn!("roster is empty; members must register before tasks can be matched");
    }

    let engine = MatchEngine::new(load_match_config(&config.matching)?);
    let services = Services::new(&stores, engine);

    let app = app_router(&services)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        seeded = args.seed_demo,
        workload_cap = config.matching.workload_cap,
        "volunteer hub ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
