use sea_orm::Database;
use tracing::info;

use attendance_core::tracing::init_tracing;
use attendance_service::config::AttendanceConfig;
use attendance_service::infra::extractor::HttpFeatureExtractor;
use attendance_service::router::build_router;
use attendance_service::state::AppState;

#[tokio::main]
async fn main() {
    init_tracing("info");

    let config = AttendanceConfig::from_env();
    let settings = config.recognition_settings();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let extractor = HttpFeatureExtractor::new(
        &config.feature_extractor_url,
        config.feature_extractor_timeout(),
    )
    .expect("failed to build feature extractor client");

    let state = AppState {
        db,
        extractor,
        settings,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.attendance_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!(
        tolerance = settings.tolerance,
        embedding_dim = settings.embedding_dim,
        encoding_cap = ?settings.encoding_cap,
        "attendance service listening on {addr}"
    );
    axum::serve(listener, router).await.expect("server error");
}
