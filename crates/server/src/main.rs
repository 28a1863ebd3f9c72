mod config;
mod doc;
mod dtos;
mod error;
mod routes;
mod utils;

use axum::{
    Router,
    routing::{get, post},
};
use config::AppConfig;
use database::db;
use log::info;
use refresher::scheduler::RefreshScheduler;
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, cors::CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use utils::shutdown::shutdown_signal;

#[tokio::main]
async fn main() {
    env_logger::init();
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().expect("Failed to load configuration");

    let client = db::create_client(&config.mongodb_url)
        .await
        .expect("Failed to create store client");
    let courses = db::course_collection(&client, &config.database_name);

    let scheduler = RefreshScheduler::start(
        courses.clone(),
        config.feed_url.clone(),
        config.refresh_interval,
    );

    // All origins with credentials, as the upstream deployment requires; the
    // allowed origin is mirrored per request since a literal wildcard cannot
    // be combined with credentials.
    let cors = CorsLayer::very_permissive();

    let app = Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", doc::ApiDoc::openapi()))
        .route("/", get(routes::root::root))
        .route("/health", get(routes::health::health))
        .route(
            "/courses",
            post(routes::course::create_course).get(routes::course::get_courses),
        )
        .route(
            "/courses/{id}",
            get(routes::course::get_course_by_id)
                .put(routes::course::update_course)
                .delete(routes::course::delete_course),
        )
        .layer(
            ServiceBuilder::new()
                .layer(cors)
                .layer(CompressionLayer::new()),
        )
        .with_state(courses);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("Failed to bind listener");
    info!("Running axum on http://{}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // Stop the refresh loop before the store client goes away.
    scheduler.shutdown().await;
    client.shutdown().await;
    info!("Shutdown complete");
}
