use std::sync::Arc;

use apis::setup_routes;
use axum::Router;
use repositories::{
    memory_repository::InMemoryReviewRepository,
    review_repository::{PgReviewRepository, ReviewRepository},
};
use services::{render_service::RenderService, review_service::ReviewService};
use sqlx::postgres::PgPool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

pub mod apis;
pub mod models;
pub mod repositories;
pub mod services;
pub mod settings;
pub mod utils;

pub struct AppState {
    pub review_service: ReviewService,
    pub render_service: RenderService,
}

pub async fn setup_database(database_url: &str) -> Result<Arc<PgPool>, sqlx::Error> {
    let pool = PgPool::connect(database_url).await?;
    Ok(Arc::new(pool))
}

/// Postgres when a database URL is configured, otherwise an in-memory store.
pub async fn setup_repository(
    settings: &settings::Settings,
) -> Result<Arc<dyn ReviewRepository>, Box<dyn std::error::Error>> {
    match &settings.database_url {
        Some(database_url) => {
            let db = setup_database(database_url).await?;
            if settings.run_migrations() {
                sqlx::migrate!().run(db.as_ref()).await?;
                info!("Database migrations applied");
            }
            Ok(Arc::new(PgReviewRepository::new(db)))
        }
        None => {
            warn!("DATABASE_URL not set, reviews are kept in memory");
            Ok(Arc::new(InMemoryReviewRepository::new()))
        }
    }
}

pub async fn setup_router(
    settings: &settings::Settings,
) -> Result<Router, Box<dyn std::error::Error>> {
    let repository = setup_repository(settings).await?;
    Ok(build_router(repository)?)
}

pub fn build_router(repository: Arc<dyn ReviewRepository>) -> Result<Router, minijinja::Error> {
    let state = AppState {
        review_service: ReviewService::new(repository),
        render_service: RenderService::new()?,
    };

    Ok(setup_routes()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state)))
}

pub fn init_tracing(settings: &settings::Settings) {
    let level = if settings.is_production() {
        tracing::Level::INFO
    } else {
        tracing::Level::DEBUG
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string().to_lowercase()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_thread_names(true)
        .with_ansi(!settings.is_production())
        .init();
}
