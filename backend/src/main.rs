use dotenvy::dotenv;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{CorsLayer, Any};
use tower_http::services::ServeDir;
use tower_http::trace::{TraceLayer, DefaultMakeSpan, DefaultOnResponse};
use tracing::Level;
use tracing_subscriber::EnvFilter;
use std::sync::Arc;

mod handlers {
    pub mod lead_handlers;
}
mod api {
    pub mod mailer;
    pub mod resend;
    pub mod smtp;
}
mod config {
    pub mod lead_config;
}
mod models {
    pub mod lead_models;
}
mod utils {
    pub mod validation;
}
mod error;

use config::lead_config::{self, ConfigError, LeadConfig};
use handlers::lead_handlers::{self, LeadIntake};

async fn health_check() -> &'static str {
    "OK"
}

pub struct AppState {
    intake: Result<LeadIntake, ConfigError>,
}

/// Resolves the mail provider from the environment. A broken configuration
/// is kept so every submission can report it.
pub fn load_intake() -> Result<LeadIntake, ConfigError> {
    let config = LeadConfig::from_env()?;
    let mailer = api::mailer::build_mailer(&config)?;
    tracing::info!(
        "Lead notifications go to {} via {} ({})",
        config.to_email,
        mailer.provider(),
        config.from_header()
    );
    Ok(LeadIntake {
        mailer,
        reply_to_override: config.reply_to_override,
    })
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let lead_route = post(lead_handlers::submit_lead).fallback(lead_handlers::method_not_allowed);

    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/lead", lead_route.clone())
        // path of the Netlify function this service replaces
        .route("/.netlify/functions/lead", lead_route)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO))
        )
        .layer(
            CorsLayer::new()
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::OPTIONS,
                ])
                .allow_origin(Any)
                .allow_headers([axum::http::header::CONTENT_TYPE])
                .expose_headers([axum::http::header::CONTENT_TYPE])
        )
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let _guard = std::env::var("SENTRY_DSN").ok().map(|dsn| {
        sentry::init((dsn, sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        }))
    });

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let intake = load_intake();
    if let Err(e) = &intake {
        tracing::error!("Email configuration incomplete, lead submissions will fail: {}", e);
    }
    let state = Arc::new(AppState { intake });

    let mut app = build_router(state);
    if let Ok(static_dir) = std::env::var("STATIC_DIR") {
        tracing::info!("Serving landing page from {}", static_dir);
        app = app.fallback_service(ServeDir::new(static_dir).append_index_html_on_directories(true));
    }

    use tokio::net::TcpListener;

    let addr = lead_config::bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Lead intake listening on {}", addr);
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
