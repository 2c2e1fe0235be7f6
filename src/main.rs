//! # Survey Web
//!
//! Server-rendered front end for token-addressed customer surveys.
//!
//! ## Flow
//!
//! 1. **Entry** `/s/{token}`: fetch the survey, render one widget per question
//! 2. **Submit**: validate required questions, coerce answers, post them upstream
//! 3. **Branch**: review prompt with outbound links, or a generic thank-you
//!
//! ## Architecture
//!
//! - Axum handles HTTP routing and request/response lifecycle
//! - reqwest talks to the survey API collaborator (`SURVEY_API_BASE_URL`)
//! - In-memory stores hold rendered surveys and single-use review hand-offs

use std::sync::Arc;

use tracing::info;

use survey_web::api::HttpSurveyApi;
use survey_web::config::AppConfig;
use survey_web::create_app;
use survey_web::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "survey_web=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting survey web front end");

    let config = AppConfig::from_env()?;
    info!("Using survey API at {}", config.api_base_url);

    let api = Arc::new(HttpSurveyApi::new(&config)?);
    let app = create_app(AppState::new(api));

    // Bind and serve
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
