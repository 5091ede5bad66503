use std::sync::Arc;

use anyhow::Context;
use dotenv::dotenv;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{self, TraceLayer};
use tracing::{info, warn, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod router;

use shared_config::AppConfig;
use shared_database::seed::seed_reference_data;
use shared_utils::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Loading Env Vars
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug,sqlx=warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting hospital appointment API server");

    // Load configuration
    let config = AppConfig::from_env();
    if !config.is_configured() {
        warn!("SESSION_SECRET is empty; logins will be refused until it is set");
    }

    // Open the database and apply the schema
    let pool = shared_database::connect(&config)
        .await
        .with_context(|| format!("failed to open database at {}", config.database_url))?;
    shared_database::initialize(&pool)
        .await
        .context("failed to apply database schema")?;

    if config.seed_on_startup {
        let report = seed_reference_data(&pool)
            .await
            .context("failed to seed reference data")?;
        info!(
            "Seeded {} departments, {} treatments, {} accounts",
            report.departments, report.treatments, report.accounts
        );
    }

    // Set up CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let bind_address = config.bind_address.clone();

    // Create shared state
    let state = Arc::new(AppState::new(config, pool));

    // Build the application router
    let app = router::create_router(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(trace::DefaultMakeSpan::new().level(Level::INFO))
                .on_response(trace::DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors);

    // Run the server
    let listener = TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("failed to bind {}", bind_address))?;
    info!("Listening on {}", bind_address);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
