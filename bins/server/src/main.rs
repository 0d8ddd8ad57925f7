//! Net-worth tracker API server.
//!
//! Main entry point for the backend service.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use networth_api::{AppState, create_router};
use networth_core::provider::{PlaidClient, PlaidConfig, PlaidEnvironment};
use networth_db::connect;
use networth_shared::{AppConfig, JwtConfig, JwtService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "networth=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Connect to database
    let db = connect(&config.database.url).await?;
    info!("Connected to database");

    // Create JWT service
    let jwt_config = JwtConfig {
        secret: config.jwt.secret.clone(),
        #[allow(clippy::cast_possible_wrap)]
        access_token_expires_minutes: (config.jwt.access_token_expiry_secs / 60) as i64,
    };
    let jwt_service = JwtService::new(jwt_config);

    // Create the Plaid client when credentials are configured
    let plaid = match &config.plaid {
        Some(settings) => {
            let environment = PlaidEnvironment::from_name(&settings.environment);
            let plaid_config = PlaidConfig::new(
                settings.client_id.clone(),
                settings.secret.clone(),
                environment,
            )
            .with_timeout_secs(settings.timeout_secs)
            .with_max_retries(settings.max_retries);

            let client = PlaidClient::new(plaid_config)?;
            info!(environment = ?environment, "Plaid client configured");
            Some(Arc::new(client))
        }
        None => {
            warn!("Plaid credentials not configured; account linking is disabled");
            None
        }
    };

    // Create application state
    let state = AppState {
        db: Arc::new(db),
        jwt_service: Arc::new(jwt_service),
        plaid,
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
