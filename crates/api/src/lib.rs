//! # Chairtime API
//!
//! HTTP surface for the slot-availability calculator. The booking form posts
//! the dentist's and patient's appointments for a day along with the chosen
//! service, and gets back the clinic's slot grid with conflicting start times
//! marked.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Shape requests into calculator inputs and responses
//! - **Middleware**: Error mapping
//! - **Config**: Environment configuration, including the clinic's slot window

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Error mapping shared by all handlers
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{Router, http::HeaderValue};
use chairtime_core::calculator::SlotAvailabilityCalculator;
use eyre::Result;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// Built once from configuration and shared by every request
    pub calculator: SlotAvailabilityCalculator,
}

/// Builds the application router for the given configuration
///
/// Kept separate from [`start_server`] so tests can drive the router without
/// binding a socket.
pub fn app(config: &config::ApiConfig) -> Router {
    let state = Arc::new(ApiState {
        calculator: config.calculator(),
    });

    let app = Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Slot availability endpoints
        .merge(routes::availability::routes())
        .with_state(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let allowed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match origin.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!("Ignoring invalid CORS origin: {}", origin);
                    None
                }
            })
            .collect();

        let cors = CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::AUTHORIZATION,
                axum::http::header::ACCEPT,
            ])
            .allow_origin(AllowOrigin::list(allowed))
            .allow_credentials(true);

        app.layer(cors)
    } else {
        app
    };

    app.layer(
        tower::ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    )
}

/// Starts the API server with the provided configuration
///
/// Installs the log subscriber at the configured level, builds the router
/// and serves it until the process is stopped.
pub async fn start_server(config: config::ApiConfig) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let app = app(&config);

    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!(
        rule = %config.blocking_rule,
        first_slot = %config.slot_grid.first(),
        last_slot = %config.slot_grid.last(),
        "Server listening on http://{}",
        addr
    );
    axum::serve(listener, app).await?;

    Ok(())
}
