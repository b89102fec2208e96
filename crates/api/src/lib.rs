//! # ClinicSync API
//!
//! The API crate provides the web server for the ClinicSync clinic backend.
//! It exposes admin endpoints for doctors, schedules and payments, public
//! doctor and schedule listings, and the patient booking flow.
//!
//! ## Architecture
//!
//! - **Routes**: API endpoints and URL structure
//! - **Handlers**: thin adapters from HTTP to the core services
//! - **Middleware**: error mapping
//! - **Config**: environment configuration
//!
//! Handlers never touch storage directly; everything goes through the
//! services in `clinicsync_core::services`, which talk to a
//! [`ClinicStore`](clinicsync_core::store::ClinicStore).

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Error handling middleware
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{HeaderValue, Method, header},
};
use clinicsync_core::{
    payment::PaymentGateway,
    services::{AdminService, BookingService, DoctorService, ScheduleService},
    store::ClinicStore,
};
use eyre::{Result, WrapErr};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
///
/// # Example
///
/// ```rust,ignore
/// let state = Arc::new(ApiState::new(Arc::new(MemoryStore::new()), Arc::new(SimulatedGateway)));
/// let app = router(state);
/// ```
pub struct ApiState {
    pub doctors: DoctorService,
    pub schedules: ScheduleService,
    pub bookings: BookingService,
    pub admin: AdminService,
}

impl ApiState {
    pub fn new(store: Arc<dyn ClinicStore>, payments: Arc<dyn PaymentGateway>) -> Self {
        Self {
            doctors: DoctorService::new(store.clone()),
            schedules: ScheduleService::new(store.clone()),
            bookings: BookingService::new(store.clone(), payments),
            admin: AdminService::new(store),
        }
    }
}

/// Builds the application router with every route and request tracing.
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Doctor directory and admin endpoints
        .merge(routes::doctor::routes())
        // Schedule management endpoints
        .merge(routes::schedule::routes())
        // Booking endpoints
        .merge(routes::booking::routes())
        // Payment ledger and dashboard counters
        .merge(routes::admin::routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .wrap_err_with(|| format!("Invalid CORS origin: {}", origin))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .allow_origin(origins)
        .allow_credentials(true))
}

/// Starts the API server with the provided configuration and state
///
/// Initializes logging, applies CORS and the request timeout, and serves
/// until the listener fails.
///
/// # Example
///
/// ```rust,ignore
/// let config = ApiConfig::from_env()?;
/// let pool = clinicsync_db::create_pool(&config.database_url, config.database_max_connections).await?;
/// let state = ApiState::new(Arc::new(PgStore::new(pool)), Arc::new(SimulatedGateway));
/// start_server(config, state).await?;
/// ```
pub async fn start_server(config: config::ApiConfig, state: ApiState) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let app = router(Arc::new(state));

    // Apply CORS configuration if origins are specified
    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)?),
        None => app,
    };

    // Add request timeout middleware
    let app = app.layer(
        ServiceBuilder::new().layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout,
        ))),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
