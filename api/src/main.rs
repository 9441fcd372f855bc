//! BoxTrack API Server
//!
//! Parcel shipment tracking: create, follow and retire shipments, and let
//! account holders look up their own parcels.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    http::{Method, Uri},
    routing::{get, post, MethodRouter},
    Router,
};
use sea_orm::Database;
use serde::Serialize;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod auth;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::{
    IdentityServiceClient, PostgresAccountLookup, PostgresShipmentRepository,
    SignedTokenValidator,
};
use app::ShipmentService;
use config::Config;
use domain::ports::{AccountLookup, ShipmentRepository, TokenValidator};
use error::AppError;
use handlers::Envelope;

/// Shipment service over type-erased ports, so tests can swap in mocks
pub type DynShipmentService =
    ShipmentService<dyn ShipmentRepository, dyn AccountLookup, dyn TokenValidator>;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub shipment_service: Arc<DynShipmentService>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Envelope<HealthResponse> {
    Envelope::ok(
        "Service is healthy",
        HealthResponse {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
        },
    )
}

async fn no_route(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}

async fn method_not_allowed(method: Method, uri: Uri) -> AppError {
    AppError::MethodNotAllowed(format!("{} is not allowed on {}", method, uri.path()))
}

/// Answer unsupported methods on a known path with an enveloped 405
fn enveloped(route: MethodRouter<AppState>) -> MethodRouter<AppState> {
    route.fallback(method_not_allowed)
}

/// Build the HTTP router (without rate limiting, which needs peer addresses)
pub fn router(state: AppState) -> Router {
    let shipment_routes = Router::new()
        .route(
            "/shipment/create",
            enveloped(post(handlers::create_shipment)),
        )
        .route("/shipment/all", enveloped(get(handlers::list_shipments)))
        .route(
            "/shipment/all/:id",
            enveloped(get(handlers::list_account_shipments)),
        )
        .route(
            "/shipment/status/:code",
            enveloped(get(handlers::list_shipments_by_status)),
        )
        .route(
            "/shipment/:id",
            enveloped(
                get(handlers::get_shipment)
                    .patch(handlers::update_shipment)
                    .delete(handlers::delete_shipment),
            ),
        )
        .route(
            "/shipment/:id/:shipment_id",
            enveloped(get(handlers::get_account_shipment)),
        );

    Router::new()
        // Health check (no auth)
        .route("/health", enveloped(get(health)))
        .nest("/api/v1", shipment_routes)
        .fallback(no_route)
        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,boxtrack_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting BoxTrack API...");

    // Load configuration
    let config = Config::from_env()?;

    // Connect to PostgreSQL
    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Create adapters
    let shipments: Arc<dyn ShipmentRepository> =
        Arc::new(PostgresShipmentRepository::new(db.clone()));
    let accounts: Arc<dyn AccountLookup> = Arc::new(PostgresAccountLookup::new(db));

    let tokens: Arc<dyn TokenValidator> = match &config.token_secret {
        Some(secret) => {
            tracing::info!("Validating tokens locally with the shared secret");
            Arc::new(SignedTokenValidator::new(secret.clone()))
        }
        None => {
            tracing::info!(url = %config.identity_url, "Validating tokens with the identity service");
            Arc::new(IdentityServiceClient::new(config.identity_url.clone()))
        }
    };

    let state = AppState {
        shipment_service: Arc::new(ShipmentService::new(shipments, accounts, tokens)),
    };

    // Uses PeerIpKeyExtractor to get client IP from socket connection
    let governor_config = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(PeerIpKeyExtractor)
            .per_second(config.rate_limit_per_second)
            .burst_size(config.rate_limit_burst)
            .finish()
            .context("Invalid rate limit configuration")?,
    );

    let app = router(state).layer(GovernorLayer {
        config: governor_config,
    });

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
