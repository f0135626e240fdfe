//! Leena's Boutique Backend
//!
//! A REST backend for the boutique storefront: SQLite-backed product catalog,
//! per-session shopping carts with TTL'd persistence, visitor analytics, and
//! a voice-command matcher.

mod api;
mod auth;
mod cart;
mod catalog;
mod config;
mod db;
mod errors;
mod models;
mod voice;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cart::CartSessions;
use catalog::CatalogStore;
use config::Config;
use db::Repository;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub catalog: Arc<CatalogStore>,
    pub carts: Arc<CartSessions>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Leena's Boutique Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Cart storage path: {:?}", config.cart_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Warn if the admin PSK is not configured
    if config.admin_psk.is_none() {
        tracing::warn!("No admin PSK configured (LEENAS_API_PSK). Admin API is unprotected!");
    }

    // Initialize database
    let pool = db::init_database(&config.db_path).await?;
    let repo = Arc::new(Repository::new(pool));

    // Seed the catalog store; an empty seed makes the store fetch for itself
    let catalog = Arc::new(CatalogStore::new((*repo).clone()));
    let seed = repo.list_products().await?;
    catalog.initialize(seed).await;
    tracing::info!(
        "Catalog ready with {} products",
        catalog.all_products().await.len()
    );

    // Per-session cart registry
    let carts = Arc::new(CartSessions::new(config.cart_path.clone()));

    // Create application state
    let state = AppState {
        repo,
        catalog,
        carts,
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // PSK layer for the admin surface (product editor, visitor stats)
    let psk = state.config.admin_psk.clone();
    let admin_layer =
        middleware::from_fn(move |req, next| auth::psk_auth_layer(psk.clone(), req, next));

    // API routes; admin methods carry the PSK layer per route
    let api_routes = Router::new()
        // Catalog
        .route("/products", get(api::list_products))
        .route(
            "/products",
            put(api::upsert_product)
                .delete(api::delete_products)
                .layer(admin_layer.clone()),
        )
        .route("/products/filter", get(api::filter_products))
        .route("/products/{id}", get(api::get_product))
        .route("/collections/hot", get(api::hot_products))
        .route("/collections/latest", get(api::latest_products))
        // Cart
        .route(
            "/cart/{session}",
            get(api::get_cart).delete(api::clear_cart),
        )
        .route(
            "/cart/{session}/items",
            post(api::add_cart_item)
                .put(api::update_cart_item)
                .delete(api::remove_cart_item),
        )
        // Voice
        .route("/voice-command", post(api::voice_command))
        // Analytics
        .route("/track-visit", post(api::track_visit))
        .route("/visits", get(api::list_visits).layer(admin_layer.clone()))
        .route(
            "/visits/summary",
            get(api::visits_summary).layer(admin_layer),
        )
        // Checkout
        .route("/checkout/quote", post(api::checkout_quote));

    // Health check (no auth required)
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
