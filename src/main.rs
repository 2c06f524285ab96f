//! Customer Service Server
//!
//! Loads configuration from the environment, applies migrations and serves
//! the customer API over HTTP.

use std::sync::Arc;

use axum::http::HeaderValue;
use dotenv::dotenv;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use customer_service::{
    api::{AppState, RouterBuilder},
    config::{AppConfig, ServerConfig},
    database::PgCustomerStore,
    service::{AuthService, CustomerService},
};

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origin = if server.allows_any_origin() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(
            server
                .cors_origins
                .iter()
                .filter_map(|origin| match origin.parse::<HeaderValue>() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        log::warn!("Ignoring invalid CORS origin {:?}", origin);
                        None
                    }
                }),
        )
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file if present
    dotenv().ok();

    env_logger::init();

    log::info!("Starting Customer Service v{}", customer_service::VERSION);

    let config = AppConfig::from_env()?;
    config.validate()?;
    log::info!("Configuration loaded and validated");

    let database_pool = config.database.create_pool().await?;

    log::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&database_pool).await?;
    log::info!("Database migrations completed");

    let store = Arc::new(PgCustomerStore::new(database_pool));
    let auth_service = Arc::new(AuthService::new(store.clone(), &config.auth_config()));
    let customer_service = Arc::new(CustomerService::new(store));
    let app_state = AppState::new(auth_service, customer_service);

    let app = RouterBuilder::with_all_routes()
        .with_auth(app_state.jwt_service())
        .build()
        .with_state(app_state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&config.server))
                .into_inner(),
        );

    let bind_addr = config.server.bind_addr();
    log::info!("Listening on {}", bind_addr);
    log::info!("Endpoints:");
    log::info!("  GET    /health");
    log::info!("  POST   /customers/register");
    log::info!("  POST   /customers/login");
    log::info!("  POST   /customers/refresh-token");
    log::info!("  PATCH  /customers/{{id}}/password   (bearer token)");
    log::info!("  GET    /customers                   (bearer token)");
    log::info!("  GET    /customers/{{id}}            (bearer token)");
    log::info!("  PATCH  /customers/{{id}}            (bearer token)");
    log::info!("  DELETE /customers/{{id}}            (bearer token)");

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
