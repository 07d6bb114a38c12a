/**
 * Social Auth Server Entry Point
 *
 * This is the main entry point for the authentication backend server.
 */

use social_auth::backend::server::config::server_port;
use social_auth::backend::server::init::create_app;
use social_auth::shared::AuthConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file if present
    dotenv::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&env_filter))
        .init();

    tracing::info!("Server initialization started");

    // Secrets are required; refuse to start without them
    let config = AuthConfig::from_env()?;

    let app = create_app(config).await;

    let port = server_port();
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
