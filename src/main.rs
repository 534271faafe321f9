//! formkit · form input helper service
//!
//! - Axum HTTP API over the masking, date and lookup helpers
//! - ViaCEP postal-code lookup (endpoint configurable)
//!
//! Important env variables:
//!   PORT                : u16 (default 3000)
//!   FORMKIT_CONFIG_PATH : path to TOML config ([cep] and [dates] sections)
//!   CEP_BASE_URL        : overrides [cep].base_url
//!   LOG_LEVEL           : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT          : "pretty" (default) or "json"

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{info, warn};

use formkit::config::ServiceConfig;
use formkit::routes::build_router;
use formkit::state::AppState;
use formkit::telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  let config = ServiceConfig::from_env();
  let state = Arc::new(AppState::from_config(config)?);

  let app = build_router(state);

  // Read port from env or default to 3000.
  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "formkit", %addr, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;
  info!(target: "formkit", "HTTP server stopped");
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    warn!(target: "formkit", error = %e, "Failed to listen for Ctrl-C; running until killed");
    std::future::pending::<()>().await;
  }
}
