use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use oasis_hotel::auth::db as auth_db;
use oasis_hotel::config::Config;
use oasis_hotel::db::{self, seed, LogOnError};
use oasis_hotel::routes;
use oasis_hotel::state::AppState;

#[tokio::main]
async fn main() -> ExitCode {
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "oasis_hotel=debug,tower_http=debug".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  let config = match Config::load() {
    Ok(config) => config,
    Err(e) => {
      tracing::error!("Invalid configuration: {}", e);
      return ExitCode::FAILURE;
    }
  };

  if let Some(parent) = config.database_path.parent() {
    std::fs::create_dir_all(parent).log_warn("Failed to create data directory");
  }
  let pool = match db::init_db(&config.database_path) {
    Ok(pool) => pool,
    Err(e) => {
      tracing::error!("Failed to initialize database {}: {}", config.database_path.display(), e);
      return ExitCode::FAILURE;
    }
  };

  {
    let conn = match db::try_lock(&pool) {
      Ok(conn) => conn,
      Err(e) => {
        tracing::error!("{} during startup", e);
        return ExitCode::FAILURE;
      }
    };

    if config.seed_sample_data {
      if let Err(e) = seed::seed_catalog(&conn) {
        tracing::error!("Failed to seed sample catalog: {}", e);
        return ExitCode::FAILURE;
      }
    }

    if let Err(e) = seed::ensure_super_admin(&conn, config.admin.as_ref()) {
      tracing::error!("Admin bootstrap failed: {}", e);
      return ExitCode::FAILURE;
    }

    if let Some(n) = auth_db::cleanup_expired_sessions(&conn).log_warn("Failed to purge expired sessions") {
      if n > 0 {
        tracing::info!("Purged {} expired sessions", n);
      }
    }
  }

  let bind_addr = config.server.bind_addr();
  let port = config.server.port;
  let app = routes::router(AppState::from_config(pool, config));

  let listener = match tokio::net::TcpListener::bind(&bind_addr).await {
    Ok(listener) => listener,
    Err(e) => {
      tracing::error!("Failed to bind to {}: {}", bind_addr, e);
      return ExitCode::FAILURE;
    }
  };

  tracing::info!("Server running on http://localhost:{}", port);

  if let Err(e) = axum::serve(listener, app).await {
    tracing::error!("Server error: {}", e);
    return ExitCode::FAILURE;
  }
  ExitCode::SUCCESS
}
