use std::{env, net::SocketAddr, path::Path};

use axum::http::HeaderValue;
use axum::Router;
use configs::{AppConfig, CorsConfig, ServerConfig};
use dotenvy::dotenv;
use models::db::{self, DatabaseConfig};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes::{self, AppState};

/// CORS for the configured origins; methods and headers mirror the preflight.
pub fn build_cors(cfg: &CorsConfig) -> Result<CorsLayer, StartupError> {
    let origins = cfg
        .allowed_origins
        .iter()
        .map(|o| {
            o.parse::<HeaderValue>()
                .map_err(|e| StartupError::InvalidConfig(format!("cors origin {o:?}: {e}")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(cfg.allow_credentials))
}

/// Load `config.toml` when present, otherwise build the config from env vars.
pub fn load_config() -> Result<AppConfig, StartupError> {
    let path = configs::config_path();
    if Path::new(&path).exists() {
        let cfg = AppConfig::load_and_validate()?;
        info!(%path, "configuration loaded");
        return Ok(cfg);
    }

    warn!(%path, "config file not found; using environment variables");
    let mut cfg = AppConfig::default();
    if let Ok(host) = env::var("SERVER_HOST") {
        cfg.server.host = host;
    }
    if let Some(port) = env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
        cfg.server.port = port;
    }
    cfg.server.worker_threads = env::var("TOKIO_WORKER_THREADS").ok().and_then(|v| v.parse::<usize>().ok());
    cfg.database.url = db::DATABASE_URL.clone();
    cfg.normalize_and_validate()?;
    Ok(cfg)
}

fn bind_addr(server: &ServerConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", server.host, server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("server address: {e}")))
}

/// Public entry: connect, bootstrap the schema and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();

    let cfg = load_config()?;

    let db = db::connect_with_config(&DatabaseConfig::from(&cfg.database)).await?;
    db::ping(&db).await?;
    models::schema::ensure_schema(&db).await?;

    let cors = build_cors(&cfg.cors)?;
    let app: Router = routes::build_router(AppState { db }, cors);

    let addr = bind_addr(&cfg.server)?;
    info!(%addr, "pet store listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
