//! HTTP server startup
//!
//! Resolves storage and favorites settings, then runs the API until a
//! shutdown signal arrives.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;

use starfav_server::config::{DEFAULT_FAVORITE_USER_ID, DEFAULT_PORT};
use starfav_server::models::DuplicatePolicy;
use starfav_server::{
    normalize_database_url, run_server, Catalog, FavoritesConfig, MemoryCatalog, PgCatalog,
    ServerConfig,
};

/// Arguments for running the API server
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Interface to listen on
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(long, short = 'p', env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// PostgreSQL connection string; without it data lives in memory only
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// User id the /favorite/... routes act on
    #[arg(long, env = "FAVORITES_DEFAULT_USER_ID", default_value_t = DEFAULT_FAVORITE_USER_ID)]
    pub default_user_id: i32,

    /// Repeated favorites: dedupe, allow or reject
    #[arg(long, env = "FAVORITES_DUPLICATES", default_value_t = DuplicatePolicy::Dedupe)]
    pub duplicate_favorites: DuplicatePolicy,
}

impl ServeArgs {
    fn server_config(&self) -> ServerConfig {
        ServerConfig {
            bind_addr: SocketAddr::new(self.host, self.port),
            favorites: FavoritesConfig {
                default_user_id: self.default_user_id,
                duplicates: self.duplicate_favorites,
            },
        }
    }
}

async fn open_catalog(database_url: Option<&str>) -> Result<Arc<dyn Catalog>> {
    match database_url {
        Some(url) => {
            let url = normalize_database_url(url);
            let catalog = PgCatalog::connect(&url)
                .await
                .context("Failed to connect to the database")?;
            Ok(Arc::new(catalog))
        }
        None => {
            tracing::warn!("DATABASE_URL not set; using in-memory storage (data is lost on exit)");
            Ok(Arc::new(MemoryCatalog::new()))
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = args.server_config();
    let catalog = open_catalog(args.database_url.as_deref()).await?;

    tracing::info!("Starting starfav server on {}", config.bind_addr);

    // Blocks until shutdown
    run_server(catalog, config).await.context("Server error")?;

    Ok(())
}
