//! # IGDB Relay
//!
//! Backend relay for the IGDB game database API:
//! - Twitch OAuth `client_credentials` token lifecycle (acquire, cache, renew)
//! - REST-style requests translated into Apicalypse query strings
//! - Response reshaping: popularity joins, input-order id lookups
//! - Optional axum HTTP surface behind the `server` feature
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use igdb_relay::{IgdbClient, RelayConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = RelayConfig::from_env()?;
//!     let igdb = IgdbClient::new(&config);
//!
//!     let games = igdb.search_games("zelda", 10, &[]).await?;
//!     println!("Found {} games", games.len());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod igdb;

// Re-export primary types
pub use config::RelayConfig;
pub use core::{GameRecord, MostPlayedEntry, PopularityEntry, ProviderQuery};
pub use error::{RelayError, Result};
pub use igdb::{IgdbClient, TokenManager};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
