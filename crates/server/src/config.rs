//! Command-line and environment configuration.
//!
//! Every option can be given as a flag or an environment variable; flags
//! win. Read once at startup.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use clap::Parser;

pub const DEFAULT_PORT: u16 = 1234;

/// Origins allowed when none are configured
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 2] = ["http://127.0.0.1:5500", "http://localhost:1234"];

/// Movies API - in-memory movie catalogue over HTTP
#[derive(Debug, Clone, Parser)]
#[command(name = "movies-api")]
#[command(about = "REST API over an in-memory movie catalogue", long_about = None)]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, env = "MOVIES_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Path to the JSON seed dataset
    #[arg(long, env = "MOVIES_SEED", default_value = "data/movies.json")]
    pub seed: PathBuf,

    /// Browser origin allowed by CORS (repeat, or comma separate in the env var)
    #[arg(
        long = "allowed-origin",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_values_t = DEFAULT_ALLOWED_ORIGINS.map(String::from)
    )]
    pub allowed_origins: Vec<String>,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
