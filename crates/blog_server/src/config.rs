//! Command-line configuration for the blog server.

use blog_core::{default_log_level, StoreOptions, DEFAULT_COLLECTION};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// CLI arguments for the blog server.
#[derive(Debug, Clone, Parser)]
#[command(name = "blog-server")]
#[command(about = "Blog record RPC server")]
pub struct CliArgs {
    /// Listen address.
    #[arg(long, env = "BLOG_ADDR", default_value = "0.0.0.0:50051")]
    pub addr: SocketAddr,

    /// SQLite file backing the document store (`:memory:` for a throwaway store).
    #[arg(long, env = "BLOG_DB_PATH", default_value = "blogdb.sqlite3")]
    pub db_path: PathBuf,

    /// Document collection holding blog posts.
    #[arg(long, env = "BLOG_COLLECTION", default_value = DEFAULT_COLLECTION)]
    pub collection: String,

    /// How long a store call may wait for the database lock, in milliseconds.
    #[arg(long, env = "BLOG_BUSY_TIMEOUT_MS", default_value_t = 5_000)]
    pub busy_timeout_ms: u64,

    /// Log level (trace|debug|info|warn|error).
    #[arg(long, env = "BLOG_LOG_LEVEL", default_value = default_log_level())]
    pub log_level: String,

    /// Absolute directory for rolling log files; stderr when omitted.
    #[arg(long, env = "BLOG_LOG_DIR")]
    pub log_dir: Option<String>,
}

/// Resolved server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub db_path: PathBuf,
    pub collection: String,
    pub store: StoreOptions,
}

impl From<&CliArgs> for ServerConfig {
    fn from(args: &CliArgs) -> Self {
        Self {
            addr: args.addr,
            db_path: args.db_path.clone(),
            collection: args.collection.clone(),
            store: StoreOptions {
                busy_timeout: Duration::from_millis(args.busy_timeout_ms),
            },
        }
    }
}
