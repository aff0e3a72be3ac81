use bookmarks_telemetry::LogFormat;
use clap::{Parser, ValueEnum};
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;

pub const LISTEN_ADDR_ENV: &str = "BOOKMARKS_GATEWAY_LISTEN_ADDR";
pub const BASE_PATH_ENV: &str = "BOOKMARKS_GATEWAY_BASE_PATH";
pub const API_TOKEN_ENV: &str = "BOOKMARKS_API_TOKEN";
pub const STORAGE_BACKEND_ENV: &str = "BOOKMARKS_STORAGE_BACKEND";
pub const POSTGRES_DSN_ENV: &str = "BOOKMARKS_POSTGRES_DSN";
pub const POSTGRES_MAX_CONNECTIONS_ENV: &str = "BOOKMARKS_POSTGRES_MAX_CONNECTIONS";
pub const RUN_MIGRATIONS_ENV: &str = "BOOKMARKS_RUN_MIGRATIONS";
pub const SEED_SAMPLE_DATA_ENV: &str = "BOOKMARKS_SEED_SAMPLE_DATA";
pub const LOG_FORMAT_ENV: &str = "BOOKMARKS_LOG_FORMAT";
pub const OTLP_ENDPOINT_ENV: &str = "BOOKMARKS_OTLP_ENDPOINT";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8000";
pub const DEFAULT_POSTGRES_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "in-memory")]
    InMemory,
    #[value(name = "postgres")]
    Postgres,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::InMemory => write!(f, "in-memory"),
            StorageBackendArg::Postgres => write!(f, "postgres"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(value: LogFormatArg) -> Self {
        match value {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "bookmarks-gateway")]
pub struct CLI {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    /// Prefix for the bookmark routes, e.g. `/api`.
    #[arg(long, env = BASE_PATH_ENV, default_value = "")]
    pub base_path: String,

    /// Bearer token required on bookmark routes. Authentication is off when unset.
    #[arg(long, env = API_TOKEN_ENV, hide_env_values = true)]
    pub api_token: Option<String>,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::InMemory
    )]
    pub storage: StorageBackendArg,

    #[arg(
        long,
        env = POSTGRES_DSN_ENV,
        hide_env_values = true,
        required_if_eq("storage", "postgres")
    )]
    pub postgres_dsn: Option<String>,

    #[arg(
        long,
        env = POSTGRES_MAX_CONNECTIONS_ENV,
        default_value_t = DEFAULT_POSTGRES_MAX_CONNECTIONS
    )]
    pub postgres_max_connections: u32,

    /// Apply schema migrations on startup (postgres only).
    #[arg(long, env = RUN_MIGRATIONS_ENV)]
    pub run_migrations: bool,

    /// Preload the in-memory store with sample bookmarks.
    #[arg(long, env = SEED_SAMPLE_DATA_ENV)]
    pub seed_sample_data: bool,

    #[arg(long, env = LOG_FORMAT_ENV, value_enum, default_value_t = LogFormatArg::Pretty)]
    pub log_format: LogFormatArg,

    /// OTLP/gRPC collector endpoint for span export, e.g. `http://localhost:4317`.
    #[arg(long, env = OTLP_ENDPOINT_ENV)]
    pub otlp_endpoint: Option<String>,
}
