use clap::{Args, Parser, ValueEnum};

#[derive(Clone, Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Config {
    #[command(flatten)]
    pub server: ServerConfig,

    #[command(flatten)]
    pub database: DatabaseConfig,

    #[command(flatten)]
    pub webhook: WebhookConfig,

    #[command(flatten)]
    pub telemetry: TelemetryConfig,
}

#[derive(Clone, Debug, Args)]
pub struct ServerConfig {
    /// Host to listen on
    #[arg(long, env = "MUNIGATE_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port for the gateway-facing webhook listener
    #[arg(long, env = "MUNIGATE_PORT", default_value_t = 3000)]
    pub port: u16,

    /// Port for the management (health) listener
    #[arg(long, env = "MUNIGATE_MGMT_PORT", default_value_t = 3001)]
    pub mgmt_port: u16,
}

#[derive(Clone, Debug, Args)]
pub struct DatabaseConfig {
    /// Database connection URL
    #[arg(long, env = "MUNIGATE_DATABASE_URL")]
    pub url: String,

    /// Maximum number of pooled connections
    #[arg(long, env = "MUNIGATE_DB_MAX_CONNECTIONS", default_value_t = 10)]
    pub max_connections: u32,

    /// Minimum number of pooled connections kept warm
    #[arg(long, env = "MUNIGATE_DB_MIN_CONNECTIONS", default_value_t = 1)]
    pub min_connections: u32,

    /// Timeout for acquiring a connection from the pool, in seconds
    #[arg(long, env = "MUNIGATE_DB_ACQUIRE_TIMEOUT_SECS", default_value_t = 5)]
    pub acquire_timeout_secs: u64,
}

#[derive(Clone, Debug, Args)]
pub struct WebhookConfig {
    /// Shared secret the gateway must present as the `token` query parameter.
    /// Left unset, every webhook call is rejected with a configuration error.
    #[arg(long, env = "MUNIGATE_WEBHOOK_TOKEN")]
    pub token: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct TelemetryConfig {
    /// Log output format
    #[arg(long, env = "MUNIGATE_LOG_FORMAT", value_enum, default_value = "text")]
    pub log_format: LogFormat,

    /// OTLP endpoint for trace and metric export; disabled when unset
    #[arg(long, env = "MUNIGATE_OTLP_ENDPOINT")]
    pub otlp_endpoint: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

impl Config {
    #[must_use]
    pub fn load() -> Self {
        Self::parse()
    }
}
