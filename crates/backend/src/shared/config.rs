use serde::Deserialize;
use std::time::Duration;

/// Переменная окружения, перекрывающая `auth.jwt_secret`
pub const JWT_SECRET_ENV: &str = "FULFILLMENT_JWT_SECRET";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub order_service: OrderServiceConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Внешний сервис заказов/пиклистов/дилеров
#[derive(Debug, Deserialize, Clone)]
pub struct OrderServiceConfig {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Сервисный токен (если сервис его требует)
    #[serde(default)]
    pub api_token: Option<String>,
}

impl OrderServiceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
}

fn default_timeout_secs() -> u64 {
    30
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
host = "0.0.0.0"
port = 3000

[order_service]
base_url = "http://localhost:8080/api"
timeout_secs = 30

[auth]
jwt_secret = "change-me"
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
///
/// `FULFILLMENT_JWT_SECRET` overrides the JWT secret in both cases.
pub fn load_config() -> anyhow::Result<Config> {
    let mut config = read_config_file()?;

    if let Ok(secret) = std::env::var(JWT_SECRET_ENV) {
        if !secret.trim().is_empty() {
            tracing::info!("JWT secret taken from {}", JWT_SECRET_ENV);
            config.auth.jwt_secret = secret;
        }
    }

    Ok(config)
}

fn read_config_file() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                return parse_config(&contents);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    parse_config(DEFAULT_CONFIG)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let config: Config = toml::from_str(contents)?;
    if config.order_service.base_url.trim().is_empty() {
        anyhow::bail!("order_service.base_url must not be empty");
    }
    Ok(config)
}
