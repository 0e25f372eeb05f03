use anyhow::{Context, Result};

/// Server configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub claude_api_key: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        load_dotenv();

        Ok(Config {
            claude_api_key: require_env("CLAUDE_API_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: log_level(),
        })
    }
}

/// Loads `.env` if present; ignores it if missing.
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

/// Log level used when `RUST_LOG` does not carry a full filter directive.
pub fn log_level() -> String {
    std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
