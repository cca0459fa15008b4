use anyhow::{ensure, Context, Result};

const DEFAULT_PORT: u16 = 3001;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:5173,http://localhost:3000";

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Upper bound on a request body, multipart upload included.
    pub max_upload_bytes: usize,
    /// Allowed browser origins. A single `*` allows any origin.
    pub cors_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: DEFAULT_PORT,
            rust_log: "info".to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            cors_origins: parse_origins(DEFAULT_CORS_ORIGINS),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();

        let port = match std::env::var("PORT") {
            Ok(v) => v
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            Err(_) => defaults.port,
        };

        let max_upload_bytes = match std::env::var("MAX_UPLOAD_BYTES") {
            Ok(v) => v
                .parse::<usize>()
                .context("MAX_UPLOAD_BYTES must be a positive integer")?,
            Err(_) => defaults.max_upload_bytes,
        };
        ensure!(max_upload_bytes > 0, "MAX_UPLOAD_BYTES must be greater than zero");

        let cors_origins = std::env::var("CORS_ORIGINS")
            .map(|v| parse_origins(&v))
            .unwrap_or(defaults.cors_origins);

        Ok(Config {
            port,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            max_upload_bytes,
            cors_origins,
        })
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|o| o == "*")
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}
