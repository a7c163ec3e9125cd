//! Configuration module
//!
//! Process configuration is read from the environment (with `.env` support outside
//! production) and validated once at startup. Every problem is reported together.

use std::env;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

const SERVER_PORT: u16 = 8080;
const MAX_CONNECTIONS: u32 = 10;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;
const BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;
const VIA_CEP_BASE_URL: &str = "https://viacep.com.br";
const VIA_CEP_TIMEOUT_MS: u64 = 2500;
const IMAGES_DIR: &str = "./data/images";

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
    Test,
}

impl FromStr for Environment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dev" | "development" => Ok(Environment::Development),
            "prod" | "production" => Ok(Environment::Production),
            "test" => Ok(Environment::Test),
            _ => Err(anyhow::anyhow!(
                "Invalid APP_ENV: {} (use development|production|test)",
                s
            )),
        }
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Production => write!(f, "production"),
            Environment::Test => write!(f, "test"),
        }
    }
}

/// Where ads and quotes are persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryBackend {
    Postgres,
    Memory,
}

impl FromStr for RepositoryBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(RepositoryBackend::Postgres),
            "memory" => Ok(RepositoryBackend::Memory),
            _ => Err(anyhow::anyhow!("Invalid repository backend: {}", s)),
        }
    }
}

impl Display for RepositoryBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            RepositoryBackend::Postgres => write!(f, "postgres"),
            RepositoryBackend::Memory => write!(f, "memory"),
        }
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub environment: Environment,
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub repository_backend: RepositoryBackend,
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub images_dir: PathBuf,
    pub max_image_bytes: u64,
    pub body_limit_bytes: usize,
    pub via_cep_base_url: String,
    pub via_cep_timeout: Duration,
    pub log_format: String,
    pub http_concurrency_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: Environment::Development,
            server_port: SERVER_PORT,
            cors_origins: vec!["*".to_string()],
            repository_backend: RepositoryBackend::Postgres,
            database_url: None,
            db_max_connections: MAX_CONNECTIONS,
            db_timeout_seconds: CONNECTION_TIMEOUT_SECS,
            images_dir: PathBuf::from(IMAGES_DIR),
            max_image_bytes: MAX_IMAGE_BYTES,
            body_limit_bytes: BODY_LIMIT_BYTES,
            via_cep_base_url: VIA_CEP_BASE_URL.to_string(),
            via_cep_timeout: Duration::from_millis(VIA_CEP_TIMEOUT_MS),
            log_format: "text".to_string(),
            http_concurrency_limit: 10_000,
        }
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T, anyhow::Error> {
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("{} must be a valid number, got {:?}", name, raw)),
        _ => Ok(default),
    }
}

impl Config {
    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let environment: Environment = env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .parse()?;

        if environment != Environment::Production {
            dotenvy::dotenv().ok();
        }

        let cors_origins: Vec<String> = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let repository_backend = match env::var("REPOSITORY_BACKEND") {
            Ok(raw) if !raw.trim().is_empty() => raw.parse()?,
            _ => RepositoryBackend::Postgres,
        };

        let default_log_format = if environment == Environment::Production {
            "json"
        } else {
            "text"
        };

        let config = Config {
            environment,
            server_port: parse_var("APP_PORT", SERVER_PORT)?,
            cors_origins,
            repository_backend,
            database_url: env::var("DATABASE_URL")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            db_max_connections: parse_var("DB_MAX_CONNECTIONS", MAX_CONNECTIONS)?,
            db_timeout_seconds: parse_var("DB_TIMEOUT_SECONDS", CONNECTION_TIMEOUT_SECS)?,
            images_dir: env::var("IMAGES_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(IMAGES_DIR)),
            max_image_bytes: parse_var("MAX_IMAGE_BYTES", MAX_IMAGE_BYTES)?,
            body_limit_bytes: parse_var("BODY_LIMIT_BYTES", BODY_LIMIT_BYTES)?,
            via_cep_base_url: env::var("VIA_CEP_BASE_URL")
                .unwrap_or_else(|_| VIA_CEP_BASE_URL.to_string()),
            via_cep_timeout: Duration::from_millis(parse_var(
                "VIA_CEP_TIMEOUT_MS",
                VIA_CEP_TIMEOUT_MS,
            )?),
            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| default_log_format.to_string())
                .to_lowercase(),
            http_concurrency_limit: parse_var("HTTP_CONCURRENCY_LIMIT", 10_000usize)?.max(1),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        let mut errors = Vec::new();

        if self.repository_backend == RepositoryBackend::Postgres {
            match self.database_url.as_deref() {
                None => errors.push("DATABASE_URL is required for the postgres backend"),
                Some(url)
                    if !url.starts_with("postgres://") && !url.starts_with("postgresql://") =>
                {
                    errors.push("DATABASE_URL must be a valid PostgreSQL connection string")
                }
                Some(_) => {}
            }
        }

        if self.images_dir.as_os_str().is_empty() {
            errors.push("IMAGES_DIR is required");
        }
        if self.max_image_bytes == 0 {
            errors.push("MAX_IMAGE_BYTES must be > 0");
        }
        if self.body_limit_bytes == 0 {
            errors.push("BODY_LIMIT_BYTES must be > 0");
        }
        if self.via_cep_timeout.is_zero() {
            errors.push("VIA_CEP_TIMEOUT_MS must be > 0");
        }
        if self.via_cep_base_url.trim().is_empty() {
            errors.push("VIA_CEP_BASE_URL is required");
        }
        if self.is_production() && self.cors_origins.iter().any(|o| o == "*") {
            errors.push("CORS_ORIGINS cannot be '*' in production");
        }

        if !errors.is_empty() {
            return Err(anyhow::anyhow!("Config error: {}", errors.join("; ")));
        }

        Ok(())
    }
}
