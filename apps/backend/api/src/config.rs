use std::env;
use std::path::PathBuf;

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub model_dir: PathBuf,
    /// `None` disables the Prometheus listener
    pub metrics_port: Option<u16>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("HOST")
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(|| "127.0.0.1".to_string());

        let port = lookup("PORT")
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| "8000".to_string())
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue("PORT".to_string()))?;

        let model_dir = lookup(iris_model::loader::MODEL_DIR_ENV)
            .filter(|d| !d.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(iris_model::loader::DEFAULT_MODEL_DIR));

        let metrics_port = match lookup("METRICS_PORT") {
            Some(p) if p.trim().is_empty() => None,
            Some(p) => Some(
                p.trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue("METRICS_PORT".to_string()))?,
            ),
            None => Some(9090),
        };

        Ok(Config {
            host,
            port,
            model_dir,
            metrics_port,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn metrics_addr(&self) -> Option<String> {
        self.metrics_port
            .map(|port| format!("{}:{}", self.host, port))
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidValue(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue(var) => write!(f, "Invalid value for: {}", var),
        }
    }
}

impl std::error::Error for ConfigError {}
