use cropdoc_api::state::DEFAULT_MAX_UPLOAD_BYTES;
use cropdoc_classifier::DEFAULT_MODEL_PATH;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 5001;

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub model_path: PathBuf,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(v) => v
                .parse()
                .map_err(|_| ConfigError::InvalidValue(format!("PORT: {}", v)))?,
            None => DEFAULT_PORT,
        };

        let max_upload_bytes = match lookup("MAX_UPLOAD_BYTES") {
            Some(v) => match v.parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => return Err(ConfigError::InvalidValue(format!("MAX_UPLOAD_BYTES: {}", v))),
            },
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        let model_path = lookup("MODEL_PATH")
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL_PATH.to_string());

        Ok(Config {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            model_path: PathBuf::from(model_path),
            max_upload_bytes,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
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
