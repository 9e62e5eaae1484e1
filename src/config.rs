use std::env;
use std::str::FromStr;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {var}: '{value}'")]
    InvalidValue { var: &'static str, value: String },

    #[error("Unknown STORAGE_BACKEND '{0}' (expected 'mongodb' or 'memory')")]
    UnknownBackend(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    MongoDb,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mongodb" | "mongo" => Ok(StorageBackend::MongoDb),
            "memory" | "in-memory" => Ok(StorageBackend::Memory),
            other => Err(ConfigError::UnknownBackend(other.to_string())),
        }
    }
}

/// Configuração do serviço, lida do ambiente (e do `.env`)
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub storage: StorageBackend,
    pub database_url: String,
    /// Sobrescreve o database da URI quando definido
    pub database_name: Option<String>,
    pub max_pool_size: u32,
    pub min_pool_size: u32,
    pub cors_allowed_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let storage = match lookup("STORAGE_BACKEND") {
            Some(value) => value.parse()?,
            None => StorageBackend::MongoDb,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "PORT", 8080)?,
            storage,
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| "mongodb://localhost:27017/user_service".to_string()),
            database_name: lookup("MONGODB_DATABASE").filter(|s| !s.trim().is_empty()),
            max_pool_size: parse_or(&lookup, "MONGODB_MAX_POOL_SIZE", 20)?,
            min_pool_size: parse_or(&lookup, "MONGODB_MIN_POOL_SIZE", 5)?,
            cors_allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(str::trim)
                        .filter(|o| !o.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default(),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(var) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { var, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.storage, StorageBackend::MongoDb);
        assert_eq!(config.database_url, "mongodb://localhost:27017/user_service");
        assert_eq!(config.database_name, None);
        assert_eq!((config.max_pool_size, config.min_pool_size), (20, 5));
        assert!(config.cors_allowed_origins.is_empty());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PORT", "3002"),
            ("STORAGE_BACKEND", "Memory"),
            ("MONGODB_DATABASE", "crud"),
            ("CORS_ALLOWED_ORIGINS", "http://localhost:3000, http://127.0.0.1:3000,"),
        ])
        .unwrap();

        assert_eq!(config.port, 3002);
        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.database_name.as_deref(), Some("crud"));
        assert_eq!(
            config.cors_allowed_origins,
            vec!["http://localhost:3000", "http://127.0.0.1:3000"]
        );
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = config_from(&[("PORT", "99999")]).unwrap_err();
        assert_eq!(err, ConfigError::InvalidValue { var: "PORT", value: "99999".into() });

        let err = config_from(&[("STORAGE_BACKEND", "redis")]).unwrap_err();
        assert_eq!(err, ConfigError::UnknownBackend("redis".into()));
    }
}
