use std::env;
use std::str::FromStr;
use tracing::{debug, error, info};

use crate::config::ConfigError;

/// Connection settings and collection names for the record store
#[derive(Debug, Clone)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
    /// Credentials are only applied when both are set
    pub username: Option<String>,
    pub password: Option<String>,
    pub record_collection: String,
    pub user_collection: String,
    pub pool_size: u32,
    pub connection_timeout_secs: u64,
}

impl MongoConfig {
    /// Reads MONGO_URI and MONGO_DATABASE (required), MONGO_USERNAME / MONGO_PASSWORD,
    /// MONGO_RECORD_COLLECTION, MONGO_USER_COLLECTION, MONGO_POOL_SIZE and
    /// MONGO_CONNECTION_TIMEOUT (seconds).
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading MongoDB configuration from environment variables");
        let config = Self::from_lookup(|key| env::var(key).ok())?;
        debug!(
            database = %config.database,
            records = %config.record_collection,
            users = %config.user_collection,
            with_credentials = config.username.is_some(),
            "MongoDB configuration loaded"
        );
        Ok(config)
    }

    /// Builds the config from any key lookup; unset optional keys take the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = MongoConfig::default();
        let required = |key: &str| {
            lookup(key).ok_or_else(|| {
                error!("{} environment variable not found", key);
                ConfigError::EnvVarNotFound(key.to_string())
            })
        };

        let config = MongoConfig {
            uri: required("MONGO_URI")?,
            database: required("MONGO_DATABASE")?,
            username: lookup("MONGO_USERNAME"),
            password: lookup("MONGO_PASSWORD"),
            record_collection: lookup("MONGO_RECORD_COLLECTION").unwrap_or(defaults.record_collection),
            user_collection: lookup("MONGO_USER_COLLECTION").unwrap_or(defaults.user_collection),
            pool_size: parsed(&lookup, "MONGO_POOL_SIZE", defaults.pool_size)?,
            connection_timeout_secs: parsed(&lookup, "MONGO_CONNECTION_TIMEOUT", defaults.connection_timeout_secs)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::ValidationError(msg.to_string()));

        if self.uri.is_empty() || self.database.is_empty() {
            return invalid("MongoDB URI and database cannot be empty");
        }
        if self.record_collection.is_empty() || self.user_collection.is_empty() {
            return invalid("MongoDB collection names cannot be empty");
        }
        if self.pool_size == 0 || self.connection_timeout_secs == 0 {
            return invalid("MongoDB pool size and connection timeout must be greater than 0");
        }
        if self.username.as_deref() == Some("") || self.password.as_deref() == Some("") {
            return invalid("MongoDB credentials cannot be empty if set");
        }
        Ok(())
    }
}

fn parsed<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| {
            error!("Invalid {} value: {}", key, raw);
            ConfigError::InvalidValue(format!("Invalid {} value", key))
        }),
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        MongoConfig {
            uri: "mongodb://localhost:27017".to_string(),
            database: "agent_registry".to_string(),
            username: None,
            password: None,
            record_collection: "records".to_string(),
            user_collection: "users".to_string(),
            pool_size: 10,
            connection_timeout_secs: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<MongoConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        MongoConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_minimal_env_takes_defaults() {
        let config = load(&[("MONGO_URI", "mongodb://db:27017"), ("MONGO_DATABASE", "agents")]).unwrap();
        assert_eq!(config.uri, "mongodb://db:27017");
        assert_eq!(config.database, "agents");
        assert_eq!(config.record_collection, "records");
        assert_eq!(config.user_collection, "users");
        assert_eq!(config.pool_size, 10);
        assert_eq!(config.connection_timeout_secs, 5);
        assert!(config.username.is_none());
    }

    #[test]
    fn test_missing_uri() {
        let err = load(&[("MONGO_DATABASE", "agents")]).unwrap_err();
        assert!(matches!(err, ConfigError::EnvVarNotFound(key) if key == "MONGO_URI"));
    }

    #[test]
    fn test_overrides_and_bad_numbers() {
        let base = [("MONGO_URI", "mongodb://db"), ("MONGO_DATABASE", "agents")];

        let mut vars = base.to_vec();
        vars.extend([("MONGO_RECORD_COLLECTION", "agents"), ("MONGO_POOL_SIZE", " 4 ")]);
        let config = load(&vars).unwrap();
        assert_eq!(config.record_collection, "agents");
        assert_eq!(config.pool_size, 4);

        let mut vars = base.to_vec();
        vars.push(("MONGO_CONNECTION_TIMEOUT", "soon"));
        assert!(matches!(load(&vars).unwrap_err(), ConfigError::InvalidValue(_)));

        let mut vars = base.to_vec();
        vars.push(("MONGO_POOL_SIZE", "0"));
        assert!(matches!(load(&vars).unwrap_err(), ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_validate_rejects_empty_values() {
        assert!(MongoConfig::default().validate().is_ok());

        let mut config = MongoConfig::default();
        config.user_collection = String::new();
        assert!(config.validate().is_err());

        let mut config = MongoConfig::default();
        config.username = Some("agent".to_string());
        config.password = Some(String::new());
        assert!(config.validate().is_err());
    }
}
