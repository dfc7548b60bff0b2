use std::{fmt::Display, str::FromStr, time::Duration};
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct MongoConfig {
    pub connection_string: String,
    pub db_name: String,
    pub collection: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on. `0` lets the OS pick one.
    pub port: u16,
    /// Number of http workers
    pub workers: usize,
    /// Connection settings for MongoDB. When absent the inmemory
    /// store is used.
    pub mongodb: Option<MongoConfig>,
    /// Upper bound for a single store operation done on behalf of a request.
    pub store_timeout: Duration,
    /// Insert the two demo users into the inmemory store on startup
    pub seed_users: bool,
}

impl Config {
    pub fn new() -> Self {
        let mongodb = match std::env::var("MONGODB_CONNECTION_STRING") {
            Ok(connection_string) => Some(MongoConfig {
                connection_string,
                db_name: std::env::var("MONGODB_NAME").unwrap_or_else(|_| "lab8".into()),
                collection: std::env::var("MONGODB_COLLECTION")
                    .unwrap_or_else(|_| "users".into()),
            }),
            Err(_) => {
                info!("Did not find MONGODB_CONNECTION_STRING environment variable.");
                None
            }
        };

        Self {
            port: parse_env("PORT", 8080),
            workers: parse_env("HTTP_WORKERS", 4),
            mongodb,
            store_timeout: Duration::from_millis(parse_env("STORE_TIMEOUT_MS", 10_000)),
            seed_users: parse_env("SEED_USERS", true),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_env<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
{
    let value = match std::env::var(key) {
        Ok(value) => value,
        Err(_) => return default,
    };
    match value.parse::<T>() {
        Ok(parsed) => parsed,
        Err(_) => {
            warn!(
                "The given {}: {} is not valid, falling back to the default: {}.",
                key, value, default
            );
            default
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_falls_back_to_default_on_invalid_values() {
        std::env::set_var("USER_SERVICE_TEST_PORT", "not-a-port");
        assert_eq!(parse_env("USER_SERVICE_TEST_PORT", 8080u16), 8080);

        std::env::set_var("USER_SERVICE_TEST_PORT", "5000");
        assert_eq!(parse_env("USER_SERVICE_TEST_PORT", 8080u16), 5000);

        assert!(parse_env("USER_SERVICE_TEST_UNSET_FLAG", true));
    }
}
