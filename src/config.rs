use anyhow::{Context, anyhow};
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub weather: WeatherConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    #[serde(default)]
    pub admin: AdminConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub expiry_hours: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_weather_api_url")]
    pub api_url: String,
    /// Used when a course has no address on file.
    #[serde(default = "default_weather_location")]
    pub default_location: String,
    #[serde(default = "default_weather_timeout")]
    pub timeout_secs: u64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: default_weather_api_url(),
            default_location: default_weather_location(),
            timeout_secs: default_weather_timeout(),
        }
    }
}

fn default_weather_api_url() -> String {
    "https://api.weatherapi.com/v1".to_string()
}

fn default_weather_location() -> String {
    "Pune,Maharashtra,India".to_string()
}

fn default_weather_timeout() -> u64 {
    10
}

/// Requests per minute per client IP.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    pub general_per_minute: u32,
    pub auth_per_minute: u32,
    pub public_per_minute: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            general_per_minute: 100,
            auth_per_minute: 5,
            public_per_minute: 200,
        }
    }
}

/// Optional bootstrap account promoted to admin at startup.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AdminConfig {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl Config {
    pub fn from_toml() -> anyhow::Result<Self> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        // Without a config file everything comes from the environment.
        let config_result = std::fs::read_to_string(&config_path);

        let mut config: Config = match config_result {
            Ok(config_str) => toml::from_str(&config_str)
                .with_context(|| format!("failed to parse config file {config_path}"))?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                fn get_env(name: &str) -> Option<String> {
                    env::var(name).ok()
                }
                fn get_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
                    env::var(name)
                        .ok()
                        .and_then(|v| v.parse::<T>().ok())
                        .unwrap_or(default)
                }

                let database_url = get_env("DATABASE_URL").ok_or_else(|| {
                    anyhow!("DATABASE_URL is not set and no config file was found at {config_path}")
                })?;

                let rate_defaults = RateLimitConfig::default();

                Config {
                    server: ServerConfig {
                        host: get_env("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                        port: get_env_parse("PORT", 8080u16),
                    },
                    database: DatabaseConfig {
                        url: database_url,
                        max_connections: get_env_parse("DB_MAX_CONNECTIONS", 10u32),
                    },
                    jwt: JwtConfig {
                        secret: get_env("JWT_SECRET")
                            .unwrap_or_else(|| "change-me-in-production".to_string()),
                        expiry_hours: get_env_parse("JWT_EXPIRY_HOURS", 24i64),
                    },
                    weather: WeatherConfig {
                        api_key: get_env("WEATHER_API_KEY").unwrap_or_default(),
                        api_url: get_env("WEATHER_API_URL")
                            .unwrap_or_else(default_weather_api_url),
                        default_location: get_env("WEATHER_DEFAULT_LOCATION")
                            .unwrap_or_else(default_weather_location),
                        timeout_secs: get_env_parse("WEATHER_TIMEOUT_SECS", 10u64),
                    },
                    rate_limit: RateLimitConfig {
                        general_per_minute: get_env_parse(
                            "RATE_LIMIT_GENERAL",
                            rate_defaults.general_per_minute,
                        ),
                        auth_per_minute: get_env_parse(
                            "RATE_LIMIT_AUTH",
                            rate_defaults.auth_per_minute,
                        ),
                        public_per_minute: get_env_parse(
                            "RATE_LIMIT_PUBLIC",
                            rate_defaults.public_per_minute,
                        ),
                    },
                    admin: AdminConfig {
                        email: get_env("ADMIN_EMAIL"),
                        password: get_env("ADMIN_PASSWORD"),
                    },
                }
            }
            Err(e) => {
                return Err(anyhow!("cannot read config file {config_path}: {e}"));
            }
        };

        // Environment variables win over the file.
        if let Ok(v) = env::var("SERVER_HOST") {
            config.server.host = v;
        }
        if let Ok(v) = env::var("PORT")
            && let Ok(p) = v.parse()
        {
            config.server.port = p;
        }
        if let Ok(v) = env::var("DATABASE_URL") {
            config.database.url = v;
        }
        if let Ok(v) = env::var("DB_MAX_CONNECTIONS")
            && let Ok(mc) = v.parse()
        {
            config.database.max_connections = mc;
        }
        if let Ok(v) = env::var("JWT_SECRET") {
            config.jwt.secret = v;
        }
        if let Ok(v) = env::var("JWT_EXPIRY_HOURS")
            && let Ok(n) = v.parse()
        {
            config.jwt.expiry_hours = n;
        }
        if let Ok(v) = env::var("WEATHER_API_KEY") {
            config.weather.api_key = v;
        }
        if let Ok(v) = env::var("WEATHER_API_URL") {
            config.weather.api_url = v;
        }
        if let Ok(v) = env::var("WEATHER_DEFAULT_LOCATION") {
            config.weather.default_location = v;
        }
        if let Ok(v) = env::var("RATE_LIMIT_GENERAL")
            && let Ok(n) = v.parse()
        {
            config.rate_limit.general_per_minute = n;
        }
        if let Ok(v) = env::var("RATE_LIMIT_AUTH")
            && let Ok(n) = v.parse()
        {
            config.rate_limit.auth_per_minute = n;
        }
        if let Ok(v) = env::var("RATE_LIMIT_PUBLIC")
            && let Ok(n) = v.parse()
        {
            config.rate_limit.public_per_minute = n;
        }
        if let Ok(v) = env::var("ADMIN_EMAIL") {
            config.admin.email = Some(v);
        }
        if let Ok(v) = env::var("ADMIN_PASSWORD") {
            config.admin.password = Some(v);
        }

        if config.jwt.expiry_hours <= 0 {
            return Err(anyhow!("jwt.expiry_hours must be positive"));
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_toml() {
        let raw = r#"
            [server]
            host = "127.0.0.1"
            port = 9000

            [database]
            url = "sqlite::memory:"
            max_connections = 1

            [jwt]
            secret = "s3cret"
            expiry_hours = 12
        "#;
        let config: Config = toml::from_str(raw).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.jwt.expiry_hours, 12);
        assert!(config.weather.api_key.is_empty());
        assert_eq!(config.weather.api_url, "https://api.weatherapi.com/v1");
        assert_eq!(config.rate_limit.auth_per_minute, 5);
        assert_eq!(config.rate_limit.public_per_minute, 200);
        assert!(config.admin.email.is_none());
    }

    #[test]
    fn test_weather_section_overrides_defaults() {
        let raw = r#"
            [server]
            host = "0.0.0.0"
            port = 8080

            [database]
            url = "postgres://localhost/golf"
            max_connections = 5

            [jwt]
            secret = "x"
            expiry_hours = 24

            [weather]
            api_key = "abc"
            default_location = "St Andrews,UK"
        "#;
        let config: Config = toml::from_str(raw).unwrap();
        assert_eq!(config.weather.api_key, "abc");
        assert_eq!(config.weather.default_location, "St Andrews,UK");
        assert_eq!(config.weather.timeout_secs, 10);
    }
}
