use mtgstats_grid::LayoutVariant;
use serde::Deserialize;
use std::env::vars;
use std::fmt::Display;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Env {
    #[serde(rename = "local")]
    Local,
    #[serde(rename = "prod")]
    Prod,
    #[serde(rename = "test")]
    Test,
}

impl Display for Env {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Env::Local => write!(f, "local"),
            Env::Prod => write!(f, "prod"),
            Env::Test => write!(f, "test"),
        }
    }
}

// The final, validated configuration struct.
#[derive(Debug, Clone)]
pub struct Config {
    env: Env,
    // Without a database the service serves the in-memory store
    database_url: Option<String>,
    server_addr: String,
    port: u16,
    // Secret for verifying viewer session tokens
    jwt_secret: String,
    // Table layout handed to every viewer unless overridden per request
    grid_layout: LayoutVariant,
}

// An intermediate struct for deserializing environment variables
// where most fields are optional.
#[derive(Deserialize)]
struct RawConfig {
    env: Env,
    database_url: Option<String>,
    server_addr: Option<String>,
    port: Option<u16>,
    jwt_secret: Option<String>,
    grid_layout: Option<String>,
}

impl Config {
    /// Create a test configuration with default values.
    ///
    /// This function is available for both unit tests and integration tests.
    /// It should not be used in production code.
    pub fn new_for_test() -> Self {
        Self {
            env: Env::Local,
            database_url: None,
            server_addr: "127.0.0.1".to_string(),
            port: 8080,
            jwt_secret: "test-jwt-secret-key-for-local-development".to_string(),
            grid_layout: LayoutVariant::default(),
        }
    }

    /// Test configuration serving tables with a specific layout.
    pub fn new_for_test_with_layout(grid_layout: LayoutVariant) -> Self {
        Self {
            grid_layout,
            ..Self::new_for_test()
        }
    }

    pub fn environment(&self) -> &Env {
        &self.env
    }

    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref()
    }

    pub fn server_addr(&self) -> &str {
        &self.server_addr
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn is_local(&self) -> bool {
        matches!(self.env, Env::Local)
    }

    /// Get the JWT secret for verifying session tokens.
    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    pub fn grid_layout(&self) -> LayoutVariant {
        self.grid_layout
    }

    /// Initializes configuration by reading from environment variables
    /// and applying environment-aware defaults.
    pub fn init() -> anyhow::Result<Self> {
        info!("Loading configuration from environment variables");

        // First, deserialize into a temporary struct that allows for optional fields
        let raw_config: RawConfig = serde_env::from_iter(vars())?;
        Self::from_raw(raw_config)
    }

    fn from_raw(raw_config: RawConfig) -> anyhow::Result<Self> {
        let RawConfig {
            env,
            database_url,
            server_addr,
            port,
            jwt_secret,
            grid_layout,
        } = raw_config;

        let server_addr = match server_addr {
            Some(addr) => {
                info!("Using provided SERVER_ADDR: {}", addr);
                addr
            }
            None => {
                let default_addr = match env {
                    Env::Local => "127.0.0.1",
                    _ => "0.0.0.0",
                };
                info!(
                    "SERVER_ADDR not set, defaulting to {} for {} environment",
                    default_addr, env
                );
                default_addr.to_string()
            }
        };

        let port = match port {
            Some(port) => port,
            None if matches!(env, Env::Local) => {
                info!("PORT not set, defaulting to 8080 for local environment");
                8080
            }
            None => anyhow::bail!("PORT must be set for {} environment", env),
        };

        let jwt_secret = match jwt_secret {
            Some(secret) => secret,
            None if matches!(env, Env::Local | Env::Test) => {
                info!("JWT_SECRET not set, using default for {} environment", env);
                "default-jwt-secret-for-local-development-only".to_string()
            }
            None => anyhow::bail!("JWT_SECRET must be set for {} environment", env),
        };

        // Prod must not silently fall back to the in-memory store
        if database_url.is_none() && matches!(env, Env::Prod) {
            anyhow::bail!("DATABASE_URL must be set for {} environment", env);
        }

        let grid_layout = match grid_layout {
            Some(name) => name.parse::<LayoutVariant>()?,
            None => {
                let layout = LayoutVariant::default();
                info!("GRID_LAYOUT not set, defaulting to {}", layout);
                layout
            }
        };

        Ok(Config {
            env,
            database_url,
            server_addr,
            port,
            jwt_secret,
            grid_layout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_env::from_iter;

    #[test]
    fn local_defaults() {
        let raw: RawConfig = from_iter(vec![("ENV", "local")]).expect("RawConfig should deserialize");

        let config = Config::from_raw(raw).expect("local config should build");
        assert_eq!(config.server_addr(), "127.0.0.1");
        assert_eq!(config.port(), 8080);
        assert_eq!(config.database_url(), None);
        assert_eq!(config.grid_layout(), LayoutVariant::AdminOnlyStyled);
        assert!(config.is_local());
    }

    #[test]
    fn prod_requires_port_secret_and_database() {
        let raw: RawConfig = from_iter(vec![("ENV", "prod"), ("JWT_SECRET", "s")])
            .expect("RawConfig should deserialize");
        let err = Config::from_raw(raw).unwrap_err().to_string();
        assert!(err.contains("PORT"));

        let raw: RawConfig = from_iter(vec![("ENV", "prod"), ("PORT", "8080")])
            .expect("RawConfig should deserialize");
        let err = Config::from_raw(raw).unwrap_err().to_string();
        assert!(err.contains("JWT_SECRET"));

        let raw: RawConfig = from_iter(vec![("ENV", "prod"), ("PORT", "8080"), ("JWT_SECRET", "s")])
            .expect("RawConfig should deserialize");
        let err = Config::from_raw(raw).unwrap_err().to_string();
        assert!(err.contains("DATABASE_URL"));
    }

    #[test]
    fn prod_builds_with_everything_set() {
        let raw: RawConfig = from_iter(vec![
            ("ENV", "prod"),
            ("PORT", "9000"),
            ("JWT_SECRET", "prod-secret"),
            ("DATABASE_URL", "postgres://example"),
        ])
        .expect("RawConfig should deserialize");

        let config = Config::from_raw(raw).expect("prod config should build");
        assert_eq!(config.server_addr(), "0.0.0.0");
        assert_eq!(config.port(), 9000);
        assert_eq!(config.jwt_secret(), "prod-secret");
        assert_eq!(config.database_url(), Some("postgres://example"));
    }

    #[test]
    fn grid_layout_is_parsed() {
        let raw: RawConfig = from_iter(vec![("ENV", "test"), ("PORT", "8080"), ("GRID_LAYOUT", "login-only+styled")])
            .expect("RawConfig should deserialize");
        let config = Config::from_raw(raw).expect("test config should build");
        assert_eq!(config.grid_layout(), LayoutVariant::LoginOnlyStyled);

        let raw: RawConfig = from_iter(vec![("ENV", "local"), ("GRID_LAYOUT", "fancy")])
            .expect("RawConfig should deserialize");
        let err = Config::from_raw(raw).unwrap_err().to_string();
        assert!(err.contains("fancy"));
    }
}
