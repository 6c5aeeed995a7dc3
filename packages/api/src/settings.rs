use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

impl Server {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Connection settings. `url` wins when present, otherwise the URL is
/// assembled from the individual parts. There is no default password.
#[derive(Debug, Clone, Deserialize)]
pub struct Database {
    pub url: Option<String>,
    pub user: String,
    #[serde(default)]
    pub password: String,
    pub host: String,
    pub port: u16,
    pub name: String,
    pub pool: u32,
}

impl Database {
    pub fn url(&self) -> String {
        match &self.url {
            Some(url) => url.clone(),
            None => format!(
                "postgres://{}:{}@{}:{}/{}",
                self.user, self.password, self.host, self.port, self.name
            ),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Auth {
    /// HMAC secret used to sign tokens
    #[serde(default)]
    pub secret: String,
    /// Token lifetime in seconds
    pub ttl: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: Server,
    pub database: Database,
    pub auth: Auth,
}

impl Settings {
    /// Load from `config.toml` (optional) and the environment, after reading `.env`.
    pub fn new() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_file("config.toml")
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3001)?
            .set_default("database.user", "notes")?
            .set_default("database.host", "localhost")?
            .set_default("database.port", 5432)?
            .set_default("database.name", "notes")?
            .set_default("database.pool", 5)?
            .set_default("auth.ttl", 60 * 60)?
            .add_source(File::new(path, FileFormat::Toml).required(false))
            .add_source(Environment::default().separator("_"))
            .build()?;

        config.try_deserialize()
    }

    /// Check the settings a server process cannot run without.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.secret.trim().is_empty() {
            return Err(ConfigError::Message(
                "auth.secret must be set (e.g. via AUTH_SECRET)".into(),
            ));
        }
        if self.auth.ttl == 0 {
            return Err(ConfigError::Message("auth.ttl must be positive".into()));
        }
        Ok(())
    }
}
