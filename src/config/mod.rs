use serde::Deserialize;
use tokio::sync::OnceCell;

mod config_dir;
pub use config_dir::{CONFIG_PATH_ENV, find_config_file, read_config, read_config_file};

mod error;
pub use error::{ConfigError, ConfigResult};

static CONFIG: OnceCell<Config> = OnceCell::const_new();

/// Overrides `app.database_uri`, shared with the admin cli.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

const DEFAULT_SESSION_TTL_HOURS: i64 = 24;

#[derive(Debug, Deserialize)]
pub struct Config {
    host: Host,
    app: App,
}

#[derive(Debug, Deserialize)]
pub struct Host {
    bindto: String,
}

#[derive(Debug, Deserialize)]
pub struct App {
    jwt: String,
    database_uri: String,
    #[serde(default)]
    docs: bool,
    #[serde(default = "default_session_ttl_hours")]
    session_ttl_hours: i64,
}

fn default_session_ttl_hours() -> i64 {
    DEFAULT_SESSION_TTL_HOURS
}

impl Config {
    #[tracing::instrument]
    pub async fn get_or_init(use_local: bool) -> &'static Config {
        CONFIG
            .get_or_init(|| async {
                let read_cfg = |use_local| -> ConfigResult<Self> {
                    let bytes = read_config(use_local)?;
                    let config = Self::from_slice(&bytes)?;
                    Ok(config.with_database_uri(std::env::var(DATABASE_URL_ENV).ok()))
                };

                match read_cfg(use_local) {
                    Ok(c) => c,
                    Err(e) => {
                        if !matches!(e, ConfigError::ConfigNotFound) {
                            crate::error::log_error(&e);
                        }
                        tracing::error!("Config not found or invalid.");
                        std::process::exit(1);
                    }
                }
            })
            .await
    }

    pub fn from_slice(bytes: &[u8]) -> ConfigResult<Self> {
        let config: Self = toml::from_slice(bytes)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.app.jwt.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "app.jwt",
                reason: "session signing key must not be empty",
            });
        }
        if self.app.session_ttl_hours <= 0 {
            return Err(ConfigError::InvalidValue {
                key: "app.session_ttl_hours",
                reason: "must be positive",
            });
        }
        Ok(())
    }

    /// Replaces the database uri when `uri` is set and not empty.
    pub fn with_database_uri(mut self, uri: Option<String>) -> Self {
        if let Some(uri) = uri.filter(|u| !u.is_empty()) {
            self.app.database_uri = uri;
        }
        self
    }

    #[inline]
    pub fn host(&self) -> &Host {
        &self.host
    }

    #[inline]
    pub fn app(&self) -> &App {
        &self.app
    }
}

impl Host {
    #[inline]
    pub fn bindto(&self) -> &str {
        &self.bindto
    }
}

impl App {
    #[inline]
    pub fn jwt(&self) -> &str {
        &self.jwt
    }

    #[inline]
    pub fn database_uri(&self) -> &str {
        &self.database_uri
    }

    /// Whether the swagger ui is mounted.
    #[inline]
    pub fn docs(&self) -> bool {
        self.docs
    }

    #[inline]
    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(self.session_ttl_hours)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[tokio::test]
    async fn config_test() {
        let config = Config::get_or_init(true).await;
        assert_eq!(config.host().bindto(), "127.0.0.1:5000"); // defaults
    }

    #[test]
    fn config_optional_fields_fall_back() {
        let raw = br#"
            [host]
            bindto = "0.0.0.0:8080"

            [app]
            jwt = "secret"
            database_uri = "postgres://localhost/db"
        "#;

        let config = Config::from_slice(raw).unwrap();
        assert!(!config.app().docs());
        assert_eq!(config.app().session_ttl(), chrono::Duration::hours(24));
        assert_eq!(config.app().jwt(), "secret");
    }

    #[test]
    fn config_rejects_bad_values() {
        let raw = br#"
            [host]
            bindto = "0.0.0.0:8080"

            [app]
            jwt = ""
            database_uri = "postgres://localhost/db"
        "#;
        assert!(matches!(
            Config::from_slice(raw),
            Err(ConfigError::InvalidValue { key: "app.jwt", .. })
        ));

        let raw = br#"
            [host]
            bindto = "0.0.0.0:8080"

            [app]
            jwt = "secret"
            database_uri = "postgres://localhost/db"
            session_ttl_hours = 0
        "#;
        assert!(matches!(
            Config::from_slice(raw),
            Err(ConfigError::InvalidValue { key: "app.session_ttl_hours", .. })
        ));
    }

    #[test]
    fn database_uri_override() {
        let raw = br#"
            [host]
            bindto = "0.0.0.0:8080"

            [app]
            jwt = "secret"
            database_uri = "postgres://localhost/db"
        "#;

        let config = Config::from_slice(raw).unwrap().with_database_uri(Some(String::new()));
        assert_eq!(config.app().database_uri(), "postgres://localhost/db");

        let config = config.with_database_uri(Some("postgres://db.internal/course".into()));
        assert_eq!(config.app().database_uri(), "postgres://db.internal/course");
    }

    #[test]
    fn config_missing_section_is_rejected() {
        let raw = br#"
            [host]
            bindto = "0.0.0.0:8080"
        "#;

        assert!(matches!(
            Config::from_slice(raw),
            Err(ConfigError::TomlDeError(_))
        ));
    }
}
