use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

pub const USER_CONFIG: &str = "~/.config/tomesearch/config.toml";
pub const LOCAL_CONFIG: &str = "config.toml";
pub const ENV_PREFIX: &str = "TOMESEARCH_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub database_url:    String,
    pub max_connections: u32,
    /// Prefixed onto the relative cover paths stored on editions.
    pub media_full_url:  String,
    pub min_confidence:  f32,
    pub log_level:       String,
}

impl Config {
    pub fn default_as_string() -> Result<String> {
        Ok(toml::to_string(&Self::default())?)
    }

    pub fn read_config() -> Result<Self> {
        Ok(Self::figment().extract()?)
    }

    pub fn figment() -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(shellexpand::tilde(USER_CONFIG).as_ref()))
            .merge(Toml::file(LOCAL_CONFIG))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// Falls back to a bare `DATABASE_URL` only when no configuration layer
    /// set the database url.
    pub fn with_fallback_database_url(mut self, database_url: Option<String>) -> Self {
        if let Some(database_url) = database_url {
            if self.database_url == Config::default().database_url {
                self.database_url = database_url;
            }
        }
        self
    }

    pub fn log_level(&self) -> Result<tracing::Level> {
        self.log_level
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid log level {:?}", self.log_level))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url:    "postgres://localhost/tomesearch".into(),
            max_connections: 5,
            media_full_url:  "http://localhost/images/".into(),
            min_confidence:  0.0,
            log_level:       "info".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use figment::Jail;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults_round_trip_through_toml() {
        let s = Config::default_as_string().unwrap();
        let config: Config = toml::from_str(&s).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn layers_override_in_order() {
        Jail::expect_with(|jail| {
            let home = jail.directory().to_path_buf();
            jail.set_env("HOME", home.display());
            jail.create_file(
                LOCAL_CONFIG,
                r#"
                media_full_url = "https://books.example.net/images/"
                log_level = "debug"
                "#,
            )?;
            jail.set_env("TOMESEARCH_LOG_LEVEL", "warn");
            let config = Config::read_config().map_err(|e| e.to_string())?;
            assert_eq!(config.media_full_url, "https://books.example.net/images/");
            assert_eq!(config.log_level, "warn");
            assert_eq!(config.max_connections, 5);
            assert_eq!(config.log_level().unwrap(), tracing::Level::WARN);
            Ok(())
        });
    }

    #[test]
    fn user_config_is_read_from_home() {
        Jail::expect_with(|jail| {
            let home = jail.directory().to_path_buf();
            jail.set_env("HOME", home.display());
            jail.create_dir(".config/tomesearch")?;
            jail.create_file(".config/tomesearch/config.toml", "max_connections = 9")?;
            jail.create_file(LOCAL_CONFIG, "max_connections = 12")?;
            let config = Config::read_config().map_err(|e| e.to_string())?;
            assert_eq!(config.max_connections, 12);
            std::fs::remove_file(home.join(LOCAL_CONFIG))
                .map_err(|e| e.to_string())?;
            let config = Config::read_config().map_err(|e| e.to_string())?;
            assert_eq!(config.max_connections, 9);
            Ok(())
        });
    }

    #[test]
    fn bare_database_url_only_fills_the_default() {
        let url = Some("postgres://db.example.net/books".to_string());
        let config = Config::default().with_fallback_database_url(url.clone());
        assert_eq!(config.database_url, "postgres://db.example.net/books");

        let configured = Config {
            database_url: "postgres://configured/books".into(),
            ..Config::default()
        };
        let config = configured.clone().with_fallback_database_url(url);
        assert_eq!(config, configured);
        assert_eq!(
            Config::default().with_fallback_database_url(None),
            Config::default()
        );
    }

    #[test]
    fn bad_log_level() {
        let config = Config {
            log_level: "chatty".into(),
            ..Config::default()
        };
        assert!(config.log_level().is_err());
    }
}
