use std::path::PathBuf;

use config::{Config, ConfigError, Environment, Source};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database_url: String,
    /// Also read from `SCODE`. Setting both names is a configuration error.
    #[serde(alias = "scode")]
    pub upload_secret: String,
    pub host: String,
    pub port: u16,
    pub upload_dir: PathBuf,
    pub public_dir: PathBuf,
}

impl Settings {
    /// Reads settings from the process environment. Call `dotenv` first if a
    /// `.env` file should be honoured.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(Environment::default().try_parsing(true))
    }

    pub fn from_source<S>(source: S) -> Result<Self, ConfigError>
    where
        S: Source + Send + Sync + 'static,
    {
        let settings: Settings = Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 80)?
            .set_default("upload_dir", "uploads")?
            .set_default("public_dir", "public")?
            .add_source(source)
            .build()?
            .try_deserialize()?;

        if settings.upload_secret.is_empty() {
            return Err(ConfigError::Message(
                "UPLOAD_SECRET must not be empty".to_string(),
            ));
        }

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::default().try_parsing(true).source(Some(map))
    }

    #[test]
    fn applies_defaults() {
        let settings = Settings::from_source(env(&[
            ("DATABASE_URL", "postgres://localhost/photos"),
            ("UPLOAD_SECRET", "hunter2"),
        ]))
        .unwrap();

        assert_eq!(settings.database_url, "postgres://localhost/photos");
        assert_eq!(settings.upload_secret, "hunter2");
        assert_eq!(settings.host, "0.0.0.0");
        assert_eq!(settings.port, 80);
        assert_eq!(settings.upload_dir, PathBuf::from("uploads"));
        assert_eq!(settings.public_dir, PathBuf::from("public"));
    }

    #[test]
    fn overrides_port_and_dirs() {
        let settings = Settings::from_source(env(&[
            ("DATABASE_URL", "postgres://localhost/photos"),
            ("UPLOAD_SECRET", "hunter2"),
            ("PORT", "8080"),
            ("UPLOAD_DIR", "/srv/uploads"),
        ]))
        .unwrap();

        assert_eq!(settings.port, 8080);
        assert_eq!(settings.upload_dir, PathBuf::from("/srv/uploads"));
    }

    #[test]
    fn accepts_legacy_secret_name() {
        let settings = Settings::from_source(env(&[
            ("DATABASE_URL", "postgres://localhost/photos"),
            ("sCode", "legacy"),
        ]))
        .unwrap();

        assert_eq!(settings.upload_secret, "legacy");
    }

    #[test]
    fn rejects_both_secret_names_at_once() {
        let result = Settings::from_source(env(&[
            ("DATABASE_URL", "postgres://localhost/photos"),
            ("UPLOAD_SECRET", "hunter2"),
            ("sCode", "legacy"),
        ]));

        assert!(result.is_err());
    }

    #[test]
    fn rejects_missing_database_url() {
        assert!(Settings::from_source(env(&[("UPLOAD_SECRET", "hunter2")])).is_err());
    }

    #[test]
    fn rejects_empty_secret() {
        let result = Settings::from_source(env(&[
            ("DATABASE_URL", "postgres://localhost/photos"),
            ("UPLOAD_SECRET", ""),
        ]));

        assert!(result.is_err());
    }
}
