//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ServiceConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable holding the port of the service being started.
pub const ENV_PORT: &str = "PORT";
/// Environment variable holding the time service base URL.
pub const ENV_TIME_SERVICE_URL: &str = "TIME_SERVICE_URL";
/// Older name for [`ENV_TIME_SERVICE_URL`], still honoured.
pub const ENV_TIME_SERVICE_URL_LEGACY: &str = "SERVICE_A_URL";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid environment variable {name}='{value}'")]
    Env { name: &'static str, value: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Which service a `PORT` override applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceRole {
    Time,
    Greeting,
}

/// Overrides read from the process environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    pub port: Option<u16>,
    pub time_service_url: Option<String>,
}

impl EnvOverrides {
    /// Read overrides from the real process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read overrides through an arbitrary lookup function.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup(ENV_PORT).filter(|v| !v.trim().is_empty()) {
            Some(value) => Some(value.trim().parse::<u16>().map_err(|_| ConfigError::Env {
                name: ENV_PORT,
                value,
            })?),
            None => None,
        };

        let time_service_url = lookup(ENV_TIME_SERVICE_URL)
            .or_else(|| lookup(ENV_TIME_SERVICE_URL_LEGACY))
            .filter(|v| !v.trim().is_empty());

        Ok(Self {
            port,
            time_service_url,
        })
    }

    /// The `PORT` value that [`apply`](Self::apply) will skip for `role`.
    pub fn ignored_port(&self, role: Option<ServiceRole>) -> Option<u16> {
        match role {
            Some(_) => None,
            None => self.port,
        }
    }

    /// Apply the overrides to `config`. `PORT` is only applied when a single
    /// role is being started.
    pub fn apply(&self, config: &mut ServiceConfig, role: Option<ServiceRole>) {
        if let Some(port) = self.port {
            match role {
                Some(ServiceRole::Time) => config.time = config.time.with_port(port),
                Some(ServiceRole::Greeting) => config.greeting = config.greeting.with_port(port),
                None => {}
            }
        }
        if let Some(url) = &self.time_service_url {
            config.upstream.base_url = url.clone();
        }
    }
}

/// Parse configuration from a TOML file without validating it.
pub fn read_config_file(path: &Path) -> Result<ServiceConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Build the effective configuration: defaults, then the optional file, then
/// environment overrides, then validation.
pub fn load_config(
    path: Option<&Path>,
    overrides: &EnvOverrides,
    role: Option<ServiceRole>,
) -> Result<ServiceConfig, ConfigError> {
    let mut config = match path {
        Some(path) => read_config_file(path)?,
        None => ServiceConfig::default(),
    };

    overrides.apply(&mut config, role);

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_env_port_applies_to_role() {
        let overrides = EnvOverrides::from_lookup(lookup(&[("PORT", "4001")])).unwrap();

        let config = load_config(None, &overrides, Some(ServiceRole::Time)).unwrap();
        assert_eq!(config.time.bind_address, "0.0.0.0:4001");
        assert_eq!(config.greeting.bind_address, "0.0.0.0:3000");

        let config = load_config(None, &overrides, Some(ServiceRole::Greeting)).unwrap();
        assert_eq!(config.time.bind_address, "0.0.0.0:3001");
        assert_eq!(config.greeting.bind_address, "0.0.0.0:4001");
    }

    #[test]
    fn test_env_port_ignored_for_both_services() {
        let overrides = EnvOverrides::from_lookup(lookup(&[("PORT", "4001")])).unwrap();
        assert_eq!(overrides.ignored_port(None), Some(4001));
        assert_eq!(overrides.ignored_port(Some(ServiceRole::Time)), None);

        let config = load_config(None, &overrides, None).unwrap();
        assert_eq!(config.time.bind_address, "0.0.0.0:3001");
        assert_eq!(config.greeting.bind_address, "0.0.0.0:3000");

        assert_eq!(EnvOverrides::default().ignored_port(None), None);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let err = EnvOverrides::from_lookup(lookup(&[("PORT", "http")])).unwrap_err();
        assert!(matches!(err, ConfigError::Env { name: "PORT", .. }));
    }

    #[test]
    fn test_legacy_url_variable() {
        let overrides =
            EnvOverrides::from_lookup(lookup(&[("SERVICE_A_URL", "http://10.0.0.5:3001")]))
                .unwrap();
        assert_eq!(overrides.time_service_url.as_deref(), Some("http://10.0.0.5:3001"));

        let overrides = EnvOverrides::from_lookup(lookup(&[
            ("SERVICE_A_URL", "http://old:3001"),
            ("TIME_SERVICE_URL", "http://new:3001"),
        ]))
        .unwrap();
        assert_eq!(overrides.time_service_url.as_deref(), Some("http://new:3001"));
    }

    #[test]
    fn test_env_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
            [greeting]
            bind_address = "127.0.0.1:8000"

            [upstream]
            base_url = "http://from-file:3001"
            provider_name = "Clock"
            "#
        )
        .unwrap();

        let overrides = EnvOverrides::from_lookup(lookup(&[
            ("PORT", "9000"),
            ("TIME_SERVICE_URL", "http://from-env:3001"),
        ]))
        .unwrap();
        let config = load_config(Some(file.path()), &overrides, Some(ServiceRole::Greeting)).unwrap();

        assert_eq!(config.greeting.bind_address, "127.0.0.1:9000");
        assert_eq!(config.upstream.base_url, "http://from-env:3001");
        assert_eq!(config.upstream.provider_name, "Clock");
    }

    #[test]
    fn test_invalid_file_reports_validation() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
            [upstream]
            base_url = "nowhere"
            timeout_secs = 0
            "#
        )
        .unwrap();

        let err = load_config(Some(file.path()), &EnvOverrides::default(), None).unwrap_err();
        match err {
            ConfigError::Validation(errors) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_config(
            Some(Path::new("/definitely/not/here.toml")),
            &EnvOverrides::default(),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
