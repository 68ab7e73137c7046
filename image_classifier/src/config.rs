use crate::error::ClassifierError;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.try_into().map_err(serde::de::Error::custom)
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default = "default_max_workers")]
    pub max_workers: usize,
}

fn default_max_workers() -> usize {
    10
}

impl ServerConfig {
    pub fn get_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

pub trait Validatable {
    fn validate(&self) -> Result<(), ClassifierError>;
}

impl Validatable for ServerConfig {
    fn validate(&self) -> Result<(), ClassifierError> {
        if self.max_workers == 0 {
            return Err(ClassifierError::InvalidConfig(
                "server.max_workers must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Validatable for Config {
    fn validate(&self) -> Result<(), ClassifierError> {
        self.server.validate()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
        }
    }
}

impl TryFrom<String> for LogLevel {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            other => Err(format!(
                "{} is not a supported minimum log level. Use either `debug` or `info`.",
                other
            )),
        }
    }
}

/// Loads `configuration/base.yaml`, the environment overlay selected by
/// `APP_ENVIRONMENT`, and `APP_*` variables, in that order.
pub fn get_configuration() -> Result<Config, ClassifierError> {
    let base_path = std::env::current_dir()
        .map_err(|e| ClassifierError::InvalidConfig(format!("no current directory: {}", e)))?;
    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(ClassifierError::InvalidConfig)?;

    load_configuration(&base_path.join("configuration"), &environment)
}

pub fn load_configuration(
    configuration_directory: &Path,
    environment: &Environment,
) -> Result<Config, ClassifierError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(
            configuration_directory.join("base.yaml"),
        ))
        .add_source(
            config::File::from(
                configuration_directory.join(format!("{}.yaml", environment.as_str())),
            )
            .required(false),
        )
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    let config = settings.try_deserialize::<Config>()?;
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn parse(yaml: &str) -> Result<Config, ClassifierError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(yaml, FileFormat::Yaml))
            .build()?
            .try_deserialize::<Config>()?;
        config.validate()?;
        Ok(config)
    }

    #[test]
    fn test_parse_full_config() {
        let config = parse(
            r#"
log_level: debug
server:
  host: "[::]"
  port: 50051
  max_workers: 4
"#,
        )
        .unwrap();

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.server.max_workers, 4);
        assert_eq!(config.server.get_address(), "[::]:50051");
        assert!(config.server.get_address().parse::<std::net::SocketAddr>().is_ok());
    }

    #[test]
    fn test_max_workers_defaults_to_ten() {
        let config = parse(
            r#"
log_level: info
server:
  host: "0.0.0.0"
  port: 6000
"#,
        )
        .unwrap();

        assert_eq!(config.server.max_workers, 10);
    }

    #[test]
    fn test_zero_workers_is_rejected() {
        let result = parse(
            r#"
log_level: info
server:
  host: "0.0.0.0"
  port: 6000
  max_workers: 0
"#,
        );

        assert!(matches!(result, Err(ClassifierError::InvalidConfig(_))));
    }

    #[test]
    fn test_unknown_log_level_is_rejected() {
        let result = parse(
            r#"
log_level: trace
server:
  host: "0.0.0.0"
  port: 6000
"#,
        );

        assert!(matches!(result, Err(ClassifierError::ConfigLoad(_))));
    }

    #[test]
    fn test_environment_from_string() {
        let env: Environment = "Production".to_string().try_into().unwrap();
        assert_eq!(env.as_str(), "production");

        let err = Environment::try_from("staging".to_string()).unwrap_err();
        assert!(err.contains("staging"));
    }

    #[test]
    fn test_load_bundled_configuration() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("configuration");
        let config = load_configuration(&dir, &Environment::Production).unwrap();

        assert_eq!(config.server.port, 50051);
        assert_eq!(config.server.max_workers, 10);
        assert_eq!(config.log_level, LogLevel::Info);
    }
}
