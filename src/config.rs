use abvcalc_core::VolumeUnit;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Source of a configuration value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Default,
    File,
    Environment,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File => write!(f, "file"),
            ConfigSource::Environment => write!(f, "environment"),
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }
}

/// Application configuration with source tracking
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Directory holding the known-ingredient list
    pub data_dir: ConfigValue<PathBuf>,
    /// Unit new mixes start in
    pub unit: ConfigValue<VolumeUnit>,
    /// Config file path used (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
}

/// Internal struct for deserializing config file
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    data_dir: Option<PathBuf>,
    unit: Option<String>,
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut data_dir = ConfigValue::new(Self::default_data_dir(), ConfigSource::Default);
        let mut unit = ConfigValue::new(VolumeUnit::default(), ConfigSource::Default);
        let mut config_file = None;

        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            let file_config: ConfigFile = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;

            config_file = Some(path.clone());

            if let Some(dir) = file_config.data_dir {
                // Resolve relative paths against config file's directory
                let resolved = if dir.is_relative() {
                    path.parent().map(|p| p.join(&dir)).unwrap_or(dir)
                } else {
                    dir
                };
                data_dir = ConfigValue::new(resolved, ConfigSource::File);
            }
            if let Some(raw) = file_config.unit {
                unit = ConfigValue::new(parse_unit("unit", &raw)?, ConfigSource::File);
            }
        }

        if let Ok(dir) = std::env::var("ABV_DATA_DIR") {
            data_dir = ConfigValue::new(PathBuf::from(dir), ConfigSource::Environment);
        }
        if let Ok(raw) = std::env::var("ABV_UNIT") {
            unit = ConfigValue::new(parse_unit("ABV_UNIT", &raw)?, ConfigSource::Environment);
        }

        tracing::debug!(
            "Config: data_dir={} ({}), unit={} ({})",
            data_dir.value.display(),
            data_dir.source,
            unit.value,
            unit.source
        );

        Ok(Self {
            data_dir,
            unit,
            config_file,
        })
    }

    /// Default config directory (platform-specific):
    /// - Linux: ~/.config/abvcalc/
    /// - macOS: ~/Library/Application Support/abvcalc/
    /// - Windows: %APPDATA%/abvcalc/
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("abvcalc")
    }

    /// Default data directory (platform-specific):
    /// - Linux: ~/.local/share/abvcalc/
    /// - macOS: ~/Library/Application Support/abvcalc/
    /// - Windows: %APPDATA%/abvcalc/
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("abvcalc")
    }

    /// Default config file path (platform-specific config dir + config.yaml)
    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.yaml")
    }
}

fn parse_unit(name: &str, raw: &str) -> Result<VolumeUnit, ConfigError> {
    raw.parse()
        .map_err(|_| ConfigError::InvalidValue(name.to_string(), raw.to_string()))
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
    InvalidValue(String, String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
            ConfigError::InvalidValue(name, value) => {
                write!(
                    f,
                    "Invalid value for {}: '{}' (expected 'ml' or 'oz')",
                    name, value
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}
