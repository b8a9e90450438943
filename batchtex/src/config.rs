//! Registry configuration.
//!
//! [`RegistryConfig`] can be built in code with the `with_*` methods or
//! loaded from the `[textures]` section of an INI file:
//!
//! ```ini
//! [textures]
//! id_allocation = recycle
//! max_dimension = 8192
//! label = ui-atlas
//! ```
//!
//! Missing keys keep their defaults and unknown keys are ignored.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use ini::Ini;
use thiserror::Error;

/// INI section holding registry settings.
pub const CONFIG_SECTION: &str = "textures";

/// Default largest accepted texture edge in pixels.
///
/// Matches the 2D texture limit of most desktop GPUs.
pub const DEFAULT_MAX_DIMENSION: u32 = 16384;

/// Default label attached to registry log events.
pub const DEFAULT_LABEL: &str = "textures";

/// How the registry hands out texture ids.
///
/// Either way, an id is never returned while a texture holding it is
/// still live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdAllocation {
    /// Ids come from an increasing counter starting at 1. Destroyed ids
    /// are only revisited once the counter is exhausted.
    #[default]
    Monotonic,
    /// Destroyed ids are reused first, lowest id first.
    Recycle,
}

impl fmt::Display for IdAllocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdAllocation::Monotonic => f.write_str("monotonic"),
            IdAllocation::Recycle => f.write_str("recycle"),
        }
    }
}

impl FromStr for IdAllocation {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monotonic" => Ok(IdAllocation::Monotonic),
            "recycle" => Ok(IdAllocation::Recycle),
            other => Err(ConfigError::InvalidValue {
                key: "id_allocation".to_string(),
                value: other.to_string(),
                reason: "expected 'monotonic' or 'recycle'".to_string(),
            }),
        }
    }
}

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The INI file could not be read or parsed.
    #[error("Failed to read config: {0}")]
    Read(#[from] ini::Error),

    /// The INI text could not be parsed.
    #[error("Failed to parse config: {0}")]
    Parse(String),

    /// A key holds a value that cannot be used.
    #[error("Invalid value '{value}' for '{key}': {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

/// Settings for a [`TextureRegistry`](crate::texture::TextureRegistry).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Id allocation policy. Default: [`IdAllocation::Monotonic`].
    pub id_allocation: IdAllocation,

    /// Largest accepted width or height. Default: 16384.
    pub max_dimension: u32,

    /// Name attached to log events, to tell several registries apart.
    pub label: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            id_allocation: IdAllocation::default(),
            max_dimension: DEFAULT_MAX_DIMENSION,
            label: DEFAULT_LABEL.to_string(),
        }
    }
}

impl RegistryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id_allocation(mut self, id_allocation: IdAllocation) -> Self {
        self.id_allocation = id_allocation;
        self
    }

    pub fn with_max_dimension(mut self, max_dimension: u32) -> Self {
        self.max_dimension = max_dimension;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Load settings from an INI file.
    pub fn from_ini_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_file(path)?;
        Self::from_ini(&ini)
    }

    /// Load settings from INI text.
    pub fn from_ini_str(text: &str) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Self::from_ini(&ini)
    }

    fn from_ini(ini: &Ini) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let Some(section) = ini.section(Some(CONFIG_SECTION)) else {
            return Ok(config);
        };

        if let Some(value) = section.get("id_allocation") {
            config.id_allocation = value.parse()?;
        }

        if let Some(value) = section.get("max_dimension") {
            let parsed: u32 = value.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "max_dimension".to_string(),
                value: value.to_string(),
                reason: "expected a positive integer".to_string(),
            })?;
            if parsed == 0 {
                return Err(ConfigError::InvalidValue {
                    key: "max_dimension".to_string(),
                    value: value.to_string(),
                    reason: "must be greater than zero".to_string(),
                });
            }
            config.max_dimension = parsed;
        }

        if let Some(value) = section.get("label") {
            config.label = value.trim().to_string();
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = RegistryConfig::default();
        assert_eq!(config.id_allocation, IdAllocation::Monotonic);
        assert_eq!(config.max_dimension, DEFAULT_MAX_DIMENSION);
        assert_eq!(config.label, "textures");
    }

    #[test]
    fn test_builder_methods() {
        let config = RegistryConfig::new()
            .with_id_allocation(IdAllocation::Recycle)
            .with_max_dimension(2048)
            .with_label("fonts");
        assert_eq!(config.id_allocation, IdAllocation::Recycle);
        assert_eq!(config.max_dimension, 2048);
        assert_eq!(config.label, "fonts");
    }

    #[test]
    fn test_id_allocation_parse_and_display() {
        assert_eq!("Recycle".parse::<IdAllocation>().unwrap(), IdAllocation::Recycle);
        assert_eq!(" monotonic ".parse::<IdAllocation>().unwrap(), IdAllocation::Monotonic);
        assert_eq!(IdAllocation::Recycle.to_string(), "recycle");
        assert!("freelist".parse::<IdAllocation>().is_err());
    }

    #[test]
    fn test_from_ini_str_full() {
        let config = RegistryConfig::from_ini_str(
            "[textures]\nid_allocation = recycle\nmax_dimension = 4096\nlabel = sprites\n",
        )
        .unwrap();
        assert_eq!(config.id_allocation, IdAllocation::Recycle);
        assert_eq!(config.max_dimension, 4096);
        assert_eq!(config.label, "sprites");
    }

    #[test]
    fn test_from_ini_str_missing_section_uses_defaults() {
        let config = RegistryConfig::from_ini_str("[other]\nkey = value\n").unwrap();
        assert_eq!(config, RegistryConfig::default());
    }

    #[test]
    fn test_from_ini_str_partial_and_unknown_keys() {
        let config =
            RegistryConfig::from_ini_str("[textures]\nmax_dimension = 512\nshiny = yes\n")
                .unwrap();
        assert_eq!(config.max_dimension, 512);
        assert_eq!(config.id_allocation, IdAllocation::Monotonic);
    }

    #[test]
    fn test_from_ini_str_invalid_dimension() {
        let err = RegistryConfig::from_ini_str("[textures]\nmax_dimension = big\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "max_dimension"));

        let err = RegistryConfig::from_ini_str("[textures]\nmax_dimension = 0\n").unwrap_err();
        assert!(err.to_string().contains("greater than zero"));
    }

    #[test]
    fn test_from_ini_str_invalid_allocation() {
        let err = RegistryConfig::from_ini_str("[textures]\nid_allocation = random\n").unwrap_err();
        assert!(err.to_string().contains("id_allocation"));
    }

    #[test]
    fn test_from_ini_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[textures]").unwrap();
        writeln!(file, "id_allocation = recycle").unwrap();
        file.flush().unwrap();

        let config = RegistryConfig::from_ini_file(file.path()).unwrap();
        assert_eq!(config.id_allocation, IdAllocation::Recycle);
    }

    #[test]
    fn test_from_ini_file_missing() {
        let result = RegistryConfig::from_ini_file("/nonexistent/batchtex.ini");
        assert!(matches!(result, Err(ConfigError::Read(_))));
    }
}
