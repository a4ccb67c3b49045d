//! Generator configuration types

use crate::error::{GenerateError, GenerateResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Parameter key that names a TOML configuration file
pub const CONFIG_FILE_KEY: &str = "config";

/// Generator configuration
///
/// Sources, lowest precedence first: built-in defaults, a TOML file, then
/// `key=value` pairs from the protoc plugin parameter string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Suffix appended to the proto path for the declarations artifact
    #[serde(default = "default_header_suffix")]
    pub header_suffix: String,

    /// Suffix appended to the proto path for the scaffolding artifact
    #[serde(default = "default_source_suffix")]
    pub source_suffix: String,

    /// Suffix appended to the proto path for the manifest artifact
    #[serde(default = "default_manifest_suffix")]
    pub manifest_suffix: String,

    /// Includes of the declarations artifact
    ///
    /// Entries wrapped in angle brackets (`<iosfwd>`) are system includes.
    #[serde(default = "default_header_includes")]
    pub header_includes: Vec<String>,

    /// Includes of the scaffolding artifact, after the generated header
    #[serde(default = "default_source_includes")]
    pub source_includes: Vec<String>,

    /// Spaces per nesting level
    #[serde(default = "default_indent")]
    pub indent: usize,

    /// Log level used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Fail with a reference cycle error instead of recursing forever
    #[serde(default = "default_cycle_guard")]
    pub cycle_guard: bool,
}

fn default_header_suffix() -> String {
    ".hpp".to_string()
}

fn default_source_suffix() -> String {
    ".cpp".to_string()
}

fn default_manifest_suffix() -> String {
    ".desc".to_string()
}

fn default_header_includes() -> Vec<String> {
    ["<iosfwd>", "kcfg.hpp", "mmdata.hpp", "mmdata_kcfg.hpp"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_source_includes() -> Vec<String> {
    vec!["mmdata_util.hpp".to_string()]
}

fn default_indent() -> usize {
    4
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_cycle_guard() -> bool {
    true
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            header_suffix: default_header_suffix(),
            source_suffix: default_source_suffix(),
            manifest_suffix: default_manifest_suffix(),
            header_includes: default_header_includes(),
            source_includes: default_source_includes(),
            indent: default_indent(),
            log_level: default_log_level(),
            cycle_guard: default_cycle_guard(),
        }
    }
}

impl GeneratorConfig {
    /// Create a configuration with built-in defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document; missing keys take their defaults
    pub fn from_toml_str(text: &str) -> GenerateResult<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(toml::from_str(text)?)
    }

    /// Load a TOML configuration file
    pub fn from_file(path: impl AsRef<Path>) -> GenerateResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| GenerateError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Build a configuration from a protoc plugin parameter string.
    ///
    /// A `config=<path>` pair is loaded first wherever it appears; every other
    /// pair then overrides the loaded values.
    pub fn from_parameter(parameter: Option<&str>) -> GenerateResult<Self> {
        let Some(parameter) = parameter else {
            return Ok(Self::default());
        };

        let pairs = parse_pairs(parameter)?;
        let mut config = match pairs.iter().find(|(k, _)| *k == CONFIG_FILE_KEY) {
            Some((_, path)) => Self::from_file(path)?,
            None => Self::default(),
        };
        for (key, value) in pairs {
            if key != CONFIG_FILE_KEY {
                config.set(key, value)?;
            }
        }
        Ok(config)
    }

    /// Apply comma-separated `key=value` overrides.
    ///
    /// `config=` is rejected here; use [`GeneratorConfig::from_parameter`]
    /// to load a file.
    pub fn apply_parameter(&mut self, parameter: &str) -> GenerateResult<()> {
        for (key, value) in parse_pairs(parameter)? {
            self.set(key, value)?;
        }
        Ok(())
    }

    /// Set a single option by its parameter key
    pub fn set(&mut self, key: &str, value: &str) -> GenerateResult<()> {
        match key {
            "header_suffix" => self.header_suffix = value.to_string(),
            "source_suffix" => self.source_suffix = value.to_string(),
            "manifest_suffix" => self.manifest_suffix = value.to_string(),
            "header_includes" => self.header_includes = split_list(value),
            "source_includes" => self.source_includes = split_list(value),
            "indent" => {
                self.indent = value.parse().map_err(|_| {
                    GenerateError::Config(format!("indent must be a non-negative integer, got '{value}'"))
                })?
            }
            "log_level" => self.log_level = value.to_string(),
            "cycle_guard" => {
                self.cycle_guard = value.parse().map_err(|_| {
                    GenerateError::Config(format!("cycle_guard must be true or false, got '{value}'"))
                })?
            }
            other => {
                return Err(GenerateError::Config(format!(
                    "unknown parameter key '{other}'"
                )));
            }
        }
        Ok(())
    }
}

fn parse_pairs(parameter: &str) -> GenerateResult<Vec<(&str, &str)>> {
    parameter
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|pair| {
            pair.split_once('=')
                .map(|(k, v)| (k.trim(), v.trim()))
                .ok_or_else(|| GenerateError::Config(format!("expected key=value, got '{pair}'")))
        })
        .collect()
}

// Lists inside the parameter string use ':' since ',' separates pairs.
fn split_list(value: &str) -> Vec<String> {
    value
        .split(':')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
