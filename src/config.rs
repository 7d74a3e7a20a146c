//! Configuration management for struct-schema
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (struct-schema.toml)
//! - Environment variables (STRUCT_SCHEMA__*)
//!
//! ## Example config file (struct-schema.toml):
//! ```toml
//! [output]
//! path = "output.json"
//! format = "pretty"
//! create_dirs = true
//!
//! [introspection]
//! root_type = "Student"
//! # max_depth = 64  (unbounded when absent)
//! ```

use config_crate::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::introspect::Introspector;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaConfig {
    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Introspection settings
    #[serde(default)]
    pub introspection: IntrospectionConfig,
}

/// Where and how the schema document is written
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Artifact path, relative to the working directory unless absolute
    #[serde(default = "default_output_path")]
    pub path: PathBuf,

    /// Output format (pretty or compact)
    #[serde(default)]
    pub format: OutputFormat,

    /// Create missing parent directories of the artifact
    #[serde(default = "default_true")]
    pub create_dirs: bool,
}

/// Output format for JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Two-space indentation
    #[default]
    Pretty,
    /// Single line
    Compact,
}

/// Introspection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntrospectionConfig {
    /// Type described when none is named on the command line
    #[serde(default = "default_root_type")]
    pub root_type: String,

    /// Maximum record nesting depth; unbounded when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
}

fn default_output_path() -> PathBuf {
    PathBuf::from("output.json")
}

fn default_true() -> bool {
    true
}

fn default_root_type() -> String {
    "Student".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            format: OutputFormat::Pretty,
            create_dirs: true,
        }
    }
}

impl Default for IntrospectionConfig {
    fn default() -> Self {
        Self {
            root_type: default_root_type(),
            max_depth: None,
        }
    }
}

impl IntrospectionConfig {
    /// Introspector honoring these settings
    pub fn introspector(&self) -> Introspector {
        match self.max_depth {
            Some(max_depth) => Introspector::new().with_max_depth(max_depth),
            None => Introspector::new(),
        }
    }
}

impl SchemaConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration, adding a required config file when given
    pub fn load_from(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_locations = [
            "struct-schema.toml",
            ".struct-schema.toml",
            "config/struct-schema.toml",
        ];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        if let Some(config_dir) = directories::ProjectDirs::from("dev", "struct-schema", "struct-schema") {
            let xdg_config = config_dir.config_dir().join("struct-schema.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("STRUCT_SCHEMA")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }

    /// Artifact path, resolved against the working directory
    pub fn output_path(&self) -> PathBuf {
        if self.output.path.is_absolute() {
            self.output.path.clone()
        } else {
            std::env::current_dir()
                .unwrap_or_default()
                .join(&self.output.path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SchemaConfig::default();
        assert_eq!(config.output.path, PathBuf::from("output.json"));
        assert_eq!(config.output.format, OutputFormat::Pretty);
        assert_eq!(config.introspection.root_type, "Student");
        assert_eq!(config.introspection.introspector().max_depth(), None);
    }

    #[test]
    fn test_serialize_config() {
        let config = SchemaConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[output]"));
        assert!(toml_str.contains("[introspection]"));
        assert!(toml_str.contains("format = \"pretty\""));
        assert!(!toml_str.contains("max_depth"));
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            "[output]\npath = \"schemas/enrollment.json\"\nformat = \"compact\"\n\n[introspection]\nroot_type = \"Enrollment\"\n",
        )
        .unwrap();

        let config = SchemaConfig::load_from(Some(path.as_path())).unwrap();
        assert_eq!(config.output.path, PathBuf::from("schemas/enrollment.json"));
        assert_eq!(config.output.format, OutputFormat::Compact);
        assert!(config.output.create_dirs);
        assert_eq!(config.introspection.root_type, "Enrollment");
        assert_eq!(config.introspection.max_depth, None);
    }

    #[test]
    fn test_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saved.toml");

        let mut config = SchemaConfig::default();
        config.introspection.max_depth = Some(8);
        config.save(&path).unwrap();

        let loaded = SchemaConfig::load_from(Some(path.as_path())).unwrap();
        assert_eq!(loaded.introspection.max_depth, Some(8));
        assert_eq!(loaded.introspection.introspector().max_depth(), Some(8));
        assert_eq!(loaded.output.path, config.output.path);
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(SchemaConfig::load_from(Some(dir.path().join("absent.toml").as_path())).is_err());
    }
}
