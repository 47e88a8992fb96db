//! Configuration management for Warpcap.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use warpcap_common::constants::{
    DEFAULT_CHALLENGE_LENGTH, DEFAULT_RESOLUTION_SELECTOR, DEFAULT_STROKE_THICKNESS,
};
use warpcap_common::{ChallengeLength, DisplayResolution, Result, WarpcapError};

use crate::captcha::{GeneratorOptions, GlyphFont};

/// Environment variable prefix, e.g. `WARPCAP_LENGTH=8`
pub const ENV_PREFIX: &str = "WARPCAP";

/// Generator configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeneratorConfig {
    /// Display resolution selector (0-3, anything else means 0)
    #[serde(default = "default_resolution")]
    pub resolution: i64,

    /// Number of challenge characters
    #[serde(default = "default_length")]
    pub length: usize,

    /// Glyph stroke thickness in pixels
    #[serde(default = "default_thickness")]
    pub thickness: u32,

    /// Font file for challenge text (embedded face if unset)
    #[serde(default)]
    pub font_path: Option<PathBuf>,

    /// Fixed seed for reproducible output
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_resolution() -> i64 { DEFAULT_RESOLUTION_SELECTOR }
fn default_length() -> usize { DEFAULT_CHALLENGE_LENGTH }
fn default_thickness() -> u32 { DEFAULT_STROKE_THICKNESS }

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            resolution: default_resolution(),
            length: default_length(),
            thickness: default_thickness(),
            font_path: None,
            seed: None,
        }
    }
}

impl GeneratorConfig {
    /// Load from an optional file layered with `WARPCAP_*` environment variables
    pub fn load(config_path: impl AsRef<Path>) -> Result<Self> {
        let config_path = config_path.as_ref();
        let mut builder = config::Config::builder();

        if config_path.exists() {
            builder = builder.add_source(config::File::from(config_path));
        } else {
            tracing::warn!(path = %config_path.display(), "Config file not found, using defaults");
        }

        builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()
            .and_then(|settings| settings.try_deserialize())
            .map_err(|e| WarpcapError::Config(e.to_string()))
    }

    /// Validated per-image options
    pub fn options(&self) -> Result<GeneratorOptions> {
        Ok(GeneratorOptions {
            resolution: DisplayResolution::from_selector(self.resolution),
            length: ChallengeLength::new(self.length)?,
            thickness: self.thickness,
        })
    }

    /// Load the configured font, or the embedded one
    pub fn font(&self) -> Result<GlyphFont> {
        match &self.font_path {
            Some(path) => GlyphFont::from_file(path),
            None => GlyphFont::embedded(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("warpcap-{}-{}.toml", name, std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.resolution, 3);
        assert_eq!(config.length, 6);
        assert_eq!(config.thickness, 4);

        let options = config.options().unwrap();
        assert_eq!(options.resolution, DisplayResolution::Hvga);
        assert_eq!(options.length.get(), 6);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = GeneratorConfig::load("/nonexistent/warpcap.toml").unwrap();
        assert_eq!(config.length, GeneratorConfig::default().length);
        assert_eq!(config.thickness, GeneratorConfig::default().thickness);
    }

    #[test]
    fn test_load_from_file() {
        let path = write_temp("load", "resolution = 1\nlength = 8\nseed = 1234\n");
        let config = GeneratorConfig::load(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(config.resolution, 1);
        assert_eq!(config.length, 8);
        assert_eq!(config.seed, Some(1234));
        assert_eq!(config.options().unwrap().resolution.size(), (320, 240));
    }

    #[test]
    fn test_zero_length_rejected() {
        let config = GeneratorConfig {
            length: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.options(),
            Err(WarpcapError::InvalidChallengeLength(0))
        ));
    }

    #[test]
    fn test_out_of_range_selector_clamps() {
        let config = GeneratorConfig {
            resolution: 9,
            ..Default::default()
        };
        assert_eq!(config.options().unwrap().resolution, DisplayResolution::Hqvga);
    }

    #[test]
    fn test_bad_font_path() {
        let config = GeneratorConfig {
            font_path: Some(PathBuf::from("/nonexistent/font.ttf")),
            ..Default::default()
        };
        assert!(matches!(config.font(), Err(WarpcapError::Font(_))));
        assert!(GeneratorConfig::default().font().is_ok());
    }
}
