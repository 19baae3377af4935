//! Generator configuration
//!
//! Every section has defaults matching the stock 256x256 map, and JSON files
//! may set any subset of fields.

use std::path::Path;

use crate::classify::BandTable;
use crate::climate::ClimateConfig;
use crate::error::{ConfigError, GenError};
use crate::noise_field::NoiseConfig;
use crate::rivers::RiverParams;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Width of the map in tiles
    pub width: usize,
    /// Height of the map in tiles
    pub height: usize,
    /// Master seed
    pub seed: u64,
    /// Height noise
    pub noise: NoiseConfig,
    pub bands: BandTable,
    /// Heat/moisture/biome pass; skipped when None
    pub climate: Option<ClimateConfig>,
    pub rivers: RiverParams,
    /// Treat a flat height field as an error instead of one uniform band
    pub reject_flat_field: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            width: 256,
            height: 256,
            seed: 0,
            noise: NoiseConfig::default(),
            bands: BandTable::default(),
            climate: Some(ClimateConfig::default()),
            rivers: RiverParams::default(),
            reject_flat_field: false,
        }
    }
}

impl GeneratorConfig {
    /// Load a config from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, GenError> {
        let text = std::fs::read_to_string(path)?;
        let config: GeneratorConfig = serde_json::from_str(&text)?;
        Ok(config)
    }

    /// Check every section. Run before any generation work starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::NonPositiveDimension {
                width: self.width,
                height: self.height,
            });
        }
        self.noise.validate()?;
        self.bands.validate()?;
        if let Some(climate) = &self.climate {
            climate.validate()?;
        }
        self.rivers.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::HeightBand;
    use std::io::Write;

    #[test]
    fn test_default_is_valid() {
        assert!(GeneratorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_dimension_rejected() {
        let config = GeneratorConfig {
            width: 0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositiveDimension { width: 0, height: 256 })
        );
    }

    #[test]
    fn test_bad_thresholds_rejected() {
        let mut config = GeneratorConfig::default();
        config.bands.thresholds = vec![0.1, 0.3, 0.2, 0.5, 0.8, 0.9];
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ThresholdsNotIncreasing { index: 2, .. })
        ));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "width": 64,
                "seed": 9,
                "bands": {{ "thresholds": [0.5], "bands": ["ShallowWater", "Grass"] }},
                "rivers": {{ "count": 3 }},
                "climate": null
            }}"#
        )
        .unwrap();

        let config = GeneratorConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.width, 64);
        assert_eq!(config.height, 256);
        assert_eq!(config.seed, 9);
        assert_eq!(config.bands.bands, vec![HeightBand::ShallowWater, HeightBand::Grass]);
        assert_eq!(config.rivers.count, 3);
        assert_eq!(config.rivers.max_width, 4);
        assert!(config.climate.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = GeneratorConfig::from_json_file("/nonexistent/terrain.json").unwrap_err();
        assert!(matches!(err, GenError::Io(_)));
    }
}
