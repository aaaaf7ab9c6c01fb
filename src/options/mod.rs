//! Shake configuration with TOML preset support.
//!
//! Registry sizing and a library of named shake presets live together in
//! one [`ShakeOptions`] value that round-trips through TOML, so games can
//! keep their "explosion", "footstep" and "earthquake" shakes in a data
//! file instead of in code.

mod registry;

use std::collections::BTreeMap;
use std::path::Path;

pub use registry::RegistryOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ShakeError;
use crate::shake::ShakeParams;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only a `[presets.boom]` table) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct ShakeOptions {
    /// Registry sizing and seeding.
    pub registry: RegistryOptions,
    /// Named shake presets.
    pub presets: BTreeMap<String, ShakeParams>,
}

impl ShakeOptions {
    /// Generate JSON Schema describing the options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(ShakeOptions)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    ///
    /// Every preset is validated so bad data fails at load time rather
    /// than on first use.
    ///
    /// # Errors
    ///
    /// [`ShakeError::OptionsParse`] for malformed TOML,
    /// [`ShakeError::InvalidParameter`] for an out-of-range preset.
    pub fn from_toml_str(content: &str) -> Result<Self, ShakeError> {
        let options: Self = toml::from_str(content)
            .map_err(|e| ShakeError::OptionsParse(e.to_string()))?;
        for (name, params) in &options.presets {
            params.validate().inspect_err(|e| {
                log::error!("Invalid shake preset '{name}': {e}");
            })?;
        }
        Ok(options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// I/O failures, malformed TOML or invalid presets.
    pub fn load(path: &Path) -> Result<Self, ShakeError> {
        let content = std::fs::read_to_string(path).map_err(ShakeError::Io)?;
        let options = Self::from_toml_str(&content)?;
        log::info!(
            "Loaded {} shake presets from {}",
            options.presets.len(),
            path.display()
        );
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Serialization or I/O failures.
    pub fn save(&self, path: &Path) -> Result<(), ShakeError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ShakeError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ShakeError::Io)?;
        }
        std::fs::write(path, content).map_err(ShakeError::Io)
    }

    /// Look up a preset by name.
    #[must_use]
    pub fn preset(&self, name: &str) -> Option<&ShakeParams> {
        self.presets.get(name)
    }

    /// Preset names in sorted order.
    #[must_use]
    pub fn preset_names(&self) -> Vec<&str> {
        self.presets.keys().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let mut opts = ShakeOptions::default();
        let _ = opts.presets.insert(
            "boom".to_owned(),
            ShakeParams::at(Vec3::new(1.0, 2.0, 3.0))
                .with_magnitude(4.0)
                .with_symmetric_fade(0.1),
        );
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed = ShakeOptions::from_toml_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[presets.rumble]
magnitude = 0.5
roughness = 30.0
looping = true
lifetime = 2.0
";
        let opts = ShakeOptions::from_toml_str(toml_str).unwrap();
        assert_eq!(opts.registry, RegistryOptions::default());
        let rumble = opts.preset("rumble").unwrap();
        assert_eq!(rumble.magnitude, 0.5);
        assert!(rumble.looping);
        assert_eq!(rumble.scale, Vec3::ONE);
        assert_eq!(rumble.resolved_fade_in_time(), 0.5);
        assert_eq!(rumble.resolved_fade_out_time(), 1.5);
        assert!(rumble.auto_play);
    }

    #[test]
    fn vectors_are_plain_arrays() {
        let toml_str = r"
[registry]
growth_increment = 8
seed = 42

[presets.step]
position = [1.0, 0.0, -2.0]
scale = [1.0, 0.5, 0.0]
";
        let opts = ShakeOptions::from_toml_str(toml_str).unwrap();
        assert_eq!(opts.registry.growth_increment, 8);
        assert_eq!(opts.registry.seed, Some(42));
        let step = opts.preset("step").unwrap();
        assert_eq!(step.position, Vec3::new(1.0, 0.0, -2.0));
        assert_eq!(step.scale, Vec3::new(1.0, 0.5, 0.0));
    }

    #[test]
    fn invalid_preset_fails_to_load() {
        let toml_str = r"
[presets.bad]
magnitude = -1.0
";
        let err = ShakeOptions::from_toml_str(toml_str).unwrap_err();
        assert!(err.is_invalid("magnitude"));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = ShakeOptions::from_toml_str("presets = 3").unwrap_err();
        assert!(matches!(err, ShakeError::OptionsParse(_)));
    }

    #[test]
    fn save_and_load_file() {
        let dir = std::env::temp_dir()
            .join(format!("quake-options-{}", std::process::id()));
        let path = dir.join("shakes.toml");
        let mut opts = ShakeOptions::default();
        let _ = opts
            .presets
            .insert("quake".to_owned(), ShakeParams::default().with_looping(true));
        opts.save(&path).unwrap();
        let loaded = ShakeOptions::load(&path).unwrap();
        assert_eq!(loaded, opts);
        assert_eq!(loaded.preset_names(), vec!["quake"]);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn schema_lists_sections() {
        let schema = ShakeOptions::json_schema();
        let properties = &schema.as_value()["properties"];
        assert!(properties["presets"].is_object());
        assert!(properties["registry"].is_object());
    }
}
