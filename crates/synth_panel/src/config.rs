use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Parameter dimensions exposed by the engine version the panel talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelCapabilities {
    /// Presets are grouped per instrument and an instrument dropdown is shown.
    pub has_instrument_dimension: bool,
    /// An output routing dropdown is shown.
    pub has_output_mode: bool,
}

impl Default for PanelCapabilities {
    fn default() -> Self {
        Self {
            has_instrument_dimension: true,
            has_output_mode: false,
        }
    }
}

/// Panel configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    pub capabilities: PanelCapabilities,
    /// Named reverb presets offered in the reverb dropdown.
    pub reverb_presets: Vec<String>,
    /// Output routing choices offered when `has_output_mode` is set.
    pub output_modes: Vec<String>,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            capabilities: PanelCapabilities::default(),
            reverb_presets: [
                "Small Room",
                "Medium Room",
                "Large Room",
                "Chamber",
                "Jazz Club",
                "Concert Hall",
                "Cathedral",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            output_modes: ["Sound Recording", "Binaural", "Stereophonic", "Monophonic"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl PanelConfig {
    /// Parse a config from YAML. Missing keys take their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse panel config YAML")
    }
}

/// Load a panel config from a YAML file
pub fn load_config(path: &Path) -> Result<PanelConfig> {
    let yaml = fs::read_to_string(path)
        .with_context(|| format!("Failed to read panel config from {}", path.display()))?;
    PanelConfig::from_yaml_str(&yaml)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_matches_shipped_panel() {
        let config = PanelConfig::default();
        assert!(config.capabilities.has_instrument_dimension);
        assert!(!config.capabilities.has_output_mode);
        assert!(config.reverb_presets.iter().any(|p| p == "Chamber"));
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
capabilities:
  has_output_mode: true
"#;
        let config = PanelConfig::from_yaml_str(yaml).unwrap();
        assert!(config.capabilities.has_instrument_dimension);
        assert!(config.capabilities.has_output_mode);
        assert_eq!(config.output_modes, PanelConfig::default().output_modes);
    }

    #[test]
    fn test_load_yaml_file() {
        let yaml = r#"
capabilities:
  has_instrument_dimension: false
  has_output_mode: true
reverb_presets:
  - Plate
  - Spring
output_modes:
  - Stereo
"#;
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(yaml.as_bytes()).unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert!(!config.capabilities.has_instrument_dimension);
        assert_eq!(config.reverb_presets, vec!["Plate", "Spring"]);
        assert_eq!(config.output_modes, vec!["Stereo"]);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = load_config(Path::new("/nonexistent/panel.yaml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_invalid_yaml() {
        let result = PanelConfig::from_yaml_str("capabilities: [");
        assert!(result.is_err());
    }
}
