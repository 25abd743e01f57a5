use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Bank information for a single preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetInfo {
    pub bank: i64,
}

/// Presets known to the engine.
///
/// Engines with an instrument dimension group presets per instrument; older
/// engines report a single flat preset list. Iteration order follows the
/// order the engine sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AvailablePresets {
    ByInstrument(IndexMap<String, IndexMap<String, PresetInfo>>),
    Flat(IndexMap<String, PresetInfo>),
}

impl AvailablePresets {
    pub fn is_empty(&self) -> bool {
        match self {
            AvailablePresets::ByInstrument(instruments) => instruments.is_empty(),
            AvailablePresets::Flat(presets) => presets.is_empty(),
        }
    }

    /// Instrument names in engine order. Empty for a flat preset list.
    pub fn instruments(&self) -> Vec<&str> {
        match self {
            AvailablePresets::ByInstrument(instruments) => {
                instruments.keys().map(String::as_str).collect()
            }
            AvailablePresets::Flat(_) => Vec::new(),
        }
    }

    /// The preset mapping for `instrument`.
    ///
    /// A flat list ignores the instrument and always returns its one mapping.
    pub fn presets_for(&self, instrument: Option<&str>) -> Option<&IndexMap<String, PresetInfo>> {
        match self {
            AvailablePresets::ByInstrument(instruments) => instruments.get(instrument?),
            AvailablePresets::Flat(presets) => Some(presets),
        }
    }
}

/// A single (label, value) diagnostic row.
pub type DataRow = (String, String);

/// Snapshot of engine state, fetched atomically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayData {
    pub volume: f64,
    #[serde(default)]
    pub condition: Option<f64>,
    #[serde(default)]
    pub pedal_noise: Option<f64>,
    #[serde(default)]
    pub key_release_noise: Option<f64>,
    #[serde(default)]
    pub instrument: Option<String>,
    pub preset: String,
    pub available_presets: AvailablePresets,
    #[serde(default)]
    pub output_mode: Option<String>,
    #[serde(default)]
    pub reverb: Option<String>,
    #[serde(default)]
    pub data_table: Vec<DataRow>,
}

impl DisplayData {
    /// The matched reverb preset, or `None` when the engine's reverb does not
    /// match any named preset. An empty name counts as no match.
    pub fn matched_reverb(&self) -> Option<&str> {
        self.reverb.as_deref().filter(|name| !name.is_empty())
    }
}

/// Deserialize a snapshot from JSON
pub fn deserialize_display_data(json: &str) -> Result<DisplayData, serde_json::Error> {
    serde_json::from_str(json)
}
