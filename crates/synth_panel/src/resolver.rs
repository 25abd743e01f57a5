//! Local instrument → preset resolution.
//!
//! Nothing here touches the network: the preset list and bank ids come from
//! the snapshot the panel last fetched.

use crate::client::ClientError;
use crate::protocol::DisplayData;
use crate::widgets::{Dropdown, DropdownOption};

/// Rebuild `preset` from the presets of `instrument` in `data`.
///
/// The snapshot's current preset stays selected if the new list contains it.
/// An instrument missing from the snapshot leaves the dropdown empty.
pub fn populate_preset_dropdown(
    preset: &mut Dropdown,
    data: &DisplayData,
    instrument: Option<&str>,
) {
    preset.clear();
    if let Some(presets) = data.available_presets.presets_for(instrument) {
        for name in presets.keys() {
            preset.push_option(DropdownOption::new(name.as_str()));
        }
    }
    preset.select(&data.preset);
}

/// Bank id of preset `name` under `instrument`, from the last snapshot.
pub fn resolve_bank(
    data: &DisplayData,
    instrument: Option<&str>,
    name: &str,
) -> Result<i64, ClientError> {
    data.available_presets
        .presets_for(instrument)
        .and_then(|presets| presets.get(name))
        .map(|info| info.bank)
        .ok_or_else(|| match instrument {
            Some(instrument) => ClientError::protocol(format!(
                "Preset '{}' is not available for instrument '{}'",
                name, instrument
            )),
            None => ClientError::protocol(format!("Unknown preset '{}'", name)),
        })
}
