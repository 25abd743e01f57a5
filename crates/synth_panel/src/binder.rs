use crate::protocol::DisplayData;
use crate::resolver::populate_preset_dropdown;
use crate::widgets::{
    ControlPanel, Dropdown, DropdownOption, UNKNOWN_REVERB_ID, UNKNOWN_REVERB_LABEL,
};

/// Map a snapshot onto the widget set.
///
/// Idempotent: rendering the same snapshot twice leaves identical state. The
/// enable/disable state of controls is not touched here.
pub fn render(panel: &mut ControlPanel, data: &DisplayData) {
    panel.volume.set_value(data.volume);
    if let Some(condition) = data.condition {
        panel.condition.set_value(condition);
    }
    if let Some(pedal_noise) = data.pedal_noise {
        panel.pedal_noise.set_value(pedal_noise);
    }
    if let Some(key_release_noise) = data.key_release_noise {
        panel.key_release_noise.set_value(key_release_noise);
    }

    if let Some(instrument) = panel.instrument.as_mut() {
        instrument.clear();
        for name in data.available_presets.instruments() {
            instrument.push_option(DropdownOption::new(name));
        }
        if let Some(selected) = data.instrument.as_deref() {
            instrument.select(selected);
        }
    }
    populate_preset_dropdown(&mut panel.preset, data, data.instrument.as_deref());

    if let (Some(output_mode), Some(mode)) =
        (panel.output_mode.as_mut(), data.output_mode.as_deref())
    {
        output_mode.select(mode);
    }

    render_reverb(&mut panel.reverb, data.matched_reverb());

    panel.data_table.clear();
    for row in &data.data_table {
        panel.data_table.push_row(row.clone());
    }
}

/// A named reverb is selected as-is, so a name outside the option list
/// leaves nothing selected. Only a missing name falls back to the sentinel.
fn render_reverb(reverb: &mut Dropdown, matched: Option<&str>) {
    match matched {
        Some(name) => {
            reverb.select(name);
        }
        None => {
            if reverb.find_by_id(UNKNOWN_REVERB_ID).is_none() {
                reverb.push_option(
                    DropdownOption::new(UNKNOWN_REVERB_LABEL).with_id(UNKNOWN_REVERB_ID),
                );
            }
            reverb.select(UNKNOWN_REVERB_LABEL);
        }
    }
}
