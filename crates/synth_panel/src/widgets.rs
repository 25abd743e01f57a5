//! Retained widget model for the control panel.
//!
//! The widget set is built once at bootstrap. Render passes mutate values and
//! option lists in place; a host (DOM bridge, native toolkit, test) mirrors
//! this state onto real elements.

use serde::Serialize;

use crate::config::PanelConfig;
use crate::protocol::DataRow;

/// Number of tick marks drawn under each slider (0.0, 0.1, ... 1.0).
pub const TICKMARK_COUNT: usize = 11;

/// Stable key of the synthetic reverb option shown when no named preset matches.
pub const UNKNOWN_REVERB_ID: &str = "unknown-reverb-preset";
pub const UNKNOWN_REVERB_LABEL: &str = "Unknown/Custom";

/// Every element the panel binds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WidgetId {
    Volume,
    Condition,
    PedalNoise,
    KeyReleaseNoise,
    Instrument,
    Preset,
    OutputMode,
    Reverb,
    DataTable,
    Debug,
    Flash,
    FlashMessage,
    FlashHr,
}

impl WidgetId {
    pub const ALL: [WidgetId; 13] = [
        WidgetId::Volume,
        WidgetId::Condition,
        WidgetId::PedalNoise,
        WidgetId::KeyReleaseNoise,
        WidgetId::Instrument,
        WidgetId::Preset,
        WidgetId::OutputMode,
        WidgetId::Reverb,
        WidgetId::DataTable,
        WidgetId::Debug,
        WidgetId::Flash,
        WidgetId::FlashMessage,
        WidgetId::FlashHr,
    ];

    /// Element identifier in the page markup.
    pub fn element_id(self) -> &'static str {
        match self {
            WidgetId::Volume => "volume",
            WidgetId::Condition => "condition",
            WidgetId::PedalNoise => "pedal-noise",
            WidgetId::KeyReleaseNoise => "key-release-noise",
            WidgetId::Instrument => "instrument",
            WidgetId::Preset => "preset",
            WidgetId::OutputMode => "output-mode",
            WidgetId::Reverb => "reverb",
            WidgetId::DataTable => "data-table",
            WidgetId::Debug => "debug",
            WidgetId::Flash => "flash",
            WidgetId::FlashMessage => "flash-message",
            WidgetId::FlashHr => "flash-hr",
        }
    }

    pub fn from_element_id(id: &str) -> Option<WidgetId> {
        WidgetId::ALL.into_iter().find(|w| w.element_id() == id)
    }
}

fn tickmarks() -> Vec<f64> {
    (0..TICKMARK_COUNT)
        .map(|i| i as f64 / (TICKMARK_COUNT - 1) as f64)
        .collect()
}

/// A range input over [min, max].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slider {
    value: f64,
    pub min: f64,
    pub max: f64,
    pub tickmarks: Vec<f64>,
    pub disabled: bool,
}

impl Slider {
    pub fn new() -> Self {
        Self {
            value: 0.0,
            min: 0.0,
            max: 1.0,
            tickmarks: tickmarks(),
            disabled: true,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Set the value, clamped to the slider's range like a range input does.
    pub fn set_value(&mut self, value: f64) {
        self.value = if value.is_nan() {
            self.min
        } else {
            value.clamp(self.min, self.max)
        };
    }
}

impl Default for Slider {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DropdownOption {
    pub value: String,
    pub label: String,
    /// Stable element key, for options that must be found again across renders.
    pub id: Option<String>,
}

impl DropdownOption {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
            id: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// A select element. The selection is always one of the current options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dropdown {
    options: Vec<DropdownOption>,
    selected: Option<String>,
    pub disabled: bool,
}

impl Dropdown {
    pub fn new() -> Self {
        Self {
            options: Vec::new(),
            selected: None,
            disabled: true,
        }
    }

    pub fn with_options<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut dropdown = Self::new();
        for value in values {
            dropdown.push_option(DropdownOption::new(value));
        }
        dropdown
    }

    pub fn options(&self) -> &[DropdownOption] {
        &self.options
    }

    pub fn option_values(&self) -> Vec<&str> {
        self.options.iter().map(|o| o.value.as_str()).collect()
    }

    pub fn contains(&self, value: &str) -> bool {
        self.options.iter().any(|o| o.value == value)
    }

    pub fn find_by_id(&self, id: &str) -> Option<&DropdownOption> {
        self.options.iter().find(|o| o.id.as_deref() == Some(id))
    }

    /// Remove every option. The selection goes with them.
    pub fn clear(&mut self) {
        self.options.clear();
        self.selected = None;
    }

    pub fn push_option(&mut self, option: DropdownOption) {
        self.options.push(option);
    }

    /// Select `value` if it is one of the options, otherwise clear the selection.
    pub fn select(&mut self, value: &str) -> bool {
        if self.contains(value) {
            self.selected = Some(value.to_string());
            true
        } else {
            self.selected = None;
            false
        }
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct DataTable {
    rows: Vec<DataRow>,
}

impl DataTable {
    pub fn rows(&self) -> &[DataRow] {
        &self.rows
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    pub fn push_row(&mut self, row: DataRow) {
        self.rows.push(row);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextField {
    pub value: String,
    pub disabled: bool,
}

impl Default for TextField {
    fn default() -> Self {
        Self {
            value: String::new(),
            disabled: true,
        }
    }
}

/// The error banner: a box holding the message plus a separator rule.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FlashBanner {
    pub message: String,
    pub box_visible: bool,
    pub rule_visible: bool,
}

/// The fixed widget set of one panel instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlPanel {
    pub volume: Slider,
    pub condition: Slider,
    pub pedal_noise: Slider,
    pub key_release_noise: Slider,
    pub instrument: Option<Dropdown>,
    pub preset: Dropdown,
    pub output_mode: Option<Dropdown>,
    pub reverb: Dropdown,
    pub data_table: DataTable,
    pub debug: TextField,
    pub flash: FlashBanner,
}

impl ControlPanel {
    /// Build the widget set for `config`. Every control starts disabled until
    /// the first render.
    pub fn new(config: &PanelConfig) -> Self {
        let capabilities = config.capabilities;
        Self {
            volume: Slider::new(),
            condition: Slider::new(),
            pedal_noise: Slider::new(),
            key_release_noise: Slider::new(),
            instrument: capabilities
                .has_instrument_dimension
                .then(Dropdown::new),
            preset: Dropdown::new(),
            output_mode: capabilities
                .has_output_mode
                .then(|| Dropdown::with_options(config.output_modes.iter().cloned())),
            reverb: Dropdown::with_options(config.reverb_presets.iter().cloned()),
            data_table: DataTable::default(),
            debug: TextField::default(),
            flash: FlashBanner::default(),
        }
    }

    /// Enable or disable every control in one step.
    pub fn set_disabled(&mut self, disabled: bool) {
        for slider in [
            &mut self.volume,
            &mut self.condition,
            &mut self.pedal_noise,
            &mut self.key_release_noise,
        ] {
            slider.disabled = disabled;
        }
        for dropdown in [
            self.instrument.as_mut(),
            Some(&mut self.preset),
            self.output_mode.as_mut(),
            Some(&mut self.reverb),
        ]
        .into_iter()
        .flatten()
        {
            dropdown.disabled = disabled;
        }
        self.debug.disabled = disabled;
    }

    /// Disabled state of the control `id`, or `None` if it is not a control
    /// present in this panel.
    pub fn is_disabled(&self, id: WidgetId) -> Option<bool> {
        match id {
            WidgetId::Volume => Some(self.volume.disabled),
            WidgetId::Condition => Some(self.condition.disabled),
            WidgetId::PedalNoise => Some(self.pedal_noise.disabled),
            WidgetId::KeyReleaseNoise => Some(self.key_release_noise.disabled),
            WidgetId::Instrument => self.instrument.as_ref().map(|d| d.disabled),
            WidgetId::Preset => Some(self.preset.disabled),
            WidgetId::OutputMode => self.output_mode.as_ref().map(|d| d.disabled),
            WidgetId::Reverb => Some(self.reverb.disabled),
            WidgetId::Debug => Some(self.debug.disabled),
            WidgetId::DataTable | WidgetId::Flash | WidgetId::FlashMessage | WidgetId::FlashHr => {
                None
            }
        }
    }

    /// Whether `id` can currently emit change events.
    pub fn accepts_input(&self, id: WidgetId) -> bool {
        self.is_disabled(id) == Some(false)
    }

    fn control_states(&self) -> impl Iterator<Item = bool> + '_ {
        WidgetId::ALL
            .into_iter()
            .filter_map(|id| self.is_disabled(id))
    }

    pub fn all_disabled(&self) -> bool {
        self.control_states().all(|disabled| disabled)
    }

    pub fn all_enabled(&self) -> bool {
        self.control_states().all(|disabled| !disabled)
    }
}
