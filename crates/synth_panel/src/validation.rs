use crate::config::PanelCapabilities;
use crate::protocol::{AvailablePresets, DisplayData};

/// A single problem found in an engine snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Check a snapshot against the panel's capabilities before it is rendered.
///
/// Returns every problem found, not just the first.
pub fn validate_display_data(
    data: &DisplayData,
    capabilities: &PanelCapabilities,
) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if data.available_presets.is_empty() {
        errors.push(ValidationError::new(
            "available_presets",
            "Engine reported no presets",
        ));
    }

    match (&data.available_presets, capabilities.has_instrument_dimension) {
        // An empty mapping parses as either shape; it is already reported above.
        _ if data.available_presets.is_empty() => {}
        (AvailablePresets::ByInstrument(instruments), true) => match data.instrument.as_deref() {
            None => errors.push(ValidationError::new(
                "instrument",
                "Missing instrument for an engine with an instrument dimension",
            )),
            Some(instrument) => match instruments.get(instrument) {
                None => errors.push(ValidationError::new(
                    "instrument",
                    format!("Unknown instrument '{}'", instrument),
                )),
                Some(presets) if !presets.contains_key(&data.preset) => {
                    errors.push(ValidationError::new(
                        "preset",
                        format!(
                            "Preset '{}' is not available for instrument '{}'",
                            data.preset, instrument
                        ),
                    ))
                }
                Some(_) => {}
            },
        },
        (AvailablePresets::Flat(presets), false) => {
            if !presets.contains_key(&data.preset) {
                errors.push(ValidationError::new(
                    "preset",
                    format!("Unknown preset '{}'", data.preset),
                ));
            }
        }
        (AvailablePresets::ByInstrument(_), false) => errors.push(ValidationError::new(
            "available_presets",
            "Presets are grouped by instrument but the panel has no instrument dimension",
        )),
        (AvailablePresets::Flat(_), true) => errors.push(ValidationError::new(
            "available_presets",
            "Presets are not grouped by instrument",
        )),
    }

    if capabilities.has_output_mode && data.output_mode.is_none() {
        errors.push(ValidationError::new(
            "output_mode",
            "Missing output mode for an engine with output routing",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Join validation errors into one description
pub fn describe_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::deserialize_display_data;

    fn grand() -> DisplayData {
        deserialize_display_data(
            r#"{
                "volume": 0.7,
                "instrument": "Grand",
                "preset": "Classical",
                "available_presets": {"Grand": {"Classical": {"bank": 0}, "Jazz": {"bank": 1}}}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_valid_snapshot() {
        assert!(validate_display_data(&grand(), &PanelCapabilities::default()).is_ok());
    }

    #[test]
    fn test_unknown_preset_for_instrument() {
        let mut data = grand();
        data.preset = "Rock".to_string();
        let errors = validate_display_data(&data, &PanelCapabilities::default()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "preset");
    }

    #[test]
    fn test_unknown_instrument() {
        let mut data = grand();
        data.instrument = Some("Harp".to_string());
        let errors = validate_display_data(&data, &PanelCapabilities::default()).unwrap_err();
        assert!(errors[0].message.contains("Harp"));
    }

    #[test]
    fn test_empty_presets_and_missing_output_mode_are_all_reported() {
        let data = deserialize_display_data(
            r#"{"volume": 0.1, "preset": "x", "available_presets": {}}"#,
        )
        .unwrap();
        let capabilities = PanelCapabilities {
            has_instrument_dimension: false,
            has_output_mode: true,
        };
        let errors = validate_display_data(&data, &capabilities).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["available_presets", "output_mode"]);
        assert_eq!(
            describe_errors(&errors),
            "available_presets: Engine reported no presets; \
             output_mode: Missing output mode for an engine with output routing"
        );
    }

    #[test]
    fn test_shape_must_match_capabilities() {
        let capabilities = PanelCapabilities {
            has_instrument_dimension: false,
            has_output_mode: false,
        };
        let errors = validate_display_data(&grand(), &capabilities).unwrap_err();
        assert_eq!(errors[0].field, "available_presets");

        let flat = deserialize_display_data(
            r#"{"volume": 0.1, "preset": "Bright", "available_presets": {"Bright": {"bank": 2}}}"#,
        )
        .unwrap();
        assert!(validate_display_data(&flat, &capabilities).is_ok());
        assert!(validate_display_data(&flat, &PanelCapabilities::default()).is_err());
    }
}
