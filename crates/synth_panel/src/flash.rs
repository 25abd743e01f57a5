use crate::client::ClientError;
use crate::widgets::ControlPanel;

/// Text shown in the flash banner for `error`.
pub fn flash_message(error: &ClientError) -> String {
    format!("{}. Please reload the page.", error)
}

/// Show `error` in the flash banner and leave every control disabled.
///
/// The banner has no dismiss action; only a reload clears it.
pub fn report_error(panel: &mut ControlPanel, error: &ClientError) {
    panel.set_disabled(true);
    panel.flash.message = flash_message(error);
    panel.flash.box_visible = true;
    panel.flash.rule_visible = true;
}
