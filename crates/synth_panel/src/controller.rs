//! The mutation protocol: disable → mutate → refetch → re-enable.
//!
//! All controls are disabled synchronously before a remote call starts, and
//! disabled widgets emit no events, so one panel has at most one mutation in
//! flight. A failure is terminal: the banner asks for a reload and nothing is
//! re-enabled.

use tracing::{debug, error, info};

use crate::binder::render;
use crate::client::{ClientError, Mutation, RemoteStateClient};
use crate::config::PanelCapabilities;
use crate::flash::report_error;
use crate::protocol::DisplayData;
use crate::resolver::{populate_preset_dropdown, resolve_bank};
use crate::validation::validate_display_data;
use crate::widgets::{ControlPanel, Dropdown, WidgetId};

/// A change event emitted by one of the panel's controls.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelEvent {
    VolumeChanged(f64),
    ConditionChanged(f64),
    PedalNoiseChanged(f64),
    KeyReleaseNoiseChanged(f64),
    InstrumentSelected(String),
    PresetSelected(String),
    ReverbSelected(String),
    OutputModeSelected(String),
}

impl PanelEvent {
    /// The widget that emitted this event.
    pub fn source(&self) -> WidgetId {
        match self {
            PanelEvent::VolumeChanged(_) => WidgetId::Volume,
            PanelEvent::ConditionChanged(_) => WidgetId::Condition,
            PanelEvent::PedalNoiseChanged(_) => WidgetId::PedalNoise,
            PanelEvent::KeyReleaseNoiseChanged(_) => WidgetId::KeyReleaseNoise,
            PanelEvent::InstrumentSelected(_) => WidgetId::Instrument,
            PanelEvent::PresetSelected(_) => WidgetId::Preset,
            PanelEvent::ReverbSelected(_) => WidgetId::Reverb,
            PanelEvent::OutputModeSelected(_) => WidgetId::OutputMode,
        }
    }
}

/// What an event asks the panel to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Show another instrument's presets. Local only.
    SelectInstrument(String),
    Mutate(Mutation),
}

/// Turn an event into an intent, using the last snapshot for bank lookups.
///
/// `instrument` is the instrument currently selected in the panel, which may
/// differ from the snapshot's after a local instrument change.
pub fn resolve_intent(
    event: &PanelEvent,
    snapshot: &DisplayData,
    instrument: Option<&str>,
) -> Result<Intent, ClientError> {
    let mutation = match event {
        PanelEvent::InstrumentSelected(name) => return Ok(Intent::SelectInstrument(name.clone())),
        PanelEvent::VolumeChanged(value) => Mutation::SetVolume(*value),
        PanelEvent::ConditionChanged(value) => Mutation::SetCondition(*value),
        PanelEvent::PedalNoiseChanged(value) => Mutation::SetPedalNoise(*value),
        PanelEvent::KeyReleaseNoiseChanged(value) => Mutation::SetKeyReleaseNoise(*value),
        PanelEvent::ReverbSelected(name) => Mutation::SetReverb(name.clone()),
        PanelEvent::OutputModeSelected(mode) => Mutation::SetOutputMode(mode.clone()),
        PanelEvent::PresetSelected(name) => Mutation::LoadPreset {
            name: name.clone(),
            bank: resolve_bank(snapshot, instrument, name)?,
        },
    };
    Ok(Intent::Mutate(mutation))
}

/// Select `value` only if it is one of the options; otherwise the current
/// selection stays.
fn choose(dropdown: &mut Dropdown, value: &str) -> bool {
    dropdown.contains(value) && dropdown.select(value)
}

/// Store the user's input in the source widget, the way an input element
/// holds its new value when it fires. Slider values come back clamped.
///
/// Returns `None` when a dropdown has no option with the chosen value.
fn record_input(panel: &mut ControlPanel, event: PanelEvent) -> Option<PanelEvent> {
    let event = match event {
        PanelEvent::VolumeChanged(value) => {
            panel.volume.set_value(value);
            PanelEvent::VolumeChanged(panel.volume.value())
        }
        PanelEvent::ConditionChanged(value) => {
            panel.condition.set_value(value);
            PanelEvent::ConditionChanged(panel.condition.value())
        }
        PanelEvent::PedalNoiseChanged(value) => {
            panel.pedal_noise.set_value(value);
            PanelEvent::PedalNoiseChanged(panel.pedal_noise.value())
        }
        PanelEvent::KeyReleaseNoiseChanged(value) => {
            panel.key_release_noise.set_value(value);
            PanelEvent::KeyReleaseNoiseChanged(panel.key_release_noise.value())
        }
        PanelEvent::InstrumentSelected(ref name) => {
            let instrument = panel.instrument.as_mut()?;
            if !choose(instrument, name) {
                return None;
            }
            event
        }
        PanelEvent::PresetSelected(ref name) => {
            if !choose(&mut panel.preset, name) {
                return None;
            }
            event
        }
        PanelEvent::ReverbSelected(ref name) => {
            if !choose(&mut panel.reverb, name) {
                return None;
            }
            event
        }
        PanelEvent::OutputModeSelected(ref mode) => {
            let output_mode = panel.output_mode.as_mut()?;
            if !choose(output_mode, mode) {
                return None;
            }
            event
        }
    };
    Some(event)
}

/// Protocol state of a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    /// Every control was disabled in the same step that left `Idle`, and a
    /// remote call is pending.
    InFlight,
    /// A remote call failed. Terminal until reload.
    Errored,
}

/// Outcome of dispatching one event.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    /// The source widget was disabled or absent, the value is not one of its
    /// options, or the panel has failed.
    Ignored,
    /// Handled locally without a remote call.
    Local,
    /// The mutation succeeded and the panel shows the refreshed state.
    Applied,
    /// A remote call failed; the panel is now terminal.
    Failed(ClientError),
}

/// Owns the widget set and the last snapshot, and runs every mutation.
pub struct MutationController<C> {
    client: C,
    capabilities: PanelCapabilities,
    widgets: ControlPanel,
    snapshot: Option<DisplayData>,
    phase: Phase,
}

impl<C: RemoteStateClient> MutationController<C> {
    /// Controller over a freshly built widget set. Controls stay disabled
    /// until the first successful fetch is applied.
    pub fn new(client: C, capabilities: PanelCapabilities, widgets: ControlPanel) -> Self {
        Self {
            client,
            capabilities,
            widgets,
            snapshot: None,
            phase: Phase::Idle,
        }
    }

    pub fn widgets(&self) -> &ControlPanel {
        &self.widgets
    }

    pub fn snapshot(&self) -> Option<&DisplayData> {
        self.snapshot.as_ref()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Handle one change event from the panel.
    pub async fn dispatch(&mut self, event: PanelEvent) -> Dispatch {
        let source = event.source();
        if self.phase != Phase::Idle || !self.widgets.accepts_input(source) {
            debug!(
                widget = source.element_id(),
                phase = ?self.phase,
                "Ignoring event from inactive widget"
            );
            return Dispatch::Ignored;
        }
        let Some(snapshot) = self.snapshot.as_ref() else {
            return Dispatch::Ignored;
        };

        let Some(event) = record_input(&mut self.widgets, event) else {
            debug!(widget = source.element_id(), "Ignoring value the widget does not offer");
            return Dispatch::Ignored;
        };
        let instrument = self.widgets.instrument.as_ref().and_then(|d| d.selected());
        match resolve_intent(&event, snapshot, instrument) {
            Ok(Intent::SelectInstrument(name)) => {
                debug!(instrument = %name, "Showing presets for instrument");
                populate_preset_dropdown(&mut self.widgets.preset, snapshot, Some(&name));
                Dispatch::Local
            }
            Ok(Intent::Mutate(mutation)) => self.run_mutation(mutation).await,
            Err(e) => self.fail(e),
        }
    }

    async fn run_mutation(&mut self, mutation: Mutation) -> Dispatch {
        self.widgets.set_disabled(true);
        self.phase = Phase::InFlight;
        debug!(operation = mutation.name(), ?mutation, "Mutation in flight");

        if let Err(e) = mutation.apply(&self.client).await {
            return self.fail(e);
        }
        let fetched = self.client.get_display_data().await;
        match self.apply_fetch(fetched) {
            Ok(()) => {
                info!(operation = mutation.name(), "Mutation applied");
                Dispatch::Applied
            }
            Err(e) => self.fail(e),
        }
    }

    /// Validate, store and render a fetched snapshot, then re-enable the panel.
    fn apply_fetch(
        &mut self,
        fetched: Result<DisplayData, ClientError>,
    ) -> Result<(), ClientError> {
        let data = fetched?;
        validate_display_data(&data, &self.capabilities)?;
        render(&mut self.widgets, &data);
        self.snapshot = Some(data);
        self.widgets.set_disabled(false);
        self.phase = Phase::Idle;
        Ok(())
    }

    /// Apply the result of the initial fetch. Errors are reported on the panel.
    pub(crate) fn initialize(&mut self, fetched: Result<DisplayData, ClientError>) {
        if let Err(e) = self.apply_fetch(fetched) {
            self.fail(e);
        }
    }

    fn fail(&mut self, error: ClientError) -> Dispatch {
        error!(%error, "Remote call failed; panel disabled until reload");
        report_error(&mut self.widgets, &error);
        self.phase = Phase::Errored;
        Dispatch::Failed(error)
    }
}
