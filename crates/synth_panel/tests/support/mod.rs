#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use synth_panel::protocol::deserialize_display_data;
use synth_panel::{ClientError, DisplayData, RemoteStateClient};

/// A recorded call against the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    GetDisplayData,
    SetVolume(f64),
    SetCondition(f64),
    SetPedalNoise(f64),
    SetKeyReleaseNoise(f64),
    SetReverb(String),
    SetOutputMode(String),
    LoadPreset(String, i64),
}

/// In-memory engine that replays scripted replies and records every call.
///
/// Snapshots are served in order; mutations succeed unless a failure has
/// been queued for them.
#[derive(Default)]
pub struct ScriptedClient {
    calls: Rc<RefCell<Vec<Call>>>,
    snapshots: RefCell<VecDeque<Result<DisplayData, ClientError>>>,
    mutation_failures: RefCell<VecDeque<ClientError>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(self, data: DisplayData) -> Self {
        self.snapshots.borrow_mut().push_back(Ok(data));
        self
    }

    pub fn with_fetch_error(self, error: ClientError) -> Self {
        self.snapshots.borrow_mut().push_back(Err(error));
        self
    }

    pub fn with_mutation_error(self, error: ClientError) -> Self {
        self.mutation_failures.borrow_mut().push_back(error);
        self
    }

    pub fn push_snapshot(&self, data: DisplayData) {
        self.snapshots.borrow_mut().push_back(Ok(data));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn call_log(&self) -> Rc<RefCell<Vec<Call>>> {
        self.calls.clone()
    }

    fn mutate(&self, call: Call) -> Result<(), ClientError> {
        self.calls.borrow_mut().push(call);
        match self.mutation_failures.borrow_mut().pop_front() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl RemoteStateClient for ScriptedClient {
    async fn get_display_data(&self) -> Result<DisplayData, ClientError> {
        self.calls.borrow_mut().push(Call::GetDisplayData);
        self.snapshots
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::transport("No scripted snapshot")))
    }

    async fn set_volume(&self, value: f64) -> Result<(), ClientError> {
        self.mutate(Call::SetVolume(value))
    }

    async fn set_condition(&self, value: f64) -> Result<(), ClientError> {
        self.mutate(Call::SetCondition(value))
    }

    async fn set_pedal_noise(&self, value: f64) -> Result<(), ClientError> {
        self.mutate(Call::SetPedalNoise(value))
    }

    async fn set_key_release_noise(&self, value: f64) -> Result<(), ClientError> {
        self.mutate(Call::SetKeyReleaseNoise(value))
    }

    async fn set_reverb(&self, name: &str) -> Result<(), ClientError> {
        self.mutate(Call::SetReverb(name.to_string()))
    }

    async fn set_output_mode(&self, mode: &str) -> Result<(), ClientError> {
        self.mutate(Call::SetOutputMode(mode.to_string()))
    }

    async fn load_preset(&self, name: &str, bank: i64) -> Result<(), ClientError> {
        self.mutate(Call::LoadPreset(name.to_string(), bank))
    }
}

/// The snapshot from the reference scenario: one instrument, two presets,
/// unmatched reverb.
pub fn scenario_a() -> DisplayData {
    deserialize_display_data(
        r#"{
            "volume": 0.7,
            "instrument": "Grand",
            "available_presets": {"Grand": {"Classical": {"bank": 0}, "Jazz": {"bank": 1}}},
            "preset": "Classical",
            "reverb": null,
            "data_table": [["CPU", "3%"]]
        }"#,
    )
    .unwrap()
}

/// Two instruments sharing a preset name under different banks.
pub fn two_instruments() -> DisplayData {
    deserialize_display_data(
        r#"{
            "volume": 0.5,
            "condition": 0.25,
            "pedal_noise": 0.5,
            "key_release_noise": 0.75,
            "instrument": "Grand",
            "preset": "Classical",
            "available_presets": {
                "Grand": {"Classical": {"bank": 0}, "Jazz": {"bank": 1}},
                "Upright": {"Honky": {"bank": 3}, "Classical": {"bank": 4}}
            },
            "reverb": "Chamber",
            "data_table": [["CPU", "5%"], ["Polyphony", "32"]]
        }"#,
    )
    .unwrap()
}

/// Flat-preset engine with output routing.
pub fn flat_with_output_mode() -> DisplayData {
    deserialize_display_data(
        r#"{
            "volume": 0.2,
            "preset": "Bright",
            "available_presets": {"Bright": {"bank": 2}, "Warm": {"bank": 5}},
            "output_mode": "Stereophonic",
            "reverb": "Cathedral"
        }"#,
    )
    .unwrap()
}
