use std::future::Future;

use crate::protocol::DisplayData;
use crate::validation::{ValidationError, describe_errors};

/// Failure of a remote call.
///
/// `Display` is the bare description so it can be shown to the operator
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The engine did not answer.
    Transport(String),
    /// The engine answered with something malformed or unexpected.
    Protocol(String),
}

impl ClientError {
    pub fn transport(message: impl Into<String>) -> Self {
        ClientError::Transport(message.into())
    }

    pub fn protocol(message: impl Into<String>) -> Self {
        ClientError::Protocol(message.into())
    }

    pub fn description(&self) -> &str {
        match self {
            ClientError::Transport(message) | ClientError::Protocol(message) => message,
        }
    }
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}

impl std::error::Error for ClientError {}

impl From<Vec<ValidationError>> for ClientError {
    fn from(errors: Vec<ValidationError>) -> Self {
        ClientError::Protocol(describe_errors(&errors))
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(error: serde_json::Error) -> Self {
        ClientError::Protocol(error.to_string())
    }
}

/// Async access to the engine.
///
/// Implementations own the transport. Every mutation resolves once the
/// engine acknowledges it. The panel runs on a single thread, so no `Send`
/// bound is placed on the returned futures.
pub trait RemoteStateClient {
    fn get_display_data(&self) -> impl Future<Output = Result<DisplayData, ClientError>>;

    fn set_volume(&self, value: f64) -> impl Future<Output = Result<(), ClientError>>;

    fn set_condition(&self, value: f64) -> impl Future<Output = Result<(), ClientError>>;

    fn set_pedal_noise(&self, value: f64) -> impl Future<Output = Result<(), ClientError>>;

    fn set_key_release_noise(&self, value: f64) -> impl Future<Output = Result<(), ClientError>>;

    fn set_reverb(&self, name: &str) -> impl Future<Output = Result<(), ClientError>>;

    fn set_output_mode(&self, mode: &str) -> impl Future<Output = Result<(), ClientError>>;

    fn load_preset(&self, name: &str, bank: i64) -> impl Future<Output = Result<(), ClientError>>;
}

/// One engine-changing call.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    SetVolume(f64),
    SetCondition(f64),
    SetPedalNoise(f64),
    SetKeyReleaseNoise(f64),
    SetReverb(String),
    SetOutputMode(String),
    LoadPreset { name: String, bank: i64 },
}

impl Mutation {
    /// Issue this mutation through `client`.
    pub async fn apply<C: RemoteStateClient>(&self, client: &C) -> Result<(), ClientError> {
        match self {
            Mutation::SetVolume(value) => client.set_volume(*value).await,
            Mutation::SetCondition(value) => client.set_condition(*value).await,
            Mutation::SetPedalNoise(value) => client.set_pedal_noise(*value).await,
            Mutation::SetKeyReleaseNoise(value) => client.set_key_release_noise(*value).await,
            Mutation::SetReverb(name) => client.set_reverb(name).await,
            Mutation::SetOutputMode(mode) => client.set_output_mode(mode).await,
            Mutation::LoadPreset { name, bank } => client.load_preset(name, *bank).await,
        }
    }

    /// Short operation name, for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::SetVolume(_) => "set_volume",
            Mutation::SetCondition(_) => "set_condition",
            Mutation::SetPedalNoise(_) => "set_pedal_noise",
            Mutation::SetKeyReleaseNoise(_) => "set_key_release_noise",
            Mutation::SetReverb(_) => "set_reverb",
            Mutation::SetOutputMode(_) => "set_output_mode",
            Mutation::LoadPreset { .. } => "load_preset",
        }
    }
}
