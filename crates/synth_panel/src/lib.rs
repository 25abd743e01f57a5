//! Control panel for a remote synthesis engine.
//!
//! The panel fetches the engine's state, renders it onto a fixed widget set,
//! and routes every user change through a disable → mutate → refetch cycle.
//! The transport lives behind [`RemoteStateClient`].

pub mod binder;
pub mod bootstrap;
pub mod client;
pub mod config;
pub mod controller;
pub mod flash;
pub mod protocol;
pub mod resolver;
pub mod validation;
pub mod widgets;

pub use bootstrap::bootstrap;
pub use client::{ClientError, Mutation, RemoteStateClient};
pub use config::{PanelCapabilities, PanelConfig, load_config};
pub use controller::{Dispatch, Intent, MutationController, PanelEvent, Phase, resolve_intent};
pub use protocol::{AvailablePresets, DataRow, DisplayData, PresetInfo};
pub use validation::ValidationError;
pub use widgets::{ControlPanel, WidgetId};

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Load a captured snapshot from a JSON file
pub fn load_snapshot(path: &Path) -> Result<DisplayData> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot from {}", path.display()))?;
    protocol::deserialize_display_data(&json).context("Failed to parse snapshot JSON")
}
