//! synth-panel-render: render a captured engine snapshot headlessly
//!
//! Runs a snapshot through the same bootstrap and render path as the live
//! panel and prints the resulting widget state. Useful for checking what an
//! engine reply will look like before pointing a panel at it.

use std::future::ready;
use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use clap::Parser;
use synth_panel::widgets::{Dropdown, Slider};
use synth_panel::{
    ClientError, ControlPanel, Dispatch, DisplayData, PanelConfig, PanelEvent, Phase,
    RemoteStateClient, bootstrap, load_config, load_snapshot,
};
use tracing::{Level, info};

/// Render a captured engine snapshot the way the control panel would
#[derive(Parser)]
#[command(name = "synth-panel-render")]
#[command(about = "Render a captured engine snapshot the way the control panel would")]
#[command(version)]
struct Cli {
    /// DisplayData snapshot (JSON)
    #[arg(short, long)]
    snapshot: PathBuf,

    /// Panel config (YAML); defaults to the instrument panel without output routing
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Show the presets of this instrument after the first render
    #[arg(long)]
    instrument: Option<String>,

    /// Output format
    #[arg(long, default_value = "table")]
    format: OutputFormat,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

/// Serves one captured snapshot. Mutations are refused.
struct SnapshotClient {
    data: DisplayData,
}

impl SnapshotClient {
    fn read_only() -> ClientError {
        ClientError::transport("Snapshot renderer is read-only")
    }
}

impl RemoteStateClient for SnapshotClient {
    async fn get_display_data(&self) -> Result<DisplayData, ClientError> {
        Ok(self.data.clone())
    }

    async fn set_volume(&self, _value: f64) -> Result<(), ClientError> {
        Err(Self::read_only())
    }

    async fn set_condition(&self, _value: f64) -> Result<(), ClientError> {
        Err(Self::read_only())
    }

    async fn set_pedal_noise(&self, _value: f64) -> Result<(), ClientError> {
        Err(Self::read_only())
    }

    async fn set_key_release_noise(&self, _value: f64) -> Result<(), ClientError> {
        Err(Self::read_only())
    }

    async fn set_reverb(&self, _name: &str) -> Result<(), ClientError> {
        Err(Self::read_only())
    }

    async fn set_output_mode(&self, _mode: &str) -> Result<(), ClientError> {
        Err(Self::read_only())
    }

    async fn load_preset(&self, _name: &str, _bank: i64) -> Result<(), ClientError> {
        Err(Self::read_only())
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_panel_config(path: Option<&Path>) -> Result<PanelConfig> {
    match path {
        Some(path) => load_config(path),
        None => Ok(PanelConfig::default()),
    }
}

fn format_slider(slider: &Slider) -> String {
    format!("{:.2}", slider.value())
}

fn format_dropdown(dropdown: &Dropdown) -> String {
    dropdown
        .options()
        .iter()
        .map(|option| {
            if dropdown.selected() == Some(option.value.as_str()) {
                format!("[{}]", option.label)
            } else {
                option.label.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_table(panel: &ControlPanel) {
    println!("{:<20} {}", "volume", format_slider(&panel.volume));
    println!("{:<20} {}", "condition", format_slider(&panel.condition));
    println!("{:<20} {}", "pedal-noise", format_slider(&panel.pedal_noise));
    println!(
        "{:<20} {}",
        "key-release-noise",
        format_slider(&panel.key_release_noise)
    );
    if let Some(instrument) = &panel.instrument {
        println!("{:<20} {}", "instrument", format_dropdown(instrument));
    }
    println!("{:<20} {}", "preset", format_dropdown(&panel.preset));
    if let Some(output_mode) = &panel.output_mode {
        println!("{:<20} {}", "output-mode", format_dropdown(output_mode));
    }
    println!("{:<20} {}", "reverb", format_dropdown(&panel.reverb));
    println!();
    println!("{:<20} {}", "LABEL", "VALUE");
    for (label, value) in panel.data_table.rows() {
        println!("{:<20} {}", label, value);
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_panel_config(cli.config.as_deref())?;
    let data = load_snapshot(&cli.snapshot)?;
    info!(snapshot = %cli.snapshot.display(), "Rendering snapshot");

    let mut controller = bootstrap(SnapshotClient { data }, config, ready(())).await;
    if controller.phase() == Phase::Errored {
        bail!("{}", controller.widgets().flash.message);
    }

    if let Some(instrument) = cli.instrument {
        let outcome = controller
            .dispatch(PanelEvent::InstrumentSelected(instrument.clone()))
            .await;
        let selected = controller
            .widgets()
            .instrument
            .as_ref()
            .and_then(|dropdown| dropdown.selected());
        if outcome != Dispatch::Local || selected != Some(instrument.as_str()) {
            bail!("Instrument '{}' cannot be selected on this panel", instrument);
        }
    }

    match cli.format {
        OutputFormat::Table => print_table(controller.widgets()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(controller.widgets())?),
    }
    Ok(())
}
