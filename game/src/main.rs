use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::Parser;
use engine::app::{AppConfig, run_game};
use engine::surface::SurfaceSize;
use engine::ui::Size;
use log::LevelFilter;

use openkeys::headful::app::OpenKeysApp;
use openkeys::midi_device::{self, MidiDevice};
use openkeys::session::Session;
use openkeys::settings::SettingsStore;

#[derive(Debug, Parser)]
#[command(name = "openkeys")]
#[command(about = "Piano note and rhythm trainer for MIDI keyboards")]
struct Cli {
    /// Settings file to use instead of the default location.
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Seed for target and spawn selection.
    #[arg(long)]
    seed: Option<u64>,
    /// Open the first MIDI input port whose name contains this.
    #[arg(long)]
    midi_port: Option<String>,
    /// Print the available MIDI input ports and exit.
    #[arg(long, default_value_t = false)]
    list_midi_ports: bool,
    #[arg(long)]
    log_level: Option<LevelFilter>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let _ = env_logger::builder()
        .filter_level(LevelFilter::Trace)
        .try_init();
    log::set_max_level(LevelFilter::Warn);

    let store = match &cli.settings {
        Some(path) => SettingsStore::at(path),
        None => SettingsStore::from_env(),
    };
    let mut settings = store.load();
    log::set_max_level(cli.log_level.unwrap_or_else(|| settings.level_filter()));
    log::debug!("settings from {}", store.path().display());

    if cli.list_midi_ports {
        for (i, name) in midi_device::list_ports()?.iter().enumerate() {
            println!("{i}: {name}");
        }
        return Ok(());
    }

    if let Some(port) = cli.midi_port {
        settings.midi.preferred_port = Some(port);
    }
    let midi = match MidiDevice::open(&settings.midi) {
        Ok(device) => Some(device),
        Err(err) => {
            log::warn!("{err}; continuing without MIDI input");
            None
        }
    };

    let window = settings.window;
    let session = Session::new(settings.rhythm.stream_config());
    let app = OpenKeysApp::new(
        session,
        cli.seed,
        Size::new(window.width, window.height),
        midi,
    );

    run_game(
        AppConfig {
            title: "OpenKeys".to_string(),
            logical_size: SurfaceSize::new(window.width, window.height),
            resizable: true,
            vsync: Some(window.vsync),
            target_fps: Some(window.fps),
        },
        app,
    )
    .map_err(|err| anyhow!("{err}"))
}
