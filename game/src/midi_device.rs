//! Live note input from a MIDI port.
//!
//! The driver callback runs on midir's thread; it only decodes and forwards messages over a
//! channel. The game thread drains that channel once per tick with `poll`.

use std::sync::mpsc;

use thiserror::Error;

use crate::input::MidiMessage;
use crate::settings::MidiSettings;

const CLIENT_NAME: &str = "openkeys";

#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("no MIDI input ports found")]
    NoPorts,
    #[error("MIDI backend unavailable: {0}")]
    Init(#[from] midir::InitError),
    #[error("failed to connect to MIDI port '{port}': {reason}")]
    Connect { port: String, reason: String },
}

/// Names of all input ports, in driver order.
pub fn list_ports() -> Result<Vec<String>, DeviceError> {
    let midi_in = midir::MidiInput::new(CLIENT_NAME)?;
    Ok(midi_in
        .ports()
        .iter()
        .map(|port| {
            midi_in
                .port_name(port)
                .unwrap_or_else(|_| "unknown".to_string())
        })
        .collect())
}

/// First port whose name contains `preferred`; otherwise the first port not matching any
/// `ignored` substring.
pub fn select_port(names: &[String], preferred: Option<&str>, ignored: &[String]) -> Option<usize> {
    if let Some(wanted) = preferred.filter(|w| !w.is_empty()) {
        if let Some(index) = names.iter().position(|name| name.contains(wanted)) {
            return Some(index);
        }
        log::warn!("no MIDI port matches '{wanted}', picking automatically");
    }
    names
        .iter()
        .position(|name| !ignored.iter().any(|skip| name.contains(skip.as_str())))
}

pub struct MidiDevice {
    port_name: String,
    _connection: midir::MidiInputConnection<()>,
    rx: mpsc::Receiver<MidiMessage>,
}

impl MidiDevice {
    pub fn open(settings: &MidiSettings) -> Result<Self, DeviceError> {
        let midi_in = midir::MidiInput::new(CLIENT_NAME)?;
        let ports = midi_in.ports();
        let names: Vec<String> = ports
            .iter()
            .map(|port| {
                midi_in
                    .port_name(port)
                    .unwrap_or_else(|_| "unknown".to_string())
            })
            .collect();
        log::debug!("MIDI input ports: {names:?}");

        let index = select_port(
            &names,
            settings.preferred_port.as_deref(),
            &settings.ignored_ports,
        )
        .ok_or(DeviceError::NoPorts)?;
        let port_name = names[index].clone();

        let (tx, rx) = mpsc::channel();
        let connection = midi_in
            .connect(
                &ports[index],
                "openkeys-input",
                move |_timestamp, bytes, _| {
                    if let Some(message) = MidiMessage::parse(bytes) {
                        let _ = tx.send(message);
                    }
                },
                (),
            )
            .map_err(|err| DeviceError::Connect {
                port: port_name.clone(),
                reason: err.to_string(),
            })?;

        log::info!("listening on MIDI port '{port_name}'");
        Ok(Self {
            port_name,
            _connection: connection,
            rx,
        })
    }

    pub fn port_name(&self) -> &str {
        &self.port_name
    }

    /// Drains everything received since the last call, oldest first. Never blocks.
    pub fn poll(&self) -> Vec<MidiMessage> {
        self.rx.try_iter().collect()
    }
}
