use crate::launchpad::find_port;
use crate::launchpad::geometry::{CellId, GeometryMap};
use anyhow::{anyhow, Context, Result};
use midir::{Ignore, MidiInput, MidiInputConnection};
use std::sync::mpsc::Sender;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    NoteOn,
    NoteOff,
    ControlChange,
    Aftertouch,
    Other,
}

/// A three-byte channel message from the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawEvent {
    pub id: CellId,
    pub value: u8,
    pub kind: EventKind,
}

impl RawEvent {
    pub fn new(id: CellId, value: u8, kind: EventKind) -> Self {
        Self { id, value, kind }
    }

    /// Two-byte and system messages carry no cell id and yield `None`.
    pub fn parse(message: &[u8]) -> Option<Self> {
        let &[status, id, value] = message else {
            return None;
        };
        let kind = match status & 0xF0 {
            0x90 => EventKind::NoteOn,
            0x80 => EventKind::NoteOff,
            0xA0 => EventKind::Aftertouch,
            0xB0 => EventKind::ControlChange,
            0xE0 => EventKind::Other,
            _ => return None,
        };
        Some(Self::new(CellId(id), value, kind))
    }

    fn is_release(&self) -> bool {
        self.value == 0 || self.kind == EventKind::NoteOff
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    RowStop(u8),
    ClipTrigger { row: u8, col: u8 },
    ToggleTransport,
    Unrecognized,
}

/// Decides what a device event asks for. Total: anything that is not a press
/// of a known control comes back as `Unrecognized`.
pub fn classify(geometry: &GeometryMap, event: &RawEvent) -> Input {
    if event.kind == EventKind::Aftertouch || event.is_release() {
        return Input::Unrecognized;
    }
    if let Some(row) = geometry.row_of_stop(event.id) {
        return Input::RowStop(row);
    }
    if let Some((row, col)) = geometry.coord_of(event.id) {
        return Input::ClipTrigger { row, col };
    }
    if event.id == geometry.transport_toggle_id() {
        return Input::ToggleTransport;
    }
    Input::Unrecognized
}

/// Opens the device's input port and forwards every parsed event to `tx`.
///
/// The connection stays open for as long as the returned value is alive.
pub fn connect(port_filter: &str, tx: Sender<RawEvent>) -> Result<MidiInputConnection<()>> {
    let mut midi_in =
        MidiInput::new("launchpad-performer in").context("couldn't open MIDI input")?;
    midi_in.ignore(Ignore::All);
    let (port, name) = find_port(&midi_in, port_filter)?;
    tracing::info!(port = %name, "connecting MIDI input");

    midi_in
        .connect(
            &port,
            "launchpad-performer-in",
            move |_stamp, message, _| match RawEvent::parse(message) {
                Some(event) => {
                    if tx.send(event).is_err() {
                        tracing::trace!(?event, "performer gone, dropping event");
                    }
                }
                None => tracing::trace!(?message, "ignoring MIDI message"),
            },
            (),
        )
        .map_err(|e| anyhow!("couldn't connect to MIDI input {name:?}: {e}"))
}
