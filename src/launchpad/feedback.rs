use crate::launchpad::find_port;
use crate::launchpad::geometry::{CellId, GeometryMap, GRID_COLS, GRID_ROWS};
use anyhow::{anyhow, Context, Result};
use midir::{MidiOutput, MidiOutputConnection};

const NOTE_ON: u8 = 0x90;

// Launchpad X lighting channels (0-based): static, flashing, pulsing.
const CHANNEL_STATIC: u8 = 0;
const CHANNEL_FLASH: u8 = 1;
const CHANNEL_PULSE: u8 = 2;

const SYSEX_HEADER: [u8; 6] = [0xF0, 0x00, 0x20, 0x29, 0x02, 0x0C];
const PROGRAMMER_MODE: [u8; 3] = [0x0E, 0x01, 0xF7];
const LIVE_MODE: [u8; 3] = [0x0E, 0x00, 0xF7];

/// Index into the Launchpad X palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub u8);

impl Color {
    pub const BLACK: Color = Color(0x00);
    pub const WHITE: Color = Color(0x03);
    pub const GREEN: Color = Color(0x15);
    pub const DARK_BLUE: Color = Color(0x2D);
    pub const RED: Color = Color(0x48);
    pub const DARK_RED: Color = Color(0x79);
    /// Dull orange, shown whenever there is nothing better to say.
    pub const IDLE: Color = Color(0x7E);
}

/// What a single cell should look like.
///
/// `Flash` alternates between its two colors; `Pulse` fades its color in and
/// out. Both animations run on the device, so a visual only has to be sent
/// once to keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visual {
    Off,
    Solid(Color),
    Flash(Color, Color),
    Pulse(Color),
}

impl Visual {
    /// Note-on messages that put `cell` into this state.
    pub fn messages(self, cell: CellId) -> Vec<[u8; 3]> {
        let note_on = |channel: u8, color: Color| [NOTE_ON | channel, cell.0, color.0];
        match self {
            Visual::Off => vec![note_on(CHANNEL_STATIC, Color::BLACK)],
            Visual::Solid(color) => vec![note_on(CHANNEL_STATIC, color)],
            Visual::Flash(a, b) => vec![note_on(CHANNEL_STATIC, a), note_on(CHANNEL_FLASH, b)],
            Visual::Pulse(color) => vec![note_on(CHANNEL_PULSE, color)],
        }
    }
}

/// One-way sink for device feedback. Writes never fail from the caller's
/// point of view.
pub trait Feedback {
    fn set_cell_visual(&mut self, cell: CellId, visual: Visual);

    fn send_sysex(&mut self, message: &[u8]);
}

fn handshake(body: &[u8]) -> Vec<u8> {
    SYSEX_HEADER.iter().chain(body).copied().collect()
}

/// Switches the device into programmer mode and paints the static legend.
pub fn startup<F: Feedback>(feedback: &mut F, geometry: &GeometryMap) {
    feedback.send_sysex(&handshake(&PROGRAMMER_MODE));

    // arrows, session, note, custom
    let legend = [
        Color::DARK_BLUE,
        Color::DARK_BLUE,
        Color::DARK_BLUE,
        Color::DARK_BLUE,
        Color::WHITE,
        Color::BLACK,
        Color::BLACK,
    ];
    for (&cell, &color) in geometry.legend().iter().zip(legend.iter()) {
        feedback.set_cell_visual(cell, Visual::Solid(color));
    }
    feedback.set_cell_visual(geometry.transport_toggle_id(), Visual::Solid(Color::BLACK));
}

/// Blanks the surface and hands the device back to its standalone mode.
pub fn shutdown<F: Feedback>(feedback: &mut F, geometry: &GeometryMap) {
    for row in 0..GRID_ROWS {
        for col in 0..GRID_COLS {
            feedback.set_cell_visual(geometry.cell_at(row, col), Visual::Off);
        }
        feedback.set_cell_visual(geometry.row_stop_at(row), Visual::Off);
    }
    feedback.set_cell_visual(geometry.status_indicator_id(), Visual::Off);
    feedback.set_cell_visual(geometry.transport_toggle_id(), Visual::Off);
    feedback.send_sysex(&handshake(&LIVE_MODE));
}

pub struct MidiFeedback {
    conn: MidiOutputConnection,
}

impl MidiFeedback {
    pub fn connect(port_filter: &str) -> Result<Self> {
        let midi_out =
            MidiOutput::new("launchpad-performer out").context("couldn't open MIDI output")?;
        let (port, name) = find_port(&midi_out, port_filter)?;
        tracing::info!(port = %name, "connecting MIDI output");
        let conn = midi_out
            .connect(&port, "launchpad-performer-out")
            .map_err(|e| anyhow!("couldn't connect to MIDI output {name:?}: {e}"))?;
        Ok(Self { conn })
    }

    fn send(&mut self, message: &[u8]) {
        if let Err(e) = self.conn.send(message) {
            tracing::warn!(error = %e, ?message, "MIDI send failed");
        }
    }
}

impl Feedback for MidiFeedback {
    fn set_cell_visual(&mut self, cell: CellId, visual: Visual) {
        for message in visual.messages(cell) {
            self.send(&message);
        }
    }

    fn send_sysex(&mut self, message: &[u8]) {
        self.send(message);
    }
}
