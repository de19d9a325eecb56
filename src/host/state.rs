use crate::host::{BlockStatus, ClipStore, PerformanceMode, TrackStatus, Transport, TriggerFlags};
use crate::launchpad::geometry::{GRID_COLS, GRID_ROWS};
use crate::message::{ControlMessage, HostMessage};
use std::sync::mpsc::Sender;

/// Last known host state, as mirrored from `HostMessage`s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostState {
    performance: bool,
    playing: bool,
    blocks: [[BlockStatus; GRID_COLS as usize]; GRID_ROWS as usize],
    tracks: [TrackStatus; GRID_ROWS as usize],
}

impl Default for HostState {
    fn default() -> Self {
        Self {
            performance: false,
            playing: false,
            blocks: [[BlockStatus::Empty; GRID_COLS as usize]; GRID_ROWS as usize],
            tracks: [TrackStatus::Empty; GRID_ROWS as usize],
        }
    }
}

impl HostState {
    pub fn apply(&mut self, msg: HostMessage) {
        match msg {
            HostMessage::Performance(active) => self.performance = active,
            HostMessage::Playing(playing) => self.playing = playing,
            HostMessage::Block { row, col, status } => {
                match self
                    .blocks
                    .get_mut(row as usize)
                    .and_then(|r| r.get_mut(col as usize))
                {
                    Some(block) => *block = status.into(),
                    None => tracing::debug!(row, col, "block outside the grid"),
                }
            }
            HostMessage::Track { row, status } => match self.tracks.get_mut(row as usize) {
                Some(track) => *track = status.into(),
                None => tracing::debug!(row, "track outside the grid"),
            },
        }
    }
}

/// The host as seen through OSC: queries answer from the mirrored state,
/// commands go out as `ControlMessage`s without waiting for a reply.
pub struct OscHost {
    state: HostState,
    tx: Sender<ControlMessage>,
}

impl OscHost {
    pub fn new(tx: Sender<ControlMessage>) -> Self {
        Self {
            state: HostState::default(),
            tx,
        }
    }

    pub fn apply(&mut self, msg: HostMessage) {
        self.state.apply(msg);
    }

    fn send(&self, msg: ControlMessage) {
        if self.tx.send(msg).is_err() {
            tracing::warn!(?msg, "OSC sender gone, dropping command");
        }
    }
}

impl ClipStore for OscHost {
    fn block_status(&self, row: u8, col: u8) -> BlockStatus {
        self.state.blocks[row as usize][col as usize]
    }

    fn row_status(&self, row: u8) -> TrackStatus {
        self.state.tracks[row as usize]
    }

    fn trigger_clip(&mut self, row: u8, col: u8, flags: TriggerFlags) {
        self.send(ControlMessage::TriggerClip { row, col, flags });
    }

    fn trigger_row_stop(&mut self, row: u8, flags: TriggerFlags) {
        self.send(ControlMessage::StopRow { row, flags });
    }
}

impl Transport for OscHost {
    fn is_playing(&self) -> bool {
        self.state.playing
    }

    // The host echoes the new transport state; until then assume it obeyed so
    // a second press inside that window toggles back.
    fn start(&mut self) {
        self.state.playing = true;
        self.send(ControlMessage::Start);
    }

    fn stop(&mut self) {
        self.state.playing = false;
        self.send(ControlMessage::Stop);
    }
}

impl PerformanceMode for OscHost {
    fn is_active(&self) -> bool {
        self.state.performance
    }
}
