//! In-memory stand-ins for the host and the device.

use crate::host::{BlockStatus, ClipStore, PerformanceMode, TrackStatus, Transport, TriggerFlags};
use crate::launchpad::feedback::{Feedback, Visual};
use crate::launchpad::geometry::CellId;
use crate::message::ControlMessage;
use std::cell::RefCell;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    Performance,
    Playing,
    Block(u8, u8),
    Row(u8),
}

/// Host that answers from plain fields and records every query and command.
#[derive(Debug, Default)]
pub struct FakeHost {
    pub performance: bool,
    pub playing: bool,
    pub blocks: HashMap<(u8, u8), BlockStatus>,
    pub rows: HashMap<u8, TrackStatus>,
    pub queries: RefCell<Vec<Query>>,
    pub commands: Vec<ControlMessage>,
}

impl FakeHost {
    pub fn performing(playing: bool) -> Self {
        Self {
            performance: true,
            playing,
            ..Self::default()
        }
    }

    fn record(&self, query: Query) {
        self.queries.borrow_mut().push(query);
    }

    pub fn grid_queries(&self) -> usize {
        self.queries
            .borrow()
            .iter()
            .filter(|q| matches!(q, Query::Block(..) | Query::Row(_)))
            .count()
    }
}

impl ClipStore for FakeHost {
    fn block_status(&self, row: u8, col: u8) -> BlockStatus {
        self.record(Query::Block(row, col));
        self.blocks
            .get(&(row, col))
            .copied()
            .unwrap_or(BlockStatus::Empty)
    }

    fn row_status(&self, row: u8) -> TrackStatus {
        self.record(Query::Row(row));
        self.rows.get(&row).copied().unwrap_or(TrackStatus::Empty)
    }

    fn trigger_clip(&mut self, row: u8, col: u8, flags: TriggerFlags) {
        self.commands
            .push(ControlMessage::TriggerClip { row, col, flags });
    }

    fn trigger_row_stop(&mut self, row: u8, flags: TriggerFlags) {
        self.commands.push(ControlMessage::StopRow { row, flags });
    }
}

impl Transport for FakeHost {
    fn is_playing(&self) -> bool {
        self.record(Query::Playing);
        self.playing
    }

    fn start(&mut self) {
        self.playing = true;
        self.commands.push(ControlMessage::Start);
    }

    fn stop(&mut self) {
        self.playing = false;
        self.commands.push(ControlMessage::Stop);
    }
}

impl PerformanceMode for FakeHost {
    fn is_active(&self) -> bool {
        self.record(Query::Performance);
        self.performance
    }
}

#[derive(Debug, Default)]
pub struct RecordingFeedback {
    pub writes: Vec<(CellId, Visual)>,
    pub sysex: Vec<Vec<u8>>,
}

impl RecordingFeedback {
    /// Latest visual written to `cell`.
    pub fn visual_of(&self, cell: CellId) -> Option<Visual> {
        self.writes
            .iter()
            .rev()
            .find(|(id, _)| *id == cell)
            .map(|(_, visual)| *visual)
    }
}

impl Feedback for RecordingFeedback {
    fn set_cell_visual(&mut self, cell: CellId, visual: Visual) {
        self.writes.push((cell, visual));
    }

    fn send_sysex(&mut self, message: &[u8]) {
        self.sysex.push(message.to_vec());
    }
}
