pub mod osc_recv;
pub mod osc_send;
pub mod state;

/// Simple status of one live block, as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockStatus {
    Empty,
    Filled,
    Playing,
    Scheduled,
    Unknown(i32),
}

impl From<i32> for BlockStatus {
    fn from(code: i32) -> Self {
        match code {
            0 => BlockStatus::Empty,
            1 => BlockStatus::Filled,
            2 => BlockStatus::Playing,
            3 => BlockStatus::Scheduled,
            other => BlockStatus::Unknown(other),
        }
    }
}

/// Simple status of a whole track.
///
/// The host reuses the block status codes here, but 1 and 2 appear to be the
/// other way round: 1 is taken as "any playing", 2 as "none playing".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackStatus {
    Empty,
    AnyPlaying,
    NonePlaying,
    NoneScheduled,
    Unknown(i32),
}

impl From<i32> for TrackStatus {
    fn from(code: i32) -> Self {
        match code {
            0 => TrackStatus::Empty,
            1 => TrackStatus::AnyPlaying,
            2 => TrackStatus::NonePlaying,
            3 => TrackStatus::NoneScheduled,
            other => TrackStatus::Unknown(other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TriggerFlags {
    pub mute_others: bool,
    pub fill: bool,
}

impl TriggerFlags {
    /// Launching a clip silences the rest of its row.
    pub const CLIP: TriggerFlags = TriggerFlags {
        mute_others: true,
        fill: true,
    };
    pub const ROW_STOP: TriggerFlags = TriggerFlags {
        mute_others: false,
        fill: true,
    };

    pub fn bits(self) -> i32 {
        (self.mute_others as i32) | ((self.fill as i32) << 1)
    }
}

/// Clip launcher state and commands. Rows are tracks, columns are blocks,
/// both 0-based.
pub trait ClipStore {
    fn block_status(&self, row: u8, col: u8) -> BlockStatus;

    fn row_status(&self, row: u8) -> TrackStatus;

    fn trigger_clip(&mut self, row: u8, col: u8, flags: TriggerFlags);

    fn trigger_row_stop(&mut self, row: u8, flags: TriggerFlags);
}

pub trait Transport {
    fn is_playing(&self) -> bool;

    fn start(&mut self);

    fn stop(&mut self);
}

pub trait PerformanceMode {
    fn is_active(&self) -> bool;
}
