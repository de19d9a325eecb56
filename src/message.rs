use crate::host::TriggerFlags;

/// State reported by the host. Rows are 0-based grid rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostMessage {
    Performance(bool),
    Playing(bool),
    Block { row: u8, col: u8, status: i32 },
    Track { row: u8, status: i32 },
}

/// Commands for the host. Rows are 0-based grid rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlMessage {
    Refresh,
    TriggerClip { row: u8, col: u8, flags: TriggerFlags },
    StopRow { row: u8, flags: TriggerFlags },
    Start,
    Stop,
}
