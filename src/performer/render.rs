use crate::host::{BlockStatus, ClipStore, PerformanceMode, TrackStatus, Transport};
use crate::launchpad::feedback::{Color, Feedback, Visual};
use crate::launchpad::geometry::{GeometryMap, GRID_COLS, GRID_ROWS};

/// Repaints the surface from the host's current state.
///
/// Every call starts from scratch, so two calls against the same host state
/// write the same visuals. Outside performance mode only the status indicator
/// is touched and the grid keeps whatever it showed last.
pub fn render<H, F>(geometry: &GeometryMap, host: &H, feedback: &mut F)
where
    H: ClipStore + Transport + PerformanceMode,
    F: Feedback,
{
    let status = geometry.status_indicator_id();
    if !host.is_active() {
        feedback.set_cell_visual(status, Visual::Pulse(Color::IDLE));
        return;
    }

    let playing = host.is_playing();
    let indicator = if playing {
        Visual::Flash(Color::RED, Color::BLACK)
    } else {
        Visual::Pulse(Color::IDLE)
    };
    feedback.set_cell_visual(status, indicator);

    for row in 0..GRID_ROWS {
        for col in 0..GRID_COLS {
            let block = host.block_status(row, col);
            if let BlockStatus::Unknown(code) = block {
                tracing::trace!(row, col, code, "unknown block status");
            }
            feedback.set_cell_visual(geometry.cell_at(row, col), block_visual(block));
        }
    }

    for row in 0..GRID_ROWS {
        // a stopped transport outranks whatever the track reports
        let visual = if playing {
            let track = host.row_status(row);
            if let TrackStatus::Unknown(code) = track {
                tracing::trace!(row, code, "unknown track status");
            }
            row_visual(track)
        } else {
            Visual::Solid(Color::DARK_RED)
        };
        feedback.set_cell_visual(geometry.row_stop_at(row), visual);
    }
}

pub fn block_visual(status: BlockStatus) -> Visual {
    match status {
        BlockStatus::Empty => Visual::Solid(Color::BLACK),
        BlockStatus::Filled => Visual::Solid(Color::GREEN),
        BlockStatus::Playing => Visual::Flash(Color::RED, Color::BLACK),
        BlockStatus::Scheduled => Visual::Pulse(Color::RED),
        BlockStatus::Unknown(_) => Visual::Solid(Color::IDLE),
    }
}

/// Row stop visual while the transport is running.
pub fn row_visual(status: TrackStatus) -> Visual {
    match status {
        TrackStatus::Empty => Visual::Solid(Color::BLACK),
        TrackStatus::NonePlaying => Visual::Solid(Color::DARK_RED),
        TrackStatus::AnyPlaying => Visual::Flash(Color::RED, Color::DARK_RED),
        TrackStatus::NoneScheduled => Visual::Pulse(Color::DARK_RED),
        TrackStatus::Unknown(_) => Visual::Solid(Color::IDLE),
    }
}
