use crate::host::{ClipStore, Transport, TriggerFlags};
use crate::launchpad::feedback::{Color, Feedback, Visual};
use crate::launchpad::geometry::GeometryMap;
use crate::launchpad::input::Input;

/// Issues the host command an input asks for. Nothing here waits for the host.
pub fn dispatch<H, F>(geometry: &GeometryMap, input: Input, host: &mut H, feedback: &mut F)
where
    H: ClipStore + Transport,
    F: Feedback,
{
    match input {
        Input::RowStop(row) => {
            tracing::debug!(row, "stopping row");
            host.trigger_row_stop(row, TriggerFlags::ROW_STOP);
        }
        Input::ClipTrigger { row, col } => {
            tracing::debug!(row, col, "launching clip");
            host.trigger_clip(row, col, TriggerFlags::CLIP);
        }
        Input::ToggleTransport => toggle_transport(geometry, host, feedback),
        Input::Unrecognized => {}
    }
}

// Paints right away instead of waiting for the next tick. The toggle button
// gets the same visual since the render pass never touches it.
fn toggle_transport<H, F>(geometry: &GeometryMap, host: &mut H, feedback: &mut F)
where
    H: Transport,
    F: Feedback,
{
    let mut paint = |visual: Visual| {
        feedback.set_cell_visual(geometry.status_indicator_id(), visual);
        feedback.set_cell_visual(geometry.transport_toggle_id(), visual);
    };

    if host.is_playing() {
        tracing::info!("stopping transport");
        host.stop();
        paint(Visual::Solid(Color::IDLE));
    } else {
        tracing::info!("starting transport");
        paint(Visual::Flash(Color::GREEN, Color::BLACK));
        host.start();
    }
}
