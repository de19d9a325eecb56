pub mod dispatch;
pub mod render;

use crate::host::state::OscHost;
use crate::host::{ClipStore, PerformanceMode, Transport};
use crate::launchpad::feedback::{self, Feedback};
use crate::launchpad::geometry::GeometryMap;
use crate::launchpad::input::{classify, Input, RawEvent};
use crate::message::HostMessage;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Duration;

const TICK: Duration = Duration::from_millis(10);

/// Ties the surface to the host. Holds no state of its own between calls;
/// everything it paints comes from the host on each tick.
pub struct Performer<H, F> {
    geometry: GeometryMap,
    host: H,
    feedback: F,
}

impl<H, F> Performer<H, F>
where
    H: ClipStore + Transport + PerformanceMode,
    F: Feedback,
{
    pub fn new(geometry: GeometryMap, host: H, feedback: F) -> Self {
        Self {
            geometry,
            host,
            feedback,
        }
    }

    /// Handles one device event. The event is consumed whatever it was.
    pub fn on_input(&mut self, event: &RawEvent) -> Input {
        let input = classify(&self.geometry, event);
        if input == Input::Unrecognized {
            tracing::trace!(?event, "ignoring input");
        }
        dispatch::dispatch(&self.geometry, input, &mut self.host, &mut self.feedback);
        input
    }

    pub fn on_tick(&mut self) {
        render::render(&self.geometry, &self.host, &mut self.feedback);
    }
}

impl<F: Feedback> Performer<OscHost, F> {
    /// Runs until `shutdown` is raised or one of the channels closes, then
    /// hands the device back.
    pub fn run(
        &mut self,
        host_rx: Receiver<HostMessage>,
        device_rx: Receiver<RawEvent>,
        shutdown: &AtomicBool,
    ) {
        feedback::startup(&mut self.feedback, &self.geometry);

        while !shutdown.load(Ordering::Relaxed) {
            if !self.drain_host(&host_rx) || !self.drain_device(&device_rx) {
                break;
            }
            self.on_tick();
            std::thread::sleep(TICK);
        }

        tracing::info!("shutting down");
        feedback::shutdown(&mut self.feedback, &self.geometry);
    }

    fn drain_host(&mut self, rx: &Receiver<HostMessage>) -> bool {
        loop {
            match rx.try_recv() {
                Ok(msg) => self.host.apply(msg),
                Err(TryRecvError::Empty) => return true,
                Err(TryRecvError::Disconnected) => {
                    tracing::error!("host channel closed");
                    return false;
                }
            }
        }
    }

    fn drain_device(&mut self, rx: &Receiver<RawEvent>) -> bool {
        loop {
            match rx.try_recv() {
                Ok(event) => {
                    self.on_input(&event);
                }
                Err(TryRecvError::Empty) => return true,
                Err(TryRecvError::Disconnected) => {
                    tracing::error!("device input closed");
                    return false;
                }
            }
        }
    }
}
