pub mod feedback;
pub mod geometry;
pub mod input;

use anyhow::{Context, Result};
use midir::MidiIO;

/// First port whose name contains `filter`, along with that name.
pub(crate) fn find_port<T: MidiIO>(io: &T, filter: &str) -> Result<(T::Port, String)> {
    io.ports()
        .into_iter()
        .find_map(|port| {
            let name = io.port_name(&port).ok()?;
            name.contains(filter).then_some((port, name))
        })
        .with_context(|| format!("no MIDI port matching {filter:?}"))
}
