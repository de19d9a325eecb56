mod host;
mod launchpad;
mod message;
mod performer;
#[cfg(test)]
mod testing;

use crate::host::osc_recv::OscRecv;
use crate::host::osc_send::OscSend;
use crate::host::state::OscHost;
use crate::launchpad::feedback::MidiFeedback;
use crate::launchpad::geometry::GeometryMap;
use crate::message::ControlMessage;
use crate::performer::Performer;
use anyhow::Context;
use clap::Parser;
use std::net::SocketAddr;
use std::sync::atomic::AtomicBool;
use std::sync::mpsc::channel;
use std::sync::Arc;
use std::thread;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Part of the Launchpad's MIDI port name
    #[clap(short, long, default_value = "LPX MIDI")]
    pub midi_port: String,

    /// Where host commands are sent
    #[clap(long, value_parser, default_value = "127.0.0.1:9000")]
    pub host_addr: SocketAddr,

    /// Where host state is received
    #[clap(short, long, value_parser, default_value = "127.0.0.1:8000")]
    pub listen_addr: SocketAddr,
}

fn main() -> anyhow::Result<()> {
    // install tracing
    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with(fmt::Layer::new().pretty().with_writer(std::io::stdout));
    tracing::subscriber::set_global_default(subscriber)
        .context("unable to set a global collector")?;

    // run clap
    let args: Args = Args::parse();

    let geometry = GeometryMap::launchpad_x().context("invalid surface layout")?;

    let (tx_host, rx_host) = channel();
    let (tx_control, rx_control) = channel();
    let (tx_device, rx_device) = channel();

    let recv = OscRecv::bind(tx_host, args.listen_addr)?;
    thread::spawn(move || recv.run());

    let send = OscSend::new(rx_control, SocketAddr::from(([0, 0, 0, 0], 0)), args.host_addr)?;
    thread::spawn(move || send.run());

    tx_control.send(ControlMessage::Refresh)?;

    let _input = launchpad::input::connect(&args.midi_port, tx_device)?;
    let feedback = MidiFeedback::connect(&args.midi_port)?;

    let shutdown = Arc::new(AtomicBool::new(false));
    for signal in signal_hook::consts::TERM_SIGNALS {
        signal_hook::flag::register(*signal, Arc::clone(&shutdown))
            .context("couldn't register shutdown signal")?;
    }

    tracing::info!(host = %args.host_addr, listen = %args.listen_addr, "performing");
    let mut performer = Performer::new(geometry, OscHost::new(tx_control), feedback);
    performer.run(rx_host, rx_device, &shutdown);

    Ok(())
}
