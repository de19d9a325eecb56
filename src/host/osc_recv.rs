use crate::launchpad::geometry::{GRID_COLS, GRID_ROWS};
use crate::message::HostMessage;
use anyhow::{Context, Result};
use rosc::OscPacket::{Bundle, Message};
use rosc::{OscBundle, OscMessage, OscPacket, OscType};
use std::net::{SocketAddr, UdpSocket};
use std::sync::mpsc::Sender;

/// Receives host state over OSC and forwards it as `HostMessage`s.
#[derive(Debug)]
pub(crate) struct OscRecv {
    tx: Sender<HostMessage>,
    sock: UdpSocket,
}

impl OscRecv {
    pub(crate) fn bind(tx: Sender<HostMessage>, bind_addr: SocketAddr) -> Result<Self> {
        let sock = UdpSocket::bind(bind_addr)
            .with_context(|| format!("couldn't bind OSC listener to {bind_addr}"))?;
        Ok(Self { tx, sock })
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn run(self) {
        let mut buf = [0u8; 8192];

        loop {
            match self.sock.recv_from(&mut buf) {
                Ok((size, _addr)) => match rosc::decoder::decode_udp(&buf[..size]) {
                    Ok((_, packet)) => {
                        if !self.handle_packet(packet) {
                            tracing::info!("performer gone, stopping OSC listener");
                            break;
                        }
                    }
                    Err(e) => tracing::warn!(error = ?e, "undecodable OSC packet"),
                },
                Err(e) => {
                    tracing::error!(error = %e, "error receiving from socket");
                    break;
                }
            }
        }
    }

    /// Returns false once nobody is listening on the other end.
    fn handle_packet(&self, packet: OscPacket) -> bool {
        match packet {
            Bundle(bundle) => self.handle_bundle(bundle),
            Message(msg) => self.handle_message(msg),
        }
    }

    fn handle_bundle(&self, bundle: OscBundle) -> bool {
        bundle
            .content
            .into_iter()
            .all(|packet| self.handle_packet(packet))
    }

    fn handle_message(&self, msg: OscMessage) -> bool {
        match parse_message(&msg) {
            Some(host_msg) => self.tx.send(host_msg).is_ok(),
            None => {
                tracing::trace!(addr = %msg.addr, args = ?msg.args, "ignoring OSC message");
                true
            }
        }
    }
}

/// Maps one OSC message onto host state. Tracks are 1-based on the wire.
pub(crate) fn parse_message(msg: &OscMessage) -> Option<HostMessage> {
    let arg = msg.args.first()?;
    let parts: Vec<_> = msg.addr.split('/').skip(1).collect();
    match parts.as_slice() {
        ["performance"] => arg_to_bool(arg).map(HostMessage::Performance),
        ["transport", "playing"] => arg_to_bool(arg).map(HostMessage::Playing),
        ["track", track, "status"] => Some(HostMessage::Track {
            row: parse_track(track)?,
            status: arg_to_int(arg)?,
        }),
        ["track", track, "block", block, "status"] => Some(HostMessage::Block {
            row: parse_track(track)?,
            col: parse_block(block)?,
            status: arg_to_int(arg)?,
        }),
        _ => None,
    }
}

fn parse_track(part: &str) -> Option<u8> {
    let track: u8 = part.parse().ok()?;
    let row = track.checked_sub(1)?;
    (row < GRID_ROWS).then_some(row)
}

fn parse_block(part: &str) -> Option<u8> {
    let block: u8 = part.parse().ok()?;
    (block < GRID_COLS).then_some(block)
}

fn arg_to_int(arg: &OscType) -> Option<i32> {
    match arg {
        OscType::Int(i) => Some(*i),
        OscType::Long(l) => i32::try_from(*l).ok(),
        _ => None,
    }
}

fn arg_to_bool(arg: &OscType) -> Option<bool> {
    match arg {
        OscType::Int(i) => Some(*i != 0),
        OscType::Bool(b) => Some(*b),
        _ => None,
    }
}
