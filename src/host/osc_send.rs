use crate::message::ControlMessage;
use anyhow::{Context, Result};
use rosc::{encoder, OscMessage, OscPacket, OscType};
use std::net::{SocketAddr, UdpSocket};
use std::sync::mpsc::Receiver;

pub struct OscSend {
    rx: Receiver<ControlMessage>,
    sock: UdpSocket,
    to_addr: SocketAddr,
}

impl OscSend {
    pub(crate) fn new(
        rx: Receiver<ControlMessage>,
        bind_addr: SocketAddr,
        to_addr: SocketAddr,
    ) -> Result<Self> {
        let sock = UdpSocket::bind(bind_addr)
            .with_context(|| format!("couldn't bind OSC sender to {bind_addr}"))?;
        Ok(Self { rx, sock, to_addr })
    }

    fn send_message(&self, msg: OscMessage) {
        let buf = match encoder::encode(&OscPacket::Message(msg)) {
            Ok(buf) => buf,
            Err(e) => {
                tracing::warn!(error = ?e, "couldn't encode OSC message");
                return;
            }
        };
        if let Err(e) = self.sock.send_to(&buf, self.to_addr) {
            tracing::warn!(error = %e, to = %self.to_addr, "OSC send failed");
        }
    }

    pub(crate) fn run(self) {
        for msg in self.rx.iter() {
            tracing::debug!(?msg, "sending to host");
            self.send_message(to_osc(msg));
        }
        tracing::info!("control channel closed, stopping OSC sender");
    }
}

/// Wire form of a command. Tracks are 1-based on the wire, blocks 0-based.
pub(crate) fn to_osc(msg: ControlMessage) -> OscMessage {
    let (addr, args) = match msg {
        ControlMessage::Refresh => ("/refresh".to_string(), vec![]),
        ControlMessage::TriggerClip { row, col, flags } => (
            format!("/track/{}/block/{col}/trigger", row + 1),
            vec![OscType::Int(flags.bits())],
        ),
        ControlMessage::StopRow { row, flags } => (
            format!("/track/{}/stop", row + 1),
            vec![OscType::Int(flags.bits())],
        ),
        ControlMessage::Start => ("/transport/start".to_string(), vec![]),
        ControlMessage::Stop => ("/transport/stop".to_string(), vec![]),
    };
    OscMessage { addr, args }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::TriggerFlags;
    use std::sync::mpsc::channel;

    #[test]
    fn clip_trigger_address() {
        let msg = to_osc(ControlMessage::TriggerClip {
            row: 0,
            col: 5,
            flags: TriggerFlags::CLIP,
        });
        assert_eq!(msg.addr, "/track/1/block/5/trigger");
        assert_eq!(msg.args, vec![OscType::Int(3)]);
    }

    #[test]
    fn row_stop_address() {
        let msg = to_osc(ControlMessage::StopRow {
            row: 5,
            flags: TriggerFlags::ROW_STOP,
        });
        assert_eq!(msg.addr, "/track/6/stop");
        assert_eq!(msg.args, vec![OscType::Int(2)]);
    }

    #[test]
    fn transport_and_refresh_have_no_args() {
        for (control, addr) in [
            (ControlMessage::Refresh, "/refresh"),
            (ControlMessage::Start, "/transport/start"),
            (ControlMessage::Stop, "/transport/stop"),
        ] {
            let msg = to_osc(control);
            assert_eq!(msg.addr, addr);
            assert!(msg.args.is_empty());
        }
    }

    #[test]
    fn delivers_over_udp() {
        let host = UdpSocket::bind("127.0.0.1:0").unwrap();
        host.set_read_timeout(Some(std::time::Duration::from_secs(5)))
            .unwrap();
        let (tx, rx) = channel();
        let send = OscSend::new(
            rx,
            "127.0.0.1:0".parse().unwrap(),
            host.local_addr().unwrap(),
        )
        .unwrap();

        tx.send(ControlMessage::Start).unwrap();
        drop(tx);
        send.run();

        let mut buf = [0u8; 1024];
        let (size, _) = host.recv_from(&mut buf).unwrap();
        let (_, packet) = rosc::decoder::decode_udp(&buf[..size]).unwrap();
        match packet {
            OscPacket::Message(msg) => assert_eq!(msg.addr, "/transport/start"),
            other => panic!("unexpected packet {other:?}"),
        }
    }
}
