//! # RealDash bridge
//!
//! Simulated gateway between a CAN bus and a RealDash dashboard:
//! - Bus traffic flows through a channel connection
//! - Frames are forwarded to the dashboard as `0x66` messages
//! - A stalled partial message is discarded by the watchdog
//!
//! ```bash
//! cargo run --example realdash_bridge
//! ```

use std::collections::VecDeque;

use canny::error::Result;
use canny::infra::frame::Frame;
use canny::protocol::connection::channel::{ChannelConnection, FrameChannel};
use canny::protocol::connection::Connection;
use canny::protocol::realdash::{RealDash, SerialStream, StallWatchdog};
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::{Duration, Instant};

/// Serial port backed by two byte queues.
#[derive(Default)]
struct Port {
    rx: VecDeque<u8>,
    tx: Vec<u8>,
}

impl SerialStream for Port {
    fn available(&self) -> usize {
        self.rx.len()
    }

    fn read_byte(&mut self) -> Option<u8> {
        self.rx.pop_front()
    }

    fn write(&mut self, bytes: &[u8]) -> Result {
        self.tx.extend_from_slice(bytes);
        Ok(())
    }

    fn flush(&mut self) -> Result {
        Ok(())
    }
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02X}", b)).collect::<Vec<_>>().join(" ")
}

fn main() {
    println!("=== canny RealDash bridge ===\n");

    let to_gateway: FrameChannel<NoopRawMutex, 8> = Channel::new();
    let to_bus: FrameChannel<NoopRawMutex, 8> = Channel::new();
    let mut bus = ChannelConnection::new(&to_bus, &to_gateway);
    let mut gateway_bus = ChannelConnection::new(&to_gateway, &to_bus);
    let mut dashboard = RealDash::new(Port::default());

    // ======================================================================
    // 1. Bus → dashboard
    // ======================================================================
    println!("1. Forwarding bus traffic");
    bus.write(&Frame::can20(0x3E8, false, &[0x10, 0x27])).unwrap();
    bus.write(&Frame::canfd(0x18FE_F100, true, &[0x11; 12])).unwrap();

    let mut frame = Frame::with_capacity(64, 0);
    while gateway_bus.read(&mut frame).is_ok() {
        dashboard.write(&frame).unwrap();
        println!("   {} -> {} bytes on the wire", frame, dashboard.stream().tx.len());
    }
    println!("   wire: {}\n", hex(&dashboard.stream().tx));

    // ======================================================================
    // 2. Dashboard → bus, with a stalled message in between
    // ======================================================================
    println!("2. Receiving from the dashboard");
    let echoed = std::mem::take(&mut dashboard.stream_mut().tx);
    let (first, rest) = echoed.split_at(10);
    dashboard.stream_mut().rx.extend(first.iter().copied());

    let mut watchdog = StallWatchdog::default();
    let mut now = Instant::from_millis(0);
    for _ in 0..3 {
        let before = dashboard.stream().available();
        let outcome = dashboard.read(&mut frame);
        let progressed = dashboard.stream().available() != before;
        println!("   t={} ms read: {:?}", now.as_millis(), outcome);
        if watchdog.check(now, progressed, dashboard.in_progress()) {
            println!("   stalled, discarding partial message");
            dashboard.reset();
        }
        now += Duration::from_secs(3);
    }

    // The rest of the first message is now garbage; the second one decodes.
    dashboard.stream_mut().rx.extend(rest.iter().copied());
    while dashboard.read(&mut frame).is_ok() {
        gateway_bus.write(&frame).unwrap();
    }
    while bus.read(&mut frame).is_ok() {
        println!("   bus received {}", frame);
    }
}
