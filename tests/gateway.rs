//! Gateway scenario: a CAN bus bridged to a RealDash dashboard over a serial
//! link, with filtering and buffering on the bus side.
mod helpers;

use canny::error::Error;
use canny::infra::filter::{FilterMode, FrameIDFilter};
use canny::infra::frame::{Frame, CAN20_CAPACITY};
use canny::protocol::connection::buffered::BufferedConnection;
use canny::protocol::connection::filtered::FilteredConnection;
use canny::protocol::connection::polling::read_async;
use canny::protocol::connection::Connection;
use canny::protocol::controller::{Bitrate, Controller, Mcp2515, Mcp2518};
use canny::protocol::j1939::{J1939Id, J1939Message, Name, BROADCAST_ADDRESS, NULL_ADDRESS};
use canny::protocol::realdash::RealDash;
use helpers::{MockController, MockSerial, MockTimer};
use tokio::time::{sleep, Duration};

/// Move every frame currently readable on `from` to `to`.
fn pump<A: Connection, B: Connection>(from: &mut A, to: &mut B) -> usize {
    let mut frame = Frame::with_capacity(64, 0);
    let mut moved = 0;
    while from.read(&mut frame).is_ok() {
        to.write(&frame).unwrap();
        moved += 1;
    }
    moved
}

#[test]
/// Only allowed identifiers reach the dashboard, in bus order.
fn test_bus_to_dashboard() {
    let (mut ecu, mut bus_side) = MockController::<Mcp2515>::create_pair(8);
    ecu.begin(Bitrate::Can20_500K);
    bus_side.begin(Bitrate::Can20_500K);

    let mut allowed = FrameIDFilter::new(FilterMode::Drop);
    allowed.allow(0x100);
    allowed.allow(0x200);
    let mut bus =
        BufferedConnection::new(bus_side, 4, 4, CAN20_CAPACITY).with_read_filter(allowed);

    let (device_serial, dash_serial) = MockSerial::create_pair();
    let mut link = RealDash::new(device_serial);
    let mut dashboard = RealDash::new(dash_serial);

    ecu.write(&Frame::can20(0x100, false, &[1; 8])).unwrap();
    ecu.write(&Frame::can20(0x150, false, &[2; 8])).unwrap();
    ecu.write(&Frame::can20(0x200, false, &[3; 8])).unwrap();

    assert_eq!(pump(&mut bus, &mut link), 2);

    let mut frame = Frame::new();
    dashboard.read(&mut frame).unwrap();
    assert_eq!((frame.id(), frame.data()[0]), (0x100, 1));
    assert!(frame.ext());
    dashboard.read(&mut frame).unwrap();
    assert_eq!((frame.id(), frame.data()[0]), (0x200, 3));
    assert_eq!(dashboard.read(&mut frame), Err(Error::Fifo));
}

#[test]
/// Dashboard commands are parked while the bus is congested and flushed
/// in order once it drains.
fn test_dashboard_to_bus_with_backpressure() {
    let (mut ecu, mut bus_side) = MockController::<Mcp2518>::create_pair(1);
    ecu.begin(Bitrate::CanFd_500K_2M);
    bus_side.begin(Bitrate::CanFd_500K_2M);
    let mut bus = BufferedConnection::new(bus_side, 2, 4, 64);

    let (device_serial, dash_serial) = MockSerial::create_pair();
    let mut link = RealDash::new(device_serial);
    let mut dashboard = RealDash::new(dash_serial);

    for id in 1..=3u32 {
        dashboard.write(&Frame::can20(0x700 + id, true, &[id as u8; 8])).unwrap();
    }
    assert_eq!(pump(&mut link, &mut bus), 3);
    assert_eq!(bus.write_buffered(), 2);

    let mut frame = Frame::with_capacity(64, 0);
    let mut received = Vec::new();
    while received.len() < 3 {
        if ecu.read(&mut frame).is_ok() {
            received.push(frame.id());
        }
        let _ = bus.flush();
    }
    assert_eq!(received, [0x701, 0x702, 0x703]);
    assert_eq!(bus.write_buffered(), 0);
}

#[test]
/// Corrupted bytes on the serial link cost one message, not the stream.
fn test_dashboard_link_recovers_from_noise() {
    let (device_serial, dash_serial) = MockSerial::create_pair();
    let mut dashboard = RealDash::new(dash_serial);
    let mut link = RealDash::new(device_serial.clone());

    dashboard.write(&Frame::can20(0x10, true, &[1; 8])).unwrap();
    device_serial.inject(&[0x66, 0x33, 0x00, 0xFF]);
    dashboard.write(&Frame::can20(0x20, true, &[2; 8])).unwrap();

    let mut frame = Frame::new();
    link.read(&mut frame).unwrap();
    assert_eq!(frame.id(), 0x10);
    link.read(&mut frame).unwrap();
    assert_eq!(frame.id(), 0x20);
}

fn is_address_claim(frame: &Frame<'_>) -> bool {
    frame.ext() && J1939Id(frame.id()).pgn() == 0xEE00
}

#[test]
/// J1939 address claims picked out of bus traffic by PGN.
fn test_j1939_claims_through_filter() {
    let (mut node, mut bus_side) = MockController::<Mcp2515>::create_pair(8);
    node.begin(Bitrate::Can20_250K);
    bus_side.begin(Bitrate::Can20_250K);
    let mut monitor = FilteredConnection::new(bus_side).with_read_filter(is_address_claim);

    let name = Name::builder()
        .identity_number(0x0_BEEF)
        .manufacturer_code(0x123)
        .function(0x81)
        .industry_group(0)
        .arbitrary_address_capable(true)
        .build();
    let mut claim = J1939Message::new(0xEE00, 0x80, BROADCAST_ADDRESS, 6);
    claim.set_name(name);

    node.write(J1939Message::new(0xFEF1, 0x80, 0, 6).frame()).unwrap();
    node.write(claim.frame()).unwrap();

    let mut message = J1939Message::empty();
    assert_eq!(monitor.read(message.frame_mut()), Err(Error::Fifo));
    assert_eq!(monitor.read(message.frame_mut()), Ok(()));
    assert!(message.valid());
    assert!(message.broadcast());
    assert_eq!(message.source_address(), 0x80);
    assert_eq!(message.name(), Some(name));
    assert_ne!(message.source_address(), NULL_ADDRESS);
}

#[tokio::test]
/// The async adapter waits for a frame produced later on the bus.
async fn test_async_read_waits_for_bus() {
    let (mut ecu, mut host) = MockController::<Mcp2518>::create_pair(4);
    ecu.begin(Bitrate::CanFd_500K_2M);
    host.begin(Bitrate::CanFd_500K_2M);

    let producer = async {
        sleep(Duration::from_millis(20)).await;
        ecu.write(&Frame::canfd(0x123, true, &[1; 16])).unwrap();
    };
    let mut frame = Frame::with_capacity(64, 0);
    let mut timer = MockTimer;
    let consumer = read_async(&mut host, &mut frame, &mut timer, 5, sleep(Duration::from_secs(2)));

    let ((), outcome) = tokio::join!(producer, consumer);
    assert_eq!(outcome, Ok(()));
    assert_eq!(frame.id(), 0x123);
    assert_eq!(frame.size(), 16);
}
