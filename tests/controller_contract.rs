//! Controller contract: bitrate negotiation, readiness and capacity checks
//! as seen by a driver built on the shared helpers.
mod helpers;

use canny::error::Error;
use canny::infra::frame::Frame;
use canny::protocol::connection::Connection;
use canny::protocol::controller::{Bitrate, Controller, Mcp2515, Mcp2518, Mode, Same51};
use helpers::MockController;

#[test]
/// `begin` settles on the nearest bitrate the controller class supports.
fn test_begin_negotiates_bitrate() {
    let (mut dut, _host) = MockController::<Same51>::create_pair(4);
    assert!(dut.begin(Bitrate::CanFd_500K_8M));
    assert_eq!(dut.bitrate(), Bitrate::CanFd_500K_4M);
    assert_eq!(dut.mode(), Mode::CanFdDualRate);

    assert!(dut.begin(Bitrate::Can20_125K));
    assert_eq!(dut.mode(), Mode::Can20);
}

#[test]
fn test_not_ready_before_begin() {
    let (mut dut, _host) = MockController::<Mcp2518>::create_pair(4);
    let mut frame = Frame::with_capacity(64, 0);
    assert_eq!(dut.read(&mut frame), Err(Error::NotReady));
    assert_eq!(dut.write(&frame), Err(Error::NotReady));
}

#[test]
/// Under-sized read frames and oversized payloads are rejected.
fn test_capacity_checks() {
    let (mut can20, mut peer) = MockController::<Mcp2515>::create_pair(4);
    can20.begin(Bitrate::CanFd_500K_2M);
    assert_eq!(can20.mode(), Mode::Can20);

    let mut empty = Frame::new();
    assert_eq!(can20.read(&mut empty), Err(Error::InvalidArgument));
    let fd_payload = Frame::canfd(0x10, true, &[0; 16]);
    assert_eq!(can20.write(&fd_payload), Err(Error::InvalidArgument));

    peer.begin(Bitrate::Can20_500K);
    let mut small = Frame::with_capacity(8, 0);
    assert_eq!(peer.read(&mut small), Err(Error::Fifo));
    assert_eq!(can20.write(&Frame::can20(0x10, false, &[1, 2])), Ok(()));
    assert_eq!(peer.read(&mut small), Ok(()));
    assert_eq!(small.data(), &[1, 2]);
}

#[test]
/// Controllers of mixed capabilities asked for the same FD rate end up on
/// the same arbitration rate.
fn test_mixed_capabilities_share_arbitration_rate() {
    let (mut classic, _) = MockController::<Mcp2515>::create_pair(1);
    let (mut integrated, _) = MockController::<Same51>::create_pair(1);
    let (mut external, _) = MockController::<Mcp2518>::create_pair(1);

    for bitrate in Bitrate::ALL {
        classic.begin(bitrate);
        integrated.begin(bitrate);
        external.begin(bitrate);
        let rate = bitrate.arbitration_rate();
        assert_eq!(classic.bitrate().arbitration_rate(), rate);
        assert_eq!(integrated.bitrate().arbitration_rate(), rate);
        assert_eq!(external.bitrate().arbitration_rate(), rate);
    }
}

#[test]
/// A full transmit queue reports `Fifo` until the peer reads.
fn test_transmit_backpressure() {
    let (mut dut, mut host) = MockController::<Mcp2518>::create_pair(1);
    dut.begin(Bitrate::CanFd_1000K_8M);
    host.begin(Bitrate::CanFd_1000K_8M);

    let frame = Frame::canfd(0x1ABC_DE00, true, &[7; 64]);
    assert_eq!(dut.write(&frame), Ok(()));
    assert_eq!(dut.write(&frame), Err(Error::Fifo));

    let mut received = Frame::with_capacity(64, 0);
    host.read(&mut received).unwrap();
    assert_eq!(received, frame);
    assert_eq!(dut.write(&frame), Ok(()));
}
