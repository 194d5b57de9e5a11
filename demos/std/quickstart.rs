//! # Quickstart Example
//!
//! Minimal tour of canny:
//! - Build CAN 2.0 and CAN FD frames
//! - Filter frames by identifier
//! - Buffer writes over a busy connection
//!
//! ```bash
//! cargo run --example quickstart
//! ```

use canny::error::Error;
use canny::infra::filter::{FilterMode, FrameIDFilter};
use canny::infra::frame::Frame;
use canny::protocol::connection::buffered::{BufferedConnection, ErrorHooks};
use canny::protocol::connection::filtered::FilteredConnection;
use canny::protocol::connection::{Connection, Loopback};
use canny::protocol::controller::{Bitrate, BitrateSupport, Mcp2515, Same51};

/// Prints every frame the buffered connection had to give up on.
struct PrintHooks;

impl ErrorHooks for PrintHooks {
    fn on_read_error(&mut self, error: Error) {
        println!("   read error: {}", error);
    }

    fn on_write_error(&mut self, error: Error, frame: &Frame<'_>) {
        println!("   dropped {} ({})", frame, error);
    }
}

fn main() {
    println!("=== canny Quickstart ===\n");

    // ======================================================================
    // 1. Frames
    // ======================================================================
    println!("1. Building frames");
    let mut frame = Frame::can20(0x7DF, false, &[0x02, 0x01, 0x0C]);
    println!("   CAN 2.0: {} (capacity {})", frame, frame.capacity());
    frame.resize(8, 0x55);
    println!("   padded:  {}", frame);

    let fd = Frame::canfd(0x18DA_F110, true, &[0xAB; 12]);
    println!("   CAN FD:  {}\n", fd);

    // ======================================================================
    // 2. Bitrate negotiation
    // ======================================================================
    println!("2. Negotiating CAN FD 500K/8M");
    let requested = Bitrate::CanFd_500K_8M;
    println!("   MCP2515 runs {:?}", Mcp2515::nearest_supported(requested));
    println!("   SAME51  runs {:?}\n", Same51::nearest_supported(requested));

    // ======================================================================
    // 3. Filtering
    // ======================================================================
    println!("3. Dropping 0x7DF on read");
    let mut ids = FrameIDFilter::new(FilterMode::Allow);
    ids.drop(0x7DF);
    let mut filtered = FilteredConnection::new(Loopback::new(4)).with_read_filter(ids);
    filtered.write(&frame).unwrap();
    filtered.write(&fd).unwrap();

    let mut received = Frame::with_capacity(64, 0);
    for _ in 0..2 {
        match filtered.read(&mut received) {
            Ok(()) => println!("   received {}", received),
            Err(err) => println!("   nothing: {}", err),
        }
    }
    println!();

    // ======================================================================
    // 4. Buffering
    // ======================================================================
    println!("4. Writing 4 frames through a loopback holding 1");
    let mut buffered = BufferedConnection::new(Loopback::new(1), 2, 2, 8).with_hooks(PrintHooks);
    for id in 0..4u32 {
        let outcome = buffered.write(&Frame::can20(0x100 + id, false, &[id as u8]));
        println!("   write 0x{:X}: {:?}", 0x100 + id, outcome);
    }
    loop {
        // Parked frames go out as soon as the loopback has room.
        let _ = buffered.flush();
        match buffered.read(&mut received) {
            Ok(()) => println!("   read {}", received),
            Err(_) => break,
        }
    }
}
