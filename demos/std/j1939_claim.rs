//! # J1939 address claim
//!
//! Builds a NAME, claims an address and decodes the identifiers of a few
//! messages seen on the bus.
//!
//! ```bash
//! cargo run --example j1939_claim
//! ```

use canny::infra::frame::Frame;
use canny::protocol::connection::{Connection, Loopback};
use canny::protocol::j1939::{J1939Id, J1939Message, Name, BROADCAST_ADDRESS, NULL_ADDRESS};

const PGN_ADDRESS_CLAIM: u32 = 0xEE00;
const PGN_REQUEST: u32 = 0xEA00;
const PGN_ENGINE_TEMPERATURE: u32 = 0xFEEE;

fn main() {
    println!("=== canny J1939 address claim ===\n");

    // ======================================================================
    // 1. Identity
    // ======================================================================
    let name = Name::builder()
        .identity_number(0x0_1234)
        .manufacturer_code(0x14A)
        .function(0x81)
        .vehicle_system(0x7F)
        .industry_group(0)
        .arbitrary_address_capable(true)
        .build();
    println!("1. {}", name);
    println!("   raw 0x{:016X}\n", name.raw());

    // ======================================================================
    // 2. Claim address 0x80, after asking who is on the bus
    // ======================================================================
    let mut bus = Loopback::new(8);

    let mut request = J1939Message::new(PGN_REQUEST, NULL_ADDRESS, BROADCAST_ADDRESS, 6);
    request.set_data(&PGN_ADDRESS_CLAIM.to_le_bytes()[..3]);
    bus.write(request.frame()).unwrap();

    let mut claim = J1939Message::new(PGN_ADDRESS_CLAIM, 0x80, BROADCAST_ADDRESS, 6);
    claim.set_name(name);
    bus.write(claim.frame()).unwrap();

    let status = J1939Message::new(PGN_ENGINE_TEMPERATURE, 0x80, 0, 6);
    bus.write(status.frame()).unwrap();

    // ======================================================================
    // 3. Decode what went out
    // ======================================================================
    println!("2. Bus traffic");
    let mut frame = Frame::can20(0, true, &[]);
    while bus.read(&mut frame).is_ok() {
        let id = J1939Id(frame.id());
        let message = J1939Message::from_frame(&frame);
        println!(
            "   {}  pgn=0x{:05X} prio={} sa=0x{:02X} da=0x{:02X} broadcast={}",
            message,
            id.pgn(),
            id.priority(),
            id.source_address(),
            message.dest_address(),
            message.broadcast()
        );
        if let Some(claimed) = message.name().filter(|_| id.pgn() == PGN_ADDRESS_CLAIM) {
            println!("      claimed by {}", claimed);
        }
    }
}
