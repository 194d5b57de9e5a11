//! `canny` library: CAN 2.0 / CAN FD frames and the connections moving them
//! in a `no_std` environment. The crate exposes the infrastructure modules
//! (frame, queue, filter) and the protocol layers built on them
//! (connections, controller negotiation, RealDash bridge, J1939 addressing).
#![no_std]
extern crate alloc;
#[cfg(test)]
extern crate std;
//==================================================================================
/// Status taxonomy of connections and codec-specific errors.
pub mod error;
/// Frame representation, frame queue and identifier filters.
pub mod infra;
/// Connections, controller contract, RealDash codec and J1939 view.
pub mod protocol;
//==================================================================================
