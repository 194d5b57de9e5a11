//! Contract of physical bus controllers and bitrate negotiation.
//!
//! Drivers live outside this crate; they implement [`Controller`] on top of
//! [`Connection`] and use a [`BitrateSupport`] table to pick the bitrate
//! they actually run. The capacity checks below are the shared guard every
//! driver runs before touching its hardware buffers.
use crate::error::{Error, Result};
use crate::infra::frame::Frame;
use crate::protocol::connection::Connection;

mod bitrate;
mod support;

pub use bitrate::{Bitrate, Mode};
pub use support::{BitrateSupport, Mcp2515, Mcp2518, Same51};

/// A transceiver attached to a CAN bus.
pub trait Controller: Connection {
    /// Initialize the controller. The bus must run a bitrate compatible with
    /// `bitrate` after negotiation. Returns `false` on an unrecoverable failure.
    fn begin(&mut self, bitrate: Bitrate) -> bool;

    /// Operating mode. Only meaningful after [`Controller::begin`].
    fn mode(&self) -> Mode;

    /// Negotiated bitrate. Only meaningful after [`Controller::begin`].
    fn bitrate(&self) -> Bitrate;
}

/// Reject frames too small to receive a payload in `mode`.
#[inline]
pub fn check_read_capacity(mode: Mode, frame: &Frame<'_>) -> Result {
    if frame.capacity() < mode.frame_capacity() {
        #[cfg(feature = "defmt")]
        defmt::warn!("controller: frame capacity {} too small for {}", frame.capacity(), mode);
        return Err(Error::InvalidArgument);
    }
    Ok(())
}

/// Reject payloads larger than `mode` can carry.
#[inline]
pub fn check_write_size(mode: Mode, frame: &Frame<'_>) -> Result {
    if frame.size() > mode.frame_capacity() {
        #[cfg(feature = "defmt")]
        defmt::warn!("controller: payload of {} bytes too large for {}", frame.size(), mode);
        return Err(Error::InvalidArgument);
    }
    Ok(())
}
