//! Downgrade tables of the supported controller classes.
//!
//! A controller asked for a bitrate it cannot run falls back to the closest
//! one that keeps the same arbitration rate, so nodes of mixed capability
//! can still share a bus.
use super::bitrate::{Bitrate, Mode};

/// Bitrate negotiation of a controller class.
pub trait BitrateSupport {
    /// Closest bitrate to `requested` this class can run.
    fn nearest_supported(requested: Bitrate) -> Bitrate;

    /// Mode the controller ends up in when asked for `requested`.
    fn mode_for(requested: Bitrate) -> Mode {
        Self::nearest_supported(requested).mode()
    }
}

/// MCP2515: CAN 2.0 only. Any FD bitrate falls back to the CAN 2.0 rate of
/// its arbitration phase.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mcp2515;

impl BitrateSupport for Mcp2515 {
    fn nearest_supported(requested: Bitrate) -> Bitrate {
        requested.can20_equivalent()
    }
}

/// SAME51 integrated CAN FD: data phase limited to 4 Mbit/s.
#[derive(Debug, Clone, Copy, Default)]
pub struct Same51;

impl BitrateSupport for Same51 {
    fn nearest_supported(requested: Bitrate) -> Bitrate {
        match requested {
            Bitrate::CanFd_500K_5M
            | Bitrate::CanFd_500K_6M5
            | Bitrate::CanFd_500K_8M
            | Bitrate::CanFd_500K_10M => Bitrate::CanFd_500K_4M,
            Bitrate::CanFd_1000K_8M => Bitrate::CanFd_1000K_4M,
            other => other,
        }
    }
}

/// MCP2518FD: data phase limited to 8 Mbit/s.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mcp2518;

impl BitrateSupport for Mcp2518 {
    fn nearest_supported(requested: Bitrate) -> Bitrate {
        match requested {
            Bitrate::CanFd_500K_10M => Bitrate::CanFd_500K_8M,
            other => other,
        }
    }
}
