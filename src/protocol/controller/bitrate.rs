//! Bus bitrates and the operating mode they select.
//!
//! Variants are declared in a significant order: CAN 2.0 rates, then CAN FD
//! constant rates, then CAN FD dual rates (arbitration rate first, data rate
//! second). [`Bitrate::mode`] is derived from that order alone.

/// Operating mode of a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Classic CAN, up to 8 payload bytes.
    Can20,
    /// CAN FD with the same rate for arbitration and data.
    CanFdConstRate,
    /// CAN FD with a faster data phase.
    CanFdDualRate,
}

impl Mode {
    /// Payload capacity a frame needs to be read in this mode.
    #[inline]
    pub const fn frame_capacity(self) -> u8 {
        match self {
            Mode::Can20 => crate::infra::frame::CAN20_CAPACITY,
            Mode::CanFdConstRate | Mode::CanFdDualRate => crate::infra::frame::CANFD_CAPACITY,
        }
    }

    #[inline]
    pub const fn is_fd(self) -> bool {
        !matches!(self, Mode::Can20)
    }
}

/// Totally ordered list of supported bus bitrates.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Bitrate {
    Can20_125K,
    Can20_250K,
    Can20_500K,
    Can20_1000K,

    CanFd_125K,
    CanFd_250K,
    CanFd_500K,
    CanFd_1000K,

    CanFd_125K_500K,
    CanFd_250K_500K,
    CanFd_250K_750K,
    CanFd_250K_1M,
    CanFd_250K_1M5,
    CanFd_250K_2M,
    CanFd_250K_3M,
    CanFd_250K_4M,
    CanFd_500K_1M,
    CanFd_500K_2M,
    CanFd_500K_3M,
    CanFd_500K_4M,
    CanFd_500K_5M,
    CanFd_500K_6M5,
    CanFd_500K_8M,
    CanFd_500K_10M,
    CanFd_1000K_4M,
    CanFd_1000K_8M,
}

impl Bitrate {
    /// Every bitrate, in declaration order.
    pub const ALL: [Bitrate; 26] = [
        Bitrate::Can20_125K,
        Bitrate::Can20_250K,
        Bitrate::Can20_500K,
        Bitrate::Can20_1000K,
        Bitrate::CanFd_125K,
        Bitrate::CanFd_250K,
        Bitrate::CanFd_500K,
        Bitrate::CanFd_1000K,
        Bitrate::CanFd_125K_500K,
        Bitrate::CanFd_250K_500K,
        Bitrate::CanFd_250K_750K,
        Bitrate::CanFd_250K_1M,
        Bitrate::CanFd_250K_1M5,
        Bitrate::CanFd_250K_2M,
        Bitrate::CanFd_250K_3M,
        Bitrate::CanFd_250K_4M,
        Bitrate::CanFd_500K_1M,
        Bitrate::CanFd_500K_2M,
        Bitrate::CanFd_500K_3M,
        Bitrate::CanFd_500K_4M,
        Bitrate::CanFd_500K_5M,
        Bitrate::CanFd_500K_6M5,
        Bitrate::CanFd_500K_8M,
        Bitrate::CanFd_500K_10M,
        Bitrate::CanFd_1000K_4M,
        Bitrate::CanFd_1000K_8M,
    ];

    /// Mode selected by this bitrate: anything below the first FD rate is
    /// CAN 2.0, anything below the first dual rate is constant-rate FD.
    #[inline]
    pub const fn mode(self) -> Mode {
        let raw = self as u8;
        if raw < Bitrate::CanFd_125K as u8 {
            Mode::Can20
        } else if raw < Bitrate::CanFd_125K_500K as u8 {
            Mode::CanFdConstRate
        } else {
            Mode::CanFdDualRate
        }
    }

    /// Arbitration phase rate in bit/s.
    pub const fn arbitration_rate(self) -> u32 {
        use Bitrate::*;
        match self {
            Can20_125K | CanFd_125K | CanFd_125K_500K => 125_000,
            Can20_250K | CanFd_250K | CanFd_250K_500K | CanFd_250K_750K | CanFd_250K_1M
            | CanFd_250K_1M5 | CanFd_250K_2M | CanFd_250K_3M | CanFd_250K_4M => 250_000,
            Can20_500K | CanFd_500K | CanFd_500K_1M | CanFd_500K_2M | CanFd_500K_3M
            | CanFd_500K_4M | CanFd_500K_5M | CanFd_500K_6M5 | CanFd_500K_8M
            | CanFd_500K_10M => 500_000,
            Can20_1000K | CanFd_1000K | CanFd_1000K_4M | CanFd_1000K_8M => 1_000_000,
        }
    }

    /// Data phase rate in bit/s. Equal to the arbitration rate outside the
    /// dual-rate mode.
    pub const fn data_rate(self) -> u32 {
        use Bitrate::*;
        match self {
            CanFd_125K_500K | CanFd_250K_500K => 500_000,
            CanFd_250K_750K => 750_000,
            CanFd_250K_1M | CanFd_500K_1M => 1_000_000,
            CanFd_250K_1M5 => 1_500_000,
            CanFd_250K_2M | CanFd_500K_2M => 2_000_000,
            CanFd_250K_3M | CanFd_500K_3M => 3_000_000,
            CanFd_250K_4M | CanFd_500K_4M | CanFd_1000K_4M => 4_000_000,
            CanFd_500K_5M => 5_000_000,
            CanFd_500K_6M5 => 6_500_000,
            CanFd_500K_8M | CanFd_1000K_8M => 8_000_000,
            CanFd_500K_10M => 10_000_000,
            other => other.arbitration_rate(),
        }
    }

    /// CAN 2.0 bitrate sharing this bitrate's arbitration rate.
    pub const fn can20_equivalent(self) -> Bitrate {
        match self.arbitration_rate() {
            125_000 => Bitrate::Can20_125K,
            250_000 => Bitrate::Can20_250K,
            500_000 => Bitrate::Can20_500K,
            _ => Bitrate::Can20_1000K,
        }
    }
}
