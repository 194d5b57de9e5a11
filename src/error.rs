//! Error definitions shared across library modules.
//! [`Error`] is the status taxonomy every `Connection` reports; the other
//! types model codec-specific failures (RealDash decoding, J1939 identifier
//! construction) that stay inside their module or get folded into [`Error`].
use thiserror_no_std::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Status returned by read and write operations on a connection.
pub enum Error {
    /// No frame available for read or no space to write. Always retryable.
    #[error("No frame available or no space to write")]
    Fifo,
    /// Controller or network used before initialization.
    #[error("Controller or network not ready")]
    NotReady,
    /// Frame size or capacity does not fit the operating mode.
    #[error("Invalid argument")]
    InvalidArgument,
    /// Underlying transport or driver failure.
    #[error("Internal error")]
    Internal,
}

impl Error {
    /// Returns `true` when retrying the same operation later can succeed.
    #[inline]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Error::Fifo)
    }
}

/// Result alias used by every connection operation.
pub type Result<T = ()> = core::result::Result<T, Error>;

//==================================================================================REALDASH_ERRORS
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Reasons a RealDash message is rejected mid-stream. Rejection resets the decoder.
pub enum DecodeError {
    /// First header byte is neither `0x44` nor `0x66`.
    #[error("Unrecognized frame type {0:#04x}")]
    UnknownFrameType(u8),
    /// Second or third header byte does not match the `0x33 0x22` preamble.
    #[error("Invalid header byte {value:#04x} at position {position}")]
    InvalidHeader { position: u8, value: u8 },
    /// Length code outside the range allowed for the frame type.
    #[error("Invalid length code {0:#04x}")]
    InvalidLength(u8),
    /// Received checksum differs from the one computed over the message.
    #[error("Checksum mismatch: expected {expected:#010x}, received {received:#010x}")]
    ChecksumMismatch { expected: u32, received: u32 },
}

//==================================================================================J1939_ERRORS
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Errors that can occur while building a 29-bit J1939 identifier.
pub enum IdBuildError {
    /// Attempt to build a broadcast message (PDU2) with PF < 240.
    #[error("Invalid for broadcast message: PF is too low")]
    InvalidForBroadcast,
    /// Attempt to send an addressed message (PDU1) with PF ≥ 240.
    #[error("Invalid for addressed message: PF is too high: {pf}")]
    InvalidForAddressed { pf: u8 },
    /// In PDU1 the lower 8 bits of the PGN must remain zero.
    #[error("PDU1 PGNs require PS = 0")]
    PsAddressedMustBeNull,
}
