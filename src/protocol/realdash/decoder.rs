//! Incremental RealDash decoder.
//!
//! Bytes are pushed one at a time with [`RealDashDecoder::feed`]; the
//! decoder keeps every partial result (phase, running checksum, partially
//! filled frame) so a message may arrive split across any number of reads.
//!
//! # Wire format
//!
//! ```text
//! [type][0x33][0x22][length code][id: 4 bytes LE][payload][checksum]
//! ```
//!
//! * `0x44`: length code `0x11`, 8 payload bytes, checksum is the 8-bit sum
//!   of every preceding byte.
//! * `0x66`: length code `0x11..=0x1F`, `(code - 15) * 4` payload bytes,
//!   checksum is the little-endian CRC32 of every preceding byte.
//!
//! An unexpected byte aborts the current message and is dropped; decoding
//! resumes with the next byte as a potential message start.
use core::fmt;

use crc32fast::Hasher;

use crate::error::DecodeError;
use crate::infra::frame::{Frame, CANFD_CAPACITY};

pub(crate) const TYPE_SUM8: u8 = 0x44;
pub(crate) const TYPE_CRC32: u8 = 0x66;
pub(crate) const PREAMBLE: [u8; 2] = [0x33, 0x22];
pub(crate) const MIN_LENGTH_CODE: u8 = 0x11;
pub(crate) const MAX_LENGTH_CODE: u8 = 0x1F;

/// Payload length carried by a length code.
#[inline]
pub(crate) const fn payload_len(code: u8) -> u8 {
    (code - 15) * 4
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Header,
    Identifier,
    Payload,
    Checksum,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Sum8,
    Crc32,
}

impl Format {
    const fn checksum_len(self) -> u8 {
        match self {
            Format::Sum8 => 1,
            Format::Crc32 => 4,
        }
    }
}

/// Outcome of feeding one byte.
#[derive(Debug, PartialEq)]
pub enum Decode<'d> {
    /// The message is not complete yet.
    Pending,
    /// A message was completed and validated. The frame stays valid until
    /// the next call to [`RealDashDecoder::feed`].
    Frame(&'d Frame<'static>),
    /// The message was abandoned; the decoder is ready for a new one.
    Rejected(DecodeError),
}

/// State machine rebuilding frames from a RealDash byte stream.
#[derive(Clone)]
pub struct RealDashDecoder {
    phase: Phase,
    format: Format,
    /// Bytes consumed in the current phase.
    count: u8,
    id: u32,
    crc: Hasher,
    sum: u8,
    checksum: [u8; 4],
    frame: Frame<'static>,
}

impl fmt::Debug for RealDashDecoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RealDashDecoder")
            .field("phase", &self.phase)
            .field("format", &self.format)
            .field("count", &self.count)
            .finish_non_exhaustive()
    }
}

impl Default for RealDashDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl RealDashDecoder {
    pub fn new() -> Self {
        Self {
            phase: Phase::Header,
            format: Format::Crc32,
            count: 0,
            id: 0,
            crc: Hasher::new(),
            sum: 0,
            checksum: [0; 4],
            frame: Frame::with_capacity(CANFD_CAPACITY, 0x00),
        }
    }

    /// Abandon the message in progress, if any.
    pub fn reset(&mut self) {
        self.phase = Phase::Header;
        self.count = 0;
        self.id = 0;
        self.crc.reset();
        self.sum = 0;
        self.checksum = [0; 4];
    }

    /// `true` once at least one byte of a message has been accepted.
    pub fn in_progress(&self) -> bool {
        self.phase != Phase::Header || self.count > 0
    }

    /// Push the next byte of the stream.
    pub fn feed(&mut self, byte: u8) -> Decode<'_> {
        match self.phase {
            Phase::Header => {
                if let Err(err) = self.accept_header(byte) {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("realdash: {}", err);
                    self.reset();
                    return Decode::Rejected(err);
                }
                self.update_checksum(byte);
                self.advance(4, Phase::Identifier);
            }
            Phase::Identifier => {
                self.id |= (byte as u32) << (8 * self.count as u32);
                self.update_checksum(byte);
                self.advance(4, Phase::Payload);
                if self.phase == Phase::Payload {
                    self.frame.set_id(self.id, true);
                }
            }
            Phase::Payload => {
                self.frame.buffer_mut()[self.count as usize] = byte;
                self.update_checksum(byte);
                let len = self.frame.size();
                self.advance(len, Phase::Checksum);
            }
            Phase::Checksum => {
                self.checksum[self.count as usize] = byte;
                self.count += 1;
                if self.count == self.format.checksum_len() {
                    return self.finish();
                }
            }
        }
        Decode::Pending
    }

    /// Validate a header byte, recording the format and payload length.
    fn accept_header(&mut self, byte: u8) -> Result<(), DecodeError> {
        match self.count {
            0 => {
                self.format = match byte {
                    TYPE_SUM8 => Format::Sum8,
                    TYPE_CRC32 => Format::Crc32,
                    other => return Err(DecodeError::UnknownFrameType(other)),
                };
            }
            1 | 2 => {
                if byte != PREAMBLE[self.count as usize - 1] {
                    return Err(DecodeError::InvalidHeader {
                        position: self.count,
                        value: byte,
                    });
                }
            }
            _ => {
                let valid = match self.format {
                    Format::Sum8 => byte == MIN_LENGTH_CODE,
                    Format::Crc32 => (MIN_LENGTH_CODE..=MAX_LENGTH_CODE).contains(&byte),
                };
                if !valid {
                    return Err(DecodeError::InvalidLength(byte));
                }
                self.frame.resize(payload_len(byte), 0x00);
            }
        }
        Ok(())
    }

    fn update_checksum(&mut self, byte: u8) {
        match self.format {
            Format::Sum8 => self.sum = self.sum.wrapping_add(byte),
            Format::Crc32 => self.crc.update(&[byte]),
        }
    }

    /// Count a byte of the current phase, moving to `next` after `len` bytes.
    fn advance(&mut self, len: u8, next: Phase) {
        self.count += 1;
        if self.count >= len {
            self.phase = next;
            self.count = 0;
        }
    }

    fn finish(&mut self) -> Decode<'_> {
        let (expected, received) = match self.format {
            Format::Sum8 => (self.sum as u32, self.checksum[0] as u32),
            Format::Crc32 => (
                self.crc.clone().finalize(),
                u32::from_le_bytes(self.checksum),
            ),
        };
        self.reset();
        if expected != received {
            #[cfg(feature = "defmt")]
            defmt::warn!("realdash: checksum mismatch {=u32:X} != {=u32:X}", expected, received);
            return Decode::Rejected(DecodeError::ChecksumMismatch { expected, received });
        }
        #[cfg(feature = "defmt")]
        defmt::trace!("realdash: decoded {}", self.frame);
        Decode::Frame(&self.frame)
    }
}
