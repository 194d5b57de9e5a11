//! RealDash encoder. Always emits the `0x66` format.
use crc32fast::Hasher;

use super::decoder::{PREAMBLE, TYPE_CRC32};
use crate::error::{Error, Result};
use crate::infra::frame::{Frame, CANFD_CAPACITY};

/// Size of the longest message: header, id, 64 payload bytes and CRC.
pub const MAX_MESSAGE_LEN: usize = 4 + 4 + CANFD_CAPACITY as usize + 4;

/// Payload length on the wire: at least 8 bytes, rounded up to a multiple of 4.
#[inline]
const fn padded_len(size: u8) -> u8 {
    if size <= 8 {
        8
    } else {
        size.div_ceil(4) * 4
    }
}

/// Encode `frame` into `out` and return the message length.
///
/// Payloads are zero-padded. Fails with [`Error::InvalidArgument`] when the
/// payload exceeds 64 bytes or `out` is too short for the message.
pub fn encode(frame: &Frame<'_>, out: &mut [u8]) -> Result<usize> {
    if frame.size() > CANFD_CAPACITY {
        return Err(Error::InvalidArgument);
    }
    let len = padded_len(frame.size()) as usize;
    let total = 8 + len + 4;
    if out.len() < total {
        return Err(Error::InvalidArgument);
    }

    out[0] = TYPE_CRC32;
    out[1..3].copy_from_slice(&PREAMBLE);
    out[3] = (len / 4 + 15) as u8;
    out[4..8].copy_from_slice(&frame.id().to_le_bytes());
    let data = frame.data();
    out[8..8 + data.len()].copy_from_slice(data);
    out[8 + data.len()..8 + len].fill(0x00);

    let mut crc = Hasher::new();
    crc.update(&out[..8 + len]);
    out[8 + len..total].copy_from_slice(&crc.finalize().to_le_bytes());
    Ok(total)
}
