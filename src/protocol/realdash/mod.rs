//! RealDash CAN bridge over a serial stream.
//!
//! [RealDash](https://realdash.net) dashboards exchange CAN frames with a
//! device through a byte stream. [`RealDash`] implements [`Connection`] over
//! any [`SerialStream`]: reads drain the available bytes through a
//! [`RealDashDecoder`], writes encode the frame and flush it.
//!
//! ```
//! use canny::infra::frame::Frame;
//! use canny::protocol::realdash::{encode, Decode, RealDashDecoder, MAX_MESSAGE_LEN};
//!
//! let mut wire = [0u8; MAX_MESSAGE_LEN];
//! let len = encode(&Frame::can20(0x5A0, true, &[1, 2, 3]), &mut wire).unwrap();
//!
//! let mut decoder = RealDashDecoder::new();
//! let (last, head) = wire[..len].split_last().unwrap();
//! for byte in head {
//!     assert_eq!(decoder.feed(*byte), Decode::Pending);
//! }
//! match decoder.feed(*last) {
//!     Decode::Frame(frame) => assert_eq!(frame.data(), &[1, 2, 3, 0, 0, 0, 0, 0]),
//!     other => panic!("unexpected {:?}", other),
//! }
//! ```
use crate::error::{Error, Result};
use crate::infra::frame::Frame;
use crate::protocol::connection::Connection;

mod decoder;
mod encoder;
mod stream;
mod watchdog;

pub use decoder::{Decode, RealDashDecoder};
pub use encoder::{encode, MAX_MESSAGE_LEN};
pub use stream::SerialStream;
pub use watchdog::StallWatchdog;

/// Delay after which a partially received message is considered lost.
pub const RECEIVE_TIMEOUT_MS: u64 = 5000;

/// Connection exchanging frames with RealDash over `S`.
///
/// Received frames always carry the extended flag: RealDash identifiers
/// are four bytes wide with no format distinction.
#[derive(Debug)]
pub struct RealDash<S> {
    stream: S,
    decoder: RealDashDecoder,
    encoded: [u8; MAX_MESSAGE_LEN],
}

impl<S: SerialStream> RealDash<S> {
    pub fn new(stream: S) -> Self {
        Self {
            stream,
            decoder: RealDashDecoder::new(),
            encoded: [0; MAX_MESSAGE_LEN],
        }
    }

    /// Drop the partially decoded message, e.g. after a [`StallWatchdog`] fired.
    pub fn reset(&mut self) {
        self.decoder.reset();
    }

    /// `true` when a message has started but is not complete yet.
    pub fn in_progress(&self) -> bool {
        self.decoder.in_progress()
    }

    pub fn stream(&self) -> &S {
        &self.stream
    }

    pub fn stream_mut(&mut self) -> &mut S {
        &mut self.stream
    }

    pub fn into_inner(self) -> S {
        self.stream
    }
}

impl<S: SerialStream> Connection for RealDash<S> {
    /// Consume available bytes until a message completes. Rejected messages
    /// are skipped; `Fifo` means the stream ran dry first.
    fn read(&mut self, frame: &mut Frame<'_>) -> Result {
        while self.stream.available() > 0 {
            let Some(byte) = self.stream.read_byte() else {
                break;
            };
            if let Decode::Frame(decoded) = self.decoder.feed(byte) {
                frame.copy_from(decoded);
                return Ok(());
            }
        }
        Err(Error::Fifo)
    }

    fn write(&mut self, frame: &Frame<'_>) -> Result {
        let len = encode(frame, &mut self.encoded)?;
        self.stream.write(&self.encoded[..len])?;
        self.stream.flush()
    }
}
