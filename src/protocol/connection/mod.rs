//! Non-blocking read/write contract over frames.
//!
//! A [`Connection`] does not necessarily represent a physical bus: the same
//! contract is implemented by controllers, the RealDash serial bridge, the
//! in-memory [`Loopback`], and the [`filtered`] / [`buffered`] decorators
//! composed over another connection.
//!
//! Every call completes immediately. [`Error::Fifo`] means "nothing to read"
//! or "no room to write" and is always safe to retry.
use alloc::boxed::Box;

use crate::error::{Error, Result};
use crate::infra::frame::Frame;
use crate::infra::queue::Queue;

pub mod buffered;
pub mod channel;
pub mod filtered;
pub mod polling;

/// Contract to send and receive frames without blocking.
pub trait Connection {
    /// Read the next available frame into `frame`, reserving capacity when
    /// needed. Returns [`Error::Fifo`] when no frame is available.
    fn read(&mut self, frame: &mut Frame<'_>) -> Result;

    /// Write `frame`. Returns [`Error::Fifo`] when the connection has no
    /// room for it right now and [`Error::InvalidArgument`] when its size is
    /// not supported.
    fn write(&mut self, frame: &Frame<'_>) -> Result;
}

impl<C: Connection + ?Sized> Connection for &mut C {
    #[inline]
    fn read(&mut self, frame: &mut Frame<'_>) -> Result {
        (**self).read(frame)
    }

    #[inline]
    fn write(&mut self, frame: &Frame<'_>) -> Result {
        (**self).write(frame)
    }
}

impl<C: Connection + ?Sized> Connection for Box<C> {
    #[inline]
    fn read(&mut self, frame: &mut Frame<'_>) -> Result {
        (**self).read(frame)
    }

    #[inline]
    fn write(&mut self, frame: &Frame<'_>) -> Result {
        (**self).write(frame)
    }
}

//==================================================================================LOOPBACK
/// In-memory connection: written frames are read back in FIFO order.
#[derive(Debug)]
pub struct Loopback {
    queue: Queue,
}

impl Loopback {
    /// Loopback holding up to `capacity` frames in flight.
    pub fn new(capacity: usize) -> Self {
        Self {
            queue: Queue::new(capacity),
        }
    }

    /// Loopback whose slots pre-reserve `frame_capacity` payload bytes.
    pub fn with_frame_capacity(capacity: usize, frame_capacity: u8) -> Self {
        Self {
            queue: Queue::with_frame_capacity(capacity, frame_capacity),
        }
    }

    /// Number of frames waiting to be read.
    pub fn pending(&self) -> usize {
        self.queue.size()
    }
}

impl Connection for Loopback {
    fn read(&mut self, frame: &mut Frame<'_>) -> Result {
        match self.queue.dequeue() {
            Some(front) => {
                frame.copy_from(front);
                Ok(())
            }
            None => Err(Error::Fifo),
        }
    }

    fn write(&mut self, frame: &Frame<'_>) -> Result {
        if self.queue.enqueue(frame) {
            Ok(())
        } else {
            Err(Error::Fifo)
        }
    }
}
