//! Decorator buffering reads and writes around a child connection.
//!
//! Reads are served from a read-ahead queue refilled opportunistically after
//! every successful read. Writes that hit [`Error::Fifo`] on the child are
//! parked in a write-behind queue and retried before the next write or on
//! [`BufferedConnection::flush`].
//!
//! # Error policy
//!
//! * Read: child errors other than `Fifo` are reported through
//!   [`ErrorHooks::on_read_error`] and the call returns `Fifo`.
//! * Write: only capacity exhaustion is visible to the caller. A frame that
//!   cannot be parked because the write-behind queue is full is dropped,
//!   reported with `on_write_error(Fifo, frame)`, and the call returns
//!   `Fifo`. Any other child error is reported and the frame discarded while
//!   the call returns `Ok`.
//!
//! Both queues only ever hold frames that already passed their filter.
use crate::error::{Error, Result};
use crate::infra::filter::{FrameFilter, PassAll};
use crate::infra::frame::Frame;
use crate::infra::queue::Queue;
use crate::protocol::connection::Connection;

/// Diagnostics hooks invoked for conditions the buffered connection absorbs.
pub trait ErrorHooks {
    /// A child read failed with an error other than `Fifo`.
    fn on_read_error(&mut self, _error: Error) {}

    /// `frame` was discarded. `error` is `Fifo` when the write-behind queue
    /// was full.
    fn on_write_error(&mut self, _error: Error, _frame: &Frame<'_>) {}
}

/// Hooks that ignore every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl ErrorHooks for NoHooks {}

/// Connection buffering the frames exchanged with its child.
#[derive(Debug)]
pub struct BufferedConnection<C, R = PassAll, W = PassAll, H = NoHooks> {
    child: C,
    read_queue: Queue,
    write_queue: Queue,
    read_filter: R,
    write_filter: W,
    hooks: H,
}

impl<C: Connection> BufferedConnection<C> {
    /// Wrap `child` with a read-ahead queue of `read_capacity` frames and a
    /// write-behind queue of `write_capacity` frames. Each slot reserves
    /// `frame_capacity` payload bytes up front.
    pub fn new(child: C, read_capacity: usize, write_capacity: usize, frame_capacity: u8) -> Self {
        Self {
            child,
            read_queue: Queue::with_frame_capacity(read_capacity, frame_capacity),
            write_queue: Queue::with_frame_capacity(write_capacity, frame_capacity),
            read_filter: PassAll,
            write_filter: PassAll,
            hooks: NoHooks,
        }
    }
}

impl<C, R, W, H> BufferedConnection<C, R, W, H>
where
    C: Connection,
    R: FrameFilter,
    W: FrameFilter,
    H: ErrorHooks,
{
    /// Replace the read filter. Rejected frames are never buffered.
    pub fn with_read_filter<R2: FrameFilter>(
        self,
        read_filter: R2,
    ) -> BufferedConnection<C, R2, W, H> {
        BufferedConnection {
            child: self.child,
            read_queue: self.read_queue,
            write_queue: self.write_queue,
            read_filter,
            write_filter: self.write_filter,
            hooks: self.hooks,
        }
    }

    /// Replace the write filter. Rejected frames are never buffered.
    pub fn with_write_filter<W2: FrameFilter>(
        self,
        write_filter: W2,
    ) -> BufferedConnection<C, R, W2, H> {
        BufferedConnection {
            child: self.child,
            read_queue: self.read_queue,
            write_queue: self.write_queue,
            read_filter: self.read_filter,
            write_filter,
            hooks: self.hooks,
        }
    }

    /// Replace the error hooks.
    pub fn with_hooks<H2: ErrorHooks>(self, hooks: H2) -> BufferedConnection<C, R, W, H2> {
        BufferedConnection {
            child: self.child,
            read_queue: self.read_queue,
            write_queue: self.write_queue,
            read_filter: self.read_filter,
            write_filter: self.write_filter,
            hooks,
        }
    }

    pub fn child(&self) -> &C {
        &self.child
    }

    pub fn child_mut(&mut self) -> &mut C {
        &mut self.child
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }

    pub fn read_filter_mut(&mut self) -> &mut R {
        &mut self.read_filter
    }

    pub fn write_filter_mut(&mut self) -> &mut W {
        &mut self.write_filter
    }

    /// Frames waiting in the read-ahead queue.
    pub fn read_buffered(&self) -> usize {
        self.read_queue.size()
    }

    /// Frames waiting in the write-behind queue.
    pub fn write_buffered(&self) -> usize {
        self.write_queue.size()
    }

    /// Retry parked writes. Call from the idle loop so buffered frames do
    /// not wait for the next [`Connection::write`]. Returns `Fifo` when the
    /// child still has no room.
    pub fn flush(&mut self) -> Result {
        self.drain_write_queue()
    }

    /// Unwrap the child connection. Buffered frames are discarded.
    pub fn into_inner(self) -> C {
        self.child
    }

    /// Pull frames from the child into the read-ahead queue until it is
    /// full, the child runs dry, or the child fails.
    fn fill_read_queue(&mut self) {
        while let Some(slot) = self.read_queue.alloc() {
            match self.child.read(slot) {
                Ok(()) => {
                    if self.read_filter.accept(slot) {
                        self.read_queue.commit();
                    } else {
                        #[cfg(feature = "defmt")]
                        defmt::trace!("buffer: filtered {}", slot);
                    }
                }
                Err(Error::Fifo) => break,
                Err(err) => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("buffer: read error while filling: {}", err);
                    self.hooks.on_read_error(err);
                    break;
                }
            }
        }
    }

    /// Write parked frames to the child in order. Stops at the first `Fifo`.
    fn drain_write_queue(&mut self) -> Result {
        while let Some(front) = self.write_queue.peek() {
            match self.child.write(front) {
                Ok(()) => {}
                Err(Error::Fifo) => return Err(Error::Fifo),
                Err(err) => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("buffer: discarding parked frame {}: {}", front, err);
                    self.hooks.on_write_error(err, front);
                }
            }
            self.write_queue.dequeue();
        }
        Ok(())
    }

    /// Park `frame` for a later retry, dropping and reporting it when full.
    fn park(&mut self, frame: &Frame<'_>) -> Result {
        if self.write_queue.enqueue(frame) {
            return Ok(());
        }
        #[cfg(feature = "defmt")]
        defmt::warn!("buffer: write queue full, dropping {}", frame);
        self.hooks.on_write_error(Error::Fifo, frame);
        Err(Error::Fifo)
    }
}

impl<C, R, W, H> Connection for BufferedConnection<C, R, W, H>
where
    C: Connection,
    R: FrameFilter,
    W: FrameFilter,
    H: ErrorHooks,
{
    fn read(&mut self, frame: &mut Frame<'_>) -> Result {
        if let Some(front) = self.read_queue.dequeue() {
            frame.copy_from(front);
        } else {
            loop {
                match self.child.read(frame) {
                    Ok(()) if self.read_filter.accept(frame) => break,
                    Ok(()) => {
                        #[cfg(feature = "defmt")]
                        defmt::trace!("buffer: filtered {}", frame);
                    }
                    Err(Error::Fifo) => return Err(Error::Fifo),
                    Err(err) => {
                        #[cfg(feature = "defmt")]
                        defmt::warn!("buffer: read error: {}", err);
                        self.hooks.on_read_error(err);
                        return Err(Error::Fifo);
                    }
                }
            }
        }
        self.fill_read_queue();
        Ok(())
    }

    fn write(&mut self, frame: &Frame<'_>) -> Result {
        if self.drain_write_queue().is_err() {
            // The child is still busy: keep ordering by parking behind the backlog.
            if !self.write_filter.accept(frame) {
                return Ok(());
            }
            return self.park(frame);
        }

        if !self.write_filter.accept(frame) {
            return Ok(());
        }

        match self.child.write(frame) {
            Ok(()) => Ok(()),
            Err(Error::Fifo) => self.park(frame),
            Err(err) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("buffer: discarding {}: {}", frame, err);
                self.hooks.on_write_error(err, frame);
                Ok(())
            }
        }
    }
}
