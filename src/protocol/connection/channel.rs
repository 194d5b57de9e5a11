//! Connection over a pair of [`embassy_sync::channel::Channel`]s.
//!
//! Lets two tasks (or an interrupt-driven driver and the main loop)
//! exchange frames through pre-allocated channels. Only the non-blocking
//! `try_send` / `try_receive` calls are used: an empty inbound channel or a
//! full outbound channel reports [`Error::Fifo`].
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};

use crate::error::{Error, Result};
use crate::infra::frame::Frame;
use crate::protocol::connection::Connection;

/// Channel element type: frames that own their payload.
pub type FrameChannel<M, const N: usize> = Channel<M, Frame<'static>, N>;

/// Connection reading from one channel and writing to another.
pub struct ChannelConnection<'ch, M: RawMutex, const N: usize> {
    inbound: Receiver<'ch, M, Frame<'static>, N>,
    outbound: Sender<'ch, M, Frame<'static>, N>,
}

impl<'ch, M: RawMutex, const N: usize> ChannelConnection<'ch, M, N> {
    /// Read from `inbound`, write to `outbound`.
    pub fn new(inbound: &'ch FrameChannel<M, N>, outbound: &'ch FrameChannel<M, N>) -> Self {
        Self {
            inbound: inbound.receiver(),
            outbound: outbound.sender(),
        }
    }
}

impl<M: RawMutex, const N: usize> Connection for ChannelConnection<'_, M, N> {
    fn read(&mut self, frame: &mut Frame<'_>) -> Result {
        let received = self.inbound.try_receive().map_err(|_| Error::Fifo)?;
        frame.copy_from(&received);
        Ok(())
    }

    fn write(&mut self, frame: &Frame<'_>) -> Result {
        self.outbound
            .try_send(frame.to_static())
            .map_err(|_| Error::Fifo)
    }
}
