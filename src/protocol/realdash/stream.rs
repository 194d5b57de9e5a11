//! Byte stream the RealDash bridge runs over (UART, USB CDC, TCP socket...).
use crate::error::Result;

/// Minimal non-blocking serial port.
pub trait SerialStream {
    /// Number of bytes that can be read without waiting.
    fn available(&self) -> usize;

    /// Next received byte, or `None` when nothing is buffered.
    fn read_byte(&mut self) -> Option<u8>;

    /// Queue `bytes` for transmission. Returns [`Error::Fifo`](crate::error::Error::Fifo)
    /// when the transmit buffer cannot take them right now.
    fn write(&mut self, bytes: &[u8]) -> Result;

    /// Push queued bytes out to the peer.
    fn flush(&mut self) -> Result;
}

impl<S: SerialStream + ?Sized> SerialStream for &mut S {
    #[inline]
    fn available(&self) -> usize {
        (**self).available()
    }

    #[inline]
    fn read_byte(&mut self) -> Option<u8> {
        (**self).read_byte()
    }

    #[inline]
    fn write(&mut self, bytes: &[u8]) -> Result {
        (**self).write(bytes)
    }

    #[inline]
    fn flush(&mut self) -> Result {
        (**self).flush()
    }
}
