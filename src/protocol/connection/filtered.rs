//! Decorator applying read and write filters around a child connection.
//!
//! A frame rejected on read is reported as [`Error::Fifo`], exactly like an
//! empty connection. A frame rejected on write is silently accepted: it never
//! reaches the child and the call reports success.
use crate::error::{Error, Result};
use crate::infra::filter::{FrameFilter, PassAll};
use crate::infra::frame::Frame;
use crate::protocol::connection::Connection;

/// Connection filtering the frames exchanged with its child.
#[derive(Debug)]
pub struct FilteredConnection<C, R = PassAll, W = PassAll> {
    child: C,
    read_filter: R,
    write_filter: W,
}

impl<C: Connection> FilteredConnection<C> {
    /// Wrap `child` with filters that let everything through.
    pub fn new(child: C) -> Self {
        Self {
            child,
            read_filter: PassAll,
            write_filter: PassAll,
        }
    }
}

impl<C, R, W> FilteredConnection<C, R, W>
where
    C: Connection,
    R: FrameFilter,
    W: FrameFilter,
{
    /// Replace the read filter.
    pub fn with_read_filter<R2: FrameFilter>(
        self,
        read_filter: R2,
    ) -> FilteredConnection<C, R2, W> {
        FilteredConnection {
            child: self.child,
            read_filter,
            write_filter: self.write_filter,
        }
    }

    /// Replace the write filter.
    pub fn with_write_filter<W2: FrameFilter>(
        self,
        write_filter: W2,
    ) -> FilteredConnection<C, R, W2> {
        FilteredConnection {
            child: self.child,
            read_filter: self.read_filter,
            write_filter,
        }
    }

    pub fn read_filter(&self) -> &R {
        &self.read_filter
    }

    /// Mutable access, e.g. to update a [`FrameIDFilter`](crate::infra::filter::FrameIDFilter) in place.
    pub fn read_filter_mut(&mut self) -> &mut R {
        &mut self.read_filter
    }

    pub fn write_filter(&self) -> &W {
        &self.write_filter
    }

    pub fn write_filter_mut(&mut self) -> &mut W {
        &mut self.write_filter
    }

    pub fn child(&self) -> &C {
        &self.child
    }

    pub fn child_mut(&mut self) -> &mut C {
        &mut self.child
    }

    /// Unwrap the child connection.
    pub fn into_inner(self) -> C {
        self.child
    }
}

impl<C, R, W> Connection for FilteredConnection<C, R, W>
where
    C: Connection,
    R: FrameFilter,
    W: FrameFilter,
{
    fn read(&mut self, frame: &mut Frame<'_>) -> Result {
        self.child.read(frame)?;
        if !self.read_filter.accept(frame) {
            #[cfg(feature = "defmt")]
            defmt::trace!("filtered read: {}", frame);
            return Err(Error::Fifo);
        }
        Ok(())
    }

    fn write(&mut self, frame: &Frame<'_>) -> Result {
        if !self.write_filter.accept(frame) {
            #[cfg(feature = "defmt")]
            defmt::trace!("filtered write: {}", frame);
            return Ok(());
        }
        self.child.write(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::filter::{FilterMode, FrameIDFilter};
    use crate::protocol::connection::Loopback;

    fn standard_only(frame: &Frame<'_>) -> bool {
        !frame.ext()
    }

    #[test]
    /// A filtered-out read looks like an empty connection.
    fn test_read_filter_reports_fifo() {
        let mut child = Loopback::new(4);
        child.write(&Frame::can20(0x10, false, &[1])).unwrap();
        child.write(&Frame::can20(0x20, false, &[2])).unwrap();

        let mut ids = FrameIDFilter::new(FilterMode::Allow);
        ids.drop(0x10);
        let mut conn = FilteredConnection::new(child).with_read_filter(ids);

        let mut frame = Frame::new();
        assert_eq!(conn.read(&mut frame), Err(Error::Fifo));
        assert_eq!(conn.read(&mut frame), Ok(()));
        assert_eq!(frame.id(), 0x20);
        assert_eq!(conn.read(&mut frame), Err(Error::Fifo));
    }

    #[test]
    /// A filtered-out write succeeds without reaching the child.
    fn test_write_filter_swallows_frames() {
        let mut conn = FilteredConnection::new(Loopback::new(4)).with_write_filter(standard_only);
        assert_eq!(conn.write(&Frame::can20(0x18FF0000, true, &[1])), Ok(()));
        assert_eq!(conn.child().pending(), 0);
        assert_eq!(conn.write(&Frame::can20(0x100, false, &[1])), Ok(()));
        assert_eq!(conn.child().pending(), 1);
    }

    #[test]
    /// Child errors surface unchanged.
    fn test_child_errors_propagate() {
        let mut conn = FilteredConnection::new(Loopback::new(0));
        assert_eq!(conn.write(&Frame::can20(1, false, &[])), Err(Error::Fifo));
        let mut frame = Frame::new();
        assert_eq!(conn.read(&mut frame), Err(Error::Fifo));
    }

    #[test]
    fn test_filter_can_be_updated_in_place() {
        let mut conn = FilteredConnection::new(Loopback::new(4))
            .with_read_filter(FrameIDFilter::new(FilterMode::Drop));
        conn.child_mut().write(&Frame::can20(7, false, &[])).unwrap();
        conn.child_mut().write(&Frame::can20(7, false, &[])).unwrap();

        let mut frame = Frame::new();
        assert_eq!(conn.read(&mut frame), Err(Error::Fifo));
        conn.read_filter_mut().allow(7);
        assert_eq!(conn.read(&mut frame), Ok(()));
    }
}
