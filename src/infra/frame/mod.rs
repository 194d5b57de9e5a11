//! In-memory representation of a CAN 2.0 / CAN FD frame.
//!
//! A [`Frame`] carries an identifier, the extended-format flag and a payload
//! buffer whose capacity may exceed the number of valid bytes (`size`).
//! Capacity only grows: controllers reserve the mode's maximum payload once
//! and then reuse the frame for every read.
//!
//! # Ownership
//!
//! The payload is either owned (heap buffer, freed with the frame) or
//! borrowed from the caller through [`Frame::wrap`]. Cloning always
//! performs a deep copy into owned storage, so only the wrapping frame ever
//! aliases external memory. Growing a borrowed frame beyond the wrapped
//! slice moves its content into owned storage.
use alloc::vec::Vec;
use core::fmt;

/// Payload capacity required to read frames in CAN 2.0 mode.
pub const CAN20_CAPACITY: u8 = 8;
/// Payload capacity required to read frames in CAN FD mode.
pub const CANFD_CAPACITY: u8 = 64;

/// Mask applied to standard (11-bit) identifiers.
pub const STANDARD_ID_MASK: u32 = 0x7FF;
/// Mask applied to extended (29-bit) identifiers.
pub const EXTENDED_ID_MASK: u32 = 0x1FFF_FFFF;

/// Backing storage of a frame payload.
#[derive(Debug)]
enum Payload<'a> {
    Owned(Vec<u8>),
    Borrowed(&'a mut [u8]),
}

impl Payload<'_> {
    fn as_slice(&self) -> &[u8] {
        match self {
            Payload::Owned(data) => data,
            Payload::Borrowed(data) => data,
        }
    }

    fn as_mut_slice(&mut self) -> &mut [u8] {
        match self {
            Payload::Owned(data) => data,
            Payload::Borrowed(data) => data,
        }
    }
}

/// A single CAN message: identifier, extended flag, and payload bytes.
///
/// Equality compares `id`, `ext`, `size`, and the first `size` payload bytes;
/// capacity and ownership are ignored.
#[derive(Debug)]
pub struct Frame<'a> {
    id: u32,
    ext: bool,
    size: u8,
    payload: Payload<'a>,
}

impl Frame<'static> {
    /// Empty frame: ID 0, standard format, no payload capacity.
    pub const fn new() -> Self {
        Self {
            id: 0,
            ext: false,
            size: 0,
            payload: Payload::Owned(Vec::new()),
        }
    }

    /// Empty frame with `capacity` payload bytes reserved and set to `fill`.
    pub fn with_capacity(capacity: u8, fill: u8) -> Self {
        let mut frame = Self::new();
        frame.reserve(capacity, fill);
        frame
    }

    /// Frame with the given header. Capacity is `max(size, capacity)` and
    /// every payload byte is set to `fill`.
    pub fn with_header(id: u32, ext: bool, size: u8, capacity: u8, fill: u8) -> Self {
        let mut frame = Self {
            id,
            ext,
            size,
            payload: Payload::Owned(Vec::new()),
        };
        frame.reserve(size.max(capacity), fill);
        frame
    }

    /// Frame holding a copy of `data`. The payload is truncated to 255 bytes.
    pub fn from_data(id: u32, ext: bool, data: &[u8]) -> Self {
        let mut frame = Self::with_header(id, ext, 0, 0, 0);
        frame.set_data(data);
        frame
    }

    /// CAN 2.0 frame: `data` copied into a buffer of at least eight bytes.
    pub fn can20(id: u32, ext: bool, data: &[u8]) -> Self {
        let mut frame = Self::with_capacity(CAN20_CAPACITY, 0x00);
        frame.set_id(id, ext);
        frame.set_data(data);
        frame
    }

    /// CAN FD frame: `data` copied into a buffer of at least 64 bytes.
    pub fn canfd(id: u32, ext: bool, data: &[u8]) -> Self {
        let mut frame = Self::with_capacity(CANFD_CAPACITY, 0x00);
        frame.set_id(id, ext);
        frame.set_data(data);
        frame
    }
}

impl Default for Frame<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Frame<'a> {
    /// Wrap an external buffer without copying it.
    ///
    /// The frame borrows `buffer` for its whole lifetime and never frees it.
    /// Capacity is the buffer length (capped at 255) and `size` is truncated
    /// to that capacity.
    pub fn wrap(id: u32, ext: bool, size: u8, buffer: &'a mut [u8]) -> Self {
        let len = buffer.len().min(u8::MAX as usize);
        let buffer = &mut buffer[..len];
        Self {
            id,
            ext,
            size: size.min(len as u8),
            payload: Payload::Borrowed(buffer),
        }
    }

    /// Identifier: 11 bits for standard frames, 29 bits for extended frames.
    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    /// `true` when the identifier is a 29-bit extended identifier.
    #[inline]
    pub fn ext(&self) -> bool {
        self.ext
    }

    /// Number of valid payload bytes.
    #[inline]
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Number of payload bytes the buffer can hold without growing.
    #[inline]
    pub fn capacity(&self) -> u8 {
        self.payload.as_slice().len() as u8
    }

    /// `true` when the payload buffer belongs to the frame.
    #[inline]
    pub fn is_owned(&self) -> bool {
        matches!(self.payload, Payload::Owned(_))
    }

    /// Valid payload bytes (`data[..size]`).
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.payload.as_slice()[..self.size as usize]
    }

    /// Mutable view over the valid payload bytes.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        let size = self.size as usize;
        &mut self.payload.as_mut_slice()[..size]
    }

    /// Whole payload buffer, `capacity` bytes long.
    #[inline]
    pub fn buffer(&self) -> &[u8] {
        self.payload.as_slice()
    }

    /// Mutable view over the whole payload buffer. Drivers write received
    /// bytes here and then publish the length with [`Frame::set_size`].
    #[inline]
    pub fn buffer_mut(&mut self) -> &mut [u8] {
        self.payload.as_mut_slice()
    }

    /// Set the identifier and its format.
    #[inline]
    pub fn set_id(&mut self, id: u32, ext: bool) {
        self.id = id;
        self.ext = ext;
    }

    /// Set the identifier without touching the format flag.
    #[inline]
    pub fn set_raw_id(&mut self, id: u32) {
        self.id = id;
    }

    /// Set the extended-format flag.
    #[inline]
    pub fn set_ext(&mut self, ext: bool) {
        self.ext = ext;
    }

    /// Publish `size` valid bytes without touching the buffer. Clamped to capacity.
    #[inline]
    pub fn set_size(&mut self, size: u8) {
        self.size = size.min(self.capacity());
    }

    /// Replace the payload with a copy of `data`, growing the buffer when needed.
    /// `data` is truncated to 255 bytes.
    pub fn set_data(&mut self, data: &[u8]) {
        let len = data.len().min(u8::MAX as usize);
        self.reserve(len as u8, 0x00);
        self.payload.as_mut_slice()[..len].copy_from_slice(&data[..len]);
        self.size = len as u8;
    }

    /// Grow the buffer to at least `capacity` bytes. New bytes are set to
    /// `fill`. Never shrinks.
    pub fn reserve(&mut self, capacity: u8, fill: u8) {
        let capacity = capacity as usize;
        match &mut self.payload {
            Payload::Owned(data) => {
                if capacity > data.len() {
                    data.resize(capacity, fill);
                }
            }
            Payload::Borrowed(data) => {
                if capacity > data.len() {
                    let mut owned = Vec::with_capacity(capacity);
                    owned.extend_from_slice(data);
                    owned.resize(capacity, fill);
                    self.payload = Payload::Owned(owned);
                }
            }
        }
    }

    /// Change the number of valid bytes. Capacity is reserved as needed and
    /// bytes newly exposed past the previous size are set to `fill`.
    pub fn resize(&mut self, size: u8, fill: u8) {
        self.reserve(size, fill);
        if size > self.size {
            self.payload.as_mut_slice()[self.size as usize..size as usize].fill(fill);
        }
        self.size = size;
    }

    /// Overwrite the whole buffer with `fill`. The size is unchanged.
    pub fn clear(&mut self, fill: u8) {
        self.payload.as_mut_slice().fill(fill);
    }

    /// Copy header and valid payload bytes of `other` into this frame,
    /// reusing the current buffer when it is large enough.
    pub fn copy_from(&mut self, other: &Frame<'_>) {
        self.id = other.id;
        self.ext = other.ext;
        self.reserve(other.size, 0x00);
        let size = other.size as usize;
        self.payload.as_mut_slice()[..size].copy_from_slice(other.data());
        self.size = other.size;
    }

    /// Deep copy into an owned frame that no longer borrows anything.
    pub fn to_static(&self) -> Frame<'static> {
        Frame {
            id: self.id,
            ext: self.ext,
            size: self.size,
            payload: Payload::Owned(self.payload.as_slice().to_vec()),
        }
    }
}

impl Clone for Frame<'_> {
    fn clone(&self) -> Self {
        self.to_static()
    }
}

impl<'b> PartialEq<Frame<'b>> for Frame<'_> {
    fn eq(&self, other: &Frame<'b>) -> bool {
        self.id == other.id
            && self.ext == other.ext
            && self.size == other.size
            && self.data() == other.data()
    }
}

impl Eq for Frame<'_> {}

impl fmt::Display for Frame<'_> {
    /// Renders `ID#b0:b1:...` in uppercase hexadecimal.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:X}#", self.id)?;
        for (i, byte) in self.data().iter().enumerate() {
            if i > 0 {
                f.write_str(":")?;
            }
            write!(f, "{:02X}", byte)?;
        }
        Ok(())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Frame<'_> {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=u32:X}#{=[u8]:X}", self.id, self.data())
    }
}

//==================================================================================EMBEDDED_CAN
impl embedded_can::Frame for Frame<'static> {
    fn new(id: impl Into<embedded_can::Id>, data: &[u8]) -> Option<Self> {
        if data.len() > CAN20_CAPACITY as usize {
            return None;
        }
        let (raw, ext) = match id.into() {
            embedded_can::Id::Standard(id) => (id.as_raw() as u32, false),
            embedded_can::Id::Extended(id) => (id.as_raw(), true),
        };
        Some(Frame::can20(raw, ext, data))
    }

    /// Remote frames are not represented.
    fn new_remote(_id: impl Into<embedded_can::Id>, _dlc: usize) -> Option<Self> {
        None
    }

    fn is_extended(&self) -> bool {
        self.ext
    }

    fn is_remote_frame(&self) -> bool {
        false
    }

    fn id(&self) -> embedded_can::Id {
        if self.ext {
            let id = embedded_can::ExtendedId::new(self.id & EXTENDED_ID_MASK)
                .unwrap_or(embedded_can::ExtendedId::ZERO);
            embedded_can::Id::Extended(id)
        } else {
            let id = embedded_can::StandardId::new((self.id & STANDARD_ID_MASK) as u16)
                .unwrap_or(embedded_can::StandardId::ZERO);
            embedded_can::Id::Standard(id)
        }
    }

    fn dlc(&self) -> usize {
        self.size as usize
    }

    fn data(&self) -> &[u8] {
        Frame::data(self)
    }
}
