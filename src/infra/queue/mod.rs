//! Fixed-capacity ring buffer of frames.
//!
//! Storage is allocated once at construction and never grows. Producers that
//! can write straight into the ring use [`Queue::alloc`] followed by
//! [`Queue::commit`], so payload bytes are copied exactly once on the read
//! path. [`Queue::enqueue`] copies an existing frame into the next slot.
use alloc::vec::Vec;

use crate::infra::frame::Frame;

/// Ring buffer of owned frames.
#[derive(Debug)]
pub struct Queue {
    slots: Vec<Frame<'static>>,
    front: usize,
    size: usize,
}

impl Queue {
    /// Queue holding up to `capacity` frames. A zero-capacity queue rejects
    /// every operation.
    pub fn new(capacity: usize) -> Self {
        Self::with_frame_capacity(capacity, 0)
    }

    /// Queue whose slots pre-reserve `frame_capacity` payload bytes each, so
    /// frames up to that size are stored without reallocating.
    pub fn with_frame_capacity(capacity: usize, frame_capacity: u8) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || Frame::with_capacity(frame_capacity, 0x00));
        Self {
            slots,
            front: 0,
            size: 0,
        }
    }

    /// Index of the first free slot. Only meaningful when not full.
    #[inline]
    fn tail(&self) -> usize {
        (self.front + self.size) % self.slots.len()
    }

    /// Writable slot at the next free position, or `None` when full.
    ///
    /// The slot only joins the queue once [`Queue::commit`] is called; any
    /// other mutating call may hand the same slot out again.
    pub fn alloc(&mut self) -> Option<&mut Frame<'static>> {
        if self.full() {
            return None;
        }
        let tail = self.tail();
        Some(&mut self.slots[tail])
    }

    /// Confirm the slot most recently returned by [`Queue::alloc`].
    /// Returns `false` when the queue is full.
    pub fn commit(&mut self) -> bool {
        if self.full() {
            return false;
        }
        self.size += 1;
        true
    }

    /// Copy `frame` into the next free slot. Returns `false` when full.
    pub fn enqueue(&mut self, frame: &Frame<'_>) -> bool {
        match self.alloc() {
            Some(slot) => slot.copy_from(frame),
            None => return false,
        }
        self.commit()
    }

    /// Remove the front frame and return a reference to it. The reference
    /// stays valid until the next mutating call.
    pub fn dequeue(&mut self) -> Option<&Frame<'static>> {
        if self.empty() {
            return None;
        }
        let index = self.front;
        self.front = (self.front + 1) % self.slots.len();
        self.size -= 1;
        Some(&self.slots[index])
    }

    /// Front frame without removing it.
    pub fn peek(&self) -> Option<&Frame<'static>> {
        if self.empty() {
            return None;
        }
        Some(&self.slots[self.front])
    }

    /// Number of queued frames.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Maximum number of queued frames.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn empty(&self) -> bool {
        self.size == 0
    }

    #[inline]
    pub fn full(&self) -> bool {
        self.size >= self.slots.len()
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
