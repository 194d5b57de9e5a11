//! Frame filtering by identifier.
//!
//! [`FrameIDFilter`] keeps a list of exceptions to a default policy: in
//! [`FilterMode::Allow`] the listed IDs are dropped, in [`FilterMode::Drop`]
//! the listed IDs are allowed. [`FrameFilter`] is the predicate contract the
//! connection decorators accept; closures and [`PassAll`] implement it too.
use alloc::vec::Vec;

use crate::infra::frame::Frame;

/// Predicate deciding whether a frame goes through.
pub trait FrameFilter {
    /// Return `true` to let `frame` pass.
    fn accept(&self, frame: &Frame<'_>) -> bool;
}

impl<F> FrameFilter for F
where
    F: Fn(&Frame<'_>) -> bool,
{
    #[inline]
    fn accept(&self, frame: &Frame<'_>) -> bool {
        self(frame)
    }
}

/// Filter letting every frame through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassAll;

impl FrameFilter for PassAll {
    #[inline]
    fn accept(&self, _frame: &Frame<'_>) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Default policy of a [`FrameIDFilter`].
pub enum FilterMode {
    /// All frames are allowed unless dropped explicitly.
    #[default]
    Allow,
    /// All frames are dropped unless allowed explicitly.
    Drop,
}

/// Configurable allow/drop filter keyed by frame ID.
#[derive(Debug, Clone, Default)]
pub struct FrameIDFilter {
    mode: FilterMode,
    items: Vec<u32>,
}

impl FrameIDFilter {
    /// Empty filter with the given default policy.
    pub const fn new(mode: FilterMode) -> Self {
        Self {
            mode,
            items: Vec::new(),
        }
    }

    /// Current default policy.
    #[inline]
    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    /// Clear every exception, then switch to `mode`.
    pub fn set_mode(&mut self, mode: FilterMode) {
        self.clear();
        self.mode = mode;
    }

    /// Let `frame_id` through.
    pub fn allow(&mut self, frame_id: u32) {
        match self.mode {
            FilterMode::Allow => self.remove(frame_id),
            FilterMode::Drop => self.add(frame_id),
        }
    }

    /// Stop `frame_id` from going through.
    pub fn drop(&mut self, frame_id: u32) {
        match self.mode {
            FilterMode::Allow => self.add(frame_id),
            FilterMode::Drop => self.remove(frame_id),
        }
    }

    /// [`FrameIDFilter::allow`] keyed on the frame's ID.
    pub fn allow_frame(&mut self, frame: &Frame<'_>) {
        self.allow(frame.id());
    }

    /// [`FrameIDFilter::drop`] keyed on the frame's ID.
    pub fn drop_frame(&mut self, frame: &Frame<'_>) {
        self.drop(frame.id());
    }

    /// Remove every exception. The mode is kept.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Number of stored exceptions, duplicates included.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// `true` when a frame with `frame_id` is allowed through.
    pub fn matches(&self, frame_id: u32) -> bool {
        if self.items.contains(&frame_id) {
            return self.mode != FilterMode::Allow;
        }
        self.mode == FilterMode::Allow
    }

    /// [`FrameIDFilter::matches`] keyed on the frame's ID.
    pub fn matches_frame(&self, frame: &Frame<'_>) -> bool {
        self.matches(frame.id())
    }

    fn add(&mut self, frame_id: u32) {
        self.reserve();
        self.items.push(frame_id);

        #[cfg(feature = "defmt")]
        defmt::trace!("filter: added {=u32:X}, {} items", frame_id, self.items.len());
    }

    // Removes every occurrence.
    fn remove(&mut self, frame_id: u32) {
        self.items.retain(|item| *item != frame_id);

        #[cfg(feature = "defmt")]
        defmt::trace!("filter: removed {=u32:X}, {} items", frame_id, self.items.len());
    }

    /// Make room for one more item, doubling the storage when full.
    fn reserve(&mut self) {
        let capacity = self.items.capacity();
        if self.items.len() < capacity {
            return;
        }
        self.items.reserve_exact(capacity.max(1));
    }
}

impl FrameFilter for FrameIDFilter {
    #[inline]
    fn accept(&self, frame: &Frame<'_>) -> bool {
        self.matches(frame.id())
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
