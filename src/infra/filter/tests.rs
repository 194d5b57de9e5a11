//! Filter policy tests: allow/drop duality, mode switching, and predicates.
use super::*;

#[test]
/// In ALLOW mode every ID passes until dropped, and allow restores it.
fn test_allow_mode_drop_then_allow() {
    let mut filter = FrameIDFilter::new(FilterMode::Allow);
    for id in [0u32, 1, 0x7FF, 0x1FFF_FFFF] {
        assert!(filter.matches(id));
    }

    filter.drop(0x123);
    assert!(!filter.matches(0x123));
    assert!(filter.matches(0x124));

    filter.allow(0x123);
    assert!(filter.matches(0x123));
    assert!(filter.is_empty());
}

#[test]
/// In DROP mode nothing passes unless allowed.
fn test_drop_mode_allow_then_drop() {
    let mut filter = FrameIDFilter::new(FilterMode::Drop);
    assert!(!filter.matches(0x10));

    filter.allow(0x10);
    assert!(filter.matches(0x10));
    assert!(!filter.matches(0x11));

    filter.drop(0x10);
    assert!(!filter.matches(0x10));
}

#[test]
/// Switching mode resets the exception list instead of reinterpreting it.
fn test_set_mode_clears_entries() {
    let mut filter = FrameIDFilter::new(FilterMode::Allow);
    filter.drop(0x42);
    filter.set_mode(FilterMode::Drop);
    assert_eq!(filter.mode(), FilterMode::Drop);
    assert!(filter.is_empty());
    assert!(!filter.matches(0x42));

    filter.allow(0x42);
    filter.set_mode(FilterMode::Allow);
    assert!(filter.matches(0x42));
    assert!(filter.matches(0x43));
}

#[test]
/// Duplicates are stored but a single removal clears them all.
fn test_duplicates_removed_together() {
    let mut filter = FrameIDFilter::default();
    filter.drop(5);
    filter.drop(5);
    filter.drop(6);
    assert_eq!(filter.len(), 3);
    assert!(!filter.matches(5));

    filter.allow(5);
    assert_eq!(filter.len(), 1);
    assert!(filter.matches(5));
    assert!(!filter.matches(6));
}

#[test]
fn test_clear_keeps_mode() {
    let mut filter = FrameIDFilter::new(FilterMode::Drop);
    filter.allow(1);
    filter.clear();
    assert_eq!(filter.mode(), FilterMode::Drop);
    assert!(!filter.matches(1));
}

#[test]
fn test_storage_grows_by_doubling() {
    let mut filter = FrameIDFilter::default();
    for id in 0..33 {
        filter.drop(id);
    }
    assert_eq!(filter.len(), 33);
    assert!(filter.items.capacity() >= 33);
    assert!((0..33).all(|id| !filter.matches(id)));
}

#[test]
/// Frame-keyed helpers and the `FrameFilter` implementations agree.
fn test_frame_filter_implementations() {
    let frame = Frame::can20(0x200, false, &[1]);
    let mut filter = FrameIDFilter::default();
    filter.drop_frame(&frame);
    assert!(!filter.accept(&frame));
    assert!(!filter.matches_frame(&frame));
    filter.allow_frame(&frame);
    assert!(filter.accept(&frame));

    assert!(PassAll.accept(&frame));
    assert!(!only_extended.accept(&frame));
}

fn only_extended(frame: &Frame<'_>) -> bool {
    frame.ext()
}
