//! Ring buffer tests: FIFO ordering, bounds, and in-place allocation.
use super::*;
use alloc::vec::Vec;

fn frame(n: u8) -> Frame<'static> {
    Frame::can20(n as u32, false, &[n, n.wrapping_add(1)])
}

#[test]
/// Dequeued frames come out in the order they were enqueued, across several
/// wrap-arounds, and the size never exceeds the capacity.
fn test_fifo_order_with_wraparound() {
    let mut queue = Queue::new(3);
    let mut expected = Vec::new();
    let mut received = Vec::new();

    for round in 0..30u8 {
        if queue.full() {
            received.push(queue.dequeue().unwrap().clone());
            assert!(queue.size() <= queue.capacity());
        }
        assert!(queue.enqueue(&frame(round)));
        expected.push(frame(round));
        assert!(queue.size() <= queue.capacity());
    }
    while let Some(f) = queue.dequeue() {
        received.push(f.clone());
    }

    assert_eq!(received.len(), 30);
    assert_eq!(received, expected);
}

#[test]
/// A full queue rejects new frames and keeps its content.
fn test_enqueue_rejected_when_full() {
    let mut queue = Queue::new(2);
    assert!(queue.enqueue(&frame(1)));
    assert!(queue.enqueue(&frame(2)));
    assert!(queue.full());
    assert!(!queue.enqueue(&frame(3)));
    assert!(queue.alloc().is_none());
    assert!(!queue.commit());
    assert_eq!(queue.size(), 2);
    assert_eq!(queue.dequeue(), Some(&frame(1)));
}

#[test]
fn test_peek_does_not_remove() {
    let mut queue = Queue::new(2);
    assert!(queue.peek().is_none());
    queue.enqueue(&frame(4));
    assert_eq!(queue.peek(), Some(&frame(4)));
    assert_eq!(queue.size(), 1);
    assert_eq!(queue.dequeue(), Some(&frame(4)));
    assert!(queue.empty());
    assert!(queue.dequeue().is_none());
}

#[test]
/// Frames written through `alloc` only become visible after `commit`.
fn test_alloc_then_commit() {
    let mut queue = Queue::with_frame_capacity(2, 8);
    {
        let slot = queue.alloc().unwrap();
        assert_eq!(slot.capacity(), 8);
        slot.set_id(0x55, true);
        slot.set_data(&[1, 2, 3]);
    }
    assert!(queue.empty());

    // An uncommitted slot is handed out again.
    queue.alloc().unwrap().set_data(&[9]);
    assert!(queue.commit());
    assert_eq!(queue.size(), 1);

    let front = queue.dequeue().unwrap();
    assert_eq!(front.id(), 0x55);
    assert_eq!(front.data(), &[9]);
}

#[test]
fn test_zero_capacity_rejects_everything() {
    let mut queue = Queue::new(0);
    assert!(queue.full());
    assert!(queue.empty());
    assert!(queue.alloc().is_none());
    assert!(!queue.enqueue(&frame(1)));
    assert!(queue.dequeue().is_none());
    assert!(queue.peek().is_none());
}
