//! Self-contained building blocks: the frame type, the ring buffer queuing
//! frames, and ID based filtering.
pub mod filter;
pub mod frame;
pub mod queue;
