//! Layers built on frames: the non-blocking connection contract and its
//! decorators, the controller contract with bitrate negotiation, the
//! RealDash serial bridge and the J1939 view over identifiers.
pub mod connection;
pub mod controller;
pub mod j1939;
pub mod realdash;
