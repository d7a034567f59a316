//! Adapter implementations for identity ports.

pub mod hashing;
pub mod jwt;
pub mod memory;
pub mod postgres;
