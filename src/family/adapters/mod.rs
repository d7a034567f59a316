//! Adapter implementations for family ports.

pub mod invite_code;
pub mod memory;
pub mod postgres;
