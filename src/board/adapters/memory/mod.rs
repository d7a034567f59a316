//! In-memory adapter implementations for testing.

mod board;

pub use board::InMemoryBoardStore;
