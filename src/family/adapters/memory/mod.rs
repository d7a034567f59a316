//! In-memory adapter implementations for testing.

mod family;

pub use family::InMemoryFamilyRepository;
