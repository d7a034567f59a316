//! User identity and bearer-token sessions for Homelist.
//!
//! Registration, login, and resolution of the current user from a bearer
//! credential. Every other context depends on this one and it depends on
//! none of them. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
