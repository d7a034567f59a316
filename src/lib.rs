//! Homelist: shared and personal task lists for households.
//!
//! Users belong to at most one family, keep personal lists, share family
//! lists, and assign tasks to one another under an admin/member rule.
//!
//! # Architecture
//!
//! Homelist follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, hashing, tokens)
//!
//! # Modules
//!
//! - [`identity`]: Registration, login, and bearer-token sessions
//! - [`family`]: Families, invite codes, and admin/member roles
//! - [`board`]: Personal and family lists with their tasks
//! - [`views`]: Read-view invalidation after each mutation
//! - [`api`]: Transport-agnostic request surface and error envelope
//! - [`config`]: Environment-driven configuration

pub mod api;
pub mod board;
pub mod config;
pub mod family;
pub mod identity;
pub mod views;
