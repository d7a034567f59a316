//! Families, invite codes, and member roles for Homelist.
//!
//! A user founds a family and becomes its permanent admin, or joins an
//! existing family by presenting its invite code. Membership is one-way
//! and a user belongs to at most one family. This context depends only on
//! [`crate::identity`].

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
