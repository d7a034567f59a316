//! Port contracts for family membership.

pub mod invite_code;
pub mod repository;

pub use invite_code::InviteCodeGenerator;
pub use repository::{FamilyRepository, FamilyRepositoryError, FamilyRepositoryResult};

#[cfg(test)]
pub use invite_code::MockInviteCodeGenerator;
#[cfg(test)]
pub use repository::MockFamilyRepository;
