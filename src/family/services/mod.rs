//! Service layer for family membership.

mod membership;

pub use membership::{
    FamilyMembershipError, FamilyMembershipResult, FamilyMembershipService,
    MAX_INVITE_CODE_ATTEMPTS,
};
