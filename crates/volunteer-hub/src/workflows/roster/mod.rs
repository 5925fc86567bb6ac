//! Member roster: registration, profile upkeep, verification, and activation.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Member, MemberFilter, MemberId, MemberStatus, NewMember, ProfileUpdate, Registration, Role,
};
pub use repository::MemberRepository;
pub use router::roster_router;
pub use service::{RosterError, RosterService};
