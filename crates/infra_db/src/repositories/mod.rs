//! Repository implementations

pub mod claims;
pub mod roles;

pub use claims::ClaimRepository;
pub use roles::RoleRepository;
