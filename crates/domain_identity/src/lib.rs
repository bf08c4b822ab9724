//! Identity Domain
//!
//! This crate derives what a user is allowed to do from their role
//! assignments. Roles come from an external directory; capability resolution
//! is a pure function over that input, and the resulting [`Actor`] value is
//! passed explicitly into every operation that needs to know who is acting.

pub mod role;
pub mod capability;
pub mod ports;

pub use role::{Role, RoleAssignment, RoleError};
pub use capability::{resolve_capabilities, Actor, Capability, CapabilitySet};
pub use ports::RoleDirectory;
