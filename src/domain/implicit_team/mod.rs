//! Implicit team domain module
//!
//! Implicit teams are not administered; they exist because a folder names a
//! set of members, and are created on first reference.

mod assertion;
mod entity;
mod name;
mod validation;

pub use assertion::Assertion;
pub use entity::{ImplicitTeam, ImplicitTeamKey};
pub use name::{CanonicalName, ConflictInfo, ImplicitTeamName};
pub use validation::ImplicitTeamNameError;
