//! Team domain module
//!
//! Explicit teams are named, administratively created groups. Each carries
//! its own authoritative visibility, which folder resolution cross-checks
//! against what the caller asked for.

mod entity;
mod name;
mod repository;
mod validation;

pub use entity::{Team, TeamId};
pub use name::TeamName;
pub use repository::TeamRepository;
pub use validation::{
    validate_team_id, validate_team_name_part, TeamValidationError, MAX_TEAM_NAME_DEPTH,
    TEAM_ID_HEX_LENGTH,
};

#[cfg(test)]
pub use repository::mock;
