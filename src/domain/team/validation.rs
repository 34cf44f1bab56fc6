//! Team validation

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Errors that can occur during team validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TeamValidationError {
    #[error("Team ID must be {0} lowercase hex characters")]
    InvalidIdLength(usize),

    #[error("Team ID can only contain lowercase hex characters")]
    InvalidIdCharacters,

    #[error("Team ID has unknown type suffix '{0}'")]
    InvalidIdSuffix(String),

    #[error("Team name cannot be empty")]
    EmptyName,

    #[error("Team name cannot have more than {0} parts")]
    TooManyParts(usize),

    #[error("Team name part '{0}' must be between 2 and 16 characters")]
    InvalidPartLength(String),

    #[error("Team name part '{0}' can only contain letters, digits and underscores")]
    InvalidPartCharacters(String),

    #[error("Team name part '{0}' cannot start with an underscore")]
    LeadingUnderscore(String),
}

/// Length of a team ID in hex characters (15 hash bytes + 1 tag byte)
pub const TEAM_ID_HEX_LENGTH: usize = 32;

/// Maximum nesting for subteams, root included
pub const MAX_TEAM_NAME_DEPTH: usize = 16;

const MIN_PART_LENGTH: usize = 2;
const MAX_PART_LENGTH: usize = 16;

static TEAM_ID_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9a-f]+$").unwrap());

static TEAM_NAME_PART_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9_]+$").unwrap());

/// Validate a team ID and return its type tag (the last byte, as hex)
pub fn validate_team_id(id: &str) -> Result<&str, TeamValidationError> {
    if id.len() != TEAM_ID_HEX_LENGTH {
        return Err(TeamValidationError::InvalidIdLength(TEAM_ID_HEX_LENGTH));
    }

    if !TEAM_ID_PATTERN.is_match(id) {
        return Err(TeamValidationError::InvalidIdCharacters);
    }

    let tag = &id[TEAM_ID_HEX_LENGTH - 2..];

    match tag {
        "24" | "25" | "2e" | "2f" => Ok(tag),
        other => Err(TeamValidationError::InvalidIdSuffix(other.to_string())),
    }
}

/// Validate a single, already lowercased, team name part
pub fn validate_team_name_part(part: &str) -> Result<(), TeamValidationError> {
    if part.len() < MIN_PART_LENGTH || part.len() > MAX_PART_LENGTH {
        return Err(TeamValidationError::InvalidPartLength(part.to_string()));
    }

    if !TEAM_NAME_PART_PATTERN.is_match(part) {
        return Err(TeamValidationError::InvalidPartCharacters(part.to_string()));
    }

    if part.starts_with('_') {
        return Err(TeamValidationError::LeadingUnderscore(part.to_string()));
    }

    Ok(())
}
