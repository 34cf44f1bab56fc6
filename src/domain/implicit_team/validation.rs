//! Implicit team name validation

use thiserror::Error;

/// Errors that can occur while parsing an implicit team name
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ImplicitTeamNameError {
    #[error("Implicit team name cannot be empty")]
    EmptyName,

    #[error("Implicit team name must have at least one writer")]
    NoWriters,

    #[error("Reader list cannot be empty after '#'")]
    EmptyReaders,

    #[error("Assertion cannot be empty")]
    EmptyAssertion,

    #[error("Invalid username in assertion '{0}'")]
    InvalidUsername(String),

    #[error("Invalid service '{0}'")]
    InvalidService(String),

    #[error("Public implicit teams cannot have readers")]
    ReadersOnPublic,

    #[error("Invalid conflict suffix: {0}")]
    InvalidConflict(String),
}
