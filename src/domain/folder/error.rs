//! Folder resolution errors

use thiserror::Error;

use super::entity::FolderType;
use crate::domain::implicit_team::ImplicitTeamNameError;
use crate::domain::team::TeamValidationError;
use crate::domain::DomainError;

/// Errors raised while parsing a folder name into a team name or a set of
/// member assertions
#[derive(Debug, Error, Clone, PartialEq)]
pub enum NameParseError {
    #[error("'{0}' is not a private team folder")]
    NotPrivateTeamPath(String),

    #[error("'{0}' is not an implicit team folder")]
    NotImplicitTeamPath(String),

    #[error(
        "'{name}' is a {} folder path but the folder is {}",
        path_visibility(.path_public),
        folder_visibility(.path_public)
    )]
    PathVisibility { name: String, path_public: bool },

    #[error("Invalid team name: {0}")]
    TeamName(#[from] TeamValidationError),

    #[error("Invalid implicit team name: {0}")]
    ImplicitTeamName(#[from] ImplicitTeamNameError),
}

fn path_visibility(path_public: &bool) -> &'static str {
    if *path_public { "public" } else { "private" }
}

fn folder_visibility(path_public: &bool) -> &'static str {
    path_visibility(&!*path_public)
}

/// Why a folder could not be resolved to a team
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("folder type {folder_type} but private bit is {private}")]
    Consistency { folder_type: FolderType, private: bool },

    #[error("unrecognized folder type: {0}")]
    UnrecognizedKind(i32),

    #[error("public team-backed folders are not supported")]
    Unsupported,

    #[error("failed to parse folder name '{name}': {source}")]
    NameParse {
        name: String,
        #[source]
        source: NameParseError,
    },

    #[error("failed to format implicit team name: {0}")]
    Format(#[source] DomainError),

    #[error("implicit team lookup failed: {0}")]
    LookupCreate(#[source] DomainError),

    #[error("team load failed: {0}")]
    TeamLoad(#[source] DomainError),

    #[error("team publicity mismatch folder:{folder_public} != team:{team_public}")]
    VisibilityMismatch { folder_public: bool, team_public: bool },
}

/// Classification of a [`ResolveError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolveErrorKind {
    Consistency,
    UnrecognizedKind,
    Unsupported,
    NameParse,
    Format,
    LookupCreate,
    TeamLoad,
    VisibilityMismatch,
}

impl ResolveError {
    pub fn kind(&self) -> ResolveErrorKind {
        match self {
            Self::Consistency { .. } => ResolveErrorKind::Consistency,
            Self::UnrecognizedKind(_) => ResolveErrorKind::UnrecognizedKind,
            Self::Unsupported => ResolveErrorKind::Unsupported,
            Self::NameParse { .. } => ResolveErrorKind::NameParse,
            Self::Format(_) => ResolveErrorKind::Format,
            Self::LookupCreate(_) => ResolveErrorKind::LookupCreate,
            Self::TeamLoad(_) => ResolveErrorKind::TeamLoad,
            Self::VisibilityMismatch { .. } => ResolveErrorKind::VisibilityMismatch,
        }
    }

    /// True when a collaborator call was cut short by the request context
    pub fn is_interrupted(&self) -> bool {
        match self {
            Self::Format(e) | Self::LookupCreate(e) | Self::TeamLoad(e) => e.is_interrupted(),
            _ => false,
        }
    }
}
