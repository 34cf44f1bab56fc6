//! Folder descriptors and the team identity they resolve to

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::ResolveError;
use crate::domain::team::TeamId;

/// Declared category of a folder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FolderType {
    /// Implicit team, access restricted to its members
    Private,
    /// Implicit team, readable by everyone
    Public,
    /// Explicit, named team
    Team,
}

impl FolderType {
    /// Wire code for this folder type
    pub fn code(&self) -> i32 {
        match self {
            Self::Private => 1,
            Self::Public => 2,
            Self::Team => 3,
        }
    }

    /// Map a wire code to a folder type; 0 (unknown) and anything else is
    /// unrecognized
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(Self::Private),
            2 => Some(Self::Public),
            3 => Some(Self::Team),
            _ => None,
        }
    }
}

impl fmt::Display for FolderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Private => write!(f, "PRIVATE"),
            Self::Public => write!(f, "PUBLIC"),
            Self::Team => write!(f, "TEAM"),
        }
    }
}

/// Typed folder descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub name: String,
    pub folder_type: FolderType,
    /// Privacy bit, supplied independently of `folder_type`
    pub private: bool,
}

impl Folder {
    pub fn new(name: impl Into<String>, folder_type: FolderType, private: bool) -> Self {
        Self {
            name: name.into(),
            folder_type,
            private,
        }
    }

    pub fn private(name: impl Into<String>) -> Self {
        Self::new(name, FolderType::Private, true)
    }

    pub fn public(name: impl Into<String>) -> Self {
        Self::new(name, FolderType::Public, false)
    }

    pub fn team(name: impl Into<String>) -> Self {
        Self::new(name, FolderType::Team, true)
    }
}

/// Folder descriptor as it arrives over the wire, folder type still a raw
/// code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderRecord {
    pub name: String,
    pub folder_type: i32,
    pub private: bool,
}

impl TryFrom<FolderRecord> for Folder {
    type Error = ResolveError;

    fn try_from(record: FolderRecord) -> Result<Self, Self::Error> {
        let folder_type = FolderType::from_code(record.folder_type)
            .ok_or(ResolveError::UnrecognizedKind(record.folder_type))?;

        Ok(Self {
            name: record.name,
            folder_type,
            private: record.private,
        })
    }
}

impl From<Folder> for FolderRecord {
    fn from(folder: Folder) -> Self {
        Self {
            name: folder.name,
            folder_type: folder.folder_type.code(),
            private: folder.private,
        }
    }
}

/// Visibility of a resolved folder team
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Visibility {
    Private,
    Public,
}

impl Visibility {
    pub fn from_private_bit(private: bool) -> Self {
        if private { Self::Private } else { Self::Public }
    }

    pub fn is_public(&self) -> bool {
        matches!(self, Self::Public)
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Private => write!(f, "PRIVATE"),
            Self::Public => write!(f, "PUBLIC"),
        }
    }
}

/// Team identity backing a folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderTeam {
    pub team_id: TeamId,
    pub visibility: Visibility,
}
