//! Team entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::name::TeamName;
use super::validation::{validate_team_id, TeamValidationError};
use crate::domain::storage::StorageEntity;

const PRIVATE_ROOT_TAG: &str = "24";
const PRIVATE_SUBTEAM_TAG: &str = "25";
const PUBLIC_ROOT_TAG: &str = "2e";
const PUBLIC_SUBTEAM_TAG: &str = "2f";

/// Number of hash bytes kept before the type tag
const TEAM_ID_HASH_BYTES: usize = 15;

/// Team identifier - 32 lowercase hex characters, the last byte tags
/// publicness and whether the team is a subteam
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TeamId(String);

impl TeamId {
    /// Create a new TeamId after validation
    pub fn new(id: impl Into<String>) -> Result<Self, TeamValidationError> {
        let id = id.into();
        validate_team_id(&id)?;
        Ok(Self(id))
    }

    /// Derive a stable ID from a seed and the team's kind
    pub fn derive(seed: &str, is_public: bool, is_subteam: bool) -> Self {
        let digest = Sha256::digest(seed.as_bytes());
        let tag = match (is_public, is_subteam) {
            (false, false) => PRIVATE_ROOT_TAG,
            (false, true) => PRIVATE_SUBTEAM_TAG,
            (true, false) => PUBLIC_ROOT_TAG,
            (true, true) => PUBLIC_SUBTEAM_TAG,
        };

        Self(format!("{}{}", hex::encode(&digest[..TEAM_ID_HASH_BYTES]), tag))
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn tag(&self) -> &str {
        &self.0[self.0.len() - 2..]
    }

    pub fn is_public(&self) -> bool {
        matches!(self.tag(), PUBLIC_ROOT_TAG | PUBLIC_SUBTEAM_TAG)
    }

    pub fn is_subteam(&self) -> bool {
        matches!(self.tag(), PRIVATE_SUBTEAM_TAG | PUBLIC_SUBTEAM_TAG)
    }
}

impl TryFrom<String> for TeamId {
    type Error = TeamValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TeamId> for String {
    fn from(id: TeamId) -> Self {
        id.0
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Explicit (named) team entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    /// Unique identifier
    id: TeamId,
    /// Hierarchical name
    name: TeamName,
    /// Whether the team is publicly visible
    is_public: bool,
    /// Creation timestamp
    created_at: DateTime<Utc>,
}

impl Team {
    /// Create a team with an ID derived from its name
    pub fn new(name: TeamName, is_public: bool) -> Self {
        let id = TeamId::derive(name.as_str(), is_public, !name.is_root());
        Self::with_id(id, name, is_public)
    }

    /// Create a team with a caller-supplied ID
    pub fn with_id(id: TeamId, name: TeamName, is_public: bool) -> Self {
        Self {
            id,
            name,
            is_public,
            created_at: Utc::now(),
        }
    }

    // Getters

    pub fn id(&self) -> &TeamId {
        &self.id
    }

    pub fn name(&self) -> &TeamName {
        &self.name
    }

    pub fn is_public(&self) -> bool {
        self.is_public
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl StorageEntity for Team {
    type Key = TeamName;

    fn key(&self) -> &Self::Key {
        &self.name
    }
}
