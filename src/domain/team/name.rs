//! Hierarchical team names (`acme`, `acme.eng`, `acme.eng.infra`)

use serde::{Deserialize, Serialize};

use super::validation::{validate_team_name_part, TeamValidationError, MAX_TEAM_NAME_DEPTH};
use crate::domain::storage::StorageKey;

/// A validated, lowercased, dot-separated team name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TeamName {
    /// Joined form, kept so the name can serve as a storage key
    joined: String,
    parts: Vec<String>,
}

impl TeamName {
    /// Parse and normalize a team name
    pub fn parse(name: &str) -> Result<Self, TeamValidationError> {
        if name.is_empty() {
            return Err(TeamValidationError::EmptyName);
        }

        let parts: Vec<String> = name.split('.').map(str::to_lowercase).collect();

        if parts.len() > MAX_TEAM_NAME_DEPTH {
            return Err(TeamValidationError::TooManyParts(MAX_TEAM_NAME_DEPTH));
        }

        for part in &parts {
            validate_team_name_part(part)?;
        }

        Ok(Self::from_parts(parts))
    }

    fn from_parts(parts: Vec<String>) -> Self {
        Self {
            joined: parts.join("."),
            parts,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.joined
    }

    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// Number of parts; a root team has depth 1
    pub fn depth(&self) -> usize {
        self.parts.len()
    }

    pub fn is_root(&self) -> bool {
        self.parts.len() == 1
    }

    /// The root team this name belongs to
    pub fn root(&self) -> TeamName {
        Self::from_parts(vec![self.parts[0].clone()])
    }

    /// The immediate parent, or `None` for a root team
    pub fn parent(&self) -> Option<TeamName> {
        if self.is_root() {
            return None;
        }

        Some(Self::from_parts(self.parts[..self.parts.len() - 1].to_vec()))
    }
}

impl TryFrom<String> for TeamName {
    type Error = TeamValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TeamName> for String {
    fn from(name: TeamName) -> Self {
        name.joined
    }
}

impl std::fmt::Display for TeamName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.joined)
    }
}

impl StorageKey for TeamName {
    fn as_str(&self) -> &str {
        &self.joined
    }
}
