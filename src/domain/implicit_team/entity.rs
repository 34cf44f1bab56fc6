//! Implicit team entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::name::CanonicalName;
use crate::domain::storage::{StorageEntity, StorageKey};
use crate::domain::team::TeamId;

/// Lookup key: canonical name scoped by publicness
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImplicitTeamKey(String);

impl ImplicitTeamKey {
    pub fn new(display_name: &CanonicalName, is_public: bool) -> Self {
        let scope = if is_public { "public" } else { "private" };
        Self(format!("{}/{}", scope, display_name))
    }
}

impl StorageKey for ImplicitTeamKey {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// A team derived from a set of member assertions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImplicitTeam {
    key: ImplicitTeamKey,
    id: TeamId,
    display_name: CanonicalName,
    is_public: bool,
    created_at: DateTime<Utc>,
}

impl ImplicitTeam {
    /// Create an implicit team whose ID is derived from its lookup key, so
    /// every writer racing on the same key computes the same team
    pub fn new(display_name: CanonicalName, is_public: bool) -> Self {
        let key = ImplicitTeamKey::new(&display_name, is_public);
        let id = TeamId::derive(key.as_str(), is_public, false);

        Self {
            key,
            id,
            display_name,
            is_public,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> &TeamId {
        &self.id
    }

    pub fn display_name(&self) -> &CanonicalName {
        &self.display_name
    }

    pub fn is_public(&self) -> bool {
        self.is_public
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl StorageEntity for ImplicitTeam {
    type Key = ImplicitTeamKey;

    fn key(&self) -> &Self::Key {
        &self.key
    }
}
