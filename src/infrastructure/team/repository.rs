//! Storage-backed team repository implementation

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::storage::Storage;
use crate::domain::team::{Team, TeamName, TeamRepository};
use crate::domain::DomainError;

/// Storage-backed implementation of TeamRepository
#[derive(Debug)]
pub struct StorageTeamRepository {
    storage: Arc<dyn Storage<Team>>,
}

impl StorageTeamRepository {
    /// Create a new storage-backed repository
    pub fn new(storage: Arc<dyn Storage<Team>>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl TeamRepository for StorageTeamRepository {
    async fn get(&self, name: &TeamName) -> Result<Option<Team>, DomainError> {
        self.storage.get(name).await
    }

    async fn create(&self, team: Team) -> Result<Team, DomainError> {
        if let Some(parent) = team.name().parent() {
            if !self.storage.exists(&parent).await? {
                return Err(DomainError::validation(format!(
                    "Parent team '{}' does not exist",
                    parent
                )));
            }
        }

        let name = team.name().clone();

        self.storage.create(team).await.map_err(|e| {
            if e.is_conflict() {
                DomainError::conflict(format!("Team '{}' already exists", name))
            } else {
                e
            }
        })
    }

    async fn update(&self, team: Team) -> Result<Team, DomainError> {
        self.storage.update(team).await
    }

    async fn exists(&self, name: &TeamName) -> Result<bool, DomainError> {
        self.storage.exists(name).await
    }
}
