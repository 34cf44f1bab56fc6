//! Team repository trait

use async_trait::async_trait;

use super::entity::Team;
use super::name::TeamName;
use crate::domain::DomainError;

/// Repository for explicit teams, keyed by name
#[async_trait]
pub trait TeamRepository: Send + Sync + std::fmt::Debug {
    /// Get a team by name
    async fn get(&self, name: &TeamName) -> Result<Option<Team>, DomainError>;

    /// Create a new team
    async fn create(&self, team: Team) -> Result<Team, DomainError>;

    /// Replace an existing team (renames and visibility changes land here)
    async fn update(&self, team: Team) -> Result<Team, DomainError>;

    /// Check if a team exists
    async fn exists(&self, name: &TeamName) -> Result<bool, DomainError>;
}
