//! Storage-backed lookup-or-create for implicit teams

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::context::RequestContext;
use crate::domain::folder::ImplicitTeamResolver;
use crate::domain::implicit_team::{CanonicalName, ImplicitTeam, ImplicitTeamKey};
use crate::domain::storage::Storage;
use crate::domain::team::TeamId;
use crate::domain::DomainError;

/// Looks implicit teams up by `(canonical name, publicness)` and creates
/// them on first reference.
///
/// Creation relies on the storage rejecting a second create of the same key
/// with a conflict; the loser re-reads the winner's team, so concurrent
/// callers converge on a single team.
#[derive(Debug)]
pub struct StorageImplicitTeamResolver {
    storage: Arc<dyn Storage<ImplicitTeam>>,
}

impl StorageImplicitTeamResolver {
    pub fn new(storage: Arc<dyn Storage<ImplicitTeam>>) -> Self {
        Self { storage }
    }

    /// Look up an existing implicit team without creating one
    pub async fn lookup(
        &self,
        name: &CanonicalName,
        is_public: bool,
    ) -> Result<Option<TeamId>, DomainError> {
        let key = ImplicitTeamKey::new(name, is_public);
        Ok(self.storage.get(&key).await?.map(|team| team.id().clone()))
    }
}

#[async_trait]
impl ImplicitTeamResolver for StorageImplicitTeamResolver {
    async fn lookup_or_create(
        &self,
        ctx: &RequestContext,
        name: &CanonicalName,
        is_public: bool,
    ) -> Result<TeamId, DomainError> {
        ctx.check()?;

        if let Some(team_id) = self.lookup(name, is_public).await? {
            debug!(display_name = %name, team_id = %team_id, "Found implicit team");
            return Ok(team_id);
        }

        match self.storage.create(ImplicitTeam::new(name.clone(), is_public)).await {
            Ok(team) => {
                info!(
                    display_name = %name,
                    team_id = %team.id(),
                    is_public,
                    "Created implicit team"
                );
                Ok(team.id().clone())
            }
            Err(e) if e.is_conflict() => {
                debug!(display_name = %name, "Implicit team created concurrently, re-reading");

                self.lookup(name, is_public).await?.ok_or_else(|| {
                    DomainError::internal(format!(
                        "Implicit team '{}' missing after conflicting create",
                        name
                    ))
                })
            }
            Err(e) => Err(e),
        }
    }
}
