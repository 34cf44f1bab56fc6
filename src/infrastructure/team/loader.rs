//! Team loader with a read-through cache
//!
//! Non-forced loads are served from the cache when possible, so a team that
//! changed since it was cached (renamed, made public) can be seen stale
//! until its entry expires or a forced load refreshes it.

use std::sync::Arc;

use async_trait::async_trait;
use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::config::TeamCacheConfig;
use crate::domain::context::RequestContext;
use crate::domain::folder::TeamLoader;
use crate::domain::team::{Team, TeamName, TeamRepository};
use crate::domain::DomainError;

/// Loads explicit teams from a repository, caching by name
#[derive(Debug)]
pub struct CachedTeamLoader {
    repository: Arc<dyn TeamRepository>,
    cache: MokaCache<TeamName, Team>,
}

impl CachedTeamLoader {
    pub fn new(repository: Arc<dyn TeamRepository>, config: &TeamCacheConfig) -> Self {
        let cache = MokaCache::builder()
            .max_capacity(config.max_capacity)
            .time_to_live(config.ttl())
            .build();

        Self { repository, cache }
    }

    async fn fetch(&self, name: &TeamName) -> Result<Team, DomainError> {
        let team = self
            .repository
            .get(name)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Team '{}' not found", name)))?;

        debug!(team = %name, team_id = %team.id(), "Loaded team from repository");
        Ok(team)
    }

    /// Drop a cached team so the next load goes to the repository
    pub async fn invalidate(&self, name: &TeamName) {
        self.cache.invalidate(name).await;
    }
}

#[async_trait]
impl TeamLoader for CachedTeamLoader {
    async fn load(
        &self,
        ctx: &RequestContext,
        name: &TeamName,
        force_refresh: bool,
    ) -> Result<Team, DomainError> {
        ctx.check()?;

        if force_refresh {
            let team = self.fetch(name).await?;
            self.cache.insert(name.clone(), team.clone()).await;
            return Ok(team);
        }

        // Concurrent misses for one name share a single repository read
        self.cache
            .try_get_with(name.clone(), self.fetch(name))
            .await
            .map_err(Arc::unwrap_or_clone)
    }
}
