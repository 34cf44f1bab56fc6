//! Folder Teamer
//!
//! Resolves folder descriptors (a name, a declared folder type and a privacy
//! bit) to the team that backs the folder:
//! - Private and public folders map to implicit teams, created on first use
//! - Team folders map to explicit, named teams
//! - The resolved visibility always follows the folder's privacy bit, and a
//!   team whose own visibility disagrees is rejected

pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
pub use domain::{
    Folder, FolderRecord, FolderTeam, FolderTeamResolver, FolderType, RequestContext,
    ResolveError, ResolveErrorKind, Visibility,
};

use std::sync::Arc;

use domain::implicit_team::ImplicitTeam;
use domain::team::{Team, TeamRepository};
use infrastructure::{
    implicit_team::{CanonicalFormatter, StorageImplicitTeamResolver},
    logging,
    naming::DefaultNameParser,
    storage::InMemoryStorage,
    team::{CachedTeamLoader, StorageTeamRepository},
};
use tracing::info;

/// Load `.env`, read configuration and install logging
pub fn bootstrap() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    logging::init_logging(&config.logging)?;

    Ok(config)
}

/// A resolver wired to in-memory team and implicit-team storage
#[derive(Debug, Clone)]
pub struct InMemoryTeamer {
    pub teams: Arc<StorageTeamRepository>,
    pub team_loader: Arc<CachedTeamLoader>,
    pub implicit_teams: Arc<StorageImplicitTeamResolver>,
    pub resolver: FolderTeamResolver,
}

impl InMemoryTeamer {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_teams(config, Vec::new())
    }

    /// Build with explicit teams already registered
    pub fn with_teams(config: &AppConfig, teams: Vec<Team>) -> Self {
        info!(
            teams = teams.len(),
            cache_capacity = config.team_cache.max_capacity,
            "Creating in-memory folder teamer"
        );

        let teams = Arc::new(StorageTeamRepository::new(Arc::new(
            InMemoryStorage::<Team>::with_entities(teams),
        )));
        let team_loader = Arc::new(CachedTeamLoader::new(
            teams.clone() as Arc<dyn TeamRepository>,
            &config.team_cache,
        ));
        let implicit_teams = Arc::new(StorageImplicitTeamResolver::new(Arc::new(
            InMemoryStorage::<ImplicitTeam>::new(),
        )));

        let resolver = FolderTeamResolver::new(
            Arc::new(DefaultNameParser::new()),
            Arc::new(CanonicalFormatter::new()),
            team_loader.clone(),
            implicit_teams.clone(),
        );

        Self {
            teams,
            team_loader,
            implicit_teams,
            resolver,
        }
    }
}
