//! Collaborators the folder resolver delegates to

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use super::error::NameParseError;
use crate::domain::context::RequestContext;
use crate::domain::implicit_team::{CanonicalName, ImplicitTeamName};
use crate::domain::team::{Team, TeamId, TeamName};
use crate::domain::DomainError;

/// Turns raw folder names into structured names. Each folder kind has its own
/// grammar.
#[cfg_attr(test, automock)]
pub trait NameParser: Send + Sync {
    /// Parse a private team folder name (`acme.eng` or `/keybase/team/acme.eng`)
    fn parse_private_team_path(&self, name: &str) -> Result<TeamName, NameParseError>;

    /// Parse an implicit team folder name (`alice,bob#carol`) for a folder
    /// of the given publicness. A public folder has no readers, and a path
    /// prefix must agree with `is_public`.
    fn parse_implicit_team_name(
        &self,
        name: &str,
        is_public: bool,
    ) -> Result<ImplicitTeamName, NameParseError>;
}

/// Renders a parsed implicit team name in its canonical form
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DisplayNameFormatter: Send + Sync {
    async fn format(
        &self,
        ctx: &RequestContext,
        name: &ImplicitTeamName,
    ) -> Result<CanonicalName, DomainError>;
}

/// Loads explicit teams by name
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TeamLoader: Send + Sync {
    /// Load a team. With `force_refresh` false a cached copy may be returned.
    async fn load(
        &self,
        ctx: &RequestContext,
        name: &TeamName,
        force_refresh: bool,
    ) -> Result<Team, DomainError>;
}

/// Maps a canonical implicit team name to a team, creating it when absent.
///
/// Implementations must be idempotent per `(name, is_public)`: concurrent
/// callers converge on one team ID and at most one team is created.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ImplicitTeamResolver: Send + Sync {
    async fn lookup_or_create(
        &self,
        ctx: &RequestContext,
        name: &CanonicalName,
        is_public: bool,
    ) -> Result<TeamId, DomainError>;
}
