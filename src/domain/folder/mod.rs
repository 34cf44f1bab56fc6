//! Folder domain module
//!
//! A folder is named in a filesystem-like scheme and backed by a team: an
//! implicit team for private and public folders, an explicit team for team
//! folders. [`FolderTeamResolver`] is the bridge between the two.

mod collaborators;
mod entity;
mod error;
mod resolver;

pub use collaborators::{DisplayNameFormatter, ImplicitTeamResolver, NameParser, TeamLoader};
pub use entity::{Folder, FolderRecord, FolderTeam, FolderType, Visibility};
pub use error::{NameParseError, ResolveError, ResolveErrorKind};
pub use resolver::FolderTeamResolver;

#[cfg(test)]
pub use collaborators::{
    MockDisplayNameFormatter, MockImplicitTeamResolver, MockNameParser, MockTeamLoader,
};
