//! Domain layer - Folder, team and implicit team types, the collaborator
//! seams and the folder resolver

pub mod context;
pub mod error;
pub mod folder;
pub mod implicit_team;
pub mod storage;
pub mod team;

pub use context::RequestContext;
pub use error::DomainError;
pub use folder::{
    DisplayNameFormatter, Folder, FolderRecord, FolderTeam, FolderTeamResolver, FolderType,
    ImplicitTeamResolver, NameParseError, NameParser, ResolveError, ResolveErrorKind, TeamLoader,
    Visibility,
};
pub use implicit_team::{
    Assertion, CanonicalName, ConflictInfo, ImplicitTeam, ImplicitTeamKey, ImplicitTeamName,
    ImplicitTeamNameError,
};
pub use storage::{Storage, StorageEntity, StorageKey};
pub use team::{Team, TeamId, TeamName, TeamRepository, TeamValidationError};
