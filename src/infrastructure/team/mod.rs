//! Team infrastructure implementations

mod loader;
mod repository;

pub use loader::CachedTeamLoader;
pub use repository::StorageTeamRepository;
