//! Implicit team infrastructure implementations

mod formatter;
mod resolver;

pub use formatter::CanonicalFormatter;
pub use resolver::StorageImplicitTeamResolver;
