//! Infrastructure layer - Concrete collaborators for folder resolution

pub mod implicit_team;
pub mod logging;
pub mod naming;
pub mod storage;
pub mod team;
