//! Canonical display names for implicit teams

use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::domain::context::RequestContext;
use crate::domain::folder::DisplayNameFormatter;
use crate::domain::implicit_team::{CanonicalName, ImplicitTeamName};
use crate::domain::DomainError;

/// Formats implicit team names into their canonical form: writers sorted
/// and deduplicated, then `#` and the sorted readers that are not also
/// writers, then the conflict suffix if any.
#[derive(Debug, Clone, Default)]
pub struct CanonicalFormatter;

impl CanonicalFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn canonicalize(name: &ImplicitTeamName) -> CanonicalName {
        let writers: BTreeSet<String> = name.writers.iter().map(ToString::to_string).collect();
        let readers: BTreeSet<String> = name
            .readers
            .iter()
            .map(ToString::to_string)
            .filter(|reader| !writers.contains(reader))
            .collect();

        let mut display = writers.into_iter().collect::<Vec<_>>().join(",");

        if !readers.is_empty() {
            display.push('#');
            display.push_str(&readers.into_iter().collect::<Vec<_>>().join(","));
        }

        if let Some(conflict) = &name.conflict {
            display.push_str(&conflict.to_string());
        }

        CanonicalName::new(display)
    }
}

#[async_trait]
impl DisplayNameFormatter for CanonicalFormatter {
    async fn format(
        &self,
        ctx: &RequestContext,
        name: &ImplicitTeamName,
    ) -> Result<CanonicalName, DomainError> {
        ctx.check()?;
        Ok(Self::canonicalize(name))
    }
}
