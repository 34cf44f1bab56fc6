//! Folder name parsing
//!
//! Folder names are either bare names (`acme.eng`, `alice,bob#carol`) or
//! full KBFS-style paths (`/keybase/team/acme.eng/docs`,
//! `/keybase/private/alice,bob`). For paths only the folder segment counts;
//! anything below it is ignored.

use crate::domain::folder::{NameParseError, NameParser};
use crate::domain::implicit_team::{ImplicitTeamName, ImplicitTeamNameError};
use crate::domain::team::TeamName;

const TEAM_ROOT: &str = "/keybase/team/";
const PRIVATE_ROOT: &str = "/keybase/private/";
const PUBLIC_ROOT: &str = "/keybase/public/";

/// Parser for the folder naming scheme
#[derive(Debug, Clone, Default)]
pub struct DefaultNameParser;

impl DefaultNameParser {
    pub fn new() -> Self {
        Self
    }
}

impl NameParser for DefaultNameParser {
    fn parse_private_team_path(&self, name: &str) -> Result<TeamName, NameParseError> {
        let segment = if name.starts_with('/') {
            name.strip_prefix(TEAM_ROOT)
                .map(folder_segment)
                .filter(|segment| !segment.is_empty())
                .ok_or_else(|| NameParseError::NotPrivateTeamPath(name.to_string()))?
        } else {
            name
        };

        Ok(TeamName::parse(segment)?)
    }

    fn parse_implicit_team_name(
        &self,
        name: &str,
        is_public: bool,
    ) -> Result<ImplicitTeamName, NameParseError> {
        let segment = if name.starts_with('/') {
            let (rest, path_public) = if let Some(rest) = name.strip_prefix(PRIVATE_ROOT) {
                (rest, false)
            } else if let Some(rest) = name.strip_prefix(PUBLIC_ROOT) {
                (rest, true)
            } else {
                return Err(NameParseError::NotImplicitTeamPath(name.to_string()));
            };

            if path_public != is_public {
                return Err(NameParseError::PathVisibility {
                    name: name.to_string(),
                    path_public,
                });
            }

            folder_segment(rest)
        } else {
            name
        };

        let parsed = ImplicitTeamName::parse(segment)?;

        // Everyone can read a public folder, so it has no reader list
        if is_public && parsed.has_readers() {
            return Err(ImplicitTeamNameError::ReadersOnPublic.into());
        }

        Ok(parsed)
    }
}

fn folder_segment(path: &str) -> &str {
    path.split_once('/').map_or(path, |(head, _)| head)
}
