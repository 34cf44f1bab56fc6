//! Implicit team names: `writers[#readers][ (conflicted copy YYYY-MM-DD[ #N])]`

use std::fmt;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::assertion::Assertion;
use super::validation::ImplicitTeamNameError;

static CONFLICT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<base>.+) \(conflicted copy (?P<date>\d{4}-\d{2}-\d{2})(?: #(?P<number>\d+))?\)$")
        .unwrap()
});

const CONFLICT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Marks one of several implicit teams that were created for the same
/// membership and later had to be told apart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConflictInfo {
    pub date: NaiveDate,
    /// Generation on that date, starting at 1
    pub number: u32,
}

impl fmt::Display for ConflictInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let date = self.date.format(CONFLICT_DATE_FORMAT);

        if self.number > 1 {
            write!(f, " (conflicted copy {} #{})", date, self.number)
        } else {
            write!(f, " (conflicted copy {})", date)
        }
    }
}

/// Parsed set of member assertions naming an implicit team
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImplicitTeamName {
    pub writers: Vec<Assertion>,
    pub readers: Vec<Assertion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conflict: Option<ConflictInfo>,
}

impl ImplicitTeamName {
    /// Parse an implicit team name as written in a folder name
    pub fn parse(name: &str) -> Result<Self, ImplicitTeamNameError> {
        let name = name.trim();

        if name.is_empty() {
            return Err(ImplicitTeamNameError::EmptyName);
        }

        let (members, conflict) = split_conflict(name)?;

        let (writers, readers) = match members.split_once('#') {
            Some((writers, readers)) => {
                if readers.trim().is_empty() {
                    return Err(ImplicitTeamNameError::EmptyReaders);
                }
                (writers, parse_assertions(readers)?)
            }
            None => (members, Vec::new()),
        };

        if writers.trim().is_empty() {
            return Err(ImplicitTeamNameError::NoWriters);
        }

        Ok(Self {
            writers: parse_assertions(writers)?,
            readers,
            conflict,
        })
    }

    pub fn has_readers(&self) -> bool {
        !self.readers.is_empty()
    }
}

fn split_conflict(name: &str) -> Result<(&str, Option<ConflictInfo>), ImplicitTeamNameError> {
    let Some(captures) = CONFLICT_PATTERN.captures(name) else {
        return Ok((name, None));
    };

    let base = captures.name("base").map_or(name, |m| m.as_str());
    let date_str = captures.name("date").map_or("", |m| m.as_str());

    let date = NaiveDate::parse_from_str(date_str, CONFLICT_DATE_FORMAT)
        .map_err(|e| ImplicitTeamNameError::InvalidConflict(format!("{}: {}", date_str, e)))?;

    let number = match captures.name("number") {
        Some(m) => m
            .as_str()
            .parse::<u32>()
            .ok()
            .filter(|n| *n >= 1)
            .ok_or_else(|| {
                ImplicitTeamNameError::InvalidConflict(format!("bad number '{}'", m.as_str()))
            })?,
        None => 1,
    };

    Ok((base, Some(ConflictInfo { date, number })))
}

fn parse_assertions(list: &str) -> Result<Vec<Assertion>, ImplicitTeamNameError> {
    list.split(',').map(Assertion::parse).collect()
}

/// Canonical display form of an implicit team name; the stable lookup key
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalName(String);

impl CanonicalName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CanonicalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
