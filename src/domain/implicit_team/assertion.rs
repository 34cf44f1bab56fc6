//! Member identity assertions (`alice`, `bob@twitter`)

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::validation::ImplicitTeamNameError;

static USERNAME_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z0-9_]{2,16}$").unwrap());

static SERVICE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z][a-z0-9]{1,15}$").unwrap());

static SOCIAL_USERNAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9_.-]{1,64}$").unwrap());

/// Service name that denotes a native user; `alice@keybase` is just `alice`
const NATIVE_SERVICE: &str = "keybase";

/// A single member assertion, either a native user or a user on a social
/// service
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum Assertion {
    User { username: String },
    Social { username: String, service: String },
}

impl Assertion {
    /// Parse one assertion; input is trimmed and lowercased
    pub fn parse(raw: &str) -> Result<Self, ImplicitTeamNameError> {
        let raw = raw.trim().to_lowercase();

        if raw.is_empty() {
            return Err(ImplicitTeamNameError::EmptyAssertion);
        }

        match raw.split_once('@') {
            None => Self::user(&raw),
            Some((username, NATIVE_SERVICE)) => Self::user(username),
            Some((username, service)) => {
                if !SERVICE_PATTERN.is_match(service) {
                    return Err(ImplicitTeamNameError::InvalidService(service.to_string()));
                }

                if !SOCIAL_USERNAME_PATTERN.is_match(username) {
                    return Err(ImplicitTeamNameError::InvalidUsername(raw.clone()));
                }

                Ok(Self::Social {
                    username: username.to_string(),
                    service: service.to_string(),
                })
            }
        }
    }

    fn user(username: &str) -> Result<Self, ImplicitTeamNameError> {
        if !USERNAME_PATTERN.is_match(username) {
            return Err(ImplicitTeamNameError::InvalidUsername(username.to_string()));
        }

        Ok(Self::User {
            username: username.to_string(),
        })
    }

    pub fn username(&self) -> &str {
        match self {
            Self::User { username } | Self::Social { username, .. } => username,
        }
    }

    pub fn service(&self) -> Option<&str> {
        match self {
            Self::User { .. } => None,
            Self::Social { service, .. } => Some(service),
        }
    }
}

impl fmt::Display for Assertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User { username } => write!(f, "{}", username),
            Self::Social { username, service } => write!(f, "{}@{}", username, service),
        }
    }
}
