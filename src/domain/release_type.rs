use crate::error::{ReleaseError, Result};
use std::fmt;
use std::str::FromStr;

/// The kind of release being cut
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseType {
    Weekly,
    Minor,
    Major,
    Beta,
    Rc,
    OnDemand,
    OnSync,
    BackToDev,
}

impl ReleaseType {
    /// All release types in their command-line spelling
    pub const ALL: [ReleaseType; 8] = [
        ReleaseType::Weekly,
        ReleaseType::Minor,
        ReleaseType::Major,
        ReleaseType::Beta,
        ReleaseType::Rc,
        ReleaseType::OnDemand,
        ReleaseType::OnSync,
        ReleaseType::BackToDev,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReleaseType::Weekly => "weekly",
            ReleaseType::Minor => "minor",
            ReleaseType::Major => "major",
            ReleaseType::Beta => "beta",
            ReleaseType::Rc => "rc",
            ReleaseType::OnDemand => "on-demand",
            ReleaseType::OnSync => "on-sync",
            ReleaseType::BackToDev => "back-to-dev",
        }
    }
}

impl FromStr for ReleaseType {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        ReleaseType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ReleaseError::InvalidReleaseType(s.to_string()))
    }
}

impl fmt::Display for ReleaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
