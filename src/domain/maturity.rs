//! Release maturity levels as written in `version.php`

use crate::error::{ReleaseError, Result};
use std::fmt;
use std::str::FromStr;

/// Coarse quality signal attached to every release
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Maturity {
    Alpha,
    Beta,
    Rc,
    Stable,
}

impl Maturity {
    /// The PHP constant name, e.g. `MATURITY_STABLE`
    pub fn as_constant(&self) -> &'static str {
        match self {
            Maturity::Alpha => "MATURITY_ALPHA",
            Maturity::Beta => "MATURITY_BETA",
            Maturity::Rc => "MATURITY_RC",
            Maturity::Stable => "MATURITY_STABLE",
        }
    }
}

impl FromStr for Maturity {
    type Err = ReleaseError;

    /// Accepts the constant form (`MATURITY_BETA`) or the bare name (`BETA`).
    fn from_str(s: &str) -> Result<Self> {
        match s.trim_start_matches("MATURITY_") {
            "ALPHA" => Ok(Maturity::Alpha),
            "BETA" => Ok(Maturity::Beta),
            "RC" => Ok(Maturity::Rc),
            "STABLE" => Ok(Maturity::Stable),
            _ => Err(ReleaseError::version_file("Could not determine maturity.")),
        }
    }
}

impl fmt::Display for Maturity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_constant())
    }
}
