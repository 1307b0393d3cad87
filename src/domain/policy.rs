use serde::{Deserialize, Serialize};
use std::fmt;

/// Which revision of the release rules to apply.
///
/// `Current` is the canonical policy. `Legacy` is a compatibility mode that
/// also accepts `master` as the head branch, restarts the decimal version at
/// `00` on the first build of a day and derives back-to-dev releases from the
/// release label instead of the branch number. Everything else, including the
/// back-to-dev preconditions, follows `Current`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyMode {
    #[default]
    Current,
    Legacy,
}

impl fmt::Display for PolicyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyMode::Current => write!(f, "current"),
            PolicyMode::Legacy => write!(f, "legacy"),
        }
    }
}
