use crate::domain::PolicyMode;
use crate::error::{ReleaseError, Result};
use regex::Regex;

/// Branch numbers up to and including this one were allocated sequentially.
const LAST_SEQUENTIAL_BRANCH: u32 = 404;

/// Highest minor digit before the major version rolls over.
const LAST_MINOR_PER_MAJOR: u32 = 3;

/// A validated release branch name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchName {
    /// The unstable head (`main`, or `master` in legacy mode)
    Head,
    /// `MOODLE_<n>_STABLE`
    Stable(u32),
}

impl BranchName {
    /// Parse and validate a branch name under the given policy
    pub fn parse(name: &str, mode: PolicyMode) -> Result<Self> {
        if !is_branch_name_valid(name, mode) {
            return Err(ReleaseError::InvalidBranchName(name.to_string()));
        }
        match normalize_branch(name) {
            Some(number) => Ok(BranchName::Stable(number)),
            None => Ok(BranchName::Head),
        }
    }

    pub fn is_head(&self) -> bool {
        matches!(self, BranchName::Head)
    }
}

/// Check whether a branch name is accepted by the tooling.
///
/// Both modes accept `main` and `MOODLE_<digits>_STABLE`. Legacy mode also
/// accepts `master`. `MOODLE_19_STABLE` is never accepted: its version file
/// predates the `$branch` and `$maturity` fields.
pub fn is_branch_name_valid(name: &str, mode: PolicyMode) -> bool {
    if name == "MOODLE_19_STABLE" {
        return false;
    }

    match name {
        "main" => true,
        "master" => mode == PolicyMode::Legacy,
        _ => normalize_branch(name).is_some(),
    }
}

/// A branch is stable when it is named `*_STABLE` and not flagged as a
/// parallel development branch.
pub fn is_branch_stable(name: &str, is_dev_branch: bool) -> bool {
    name.contains("_STABLE") && !is_dev_branch
}

/// Reduce `MOODLE_405_STABLE` or `405` to its branch number.
pub fn normalize_branch(name: &str) -> Option<u32> {
    if !name.is_empty() && name.chars().all(|c| c.is_ascii_digit()) {
        return name.parse().ok();
    }

    Regex::new(r"^MOODLE_(\d+)_STABLE$")
        .ok()
        .and_then(|re| re.captures(name))
        .and_then(|captures| captures.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Determine the branch number that follows `branch`.
///
/// Up to 4.4 branches were numbered sequentially. From 4.5 on there are four
/// minor branches per major (X.0 to X.3) before the major is bumped.
///
/// An exceptional release that extends the life of a major would break this
/// scheme and needs handling here when it happens.
pub fn next_branch_number(branch: u32) -> u32 {
    if branch <= LAST_SEQUENTIAL_BRANCH {
        return branch + 1;
    }

    let (mut major, mut minor) = split_branch(branch);
    if minor >= LAST_MINOR_PER_MAJOR {
        major += 1;
        minor = 0;
    } else {
        minor += 1;
    }

    // `<major><minor:02>`
    major * 100 + minor
}

/// Split a branch number into its major and minor release parts (`405` -> `(4, 5)`).
pub fn split_branch(branch: u32) -> (u32, u32) {
    (branch / 100, branch % 100)
}
