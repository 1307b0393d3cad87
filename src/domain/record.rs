use crate::domain::branch::normalize_branch;
use crate::domain::Maturity;
use crate::error::{ReleaseError, Result};
use std::fmt;

/// Comment placed on the `$version` line of a development branch
pub const DEV_BRANCH_COMMENT: &str = "// YYYYMMDD      = weekly release date of this DEV branch.";

/// Comment placed on the `$version` line when a branch is cut
pub fn branching_date_comment(build: &str) -> String {
    format!("// {}      = branching date YYYYMMDD - do not modify!", build)
}

/// Snapshot of the version information held in `version.php`.
///
/// Records are values: transitions build a new record rather than mutating
/// an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRecord {
    /// `YYYYMMDDRR`
    pub integer_version: u64,
    /// Incremental changes within an integer version, rendered as two digits
    pub decimal_version: u8,
    /// Trailing comment of the `$version` line, including the leading `//`
    pub comment: String,
    /// Human friendly release name, e.g. `4.5.1+` or `5.0beta`
    pub release: String,
    /// Build date as `YYYYMMDD`
    pub build: String,
    /// Numeric branch identifier, e.g. `405`
    pub branch: u32,
    pub maturity: Maturity,
    /// Quote character surrounding the branch value in the source file
    pub branch_quote: char,
    /// Quote character surrounding the release value in the source file
    pub release_quote: char,
}

impl VersionRecord {
    /// Create a record, normalising `branch` from either `MOODLE_405_STABLE`
    /// or `405` form.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        integer_version: u64,
        decimal_version: u8,
        comment: impl Into<String>,
        release: impl Into<String>,
        build: impl Into<String>,
        branch: &str,
        maturity: Maturity,
        branch_quote: char,
        release_quote: char,
    ) -> Result<Self> {
        let branch = normalize_branch(branch)
            .ok_or_else(|| ReleaseError::version_file("Could not determine branch."))?;

        Ok(VersionRecord {
            integer_version,
            decimal_version,
            comment: comment.into(),
            release: release.into(),
            build: build.into(),
            branch,
            maturity,
            branch_quote,
            release_quote,
        })
    }

    /// Decimal version padded to two digits
    pub fn decimal_string(&self) -> String {
        format!("{:02}", self.decimal_version)
    }

    /// `$version` value as written in the file, e.g. `2024092300.01`
    pub fn version_string(&self) -> String {
        format!("{}.{}", self.integer_version, self.decimal_string())
    }

    pub fn is_dev_release(&self) -> bool {
        self.release.contains("dev")
    }

    pub fn is_pre_release(&self) -> bool {
        self.release.contains("beta") || self.release.contains("rc")
    }
}

impl fmt::Display for VersionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (Build: {}) [{}, branch {}, {}]",
            self.release,
            self.build,
            self.version_string(),
            self.branch,
            self.maturity
        )
    }
}
