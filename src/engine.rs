//! Version transition engine
//!
//! Maps the current [`VersionRecord`] and a [`TransitionRequest`] to the record
//! of the next release. The engine is pure: "today" and the policy revision are
//! injected, and every call returns a fresh record or an error.
//!
//! Stable branches only know three release types:
//!
//! ```text
//! weekly        4.5   -> 4.5+   (decimal + 1)
//! minor/major   4.5+  -> 4.5.1  (integer + 1, decimal 00, Monday build)
//! ```
//!
//! Development branches walk the maturity ladder:
//!
//! ```text
//! back-to-dev -> X.Ydev -> X.Ybeta -> X.Yrc<n> -> X.Y (major) -> back-to-dev ...
//! ```

use chrono::NaiveDate;
use regex::Regex;
use tracing::{debug, warn};

use crate::domain::branch::{is_branch_stable, next_branch_number, split_branch};
use crate::domain::calendar::{date_number, format_build_date, next_monday};
use crate::domain::numbering::{next_higher_version, MAX_DECIMAL_VERSION};
use crate::domain::record::{branching_date_comment, DEV_BRANCH_COMMENT};
use crate::domain::{BranchName, Maturity, PolicyMode, ReleaseType, VersionRecord};
use crate::error::{ReleaseError, Result};

/// What the caller asks the engine to produce
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionRequest {
    /// Target branch name, `main` or `MOODLE_<n>_STABLE`
    pub branch: String,
    pub release_type: ReleaseType,
    /// Release candidate number, only used by [`ReleaseType::Rc`]
    pub rc: String,
    /// Forced build date, replacing "today" and "next Monday"
    pub date: Option<NaiveDate>,
    /// Treat a `*_STABLE` branch as a parallel development branch
    pub is_dev_branch: bool,
}

impl TransitionRequest {
    pub fn new(branch: impl Into<String>, release_type: ReleaseType) -> Self {
        TransitionRequest {
            branch: branch.into(),
            release_type,
            rc: String::new(),
            date: None,
            is_dev_branch: false,
        }
    }

    pub fn with_rc(mut self, rc: impl Into<String>) -> Self {
        self.rc = rc.into();
        self
    }

    pub fn with_date(mut self, date: Option<NaiveDate>) -> Self {
        self.date = date;
        self
    }

    pub fn dev_branch(mut self, is_dev_branch: bool) -> Self {
        self.is_dev_branch = is_dev_branch;
        self
    }
}

/// Computes next versions for a fixed "today" and policy revision
#[derive(Debug, Clone, Copy)]
pub struct TransitionEngine {
    today: NaiveDate,
    mode: PolicyMode,
}

impl TransitionEngine {
    pub fn new(today: NaiveDate, mode: PolicyMode) -> Self {
        TransitionEngine { today, mode }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn mode(&self) -> PolicyMode {
        self.mode
    }

    /// Compute the record following `current` for the given request.
    ///
    /// # Errors
    /// * `InvalidBranchName` - the target branch is not accepted by the policy
    /// * `InvalidTransition` - back-to-dev preconditions fail, the release label
    ///   cannot be advanced, or the decimal version is exhausted
    pub fn next_version(
        &self,
        current: &VersionRecord,
        request: &TransitionRequest,
    ) -> Result<VersionRecord> {
        let target = BranchName::parse(&request.branch, self.mode)?;
        let stable = is_branch_stable(&request.branch, request.is_dev_branch);

        debug!(
            branch = %request.branch,
            release_type = %request.release_type,
            stable,
            current = %current,
            "computing next version"
        );

        let next = if stable {
            self.stable_transition(current, request)?
        } else {
            self.development_transition(current, request, target)?
        };

        debug!(next = %next, "computed next version");
        Ok(next)
    }

    fn stable_transition(
        &self,
        current: &VersionRecord,
        request: &TransitionRequest,
    ) -> Result<VersionRecord> {
        let mut next = current.clone();
        next.build = self.default_build(request);

        match request.release_type {
            ReleaseType::Weekly => {
                // First weekly after a major or minor release gets the +.
                next.release = with_plus(&current.release);
                next.decimal_version = bump_decimal(current.decimal_version)?;
                next.maturity = Maturity::Stable;
            }
            ReleaseType::Minor | ReleaseType::Major => {
                // A major on a stable branch is just another point release.
                next.release = next_point_release(&current.release);
                next.integer_version = current.integer_version + 1;
                next.decimal_version = 0;
                next.build = format_build_date(self.release_day(request));
            }
            other => {
                warn!(
                    release_type = %other,
                    branch = %request.branch,
                    "release type has no effect on a stable branch"
                );
            }
        }

        Ok(next)
    }

    fn development_transition(
        &self,
        current: &VersionRecord,
        request: &TransitionRequest,
        target: BranchName,
    ) -> Result<VersionRecord> {
        let mut next = current.clone();
        next.build = self.default_build(request);

        match request.release_type {
            // Development branches get no minor releases; it is a weekly.
            ReleaseType::Weekly | ReleaseType::Minor => {
                if current.is_pre_release() {
                    // Under beta or rc a weekly behaves like on-demand, then
                    // gets the weekly numbering on top.
                    next.release = with_plus(&current.release);
                    self.apply_numbering(&mut next);
                } else if !current.is_dev_release() {
                    // Just after a major release: open the next development cycle.
                    next.release = next_dev_release(&current.release)?;
                    next.maturity = Maturity::Alpha;
                }
                self.apply_numbering(&mut next);
            }
            ReleaseType::Beta => {
                next.release = format!("{}beta", strip_suffix(&current.release, "dev|beta"));
                self.apply_numbering(&mut next);
                next.maturity = Maturity::Beta;
            }
            ReleaseType::Rc => {
                next.release = format!(
                    "{}rc{}",
                    strip_suffix(&current.release, r"dev|beta|rc\d*"),
                    request.rc
                );
                self.apply_numbering(&mut next);
                next.maturity = Maturity::Rc;
            }
            ReleaseType::OnDemand => {
                next.release = with_plus(&current.release);
                self.apply_numbering(&mut next);
            }
            ReleaseType::OnSync => {
                next.decimal_version = bump_decimal(current.decimal_version)?;
            }
            ReleaseType::BackToDev => {
                if current.is_dev_release() {
                    return Err(ReleaseError::transition(
                        "Back-to-dev is only allowed on non-dev branches.",
                    ));
                }
                if !target.is_head() {
                    return Err(ReleaseError::transition(
                        "Back-to-dev is only allowed on the main branch.",
                    ));
                }

                let (release, branch) = match self.mode {
                    PolicyMode::Current => {
                        let branch = next_branch_number(current.branch);
                        let (major, minor) = split_branch(branch);
                        (format!("{}.{}dev", major, minor), branch)
                    }
                    PolicyMode::Legacy => legacy_back_to_dev(&current.release)?,
                };

                next.comment = DEV_BRANCH_COMMENT.to_string();
                next.release = release;
                next.branch = branch;
                next.maturity = Maturity::Alpha;
                next.build = format_build_date(self.release_day(request));
            }
            ReleaseType::Major => {
                let release_day = self.release_day(request);
                next.release = strip_suffix(&current.release, r"dev|beta|rc\d*");
                next.maturity = Maturity::Stable;
                next.build = format_build_date(release_day);
                next.comment = branching_date_comment(&next.build);
                // Majors are versioned by their release day, always at .00.
                next.integer_version = date_number(release_day) * 100;
                next.decimal_version = 0;
            }
        }

        Ok(next)
    }

    fn apply_numbering(&self, record: &mut VersionRecord) {
        let (integer, decimal) = next_higher_version(
            record.integer_version,
            record.decimal_version,
            date_number(self.today),
            self.mode,
        );
        record.integer_version = integer;
        record.decimal_version = decimal;
    }

    /// Build date unless a rule overrides it
    fn default_build(&self, request: &TransitionRequest) -> String {
        format_build_date(request.date.unwrap_or(self.today))
    }

    /// Majors, minors and back-to-dev are released on Monday unless a date is forced
    fn release_day(&self, request: &TransitionRequest) -> NaiveDate {
        request.date.unwrap_or_else(|| next_monday(self.today))
    }
}

fn with_plus(release: &str) -> String {
    if release.contains('+') {
        release.to_string()
    } else {
        format!("{}+", release)
    }
}

fn bump_decimal(decimal: u8) -> Result<u8> {
    if decimal >= MAX_DECIMAL_VERSION {
        return Err(ReleaseError::transition(format!(
            "Decimal version {:02} cannot be incremented any further.",
            decimal
        )));
    }
    Ok(decimal + 1)
}

/// `4.5+` -> `4.5.1`, `4.5.12+` -> `4.5.13`
fn next_point_release(release: &str) -> String {
    let release = release.strip_suffix('+').unwrap_or(release);

    let point = Regex::new(r"^(\d+\.\d+)\.(\d+)")
        .ok()
        .and_then(|re| re.captures(release))
        .and_then(|captures| {
            let version = captures.get(1)?.as_str();
            let increment: u32 = captures.get(2)?.as_str().parse().ok()?;
            Some(format!("{}.{}", version, increment + 1))
        });

    // First minor release on this stable branch: X.Y.1.
    point.unwrap_or_else(|| format!("{}.1", release))
}

/// Drop the maturity marker (and any `+`) following the `X.Y` of a release.
fn strip_suffix(release: &str, markers: &str) -> String {
    match Regex::new(&format!(r"^(\d+\.\d+) *({})\+?", markers)) {
        Ok(re) => re.replace(release, "$1").into_owned(),
        Err(_) => release.to_string(),
    }
}

/// Advance `X.Y` by one tenth: `4.5` -> `4.6`, `4.9` -> `5.0`.
fn next_tenth((major, minor): (u32, u32)) -> (u32, u32) {
    if minor >= 9 {
        (major + 1, 0)
    } else {
        (major, minor + 1)
    }
}

/// Parse the leading `X.Y` of a release label.
fn release_major_minor(release: &str) -> Option<(u32, u32)> {
    Regex::new(r"^(\d+)\.(\d+)")
        .ok()
        .and_then(|re| re.captures(release))
        .and_then(|captures| {
            let major = captures.get(1)?.as_str().parse().ok()?;
            let minor = captures.get(2)?.as_str().parse().ok()?;
            Some((major, minor))
        })
}

/// `4.5` -> `4.6dev`, `4.9` -> `5.0dev`
fn next_dev_release(release: &str) -> Result<String> {
    let current = release_major_minor(release).ok_or_else(|| {
        ReleaseError::transition(format!(
            "Cannot derive a development release from '{}'.",
            release
        ))
    })?;
    let (major, minor) = next_tenth(current);
    Ok(format!("{}.{}dev", major, minor))
}

/// Back-to-dev as the older tooling did it: both the release and the branch
/// come from the release label, `4.3` -> (`4.4dev`, `404`).
fn legacy_back_to_dev(release: &str) -> Result<(String, u32)> {
    let current = release_major_minor(release).ok_or_else(|| {
        ReleaseError::transition(format!(
            "Cannot derive a development release from '{}'.",
            release
        ))
    })?;
    let (major, minor) = next_tenth(current);
    Ok((format!("{}.{}dev", major, minor), major * 100 + minor))
}
