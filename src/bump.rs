//! Bump workflow
//!
//! Glues the version file and the transition engine together: validate the
//! request, read `version.php`, compute the next record and write it back.
//! Kept free of clap so it can be driven programmatically and from tests.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::config::Config;
use crate::domain::calendar::parse_build_date;
use crate::domain::{BranchName, PolicyMode, ReleaseType, VersionRecord};
use crate::engine::{TransitionEngine, TransitionRequest};
use crate::error::{ReleaseError, Result};
use crate::version_file::{generate_version_file, VersionFile};

/// Arguments for the bump workflow
///
/// Mirrors the CLI options but as plain data.
#[derive(Debug, Clone, PartialEq)]
pub struct BumpArgs {
    /// Target branch, `main` or `MOODLE_<n>_STABLE`
    pub branch: String,

    /// Release type as typed on the command line
    pub release_type: String,

    /// Version file, or the directory containing it
    pub path: PathBuf,

    /// Release candidate number for `rc` releases
    pub rc: String,

    /// Forced build date as `YYYYMMDD`; empty means today
    pub date: Option<String>,

    /// Treat a stable-named branch as a development branch
    pub is_dev_branch: bool,

    /// Compute the next version without writing anything
    pub dry_run: bool,

    /// Write the whole file from the standard template instead of patching it
    pub regenerate: bool,

    /// Override the configured policy revision
    pub policy: Option<PolicyMode>,
}

/// Result of a successful bump
#[derive(Debug, Clone, PartialEq)]
pub struct BumpOutcome {
    /// The new human-friendly release name
    pub release: String,

    /// The file that was read (and written unless dry-run)
    pub path: PathBuf,

    pub previous: VersionRecord,

    pub next: VersionRecord,

    /// Whether the file on disk was updated
    pub written: bool,
}

/// Run the bump workflow.
///
/// Steps:
/// 1. Validate branch name, release type and forced date
/// 2. Resolve and check the version file path
/// 3. Parse the file and compute the next version
/// 4. Write the new content unless this is a dry run
///
/// # Errors
/// Any [`ReleaseError`]; the file is never written when an error is returned.
pub fn run_bump(args: &BumpArgs, config: &Config, today: NaiveDate) -> Result<BumpOutcome> {
    let mode = args.policy.unwrap_or(config.policy);

    BranchName::parse(&args.branch, mode)?;
    let release_type: ReleaseType = args.release_type.parse()?;
    let date = parse_forced_date(args.date.as_deref())?;

    let path = resolve_version_path(&args.path, &config.version_file);
    require_path_valid(&path, !args.dry_run)?;

    let content = fs::read_to_string(&path)?;
    let file = VersionFile::parse(content)?;
    debug!(path = %path.display(), current = %file.record(), "parsed version file");

    let request = TransitionRequest::new(&args.branch, release_type)
        .with_rc(&args.rc)
        .with_date(date)
        .dev_branch(args.is_dev_branch);
    let next = TransitionEngine::new(today, mode).next_version(file.record(), &request)?;

    let written = if args.dry_run {
        false
    } else {
        let output = if args.regenerate {
            generate_version_file(&next)
        } else {
            file.render(&next)
        };
        fs::write(&path, output)?;
        info!(path = %path.display(), release = %next.release, "version file updated");
        true
    };

    Ok(BumpOutcome {
        release: next.release.clone(),
        path,
        previous: file.record().clone(),
        next,
        written,
    })
}

/// An empty forced date means "no forced date".
pub fn parse_forced_date(date: Option<&str>) -> Result<Option<NaiveDate>> {
    match date.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_build_date(value).map(Some),
    }
}

/// Append the version file name when `path` is a directory.
pub fn resolve_version_path(path: &Path, version_file: &str) -> PathBuf {
    if path.is_dir() {
        path.join(version_file)
    } else {
        path.to_path_buf()
    }
}

/// Ensure the version file exists, is readable and, when required, writable.
pub fn require_path_valid(path: &Path, writable: bool) -> Result<()> {
    if !path.is_file() || fs::File::open(path).is_err() {
        return Err(ReleaseError::InvalidPath(path.display().to_string()));
    }
    if writable && OpenOptions::new().append(true).open(path).is_err() {
        return Err(ReleaseError::PathNotWritable(path.display().to_string()));
    }
    Ok(())
}
