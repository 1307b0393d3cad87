//! Reading and writing `version.php`
//!
//! Parsing locates the four assignments the release tooling cares about and
//! remembers where each value sits in the text. Rendering then swaps only the
//! values that changed, so comments, alignment and any unrelated lines survive
//! byte for byte.

use std::ops::Range;

use regex::{Captures, Regex};

use crate::domain::{Maturity, VersionRecord};
use crate::error::{ReleaseError, Result};

const VERSION_TEMPLATE: &str = include_str!("templates/version.php.tpl");

const VERSION_PATTERN: &str =
    r"(?m)^ *\$version *= *(?P<integer>\d{10})\.(?P<decimal>\d{2})\d?[^/]*(?P<comment>/[^\n]*)";
const RELEASE_PATTERN: &str = r#"(?m)^ *\$release *= *(?P<open>['"])(?P<release>[^ +]+\+?) *\(Build: (?P<build>\d{8})\)(?P<close>['"])"#;
const BRANCH_PATTERN: &str = r#" *\$branch *= *(?P<open>['"])(?P<branch>\d+)(?P<close>['"])"#;
const MATURITY_PATTERN: &str = r" *\$maturity *= *(?P<maturity>MATURITY_[A-Z]+)";

/// Byte ranges of every value inside the file content
#[derive(Debug, Clone, PartialEq, Eq)]
struct FieldSpans {
    integer: Range<usize>,
    decimal: Range<usize>,
    comment: Range<usize>,
    release: Range<usize>,
    build: Range<usize>,
    branch: Range<usize>,
    maturity: Range<usize>,
}

/// A parsed `version.php` together with its original text
#[derive(Debug, Clone)]
pub struct VersionFile {
    content: String,
    record: VersionRecord,
    spans: FieldSpans,
}

impl VersionFile {
    /// Parse the content of a version file.
    ///
    /// # Errors
    /// `InvalidVersionFile` naming the first field that could not be found.
    pub fn parse(content: impl Into<String>) -> Result<Self> {
        let content = content.into();

        if !is_version_file_valid(&content) {
            return Err(ReleaseError::version_file("Invalid version file found."));
        }

        let version = find(VERSION_PATTERN, &content, |_| true)
            .ok_or_else(|| ReleaseError::version_file("Could not determine version."))?;
        let release = find(RELEASE_PATTERN, &content, quotes_match)
            .ok_or_else(|| ReleaseError::version_file("Could not determine the release."))?;
        let branch = find(BRANCH_PATTERN, &content, quotes_match)
            .ok_or_else(|| ReleaseError::version_file("Could not determine branch."))?;
        let maturity = find(MATURITY_PATTERN, &content, |_| true)
            .ok_or_else(|| ReleaseError::version_file("Could not determine maturity."))?;

        let spans = FieldSpans {
            integer: span(&version, "integer")?,
            decimal: span(&version, "decimal")?,
            comment: span(&version, "comment")?,
            release: span(&release, "release")?,
            build: span(&release, "build")?,
            branch: span(&branch, "branch")?,
            maturity: span(&maturity, "maturity")?,
        };

        let integer_version = content[spans.integer.clone()]
            .parse()
            .map_err(|_| ReleaseError::version_file("Could not determine version."))?;
        let decimal_version = content[spans.decimal.clone()]
            .parse()
            .map_err(|_| ReleaseError::version_file("Could not determine version."))?;
        let maturity: Maturity = content[spans.maturity.clone()].parse()?;

        let record = VersionRecord::new(
            integer_version,
            decimal_version,
            &content[spans.comment.clone()],
            &content[spans.release.clone()],
            &content[spans.build.clone()],
            &content[spans.branch.clone()],
            maturity,
            quote_char(&branch),
            quote_char(&release),
        )?;

        Ok(VersionFile {
            content,
            record,
            spans,
        })
    }

    pub fn record(&self) -> &VersionRecord {
        &self.record
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Rewrite the original text with the values of `next`.
    ///
    /// Only values that differ from the parsed record are replaced.
    pub fn render(&self, next: &VersionRecord) -> String {
        let current = &self.record;
        let mut replacements: Vec<(Range<usize>, String)> = Vec::new();

        if current.integer_version != next.integer_version {
            replacements.push((self.spans.integer.clone(), next.integer_version.to_string()));
        }
        if current.decimal_version != next.decimal_version {
            replacements.push((self.spans.decimal.clone(), next.decimal_string()));
        }
        if current.comment != next.comment {
            replacements.push((self.spans.comment.clone(), next.comment.clone()));
        }
        if current.release != next.release {
            replacements.push((self.spans.release.clone(), next.release.clone()));
        }
        if current.build != next.build {
            replacements.push((self.spans.build.clone(), next.build.clone()));
        }
        if current.branch != next.branch {
            replacements.push((self.spans.branch.clone(), next.branch.to_string()));
        }
        if current.maturity != next.maturity {
            replacements.push((
                self.spans.maturity.clone(),
                next.maturity.as_constant().to_string(),
            ));
        }

        // Back to front so earlier ranges stay valid.
        replacements.sort_by(|a, b| b.0.start.cmp(&a.0.start));

        let mut output = self.content.clone();
        for (range, value) in replacements {
            output.replace_range(range, &value);
        }
        output
    }
}

/// Quick check that all four assignments are present at all
pub fn is_version_file_valid(content: &str) -> bool {
    ["$version ", "$release ", "$branch ", "$maturity "]
        .iter()
        .all(|needle| content.contains(needle))
}

/// Parse version file content straight into a record
pub fn parse_version_content(content: &str) -> Result<VersionRecord> {
    VersionFile::parse(content).map(|file| file.record)
}

/// Generate a complete `version.php` from the standard template.
pub fn generate_version_file(record: &VersionRecord) -> String {
    VERSION_TEMPLATE
        .replace("{integer}", &record.integer_version.to_string())
        .replace("{decimal}", &record.decimal_string())
        .replace("{release_quote}", &record.release_quote.to_string())
        .replace("{release}", &record.release)
        .replace("{build}", &record.build)
        .replace("{branch_quote}", &record.branch_quote.to_string())
        .replace("{branch}", &record.branch.to_string())
        .replace(
            "{maturity}",
            &format!("{:<20}", format!("{};", record.maturity.as_constant())),
        )
        .replace("{comment}", &record.comment)
}

fn find<'c>(
    pattern: &str,
    content: &'c str,
    accept: impl Fn(&Captures<'c>) -> bool,
) -> Option<Captures<'c>> {
    Regex::new(pattern)
        .ok()?
        .captures_iter(content)
        .find(|captures| accept(captures))
}

fn quotes_match(captures: &Captures<'_>) -> bool {
    match (captures.name("open"), captures.name("close")) {
        (Some(open), Some(close)) => open.as_str() == close.as_str(),
        _ => false,
    }
}

fn quote_char(captures: &Captures<'_>) -> char {
    captures
        .name("open")
        .and_then(|m| m.as_str().chars().next())
        .unwrap_or('\'')
}

fn span(captures: &Captures<'_>, name: &str) -> Result<Range<usize>> {
    captures
        .name(name)
        .map(|m| m.range())
        .ok_or_else(|| ReleaseError::version_file(format!("Could not determine {}.", name)))
}
