use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use moodle_release::bump::{run_bump, BumpArgs};
use moodle_release::config;
use moodle_release::domain::calendar::today_at_offset;
use moodle_release::domain::PolicyMode;
use moodle_release::error::ReleaseError;
use moodle_release::logging;
use moodle_release::ui;

#[derive(clap::Parser)]
#[command(
    name = "moodle-release",
    version,
    about = "Bump the version information of a Moodle checkout for the next release"
)]
struct Args {
    #[arg(short, long, help = "Target branch: main or MOODLE_<n>_STABLE")]
    branch: String,

    #[arg(
        short = 't',
        long = "type",
        help = "Release type: weekly, minor, major, beta, rc, on-demand, on-sync, back-to-dev"
    )]
    release_type: String,

    #[arg(short, long, help = "Moodle checkout directory or version file")]
    path: PathBuf,

    #[arg(short, long, default_value = "", help = "Release candidate number")]
    rc: String,

    #[arg(short, long, help = "Force the build date (YYYYMMDD)")]
    date: Option<String>,

    #[arg(
        short = 'i',
        long = "isdevbranch",
        action = clap::ArgAction::Set,
        num_args = 0..=1,
        default_value = "false",
        default_missing_value = "true",
        value_parser = parse_flag,
        help = "Treat the stable-named branch as a development branch"
    )]
    is_dev_branch: bool,

    #[arg(long, help = "Apply the legacy release rules")]
    legacy: bool,

    #[arg(long, help = "Print the next release without writing the version file")]
    dry_run: bool,

    #[arg(long, help = "Rewrite the version file from the standard template")]
    regenerate: bool,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, action = clap::ArgAction::Count, help = "Increase log verbosity")]
    verbose: u8,
}

/// Accept the truthy spellings older wrapper scripts pass to `--isdevbranch`.
fn parse_flag(value: &str) -> std::result::Result<bool, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        other => Err(format!("expected a boolean, got '{}'", other)),
    }
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        let code = e
            .downcast_ref::<ReleaseError>()
            .map(ReleaseError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}

fn run(args: Args) -> Result<()> {
    let config = config::load_config(args.config.as_deref()).context("Error loading config")?;
    logging::init_logging(args.verbose, &config.log_level)?;

    let today = today_at_offset(config.utc_offset_hours)?;

    let bump_args = BumpArgs {
        branch: args.branch,
        release_type: args.release_type,
        path: args.path,
        rc: args.rc,
        date: args.date,
        is_dev_branch: args.is_dev_branch,
        dry_run: args.dry_run,
        regenerate: args.regenerate,
        policy: args.legacy.then_some(PolicyMode::Legacy),
    };

    let outcome = run_bump(&bump_args, &config, today)?;

    if args.verbose > 0 || outcome.written {
        ui::display_outcome(&outcome);
    }
    println!("{}", outcome.release);

    Ok(())
}
