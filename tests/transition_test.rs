// tests/transition_test.rs
use chrono::NaiveDate;
use moodle_release::domain::record::{branching_date_comment, DEV_BRANCH_COMMENT};
use moodle_release::domain::{Maturity, PolicyMode, ReleaseType, VersionRecord};
use moodle_release::engine::{TransitionEngine, TransitionRequest};
use moodle_release::ReleaseError;

fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y%m%d").unwrap()
}

/// Thursday
fn thursday() -> NaiveDate {
    date("20240926")
}

fn engine() -> TransitionEngine {
    TransitionEngine::new(thursday(), PolicyMode::Current)
}

fn record(
    integer_version: u64,
    release: &str,
    branch: &str,
    maturity: Maturity,
) -> VersionRecord {
    VersionRecord::new(
        integer_version,
        0,
        branching_date_comment("20240923"),
        release,
        "20240921",
        branch,
        maturity,
        '\'',
        '\'',
    )
    .unwrap()
}

fn major_version() -> VersionRecord {
    record(2024092300, "4.5", "MOODLE_405_STABLE", Maturity::Stable)
}

fn minor_version() -> VersionRecord {
    record(2024092301, "4.5.1", "405", Maturity::Stable)
}

fn weekly_version() -> VersionRecord {
    record(2024092301, "4.5.1+", "MOODLE_405_STABLE", Maturity::Stable)
}

fn development_version() -> VersionRecord {
    record(2024092301, "5.0dev", "500", Maturity::Alpha)
}

fn beta_version() -> VersionRecord {
    record(2024092301, "5.0beta", "500", Maturity::Beta)
}

fn stable(release_type: ReleaseType, forced: &str) -> TransitionRequest {
    TransitionRequest::new("MOODLE_405_STABLE", release_type).with_date(Some(date(forced)))
}

fn development(release_type: ReleaseType, forced: &str) -> TransitionRequest {
    TransitionRequest::new("MOODLE_500_STABLE", release_type)
        .with_date(Some(date(forced)))
        .dev_branch(true)
}

// ============================================================================
// Stable branches
// ============================================================================

#[test]
fn test_weekly_version_from_major() {
    let next = engine()
        .next_version(&major_version(), &stable(ReleaseType::Weekly, "20240926"))
        .unwrap();

    assert_eq!(next.integer_version, 2024092300);
    assert_eq!(next.decimal_string(), "01");
    assert_eq!(next.release, "4.5+");
    assert_eq!(next.build, "20240926");
    assert_eq!(next.branch, 405);
    assert_eq!(next.maturity, Maturity::Stable);
    assert_eq!(next.branch_quote, '\'');
    assert_eq!(next.release_quote, '\'');
}

#[test]
fn test_minor_version_from_major() {
    let next = engine()
        .next_version(&major_version(), &stable(ReleaseType::Minor, "20240923"))
        .unwrap();

    assert_eq!(next.integer_version, 2024092301);
    assert_eq!(next.decimal_string(), "00");
    assert_eq!(next.release, "4.5.1");
    assert_eq!(next.build, "20240923");
}

#[test]
fn test_major_version_from_major_is_a_minor() {
    let next = engine()
        .next_version(&major_version(), &stable(ReleaseType::Major, "20240923"))
        .unwrap();

    assert_eq!(next.integer_version, 2024092301);
    assert_eq!(next.decimal_string(), "00");
    assert_eq!(next.release, "4.5.1");
    assert_eq!(next.build, "20240923");
}

#[test]
fn test_back_to_dev_from_major() {
    let request = TransitionRequest::new("main", ReleaseType::BackToDev)
        .with_date(Some(date("20240923")))
        .dev_branch(true);
    let next = engine().next_version(&major_version(), &request).unwrap();

    assert_eq!(next.decimal_string(), "00");
    assert_eq!(next.release, "5.0dev");
    assert_eq!(next.build, "20240923");
    assert_eq!(next.branch, 500);
    assert_eq!(next.maturity, Maturity::Alpha);
    assert_eq!(next.comment, DEV_BRANCH_COMMENT);
}

#[test]
fn test_releases_from_minor() {
    let current = minor_version();

    let weekly = engine()
        .next_version(&current, &stable(ReleaseType::Weekly, "20240926"))
        .unwrap();
    assert_eq!(weekly.integer_version, 2024092301);
    assert_eq!(weekly.decimal_string(), "01");
    assert_eq!(weekly.release, "4.5.1+");

    let minor = engine()
        .next_version(&current, &stable(ReleaseType::Minor, "20240923"))
        .unwrap();
    assert_eq!(minor.integer_version, 2024092302);
    assert_eq!(minor.decimal_string(), "00");
    assert_eq!(minor.release, "4.5.2");
}

#[test]
fn test_releases_from_weekly() {
    let current = weekly_version();

    let weekly = engine()
        .next_version(&current, &stable(ReleaseType::Weekly, "20240926"))
        .unwrap();
    assert_eq!(weekly.integer_version, 2024092301);
    assert_eq!(weekly.decimal_string(), "01");
    assert_eq!(weekly.release, "4.5.1+");
    assert_eq!(weekly.build, "20240926");

    let minor = engine()
        .next_version(&current, &stable(ReleaseType::Minor, "20240923"))
        .unwrap();
    assert_eq!(minor.integer_version, 2024092302);
    assert_eq!(minor.release, "4.5.2");
}

#[test]
fn test_weekly_twice_keeps_single_plus() {
    let once = engine()
        .next_version(&major_version(), &stable(ReleaseType::Weekly, "20240926"))
        .unwrap();
    let twice = engine()
        .next_version(&once, &stable(ReleaseType::Weekly, "20240926"))
        .unwrap();

    assert_eq!(twice.release, "4.5+");
    assert_eq!(twice.integer_version, once.integer_version);
    assert_eq!(twice.decimal_version, once.decimal_version + 1);
}

#[test]
fn test_minor_and_major_agree_on_stable_branches() {
    for current in [major_version(), minor_version(), weekly_version()] {
        for forced in [None, Some(date("20240923"))] {
            let minor = TransitionRequest::new("MOODLE_405_STABLE", ReleaseType::Minor)
                .with_date(forced);
            let major = TransitionRequest::new("MOODLE_405_STABLE", ReleaseType::Major)
                .with_date(forced);
            assert_eq!(
                engine().next_version(&current, &minor).unwrap(),
                engine().next_version(&current, &major).unwrap()
            );
        }
    }
}

#[test]
fn test_stable_minor_without_date_is_released_next_monday() {
    let request = TransitionRequest::new("MOODLE_405_STABLE", ReleaseType::Minor);

    let from_thursday = engine().next_version(&major_version(), &request).unwrap();
    assert_eq!(from_thursday.build, "20240930");

    let monday = TransitionEngine::new(date("20240923"), PolicyMode::Current);
    let from_monday = monday.next_version(&major_version(), &request).unwrap();
    assert_eq!(from_monday.build, "20240923");
}

#[test]
fn test_stable_weekly_without_date_uses_today() {
    let request = TransitionRequest::new("MOODLE_405_STABLE", ReleaseType::Weekly);
    let next = engine().next_version(&major_version(), &request).unwrap();
    assert_eq!(next.build, "20240926");
}

#[test]
fn test_stable_branch_ignores_development_release_types() {
    for release_type in [
        ReleaseType::Beta,
        ReleaseType::Rc,
        ReleaseType::OnDemand,
        ReleaseType::OnSync,
        ReleaseType::BackToDev,
    ] {
        let current = major_version();
        let next = engine()
            .next_version(&current, &stable(release_type, "20240926"))
            .unwrap();

        let mut expected = current.clone();
        expected.build = "20240926".to_string();
        assert_eq!(next, expected, "{} changed a stable record", release_type);
    }
}

#[test]
fn test_stable_weekly_with_exhausted_decimal_fails() {
    let mut current = weekly_version();
    current.decimal_version = 99;

    let err = engine()
        .next_version(&current, &stable(ReleaseType::Weekly, "20240926"))
        .unwrap_err();
    assert!(matches!(err, ReleaseError::InvalidTransition(_)));
}

// ============================================================================
// Development branches
// ============================================================================

#[test]
fn test_on_sync_from_development() {
    let request = TransitionRequest::new("MOODLE_405_STABLE", ReleaseType::OnSync)
        .with_date(Some(date("20240926")))
        .dev_branch(true);
    let next = engine().next_version(&development_version(), &request).unwrap();

    assert_eq!(next.integer_version, 2024092301);
    assert_eq!(next.decimal_string(), "01");
    assert_eq!(next.release, "5.0dev");
    assert_eq!(next.build, "20240926");
}

#[test]
fn test_weekly_from_development() {
    let next = engine()
        .next_version(
            &development_version(),
            &development(ReleaseType::Weekly, "20240926"),
        )
        .unwrap();

    assert_eq!(next.integer_version, 2024092600);
    assert_eq!(next.decimal_string(), "01");
    assert_eq!(next.release, "5.0dev");
    assert_eq!(next.build, "20240926");
    assert_eq!(next.maturity, Maturity::Alpha);
    assert_eq!(next.branch, 500);
}

#[test]
fn test_minor_from_development_is_a_weekly() {
    let weekly = engine()
        .next_version(
            &development_version(),
            &development(ReleaseType::Weekly, "20240923"),
        )
        .unwrap();
    let minor = engine()
        .next_version(
            &development_version(),
            &development(ReleaseType::Minor, "20240923"),
        )
        .unwrap();

    assert_eq!(minor, weekly);
}

#[test]
fn test_weekly_from_development_already_ahead_of_today() {
    let mut current = development_version();
    current.integer_version = 2024092600;
    current.decimal_version = 4;

    let next = engine()
        .next_version(&current, &development(ReleaseType::Weekly, "20240926"))
        .unwrap();
    assert_eq!(next.integer_version, 2024092600);
    assert_eq!(next.decimal_string(), "05");
}

#[test]
fn test_beta_from_development() {
    let next = engine()
        .next_version(
            &development_version(),
            &development(ReleaseType::Beta, "20240923"),
        )
        .unwrap();

    assert_eq!(next.integer_version, 2024092600);
    assert_eq!(next.decimal_string(), "01");
    assert_eq!(next.release, "5.0beta");
    assert_eq!(next.build, "20240923");
    assert_eq!(next.maturity, Maturity::Beta);
    assert_eq!(next.branch, 500);
}

#[test]
fn test_rc_from_development() {
    let next = engine()
        .next_version(
            &development_version(),
            &development(ReleaseType::Rc, "20240923").with_rc("1"),
        )
        .unwrap();

    assert_eq!(next.release, "5.0rc1");
    assert_eq!(next.maturity, Maturity::Rc);
}

#[test]
fn test_major_from_development() {
    let next = engine()
        .next_version(
            &development_version(),
            &development(ReleaseType::Major, "20240923"),
        )
        .unwrap();

    assert_eq!(next.integer_version, 2024092300);
    assert_eq!(next.decimal_string(), "00");
    assert_eq!(next.release, "5.0");
    assert_eq!(next.build, "20240923");
    assert_eq!(next.maturity, Maturity::Stable);
    assert_eq!(next.comment, branching_date_comment("20240923"));
    assert_eq!(next.branch, 500);
}

#[test]
fn test_major_from_development_without_date_uses_next_monday() {
    let request = TransitionRequest::new("main", ReleaseType::Major);
    let next = engine()
        .next_version(&development_version(), &request)
        .unwrap();

    assert_eq!(next.integer_version, 2024093000);
    assert_eq!(next.decimal_string(), "00");
    assert_eq!(next.build, "20240930");
    assert_eq!(next.comment, branching_date_comment("20240930"));
    assert_eq!(next.branch, 500);
}

#[test]
fn test_weekly_right_after_major_opens_next_cycle() {
    let request = TransitionRequest::new("MOODLE_405_STABLE", ReleaseType::Weekly)
        .with_date(Some(date("20240923")))
        .dev_branch(true);
    let next = engine().next_version(&major_version(), &request).unwrap();

    assert_eq!(next.release, "4.6dev");
    assert_eq!(next.maturity, Maturity::Alpha);
    assert_eq!(next.integer_version, 2024092600);
    assert_eq!(next.decimal_string(), "01");
}

#[test]
fn test_weekly_right_after_x9_major_rolls_major() {
    let current = record(2024092300, "4.9", "409", Maturity::Stable);
    let request = TransitionRequest::new("main", ReleaseType::Weekly)
        .with_date(Some(date("20240926")));
    let next = engine().next_version(&current, &request).unwrap();

    assert_eq!(next.release, "5.0dev");
    assert_eq!(next.maturity, Maturity::Alpha);
    assert_eq!(next.branch, 409);
}

// ============================================================================
// Beta releases
// ============================================================================

#[test]
fn test_beta_from_beta() {
    let next = engine()
        .next_version(&beta_version(), &development(ReleaseType::Beta, "20240923"))
        .unwrap();

    assert_eq!(next.integer_version, 2024092600);
    assert_eq!(next.decimal_string(), "01");
    assert_eq!(next.release, "5.0beta");
    assert_eq!(next.maturity, Maturity::Beta);
}

#[test]
fn test_weekly_from_beta_numbers_on_top_of_on_demand() {
    let weekly = engine()
        .next_version(
            &beta_version(),
            &development(ReleaseType::Weekly, "20240923"),
        )
        .unwrap();
    let on_demand = engine()
        .next_version(
            &beta_version(),
            &development(ReleaseType::OnDemand, "20240923"),
        )
        .unwrap();

    assert_eq!(on_demand.release, "5.0beta+");
    assert_eq!(on_demand.version_string(), "2024092600.01");

    assert_eq!(weekly.release, "5.0beta+");
    assert_eq!(weekly.version_string(), "2024092600.02");
    assert_eq!(weekly.maturity, Maturity::Beta);
}

#[test]
fn test_weekly_from_beta_at_todays_baseline_moves_decimal_twice() {
    let mut current = beta_version();
    current.integer_version = 2024092600;
    current.decimal_version = 3;

    let next = engine()
        .next_version(&current, &TransitionRequest::new("main", ReleaseType::Weekly))
        .unwrap();
    assert_eq!(next.version_string(), "2024092600.05");
    assert_eq!(next.release, "5.0beta+");
}

#[test]
fn test_weekly_from_rc_numbers_twice_under_legacy_policy() {
    let mut current = beta_version();
    current.release = "5.0rc1".to_string();
    current.maturity = Maturity::Rc;

    let legacy = TransitionEngine::new(thursday(), PolicyMode::Legacy);
    let next = legacy
        .next_version(&current, &development(ReleaseType::Weekly, "20240926"))
        .unwrap();
    assert_eq!(next.release, "5.0rc1+");
    assert_eq!(next.version_string(), "2024092600.01");
}

#[test]
fn test_rc_from_beta() {
    let next = engine()
        .next_version(&beta_version(), &development(ReleaseType::Rc, "20240923"))
        .unwrap();

    assert_eq!(next.integer_version, 2024092600);
    assert_eq!(next.decimal_string(), "01");
    assert_eq!(next.release, "5.0rc");
    assert_eq!(next.build, "20240923");
    assert_eq!(next.maturity, Maturity::Rc);
}

#[test]
fn test_rc_from_rc_replaces_number() {
    let mut current = beta_version();
    current.release = "5.0rc1+".to_string();
    current.maturity = Maturity::Rc;

    let next = engine()
        .next_version(
            &current,
            &development(ReleaseType::Rc, "20240923").with_rc("2"),
        )
        .unwrap();
    assert_eq!(next.release, "5.0rc2");
}

#[test]
fn test_major_from_beta() {
    let next = engine()
        .next_version(&beta_version(), &development(ReleaseType::Major, "20240923"))
        .unwrap();

    assert_eq!(next.integer_version, 2024092300);
    assert_eq!(next.decimal_string(), "00");
    assert_eq!(next.release, "5.0");
    assert_eq!(next.maturity, Maturity::Stable);
}

// ============================================================================
// Invalid transitions
// ============================================================================

#[test]
fn test_back_to_dev_from_development_fails() {
    let err = engine()
        .next_version(
            &development_version(),
            &development(ReleaseType::BackToDev, "20240923"),
        )
        .unwrap_err();

    assert!(matches!(err, ReleaseError::InvalidTransition(_)));
    assert_eq!(
        err.to_string(),
        "Back-to-dev is only allowed on non-dev branches."
    );
}

#[test]
fn test_back_to_dev_on_stable_branch_name_fails() {
    let err = engine()
        .next_version(
            &major_version(),
            &development(ReleaseType::BackToDev, "20240923"),
        )
        .unwrap_err();

    assert!(matches!(err, ReleaseError::InvalidTransition(_)));
    assert_eq!(
        err.to_string(),
        "Back-to-dev is only allowed on the main branch."
    );
}

#[test]
fn test_invalid_branch_name_fails() {
    for branch in ["master", "MOODLE_19_STABLE", "feature/x"] {
        let request = TransitionRequest::new(branch, ReleaseType::Weekly);
        let err = engine()
            .next_version(&major_version(), &request)
            .unwrap_err();
        assert!(matches!(err, ReleaseError::InvalidBranchName(_)));
    }
}

// ============================================================================
// Legacy policy
// ============================================================================

#[test]
fn test_legacy_numbering_restarts_at_zero() {
    let legacy = TransitionEngine::new(thursday(), PolicyMode::Legacy);
    let next = legacy
        .next_version(
            &development_version(),
            &development(ReleaseType::Weekly, "20240926"),
        )
        .unwrap();

    assert_eq!(next.integer_version, 2024092600);
    assert_eq!(next.decimal_string(), "00");
}

#[test]
fn test_legacy_accepts_master_for_back_to_dev() {
    let legacy = TransitionEngine::new(thursday(), PolicyMode::Legacy);
    let current = record(2023100900, "4.3", "403", Maturity::Stable);
    let request = TransitionRequest::new("master", ReleaseType::BackToDev)
        .with_date(Some(date("20231009")));

    let next = legacy.next_version(&current, &request).unwrap();
    assert_eq!(next.release, "4.4dev");
    assert_eq!(next.branch, 404);
    assert_eq!(next.maturity, Maturity::Alpha);
}

#[test]
fn test_back_to_dev_branch_derivation_differs_between_policies() {
    let current = major_version();
    let request = TransitionRequest::new("main", ReleaseType::BackToDev)
        .with_date(Some(date("20240923")));

    let canonical = engine().next_version(&current, &request).unwrap();
    assert_eq!((canonical.release.as_str(), canonical.branch), ("5.0dev", 500));

    let legacy = TransitionEngine::new(thursday(), PolicyMode::Legacy)
        .next_version(&current, &request)
        .unwrap();
    assert_eq!((legacy.release.as_str(), legacy.branch), ("4.6dev", 406));
}

#[test]
fn test_legacy_back_to_dev_on_development_still_fails() {
    let legacy = TransitionEngine::new(thursday(), PolicyMode::Legacy);
    let request = TransitionRequest::new("master", ReleaseType::BackToDev);

    let err = legacy
        .next_version(&development_version(), &request)
        .unwrap_err();
    assert!(matches!(err, ReleaseError::InvalidTransition(_)));
}
