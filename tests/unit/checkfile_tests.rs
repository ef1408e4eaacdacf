//! Unit tests for the declarative checkfile loader.

#![allow(clippy::expect_used)]

use hostspec_cli::domain::assertion::{Expectation, OsFamily, SubjectKind};
use hostspec_cli::domain::error::CheckfileError;
use hostspec_cli::infra::checkfile;

const ACCEPTANCE: &str = include_str!("../fixtures/acceptance.yaml");

#[test]
fn test_acceptance_fixture_parses() {
    let file = checkfile::parse(ACCEPTANCE).expect("fixture is valid");
    assert_eq!(file.os_family, Some(OsFamily::Debian));
    let assertions = file.into_assertions().expect("fixture converts");
    assert_eq!(assertions.len(), 11);
}

#[test]
fn test_acceptance_fixture_package_entries() {
    let assertions = checkfile::parse(ACCEPTANCE)
        .expect("valid")
        .into_assertions()
        .expect("converts");
    assert_eq!(assertions[0].kind(), SubjectKind::Package);
    assert_eq!(assertions[0].identifier(), "python3.5");
    assert_eq!(assertions[0].expectations(), &[Expectation::Installed]);
}

#[test]
fn test_acceptance_fixture_user_entry_expands_groups() {
    let assertions = checkfile::parse(ACCEPTANCE)
        .expect("valid")
        .into_assertions()
        .expect("converts");
    let user = &assertions[3];
    assert_eq!(user.kind(), SubjectKind::User);
    assert_eq!(
        user.expectations(),
        &[
            Expectation::Exists,
            Expectation::BelongsToGroup("preservicaservice".to_string()),
        ]
    );
}

#[test]
fn test_acceptance_fixture_file_mode_entry() {
    let assertions = checkfile::parse(ACCEPTANCE)
        .expect("valid")
        .into_assertions()
        .expect("converts");
    let run = &assertions[6];
    assert_eq!(run.identifier(), "/home/preservicaservice/app/bin/run");
    assert_eq!(
        run.expectations(),
        &[Expectation::IsFile, Expectation::ModeEquals(0o755)]
    );
}

#[test]
fn test_acceptance_fixture_path_entry_checks_bare_existence() {
    let assertions = checkfile::parse(ACCEPTANCE)
        .expect("valid")
        .into_assertions()
        .expect("converts");
    let unit = &assertions[7];
    assert_eq!(
        unit.identifier(),
        "/lib/systemd/system/preservicaservice.service"
    );
    assert_eq!(unit.expectations(), &[Expectation::Exists]);
}

#[test]
fn test_acceptance_fixture_directory_owner_entry() {
    let assertions = checkfile::parse(ACCEPTANCE)
        .expect("valid")
        .into_assertions()
        .expect("converts");
    let log_dir = &assertions[8];
    assert_eq!(log_dir.kind(), SubjectKind::Directory);
    assert_eq!(
        log_dir.expectations(),
        &[
            Expectation::IsDirectory,
            Expectation::OwnedBy("syslog".to_string()),
        ]
    );
}

#[test]
fn test_acceptance_fixture_contains_entry_preserves_line() {
    let assertions = checkfile::parse(ACCEPTANCE)
        .expect("valid")
        .into_assertions()
        .expect("converts");
    let rsyslog_conf = &assertions[9];
    assert_eq!(
        rsyslog_conf.expectations()[1],
        Expectation::ContainsLine(
            "local0.*  /var/log/preservicaservice/debug.log".to_string()
        )
    );
}

// ── Validation failures ──────────────────────────────────────────────────────

#[test]
fn test_entry_without_subject_is_rejected() {
    let file = checkfile::parse("checks:\n  - mode: \"755\"\n").expect("parses");
    let err = file.into_assertions().expect_err("no subject");
    assert!(matches!(err, CheckfileError::MissingSubject { index: 0 }));
}

#[test]
fn test_entry_with_two_subjects_is_rejected() {
    let file =
        checkfile::parse("checks:\n  - package: rsyslog\n    user: syslog\n").expect("parses");
    let err = file.into_assertions().expect_err("ambiguous subject");
    assert!(matches!(err, CheckfileError::AmbiguousSubject { index: 0 }));
}

#[test]
fn test_invalid_mode_is_rejected() {
    let file = checkfile::parse("checks:\n  - file: /srv/run\n    mode: \"rwxr-xr-x\"\n")
        .expect("parses");
    let err = file.into_assertions().expect_err("invalid mode");
    assert!(matches!(err, CheckfileError::InvalidMode { index: 0, .. }));
}

#[test]
fn test_mode_with_digit_eight_is_rejected() {
    let file =
        checkfile::parse("checks:\n  - file: /srv/run\n    mode: \"758\"\n").expect("parses");
    assert!(file.into_assertions().is_err());
}

#[test]
fn test_empty_check_list_is_rejected() {
    let file = checkfile::parse("checks: []\n").expect("parses");
    let err = file.into_assertions().expect_err("empty");
    assert!(matches!(err, CheckfileError::Empty));
}

#[test]
fn test_empty_identifier_is_rejected() {
    let file = checkfile::parse("checks:\n  - package: \"\"\n").expect("parses");
    let err = file.into_assertions().expect_err("empty identifier");
    assert!(matches!(err, CheckfileError::Invalid { index: 0, .. }));
}

#[test]
fn test_unknown_key_is_rejected_at_parse_time() {
    let result = checkfile::parse("checks:\n  - package: rsyslog\n    shasum: abc\n");
    assert!(result.is_err());
}

#[test]
fn test_missing_os_family_defaults_to_none() {
    let file = checkfile::parse("checks:\n  - package: rsyslog\n").expect("parses");
    assert_eq!(file.os_family, None);
}

#[test]
fn test_os_family_redhat_parses() {
    let file =
        checkfile::parse("os_family: redhat\nchecks:\n  - package: rsyslog\n").expect("parses");
    assert_eq!(file.os_family, Some(OsFamily::RedHat));
}

#[test]
fn test_load_missing_file_errors_with_path() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let missing = dir.path().join("absent.yaml");
    let err = checkfile::load(&missing).expect_err("missing file");
    assert!(err.to_string().contains("absent.yaml"));
}

#[test]
fn test_load_reads_file_from_disk() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let path = dir.path().join("hostspec.yaml");
    std::fs::write(&path, "checks:\n  - package: rsyslog\n").expect("write");
    let file = checkfile::load(&path).expect("loads");
    let assertions = file.into_assertions().expect("converts");
    assert_eq!(assertions.len(), 1);
}
