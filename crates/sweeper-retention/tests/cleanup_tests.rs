use chrono::{DateTime, Duration, Local};
use std::fs::{self, File};
use std::io;
use std::path::Path;
use sweeper_retention::{
    Cleaner, EntryRemover, Error, RemovalReason, RetentionPolicy, TreeRemover, cleanup,
};
use tempfile::TempDir;

fn noon_today() -> DateTime<Local> {
    Local::now()
        .date_naive()
        .and_hms_opt(12, 0, 0)
        .unwrap()
        .and_local_timezone(Local)
        .earliest()
        .unwrap()
}

fn write_manifest(root: &Path, content: &str) {
    fs::write(root.join(".cleanup-authorisation"), content).unwrap();
}

fn create_release(root: &Path, name: &str, modified: DateTime<Local>) {
    let release = root.join(name);
    fs::create_dir_all(release.join("lib")).unwrap();
    fs::write(release.join("lib/app.jar"), name).unwrap();
    fs::write(release.join("VERSION"), name).unwrap();

    File::open(&release)
        .unwrap()
        .set_modified(modified.into())
        .unwrap();
}

/// Twenty releases: the five oldest predate any 10-day cutoff, the fifteen
/// newest were made today.
fn setup_quota_layout(root: &Path, now: DateTime<Local>) {
    write_manifest(root, "-S-\n");
    for i in 1..=20 {
        let modified = if i <= 5 {
            now - Duration::days(31 - i)
        } else {
            now - Duration::hours(21 - i)
        };
        create_release(root, &format!("release-S-{:02}", i), modified);
    }
}

/// Twenty releases one day apart, the newest made `now`.
fn setup_daily_layout(root: &Path, now: DateTime<Local>) {
    write_manifest(root, "-S-\n");
    for i in 1..=20 {
        create_release(root, &format!("release-S-{:02}", i), now - Duration::days(20 - i));
    }
}

fn release_names(root: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(root)
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .filter(|name| name.starts_with("release-"))
        .collect();
    names.sort();
    names
}

#[test]
fn test_removes_oldest_over_quota() {
    let temp_dir = TempDir::new().unwrap();
    let now = noon_today();
    setup_quota_layout(temp_dir.path(), now);

    let report = Cleaner::new(RetentionPolicy::new(10, 15, 5), false)
        .cleanup_at(temp_dir.path(), now)
        .expect("cleanup failed");

    assert_eq!(report.eligible, 20);
    assert_eq!(report.removed_count(), 5);
    assert!(report.is_complete());

    let remaining = release_names(temp_dir.path());
    assert_eq!(remaining.len(), 15);
    assert_eq!(remaining[0], "release-S-06");
}

#[test]
fn test_floor_limits_removals() {
    let temp_dir = TempDir::new().unwrap();
    let now = noon_today();
    setup_quota_layout(temp_dir.path(), now);

    let report = Cleaner::new(RetentionPolicy::new(10, 15, 18), false)
        .cleanup_at(temp_dir.path(), now)
        .expect("cleanup failed");

    assert_eq!(report.removed_count(), 2);
    assert_eq!(release_names(temp_dir.path()).len(), 18);
    assert!(!temp_dir.path().join("release-S-01").exists());
    assert!(!temp_dir.path().join("release-S-02").exists());
    assert!(temp_dir.path().join("release-S-03").exists());
}

#[test]
fn test_daily_releases_removed_by_age() {
    let temp_dir = TempDir::new().unwrap();
    let now = noon_today();
    setup_daily_layout(temp_dir.path(), now);

    let report = Cleaner::new(RetentionPolicy::new(10, 15, 5), false)
        .cleanup_at(temp_dir.path(), now)
        .expect("cleanup failed");

    assert_eq!(report.removed_count(), 9);
    assert!(report.removed.iter().all(|r| r.reason == RemovalReason::Age));
    assert_eq!(release_names(temp_dir.path())[0], "release-S-10");
}

#[test]
fn test_small_set_is_left_alone() {
    let temp_dir = TempDir::new().unwrap();
    let now = noon_today();
    write_manifest(temp_dir.path(), "-S-\n");
    for i in 1..=4 {
        create_release(
            temp_dir.path(),
            &format!("release-S-{:02}", i),
            now - Duration::days(100 + i),
        );
    }

    let report = Cleaner::new(RetentionPolicy::new(10, 1, 5), false)
        .cleanup_at(temp_dir.path(), now)
        .expect("cleanup failed");

    assert_eq!(report.removed_count(), 0);
    assert_eq!(report.kept_count(), 4);
    assert_eq!(release_names(temp_dir.path()).len(), 4);
}

#[test]
fn test_unauthorised_entries_are_invisible() {
    let temp_dir = TempDir::new().unwrap();
    let now = noon_today();
    setup_quota_layout(temp_dir.path(), now);
    create_release(temp_dir.path(), "scratch-01", now - Duration::days(365));

    let report = Cleaner::new(RetentionPolicy::new(10, 15, 5), false)
        .cleanup_at(temp_dir.path(), now)
        .expect("cleanup failed");

    assert_eq!(report.eligible, 20);
    assert!(temp_dir.path().join("scratch-01").exists());
    assert!(report.removed.iter().all(|r| r.entry.name != "scratch-01"));
    assert!(report.kept.iter().all(|k| k.entry.name != "scratch-01"));
    assert!(temp_dir.path().join(".cleanup-authorisation").exists());
}

#[test]
fn test_dry_run_touches_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let now = noon_today();
    setup_quota_layout(temp_dir.path(), now);

    let report = Cleaner::new(RetentionPolicy::new(10, 15, 5), true)
        .cleanup_at(temp_dir.path(), now)
        .expect("cleanup failed");

    assert!(report.dry_run);
    assert_eq!(report.removed_count(), 5);
    assert_eq!(release_names(temp_dir.path()).len(), 20);
    assert!(temp_dir.path().join("release-S-01/lib/app.jar").exists());
}

#[test]
fn test_second_run_removes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let now = noon_today();
    setup_daily_layout(temp_dir.path(), now);

    let cleaner = Cleaner::new(RetentionPolicy::new(10, 15, 5), false);
    let first = cleaner.cleanup_at(temp_dir.path(), now).unwrap();
    let second = cleaner.cleanup_at(temp_dir.path(), now).unwrap();

    assert_eq!(first.removed_count(), 9);
    assert_eq!(second.removed_count(), 0);
    assert_eq!(second.eligible, 11);
}

#[test]
fn test_missing_manifest_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let now = noon_today();
    setup_daily_layout(temp_dir.path(), now);
    fs::remove_file(temp_dir.path().join(".cleanup-authorisation")).unwrap();

    let result =
        Cleaner::new(RetentionPolicy::new(0, 0, 0), false).cleanup_at(temp_dir.path(), now);

    assert!(matches!(result, Err(Error::ManifestMissing(_))));
    assert_eq!(release_names(temp_dir.path()).len(), 20);
}

#[test]
fn test_not_a_directory_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("release-S-01.tar");
    fs::write(&file, "tar").unwrap();

    let result = cleanup(&file, RetentionPolicy::default(), false);
    assert!(matches!(result, Err(Error::NotADirectory(_))));

    let result = cleanup(&temp_dir.path().join("missing"), RetentionPolicy::default(), false);
    assert!(matches!(result, Err(Error::NotADirectory(_))));
}

#[test]
fn test_empty_manifest_uses_default_patterns() {
    let temp_dir = TempDir::new().unwrap();
    let now = noon_today();
    write_manifest(temp_dir.path(), "");
    for i in 1..=3 {
        create_release(
            temp_dir.path(),
            &format!("release-RC-{:02}", i),
            now - Duration::days(40 + i),
        );
    }

    let dry = Cleaner::new(RetentionPolicy::new(10, 15, 1), true);
    assert_eq!(dry.cleanup_at(temp_dir.path(), now).unwrap().eligible, 0);

    let report = dry
        .with_default_patterns(vec!["-RC-".to_string()])
        .cleanup_at(temp_dir.path(), now)
        .unwrap();
    assert_eq!(report.eligible, 3);
    assert_eq!(report.removed_count(), 2);
}

#[test]
fn test_default_policy_via_convenience_function() {
    let temp_dir = TempDir::new().unwrap();
    setup_quota_layout(temp_dir.path(), noon_today());

    // Defaults are older_than=10, keep_max=15, keep_min=5 with a dry run.
    let removed = cleanup(temp_dir.path(), RetentionPolicy::default(), true).unwrap();
    assert!(removed >= 5);
    assert_eq!(release_names(temp_dir.path()).len(), 20);
}

struct FailingRemover {
    fail_on: &'static str,
}

impl EntryRemover for FailingRemover {
    fn remove_entry(&self, path: &Path) -> io::Result<()> {
        if path.ends_with(self.fail_on) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "locked"));
        }
        TreeRemover.remove_entry(path)
    }
}

#[test]
fn test_removal_failures_do_not_abort_batch() {
    let temp_dir = TempDir::new().unwrap();
    let now = noon_today();
    setup_quota_layout(temp_dir.path(), now);

    let report = Cleaner::new(RetentionPolicy::new(10, 15, 5), false)
        .with_remover(FailingRemover {
            fail_on: "release-S-02",
        })
        .cleanup_at(temp_dir.path(), now)
        .expect("cleanup failed");

    assert_eq!(report.removed_count(), 5);
    assert!(!report.is_complete());
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].entry.name, "release-S-02");
    assert_eq!(
        report.failures[0].error.kind(),
        io::ErrorKind::PermissionDenied
    );

    assert!(temp_dir.path().join("release-S-02").exists());
    for name in ["release-S-01", "release-S-03", "release-S-04", "release-S-05"] {
        assert!(!temp_dir.path().join(name).exists());
    }
}
