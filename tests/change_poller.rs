// tests/change_poller.rs

mod common;
use crate::common::init_tracing;

use std::collections::BTreeSet;
use std::error::Error;
use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};

use rewatch::watch::{ChangePoller, WatchSet};

type TestResult = Result<(), Box<dyn Error>>;

fn watch_set_for(dir: &Path) -> WatchSet {
    WatchSet {
        include_patterns: BTreeSet::new(),
        exclude_patterns: BTreeSet::new(),
        directories: [dir.to_path_buf()].into_iter().collect(),
    }
}

fn bump_mtime(path: &Path, forward: Duration) -> TestResult {
    let file = fs::File::options().append(true).open(path)?;
    file.set_modified(SystemTime::now() + forward)?;
    Ok(())
}

#[test]
fn first_observation_never_triggers() -> TestResult {
    init_tracing();
    let td = tempfile::tempdir()?;
    fs::write(td.path().join("app.py"), "print('hi')")?;

    let mut poller = ChangePoller::new(watch_set_for(td.path()), "py");
    assert_eq!(poller.poll(), None);
    assert_eq!(poller.tracked_files(), 1);
    Ok(())
}

#[test]
fn unchanged_mtime_never_triggers() -> TestResult {
    init_tracing();
    let td = tempfile::tempdir()?;
    fs::write(td.path().join("app.py"), "print('hi')")?;

    let mut poller = ChangePoller::new(watch_set_for(td.path()), "py");
    assert_eq!(poller.poll(), None);
    assert_eq!(poller.poll(), None);
    Ok(())
}

#[test]
fn newer_mtime_triggers_and_reports_the_file() -> TestResult {
    init_tracing();
    let td = tempfile::tempdir()?;
    let file = td.path().join("app.py");
    fs::write(&file, "print('hi')")?;

    let mut poller = ChangePoller::new(watch_set_for(td.path()), "py");
    assert_eq!(poller.poll(), None);

    bump_mtime(&file, Duration::from_secs(5))?;
    let changed = poller.poll().expect("a change should be reported");
    assert_eq!(changed.file_name(), file.file_name());
    Ok(())
}

#[test]
fn files_with_other_extensions_are_ignored() -> TestResult {
    init_tracing();
    let td = tempfile::tempdir()?;
    fs::write(td.path().join("notes.txt"), "scratch")?;
    fs::write(td.path().join("app.py"), "print('hi')")?;

    let mut poller = ChangePoller::new(watch_set_for(td.path()), "py");
    assert_eq!(poller.poll(), None);
    assert_eq!(poller.tracked_files(), 1);
    Ok(())
}

#[test]
fn nested_files_are_found_recursively() -> TestResult {
    init_tracing();
    let td = tempfile::tempdir()?;
    fs::create_dir_all(td.path().join("pkg/sub"))?;
    let file = td.path().join("pkg/sub/mod.py");
    fs::write(&file, "x = 1")?;

    let mut poller = ChangePoller::new(watch_set_for(td.path()), "py");
    assert_eq!(poller.poll(), None);
    assert_eq!(poller.tracked_files(), 1);

    bump_mtime(&file, Duration::from_secs(5))?;
    assert!(poller.poll().is_some());
    Ok(())
}

#[test]
fn reset_restores_cold_start() -> TestResult {
    init_tracing();
    let td = tempfile::tempdir()?;
    let file = td.path().join("app.py");
    fs::write(&file, "print('hi')")?;

    let mut poller = ChangePoller::new(watch_set_for(td.path()), "py");
    assert_eq!(poller.poll(), None);

    bump_mtime(&file, Duration::from_secs(5))?;
    poller.reset();
    assert_eq!(poller.tracked_files(), 0);

    // The newer mtime is observed for the first time after the reset, so it
    // seeds the index instead of triggering.
    assert_eq!(poller.poll(), None);
    assert_eq!(poller.tracked_files(), 1);
    Ok(())
}

#[test]
fn vanished_files_are_skipped_silently() -> TestResult {
    init_tracing();
    let td = tempfile::tempdir()?;
    let file = td.path().join("app.py");
    fs::write(&file, "print('hi')")?;

    let mut poller = ChangePoller::new(watch_set_for(td.path()), "py");
    assert_eq!(poller.poll(), None);

    fs::remove_file(&file)?;
    assert_eq!(poller.poll(), None);
    Ok(())
}
