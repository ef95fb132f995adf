// tests/resolve_dirs.rs

mod common;
use crate::common::init_tracing;

use std::error::Error;
use std::fs;
use std::path::PathBuf;

use rewatch::watch::{resolve_watch_set, WatchInputs};

type TestResult = Result<(), Box<dyn Error>>;

fn canon(path: impl Into<PathBuf>) -> PathBuf {
    let path = path.into();
    fs::canonicalize(&path).unwrap_or(path)
}

fn cwd_resolved() -> PathBuf {
    canon(std::env::current_dir().expect("cwd"))
}

#[test]
fn nested_watch_roots_collapse_to_outermost() -> TestResult {
    init_tracing();
    let td = tempfile::tempdir()?;
    fs::create_dir_all(td.path().join("a/b"))?;

    let inputs = WatchInputs {
        dirs: vec![
            td.path().join("a").display().to_string(),
            td.path().join("a/b").display().to_string(),
        ],
        include: vec![],
        exclude: vec![],
    };
    let set = resolve_watch_set(&inputs);

    let expected = canon(td.path().join("a"));
    assert_eq!(set.directories.len(), 1);
    assert!(set.directories.contains(&expected));
    Ok(())
}

#[test]
fn include_pattern_that_is_a_directory_is_watched() -> TestResult {
    init_tracing();
    let td = tempfile::tempdir()?;
    fs::create_dir_all(td.path().join("src"))?;

    let inputs = WatchInputs {
        dirs: vec![],
        include: vec![td.path().join("src").display().to_string()],
        exclude: vec![],
    };
    let set = resolve_watch_set(&inputs);

    assert!(set.directories.contains(&canon(td.path().join("src"))));
    assert!(set
        .include_patterns
        .contains(&td.path().join("src").display().to_string()));
    Ok(())
}

#[test]
fn glob_include_expands_to_matching_directories() -> TestResult {
    init_tracing();
    let td = tempfile::tempdir()?;
    fs::create_dir_all(td.path().join("src1"))?;
    fs::create_dir_all(td.path().join("src2"))?;
    fs::write(td.path().join("srcfile"), "not a dir")?;

    let inputs = WatchInputs {
        dirs: vec![],
        include: vec![td.path().join("src*").display().to_string()],
        exclude: vec![],
    };
    let set = resolve_watch_set(&inputs);

    assert!(set.directories.contains(&canon(td.path().join("src1"))));
    assert!(set.directories.contains(&canon(td.path().join("src2"))));
    assert_eq!(set.directories.len(), 2);
    Ok(())
}

#[test]
fn hidden_glob_pattern_alone_falls_back_to_cwd() -> TestResult {
    init_tracing();
    let inputs = WatchInputs {
        dirs: vec![],
        include: vec![".*".to_string()],
        exclude: vec![],
    };
    let set = resolve_watch_set(&inputs);

    // `.*` is skipped entirely: it neither restricts watching to hidden
    // directories nor survives as a pattern.
    assert!(!set.include_patterns.contains(".*"));
    assert_eq!(set.directories.len(), 1);
    assert!(set.directories.contains(&cwd_resolved()));
    Ok(())
}

#[test]
fn excluded_directory_removes_covered_watch_roots() -> TestResult {
    init_tracing();
    let td = tempfile::tempdir()?;
    fs::create_dir_all(td.path().join("a/b"))?;
    fs::create_dir_all(td.path().join("c"))?;

    let inputs = WatchInputs {
        dirs: vec![
            td.path().join("a/b").display().to_string(),
            td.path().join("c").display().to_string(),
        ],
        include: vec![],
        // Excluding the ancestor `a` removes the nested root `a/b`.
        exclude: vec![td.path().join("a").display().to_string()],
    };
    let set = resolve_watch_set(&inputs);

    assert_eq!(set.directories.len(), 1);
    assert!(set.directories.contains(&canon(td.path().join("c"))));
    Ok(())
}

#[test]
fn excluding_every_root_falls_back_to_cwd() -> TestResult {
    init_tracing();
    let td = tempfile::tempdir()?;
    fs::create_dir_all(td.path().join("a"))?;

    let dir = td.path().join("a").display().to_string();
    let inputs = WatchInputs {
        dirs: vec![dir.clone()],
        include: vec![],
        exclude: vec![dir],
    };
    let set = resolve_watch_set(&inputs);

    assert_eq!(set.directories.len(), 1);
    assert!(set.directories.contains(&cwd_resolved()));
    Ok(())
}

#[test]
fn identical_include_and_exclude_patterns_cancel_out() -> TestResult {
    init_tracing();
    let inputs = WatchInputs {
        dirs: vec![],
        include: vec!["*.nomatch".to_string()],
        exclude: vec!["*.nomatch".to_string()],
    };
    let set = resolve_watch_set(&inputs);

    assert!(!set.include_patterns.contains("*.nomatch"));
    assert!(set.exclude_patterns.contains("*.nomatch"));
    Ok(())
}

#[test]
fn missing_directories_are_dropped_silently() -> TestResult {
    init_tracing();
    let td = tempfile::tempdir()?;
    fs::create_dir_all(td.path().join("real"))?;

    let inputs = WatchInputs {
        dirs: vec![
            td.path().join("real").display().to_string(),
            td.path().join("does-not-exist").display().to_string(),
        ],
        include: vec![],
        exclude: vec![],
    };
    let set = resolve_watch_set(&inputs);

    assert_eq!(set.directories.len(), 1);
    assert!(set.directories.contains(&canon(td.path().join("real"))));
    Ok(())
}
