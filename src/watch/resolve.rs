// src/watch/resolve.rs

//! Watch-directory resolution.
//!
//! Raw inputs (watch roots, include patterns, exclude patterns) are turned
//! into a canonical [`WatchSet`]: absolute, symlink-resolved directories with
//! nesting collapsed to the outermost survivor, plus the normalized pattern
//! strings. Resolution runs once per supervisor lifetime, at startup.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

/// Raw watch inputs as collected from the CLI / config file.
///
/// Duplicates are allowed and removed during resolution; order is irrelevant.
#[derive(Debug, Clone, Default)]
pub struct WatchInputs {
    pub dirs: Vec<String>,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

/// Canonical result of watch-directory resolution.
///
/// Invariants:
/// - no member of `directories` is an ancestor of another member;
/// - `directories` is never empty (cwd fallback);
/// - `BTreeSet` keeps membership and log output independent of input order.
#[derive(Debug, Clone)]
pub struct WatchSet {
    pub include_patterns: BTreeSet<String>,
    pub exclude_patterns: BTreeSet<String>,
    pub directories: BTreeSet<PathBuf>,
}

/// Resolve raw watch inputs into a [`WatchSet`].
pub fn resolve_watch_set(inputs: &WatchInputs) -> WatchSet {
    let (include_patterns, mut directories) =
        resolve_patterns(&inputs.include, &inputs.dirs);
    let (exclude_patterns, exclude_dirs) = resolve_patterns(&inputs.exclude, &[]);

    // An include directory covered by an exclude directory (equal to it or
    // one of its descendants) is dropped.
    directories.retain(|dir| !exclude_dirs.iter().any(|ex| dir.starts_with(ex)));

    // Identical include/exclude pattern strings cancel out.
    let include_patterns: BTreeSet<String> = include_patterns
        .difference(&exclude_patterns)
        .cloned()
        .collect();

    if directories.is_empty() {
        if !inputs.dirs.is_empty() {
            warn!(
                "Provided watch directories {:?} did not contain valid directories, \
                 watching current working directory.",
                inputs.dirs
            );
        }
        directories.insert(current_dir_resolved());
    }

    info!(
        "Will watch for changes in these directories: {:?}",
        directories.iter().collect::<Vec<_>>()
    );

    WatchSet {
        include_patterns,
        exclude_patterns,
        directories,
    }
}

/// Resolve one pattern list (plus optional explicit roots) into normalized
/// pattern strings and canonical, non-nested directories.
fn resolve_patterns(
    patterns: &[String],
    roots: &[String],
) -> (BTreeSet<String>, BTreeSet<PathBuf>) {
    let mut out_patterns: BTreeSet<String> = BTreeSet::new();
    let mut candidates: BTreeSet<PathBuf> =
        roots.iter().map(PathBuf::from).collect();

    for pattern in patterns {
        // Special case for the `.*` pattern, otherwise this would only match
        // hidden directories which is probably undesired.
        if pattern == ".*" {
            continue;
        }
        out_patterns.insert(pattern.clone());

        let as_path = PathBuf::from(pattern);
        if is_dir(&as_path) {
            candidates.insert(as_path);
        } else {
            expand_glob(pattern, &mut candidates);
        }
    }

    // Canonicalize and keep existing directories only. Stat errors exclude
    // the entry rather than failing resolution.
    let resolved: BTreeSet<PathBuf> = candidates
        .into_iter()
        .filter_map(|p| std::fs::canonicalize(&p).ok())
        .filter(|p| p.is_dir())
        .collect();

    (out_patterns, collapse_nested(&resolved))
}

/// Expand a glob pattern against the current working directory, adding any
/// directory matches to `candidates`.
fn expand_glob(pattern: &str, candidates: &mut BTreeSet<PathBuf>) {
    let paths = match glob::glob(pattern) {
        Ok(paths) => paths,
        Err(e) => {
            warn!(pattern = %pattern, error = %e, "invalid watch pattern; ignoring");
            return;
        }
    };
    for entry in paths {
        match entry {
            Ok(path) if is_dir(&path) => {
                candidates.insert(path);
            }
            Ok(_) => {}
            Err(e) => {
                debug!(pattern = %pattern, error = %e, "skipping unreadable glob match");
            }
        }
    }
}

/// Remove nested directories: whenever one path is an ancestor of another,
/// only the ancestor survives (recursion covers the descendant anyway).
///
/// Pairwise comparison is O(n²); watch sets are small and this runs once per
/// supervisor lifetime.
pub fn collapse_nested(dirs: &BTreeSet<PathBuf>) -> BTreeSet<PathBuf> {
    dirs.iter()
        .filter(|dir| {
            !dirs
                .iter()
                .any(|other| *dir != other && dir.starts_with(other))
        })
        .cloned()
        .collect()
}

fn is_dir(path: &Path) -> bool {
    // Metadata errors (permission denied, dangling symlink) exclude the
    // candidate instead of failing resolution.
    path.is_dir()
}

fn current_dir_resolved() -> PathBuf {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    std::fs::canonicalize(&cwd).unwrap_or(cwd)
}

/// Render a path relative to cwd when possible, quoted for log lines.
pub fn display_path(path: &Path) -> String {
    let rel = std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(&cwd).map(Path::to_path_buf).ok());
    match rel {
        Some(rel) => format!("'{}'", rel.display()),
        None => format!("'{}'", path.display()),
    }
}
