// model = "claude-opus-4-5"
// created = "2026-10-18"
// modified = "2026-10-18"
// driver = "Isaac Clayton"

//! Directory collaborators: list one directory level and apply renames.
//!
//! Renames are either applied in plan order, which is only valid when the
//! plan says so, or staged: every source first goes to a temporary name,
//! then every temporary goes to its destination. Both refuse to overwrite
//! anything that is not itself being moved.

use rustc_hash::FxHashSet;
use std::fs;
use std::path::Path;

use crate::error::NmvError;
use crate::error::Result;
use crate::plan::Plan;
use crate::plan::Rename;

/// File names in `dir`, non-recursive. Subdirectories and names that are
/// not valid UTF-8 are skipped.
pub fn scan(dir: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(dir).map_err(|e| NmvError::io(dir, "read_dir", e))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| NmvError::io(dir, "read_dir", e))?;
        let file_type = entry
            .file_type()
            .map_err(|e| NmvError::io(entry.path(), "stat", e))?;
        if file_type.is_dir() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(raw) => log::debug!("skipping non UTF-8 name {:?}", raw),
        }
    }

    names.sort();
    return Ok(names);
}

/// Apply a plan in `dir`, staging through temporary names when the plan
/// is not safe in order or when `stage` is set.
pub fn apply(dir: &Path, plan: &Plan, stage: bool) -> Result<()> {
    if stage || !plan.sequential_safe {
        return apply_staged(dir, &plan.renames);
    }
    return apply_sequential(dir, plan.sequential()?);
}

/// Apply renames one after another in the given order.
pub fn apply_sequential(dir: &Path, renames: &[Rename]) -> Result<()> {
    check_destinations(dir, renames)?;

    for rename in renames {
        let to = dir.join(&rename.to);
        if exists(&to) {
            return Err(NmvError::DestinationExists { path: to });
        }
        rename_file(dir, &rename.from, &rename.to)?;
    }
    return Ok(());
}

/// Apply renames in two phases through temporary names.
///
/// If any rename fails, every move already made is undone in reverse so
/// no file is left under a temporary name.
pub fn apply_staged(dir: &Path, renames: &[Rename]) -> Result<()> {
    check_destinations(dir, renames)?;

    let mut done: Vec<(String, String)> = Vec::with_capacity(renames.len() * 2);
    if let Err(err) = stage_all(dir, renames, &mut done) {
        log::warn!("staged rename failed, undoing {} moves", done.len());
        rollback(dir, &done);
        return Err(err);
    }
    return Ok(());
}

/// Both phases of a staged apply, recording each completed move.
fn stage_all(dir: &Path, renames: &[Rename], done: &mut Vec<(String, String)>) -> Result<()> {
    let temps: Vec<String> = renames.iter().map(|r| staging_name(&r.from)).collect();

    for (rename, temp) in renames.iter().zip(&temps) {
        if exists(&dir.join(temp)) {
            return Err(NmvError::DestinationExists {
                path: dir.join(temp),
            });
        }
        rename_file(dir, &rename.from, temp)?;
        done.push((rename.from.clone(), temp.clone()));
    }

    for (rename, temp) in renames.iter().zip(&temps) {
        rename_file(dir, temp, &rename.to)?;
        done.push((temp.clone(), rename.to.clone()));
    }
    return Ok(());
}

/// Undo completed moves, newest first.
fn rollback(dir: &Path, done: &[(String, String)]) {
    for (from, to) in done.iter().rev() {
        if let Err(err) = rename_file(dir, to, from) {
            log::error!("could not restore {} (left as {}): {}", from, to, err);
        }
    }
}

/// Temporary name a source is parked under during a staged apply.
pub fn staging_name(from: &str) -> String {
    let hex = blake3::hash(from.as_bytes()).to_hex();
    return format!(".nmv-{}.tmp", &hex.as_str()[..16]);
}

/// Every destination must be free or be a source that is moving away.
fn check_destinations(dir: &Path, renames: &[Rename]) -> Result<()> {
    let sources: FxHashSet<&str> = renames.iter().map(|r| r.from.as_str()).collect();
    for rename in renames {
        let to = dir.join(&rename.to);
        if exists(&to) && !sources.contains(rename.to.as_str()) {
            return Err(NmvError::DestinationExists { path: to });
        }
    }
    return Ok(());
}

fn exists(path: &Path) -> bool {
    return fs::symlink_metadata(path).is_ok();
}

fn rename_file(dir: &Path, from: &str, to: &str) -> Result<()> {
    let source = dir.join(from);
    fs::rename(&source, dir.join(to)).map_err(|e| NmvError::io(source, "rename", e))?;
    log::info!("{} -> {}", from, to);
    return Ok(());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staging_names_are_hidden_and_distinct() {
        let a = staging_name("0001_a.txt");
        let b = staging_name("0002_a.txt");
        assert!(a.starts_with(".nmv-"));
        assert!(a.ends_with(".tmp"));
        assert_eq!(a.len(), ".nmv-".len() + 16 + ".tmp".len());
        assert_ne!(a, b);
        assert_eq!(a, staging_name("0001_a.txt"));
    }

    #[test]
    fn rollback_restores_in_reverse() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("1_a"), "a").unwrap();

        // 1_a -> t -> 2_a, undone as 2_a -> t -> 1_a.
        let temp = staging_name("1_a");
        rename_file(tmp.path(), "1_a", &temp).unwrap();
        rename_file(tmp.path(), &temp, "2_a").unwrap();
        let done = vec![
            ("1_a".to_string(), temp.clone()),
            (temp.clone(), "2_a".to_string()),
        ];
        rollback(tmp.path(), &done);

        assert!(exists(&tmp.path().join("1_a")));
        assert!(!exists(&tmp.path().join("2_a")));
        assert!(!exists(&tmp.path().join(&temp)));
    }

    #[test]
    fn staging_names_are_not_prefixed() {
        assert!(crate::name::parse(&staging_name("1_a")).is_err());
    }
}
