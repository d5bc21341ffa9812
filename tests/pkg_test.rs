//! Tests for the package manager (operator install/remove)

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use thicket::errors::PkgError;
use thicket::pkg::{install, remove};
use thicket::tree::{self, CommandNode};

fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, body).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

// ============================================================
// Install Tests
// ============================================================

#[test]
fn given_file_when_installing_then_copies_to_destination() {
    let temp = TempDir::new().unwrap();
    let src = write_script(temp.path(), "tool.sh", "#!/bin/sh\nexit 0\n");
    let dst = temp.path().join("root/tool.sh");

    install(&src, &dst, false).unwrap();

    assert!(dst.exists());
    assert!(src.exists(), "install copies, never moves");
}

#[test]
fn given_directory_bundle_when_installing_then_copies_recursively() {
    let temp = TempDir::new().unwrap();
    let bundle = temp.path().join("bundle");
    fs::create_dir_all(bundle.join("nested")).unwrap();
    write_script(&bundle, "a.sh", "#!/bin/sh\nexit 0\n");
    write_script(&bundle.join("nested"), "b.sh", "#!/bin/sh\nexit 0\n");
    let dst = temp.path().join("root/bundle");

    install(&bundle, &dst, false).unwrap();

    assert!(dst.join("a.sh").exists());
    assert!(dst.join("nested/b.sh").exists());
}

#[test]
fn given_existing_destination_when_installing_then_fails_without_force() {
    let temp = TempDir::new().unwrap();
    let src = write_script(temp.path(), "tool.sh", "#!/bin/sh\nexit 0\n");
    let dst = temp.path().join("taken");
    fs::write(&dst, "occupied").unwrap();

    let result = install(&src, &dst, false);

    assert!(matches!(result, Err(PkgError::Exists(_))));
    assert_eq!(fs::read_to_string(&dst).unwrap(), "occupied");
}

#[test]
fn given_existing_destination_when_installing_with_force_then_replaces_it() {
    let temp = TempDir::new().unwrap();
    let src = write_script(temp.path(), "tool.sh", "#!/bin/sh\nexit 9\n");
    let dst = temp.path().join("taken");
    fs::write(&dst, "occupied").unwrap();

    install(&src, &dst, true).unwrap();

    assert_eq!(fs::read_to_string(&dst).unwrap(), "#!/bin/sh\nexit 9\n");
}

#[test]
fn given_missing_source_when_installing_then_fails() {
    let temp = TempDir::new().unwrap();

    let result = install(&temp.path().join("nope"), &temp.path().join("dst"), false);

    assert!(matches!(result, Err(PkgError::Missing(_))));
}

// ============================================================
// Remove Tests
// ============================================================

#[test]
fn given_installed_directory_when_removing_then_deletes_recursively() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("bundle");
    fs::create_dir_all(dir.join("nested")).unwrap();
    fs::write(dir.join("nested/x"), "x").unwrap();

    remove(&dir, false).unwrap();

    assert!(!dir.exists());
}

#[test]
fn given_missing_target_when_removing_then_fails_without_force() {
    let temp = TempDir::new().unwrap();

    let result = remove(&temp.path().join("nope"), false);

    assert!(matches!(result, Err(PkgError::Missing(_))));
}

#[test]
fn given_missing_target_when_removing_with_force_then_succeeds_as_noop() {
    let temp = TempDir::new().unwrap();

    remove(&temp.path().join("nope"), true).unwrap();
}

// ============================================================
// Rescan Contract Tests
// ============================================================

#[test]
fn given_freshly_installed_script_when_rebuilding_then_new_leaf_is_discovered() {
    // No invalidation step: a fresh build alone must pick up the install
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("root");
    fs::create_dir(&root).unwrap();
    let before = tree::build(&root).unwrap();
    assert!(before.is_empty());

    let src = write_script(temp.path(), "newcmd.sh", "#!/bin/sh\nexit 0\n");
    install(&src, &root.join("newcmd.sh"), false).unwrap();

    let after = tree::build(&root).unwrap();
    assert!(matches!(after.get("newcmd"), Some(CommandNode::Leaf(_))));
}
