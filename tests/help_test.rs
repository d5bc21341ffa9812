//! Tests for the sidecar-or-probe help resolver

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use thicket::errors::TreeError;
use thicket::help::{resolve_help, sidecar_path, PROBE_ARG};

fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, body).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

// ============================================================
// Sidecar Tests
// ============================================================

#[test]
fn given_sidecar_when_resolving_then_script_is_never_probed() {
    // The script would fail AND print garbage if probed; the sidecar must win.
    let temp = TempDir::new().unwrap();
    let script = write_script(
        temp.path(),
        "deploy.sh",
        "#!/bin/sh\necho 'not: yaml you want'\nexit 1\n",
    );
    fs::write(
        sidecar_path(&script),
        "short: Deploy the app\nlong: Pushes the current build\n",
    )
    .unwrap();

    let help = resolve_help(&script).unwrap();

    assert_eq!(help.short, "Deploy the app");
    assert_eq!(help.long, "Pushes the current build");
}

#[test]
fn given_malformed_sidecar_when_resolving_then_fails_with_parse_error() {
    let temp = TempDir::new().unwrap();
    let script = write_script(temp.path(), "deploy.sh", "#!/bin/sh\nexit 0\n");
    fs::write(sidecar_path(&script), ": not [ valid yaml\n").unwrap();

    let result = resolve_help(&script);

    assert!(matches!(result, Err(TreeError::Parse { .. })), "got {result:?}");
}

// ============================================================
// Probe Tests
// ============================================================

#[test]
fn given_no_sidecar_when_resolving_then_probe_output_is_parsed() {
    let temp = TempDir::new().unwrap();
    let body = format!(
        "#!/bin/sh\nif [ \"$1\" = \"{PROBE_ARG}\" ]; then\n  echo 'short: S'\n  echo 'long: L'\n  exit 0\nfi\nexit 1\n"
    );
    let script = write_script(temp.path(), "greet", &body);

    let help = resolve_help(&script).unwrap();

    assert_eq!(help.short, "S");
    assert_eq!(help.long, "L");
}

#[test]
fn given_probe_exiting_nonzero_when_resolving_then_fails_with_probe_error() {
    let temp = TempDir::new().unwrap();
    let script = write_script(temp.path(), "grumpy", "#!/bin/sh\nexit 3\n");

    let result = resolve_help(&script);

    assert!(matches!(result, Err(TreeError::Probe { .. })), "got {result:?}");
}

#[test]
fn given_probe_printing_non_document_when_resolving_then_fails_with_parse_error() {
    // A bare scalar is valid YAML but not a help document
    let temp = TempDir::new().unwrap();
    let script = write_script(temp.path(), "chatty", "#!/bin/sh\necho 'just some text'\n");

    let result = resolve_help(&script);

    assert!(matches!(result, Err(TreeError::Parse { .. })), "got {result:?}");
}

#[test]
fn given_missing_target_when_resolving_then_fails_with_probe_error() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("gone");

    let result = resolve_help(&missing);

    assert!(matches!(result, Err(TreeError::Probe { .. })), "got {result:?}");
}

#[test]
fn given_probe_omitting_long_when_resolving_then_missing_field_defaults_to_empty() {
    let temp = TempDir::new().unwrap();
    let script = write_script(temp.path(), "terse", "#!/bin/sh\necho 'short: S'\n");

    let help = resolve_help(&script).unwrap();

    assert_eq!(help.short, "S");
    assert_eq!(help.long, "");
}
