use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
#[cfg(unix)]
use std::path::Path;
use tempfile::tempdir;

fn xplat() -> Command {
    Command::cargo_bin("xplat").unwrap()
}

#[cfg(unix)]
fn write_version_script(project_root: &Path, platform: &str, body: &str) {
    use std::os::unix::fs::PermissionsExt;

    let script_dir = project_root.join("platforms").join(platform).join("cordova");
    fs::create_dir_all(&script_dir).unwrap();
    let script = script_dir.join("version");
    fs::write(&script, format!("#!/bin/sh\n{}\n", body)).unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
}

#[test]
fn test_save_creates_pretty_manifest() {
    let project = tempdir().unwrap();

    xplat()
        .args(["-p"])
        .arg(project.path())
        .args(["save", "android", "9.0.0"])
        .assert()
        .success();

    let manifest = project.path().join("platforms/platforms.json");
    let content = fs::read_to_string(&manifest).unwrap();
    assert_eq!(content, "{\n    \"android\": \"9.0.0\"\n}");
}

#[test]
fn test_save_then_list_round_trip() {
    let project = tempdir().unwrap();

    xplat()
        .args(["-p"])
        .arg(project.path())
        .args(["save", "android", "9.0.0"])
        .assert()
        .success();
    xplat()
        .args(["-p"])
        .arg(project.path())
        .args(["save", "ios", "/local/engine"])
        .assert()
        .success();

    xplat()
        .args(["-p"])
        .arg(project.path())
        .arg("list")
        .assert()
        .success()
        .stdout("android 9.0.0\nios /local/engine\n");
}

#[test]
fn test_save_overwrites_existing_version() {
    let project = tempdir().unwrap();

    for version in ["9.0.0", "10.0.0"] {
        xplat()
            .args(["-p"])
            .arg(project.path())
            .args(["save", "android", version])
            .assert()
            .success();
    }

    xplat()
        .args(["-p"])
        .arg(project.path())
        .arg("list")
        .assert()
        .success()
        .stdout("android 10.0.0\n");
}

#[test]
fn test_remove_keeps_other_entries() {
    let project = tempdir().unwrap();

    xplat()
        .args(["-p"])
        .arg(project.path())
        .args(["save", "android", "9.0.0"])
        .assert()
        .success();
    xplat()
        .args(["-p"])
        .arg(project.path())
        .args(["save", "ios", "5.1.1"])
        .assert()
        .success();

    xplat()
        .args(["-p"])
        .arg(project.path())
        .args(["remove", "android"])
        .assert()
        .success();

    xplat()
        .args(["-p"])
        .arg(project.path())
        .arg("list")
        .assert()
        .success()
        .stdout("ios 5.1.1\n");
}

#[test]
fn test_remove_without_manifest_is_noop() {
    let project = tempdir().unwrap();

    xplat()
        .args(["-p"])
        .arg(project.path())
        .args(["remove", "android"])
        .assert()
        .success();

    // The no-op must not create the manifest or the platforms directory
    assert!(!project.path().join("platforms").exists());
}

#[cfg(unix)]
#[test]
fn test_list_without_manifest_runs_version_scripts() {
    let project = tempdir().unwrap();
    write_version_script(project.path(), "foo", "echo 1.2.3");
    write_version_script(project.path(), "bar", "printf '4.5.6\\r\\n'");

    // Platforms are listed in sorted order; line endings are stripped
    xplat()
        .args(["-p"])
        .arg(project.path())
        .arg("list")
        .assert()
        .success()
        .stdout("bar 4.5.6\nfoo 1.2.3\n");
}

#[cfg(unix)]
#[test]
fn test_list_with_malformed_manifest_falls_back() {
    let project = tempdir().unwrap();
    write_version_script(project.path(), "android", "echo 9.0.0");
    fs::write(
        project.path().join("platforms/platforms.json"),
        "{not valid json",
    )
    .unwrap();

    xplat()
        .args(["-p"])
        .arg(project.path())
        .arg("list")
        .assert()
        .success()
        .stdout("android 9.0.0\n");
}

#[cfg(unix)]
#[test]
fn test_list_fails_when_a_version_script_fails() {
    let project = tempdir().unwrap();
    write_version_script(project.path(), "foo", "echo 1.2.3");
    write_version_script(project.path(), "bar", "exit 1");

    xplat()
        .args(["-p"])
        .arg(project.path())
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("bar"));
}

#[test]
fn test_list_fails_without_manifest_or_platforms_dir() {
    let project = tempdir().unwrap();

    xplat()
        .args(["-p"])
        .arg(project.path())
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("platforms"));
}

#[test]
fn test_doctor_reports_present_platform_folders() {
    let project = tempdir().unwrap();
    fs::create_dir_all(project.path().join("android/bin")).unwrap();
    fs::write(project.path().join("android/bin/gradlew"), "").unwrap();
    fs::create_dir_all(project.path().join("ios")).unwrap();

    xplat()
        .args(["-p"])
        .arg(project.path())
        .arg("doctor")
        .assert()
        .success()
        .stdout(predicate::str::contains("android: present"))
        .stdout(predicate::str::contains("ios: present"))
        .stdout(predicate::str::contains("host: "));
}

#[test]
fn test_doctor_reports_absent_platform_folders() {
    let project = tempdir().unwrap();
    // An android folder without the nested gradlew does not count
    fs::create_dir_all(project.path().join("android")).unwrap();

    xplat()
        .args(["-p"])
        .arg(project.path())
        .arg("doctor")
        .assert()
        .success()
        .stdout(predicate::str::contains("android: absent"))
        .stdout(predicate::str::contains("ios: absent"));
}
