//! Project environment detection.
//!
//! Stateless predicates over the project layout and the host operating
//! system. These never fail: a path that cannot be checked (for example
//! because of permissions) counts as absent.

use std::env;
use std::path::Path;

use crate::runtime::Runtime;

/// Whether the project at `root` contains an Android platform shell.
///
/// True iff `<root>/android/bin/gradlew` exists. Existence only; the entry
/// is not checked for type or executability.
pub fn check_android<R: Runtime>(runtime: &R, root: &Path) -> bool {
    runtime.exists(&root.join("android").join("bin").join("gradlew"))
}

/// Whether the project at `root` contains an iOS platform folder.
///
/// True iff `<root>/ios` exists. Existence only; the entry is not checked
/// for being a directory.
pub fn check_ios<R: Runtime>(runtime: &R, root: &Path) -> bool {
    runtime.exists(&root.join("ios"))
}

/// Whether the CLI is running on Windows.
pub fn is_on_windows() -> bool {
    is_windows(env::consts::OS)
}

/// Whether the CLI is running on macOS.
pub fn is_on_mac() -> bool {
    is_mac(env::consts::OS)
}

/// Whether the CLI is running on Linux.
pub fn is_on_linux() -> bool {
    is_linux(env::consts::OS)
}

fn is_windows(os: &str) -> bool {
    os == "windows"
}

fn is_mac(os: &str) -> bool {
    os == "macos"
}

fn is_linux(os: &str) -> bool {
    os == "linux"
}
