//! Shared test utilities

use std::path::PathBuf;

use safeefah_guide::UserProfile;

/// Build a visitor profile
#[must_use]
pub fn profile(age: i64, interest: &str) -> UserProfile {
    UserProfile::new(age, interest)
}

/// Write `content` to `name` inside a fresh temp dir
///
/// The directory guard must outlive the returned path.
pub fn write_temp(name: &str, content: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("failed to write temp file");
    (dir, path)
}
