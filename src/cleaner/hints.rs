//! Diagnostic hints for lock-prone directories.
//!
//! When a deletion fails because files are held open, the path usually
//! tells us which tool is holding them. This table maps well-known tool
//! cache directories to advice the user can act on. Hints are advisory
//! text only; they never change control flow.

use std::path::Path;

/// Known lock-prone directories, checked in order against the lowercased
/// path. First match wins.
const LOCK_HINTS: &[(&str, &str)] = &[
    (
        ".gradle",
        "Try closing Android Studio and stopping Gradle daemons (run 'gradlew --stop' in your project).",
    ),
    (
        ".android",
        "Try closing Android Studio and any running emulators.",
    ),
    (".npm", "Try closing any running Node.js processes or IDEs."),
    (".cargo", "Try closing any running Rust builds or IDEs."),
    (".cursor", "Try closing Cursor editor."),
    (".vscode", "Try closing VS Code."),
];

const GENERIC_HINT: &str = "Try closing applications that might be using these files.";

/// Pick a hint for a path whose deletion failed on a lock or busy file.
#[must_use]
pub fn lock_hint(path: &Path) -> &'static str {
    let lowered = path.to_string_lossy().to_lowercase();
    for (needle, hint) in LOCK_HINTS {
        if lowered.contains(needle) {
            return hint;
        }
    }
    GENERIC_HINT
}
