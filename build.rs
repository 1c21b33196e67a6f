//! Build script for spacesweep
//!
//! Handles platform-specific configuration:
//! - Windows: Embeds the application manifest for long path support (>260 chars)
//!
//! # Windows Long Path Support
//!
//! By default, Windows limits file paths to 260 characters (MAX_PATH).
//! Cache trees like `node_modules` or `.gradle` routinely exceed this, and
//! the deletion engine must be able to both measure and remove them.
//!
//! The manifest file (`spacesweep.manifest`) includes `longPathAware=true`
//! which, combined with the Windows 10 v1607+ registry setting, enables
//! paths up to 32,767 characters.
//!
//! This script runs automatically during `cargo build`. On non-Windows
//! platforms it does nothing.

fn main() {
    // Only compile and embed the manifest on Windows
    #[cfg(windows)]
    {
        // The .rc file uses RT_MANIFEST resource type to embed the XML manifest
        embed_resource::compile("spacesweep.rc", embed_resource::NONE);

        println!("cargo:rerun-if-changed=spacesweep.rc");
        println!("cargo:rerun-if-changed=spacesweep.manifest");
    }
}
