//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

/// Config file name looked up in the project root
pub const CONFIG_FILE: &str = "folio.toml";

pub fn r#false() -> bool {
    false
}

// ============================================================================
// [base] Section Defaults
// ============================================================================

pub mod base {
    pub fn title() -> String {
        "Technology Review".into()
    }

    pub fn language() -> String {
        "en".into()
    }
}

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn content() -> PathBuf {
        "content".into()
    }

    pub fn assets() -> PathBuf {
        "assets".into()
    }

    pub fn styles() -> PathBuf {
        "styles.css".into()
    }

    pub fn output() -> PathBuf {
        "dist".into()
    }
}

// ============================================================================
// [deploy] Section Defaults
// ============================================================================

pub mod deploy {
    pub fn remote() -> String {
        "origin".into()
    }

    pub fn branch() -> String {
        "dist".into()
    }

    pub fn message() -> String {
        "deploy".into()
    }
}
