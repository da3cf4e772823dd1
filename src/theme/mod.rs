//! Theme registry: color palettes for the UI layer.
//!
//! Palettes are loaded once from a TOML definition file; the user's selected
//! palette is persisted to a small settings file. The registry is a plain
//! owned value - construct one per process and pass it where it is needed.

mod registry;
mod schema;

pub use registry::*;
pub use schema::*;

use thiserror::Error;

/// The theme set must always contain a palette with this key.
pub const DEFAULT_THEME_KEY: &str = "default";

/// Returned for color roles the active theme does not define.
pub const FALLBACK_COLOR: &str = "#FFFFFF";

/// Theme loading and persistence errors
#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("Failed to read theme file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to render settings TOML: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("No [theme.*] entries defined in themes file")]
    NoThemes,

    #[error("Required 'default' theme not found in theme set")]
    MissingDefault,
}
