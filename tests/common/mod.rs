// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::path::PathBuf;

use anyhow::Result;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use moneta::application::TrackerService;
use moneta::storage::LedgerStore;
use moneta::theme::ThemeRegistry;
use tempfile::TempDir;

/// Helper to create a test store with a temporary database
pub async fn test_store() -> Result<(LedgerStore, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let url = format!("sqlite:{}?mode=rwc", db_path.to_str().unwrap());
    let store = LedgerStore::init(&url).await?;
    Ok((store, temp_dir))
}

/// Helper to create a test service with a temporary database
pub async fn test_service() -> Result<(TrackerService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let service = TrackerService::init(db_path.to_str().unwrap()).await?;
    Ok((service, temp_dir))
}

/// Helper to parse a date string into DateTime<Utc>
pub fn parse_date(date_str: &str) -> DateTime<Utc> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        .and_utc()
}

/// A business date `n` days before now
pub fn days_ago(n: i64) -> DateTime<Utc> {
    Utc::now() - Duration::days(n)
}

/// Minimal theme definition fixture: a default theme plus one alternative.
/// `ocean_breeze` deliberately leaves `text_muted` undefined to exercise the
/// fallback color path.
pub const THEMES_FIXTURE: &str = r##"
[theme.default]
name = "Default"
description = "The stock palette"
background = "#0F0F1E"
text_primary = "#FFFFFF"
text_muted = "#6B6B8F"
success = "#06FFA5"

[theme.default.categories]
Food = "#FF6B6B"
Salary = "#06FFA5"

[theme.ocean_breeze]
name = "Ocean Breeze"
description = "Calm blues and teals"
background = "#0B2545"
text_primary = "#EEF4ED"
success = "#5DD39E"

[theme.ocean_breeze.categories]
Food = "#EF6F6C"
Salary = "#5DD39E"
"##;

/// Write the theme fixture into a temp dir, returning the paths a registry
/// would be loaded from. No settings file is created.
pub fn theme_fixture(temp_dir: &TempDir) -> (PathBuf, PathBuf) {
    let themes_path = temp_dir.path().join("themes.toml");
    let settings_path = temp_dir.path().join("settings.toml");
    std::fs::write(&themes_path, THEMES_FIXTURE).unwrap();
    (themes_path, settings_path)
}

/// Load a registry over a fresh copy of the theme fixture.
pub fn test_registry(temp_dir: &TempDir) -> ThemeRegistry {
    let (themes_path, settings_path) = theme_fixture(temp_dir);
    ThemeRegistry::load(&themes_path, &settings_path).unwrap()
}
