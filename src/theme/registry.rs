use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::schema::parse_themes;
use super::{DEFAULT_THEME_KEY, FALLBACK_COLOR, Theme, ThemeError, ThemeInfo};

/// Source of truth for the active color palette.
///
/// Explicitly constructed and passed to whoever needs it - there is no global
/// instance. `load` is freely re-enterable: constructing a second registry
/// (or calling `reload`) re-reads both files from disk.
pub struct ThemeRegistry {
    themes: Vec<Theme>,
    active: String,
    themes_path: PathBuf,
    settings_path: PathBuf,
}

impl ThemeRegistry {
    /// Load the theme set from `themes_path` and the persisted selection from
    /// `settings_path`.
    ///
    /// A missing or malformed themes file, or one without a `default` entry,
    /// is fatal. A missing settings file is created with the default
    /// selection; a persisted key absent from the loaded set falls back to
    /// `default` with a warning.
    pub fn load(
        themes_path: impl AsRef<Path>,
        settings_path: impl AsRef<Path>,
    ) -> Result<Self, ThemeError> {
        let themes_path = themes_path.as_ref().to_path_buf();
        let settings_path = settings_path.as_ref().to_path_buf();

        let content = std::fs::read_to_string(&themes_path)?;
        let themes = parse_themes(&content)?;
        let active = load_selection(&settings_path, &themes)?;

        Ok(Self {
            themes,
            active,
            themes_path,
            settings_path,
        })
    }

    /// Re-read both files from disk, replacing the loaded set and selection.
    pub fn reload(&mut self) -> Result<(), ThemeError> {
        *self = Self::load(&self.themes_path, &self.settings_path)?;
        Ok(())
    }

    /// Key of the active theme.
    pub fn current_theme_key(&self) -> &str {
        &self.active
    }

    /// The active palette. If the active key is no longer present in the
    /// loaded set, the selection silently resets to `default` first.
    pub fn current_theme(&mut self) -> &Theme {
        if self.find(&self.active).is_none() {
            self.active = DEFAULT_THEME_KEY.to_string();
        }
        // `default` is guaranteed present at load time
        self.find(&self.active).unwrap_or(&self.themes[0])
    }

    /// Look up one role color in the active theme. Undefined roles resolve
    /// to the fixed fallback, never an error.
    pub fn color(&mut self, role: &str) -> &str {
        self.current_theme()
            .colors
            .get(role)
            .map(String::as_str)
            .unwrap_or(FALLBACK_COLOR)
    }

    /// Category -> color assignments of the active theme.
    pub fn category_colors(&mut self) -> &BTreeMap<String, String> {
        &self.current_theme().categories
    }

    /// All loaded themes in file order, for a picker.
    pub fn available_themes(&self) -> Vec<ThemeInfo> {
        self.themes.iter().map(Theme::info).collect()
    }

    /// Switch the active theme and persist the selection.
    ///
    /// Rejects keys that fail the `[a-z0-9_]+` grammar or are absent from the
    /// loaded set. A failed persist rolls the in-memory switch back, so the
    /// active theme and the settings file never diverge.
    pub fn switch_theme(&mut self, key: &str) -> bool {
        if !is_valid_theme_key(key) {
            tracing::error!(key, "invalid theme key, only [a-z0-9_]+ is allowed");
            return false;
        }
        if self.find(key).is_none() {
            tracing::warn!(key, "theme not found");
            return false;
        }

        let previous = std::mem::replace(&mut self.active, key.to_string());
        if let Err(e) = self.persist_selection() {
            tracing::error!(error = %e, key, "failed to save theme preference");
            self.active = previous;
            return false;
        }
        true
    }

    /// Write the active key under `[appearance]`, keeping any unrelated
    /// settings content intact.
    fn persist_selection(&self) -> Result<(), ThemeError> {
        let mut settings: toml::Table = match std::fs::read_to_string(&self.settings_path) {
            Ok(content) => toml::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => toml::Table::new(),
            Err(e) => return Err(ThemeError::Read(e)),
        };

        set_appearance_theme(&mut settings, &self.active);
        write_settings(&self.settings_path, &settings)
    }

    fn find(&self, key: &str) -> Option<&Theme> {
        self.themes.iter().find(|t| t.key == key)
    }
}

/// Theme keys follow the grammar `[a-z0-9_]+`.
fn is_valid_theme_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

fn load_selection(settings_path: &Path, themes: &[Theme]) -> Result<String, ThemeError> {
    if !settings_path.exists() {
        // First run: create the settings file with the default selection
        let mut settings = toml::Table::new();
        set_appearance_theme(&mut settings, DEFAULT_THEME_KEY);
        write_settings(settings_path, &settings)?;
        return Ok(DEFAULT_THEME_KEY.to_string());
    }

    let content = std::fs::read_to_string(settings_path)?;
    let settings: toml::Table = toml::from_str(&content)?;
    let key = settings
        .get("appearance")
        .and_then(|v| v.get("theme"))
        .and_then(|v| v.as_str())
        .unwrap_or(DEFAULT_THEME_KEY);

    if themes.iter().any(|t| t.key == key) {
        Ok(key.to_string())
    } else {
        tracing::warn!(key, "persisted theme not in loaded set, using default");
        Ok(DEFAULT_THEME_KEY.to_string())
    }
}

fn set_appearance_theme(settings: &mut toml::Table, key: &str) {
    let appearance = settings
        .entry("appearance".to_string())
        .or_insert_with(|| toml::Value::Table(toml::Table::new()));
    match appearance {
        toml::Value::Table(table) => {
            table.insert("theme".to_string(), toml::Value::String(key.to_string()));
        }
        other => {
            // A scalar `appearance` entry is malformed; replace it
            let mut table = toml::Table::new();
            table.insert("theme".to_string(), toml::Value::String(key.to_string()));
            *other = toml::Value::Table(table);
        }
    }
}

fn write_settings(path: &Path, settings: &toml::Table) -> Result<(), ThemeError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let rendered = toml::to_string(settings)?;
    std::fs::write(path, rendered)?;
    Ok(())
}
