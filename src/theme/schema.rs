use std::collections::BTreeMap;

use serde::Deserialize;

use super::{DEFAULT_THEME_KEY, ThemeError};

/// A named palette: display metadata plus role -> hex color assignments and
/// a per-category color sub-map.
#[derive(Debug, Clone)]
pub struct Theme {
    pub key: String,
    pub name: String,
    pub description: String,
    pub colors: BTreeMap<String, String>,
    pub categories: BTreeMap<String, String>,
}

impl Theme {
    /// Look up one role color; `None` when the role is undefined.
    pub fn color(&self, role: &str) -> Option<&str> {
        self.colors.get(role).map(String::as_str)
    }

    pub fn info(&self) -> ThemeInfo {
        ThemeInfo {
            key: self.key.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
        }
    }
}

/// Picker-facing metadata for one loaded theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeInfo {
    pub key: String,
    pub name: String,
    pub description: String,
}

/// One `[theme.<key>]` table as written in the definition file. Everything
/// that is not metadata or the categories sub-table is a role color.
#[derive(Debug, Deserialize)]
struct RawTheme {
    name: Option<String>,
    description: Option<String>,
    #[serde(default)]
    categories: BTreeMap<String, String>,
    #[serde(flatten)]
    colors: BTreeMap<String, String>,
}

/// Parse a themes document into the loaded set, preserving file order.
/// Fails if there are no entries or the required `default` entry is absent.
pub(super) fn parse_themes(content: &str) -> Result<Vec<Theme>, ThemeError> {
    let doc: toml::Table = toml::from_str(content)?;

    let entries = match doc.get("theme") {
        Some(toml::Value::Table(entries)) if !entries.is_empty() => entries,
        _ => return Err(ThemeError::NoThemes),
    };

    let mut themes = Vec::with_capacity(entries.len());
    for (key, value) in entries {
        let raw: RawTheme = value.clone().try_into()?;
        themes.push(Theme {
            key: key.clone(),
            name: raw.name.unwrap_or_else(|| key.clone()),
            description: raw
                .description
                .unwrap_or_else(|| "No description".to_string()),
            colors: raw.colors,
            categories: raw.categories,
        });
    }

    if !themes.iter().any(|t| t.key == DEFAULT_THEME_KEY) {
        return Err(ThemeError::MissingDefault);
    }

    Ok(themes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_themes() {
        let content = r##"
            [theme.default]
            name = "Default"
            description = "The stock palette"
            background = "#0F0F1E"
            text_primary = "#FFFFFF"

            [theme.default.categories]
            Food = "#FF6B6B"
        "##;

        let themes = parse_themes(content).unwrap();
        assert_eq!(themes.len(), 1);
        assert_eq!(themes[0].key, "default");
        assert_eq!(themes[0].color("background"), Some("#0F0F1E"));
        assert_eq!(themes[0].color("no_such_role"), None);
        assert_eq!(themes[0].categories.get("Food").unwrap(), "#FF6B6B");
    }

    #[test]
    fn metadata_falls_back_to_key() {
        let content = r##"
            [theme.default]
            background = "#000000"
        "##;

        let themes = parse_themes(content).unwrap();
        assert_eq!(themes[0].name, "default");
        assert_eq!(themes[0].description, "No description");
        // name/description are metadata, not role colors
        assert_eq!(themes[0].color("name"), None);
    }

    #[test]
    fn preserves_file_order() {
        let content = r##"
            [theme.zebra]
            background = "#111111"

            [theme.default]
            background = "#000000"

            [theme.aardvark]
            background = "#222222"
        "##;

        let themes = parse_themes(content).unwrap();
        let keys: Vec<&str> = themes.iter().map(|t| t.key.as_str()).collect();
        assert_eq!(keys, vec!["zebra", "default", "aardvark"]);
    }

    #[test]
    fn reject_missing_default() {
        let content = r##"
            [theme.midnight]
            background = "#000000"
        "##;

        let result = parse_themes(content);
        assert!(matches!(result, Err(ThemeError::MissingDefault)));
    }

    #[test]
    fn reject_empty_document() {
        assert!(matches!(parse_themes(""), Err(ThemeError::NoThemes)));
        assert!(matches!(
            parse_themes("[other]\nkey = 1\n"),
            Err(ThemeError::NoThemes)
        ));
    }

    #[test]
    fn reject_malformed_toml() {
        let result = parse_themes("[theme.default\nbackground = ");
        assert!(matches!(result, Err(ThemeError::Parse(_))));
    }
}
