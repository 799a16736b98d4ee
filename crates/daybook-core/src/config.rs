//! Home-directory configuration, persisted as `settings.json`.

use serde::{Deserialize, Serialize};

use crate::category::Category;

/// User configuration stored in the home root.
///
/// The category toggles gate whether "new document" actions are offered for
/// a category; the engine consults them only at creation entry points and
/// never when opening or saving existing documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Absolute path of the home directory these settings belong to.
    pub home_directory: String,
    /// Public site URL used by the publishing pipeline.
    pub site_url: String,
    pub short_form_enabled: bool,
    pub long_form_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            home_directory: String::new(),
            site_url: String::new(),
            short_form_enabled: true,
            long_form_enabled: true,
        }
    }
}

impl Settings {
    /// File name of the settings document in the home root.
    pub const FILE_NAME: &'static str = "settings.json";

    /// Whether document creation is enabled for `category`.
    #[must_use]
    pub fn category_enabled(&self, category: Category) -> bool {
        match category {
            Category::ShortForm => self.short_form_enabled,
            Category::LongForm => self.long_form_enabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_enable_both_categories() {
        let settings = Settings::default();
        assert!(settings.category_enabled(Category::ShortForm));
        assert!(settings.category_enabled(Category::LongForm));
        assert!(settings.home_directory.is_empty());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, Settings::default());

        let settings: Settings =
            serde_json::from_str(r#"{"short_form_enabled": false}"#).unwrap();
        assert!(!settings.category_enabled(Category::ShortForm));
        assert!(settings.category_enabled(Category::LongForm));
    }

    #[test]
    fn json_round_trip() {
        let settings = Settings {
            home_directory: "/home/me/daybook".to_string(),
            site_url: "https://example.org".to_string(),
            short_form_enabled: true,
            long_form_enabled: false,
        };
        let raw = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&raw).unwrap();
        assert_eq!(back, settings);
    }
}
