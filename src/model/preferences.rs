use super::UserTier;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    #[serde(default = "default_version")]
    version: u32,

    #[serde(default)]
    pub tier: UserTier,

    #[serde(default = "default_theme")]
    pub theme: String,

    #[serde(default = "default_font_size")]
    pub font_size: u32,

    #[serde(default)]
    pub notifications_enabled: bool,

    #[serde(default)]
    pub last_sync: Option<DateTime<Utc>>,
}

// Helper functions for default values
fn default_version() -> u32 {
    1
}
fn default_theme() -> String {
    "default".to_string()
}
fn default_font_size() -> u32 {
    18
}

impl Default for UserPreferences {
    fn default() -> Self {
        UserPreferences {
            version: 1,
            tier: UserTier::default(),
            theme: default_theme(),
            font_size: default_font_size(),
            notifications_enabled: false,
            last_sync: None,
        }
    }
}

impl UserPreferences {
    pub fn migrate(&mut self) {
        match self.version {
            0 => {
                self.version = 1;
            }
            _ => (),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let prefs: UserPreferences = serde_json::from_str("{}").unwrap();
        assert_eq!(prefs, UserPreferences::default());
    }

    #[test]
    fn test_tier_serializes_lowercase() {
        let mut prefs = UserPreferences::default();
        prefs.tier = UserTier::Unlimited;
        let json = serde_json::to_string(&prefs).unwrap();
        assert!(json.contains("\"unlimited\""));
    }
}
