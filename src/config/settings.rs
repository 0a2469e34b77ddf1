use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{LockboxError, Result};

/// Project-level configuration, loaded from `.lockbox.toml`.
///
/// Every field has a sensible default so Lockbox works out-of-the-box
/// without any config file at all.  The PBKDF2 iteration count is NOT
/// configurable — it is a published constant tied to the token format
/// version.  The master secret is NOT config-file material — it is read
/// from the environment at startup, never stored next to the records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Directory (relative to the project root) holding the record
    /// store and the audit database.
    #[serde(default = "default_store_dir")]
    pub store_dir: String,

    /// Failed attempts allowed before a principal is locked out
    /// (default: 3).
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Lockout duration in seconds (default: 300 = 5 minutes).
    #[serde(default = "default_lockout_secs")]
    pub lockout_secs: u64,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_store_dir() -> String {
    ".lockbox".to_string()
}

fn default_max_attempts() -> u32 {
    3
}

fn default_lockout_secs() -> u64 {
    300
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_dir: default_store_dir(),
            max_attempts: default_max_attempts(),
            lockout_secs: default_lockout_secs(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the project root.
    const FILE_NAME: &'static str = ".lockbox.toml";

    /// Load settings from `<project_dir>/.lockbox.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            LockboxError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Build the full path to the record store file.
    ///
    /// Example: `project_dir/.lockbox/records.json`
    pub fn store_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.store_dir).join("records.json")
    }

    /// Convert the lockout settings into vault-layer policy.
    pub fn lockout_policy(&self) -> crate::vault::lockout::LockoutPolicy {
        crate::vault::lockout::LockoutPolicy {
            max_attempts: self.max_attempts,
            lockout_secs: self.lockout_secs,
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_settings_are_sensible() {
        let s = Settings::default();
        assert_eq!(s.store_dir, ".lockbox");
        assert_eq!(s.max_attempts, 3);
        assert_eq!(s.lockout_secs, 300);
    }

    #[test]
    fn load_returns_defaults_when_no_config_file() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.store_dir, ".lockbox");
        assert_eq!(settings.max_attempts, 3);
    }

    #[test]
    fn load_parses_toml_file() {
        let tmp = TempDir::new().unwrap();
        let config = r#"
store_dir = "secrets"
max_attempts = 5
lockout_secs = 600
"#;
        fs::write(tmp.path().join(".lockbox.toml"), config).unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.store_dir, "secrets");
        assert_eq!(settings.max_attempts, 5);
        assert_eq!(settings.lockout_secs, 600);
    }

    #[test]
    fn load_uses_defaults_for_missing_fields() {
        let tmp = TempDir::new().unwrap();
        let config = "store_dir = \"keep\"\n";
        fs::write(tmp.path().join(".lockbox.toml"), config).unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.store_dir, "keep");
        // Rest should be defaults
        assert_eq!(settings.max_attempts, 3);
        assert_eq!(settings.lockout_secs, 300);
    }

    #[test]
    fn load_errors_on_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".lockbox.toml"), "not valid {{toml").unwrap();

        let result = Settings::load(tmp.path());
        assert!(result.is_err());
    }

    #[test]
    fn store_path_builds_correct_path() {
        let s = Settings::default();
        let project = Path::new("/home/user/myproject");
        let path = s.store_path(project);
        assert_eq!(
            path,
            PathBuf::from("/home/user/myproject/.lockbox/records.json")
        );
    }

    #[test]
    fn store_path_respects_custom_store_dir() {
        let s = Settings {
            store_dir: "secrets".to_string(),
            ..Settings::default()
        };
        let project = Path::new("/home/user/myproject");
        let path = s.store_path(project);
        assert_eq!(
            path,
            PathBuf::from("/home/user/myproject/secrets/records.json")
        );
    }

    #[test]
    fn lockout_policy_mirrors_settings() {
        let s = Settings {
            max_attempts: 4,
            lockout_secs: 120,
            ..Settings::default()
        };
        let policy = s.lockout_policy();
        assert_eq!(policy.max_attempts, 4);
        assert_eq!(policy.lockout_secs, 120);
    }
}
