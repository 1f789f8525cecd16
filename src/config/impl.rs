use super::{LEGACY_SECRET_ENV, StaticConfig};
use crate::errors::Result;

/// Values given on the command line. They win over every other source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub port: Option<u16>,
    pub data_folder: Option<String>,
    pub secret_key: Option<String>,
}

impl StaticConfig {
    /// Apply command-line overrides, trimming string values.
    ///
    /// Empty strings are ignored so that `--secret-key ""` does not wipe a secret
    /// configured elsewhere.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(folder) = overrides.data_folder.as_deref().map(str::trim)
            && !folder.is_empty()
        {
            self.store.data_folder = folder.to_string();
        }
        if let Some(secret) = overrides.secret_key.as_deref().map(str::trim)
            && !secret.is_empty()
        {
            self.store.secret_key = secret.to_string();
        }

        self.store.data_folder = self.store.data_folder.trim().to_string();
        self.store.secret_key = self.store.secret_key.trim().to_string();
    }

    /// Fill an empty secret from `SHORTURL_KEY`.
    pub fn apply_legacy_secret(&mut self, legacy: Option<String>) {
        if self.store.secret_key.is_empty()
            && let Some(secret) = legacy
        {
            self.store.secret_key = secret.trim().to_string();
        }
    }

    pub fn secret_configured(&self) -> bool {
        !self.store.secret_key.is_empty()
    }
}

/// Resolve the effective configuration
///
/// 优先级：CLI 参数 > ENV > 配置文件 > 默认值，最后回退到 `SHORTURL_KEY`
pub fn resolve_config(path: Option<&str>, overrides: &ConfigOverrides) -> Result<StaticConfig> {
    let mut config = StaticConfig::load(path)?;
    config.apply_overrides(overrides);
    config.apply_legacy_secret(std::env::var(LEGACY_SECRET_ENV).ok());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_overrides_win_and_are_trimmed() {
        let mut config = StaticConfig::default();
        config.apply_overrides(&ConfigOverrides {
            port: Some(9000),
            data_folder: Some("  /srv/links ".to_string()),
            secret_key: Some(" s3cret\n".to_string()),
        });

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.store.data_folder, "/srv/links");
        assert_eq!(config.store.secret_key, "s3cret");
        assert!(config.secret_configured());
    }

    #[test]
    fn test_empty_override_keeps_existing_secret() {
        let mut config = StaticConfig::default();
        config.store.secret_key = "fromfile".to_string();
        config.apply_overrides(&ConfigOverrides {
            secret_key: Some("   ".to_string()),
            ..Default::default()
        });
        assert_eq!(config.store.secret_key, "fromfile");
    }

    #[test]
    fn test_legacy_secret_only_fills_empty() {
        let mut config = StaticConfig::default();
        config.apply_legacy_secret(Some(" legacy ".to_string()));
        assert_eq!(config.store.secret_key, "legacy");

        config.apply_legacy_secret(Some("other".to_string()));
        assert_eq!(config.store.secret_key, "legacy");
    }

    #[test]
    fn test_defaults_match_shorturl() {
        let config = StaticConfig::default();
        assert_eq!(config.server.port, 8040);
        assert_eq!(config.store.data_folder, "./data");
        assert_eq!(config.store.backend, "file");
        assert!(!config.secret_configured());
    }

    #[test]
    fn test_load_from_explicit_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("flatlinker.toml");
        std::fs::write(
            &path,
            "[server]\nport = 9123\n\n[store]\ndata_folder = \"/tmp/links\"\nsecret_key = \"abc\"\n",
        )
        .unwrap();

        let config = StaticConfig::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(config.server.port, 9123);
        assert_eq!(config.store.data_folder, "/tmp/links");
        assert_eq!(config.store.secret_key, "abc");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("missing.toml");
        assert!(StaticConfig::load(Some(path.to_str().unwrap())).is_err());
    }

    #[test]
    fn test_sample_config_roundtrips() {
        let sample = StaticConfig::generate_sample_config();
        assert!(sample.contains("[server]"));
        let parsed: StaticConfig = toml::from_str(&sample).unwrap();
        assert_eq!(parsed.store, StaticConfig::default().store);
    }
}
