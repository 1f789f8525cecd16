//! Configuration precedence tests
//!
//! Environment variables are process-wide, so everything that touches them
//! lives in this one test binary and runs as a single test.

use std::env;

use flatlinker::config::{ConfigOverrides, LEGACY_SECRET_ENV, resolve_config};
use tempfile::TempDir;

const PORT_ENV: &str = "FL__SERVER__PORT";

fn set_env(name: &str, value: Option<&str>) {
    // 本文件只有一个测试，不会与其他线程并发读写环境变量
    unsafe {
        match value {
            Some(v) => env::set_var(name, v),
            None => env::remove_var(name),
        }
    }
}

#[test]
fn test_resolve_config_precedence() {
    let old_port = env::var(PORT_ENV).ok();
    let old_secret = env::var(LEGACY_SECRET_ENV).ok();

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("flatlinker.toml");
    std::fs::write(
        &path,
        "[server]\nport = 9100\n\n[store]\ndata_folder = \"/srv/from-file\"\n",
    )
    .unwrap();
    let path = path.to_str().unwrap();

    // 文件 > 默认值
    set_env(PORT_ENV, None);
    set_env(LEGACY_SECRET_ENV, None);
    let config = resolve_config(Some(path), &ConfigOverrides::default()).unwrap();
    assert_eq!(config.server.port, 9100);
    assert_eq!(config.store.data_folder, "/srv/from-file");
    assert!(config.store.secret_key.is_empty());

    // ENV > 文件
    set_env(PORT_ENV, Some("9200"));
    let config = resolve_config(Some(path), &ConfigOverrides::default()).unwrap();
    assert_eq!(config.server.port, 9200);

    // CLI > ENV
    let overrides = ConfigOverrides {
        port: Some(9300),
        data_folder: Some("/srv/from-cli".to_string()),
        secret_key: None,
    };
    let config = resolve_config(Some(path), &overrides).unwrap();
    assert_eq!(config.server.port, 9300);
    assert_eq!(config.store.data_folder, "/srv/from-cli");

    // SHORTURL_KEY 只在其他来源都没有密钥时生效
    set_env(LEGACY_SECRET_ENV, Some(" legacy "));
    let config = resolve_config(Some(path), &ConfigOverrides::default()).unwrap();
    assert_eq!(config.store.secret_key, "legacy");

    let overrides = ConfigOverrides {
        secret_key: Some("from-cli".to_string()),
        ..Default::default()
    };
    let config = resolve_config(Some(path), &overrides).unwrap();
    assert_eq!(config.store.secret_key, "from-cli");

    set_env(PORT_ENV, old_port.as_deref());
    set_env(LEGACY_SECRET_ENV, old_secret.as_deref());
}
