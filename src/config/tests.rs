use std::fs;

use serial_test::serial;
use tempfile::TempDir;

use super::settings::{PartialServerSettings, PartialSettings, Settings};
use super::load_config_from;

#[test]
fn test_default_settings() {
    let settings = Settings::default();
    assert_eq!(settings.server.host, "127.0.0.1");
    assert_eq!(settings.server.port, 8080);
    assert_eq!(settings.server.ws_port, 8081);
    assert_eq!(settings.board.viewer_buffer, 32);
    assert_eq!(settings.board.refresh_secs, 5);
    assert_eq!(settings.board.scroll_secs, 3);
    assert_eq!(settings.board.max_visible, 6);
    assert_eq!(settings.logging.level, "info");
}

#[test]
fn test_partial_merge_keeps_defaults_for_missing_values() {
    let partial = PartialSettings {
        server: Some(PartialServerSettings {
            host: None,
            port: Some(9999),
            ws_port: None,
        }),
        ..Default::default()
    };

    let merged = partial.merge(Settings::default());
    assert_eq!(merged.server.port, 9999);
    assert_eq!(merged.server.host, "127.0.0.1");
    assert_eq!(merged.board, Settings::default().board);
    assert_eq!(merged.server.http_addr(), "127.0.0.1:9999");
    assert_eq!(merged.server.ws_addr(), "127.0.0.1:8081");
}

#[test]
#[serial]
fn test_load_config_from_file_overrides_defaults() {
    let tmp = TempDir::new().expect("create tempdir");
    let path = tmp.path().join("board.toml");
    let toml = r#"
        [server]
        host = "0.0.0.0"
        port = 9000

        [board]
        viewer_buffer = 4
        max_visible = 10
    "#;
    fs::write(&path, toml).expect("write config file");

    let stem = tmp.path().join("board");
    let cfg = load_config_from(stem.to_str().expect("utf-8 path")).expect("load_config failed");

    assert_eq!(cfg.server.host, "0.0.0.0");
    assert_eq!(cfg.server.port, 9000);
    assert_eq!(cfg.server.ws_port, 8081);
    assert_eq!(cfg.board.viewer_buffer, 4);
    assert_eq!(cfg.board.max_visible, 10);
    assert_eq!(cfg.board.scroll_secs, 3);
}

#[test]
#[serial]
fn test_env_overrides_file_and_defaults() {
    temp_env::with_vars(
        [
            ("BOARD__SERVER__WS_PORT", Some("7001")),
            ("BOARD__LOGGING__LEVEL", Some("debug")),
        ],
        || {
            let cfg = load_config_from("does/not/exist").expect("load_config failed");
            assert_eq!(cfg.server.ws_port, 7001);
            assert_eq!(cfg.logging.level, "debug");
            assert_eq!(cfg.server.port, 8080);
        },
    );
}

#[test]
#[serial]
fn test_missing_file_yields_defaults() {
    temp_env::with_vars_unset(["BOARD__SERVER__PORT", "BOARD__SERVER__WS_PORT"], || {
        let cfg = load_config_from("does/not/exist").expect("load_config failed");
        assert_eq!(cfg, Settings::default());
    });
}
