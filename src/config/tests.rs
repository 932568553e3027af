use super::*;
use serial_test::serial;
use std::env;
use std::net::IpAddr;
use std::path::PathBuf;

fn with_env_vars<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, value) in vars {
        unsafe { env::set_var(key, value) };
    }

    let result = f();

    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, _) in vars {
        unsafe { env::remove_var(key) };
    }

    result
}

fn clear_tender_env() {
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    unsafe {
        env::remove_var("TENDER_PORT");
        env::remove_var("TENDER_BIND_ADDR");
        env::remove_var("TENDER_CATALOG_PATH");
        env::remove_var("TENDER_TOP_N");
        env::remove_var("TENDER_MIN_SCORE");
        env::remove_var("TENDER_APPROVAL_THRESHOLD");
        env::remove_var("TENDER_CATEGORY_BONUS");
        env::remove_var("TENDER_MAX_FEATURES");
        env::remove_var("TENDER_REQUEST_TIMEOUT_SECS");
    }
}

fn manifest_file() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml")
}

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.port, 8080);
    assert_eq!(
        config.bind_addr,
        IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1))
    );
    assert_eq!(config.catalog_path, PathBuf::from("./catalog.json"));
    assert_eq!(config.top_n, 3);
    assert_eq!(config.min_score, 0.0);
    assert_eq!(config.approval_threshold, 0.80);
    assert_eq!(config.category_bonus, 0.15);
    assert_eq!(config.max_features, 500);
    assert_eq!(config.request_timeout, Duration::from_secs(10));
}

#[test]
fn test_socket_addr() {
    let config = Config::default();
    assert_eq!(config.socket_addr(), "127.0.0.1:8080");

    let config = Config {
        port: 3000,
        bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(0, 0, 0, 0)),
        ..Default::default()
    };
    assert_eq!(config.socket_addr(), "0.0.0.0:3000");
}

#[test]
#[serial]
fn test_from_env_with_defaults() {
    clear_tender_env();

    let config = Config::from_env().expect("should parse with defaults");

    assert_eq!(config.port, 8080);
    assert_eq!(config.top_n, 3);
    assert_eq!(config.catalog_path, PathBuf::from("./catalog.json"));
}

#[test]
#[serial]
fn test_from_env_custom_values() {
    clear_tender_env();

    with_env_vars(
        &[
            ("TENDER_PORT", "9090"),
            ("TENDER_BIND_ADDR", "::1"),
            ("TENDER_CATALOG_PATH", "/srv/tender/catalog.json"),
            ("TENDER_TOP_N", "5"),
            ("TENDER_MIN_SCORE", "0.25"),
            ("TENDER_APPROVAL_THRESHOLD", "0.9"),
            ("TENDER_CATEGORY_BONUS", "0.1"),
            ("TENDER_MAX_FEATURES", "1000"),
            ("TENDER_REQUEST_TIMEOUT_SECS", "30"),
        ],
        || {
            let config = Config::from_env().expect("should parse");

            assert_eq!(config.port, 9090);
            assert!(config.bind_addr.is_ipv6());
            assert_eq!(
                config.catalog_path,
                PathBuf::from("/srv/tender/catalog.json")
            );
            assert_eq!(config.top_n, 5);
            assert_eq!(config.min_score, 0.25);
            assert_eq!(config.approval_threshold, 0.9);
            assert_eq!(config.category_bonus, 0.1);
            assert_eq!(config.max_features, 1000);
            assert_eq!(config.request_timeout, Duration::from_secs(30));
        },
    );
}

#[test]
#[serial]
fn test_invalid_port_zero() {
    clear_tender_env();

    with_env_vars(&[("TENDER_PORT", "0")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort { .. }));
        assert!(err.to_string().contains("invalid port"));
    });
}

#[test]
#[serial]
fn test_invalid_port_not_number() {
    clear_tender_env();

    with_env_vars(&[("TENDER_PORT", "not_a_port")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::PortParseError { .. }));
        assert!(err.to_string().contains("failed to parse port"));
    });
}

#[test]
#[serial]
fn test_invalid_bind_addr() {
    clear_tender_env();

    with_env_vars(&[("TENDER_BIND_ADDR", "not.an.ip.address")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBindAddr { .. }));
    });
}

#[test]
#[serial]
fn test_unparseable_score_is_an_error() {
    clear_tender_env();

    with_env_vars(&[("TENDER_MIN_SCORE", "high")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ScoreParseError {
                name: "TENDER_MIN_SCORE",
                ..
            }
        ));
    });
}

#[test]
#[serial]
fn test_unparseable_counts_fall_back_to_defaults() {
    clear_tender_env();

    with_env_vars(
        &[
            ("TENDER_TOP_N", "many"),
            ("TENDER_MAX_FEATURES", "-1"),
            ("TENDER_REQUEST_TIMEOUT_SECS", "soon"),
        ],
        || {
            let config = Config::from_env().expect("should parse with fallback");
            assert_eq!(config.top_n, 3);
            assert_eq!(config.max_features, 500);
            assert_eq!(config.request_timeout, Duration::from_secs(10));
        },
    );
}

#[test]
#[serial]
fn test_blank_catalog_path_uses_default() {
    clear_tender_env();

    with_env_vars(&[("TENDER_CATALOG_PATH", "   ")], || {
        let config = Config::from_env().expect("should parse");
        assert_eq!(config.catalog_path, PathBuf::from("./catalog.json"));
    });
}

#[test]
fn test_validate_nonexistent_catalog() {
    let config = Config {
        catalog_path: PathBuf::from("/nonexistent/catalog.json"),
        ..Default::default()
    };

    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::PathNotFound { .. }));
}

#[test]
fn test_validate_catalog_path_is_directory() {
    let config = Config {
        catalog_path: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("src"),
        ..Default::default()
    };

    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::NotAFile { .. }));
}

#[test]
fn test_validate_success_with_existing_file() {
    let config = Config {
        catalog_path: manifest_file(),
        ..Default::default()
    };

    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_rejects_out_of_range_scores() {
    let config = Config {
        catalog_path: manifest_file(),
        approval_threshold: 1.5,
        ..Default::default()
    };
    let err = config.validate().unwrap_err();
    assert!(matches!(
        err,
        ConfigError::ScoreOutOfRange {
            name: "TENDER_APPROVAL_THRESHOLD",
            ..
        }
    ));

    let config = Config {
        catalog_path: manifest_file(),
        min_score: -0.1,
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ScoreOutOfRange { .. })
    ));
}

#[test]
fn test_validate_rejects_zero_counts() {
    let config = Config {
        catalog_path: manifest_file(),
        top_n: 0,
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ZeroValue {
            name: "TENDER_TOP_N"
        })
    ));

    let config = Config {
        catalog_path: manifest_file(),
        request_timeout: Duration::ZERO,
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ZeroValue { .. })
    ));
}

#[test]
fn test_session_settings_follow_config() {
    let config = Config {
        top_n: 7,
        min_score: 0.4,
        max_features: 64,
        category_bonus: 0.2,
        approval_threshold: 0.7,
        ..Default::default()
    };

    let settings = config.session_settings();
    assert_eq!(settings.options.top_n, 7);
    assert_eq!(settings.options.min_score, 0.4);
    assert_eq!(settings.vectorizer.max_features, 64);
    assert_eq!(settings.category_bonus, 0.2);
    assert_eq!(settings.approval_threshold, 0.7);
}

#[test]
fn test_error_messages_are_descriptive() {
    let err = ConfigError::InvalidPort {
        value: "0".to_string(),
    };
    assert!(err.to_string().contains("1 and 65535"));

    let err = ConfigError::PathNotFound {
        path: PathBuf::from("/some/catalog.json"),
    };
    assert!(err.to_string().contains("/some/catalog.json"));

    let err = ConfigError::ScoreOutOfRange {
        name: "TENDER_MIN_SCORE",
        value: 2.0,
    };
    assert!(err.to_string().contains("TENDER_MIN_SCORE"));
    assert!(err.to_string().contains("[0, 1]"));
}
