//! Input Limits Integration Tests
//!
//! Tests for size limits and denylist patterns applied to files loaded
//! as drafts, transcripts and sources.

use quotecheck::core::{InputLimits, LimitViolation};
use std::path::Path;

#[test]
fn test_max_input_bytes() {
    let limits = InputLimits {
        max_input_bytes: 100,
        ..Default::default()
    };

    // Input within limits
    let small_input = "x".repeat(50);
    assert!(limits.validate_input(&small_input, None).is_ok());

    // Input at exact limit
    let exact_input = "x".repeat(100);
    assert!(limits.validate_input(&exact_input, None).is_ok());

    // Input exceeding limit
    let large_input = "x".repeat(200);
    match limits.validate_input(&large_input, None) {
        Err(LimitViolation::MaxInputBytes { actual, limit }) => {
            assert_eq!(actual, 200);
            assert_eq!(limit, 100);
        }
        other => panic!("Expected MaxInputBytes violation, got {:?}", other),
    }
}

#[test]
fn test_size_is_measured_in_bytes() {
    let limits = InputLimits {
        max_input_bytes: 10,
        ..Default::default()
    };

    // Six chars, twelve bytes
    assert!(limits.validate_input("éééééé", None).is_err());
}

#[test]
fn test_denylist_pattern_env() {
    let limits = InputLimits::default();

    assert!(limits.is_denylisted(".env"));
    assert!(limits.is_denylisted(".env.local"));
    assert!(limits.is_denylisted("config/.env"));
}

#[test]
fn test_denylist_pattern_secrets() {
    let limits = InputLimits::default();

    assert!(limits.is_denylisted("secrets.json"));
    assert!(limits.is_denylisted("config/secrets.yaml"));

    // Only names starting with "secrets"
    assert!(!limits.is_denylisted("my-secrets-file"));
}

#[test]
fn test_denylist_pattern_credentials_and_keys() {
    let limits = InputLimits::default();

    assert!(limits.is_denylisted("credentials.json"));
    assert!(limits.is_denylisted("aws-credential-file"));
    assert!(limits.is_denylisted("certs/ca.pem"));
    assert!(limits.is_denylisted("ssl/domain.key"));
}

#[test]
fn test_denylist_allows_editorial_files() {
    let limits = InputLimits::default();

    assert!(!limits.is_denylisted("interview.txt"));
    assert!(!limits.is_denylisted("drafts/launch-story.md"));
    assert!(!limits.is_denylisted("sources/annual-report.txt"));
    assert!(!limits.is_denylisted("README.md"));
}

#[test]
fn test_validate_path_rejects_denylisted() {
    let limits = InputLimits::default();

    assert!(limits.validate_path(Path::new("notes/interview.txt")).is_ok());

    match limits.validate_path(Path::new(".env.local")) {
        Err(LimitViolation::DenylistMatch { path }) => {
            assert!(path.contains(".env.local"));
        }
        other => panic!("Expected DenylistMatch violation, got {:?}", other),
    }
}

#[test]
fn test_validate_input_with_denylisted_path() {
    let limits = InputLimits::default();
    let input = "some content";

    assert!(limits
        .validate_input(input, Some(Path::new("sources/blog.txt")))
        .is_ok());
    assert!(limits
        .validate_input(input, Some(Path::new("private.key")))
        .is_err());
}

#[test]
fn test_custom_denylist_patterns() {
    let limits = InputLimits {
        denylist_patterns: vec!["**/*.secret".to_string(), "**/private/*".to_string()],
        ..Default::default()
    };

    assert!(limits.is_denylisted("config.secret"));
    assert!(limits.is_denylisted("data/private/notes.txt"));

    // Default patterns are replaced, not extended
    assert!(!limits.is_denylisted(".env"));
}

#[test]
fn test_limits_yaml_parsing_with_defaults() {
    let yaml = r#"
max_input_bytes: 1048576
"#;

    let limits: InputLimits = serde_yaml::from_str(yaml).unwrap();

    assert_eq!(limits.max_input_bytes, 1048576);
    assert_eq!(limits.denylist_patterns, InputLimits::default().denylist_patterns);
}

#[test]
fn test_validate_size_matches_input_check() {
    let limits = InputLimits {
        max_input_bytes: 100,
        ..Default::default()
    };

    assert!(limits.validate_size(100).is_ok());
    assert_eq!(
        limits.validate_size(101),
        Err(LimitViolation::MaxInputBytes {
            actual: 101,
            limit: 100
        })
    );
}
