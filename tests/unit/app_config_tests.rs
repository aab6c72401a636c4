/*!
 * Tests for application configuration
 */

use std::io::Write;
use std::str::FromStr;

use ytscribe::app_config::{Config, LanguageMissingPolicy, LogLevel};

#[test]
fn test_defaultConfig_shouldHaveSensibleValues() {
    let config = Config::default();

    assert!(config.extraction.user_agent.starts_with("Mozilla/5.0"));
    assert_eq!(config.extraction.endpoint, "https://www.youtube.com");
    assert_eq!(config.extraction.timeout_secs, 30);
    assert_eq!(
        config.extraction.on_language_missing,
        LanguageMissingPolicy::Fallback
    );
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 8000);
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

#[test]
fn test_configDeserialization_withEmptyObject_shouldUseDefaults() {
    let config: Config = serde_json::from_str("{}").unwrap();

    assert_eq!(config.extraction.endpoint, "https://www.youtube.com");
    assert_eq!(
        config.extraction.on_language_missing,
        LanguageMissingPolicy::Fallback
    );
    assert_eq!(config.server.port, 8000);
}

#[test]
fn test_configDeserialization_withOverrides_shouldApplyThem() {
    let json = r#"{
        "extraction": {
            "user_agent": "test-agent/1.0",
            "endpoint": "http://localhost:9999",
            "timeout_secs": 5,
            "on_language_missing": "report"
        },
        "server": { "host": "0.0.0.0", "port": 8080 },
        "log_level": "debug"
    }"#;

    let config: Config = serde_json::from_str(json).unwrap();
    assert_eq!(config.extraction.user_agent, "test-agent/1.0");
    assert_eq!(config.extraction.endpoint, "http://localhost:9999");
    assert_eq!(config.extraction.timeout_secs, 5);
    assert_eq!(
        config.extraction.on_language_missing,
        LanguageMissingPolicy::Report
    );
    assert_eq!(config.server.socket_addr(), "0.0.0.0:8080");
    assert_eq!(config.log_level, LogLevel::Debug);
}

#[test]
fn test_configFromFile_withValidFile_shouldLoad() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{ "extraction": {{ "timeout_secs": 7 }} }}"#
    )
    .unwrap();

    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.extraction.timeout_secs, 7);
    assert_eq!(config.extraction.endpoint, "https://www.youtube.com");
}

#[test]
fn test_configFromFile_withMissingFile_shouldFail() {
    assert!(Config::from_file("/nonexistent/conf.json").is_err());
}

#[test]
fn test_configFromFile_withInvalidJson_shouldFail() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "not json at all").unwrap();

    assert!(Config::from_file(file.path()).is_err());
}

#[test]
fn test_validate_withEmptyUserAgent_shouldFail() {
    let mut config = Config::default();
    config.extraction.user_agent = "  ".to_string();

    assert!(config.validate().is_err());
}

#[test]
fn test_validate_withZeroTimeout_shouldFail() {
    let mut config = Config::default();
    config.extraction.timeout_secs = 0;

    assert!(config.validate().is_err());
}

#[test]
fn test_validate_withNonHttpEndpoint_shouldFail() {
    let mut config = Config::default();
    config.extraction.endpoint = "ftp://example.com".to_string();
    assert!(config.validate().is_err());

    config.extraction.endpoint = "not a url".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_languageMissingPolicy_fromStr_shouldParseBothValues() {
    assert_eq!(
        LanguageMissingPolicy::from_str("fallback").unwrap(),
        LanguageMissingPolicy::Fallback
    );
    assert_eq!(
        LanguageMissingPolicy::from_str("REPORT").unwrap(),
        LanguageMissingPolicy::Report
    );
    assert!(LanguageMissingPolicy::from_str("panic").is_err());
}

#[test]
fn test_languageMissingPolicy_display_shouldRoundTrip() {
    for policy in [LanguageMissingPolicy::Fallback, LanguageMissingPolicy::Report] {
        let rendered = policy.to_string();
        assert_eq!(LanguageMissingPolicy::from_str(&rendered).unwrap(), policy);
    }
}
