use std::fs;
use std::path::Path;

use crate::error::{AppError, AppResult};
use crate::models::Settings;

/// Environment variable naming an optional JSON settings file
pub const CONFIG_FILE_ENV: &str = "JOURNAL_PROXY_CONFIG";

/// Load settings: JSON file (if any) first, then environment overrides
pub fn load_settings() -> AppResult<Settings> {
    load_settings_with(|key: &str| std::env::var(key).ok())
}

/// `load_settings` with an injectable variable lookup
pub fn load_settings_with<F>(lookup: F) -> AppResult<Settings>
where
    F: Fn(&str) -> Option<String>,
{
    let mut settings = match lookup(CONFIG_FILE_ENV).filter(|p| !p.trim().is_empty()) {
        Some(path) => load_settings_file(Path::new(&path))?,
        None => Settings::default(),
    };

    apply_env(&mut settings, &lookup)?;
    validate(&settings)?;
    Ok(settings)
}

/// Read settings from a JSON file; missing keys keep their defaults
pub fn load_settings_file(path: &Path) -> AppResult<Settings> {
    let content = fs::read_to_string(path).map_err(|e| {
        AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
    })?;

    serde_json::from_str(&content)
        .map_err(|e| AppError::Config(format!("Failed to parse config file {:?}: {}", path, e)))
}

/// Override settings with values from `lookup`. Empty values count as unset.
pub fn apply_env<F>(settings: &mut Settings, lookup: F) -> AppResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    for (key, slot) in [
        ("SAP_OAUTH_URL", &mut settings.sap_oauth_url),
        ("SAP_CLIENT_ID", &mut settings.sap_client_id),
        ("SAP_CLIENT_SECRET", &mut settings.sap_client_secret),
        ("SAP_API_URL", &mut settings.sap_api_url),
        ("SAP_ATTACHMENT_URL", &mut settings.sap_attachment_url),
        ("LOG_DIR", &mut settings.log_dir),
        ("UPSTREAM_PROXY_URL", &mut settings.upstream_proxy_url),
    ] {
        if let Some(value) = get(key) {
            *slot = Some(value);
        }
    }

    for (key, slot) in [
        ("ENVIRONMENT", &mut settings.environment),
        ("LOG_LEVEL", &mut settings.log_level),
        ("HOST", &mut settings.host),
    ] {
        if let Some(value) = get(key) {
            *slot = value;
        }
    }

    for (key, slot) in [
        ("USE_MOCK_AUTH", &mut settings.use_mock_auth),
        ("USE_MOCK_SAP", &mut settings.use_mock_sap),
        ("ENABLE_ATTACHMENT", &mut settings.enable_attachment),
    ] {
        if let Some(value) = get(key) {
            *slot = parse_bool(key, &value)?;
        }
    }

    if let Some(value) = get("HTTP_TIMEOUT_SECONDS") {
        settings.http_timeout_seconds = value.trim().parse().map_err(|_| {
            AppError::Config(format!("HTTP_TIMEOUT_SECONDS is not a number: {}", value))
        })?;
    }

    if let Some(value) = get("PORT") {
        settings.port = value
            .trim()
            .parse()
            .map_err(|_| AppError::Config(format!("PORT is not a valid port: {}", value)))?;
    }

    Ok(())
}

fn parse_bool(key: &str, value: &str) -> AppResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(AppError::Config(format!(
            "{} is not a boolean: {}",
            key, other
        ))),
    }
}

fn validate(settings: &Settings) -> AppResult<()> {
    if !(settings.http_timeout_seconds.is_finite() && settings.http_timeout_seconds > 0.0) {
        return Err(AppError::Config(format!(
            "HTTP_TIMEOUT_SECONDS must be positive, got {}",
            settings.http_timeout_seconds
        )));
    }

    // URLs are optional, but a present one has to parse
    for (key, value) in [
        ("SAP_OAUTH_URL", &settings.sap_oauth_url),
        ("SAP_API_URL", &settings.sap_api_url),
        ("SAP_ATTACHMENT_URL", &settings.sap_attachment_url),
        ("UPSTREAM_PROXY_URL", &settings.upstream_proxy_url),
    ] {
        if let Some(raw) = value.as_deref().filter(|v| !v.is_empty()) {
            url::Url::parse(raw)
                .map_err(|e| AppError::Config(format!("{} is not a valid URL: {}", key, e)))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_no_env_vars() {
        let mut settings = Settings::default();
        apply_env(&mut settings, env(&[])).unwrap();

        assert!(settings.sap_oauth_url.is_none());
        assert_eq!(settings.http_timeout_seconds, 15.0);
        assert_eq!(settings.environment, "dev");
        assert_eq!(settings.log_level, "INFO");
        assert!(!settings.use_mock_auth);
        assert!(!settings.use_mock_sap);
        assert!(!settings.enable_attachment);
        assert_eq!(settings.port, 8000);
    }

    #[test]
    fn test_reads_env_vars() {
        let mut settings = Settings::default();
        apply_env(
            &mut settings,
            env(&[
                ("SAP_OAUTH_URL", "https://auth.example.com/oauth/token"),
                ("SAP_CLIENT_ID", "client"),
                ("SAP_CLIENT_SECRET", "secret"),
                ("HTTP_TIMEOUT_SECONDS", "2.5"),
                ("USE_MOCK_AUTH", "True"),
                ("ENABLE_ATTACHMENT", "1"),
                ("PORT", "9090"),
                ("LOG_LEVEL", "debug"),
            ]),
        )
        .unwrap();

        assert_eq!(
            settings.sap_oauth_url.as_deref(),
            Some("https://auth.example.com/oauth/token")
        );
        assert_eq!(settings.sap_client_id.as_deref(), Some("client"));
        assert_eq!(settings.http_timeout_seconds, 2.5);
        assert!(settings.use_mock_auth);
        assert!(settings.enable_attachment);
        assert_eq!(settings.port, 9090);
        assert_eq!(settings.log_level, "debug");
        assert!(validate(&settings).is_ok());
    }

    #[test]
    fn test_empty_values_are_ignored() {
        let mut settings = Settings::default();
        apply_env(&mut settings, env(&[("SAP_API_URL", ""), ("PORT", " ")])).unwrap();

        assert!(settings.sap_api_url.is_none());
        assert_eq!(settings.port, 8000);
    }

    #[test]
    fn test_invalid_values_are_errors() {
        let mut settings = Settings::default();
        assert!(apply_env(&mut settings, env(&[("USE_MOCK_SAP", "maybe")])).is_err());
        assert!(apply_env(&mut settings, env(&[("PORT", "not-a-port")])).is_err());
        assert!(apply_env(&mut settings, env(&[("HTTP_TIMEOUT_SECONDS", "abc")])).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_timeout_and_url() {
        let settings = Settings {
            http_timeout_seconds: 0.0,
            ..Settings::default()
        };
        assert!(validate(&settings).is_err());

        let settings = Settings {
            sap_api_url: Some("not a url".to_string()),
            ..Settings::default()
        };
        assert!(validate(&settings).is_err());
    }

    #[test]
    fn test_settings_file_keys_match_env_names() {
        let settings: Settings = serde_json::from_str(
            r#"{"SAP_API_URL": "https://sap.example.com/api", "USE_MOCK_SAP": true}"#,
        )
        .unwrap();

        assert_eq!(
            settings.sap_api_url.as_deref(),
            Some("https://sap.example.com/api")
        );
        assert!(settings.use_mock_sap);
        assert_eq!(settings.http_timeout_seconds, 15.0);
    }

    fn write_temp_config(content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir()
            .join(format!("journal-proxy-{}.json", uuid::Uuid::new_v4()));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_env_overrides_settings_file() {
        let path = write_temp_config(
            r#"{
                "SAP_API_URL": "https://file.example.com/api",
                "SAP_CLIENT_ID": "file-client",
                "HTTP_TIMEOUT_SECONDS": 30.0,
                "USE_MOCK_SAP": true,
                "PORT": 7000
            }"#,
        );
        let path_str = path.to_string_lossy().to_string();

        let settings = load_settings_with(env(&[
            (CONFIG_FILE_ENV, path_str.as_str()),
            ("SAP_API_URL", "https://env.example.com/api"),
            ("PORT", "9000"),
            ("SAP_CLIENT_ID", ""),
        ]))
        .unwrap();
        let _ = fs::remove_file(&path);

        // env wins
        assert_eq!(
            settings.sap_api_url.as_deref(),
            Some("https://env.example.com/api")
        );
        assert_eq!(settings.port, 9000);
        // file values survive, empty env values do not clear them
        assert_eq!(settings.sap_client_id.as_deref(), Some("file-client"));
        assert_eq!(settings.http_timeout_seconds, 30.0);
        assert!(settings.use_mock_sap);
        // untouched keys keep their defaults
        assert_eq!(settings.environment, "dev");
    }

    #[test]
    fn test_load_settings_file_directly() {
        let path = write_temp_config(r#"{"ENABLE_ATTACHMENT": true, "LOG_LEVEL": "WARN"}"#);
        let settings = load_settings_file(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert!(settings.enable_attachment);
        assert_eq!(settings.log_level, "WARN");
        assert_eq!(settings.port, 8000);
    }

    #[test]
    fn test_missing_settings_file_is_config_error() {
        let path = std::env::temp_dir()
            .join(format!("journal-proxy-{}-missing.json", uuid::Uuid::new_v4()));

        match load_settings_file(&path) {
            Err(AppError::Config(msg)) => assert!(msg.contains("Failed to read config file")),
            other => panic!("unexpected result: {:?}", other),
        }

        let path_str = path.to_string_lossy().to_string();
        assert!(load_settings_with(env(&[(CONFIG_FILE_ENV, path_str.as_str())])).is_err());
    }

    #[test]
    fn test_unparsable_settings_file_is_config_error() {
        let path = write_temp_config("{ not json");
        let result = load_settings_file(&path);
        let _ = fs::remove_file(&path);

        match result {
            Err(AppError::Config(msg)) => assert!(msg.contains("Failed to parse config file")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_file_values_fail_validation() {
        let path = write_temp_config(r#"{"HTTP_TIMEOUT_SECONDS": -1.0}"#);
        let path_str = path.to_string_lossy().to_string();
        let result = load_settings_with(env(&[(CONFIG_FILE_ENV, path_str.as_str())]));
        let _ = fs::remove_file(&path);

        assert!(result.is_err());
    }
}
