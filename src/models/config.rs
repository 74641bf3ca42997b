use serde::{Deserialize, Serialize};

/// Application settings
///
/// Field names mirror the environment variables so the same keys work in the
/// JSON config file and in the process environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    #[serde(rename = "SAP_OAUTH_URL")]
    pub sap_oauth_url: Option<String>,
    #[serde(rename = "SAP_CLIENT_ID")]
    pub sap_client_id: Option<String>,
    #[serde(rename = "SAP_CLIENT_SECRET")]
    pub sap_client_secret: Option<String>,
    #[serde(rename = "SAP_API_URL")]
    pub sap_api_url: Option<String>,
    #[serde(rename = "SAP_ATTACHMENT_URL")]
    pub sap_attachment_url: Option<String>,
    #[serde(rename = "HTTP_TIMEOUT_SECONDS")]
    pub http_timeout_seconds: f64,
    #[serde(rename = "ENVIRONMENT")]
    pub environment: String,
    #[serde(rename = "LOG_LEVEL")]
    pub log_level: String,
    /// Directory for rolling log files; console only when unset
    #[serde(rename = "LOG_DIR")]
    pub log_dir: Option<String>,
    #[serde(rename = "USE_MOCK_AUTH")]
    pub use_mock_auth: bool,
    #[serde(rename = "USE_MOCK_SAP")]
    pub use_mock_sap: bool,
    #[serde(rename = "ENABLE_ATTACHMENT")]
    pub enable_attachment: bool,
    #[serde(rename = "HOST")]
    pub host: String,
    #[serde(rename = "PORT")]
    pub port: u16,
    /// http://, https:// or socks5:// proxy for outbound calls
    #[serde(rename = "UPSTREAM_PROXY_URL")]
    pub upstream_proxy_url: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sap_oauth_url: None,
            sap_client_id: None,
            sap_client_secret: None,
            sap_api_url: None,
            sap_attachment_url: None,
            http_timeout_seconds: 15.0,
            environment: "dev".to_string(),
            log_level: "INFO".to_string(),
            log_dir: None,
            use_mock_auth: false,
            use_mock_sap: false,
            enable_attachment: false,
            host: "0.0.0.0".to_string(),
            port: 8000,
            upstream_proxy_url: None,
        }
    }
}

impl Settings {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
