use reqwest::{Client, Proxy};
use std::time::Duration;

use crate::error::AppResult;
use crate::models::Settings;

/// Create the shared HTTP client from settings
pub fn create_client(settings: &Settings) -> AppResult<Client> {
    create_client_with_proxy(
        Duration::from_secs_f64(settings.http_timeout_seconds),
        settings.upstream_proxy_url.as_deref(),
    )
}

/// Create an HTTP client with the given timeout and optional upstream proxy
pub fn create_client_with_proxy(timeout: Duration, proxy_url: Option<&str>) -> AppResult<Client> {
    let mut builder = Client::builder().timeout(timeout);

    if let Some(url) = proxy_url.filter(|u| !u.is_empty()) {
        builder = builder.proxy(Proxy::all(url)?);
        tracing::info!("HTTP client upstream proxy enabled: {}", url);
    }

    Ok(builder.build()?)
}
