use crate::catalog::builtin::builtin_catalog;
use crate::catalog::Catalog;
use crate::config::Settings;
use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue};
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_RETRIES: u32 = 3;
/// Backoff doubles per attempt up to 2^5 = 32 seconds.
const MAX_BACKOFF_EXPONENT: u32 = 5;

/// Where the process-wide catalog comes from. Loaded once at startup.
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    fn source_name(&self) -> &'static str;

    async fn load(&self) -> Result<Catalog>;
}

#[derive(Debug, Clone, Default)]
pub struct BuiltinCatalogSource;

#[async_trait::async_trait]
impl CatalogSource for BuiltinCatalogSource {
    fn source_name(&self) -> &'static str {
        "builtin"
    }

    async fn load(&self) -> Result<Catalog> {
        builtin_catalog()
    }
}

#[derive(Debug, Clone)]
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl CatalogSource for FileCatalogSource {
    fn source_name(&self) -> &'static str {
        "file"
    }

    async fn load(&self) -> Result<Catalog> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("failed to read catalog file {}", self.path.display()))?;
        Catalog::from_json_str(&text)
            .with_context(|| format!("invalid catalog file {}", self.path.display()))
    }
}

#[derive(Debug, Clone)]
pub struct HttpCatalogSource {
    http: reqwest::Client,
    url: String,
    api_key: Option<String>,
    retries: u32,
}

impl HttpCatalogSource {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let url = settings.require_catalog_url()?.to_string();
        let api_key = settings.catalog_api_key.clone();

        let timeout_secs = std::env::var("CATALOG_FETCH_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let retries = std::env::var("CATALOG_FETCH_RETRIES")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(DEFAULT_RETRIES)
            .max(1);

        Self::new(url, api_key, Duration::from_secs(timeout_secs), retries)
    }

    pub fn new(
        url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
        retries: u32,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build catalog http client")?;

        Ok(Self {
            http,
            url: url.into(),
            api_key,
            retries: retries.max(1),
        })
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        if let Some(api_key) = &self.api_key {
            headers.insert("x-api-key", HeaderValue::from_str(api_key)?);
        }
        Ok(headers)
    }

    async fn fetch_once(&self) -> Result<serde_json::Value> {
        let res = self
            .http
            .get(&self.url)
            .headers(self.headers()?)
            .send()
            .await
            .context("catalog request failed")?;

        let status = res.status();
        let text = res.text().await.context("failed to read catalog response")?;
        if !status.is_success() {
            anyhow::bail!("catalog HTTP {status}: {text}");
        }

        serde_json::from_str(&text).context("catalog response is not valid JSON")
    }
}

#[async_trait::async_trait]
impl CatalogSource for HttpCatalogSource {
    fn source_name(&self) -> &'static str {
        "http_json"
    }

    async fn load(&self) -> Result<Catalog> {
        let mut attempt: u32 = 0;
        let raw = loop {
            attempt += 1;
            match self.fetch_once().await {
                Ok(raw) => break raw,
                Err(err) => {
                    if attempt >= self.retries {
                        return Err(err);
                    }
                    let backoff = backoff_for(attempt);
                    tracing::warn!(attempt, ?backoff, error = %err, "catalog fetch failed; retrying");
                    tokio::time::sleep(backoff).await;
                }
            }
        };

        // A malformed payload is not retried: it will not fix itself.
        Catalog::from_json_value(raw).with_context(|| format!("invalid catalog from {}", self.url))
    }
}

fn backoff_for(attempt: u32) -> Duration {
    let exponent = attempt.saturating_sub(1).min(MAX_BACKOFF_EXPONENT);
    Duration::from_secs(1 << exponent)
}

/// URL wins over path, path wins over the builtin catalog.
pub fn catalog_source_from_settings(settings: &Settings) -> Result<Box<dyn CatalogSource>> {
    if settings.catalog_url.is_some() {
        return Ok(Box::new(HttpCatalogSource::from_settings(settings)?));
    }
    if let Some(path) = settings.catalog_path.as_deref() {
        return Ok(Box::new(FileCatalogSource::new(path)));
    }
    Ok(Box::new(BuiltinCatalogSource))
}
