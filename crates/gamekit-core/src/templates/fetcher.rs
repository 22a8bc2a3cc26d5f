//! Template fetching from a remote base URL
//!
//! The catalog and the selected archives are downloaded up front into a
//! [`MemorySource`], so the scaffold itself never touches the network.

use super::manifest::{TemplateCatalog, CATALOG_FILE};
use super::source::MemorySource;
use crate::product::ProductConfig;
use anyhow::{Context, Result};
use tracing::info;
use url::Url;

/// Template fetcher - downloads the catalog and archives from a base URL
pub struct TemplateFetcher {
    base_url: Url,
    client: reqwest::Client,
}

impl TemplateFetcher {
    /// Create a new fetcher with a custom user agent
    pub fn new(base_url: Url, user_agent: &str) -> Self {
        Self {
            base_url,
            client: reqwest::Client::builder()
                .user_agent(user_agent)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    /// Create a fetcher from a URL string, using the product's user agent
    pub fn from_url<C: ProductConfig>(config: &C, url: &str) -> Result<Self> {
        let base_url = Url::parse(url).with_context(|| format!("Invalid template URL: {}", url))?;
        Ok(Self::new(base_url, config.user_agent()))
    }

    /// Build a URL by appending path segments, preserving query parameters
    fn build_url(base: &Url, path: &str) -> Result<Url> {
        let mut url = base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| anyhow::anyhow!("URL cannot have path segments: {}", base))?;
            segments.pop_if_empty();
            for segment in path.split('/').filter(|s| !s.is_empty()) {
                segments.push(segment);
            }
        }
        Ok(url)
    }

    async fn get_bytes(&self, url: Url) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("Failed to fetch {}", url))?;

        if !response.status().is_success() {
            anyhow::bail!("Failed to fetch {}: HTTP {}", url, response.status());
        }

        Ok(response.bytes().await?.to_vec())
    }

    /// Fetch the catalog listing available templates
    pub async fn fetch_catalog(&self) -> Result<TemplateCatalog> {
        let url = Self::build_url(&self.base_url, CATALOG_FILE)?;
        let bytes = self.get_bytes(url).await?;
        let content = String::from_utf8(bytes).context("Template catalog is not valid UTF-8")?;
        TemplateCatalog::from_yaml(&content).context("Failed to parse template catalog")
    }

    /// Download the archives for `ids` into an in-memory source
    pub async fn fetch_templates(
        &self,
        catalog: &TemplateCatalog,
        ids: &[&str],
    ) -> Result<MemorySource> {
        let mut source = MemorySource::new();

        for id in ids {
            let entry = catalog.find(id).ok_or_else(|| {
                anyhow::anyhow!(
                    "Template '{}' not found. Available templates: {}",
                    id,
                    catalog.ids().join(", ")
                )
            })?;

            let url = Self::build_url(&self.base_url, &entry.archive_file())?;
            let archive = self
                .get_bytes(url)
                .await
                .with_context(|| format!("Failed to fetch template archive: {}", id))?;
            info!(template = %id, bytes = archive.len(), "downloaded template archive");

            source.insert(entry.clone(), archive);
        }

        Ok(source)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}
