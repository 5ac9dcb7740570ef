use crate::api::{CourseDetail, Page};
use crate::config::CatalogConfig;
use crate::error::{CatalogError, Result};
use crate::utils::{build_detail_url, build_query, build_url};
use serde::de::DeserializeOwned;
use tracing::debug;

/// HTTP access to the catalog for one institution and term.
#[derive(Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
    config: CatalogConfig,
    query: String,
}

impl CatalogClient {
    pub fn new(config: CatalogConfig) -> Result<Self> {
        let query = build_query(&config.institution, &config.term)?;
        Ok(Self {
            client: reqwest::Client::new(),
            config,
            query,
        })
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    pub async fn fetch_page<T: DeserializeOwned>(&self, page: u32) -> Result<Page<T>> {
        let url = build_url(&self.config.base_url, &self.config.page_path, &self.query, page);
        debug!("GET {}", url);
        self.get_json(url).await
    }

    pub async fn fetch_description(&self, id: &str) -> Result<String> {
        let url = build_detail_url(&self.config.base_url, &self.config.detail_path, id);
        debug!("GET {}", url);
        let detail: CourseDetail = self.get_json(url).await?;
        Ok(detail.course_description)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T> {
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status { url, status });
        }
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|source| CatalogError::Parse { url, source })
    }
}
