use crate::error::SourceError;
use crate::omdb::api;
use crate::traits::{FetchedImage, ImageFetcher, MovieApi, PlotLength, SearchQuery, SearchResponse};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use movie_search_config::Config;
use movie_search_models::MovieDetails;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

fn create_http_client(timeout: Duration) -> Result<Client> {
    let client = Client::builder()
        .timeout(timeout)
        .user_agent(concat!("marquee/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

#[derive(Clone)]
pub struct OmdbClient {
    client: Arc<Client>,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    pub fn new(api_key: String, base_url: String, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: Arc::new(create_http_client(timeout)?),
            base_url,
            api_key,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config
            .effective_api_key()
            .ok_or_else(|| anyhow!("No API key configured"))?;
        info!("Using movie API at {}", config.api.base_url);
        Self::new(
            api_key,
            config.api.base_url.clone(),
            Duration::from_secs(config.api.timeout_secs),
        )
    }

    /// Image downloader sharing this client's connection pool
    pub fn image_fetcher(&self) -> HttpImageFetcher {
        HttpImageFetcher {
            client: self.client.clone(),
        }
    }
}

#[async_trait]
impl MovieApi for OmdbClient {
    fn source_name(&self) -> &str {
        "omdb"
    }

    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse, SourceError> {
        api::search(&self.client, &self.base_url, &self.api_key, query).await
    }

    async fn details(&self, imdb_id: &str, plot: PlotLength) -> Result<MovieDetails, SourceError> {
        api::details(&self.client, &self.base_url, &self.api_key, imdb_id, plot).await
    }
}

#[derive(Clone)]
pub struct HttpImageFetcher {
    client: Arc<Client>,
}

impl HttpImageFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: Arc::new(create_http_client(timeout)?),
        })
    }
}

#[async_trait]
impl ImageFetcher for HttpImageFetcher {
    async fn fetch_image(&self, url: &str) -> Result<FetchedImage, SourceError> {
        debug!("GET image {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
                body: String::new(),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());
        if let Some(ref ct) = content_type {
            if !ct.starts_with("image/") {
                return Err(SourceError::Decode(format!("expected an image, got {}", ct)));
            }
        }

        let bytes = response.bytes().await?.to_vec();
        if bytes.is_empty() {
            return Err(SourceError::Decode("empty image body".to_string()));
        }
        Ok(FetchedImage { bytes, content_type })
    }
}
