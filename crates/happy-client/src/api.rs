// ABOUTME: HTTP client for the Happy Thoughts REST service
// ABOUTME: ThoughtsApi trait is the seam the store talks through; HttpThoughtsApi implements it with reqwest

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::ApiError;
use crate::models::{LikeAction, NewThought, Thought};

/// Public instance of the thoughts service.
pub const DEFAULT_BASE_URL: &str = "https://wen-happy-thoughts-api.onrender.com";

const THOUGHTS_PATH: &str = "thoughts";

/// The three remote operations the store needs.
#[async_trait]
pub trait ThoughtsApi: Send + Sync {
    /// `GET /thoughts`
    async fn list_thoughts(&self) -> Result<Vec<Thought>, ApiError>;

    /// `POST /thoughts` with `{"message": ...}`
    async fn create_thought(&self, message: &str) -> Result<Thought, ApiError>;

    /// `POST /thoughts/{id}/{action}`
    async fn like_thought(&self, id: &str, action: LikeAction) -> Result<Thought, ApiError>;
}

/// reqwest-backed implementation of [`ThoughtsApi`].
#[derive(Debug, Clone)]
pub struct HttpThoughtsApi {
    client: Client,
    base_url: Url,
}

impl HttpThoughtsApi {
    /// Create a client for the service rooted at `base_url`.
    ///
    /// `timeout` bounds each whole request so a hung call ends in an error.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base_url =
            Url::parse(base_url).map_err(|e| ApiError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }

        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .user_agent(concat!("happy-thoughts/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build `<base>/thoughts/<segments...>`, percent-encoding each segment.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push(THOUGHTS_PATH)
            .extend(segments);
        Ok(url)
    }

    async fn decode<T: DeserializeOwned>(
        response: Response,
        context: &'static str,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), context, "Non-success response");
            return Err(ApiError::status(status.as_u16(), context));
        }
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ThoughtsApi for HttpThoughtsApi {
    async fn list_thoughts(&self) -> Result<Vec<Thought>, ApiError> {
        let url = self.endpoint(&[])?;
        tracing::debug!(%url, "GET thoughts");
        let response = self.client.get(url).send().await?;
        Self::decode(response, "Failed to fetch thoughts").await
    }

    async fn create_thought(&self, message: &str) -> Result<Thought, ApiError> {
        let url = self.endpoint(&[])?;
        tracing::debug!(%url, len = message.chars().count(), "POST thought");
        let response = self
            .client
            .post(url)
            .json(&NewThought { message })
            .send()
            .await?;
        Self::decode(response, "Failed to post thoughts").await
    }

    async fn like_thought(&self, id: &str, action: LikeAction) -> Result<Thought, ApiError> {
        let url = self.endpoint(&[id, action.as_str()])?;
        tracing::debug!(%url, thought_id = id, %action, "POST like");
        let response = self.client.post(url).send().await?;
        Self::decode(response, "Failed to update likes").await
    }
}
