use super::{ReviewStore, UpstreamError};
use crate::domain::Review;
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// HTTP client for the servicedb API
#[derive(Clone)]
pub struct ServiceDbClient {
    client: Client,
    base_url: String,
}

impl ServiceDbClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(
        &self,
        method: &'static str,
        path: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<Option<Response>, UpstreamError> {
        debug!(method, path, "Calling servicedb");

        let resp = request.send().await.map_err(|source| UpstreamError::Transport {
            path: path.to_string(),
            source,
        })?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !resp.status().is_success() {
            return Err(UpstreamError::Status {
                method,
                path: path.to_string(),
                status: resp.status().as_u16(),
            });
        }

        Ok(Some(resp))
    }

    /// Body as `T`, or `None` when servicedb sent nothing (or JSON null)
    async fn read_json<T: DeserializeOwned>(
        path: &str,
        resp: Response,
    ) -> Result<Option<T>, UpstreamError> {
        let bytes = resp.bytes().await.map_err(|source| UpstreamError::Transport {
            path: path.to_string(),
            source,
        })?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        serde_json::from_slice::<Option<T>>(&bytes).map_err(|source| UpstreamError::Decode {
            path: path.to_string(),
            source,
        })
    }

    async fn exists(&self, path: String) -> Result<bool, UpstreamError> {
        let resp = self
            .send("GET", &path, self.client.get(self.url(&path)))
            .await?;
        Ok(resp.is_some())
    }
}

#[async_trait]
impl ReviewStore for ServiceDbClient {
    async fn list_reviews(&self) -> Result<Vec<Review>, UpstreamError> {
        let path = "/api/reviews";
        let resp = self
            .send("GET", path, self.client.get(self.url(path)))
            .await?
            .ok_or_else(|| UpstreamError::Status {
                method: "GET",
                path: path.to_string(),
                status: StatusCode::NOT_FOUND.as_u16(),
            })?;

        Ok(Self::read_json::<Vec<Review>>(path, resp)
            .await?
            .unwrap_or_default())
    }

    async fn fetch_review(&self, id: i64) -> Result<Option<Review>, UpstreamError> {
        let path = format!("/api/reviews/{id}");
        match self.send("GET", &path, self.client.get(self.url(&path))).await? {
            Some(resp) => Self::read_json(&path, resp).await,
            None => Ok(None),
        }
    }

    async fn insert_review(&self, review: &Review) -> Result<Review, UpstreamError> {
        let path = "/api/reviews";
        let resp = self
            .send("POST", path, self.client.post(self.url(path)).json(review))
            .await?
            .ok_or_else(|| UpstreamError::Status {
                method: "POST",
                path: path.to_string(),
                status: StatusCode::NOT_FOUND.as_u16(),
            })?;

        Self::read_json(path, resp)
            .await?
            .ok_or_else(|| UpstreamError::EmptyBody {
                path: path.to_string(),
            })
    }

    async fn replace_review(&self, id: i64, review: &Review) -> Result<bool, UpstreamError> {
        let path = format!("/api/reviews/{id}");
        let resp = self
            .send("PUT", &path, self.client.put(self.url(&path)).json(review))
            .await?;
        Ok(resp.is_some())
    }

    async fn delete_review(&self, id: i64) -> Result<bool, UpstreamError> {
        let path = format!("/api/reviews/{id}");
        let resp = self
            .send("DELETE", &path, self.client.delete(self.url(&path)))
            .await?;
        Ok(resp.is_some())
    }

    async fn user_exists(&self, id: i64) -> Result<bool, UpstreamError> {
        self.exists(format!("/api/users/{id}")).await
    }

    async fn film_exists(&self, id: i64) -> Result<bool, UpstreamError> {
        self.exists(format!("/api/films/{id}")).await
    }
}
