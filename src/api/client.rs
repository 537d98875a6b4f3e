//! Diary REST API Client
//!
//! HTTP client for the Flower Diary backend. One method per endpoint, each a
//! single request: no retries, no caching.

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use super::dto::{
    AdminDiary, AdminStats, CreateDiaryRequest, Diary, DiaryWithImage, FlowerImage,
    GenerateFlowerRequest, User,
};
use super::error::{extract_error_message, ApiError, ApiResult};

/// Default backend URL when nothing is configured
pub const DEFAULT_API_BASE: &str = "http://localhost:8005";

pub const DEFAULT_DIARY_LIMIT: u32 = 10;
pub const DEFAULT_USER_LIMIT: u32 = 100;
pub const DEFAULT_USER_DIARY_LIMIT: u32 = 50;
pub const DEFAULT_ALL_DIARY_LIMIT: u32 = 100;

const CREATE_DIARY_FAILED: &str = "日記の作成に失敗しました";
const FETCH_DIARY_FAILED: &str = "日記の取得に失敗しました";
const GENERATE_FLOWER_FAILED: &str = "画像の生成に失敗しました";
const FETCH_USERS_FAILED: &str = "ユーザー一覧の取得に失敗しました";
const FETCH_DIARY_LIST_FAILED: &str = "日記一覧の取得に失敗しました";
const FETCH_STATS_FAILED: &str = "統計情報の取得に失敗しました";

/// Configuration for the diary client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend (e.g., "http://localhost:8005")
    pub base_url: String,
    /// Acting user until authentication exists
    pub user_id: i64,
    /// Optional request timeout; `None` leaves it to the network stack
    pub request_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            user_id: 1,
            request_timeout: None,
        }
    }
}

/// `skip`/`limit` query, optionally scoped to the acting user
#[derive(Debug, Serialize)]
struct ListQuery {
    skip: u32,
    limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<i64>,
}

#[derive(Debug, Serialize)]
struct UserQuery {
    user_id: i64,
}

/// Flower Diary REST API client
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct DiaryClient {
    client: Client,
    config: ClientConfig,
}

impl DiaryClient {
    /// Create a new client with the given configuration
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(ApiError::from_transport)?;

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    // ============================================
    // Diaries
    // ============================================

    /// Create a diary; the backend generates its flower in the same call
    pub async fn create_diary(&self, request: &CreateDiaryRequest) -> ApiResult<DiaryWithImage> {
        let url = self.url("/api/v1/diaries/");
        tracing::debug!(url = %url, user_id = request.user_id, mood = ?request.mood, "Creating diary");

        let builder = self
            .client
            .post(&url)
            .query(&UserQuery {
                user_id: request.user_id,
            })
            .json(request);

        let response = send(builder).await?;
        tracing::debug!(status = %response.status(), "Create diary response");

        let result: DiaryWithImage = read_json_detailed(response, CREATE_DIARY_FAILED).await?;
        tracing::info!(
            diary_id = result.diary.id,
            has_image = result.flower_image.is_some(),
            "Diary created"
        );
        Ok(result)
    }

    /// List the acting user's diaries, newest first as the backend orders them
    pub async fn get_diaries(&self, skip: u32, limit: u32) -> ApiResult<Vec<Diary>> {
        let builder = self.client.get(self.url("/api/v1/diaries/")).query(&ListQuery {
            skip,
            limit,
            user_id: Some(self.config.user_id),
        });

        read_json(send(builder).await?, FETCH_DIARY_FAILED).await
    }

    /// Fetch one diary with its flower
    pub async fn get_diary(&self, diary_id: i64) -> ApiResult<DiaryWithImage> {
        let builder = self
            .client
            .get(self.url(&format!("/api/v1/diaries/{}", diary_id)))
            .query(&UserQuery {
                user_id: self.config.user_id,
            });

        read_json(send(builder).await?, FETCH_DIARY_FAILED).await
    }

    /// Ask the backend to (re)generate the flower for an existing diary
    pub async fn generate_flower_image(&self, diary_id: i64) -> ApiResult<FlowerImage> {
        let url = self.url("/api/v1/flowers/generate");
        tracing::debug!(url = %url, diary_id, "Requesting flower generation");

        let builder = self
            .client
            .post(&url)
            .query(&UserQuery {
                user_id: self.config.user_id,
            })
            .json(&GenerateFlowerRequest { diary_id });

        read_json_detailed(send(builder).await?, GENERATE_FLOWER_FAILED).await
    }

    // ============================================
    // Admin
    // ============================================

    pub async fn get_all_users(&self, skip: u32, limit: u32) -> ApiResult<Vec<User>> {
        let builder = self.client.get(self.url("/api/v1/admin/users")).query(&ListQuery {
            skip,
            limit,
            user_id: None,
        });

        read_json(send(builder).await?, FETCH_USERS_FAILED).await
    }

    pub async fn get_user_diaries(
        &self,
        user_id: i64,
        skip: u32,
        limit: u32,
    ) -> ApiResult<Vec<AdminDiary>> {
        let builder = self
            .client
            .get(self.url(&format!("/api/v1/admin/users/{}/diaries", user_id)))
            .query(&ListQuery {
                skip,
                limit,
                user_id: None,
            });

        read_json(send(builder).await?, FETCH_DIARY_LIST_FAILED).await
    }

    pub async fn get_all_diaries(&self, skip: u32, limit: u32) -> ApiResult<Vec<AdminDiary>> {
        let builder = self.client.get(self.url("/api/v1/admin/diaries")).query(&ListQuery {
            skip,
            limit,
            user_id: None,
        });

        read_json(send(builder).await?, FETCH_DIARY_LIST_FAILED).await
    }

    pub async fn get_admin_stats(&self) -> ApiResult<AdminStats> {
        let builder = self.client.get(self.url("/api/v1/admin/stats"));

        read_json(send(builder).await?, FETCH_STATS_FAILED).await
    }
}

async fn send(builder: RequestBuilder) -> ApiResult<Response> {
    builder.send().await.map_err(|e| {
        tracing::warn!(error = %e, "Request failed before a response arrived");
        ApiError::from_transport(e)
    })
}

/// Decode a success body, or fail with the fixed `fallback` message
async fn read_json<T: DeserializeOwned>(response: Response, fallback: &str) -> ApiResult<T> {
    let status = response.status();
    if !status.is_success() {
        tracing::warn!(status = %status, url = %response.url(), "Backend returned an error status");
        return Err(ApiError::Status {
            status: status.as_u16(),
            message: fallback.to_string(),
        });
    }

    decode(response, fallback).await
}

/// Like [`read_json`], but surfaces the backend's own error detail
async fn read_json_detailed<T: DeserializeOwned>(
    response: Response,
    fallback: &str,
) -> ApiResult<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::warn!(status = %status, body = %body, "Backend returned an error status");
        return Err(ApiError::Status {
            status: status.as_u16(),
            message: extract_error_message(&body, fallback),
        });
    }

    decode(response, fallback).await
}

async fn decode<T: DeserializeOwned>(response: Response, fallback: &str) -> ApiResult<T> {
    let body = response.text().await.map_err(ApiError::from_transport)?;
    serde_json::from_str(&body).map_err(|e| {
        tracing::warn!(error = %e, "Unexpected response body");
        ApiError::Decode {
            message: fallback.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8005");
        assert_eq!(config.user_id, 1);
        assert!(config.request_timeout.is_none());
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = DiaryClient::new(ClientConfig {
            base_url: "http://api.example.com/".to_string(),
            ..ClientConfig::default()
        })
        .unwrap();

        assert_eq!(
            client.url("/api/v1/admin/stats"),
            "http://api.example.com/api/v1/admin/stats"
        );
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_network_error() {
        let client = DiaryClient::new(ClientConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            ..ClientConfig::default()
        })
        .unwrap();

        let err = client.get_admin_stats().await.unwrap_err();
        assert!(matches!(err, ApiError::Network { .. }));
        assert_eq!(err.to_string(), "ネットワークエラーが発生しました");
    }
}
