/// HTTP client for the shelter API
///
/// All remote operations go through `ApiClient`. The underlying
/// reqwest client keeps a cookie store, so the session cookie issued
/// by `/auth/login` rides along on every later request; the app never
/// handles tokens itself.

use serde_json::json;
use thiserror::Error;
use tracing::debug;

use super::models::{Dog, MatchResponse, SearchPage};
use crate::state::search::SearchQuery;

/// Failure of a remote operation
///
/// Cloneable so it can travel inside UI messages; the original reqwest
/// error is flattened at the boundary.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// The request never completed (DNS, connect, timeout, ...)
    #[error("network error: {0}")]
    Network(String),
    /// The service answered with a non-success status
    #[error("server returned status {status}")]
    Status { status: u16 },
    /// The response body was not what we expected
    #[error("malformed response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            ApiError::Status {
                status: status.as_u16(),
            }
        } else if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Client for the five shelter endpoints plus photo downloads
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client against the given base URL.
    ///
    /// The cookie store is enabled so the login session persists for
    /// the lifetime of the client.
    pub fn new(base_url: &str) -> Self {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .unwrap_or_default();

        ApiClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST /auth/login — the service sets the session cookie on success
    pub async fn login(&self, name: &str, email: &str) -> Result<(), ApiError> {
        self.http
            .post(self.url("/auth/login"))
            .json(&json!({ "name": name, "email": email }))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// POST /auth/logout — invalidates the server-side session
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.http
            .post(self.url("/auth/logout"))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// GET /dogs/breeds — every known breed name, unpaginated
    pub async fn breeds(&self) -> Result<Vec<String>, ApiError> {
        let breeds = self
            .http
            .get(self.url("/dogs/breeds"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(breeds)
    }

    /// GET /locations/zip_codes — every known zip code
    pub async fn zip_codes(&self) -> Result<Vec<String>, ApiError> {
        let zips = self
            .http
            .get(self.url("/locations/zip_codes"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(zips)
    }

    /// GET /dogs/search — one page of matching identifiers.
    ///
    /// Filter fields that are unset never appear in the query string;
    /// the query structure guarantees that (see `SearchQuery`).
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchPage, ApiError> {
        let pairs = query.query_pairs();
        debug!(?pairs, "issuing search");

        let page = self
            .http
            .get(self.url("/dogs/search"))
            .query(&pairs)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(page)
    }

    /// POST /dogs — resolve identifiers to full records.
    ///
    /// An empty identifier list short-circuits to an empty result
    /// without touching the network. The service does not guarantee
    /// response order matches input order, so callers must look
    /// records up by id rather than by position.
    pub async fn dogs(&self, ids: &[String]) -> Result<Vec<Dog>, ApiError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let dogs = self
            .http
            .post(self.url("/dogs"))
            .json(&ids)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(dogs)
    }

    /// POST /dogs/match — ask the service to pick one id from the
    /// submitted favorites. The selection algorithm is the service's
    /// business; we just display its answer.
    pub async fn match_dogs(&self, ids: &[String]) -> Result<String, ApiError> {
        let resp: MatchResponse = self
            .http
            .post(self.url("/dogs/match"))
            .json(&ids)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(resp.matched_id)
    }

    /// Download a dog photo. The URL is absolute (it comes straight
    /// from the record), so the base URL is not involved.
    pub async fn image(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        let bytes = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Base URL that would fail instantly if anything tried to connect.
    const UNROUTABLE: &str = "http://127.0.0.1:1/";

    #[tokio::test]
    async fn test_empty_id_list_makes_no_network_call() {
        let client = ApiClient::new(UNROUTABLE);
        let dogs = client.dogs(&[]).await.unwrap();
        assert!(dogs.is_empty());
    }

    #[tokio::test]
    async fn test_non_empty_id_list_hits_the_network() {
        let client = ApiClient::new(UNROUTABLE);
        let result = client.dogs(&["d1".to_string()]).await;
        assert!(matches!(result, Err(ApiError::Network(_))));
    }

    #[test]
    fn test_base_url_trailing_slash_is_stripped() {
        let client = ApiClient::new("https://example.com/");
        assert_eq!(client.url("/dogs/breeds"), "https://example.com/dogs/breeds");
    }
}
