//! HTTP transport for the guest-activation and search endpoints.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, USER_AGENT};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::api::{ApiError, ErrorResponse, SearchApi, SearchOptions};
use crate::config::Config;
use crate::models::Adaptive;

const ACTIVATE_PATH: &str = "/1.1/guest/activate.json";
const SEARCH_PATH: &str = "/i/api/2/search/adaptive.json";

/// Results per page; fixed by the endpoint's web client.
const PAGE_SIZE: &str = "40";

/// HTTP client for the search service.
///
/// Carries the application-level bearer credential and user agent on
/// every request; the short-lived guest token is supplied per call by
/// the traversal engine.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    bearer_token: String,
    user_agent: String,
    api_base_url: String,
    search_base_url: String,
    max_retry_attempts: u32,
}

impl Client {
    pub fn new(config: &Config) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .expect("failed to build http client");

        Self {
            http,
            bearer_token: config.bearer_token.clone(),
            user_agent: config.user_agent.clone(),
            api_base_url: config.api_base_url.clone(),
            search_base_url: config.search_base_url.clone(),
            max_retry_attempts: config.max_retry_attempts,
        }
    }

    fn request(&self, method: Method, url: &str, guest_token: &str) -> reqwest::RequestBuilder {
        let mut req = self
            .http
            .request(method, url)
            .header(USER_AGENT, &self.user_agent)
            .header(AUTHORIZATION, format!("Bearer {}", self.bearer_token));

        if !guest_token.is_empty() {
            req = req.header("x-guest-token", guest_token);
        }

        req
    }

    /// Decode a success body as `T`, or a non-2xx body as the service's
    /// structured error list.
    async fn decode<T: DeserializeOwned>(res: reqwest::Response) -> Result<T, ApiError> {
        if res.status().is_success() {
            Ok(res.json::<T>().await?)
        } else {
            let err = res.json::<ErrorResponse>().await?;
            Err(ApiError::Upstream(err))
        }
    }
}

#[async_trait]
impl SearchApi for Client {
    async fn activate_guest_token(&self) -> Result<String, ApiError> {
        let url = format!("{}{}", self.api_base_url, ACTIVATE_PATH);
        debug!(%url, "activating guest token");

        let res = self.request(Method::POST, &url, "").send().await?;
        let body: GuestTokenResponse = Self::decode(res).await?;

        Ok(body.guest_token)
    }

    async fn search(&self, opts: &SearchOptions) -> Result<Adaptive, ApiError> {
        let url = format!("{}{}", self.search_base_url, SEARCH_PATH);

        let mut params = vec![
            ("q", opts.query.encode()),
            ("include_quote_count", "true".to_string()),
            ("include_reply_count", "1".to_string()),
            ("tweet_mode", "extended".to_string()),
            ("count", PAGE_SIZE.to_string()),
            ("query_source", "typed_query".to_string()),
        ];

        if !opts.cursor.is_empty() {
            params.push(("cursor", opts.cursor.clone()));
        }

        if !opts.top {
            params.push(("tweet_search_mode", "live".to_string()));
        }

        debug!(cursor = %opts.cursor, top = opts.top, "fetching page");

        let res = self
            .request(Method::GET, &url, &opts.guest_token)
            .query(&params)
            .send()
            .await?;

        Self::decode(res).await
    }

    fn max_retry_attempts(&self) -> u32 {
        self.max_retry_attempts
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GuestTokenResponse {
    guest_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Query;
    use mockito::Matcher;

    fn test_client(server: &mockito::Server) -> Client {
        let config = Config {
            api_base_url: server.url(),
            search_base_url: server.url(),
            ..Config::default()
        };

        Client::new(&config)
    }

    fn live_query() -> Matcher {
        Matcher::Exact(
            "q=foo&include_quote_count=true&include_reply_count=1&tweet_mode=extended\
             &count=40&query_source=typed_query&tweet_search_mode=live"
                .to_string(),
        )
    }

    #[tokio::test]
    async fn test_activate_guest_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", ACTIVATE_PATH)
            .match_header("authorization", Matcher::Regex("^Bearer .+".to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{ "guest_token": "deadbeef" }"#)
            .create_async()
            .await;

        let client = test_client(&server);
        let token = client.activate_guest_token().await.unwrap();

        assert_eq!(token, "deadbeef");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_activate_guest_token_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", ACTIVATE_PATH)
            .with_status(403)
            .with_header("content-type", "application/json")
            .with_body(r#"{ "errors": [{ "code": 200, "message": "forbidden" }] }"#)
            .create_async()
            .await;

        let client = test_client(&server);
        let err = client.activate_guest_token().await.unwrap_err();

        assert!(err.is_retryable());
        assert_eq!(err.to_string(), "200: forbidden");
    }

    #[tokio::test]
    async fn test_search_without_cursor() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", SEARCH_PATH)
            .match_query(live_query())
            .match_header("x-guest-token", "deadbeef")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{ "globalObjects": { "tweets": {}, "users": {} } }"#)
            .create_async()
            .await;

        let client = test_client(&server);
        let opts = SearchOptions {
            query: Query {
                text: "foo".to_string(),
                ..Default::default()
            },
            guest_token: "deadbeef".to_string(),
            ..Default::default()
        };

        let page = client.search(&opts).await.unwrap();

        assert!(page.global_objects.tweets.is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_search_with_cursor() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", SEARCH_PATH)
            .match_query(Matcher::Exact(
                "q=foo&include_quote_count=true&include_reply_count=1&tweet_mode=extended\
                 &count=40&query_source=typed_query&cursor=scroll%3Adeadbeef\
                 &tweet_search_mode=live"
                    .to_string(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("{}")
            .create_async()
            .await;

        let client = test_client(&server);
        let opts = SearchOptions {
            query: Query {
                text: "foo".to_string(),
                ..Default::default()
            },
            cursor: "scroll:deadbeef".to_string(),
            ..Default::default()
        };

        client.search(&opts).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_search_top_mode_omits_live_flag() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", SEARCH_PATH)
            .match_query(Matcher::Exact(
                "q=foo&include_quote_count=true&include_reply_count=1&tweet_mode=extended\
                 &count=40&query_source=typed_query"
                    .to_string(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("{}")
            .create_async()
            .await;

        let client = test_client(&server);
        let opts = SearchOptions {
            query: Query {
                text: "foo".to_string(),
                ..Default::default()
            },
            top: true,
            ..Default::default()
        };

        client.search(&opts).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_search_upstream_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", SEARCH_PATH)
            .match_query(live_query())
            .with_status(403)
            .with_header("content-type", "application/json")
            .with_body(r#"{ "errors": [{ "code": 200, "message": "forbidden" }] }"#)
            .create_async()
            .await;

        let client = test_client(&server);
        let opts = SearchOptions {
            query: Query {
                text: "foo".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };

        let err = client.search(&opts).await.unwrap_err();

        assert!(err.is_retryable());
        assert_eq!(err.to_string(), "200: forbidden");
    }

    #[tokio::test]
    async fn test_search_undecodable_error_body_is_fatal() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", SEARCH_PATH)
            .match_query(live_query())
            .with_status(502)
            .with_body("Bad Gateway")
            .create_async()
            .await;

        let client = test_client(&server);
        let opts = SearchOptions {
            query: Query {
                text: "foo".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };

        let err = client.search(&opts).await.unwrap_err();
        assert!(!err.is_retryable());
    }
}
