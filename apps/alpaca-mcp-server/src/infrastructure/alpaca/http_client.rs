//! HTTP client wrapper for the Alpaca trading and market data APIs.

use reqwest::header::RETRY_AFTER;
use reqwest::{Client, Method, StatusCode, Url};
use serde::Deserialize;
use serde_json::Value;

use super::config::AlpacaConfig;
use super::error::AlpacaError;
use super::query::Query;

/// Header carrying the API key id.
const KEY_HEADER: &str = "APCA-API-KEY-ID";

/// Header carrying the API secret.
const SECRET_HEADER: &str = "APCA-API-SECRET-KEY";

/// Default delay reported when a 429 carries no `Retry-After`.
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Which Alpaca API a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Api {
    /// Trading API (account, orders, positions, watchlists, calendar).
    Trading,
    /// Market data API (bars, quotes, trades, snapshots).
    Data,
}

/// Error body returned by Alpaca.
#[derive(Debug, Deserialize)]
struct AlpacaErrorResponse {
    code: Option<Value>,
    message: String,
}

/// HTTP client for the Alpaca REST APIs.
///
/// Requests are sent once; failures are categorized by status and returned.
#[derive(Debug, Clone)]
pub struct AlpacaHttpClient {
    client: Client,
    api_key: String,
    api_secret: String,
    trading_base_url: Url,
    data_base_url: Url,
}

impl AlpacaHttpClient {
    /// Create a new HTTP client from config.
    pub fn new(config: &AlpacaConfig) -> Result<Self, AlpacaError> {
        if config.credentials.is_incomplete() {
            return Err(AlpacaError::AuthenticationFailed);
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("alpaca-mcp-server/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AlpacaError::Network(e.to_string()))?;

        Ok(Self {
            client,
            api_key: config.credentials.api_key().to_string(),
            api_secret: config.credentials.api_secret().to_string(),
            trading_base_url: parse_base_url(config.trading_base_url())?,
            data_base_url: parse_base_url(config.data_base_url())?,
        })
    }

    /// Make a GET request.
    pub async fn get(
        &self,
        api: Api,
        segments: &[&str],
        query: Query,
    ) -> Result<Value, AlpacaError> {
        self.request(Method::GET, api, segments, query, None).await
    }

    /// Make a POST request to the trading API.
    pub async fn post(&self, segments: &[&str], body: Value) -> Result<Value, AlpacaError> {
        self.request(Method::POST, Api::Trading, segments, Query::new(), Some(body))
            .await
    }

    /// Make a PUT request to the trading API.
    pub async fn put(&self, segments: &[&str], body: Value) -> Result<Value, AlpacaError> {
        self.request(Method::PUT, Api::Trading, segments, Query::new(), Some(body))
            .await
    }

    /// Make a DELETE request to the trading API.
    pub async fn delete(&self, segments: &[&str], query: Query) -> Result<Value, AlpacaError> {
        self.request(Method::DELETE, Api::Trading, segments, query, None)
            .await
    }

    /// Build the full URL for a request. Segments are percent-encoded.
    pub fn url(&self, api: Api, segments: &[&str]) -> Result<Url, AlpacaError> {
        let mut url = match api {
            Api::Trading => self.trading_base_url.clone(),
            Api::Data => self.data_base_url.clone(),
        };
        url.path_segments_mut()
            .map_err(|()| AlpacaError::InvalidUrl("base URL cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn request(
        &self,
        method: Method,
        api: Api,
        segments: &[&str],
        query: Query,
        body: Option<Value>,
    ) -> Result<Value, AlpacaError> {
        let url = self.url(api, segments)?;
        let path = url.path().to_string();

        tracing::debug!(method = %method, path = %path, "Alpaca request");

        let mut request = self
            .client
            .request(method.clone(), url)
            .header(KEY_HEADER, &self.api_key)
            .header(SECRET_HEADER, &self.api_secret);
        if !query.is_empty() {
            request = request.query(query.pairs());
        }
        if let Some(body) = body.filter(|b| !b.is_null()) {
            request = request.json(&body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AlpacaError::Network(e.to_string()))?;

        let status = response.status();

        if status.is_success() {
            let text = response
                .text()
                .await
                .map_err(|e| AlpacaError::Network(e.to_string()))?;
            if text.trim().is_empty() {
                return Ok(Value::Null);
            }
            return serde_json::from_str(&text).map_err(|e| AlpacaError::JsonParse(e.to_string()));
        }

        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        let error_body = response.text().await.unwrap_or_default();
        let err = error_for_status(status, &path, &error_body, retry_after);

        tracing::warn!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            error = %err,
            "Alpaca request failed"
        );
        Err(err)
    }
}

fn parse_base_url(raw: &str) -> Result<Url, AlpacaError> {
    let url = Url::parse(raw).map_err(|e| AlpacaError::InvalidUrl(format!("{raw}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(AlpacaError::InvalidUrl(raw.to_string()));
    }
    Ok(url)
}

/// Categorize a non-success response.
fn error_for_status(
    status: StatusCode,
    path: &str,
    body: &str,
    retry_after: Option<u64>,
) -> AlpacaError {
    let (code, message) = match serde_json::from_str::<AlpacaErrorResponse>(body) {
        Ok(err) => (
            err.code.map_or_else(
                || status.as_u16().to_string(),
                |c| match c {
                    Value::String(s) => s,
                    other => other.to_string(),
                },
            ),
            err.message,
        ),
        Err(_) => (status.as_u16().to_string(), body.to_string()),
    };

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AlpacaError::AuthenticationFailed,
        StatusCode::NOT_FOUND => AlpacaError::NotFound {
            path: path.to_string(),
        },
        StatusCode::UNPROCESSABLE_ENTITY => AlpacaError::Rejected(message),
        StatusCode::TOO_MANY_REQUESTS => AlpacaError::RateLimited {
            retry_after_secs: retry_after.unwrap_or(DEFAULT_RETRY_AFTER_SECS),
        },
        _ => AlpacaError::Api { code, message },
    }
}

#[cfg(test)]
mod tests {
    use super::super::config::{AlpacaEnvironment, Credentials};
    use super::*;

    fn client() -> AlpacaHttpClient {
        let config = AlpacaConfig::new(
            Credentials::new("key".to_string(), "secret".to_string()),
            AlpacaEnvironment::Paper,
        );
        AlpacaHttpClient::new(&config).unwrap()
    }

    #[test]
    fn rejects_missing_credentials() {
        let config = AlpacaConfig::new(
            Credentials::new(String::new(), "secret".to_string()),
            AlpacaEnvironment::Paper,
        );
        assert_eq!(
            AlpacaHttpClient::new(&config).unwrap_err(),
            AlpacaError::AuthenticationFailed
        );
    }

    #[test]
    fn rejects_invalid_base_url() {
        let config = AlpacaConfig::new(
            Credentials::new("key".to_string(), "secret".to_string()),
            AlpacaEnvironment::Paper,
        )
        .with_base_urls("not a url", "https://data.alpaca.markets");
        assert!(matches!(
            AlpacaHttpClient::new(&config),
            Err(AlpacaError::InvalidUrl(_))
        ));
    }

    #[test]
    fn url_joins_segments() {
        let url = client()
            .url(Api::Trading, &["v2", "positions", "AAPL"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://paper-api.alpaca.markets/v2/positions/AAPL"
        );
    }

    #[test]
    fn url_encodes_slashes_in_segments() {
        let url = client()
            .url(Api::Data, &["v2", "assets", "BTC/USD"])
            .unwrap();
        assert_eq!(url.path(), "/v2/assets/BTC%2FUSD");
    }

    #[test]
    fn status_mapping() {
        assert_eq!(
            error_for_status(StatusCode::FORBIDDEN, "/v2/account", "", None),
            AlpacaError::AuthenticationFailed
        );
        assert_eq!(
            error_for_status(StatusCode::NOT_FOUND, "/v2/orders/x", "", None),
            AlpacaError::NotFound {
                path: "/v2/orders/x".to_string()
            }
        );
        assert_eq!(
            error_for_status(StatusCode::TOO_MANY_REQUESTS, "/", "", Some(3)),
            AlpacaError::RateLimited {
                retry_after_secs: 3
            }
        );
        assert_eq!(
            error_for_status(StatusCode::TOO_MANY_REQUESTS, "/", "", None),
            AlpacaError::RateLimited {
                retry_after_secs: DEFAULT_RETRY_AFTER_SECS
            }
        );
    }

    #[test]
    fn rejection_uses_api_message() {
        let body = r#"{"code":40310000,"message":"insufficient buying power"}"#;
        assert_eq!(
            error_for_status(StatusCode::UNPROCESSABLE_ENTITY, "/v2/orders", body, None),
            AlpacaError::Rejected("insufficient buying power".to_string())
        );
    }

    #[test]
    fn api_error_parses_numeric_code() {
        let body = r#"{"code":40010001,"message":"invalid symbol"}"#;
        assert_eq!(
            error_for_status(StatusCode::BAD_REQUEST, "/v2/orders", body, None),
            AlpacaError::Api {
                code: "40010001".to_string(),
                message: "invalid symbol".to_string()
            }
        );
    }

    #[test]
    fn api_error_falls_back_to_raw_body() {
        assert_eq!(
            error_for_status(StatusCode::BAD_GATEWAY, "/", "upstream down", None),
            AlpacaError::Api {
                code: "502".to_string(),
                message: "upstream down".to_string()
            }
        );
    }
}
