//! Crypto market data handlers (`v1beta3`).

use rmcp::schemars::{self, JsonSchema};
use serde::Deserialize;
use serde_json::Value;

use super::assets::SortOrder;
use super::stocks::{check_limit, window_start};
use super::{SharedClient, validate};
use crate::infrastructure::alpaca::{AlpacaError, Api, Query};

/// Default crypto market location.
const DEFAULT_LOCATION: &str = "us";

/// Default bar timeframe.
const DEFAULT_TIMEFRAME: &str = "1Hour";

/// Arguments for `get_crypto_bars`.
#[derive(Debug, Default, Clone, Deserialize, JsonSchema)]
pub struct CryptoBarsParams {
    /// Pairs to fetch, e.g. `BTC/USD`.
    pub symbols: Vec<String>,
    /// Bar timeframe (default `1Hour`).
    pub timeframe: Option<String>,
    /// RFC 3339 or `YYYY-MM-DD` start. Overrides `days`.
    pub start: Option<String>,
    /// RFC 3339 or `YYYY-MM-DD` end.
    pub end: Option<String>,
    /// Lookback in days when `start` is omitted.
    pub days: Option<u32>,
    /// Maximum number of bars (1-10000).
    pub limit: Option<u32>,
    /// Sort by timestamp.
    pub sort: Option<SortOrder>,
    /// Market location (default `us`).
    pub loc: Option<String>,
}

/// Arguments for `get_crypto_quotes` and `get_crypto_trades`.
#[derive(Debug, Default, Clone, Deserialize, JsonSchema)]
pub struct CryptoTicksParams {
    /// Pairs to fetch, e.g. `BTC/USD`.
    pub symbols: Vec<String>,
    /// RFC 3339 or `YYYY-MM-DD` start. Overrides `days`.
    pub start: Option<String>,
    /// RFC 3339 or `YYYY-MM-DD` end.
    pub end: Option<String>,
    /// Lookback in days when `start` is omitted.
    pub days: Option<u32>,
    /// Maximum number of records (1-10000).
    pub limit: Option<u32>,
    /// Sort by timestamp.
    pub sort: Option<SortOrder>,
    /// Market location (default `us`).
    pub loc: Option<String>,
}

/// Arguments for latest-value, snapshot and orderbook tools.
#[derive(Debug, Default, Clone, Deserialize, JsonSchema)]
pub struct CryptoLatestParams {
    /// Pairs to fetch, e.g. `BTC/USD`.
    pub symbols: Vec<String>,
    /// Market location (default `us`).
    pub loc: Option<String>,
}

/// `GET /v1beta3/crypto/{loc}/bars`
pub async fn get_crypto_bars(
    client: SharedClient,
    params: CryptoBarsParams,
) -> Result<Value, AlpacaError> {
    let loc = location(params.loc.as_deref())?;
    let query = bars_query(&params)?;
    client
        .get(Api::Data, &["v1beta3", "crypto", &loc, "bars"], query)
        .await
}

/// `GET /v1beta3/crypto/{loc}/quotes`
pub async fn get_crypto_quotes(
    client: SharedClient,
    params: CryptoTicksParams,
) -> Result<Value, AlpacaError> {
    let loc = location(params.loc.as_deref())?;
    let query = ticks_query(&params)?;
    client
        .get(Api::Data, &["v1beta3", "crypto", &loc, "quotes"], query)
        .await
}

/// `GET /v1beta3/crypto/{loc}/trades`
pub async fn get_crypto_trades(
    client: SharedClient,
    params: CryptoTicksParams,
) -> Result<Value, AlpacaError> {
    let loc = location(params.loc.as_deref())?;
    let query = ticks_query(&params)?;
    client
        .get(Api::Data, &["v1beta3", "crypto", &loc, "trades"], query)
        .await
}

/// `GET /v1beta3/crypto/{loc}/latest/bars`
pub async fn get_crypto_latest_bar(
    client: SharedClient,
    params: CryptoLatestParams,
) -> Result<Value, AlpacaError> {
    latest(&client, &params, &["latest", "bars"]).await
}

/// `GET /v1beta3/crypto/{loc}/latest/quotes`
pub async fn get_crypto_latest_quote(
    client: SharedClient,
    params: CryptoLatestParams,
) -> Result<Value, AlpacaError> {
    latest(&client, &params, &["latest", "quotes"]).await
}

/// `GET /v1beta3/crypto/{loc}/latest/trades`
pub async fn get_crypto_latest_trade(
    client: SharedClient,
    params: CryptoLatestParams,
) -> Result<Value, AlpacaError> {
    latest(&client, &params, &["latest", "trades"]).await
}

/// `GET /v1beta3/crypto/{loc}/snapshots`
pub async fn get_crypto_snapshot(
    client: SharedClient,
    params: CryptoLatestParams,
) -> Result<Value, AlpacaError> {
    latest(&client, &params, &["snapshots"]).await
}

/// `GET /v1beta3/crypto/{loc}/latest/orderbooks`
pub async fn get_crypto_latest_orderbook(
    client: SharedClient,
    params: CryptoLatestParams,
) -> Result<Value, AlpacaError> {
    latest(&client, &params, &["latest", "orderbooks"]).await
}

async fn latest(
    client: &SharedClient,
    params: &CryptoLatestParams,
    tail: &[&str],
) -> Result<Value, AlpacaError> {
    let loc = location(params.loc.as_deref())?;
    let symbols = pairs(&params.symbols)?;
    let mut segments = vec!["v1beta3", "crypto", loc.as_str()];
    segments.extend_from_slice(tail);
    client
        .get(Api::Data, &segments, Query::new().push("symbols", symbols))
        .await
}

fn bars_query(params: &CryptoBarsParams) -> Result<Query, AlpacaError> {
    let symbols = pairs(&params.symbols)?;
    let timeframe = validate::timeframe(params.timeframe.as_deref().unwrap_or(DEFAULT_TIMEFRAME))?;
    let start = window_start(params.start.as_deref(), params.days)?;
    check_limit(params.limit)?;

    Ok(Query::new()
        .push("symbols", symbols)
        .push("timeframe", timeframe)
        .push_opt("start", start)
        .push_opt("end", params.end.as_deref())
        .push_opt("limit", params.limit)
        .push_opt("sort", params.sort.map(SortOrder::as_str)))
}

fn ticks_query(params: &CryptoTicksParams) -> Result<Query, AlpacaError> {
    let symbols = pairs(&params.symbols)?;
    let start = window_start(params.start.as_deref(), params.days)?;
    check_limit(params.limit)?;

    Ok(Query::new()
        .push("symbols", symbols)
        .push_opt("start", start)
        .push_opt("end", params.end.as_deref())
        .push_opt("limit", params.limit)
        .push_opt("sort", params.sort.map(SortOrder::as_str)))
}

/// Upper-cased, comma-joined pair list.
fn pairs(raw: &[String]) -> Result<String, AlpacaError> {
    validate::symbols(raw).map(|s| s.join(","))
}

fn location(raw: Option<&str>) -> Result<String, AlpacaError> {
    raw.map_or_else(
        || Ok(DEFAULT_LOCATION.to_string()),
        |loc| validate::non_empty("loc", loc).map(|l| l.to_lowercase()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_defaults_to_us() {
        assert_eq!(location(None).unwrap(), "us");
        assert_eq!(location(Some("US")).unwrap(), "us");
        assert!(location(Some(" ")).is_err());
    }

    #[test]
    fn bars_query_defaults() {
        let params = CryptoBarsParams {
            symbols: vec!["btc/usd".to_string(), "ETH/USD".to_string()],
            ..Default::default()
        };
        let query = bars_query(&params).unwrap();
        assert_eq!(query.get("symbols"), Some("BTC/USD,ETH/USD"));
        assert_eq!(query.get("timeframe"), Some("1Hour"));
        assert_eq!(query.get("start"), None);
    }

    #[test]
    fn ticks_query_days_lookback() {
        let params = CryptoTicksParams {
            symbols: vec!["BTC/USD".to_string()],
            days: Some(2),
            limit: Some(100),
            ..Default::default()
        };
        let query = ticks_query(&params).unwrap();
        assert!(query.get("start").is_some());
        assert_eq!(query.get("limit"), Some("100"));
    }

    #[test]
    fn empty_pairs_rejected() {
        assert!(pairs(&[]).is_err());
    }
}
