//! Stock market data handlers.
//!
//! Historical endpoints accept either an explicit `start` or a `days`
//! lookback; bars default to the last five days of daily bars.

use chrono::Utc;
use rmcp::schemars::{self, JsonSchema};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::assets::SortOrder;
use super::{SharedClient, validate};
use crate::infrastructure::alpaca::{AlpacaError, Api, Query};

/// Default bar timeframe.
const DEFAULT_TIMEFRAME: &str = "1Day";

/// Default bar lookback when neither `start` nor `days` is given.
const DEFAULT_BAR_DAYS: u32 = 5;

/// Longest `days` lookback accepted for historical data.
pub(super) const MAX_LOOKBACK_DAYS: u32 = 36_500;

/// Largest page Alpaca returns for historical data.
pub(super) const MAX_HISTORICAL_LIMIT: u32 = 10_000;

/// Stock data feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum StockFeed {
    /// Consolidated tape (subscription required).
    Sip,
    /// IEX only.
    Iex,
    /// Delayed SIP.
    DelayedSip,
}

impl StockFeed {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Sip => "sip",
            Self::Iex => "iex",
            Self::DelayedSip => "delayed_sip",
        }
    }
}

/// Corporate action adjustment for bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Adjustment {
    /// No adjustment.
    Raw,
    /// Split adjusted.
    Split,
    /// Dividend adjusted.
    Dividend,
    /// Split and dividend adjusted.
    All,
}

impl Adjustment {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::Split => "split",
            Self::Dividend => "dividend",
            Self::All => "all",
        }
    }
}

/// Arguments for `get_stock_bars`.
#[derive(Debug, Default, Clone, Deserialize, JsonSchema)]
pub struct StockBarsParams {
    /// Symbols to fetch.
    pub symbols: Vec<String>,
    /// Bar timeframe, e.g. `1Min`, `15Min`, `1Hour`, `1Day` (default `1Day`).
    pub timeframe: Option<String>,
    /// RFC 3339 or `YYYY-MM-DD` start. Overrides `days`.
    pub start: Option<String>,
    /// RFC 3339 or `YYYY-MM-DD` end.
    pub end: Option<String>,
    /// Lookback in days when `start` is omitted (default 5).
    pub days: Option<u32>,
    /// Maximum number of bars (1-10000).
    pub limit: Option<u32>,
    /// Corporate action adjustment.
    pub adjustment: Option<Adjustment>,
    /// Data feed.
    pub feed: Option<StockFeed>,
    /// Sort by timestamp.
    pub sort: Option<SortOrder>,
}

/// Arguments for `get_stock_quotes` and `get_stock_trades`.
#[derive(Debug, Default, Clone, Deserialize, JsonSchema)]
pub struct StockTicksParams {
    /// Symbols to fetch.
    pub symbols: Vec<String>,
    /// RFC 3339 or `YYYY-MM-DD` start. Overrides `days`.
    pub start: Option<String>,
    /// RFC 3339 or `YYYY-MM-DD` end.
    pub end: Option<String>,
    /// Lookback in days when `start` is omitted.
    pub days: Option<u32>,
    /// Maximum number of records (1-10000).
    pub limit: Option<u32>,
    /// Data feed.
    pub feed: Option<StockFeed>,
    /// Sort by timestamp.
    pub sort: Option<SortOrder>,
}

/// Arguments for latest-value and snapshot tools.
#[derive(Debug, Default, Clone, Deserialize, JsonSchema)]
pub struct StockLatestParams {
    /// Symbols to fetch.
    pub symbols: Vec<String>,
    /// Data feed.
    pub feed: Option<StockFeed>,
}

/// `GET /v2/stocks/bars`
pub async fn get_stock_bars(
    client: SharedClient,
    params: StockBarsParams,
) -> Result<Value, AlpacaError> {
    let query = bars_query(&params)?;
    client.get(Api::Data, &["v2", "stocks", "bars"], query).await
}

/// `GET /v2/stocks/quotes`
pub async fn get_stock_quotes(
    client: SharedClient,
    params: StockTicksParams,
) -> Result<Value, AlpacaError> {
    let query = ticks_query(&params)?;
    client.get(Api::Data, &["v2", "stocks", "quotes"], query).await
}

/// `GET /v2/stocks/trades`
pub async fn get_stock_trades(
    client: SharedClient,
    params: StockTicksParams,
) -> Result<Value, AlpacaError> {
    let query = ticks_query(&params)?;
    client.get(Api::Data, &["v2", "stocks", "trades"], query).await
}

/// `GET /v2/stocks/bars/latest`
pub async fn get_stock_latest_bar(
    client: SharedClient,
    params: StockLatestParams,
) -> Result<Value, AlpacaError> {
    let query = latest_query(&params)?;
    client
        .get(Api::Data, &["v2", "stocks", "bars", "latest"], query)
        .await
}

/// `GET /v2/stocks/quotes/latest`
pub async fn get_stock_latest_quote(
    client: SharedClient,
    params: StockLatestParams,
) -> Result<Value, AlpacaError> {
    let query = latest_query(&params)?;
    client
        .get(Api::Data, &["v2", "stocks", "quotes", "latest"], query)
        .await
}

/// `GET /v2/stocks/trades/latest`
pub async fn get_stock_latest_trade(
    client: SharedClient,
    params: StockLatestParams,
) -> Result<Value, AlpacaError> {
    let query = latest_query(&params)?;
    client
        .get(Api::Data, &["v2", "stocks", "trades", "latest"], query)
        .await
}

/// `GET /v2/stocks/snapshots`
pub async fn get_stock_snapshot(
    client: SharedClient,
    params: StockLatestParams,
) -> Result<Value, AlpacaError> {
    let query = latest_query(&params)?;
    client
        .get(Api::Data, &["v2", "stocks", "snapshots"], query)
        .await
}

fn bars_query(params: &StockBarsParams) -> Result<Query, AlpacaError> {
    let symbols = validate::symbols(&params.symbols)?;
    let timeframe = validate::timeframe(params.timeframe.as_deref().unwrap_or(DEFAULT_TIMEFRAME))?;
    let start = window_start(
        params.start.as_deref(),
        Some(params.days.unwrap_or(DEFAULT_BAR_DAYS)),
    )?;
    check_limit(params.limit)?;

    Ok(Query::new()
        .push("symbols", symbols.join(","))
        .push("timeframe", timeframe)
        .push_opt("start", start)
        .push_opt("end", params.end.as_deref())
        .push_opt("limit", params.limit)
        .push_opt("adjustment", params.adjustment.map(Adjustment::as_str))
        .push_opt("feed", params.feed.map(StockFeed::as_str))
        .push_opt("sort", params.sort.map(SortOrder::as_str)))
}

fn ticks_query(params: &StockTicksParams) -> Result<Query, AlpacaError> {
    let symbols = validate::symbols(&params.symbols)?;
    let start = window_start(params.start.as_deref(), params.days)?;
    check_limit(params.limit)?;

    Ok(Query::new()
        .push("symbols", symbols.join(","))
        .push_opt("start", start)
        .push_opt("end", params.end.as_deref())
        .push_opt("limit", params.limit)
        .push_opt("feed", params.feed.map(StockFeed::as_str))
        .push_opt("sort", params.sort.map(SortOrder::as_str)))
}

fn latest_query(params: &StockLatestParams) -> Result<Query, AlpacaError> {
    let symbols = validate::symbols(&params.symbols)?;
    Ok(Query::new()
        .push("symbols", symbols.join(","))
        .push_opt("feed", params.feed.map(StockFeed::as_str)))
}

/// Resolve the window start: an explicit `start` wins over a `days` lookback.
pub(super) fn window_start(
    start: Option<&str>,
    days: Option<u32>,
) -> Result<Option<String>, AlpacaError> {
    if let Some(start) = start {
        return validate::non_empty("start", start).map(Some);
    }
    match days {
        Some(days) if !(1..=MAX_LOOKBACK_DAYS).contains(&days) => Err(AlpacaError::invalid(
            format!("days must be between 1 and {MAX_LOOKBACK_DAYS}, got {days}"),
        )),
        Some(days) => validate::lookback_start(Utc::now(), days).map(Some),
        None => Ok(None),
    }
}

pub(super) fn check_limit(limit: Option<u32>) -> Result<(), AlpacaError> {
    match limit {
        Some(limit) if !(1..=MAX_HISTORICAL_LIMIT).contains(&limit) => Err(AlpacaError::invalid(
            format!("limit must be between 1 and {MAX_HISTORICAL_LIMIT}, got {limit}"),
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbols(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn bars_defaults() {
        let params = StockBarsParams {
            symbols: symbols(&["aapl", "msft"]),
            ..Default::default()
        };
        let query = bars_query(&params).unwrap();
        assert_eq!(query.get("symbols"), Some("AAPL,MSFT"));
        assert_eq!(query.get("timeframe"), Some("1Day"));
        assert!(query.get("start").is_some_and(|s| s.ends_with('Z')));
        assert_eq!(query.get("feed"), None);
    }

    #[test]
    fn explicit_start_wins_over_days() {
        let params = StockBarsParams {
            symbols: symbols(&["SPY"]),
            start: Some("2024-01-02".to_string()),
            days: Some(30),
            ..Default::default()
        };
        let query = bars_query(&params).unwrap();
        assert_eq!(query.get("start"), Some("2024-01-02"));
    }

    #[test]
    fn bars_reject_bad_timeframe() {
        let params = StockBarsParams {
            symbols: symbols(&["SPY"]),
            timeframe: Some("90Min".to_string()),
            ..Default::default()
        };
        assert!(bars_query(&params).is_err());
    }

    #[test]
    fn ticks_without_window_send_no_start() {
        let params = StockTicksParams {
            symbols: symbols(&["SPY"]),
            feed: Some(StockFeed::Iex),
            ..Default::default()
        };
        let query = ticks_query(&params).unwrap();
        assert_eq!(query.get("start"), None);
        assert_eq!(query.get("feed"), Some("iex"));
    }

    #[test]
    fn empty_symbol_list_rejected() {
        assert!(latest_query(&StockLatestParams::default()).is_err());
    }

    #[test]
    fn limit_bounds() {
        assert!(check_limit(None).is_ok());
        assert!(check_limit(Some(10_000)).is_ok());
        assert!(check_limit(Some(0)).is_err());
        assert!(check_limit(Some(10_001)).is_err());
    }

    #[test]
    fn zero_day_lookback_rejected() {
        assert!(window_start(None, Some(0)).is_err());
    }

    #[test]
    fn oversized_lookback_rejected() {
        assert!(window_start(None, Some(MAX_LOOKBACK_DAYS)).unwrap().is_some());
        assert_eq!(
            window_start(None, Some(100_000_000)),
            Err(AlpacaError::invalid(format!(
                "days must be between 1 and {MAX_LOOKBACK_DAYS}, got 100000000"
            )))
        );
    }
}
