//! Account handlers.

use rmcp::schemars::{self, JsonSchema};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{NoParams, SharedClient, validate};
use crate::infrastructure::alpaca::{AlpacaError, Api, Query};

/// How intraday portfolio history is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum IntradayReporting {
    /// Regular market hours only.
    MarketHours,
    /// Include pre- and post-market.
    ExtendedHours,
    /// Around-the-clock reporting.
    Continuous,
}

impl IntradayReporting {
    const fn as_str(self) -> &'static str {
        match self {
            Self::MarketHours => "market_hours",
            Self::ExtendedHours => "extended_hours",
            Self::Continuous => "continuous",
        }
    }
}

/// Profit/loss reset behaviour for intraday history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PnlReset {
    /// Reset P/L at each trading day.
    PerDay,
    /// Carry P/L across days.
    NoReset,
}

impl PnlReset {
    const fn as_str(self) -> &'static str {
        match self {
            Self::PerDay => "per_day",
            Self::NoReset => "no_reset",
        }
    }
}

/// Arguments for `get_portfolio_history`.
#[derive(Debug, Default, Clone, Deserialize, JsonSchema)]
pub struct PortfolioHistoryParams {
    /// Duration of the history, e.g. `1D`, `1W`, `1M`, `3M`, `1A`.
    pub period: Option<String>,
    /// Resolution of each data point: `1Min`, `5Min`, `15Min`, `1H` or `1D`.
    pub timeframe: Option<String>,
    /// Start timestamp (RFC 3339).
    pub start: Option<String>,
    /// End timestamp (RFC 3339).
    pub end: Option<String>,
    /// Intraday reporting mode.
    pub intraday_reporting: Option<IntradayReporting>,
    /// P/L reset mode.
    pub pnl_reset: Option<PnlReset>,
    /// Include extended-hours data (intraday timeframes only).
    pub extended_hours: Option<bool>,
}

/// `GET /v2/account`
pub async fn get_account_info(client: SharedClient, _: NoParams) -> Result<Value, AlpacaError> {
    client.get(Api::Trading, &["v2", "account"], Query::new()).await
}

/// `GET /v2/account/portfolio/history`
pub async fn get_portfolio_history(
    client: SharedClient,
    params: PortfolioHistoryParams,
) -> Result<Value, AlpacaError> {
    let query = portfolio_history_query(&params)?;
    client
        .get(Api::Trading, &["v2", "account", "portfolio", "history"], query)
        .await
}

fn portfolio_history_query(params: &PortfolioHistoryParams) -> Result<Query, AlpacaError> {
    let non_empty = |field: &str, v: &Option<String>| {
        v.as_deref().map(|s| validate::non_empty(field, s)).transpose()
    };

    Ok(Query::new()
        .push_opt("period", non_empty("period", &params.period)?)
        .push_opt("timeframe", non_empty("timeframe", &params.timeframe)?)
        .push_opt("start", non_empty("start", &params.start)?)
        .push_opt("end", non_empty("end", &params.end)?)
        .push_opt(
            "intraday_reporting",
            params.intraday_reporting.map(IntradayReporting::as_str),
        )
        .push_opt("pnl_reset", params.pnl_reset.map(PnlReset::as_str))
        .push_opt("extended_hours", params.extended_hours))
}
