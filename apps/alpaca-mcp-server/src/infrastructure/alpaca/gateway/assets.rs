//! Asset and corporate action handlers.

use rmcp::schemars::{self, JsonSchema};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{SharedClient, SymbolParams, validate};
use crate::infrastructure::alpaca::{AlpacaError, Api, Query};

/// Maximum page size accepted by the corporate actions endpoint.
const MAX_CORPORATE_ACTIONS_LIMIT: u32 = 1000;

/// Asset tradability status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AssetStatus {
    /// Currently tradable.
    Active,
    /// Delisted or otherwise inactive.
    Inactive,
}

impl AssetStatus {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

/// Asset class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AssetClass {
    /// US equities.
    UsEquity,
    /// US listed options.
    UsOption,
    /// Crypto pairs.
    Crypto,
}

impl AssetClass {
    const fn as_str(self) -> &'static str {
        match self {
            Self::UsEquity => "us_equity",
            Self::UsOption => "us_option",
            Self::Crypto => "crypto",
        }
    }
}

/// Arguments for `get_all_assets`.
#[derive(Debug, Default, Clone, Deserialize, JsonSchema)]
pub struct AllAssetsParams {
    /// Filter by status.
    pub status: Option<AssetStatus>,
    /// Filter by asset class.
    pub asset_class: Option<AssetClass>,
    /// Filter by exchange, e.g. `NASDAQ`, `NYSE`.
    pub exchange: Option<String>,
    /// Filter by attributes, e.g. `ptp_no_exception`, `options_enabled`.
    #[serde(default)]
    pub attributes: Vec<String>,
}

/// Arguments for `get_corporate_actions`.
#[derive(Debug, Default, Clone, Deserialize, JsonSchema)]
pub struct CorporateActionsParams {
    /// Restrict to these symbols.
    #[serde(default)]
    pub symbols: Vec<String>,
    /// Action types, e.g. `cash_dividend`, `forward_split`, `reverse_split`.
    #[serde(default)]
    pub types: Vec<String>,
    /// Inclusive start date (YYYY-MM-DD).
    pub start: Option<String>,
    /// Inclusive end date (YYYY-MM-DD).
    pub end: Option<String>,
    /// Maximum number of actions (1-1000).
    pub limit: Option<u32>,
    /// Sort order by date: `asc` or `desc`.
    pub sort: Option<SortOrder>,
}

/// Chronological sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Oldest first.
    Asc,
    /// Newest first.
    Desc,
}

impl SortOrder {
    /// Wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// `GET /v2/assets/{symbol}`
pub async fn get_asset(client: SharedClient, params: SymbolParams) -> Result<Value, AlpacaError> {
    let symbol = validate::symbol(&params.symbol)?;
    client
        .get(Api::Trading, &["v2", "assets", &symbol], Query::new())
        .await
}

/// `GET /v2/assets`
pub async fn get_all_assets(
    client: SharedClient,
    params: AllAssetsParams,
) -> Result<Value, AlpacaError> {
    let query = all_assets_query(&params)?;
    client.get(Api::Trading, &["v2", "assets"], query).await
}

/// `GET /v1/corporate-actions` (market data API)
pub async fn get_corporate_actions(
    client: SharedClient,
    params: CorporateActionsParams,
) -> Result<Value, AlpacaError> {
    let query = corporate_actions_query(&params)?;
    client
        .get(Api::Data, &["v1", "corporate-actions"], query)
        .await
}

fn all_assets_query(params: &AllAssetsParams) -> Result<Query, AlpacaError> {
    let exchange = params
        .exchange
        .as_deref()
        .map(|e| validate::non_empty("exchange", e).map(|e| e.to_uppercase()))
        .transpose()?;

    Ok(Query::new()
        .push_opt("status", params.status.map(AssetStatus::as_str))
        .push_opt("asset_class", params.asset_class.map(AssetClass::as_str))
        .push_opt("exchange", exchange)
        .push_list("attributes", &params.attributes))
}

fn corporate_actions_query(params: &CorporateActionsParams) -> Result<Query, AlpacaError> {
    let symbols = if params.symbols.is_empty() {
        Vec::new()
    } else {
        validate::symbols(&params.symbols)?
    };
    let start = validate::date_opt("start", params.start.as_deref())?;
    let end = validate::date_opt("end", params.end.as_deref())?;
    if let (Some(start), Some(end)) = (&start, &end) {
        validate::date_range(start, end)?;
    }
    if let Some(limit) = params.limit
        && !(1..=MAX_CORPORATE_ACTIONS_LIMIT).contains(&limit)
    {
        return Err(AlpacaError::invalid(format!(
            "limit must be between 1 and {MAX_CORPORATE_ACTIONS_LIMIT}, got {limit}"
        )));
    }

    Ok(Query::new()
        .push_list("symbols", &symbols)
        .push_list("types", &params.types)
        .push_opt("start", start)
        .push_opt("end", end)
        .push_opt("limit", params.limit)
        .push_opt("sort", params.sort.map(SortOrder::as_str)))
}
