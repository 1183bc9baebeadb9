//! Option contract and option market data handlers.

use rmcp::schemars::{self, JsonSchema};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{SharedClient, validate};
use crate::infrastructure::alpaca::{AlpacaError, Api, Query};

/// Largest page accepted by the contracts and chain endpoints.
const MAX_OPTION_LIMIT: u32 = 10_000;

/// Call or put.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ContractType {
    /// Call option.
    Call,
    /// Put option.
    Put,
}

impl ContractType {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Call => "call",
            Self::Put => "put",
        }
    }
}

/// Option data feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum OptionFeed {
    /// Consolidated OPRA feed (subscription required).
    Opra,
    /// Indicative (delayed, modified) feed.
    Indicative,
}

impl OptionFeed {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Opra => "opra",
            Self::Indicative => "indicative",
        }
    }
}

/// Contract status filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ContractStatus {
    /// Tradable contracts.
    Active,
    /// Expired or delisted contracts.
    Inactive,
}

impl ContractStatus {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

/// Arguments for `get_option_contracts`.
#[derive(Debug, Default, Clone, Deserialize, JsonSchema)]
pub struct OptionContractsParams {
    /// Underlying symbols, e.g. `["AAPL"]`.
    pub underlying_symbols: Vec<String>,
    /// Exact expiration date (YYYY-MM-DD).
    pub expiration_date: Option<String>,
    /// Earliest expiration date (YYYY-MM-DD).
    pub expiration_date_gte: Option<String>,
    /// Latest expiration date (YYYY-MM-DD).
    pub expiration_date_lte: Option<String>,
    /// Call or put.
    #[serde(alias = "type")]
    pub contract_type: Option<ContractType>,
    /// Minimum strike price.
    #[schemars(with = "Option<f64>")]
    pub strike_price_gte: Option<Decimal>,
    /// Maximum strike price.
    #[schemars(with = "Option<f64>")]
    pub strike_price_lte: Option<Decimal>,
    /// Contract status.
    pub status: Option<ContractStatus>,
    /// Maximum number of contracts (1-10000).
    pub limit: Option<u32>,
}

/// Arguments for `get_option_latest_quote` and `get_option_snapshot`.
#[derive(Debug, Default, Clone, Deserialize, JsonSchema)]
pub struct OptionSymbolsParams {
    /// OCC contract symbols, e.g. `AAPL250117C00200000`.
    pub symbols: Vec<String>,
    /// Data feed.
    pub feed: Option<OptionFeed>,
}

/// Arguments for `get_option_chain`.
#[derive(Debug, Default, Clone, Deserialize, JsonSchema)]
pub struct OptionChainParams {
    /// Underlying symbol, e.g. `AAPL`.
    pub underlying_symbol: String,
    /// Call or put.
    #[serde(alias = "type")]
    pub contract_type: Option<ContractType>,
    /// Minimum strike price.
    #[schemars(with = "Option<f64>")]
    pub strike_price_gte: Option<Decimal>,
    /// Maximum strike price.
    #[schemars(with = "Option<f64>")]
    pub strike_price_lte: Option<Decimal>,
    /// Exact expiration date (YYYY-MM-DD).
    pub expiration_date: Option<String>,
    /// Earliest expiration date (YYYY-MM-DD).
    pub expiration_date_gte: Option<String>,
    /// Latest expiration date (YYYY-MM-DD).
    pub expiration_date_lte: Option<String>,
    /// OCC root symbol filter.
    pub root_symbol: Option<String>,
    /// Data feed.
    pub feed: Option<OptionFeed>,
    /// Maximum number of snapshots (1-10000).
    pub limit: Option<u32>,
}

/// `GET /v2/options/contracts`
pub async fn get_option_contracts(
    client: SharedClient,
    params: OptionContractsParams,
) -> Result<Value, AlpacaError> {
    let query = contracts_query(&params)?;
    client
        .get(Api::Trading, &["v2", "options", "contracts"], query)
        .await
}

/// `GET /v1beta1/options/quotes/latest`
pub async fn get_option_latest_quote(
    client: SharedClient,
    params: OptionSymbolsParams,
) -> Result<Value, AlpacaError> {
    let query = symbols_query(&params)?;
    client
        .get(Api::Data, &["v1beta1", "options", "quotes", "latest"], query)
        .await
}

/// `GET /v1beta1/options/snapshots`
pub async fn get_option_snapshot(
    client: SharedClient,
    params: OptionSymbolsParams,
) -> Result<Value, AlpacaError> {
    let query = symbols_query(&params)?;
    client
        .get(Api::Data, &["v1beta1", "options", "snapshots"], query)
        .await
}

/// `GET /v1beta1/options/snapshots/{underlying}`
pub async fn get_option_chain(
    client: SharedClient,
    params: OptionChainParams,
) -> Result<Value, AlpacaError> {
    let underlying = validate::symbol(&params.underlying_symbol)?;
    let query = chain_query(&params)?;
    client
        .get(
            Api::Data,
            &["v1beta1", "options", "snapshots", &underlying],
            query,
        )
        .await
}

/// Validated expiration and strike filters shared by contracts and chains.
struct ContractFilters {
    expiration_date: Option<String>,
    expiration_date_gte: Option<String>,
    expiration_date_lte: Option<String>,
    strike_price_gte: Option<Decimal>,
    strike_price_lte: Option<Decimal>,
}

impl ContractFilters {
    fn validate(
        expiration_date: Option<&str>,
        expiration_date_gte: Option<&str>,
        expiration_date_lte: Option<&str>,
        strike_price_gte: Option<Decimal>,
        strike_price_lte: Option<Decimal>,
    ) -> Result<Self, AlpacaError> {
        let expiration_date = validate::date_opt("expiration_date", expiration_date)?;
        let gte = validate::date_opt("expiration_date_gte", expiration_date_gte)?;
        let lte = validate::date_opt("expiration_date_lte", expiration_date_lte)?;
        if let (Some(gte), Some(lte)) = (&gte, &lte) {
            validate::date_range(gte, lte)?;
        }
        let strike_gte = validate::positive_opt("strike_price_gte", strike_price_gte)?;
        let strike_lte = validate::positive_opt("strike_price_lte", strike_price_lte)?;
        if let (Some(low), Some(high)) = (strike_gte, strike_lte)
            && low > high
        {
            return Err(AlpacaError::invalid(format!(
                "strike_price_gte ({low}) must not exceed strike_price_lte ({high})"
            )));
        }
        Ok(Self {
            expiration_date,
            expiration_date_gte: gte,
            expiration_date_lte: lte,
            strike_price_gte: strike_gte,
            strike_price_lte: strike_lte,
        })
    }
}

fn contracts_query(params: &OptionContractsParams) -> Result<Query, AlpacaError> {
    let underlying = validate::symbols(&params.underlying_symbols)?;
    let filters = ContractFilters::validate(
        params.expiration_date.as_deref(),
        params.expiration_date_gte.as_deref(),
        params.expiration_date_lte.as_deref(),
        params.strike_price_gte,
        params.strike_price_lte,
    )?;
    check_limit(params.limit)?;

    Ok(Query::new()
        .push_list("underlying_symbols", &underlying)
        .push_opt("expiration_date", filters.expiration_date)
        .push_opt("expiration_date_gte", filters.expiration_date_gte)
        .push_opt("expiration_date_lte", filters.expiration_date_lte)
        .push_opt("type", params.contract_type.map(ContractType::as_str))
        .push_opt("strike_price_gte", filters.strike_price_gte)
        .push_opt("strike_price_lte", filters.strike_price_lte)
        .push_opt("status", params.status.map(ContractStatus::as_str))
        .push_opt("limit", params.limit))
}

fn symbols_query(params: &OptionSymbolsParams) -> Result<Query, AlpacaError> {
    let symbols = validate::identifiers("symbols", &params.symbols)?;
    Ok(Query::new()
        .push_list("symbols", &symbols)
        .push_opt("feed", params.feed.map(OptionFeed::as_str)))
}

fn chain_query(params: &OptionChainParams) -> Result<Query, AlpacaError> {
    let filters = ContractFilters::validate(
        params.expiration_date.as_deref(),
        params.expiration_date_gte.as_deref(),
        params.expiration_date_lte.as_deref(),
        params.strike_price_gte,
        params.strike_price_lte,
    )?;
    let root_symbol = params
        .root_symbol
        .as_deref()
        .map(validate::symbol)
        .transpose()?;
    check_limit(params.limit)?;

    Ok(Query::new()
        .push_opt("type", params.contract_type.map(ContractType::as_str))
        .push_opt("strike_price_gte", filters.strike_price_gte)
        .push_opt("strike_price_lte", filters.strike_price_lte)
        .push_opt("expiration_date", filters.expiration_date)
        .push_opt("expiration_date_gte", filters.expiration_date_gte)
        .push_opt("expiration_date_lte", filters.expiration_date_lte)
        .push_opt("root_symbol", root_symbol)
        .push_opt("feed", params.feed.map(OptionFeed::as_str))
        .push_opt("limit", params.limit))
}

fn check_limit(limit: Option<u32>) -> Result<(), AlpacaError> {
    match limit {
        Some(limit) if !(1..=MAX_OPTION_LIMIT).contains(&limit) => Err(AlpacaError::invalid(
            format!("limit must be between 1 and {MAX_OPTION_LIMIT}, got {limit}"),
        )),
        _ => Ok(()),
    }
}
