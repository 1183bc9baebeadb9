//! Watchlist handlers.

use rmcp::schemars::{self, JsonSchema};
use serde::Deserialize;
use serde_json::{Map, Value, json};

use super::{NoParams, SharedClient, validate};
use crate::infrastructure::alpaca::{AlpacaError, Api, Query};

/// Arguments for `create_watchlist`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateWatchlistParams {
    /// Watchlist name.
    pub name: String,
    /// Symbols to include.
    #[serde(default)]
    pub symbols: Vec<String>,
}

/// Arguments for `update_watchlist_by_id`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateWatchlistParams {
    /// Watchlist id.
    pub watchlist_id: String,
    /// New name.
    pub name: Option<String>,
    /// Replacement symbol list.
    pub symbols: Option<Vec<String>>,
}

/// Arguments for tools addressing a watchlist by id.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct WatchlistIdParams {
    /// Watchlist id.
    pub watchlist_id: String,
}

/// Arguments for adding or removing a watchlist symbol.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct WatchlistSymbolParams {
    /// Watchlist id.
    pub watchlist_id: String,
    /// Symbol to add or remove.
    pub symbol: String,
}

/// `POST /v2/watchlists`
pub async fn create_watchlist(
    client: SharedClient,
    params: CreateWatchlistParams,
) -> Result<Value, AlpacaError> {
    let body = create_body(&params)?;
    client.post(&["v2", "watchlists"], body).await
}

/// `GET /v2/watchlists`
pub async fn get_watchlists(client: SharedClient, _: NoParams) -> Result<Value, AlpacaError> {
    client.get(Api::Trading, &["v2", "watchlists"], Query::new()).await
}

/// `PUT /v2/watchlists/{id}`
pub async fn update_watchlist_by_id(
    client: SharedClient,
    params: UpdateWatchlistParams,
) -> Result<Value, AlpacaError> {
    let id = validate::non_empty("watchlist_id", &params.watchlist_id)?;
    let body = update_body(&params)?;
    client.put(&["v2", "watchlists", &id], body).await
}

/// `GET /v2/watchlists/{id}`
pub async fn get_watchlist_by_id(
    client: SharedClient,
    params: WatchlistIdParams,
) -> Result<Value, AlpacaError> {
    let id = validate::non_empty("watchlist_id", &params.watchlist_id)?;
    client
        .get(Api::Trading, &["v2", "watchlists", &id], Query::new())
        .await
}

/// `POST /v2/watchlists/{id}`
pub async fn add_asset_to_watchlist_by_id(
    client: SharedClient,
    params: WatchlistSymbolParams,
) -> Result<Value, AlpacaError> {
    let id = validate::non_empty("watchlist_id", &params.watchlist_id)?;
    let symbol = validate::symbol(&params.symbol)?;
    client
        .post(&["v2", "watchlists", &id], json!({ "symbol": symbol }))
        .await
}

/// `DELETE /v2/watchlists/{id}/{symbol}`
pub async fn remove_asset_from_watchlist_by_id(
    client: SharedClient,
    params: WatchlistSymbolParams,
) -> Result<Value, AlpacaError> {
    let id = validate::non_empty("watchlist_id", &params.watchlist_id)?;
    let symbol = validate::symbol(&params.symbol)?;
    client
        .delete(&["v2", "watchlists", &id, &symbol], Query::new())
        .await
}

/// `DELETE /v2/watchlists/{id}`
pub async fn delete_watchlist_by_id(
    client: SharedClient,
    params: WatchlistIdParams,
) -> Result<Value, AlpacaError> {
    let id = validate::non_empty("watchlist_id", &params.watchlist_id)?;
    client.delete(&["v2", "watchlists", &id], Query::new()).await
}

fn create_body(params: &CreateWatchlistParams) -> Result<Value, AlpacaError> {
    let name = validate::non_empty("name", &params.name)?;
    let symbols = params
        .symbols
        .iter()
        .map(|s| validate::symbol(s))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(json!({ "name": name, "symbols": symbols }))
}

fn update_body(params: &UpdateWatchlistParams) -> Result<Value, AlpacaError> {
    if params.name.is_none() && params.symbols.is_none() {
        return Err(AlpacaError::invalid(
            "provide a new name, a symbol list, or both",
        ));
    }

    let mut body = Map::new();
    if let Some(name) = &params.name {
        body.insert("name".to_string(), json!(validate::non_empty("name", name)?));
    }
    if let Some(symbols) = &params.symbols {
        let symbols = symbols
            .iter()
            .map(|s| validate::symbol(s))
            .collect::<Result<Vec<_>, _>>()?;
        body.insert("symbols".to_string(), json!(symbols));
    }
    Ok(Value::Object(body))
}
