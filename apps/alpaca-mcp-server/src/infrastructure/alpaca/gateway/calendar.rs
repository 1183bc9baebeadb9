//! Market calendar and clock handlers.

use rmcp::schemars::{self, JsonSchema};
use serde::Deserialize;
use serde_json::Value;

use super::{NoParams, SharedClient, validate};
use crate::infrastructure::alpaca::{AlpacaError, Api, Query};

/// Arguments for `get_calendar`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CalendarParams {
    /// First date of the range (YYYY-MM-DD).
    pub start: String,
    /// Last date of the range (YYYY-MM-DD).
    pub end: String,
}

/// `GET /v2/calendar`
pub async fn get_calendar(
    client: SharedClient,
    params: CalendarParams,
) -> Result<Value, AlpacaError> {
    let (start, end) = validate::date_range(&params.start, &params.end)?;
    let query = Query::new().push("start", start).push("end", end);
    client.get(Api::Trading, &["v2", "calendar"], query).await
}

/// `GET /v2/clock`
pub async fn get_clock(client: SharedClient, _: NoParams) -> Result<Value, AlpacaError> {
    client.get(Api::Trading, &["v2", "clock"], Query::new()).await
}
