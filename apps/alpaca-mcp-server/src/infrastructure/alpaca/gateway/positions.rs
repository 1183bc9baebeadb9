//! Position handlers.

use rmcp::schemars::{self, JsonSchema};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use super::{NoParams, SharedClient, SymbolParams, validate};
use crate::infrastructure::alpaca::{AlpacaError, Api, Query};

/// Arguments for `close_position`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ClosePositionParams {
    /// Symbol (or option contract) of the position to close.
    pub symbol: String,
    /// Number of shares/contracts to liquidate. Mutually exclusive with `percentage`.
    #[schemars(with = "Option<f64>")]
    pub qty: Option<Decimal>,
    /// Percentage of the position to liquidate, in (0, 100]. Mutually exclusive with `qty`.
    #[schemars(with = "Option<f64>")]
    pub percentage: Option<Decimal>,
}

/// Arguments for `close_all_positions`.
#[derive(Debug, Default, Clone, Deserialize, JsonSchema)]
pub struct CloseAllPositionsParams {
    /// Cancel all open orders before liquidating.
    pub cancel_orders: Option<bool>,
}

/// Arguments for `exercise_options_position`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ExerciseParams {
    /// Option contract symbol or contract id.
    pub symbol_or_contract_id: String,
}

/// `GET /v2/positions`
pub async fn get_all_positions(client: SharedClient, _: NoParams) -> Result<Value, AlpacaError> {
    client.get(Api::Trading, &["v2", "positions"], Query::new()).await
}

/// `GET /v2/positions/{symbol}`
pub async fn get_open_position(
    client: SharedClient,
    params: SymbolParams,
) -> Result<Value, AlpacaError> {
    let symbol = validate::symbol(&params.symbol)?;
    client
        .get(Api::Trading, &["v2", "positions", &symbol], Query::new())
        .await
}

/// `DELETE /v2/positions/{symbol}`
pub async fn close_position(
    client: SharedClient,
    params: ClosePositionParams,
) -> Result<Value, AlpacaError> {
    let symbol = validate::symbol(&params.symbol)?;
    let query = close_position_query(&params)?;
    client.delete(&["v2", "positions", &symbol], query).await
}

/// `DELETE /v2/positions`
pub async fn close_all_positions(
    client: SharedClient,
    params: CloseAllPositionsParams,
) -> Result<Value, AlpacaError> {
    let query = Query::new().push_opt("cancel_orders", params.cancel_orders);
    client.delete(&["v2", "positions"], query).await
}

/// `POST /v2/positions/{symbol_or_contract_id}/exercise`
pub async fn exercise_options_position(
    client: SharedClient,
    params: ExerciseParams,
) -> Result<Value, AlpacaError> {
    let contract = validate::non_empty("symbol_or_contract_id", &params.symbol_or_contract_id)?;
    client
        .post(&["v2", "positions", &contract, "exercise"], Value::Null)
        .await
}

fn close_position_query(params: &ClosePositionParams) -> Result<Query, AlpacaError> {
    match (params.qty, params.percentage) {
        (Some(_), Some(_)) => Err(AlpacaError::invalid(
            "qty and percentage are mutually exclusive",
        )),
        (Some(qty), None) => Ok(Query::new().push("qty", validate::positive("qty", qty)?)),
        (None, Some(pct)) => {
            let pct = validate::positive("percentage", pct)?;
            if pct > Decimal::ONE_HUNDRED {
                return Err(AlpacaError::invalid(format!(
                    "percentage must be at most 100, got {pct}"
                )));
            }
            Ok(Query::new().push("percentage", pct))
        }
        (None, None) => Ok(Query::new()),
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn params(qty: Option<Decimal>, percentage: Option<Decimal>) -> ClosePositionParams {
        ClosePositionParams {
            symbol: "AAPL".to_string(),
            qty,
            percentage,
        }
    }

    #[test]
    fn close_whole_position_has_no_query() {
        assert!(close_position_query(&params(None, None)).unwrap().is_empty());
    }

    #[test]
    fn close_by_qty() {
        let query = close_position_query(&params(Some(dec!(10)), None)).unwrap();
        assert_eq!(query.get("qty"), Some("10"));
    }

    #[test]
    fn close_by_percentage() {
        let query = close_position_query(&params(None, Some(dec!(50)))).unwrap();
        assert_eq!(query.get("percentage"), Some("50"));
    }

    #[test]
    fn qty_and_percentage_conflict() {
        assert!(close_position_query(&params(Some(dec!(1)), Some(dec!(1)))).is_err());
    }

    #[test]
    fn percentage_bounds() {
        assert!(close_position_query(&params(None, Some(dec!(100)))).is_ok());
        assert!(close_position_query(&params(None, Some(dec!(100.5)))).is_err());
        assert!(close_position_query(&params(None, Some(Decimal::ZERO))).is_err());
    }
}
