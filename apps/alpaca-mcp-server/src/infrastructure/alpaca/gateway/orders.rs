//! Order handlers.
//!
//! Stock, crypto and option placement share one request body. Each entry
//! point checks the combination of order type, quantities and prices that
//! Alpaca accepts for its asset class before anything is sent.

use rmcp::schemars::{self, JsonSchema};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::assets::SortOrder;
use super::{NoParams, SharedClient, validate};
use crate::infrastructure::alpaca::{AlpacaError, Api, Query};

/// Largest page accepted by `GET /v2/orders`.
const MAX_ORDERS_LIMIT: u32 = 500;

/// Most legs a multi-leg option order may carry.
const MAX_OPTION_LEGS: usize = 4;

// ============================================================================
// Wire Enums
// ============================================================================

/// Order side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum OrderSide {
    /// Buy.
    Buy,
    /// Sell.
    Sell,
}

/// Order type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    /// Market order.
    Market,
    /// Limit order.
    Limit,
    /// Stop order.
    Stop,
    /// Stop-limit order.
    StopLimit,
    /// Trailing stop order.
    TrailingStop,
}

impl OrderType {
    const fn needs_limit_price(self) -> bool {
        matches!(self, Self::Limit | Self::StopLimit)
    }

    const fn needs_stop_price(self) -> bool {
        matches!(self, Self::Stop | Self::StopLimit)
    }
}

/// Time in force.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TimeInForce {
    /// Day order.
    Day,
    /// Good till cancelled.
    Gtc,
    /// Market on open.
    Opg,
    /// Market on close.
    Cls,
    /// Immediate or cancel.
    Ioc,
    /// Fill or kill.
    Fok,
}

/// Option position intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PositionIntent {
    /// Open a long position.
    BuyToOpen,
    /// Close a short position.
    BuyToClose,
    /// Open a short position.
    SellToOpen,
    /// Close a long position.
    SellToClose,
}

/// Order class for multi-leg orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum OrderClass {
    Mleg,
}

/// Order status filter for `get_orders`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatusFilter {
    /// Open orders only.
    Open,
    /// Closed orders only.
    Closed,
    /// Every order.
    All,
}

impl OrderStatusFilter {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::All => "all",
        }
    }
}

// ============================================================================
// Tool Arguments
// ============================================================================

/// Arguments for `get_orders`.
#[derive(Debug, Default, Clone, Deserialize, JsonSchema)]
pub struct GetOrdersParams {
    /// Status filter (default `open`).
    pub status: Option<OrderStatusFilter>,
    /// Maximum number of orders (1-500).
    pub limit: Option<u32>,
    /// Only orders submitted after this timestamp.
    pub after: Option<String>,
    /// Only orders submitted until this timestamp.
    pub until: Option<String>,
    /// Sort by submission time.
    pub direction: Option<SortOrder>,
    /// Roll multi-leg orders up under their parent.
    pub nested: Option<bool>,
    /// Restrict to these symbols.
    #[serde(default)]
    pub symbols: Vec<String>,
}

/// Arguments for `place_stock_order`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct StockOrderParams {
    /// Ticker symbol.
    pub symbol: String,
    /// Buy or sell.
    pub side: OrderSide,
    /// Number of shares. Mutually exclusive with `notional`.
    #[schemars(with = "Option<f64>")]
    pub qty: Option<Decimal>,
    /// Dollar amount. Mutually exclusive with `qty`.
    #[schemars(with = "Option<f64>")]
    pub notional: Option<Decimal>,
    /// Order type (default `market`).
    #[serde(default = "default_order_type", alias = "type")]
    pub order_type: OrderType,
    /// Time in force (default `day`).
    #[serde(default = "default_stock_tif")]
    pub time_in_force: TimeInForce,
    /// Required for `limit` and `stop_limit`.
    #[schemars(with = "Option<f64>")]
    pub limit_price: Option<Decimal>,
    /// Required for `stop` and `stop_limit`.
    #[schemars(with = "Option<f64>")]
    pub stop_price: Option<Decimal>,
    /// Dollar trail for `trailing_stop`.
    #[schemars(with = "Option<f64>")]
    pub trail_price: Option<Decimal>,
    /// Percent trail for `trailing_stop`.
    #[schemars(with = "Option<f64>")]
    pub trail_percent: Option<Decimal>,
    /// Allow fills outside regular hours (limit + day only).
    #[serde(default)]
    pub extended_hours: bool,
    /// Caller supplied id.
    pub client_order_id: Option<String>,
}

/// Arguments for `place_crypto_order`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CryptoOrderParams {
    /// Pair, e.g. `BTC/USD`.
    pub symbol: String,
    /// Buy or sell.
    pub side: OrderSide,
    /// Quantity of the base asset. Mutually exclusive with `notional`.
    #[schemars(with = "Option<f64>")]
    pub qty: Option<Decimal>,
    /// Quote currency amount. Mutually exclusive with `qty`.
    #[schemars(with = "Option<f64>")]
    pub notional: Option<Decimal>,
    /// `market`, `limit` or `stop_limit` (default `market`).
    #[serde(default = "default_order_type", alias = "type")]
    pub order_type: OrderType,
    /// `gtc` or `ioc` (default `gtc`).
    #[serde(default = "default_crypto_tif")]
    pub time_in_force: TimeInForce,
    /// Required for `limit` and `stop_limit`.
    #[schemars(with = "Option<f64>")]
    pub limit_price: Option<Decimal>,
    /// Required for `stop_limit`.
    #[schemars(with = "Option<f64>")]
    pub stop_price: Option<Decimal>,
    /// Caller supplied id.
    pub client_order_id: Option<String>,
}

/// One leg of a multi-leg option order.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct OptionLeg {
    /// OCC contract symbol.
    pub symbol: String,
    /// Buy or sell.
    pub side: OrderSide,
    /// Ratio of this leg relative to the order quantity.
    #[serde(default = "default_ratio_qty")]
    pub ratio_qty: u32,
    /// Open or close intent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_intent: Option<PositionIntent>,
}

/// Arguments for `place_option_order`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct OptionOrderParams {
    /// OCC contract symbol for a single-leg order.
    pub symbol: Option<String>,
    /// Side for a single-leg order.
    pub side: Option<OrderSide>,
    /// Legs for a multi-leg order (1-4 legs).
    #[serde(default)]
    pub legs: Vec<OptionLeg>,
    /// Number of contracts (or strategy units for multi-leg).
    #[schemars(with = "f64")]
    pub qty: Decimal,
    /// `market` or `limit` (default `market`).
    #[serde(default = "default_order_type", alias = "type")]
    pub order_type: OrderType,
    /// Required for `limit`.
    #[schemars(with = "Option<f64>")]
    pub limit_price: Option<Decimal>,
    /// Time in force; options only accept `day`.
    #[serde(default = "default_stock_tif")]
    pub time_in_force: TimeInForce,
    /// Open or close intent for a single-leg order.
    pub position_intent: Option<PositionIntent>,
    /// Caller supplied id.
    pub client_order_id: Option<String>,
}

/// Arguments for `cancel_order_by_id`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct OrderIdParams {
    /// Alpaca order id.
    pub order_id: String,
}

const fn default_order_type() -> OrderType {
    OrderType::Market
}

const fn default_stock_tif() -> TimeInForce {
    TimeInForce::Day
}

const fn default_crypto_tif() -> TimeInForce {
    TimeInForce::Gtc
}

const fn default_ratio_qty() -> u32 {
    1
}

// ============================================================================
// Request Body
// ============================================================================

/// Body for `POST /v2/orders`.
#[derive(Debug, Clone, Default, Serialize)]
struct OrderRequestBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    symbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    qty: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    notional: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    side: Option<OrderSide>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    order_type: Option<OrderType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    time_in_force: Option<TimeInForce>,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stop_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trail_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trail_percent: Option<Decimal>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    extended_hours: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    client_order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    order_class: Option<OrderClass>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    legs: Vec<OptionLeg>,
    #[serde(skip_serializing_if = "Option::is_none")]
    position_intent: Option<PositionIntent>,
}

impl OrderRequestBody {
    fn into_json(self) -> Result<Value, AlpacaError> {
        serde_json::to_value(self).map_err(|e| AlpacaError::JsonParse(e.to_string()))
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// `GET /v2/orders`
pub async fn get_orders(
    client: SharedClient,
    params: GetOrdersParams,
) -> Result<Value, AlpacaError> {
    let query = orders_query(&params)?;
    client.get(Api::Trading, &["v2", "orders"], query).await
}

/// `POST /v2/orders` for equities.
pub async fn place_stock_order(
    client: SharedClient,
    params: StockOrderParams,
) -> Result<Value, AlpacaError> {
    let body = stock_order_body(params)?.into_json()?;
    client.post(&["v2", "orders"], body).await
}

/// `POST /v2/orders` for crypto pairs.
pub async fn place_crypto_order(
    client: SharedClient,
    params: CryptoOrderParams,
) -> Result<Value, AlpacaError> {
    let body = crypto_order_body(params)?.into_json()?;
    client.post(&["v2", "orders"], body).await
}

/// `POST /v2/orders` for single or multi-leg option orders.
pub async fn place_option_order(
    client: SharedClient,
    params: OptionOrderParams,
) -> Result<Value, AlpacaError> {
    let body = option_order_body(params)?.into_json()?;
    client.post(&["v2", "orders"], body).await
}

/// `DELETE /v2/orders`
pub async fn cancel_all_orders(client: SharedClient, _: NoParams) -> Result<Value, AlpacaError> {
    client.delete(&["v2", "orders"], Query::new()).await
}

/// `DELETE /v2/orders/{order_id}`
pub async fn cancel_order_by_id(
    client: SharedClient,
    params: OrderIdParams,
) -> Result<Value, AlpacaError> {
    let id = validate::non_empty("order_id", &params.order_id)?;
    client.delete(&["v2", "orders", &id], Query::new()).await
}

// ============================================================================
// Validation
// ============================================================================

fn orders_query(params: &GetOrdersParams) -> Result<Query, AlpacaError> {
    if let Some(limit) = params.limit
        && !(1..=MAX_ORDERS_LIMIT).contains(&limit)
    {
        return Err(AlpacaError::invalid(format!(
            "limit must be between 1 and {MAX_ORDERS_LIMIT}, got {limit}"
        )));
    }
    let symbols = if params.symbols.is_empty() {
        Vec::new()
    } else {
        validate::symbols(&params.symbols)?
    };

    Ok(Query::new()
        .push_opt("status", params.status.map(OrderStatusFilter::as_str))
        .push_opt("limit", params.limit)
        .push_opt("after", params.after.as_deref())
        .push_opt("until", params.until.as_deref())
        .push_opt("direction", params.direction.map(SortOrder::as_str))
        .push_opt("nested", params.nested)
        .push_list("symbols", &symbols))
}

/// Exactly one of `qty` / `notional`, positive.
fn sizing(
    qty: Option<Decimal>,
    notional: Option<Decimal>,
) -> Result<(Option<Decimal>, Option<Decimal>), AlpacaError> {
    match (qty, notional) {
        (Some(_), Some(_)) => Err(AlpacaError::invalid(
            "qty and notional are mutually exclusive",
        )),
        (None, None) => Err(AlpacaError::invalid("either qty or notional is required")),
        (qty, notional) => Ok((
            validate::positive_opt("qty", qty)?,
            validate::positive_opt("notional", notional)?,
        )),
    }
}

/// Check the prices each order type requires.
fn prices(
    order_type: OrderType,
    limit_price: Option<Decimal>,
    stop_price: Option<Decimal>,
) -> Result<(Option<Decimal>, Option<Decimal>), AlpacaError> {
    let limit_price = validate::positive_opt("limit_price", limit_price)?;
    let stop_price = validate::positive_opt("stop_price", stop_price)?;
    if order_type.needs_limit_price() && limit_price.is_none() {
        return Err(AlpacaError::invalid(
            "limit_price is required for limit and stop_limit orders",
        ));
    }
    if order_type.needs_stop_price() && stop_price.is_none() {
        return Err(AlpacaError::invalid(
            "stop_price is required for stop and stop_limit orders",
        ));
    }
    Ok((limit_price, stop_price))
}

fn client_order_id(raw: Option<&str>) -> Result<Option<String>, AlpacaError> {
    raw.map(|id| validate::non_empty("client_order_id", id))
        .transpose()
}

fn stock_order_body(params: StockOrderParams) -> Result<OrderRequestBody, AlpacaError> {
    let symbol = validate::symbol(&params.symbol)?;
    let (qty, notional) = sizing(params.qty, params.notional)?;
    let (limit_price, stop_price) =
        prices(params.order_type, params.limit_price, params.stop_price)?;

    let trail_price = validate::positive_opt("trail_price", params.trail_price)?;
    let trail_percent = validate::positive_opt("trail_percent", params.trail_percent)?;
    if params.order_type == OrderType::TrailingStop
        && trail_price.is_some() == trail_percent.is_some()
    {
        return Err(AlpacaError::invalid(
            "trailing_stop orders require exactly one of trail_price or trail_percent",
        ));
    }

    if params.extended_hours
        && (params.order_type != OrderType::Limit || params.time_in_force != TimeInForce::Day)
    {
        return Err(AlpacaError::invalid(
            "extended_hours is only supported for limit orders with time_in_force day",
        ));
    }

    Ok(OrderRequestBody {
        symbol: Some(symbol),
        qty,
        notional,
        side: Some(params.side),
        order_type: Some(params.order_type),
        time_in_force: Some(params.time_in_force),
        limit_price,
        stop_price,
        trail_price,
        trail_percent,
        extended_hours: params.extended_hours,
        client_order_id: client_order_id(params.client_order_id.as_deref())?,
        ..Default::default()
    })
}

fn crypto_order_body(params: CryptoOrderParams) -> Result<OrderRequestBody, AlpacaError> {
    let symbol = validate::symbol(&params.symbol)?;
    if !matches!(
        params.order_type,
        OrderType::Market | OrderType::Limit | OrderType::StopLimit
    ) {
        return Err(AlpacaError::invalid(
            "crypto orders support market, limit and stop_limit types only",
        ));
    }
    if !matches!(params.time_in_force, TimeInForce::Gtc | TimeInForce::Ioc) {
        return Err(AlpacaError::invalid(
            "crypto orders support time_in_force gtc or ioc only",
        ));
    }
    let (qty, notional) = sizing(params.qty, params.notional)?;
    let (limit_price, stop_price) =
        prices(params.order_type, params.limit_price, params.stop_price)?;

    Ok(OrderRequestBody {
        symbol: Some(symbol),
        qty,
        notional,
        side: Some(params.side),
        order_type: Some(params.order_type),
        time_in_force: Some(params.time_in_force),
        limit_price,
        stop_price,
        client_order_id: client_order_id(params.client_order_id.as_deref())?,
        ..Default::default()
    })
}

fn option_order_body(params: OptionOrderParams) -> Result<OrderRequestBody, AlpacaError> {
    let qty = validate::positive("qty", params.qty)?;
    if !qty.fract().is_zero() {
        return Err(AlpacaError::invalid(format!(
            "qty must be a whole number of contracts, got {qty}"
        )));
    }
    if !matches!(params.order_type, OrderType::Market | OrderType::Limit) {
        return Err(AlpacaError::invalid(
            "option orders support market and limit types only",
        ));
    }
    if params.time_in_force != TimeInForce::Day {
        return Err(AlpacaError::invalid(
            "option orders support time_in_force day only",
        ));
    }
    let (limit_price, _) = prices(params.order_type, params.limit_price, None)?;

    let mut body = OrderRequestBody {
        qty: Some(qty.normalize()),
        order_type: Some(params.order_type),
        time_in_force: Some(params.time_in_force),
        limit_price,
        client_order_id: client_order_id(params.client_order_id.as_deref())?,
        ..Default::default()
    };

    match (params.symbol, params.legs.is_empty()) {
        (Some(symbol), true) => {
            let side = params
                .side
                .ok_or_else(|| AlpacaError::invalid("side is required for single-leg orders"))?;
            body.symbol = Some(validate::non_empty("symbol", &symbol)?);
            body.side = Some(side);
            body.position_intent = params.position_intent;
        }
        (None, false) => {
            if params.legs.len() > MAX_OPTION_LEGS {
                return Err(AlpacaError::invalid(format!(
                    "multi-leg orders support at most {MAX_OPTION_LEGS} legs, got {}",
                    params.legs.len()
                )));
            }
            body.legs = params
                .legs
                .into_iter()
                .map(|leg| {
                    if leg.ratio_qty == 0 {
                        return Err(AlpacaError::invalid("leg ratio_qty must be at least 1"));
                    }
                    Ok(OptionLeg {
                        symbol: validate::non_empty("leg symbol", &leg.symbol)?,
                        ..leg
                    })
                })
                .collect::<Result<_, _>>()?;
            body.order_class = Some(OrderClass::Mleg);
        }
        (Some(_), false) => {
            return Err(AlpacaError::invalid(
                "provide either symbol for a single-leg order or legs for a multi-leg order, not both",
            ));
        }
        (None, true) => {
            return Err(AlpacaError::invalid(
                "either symbol or a non-empty legs list is required",
            ));
        }
    }

    Ok(body)
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use serde_json::json;

    use super::*;

    fn stock(order_type: OrderType) -> StockOrderParams {
        StockOrderParams {
            symbol: "aapl".to_string(),
            side: OrderSide::Buy,
            qty: Some(dec!(10)),
            notional: None,
            order_type,
            time_in_force: TimeInForce::Day,
            limit_price: None,
            stop_price: None,
            trail_price: None,
            trail_percent: None,
            extended_hours: false,
            client_order_id: None,
        }
    }

    fn option_leg(symbol: &str, side: OrderSide) -> OptionLeg {
        OptionLeg {
            symbol: symbol.to_string(),
            side,
            ratio_qty: 1,
            position_intent: None,
        }
    }

    fn option(symbol: Option<&str>, legs: Vec<OptionLeg>) -> OptionOrderParams {
        OptionOrderParams {
            symbol: symbol.map(ToString::to_string),
            side: Some(OrderSide::Buy),
            legs,
            qty: dec!(1),
            order_type: OrderType::Market,
            limit_price: None,
            time_in_force: TimeInForce::Day,
            position_intent: None,
            client_order_id: None,
        }
    }

    #[test]
    fn market_stock_order_body() {
        let body = stock_order_body(stock(OrderType::Market))
            .unwrap()
            .into_json()
            .unwrap();
        assert_eq!(
            body,
            json!({
                "symbol": "AAPL",
                "qty": "10",
                "side": "buy",
                "type": "market",
                "time_in_force": "day"
            })
        );
    }

    #[test]
    fn limit_requires_limit_price() {
        assert!(stock_order_body(stock(OrderType::Limit)).is_err());

        let mut params = stock(OrderType::Limit);
        params.limit_price = Some(dec!(190.5));
        let body = stock_order_body(params).unwrap();
        assert_eq!(body.limit_price, Some(dec!(190.5)));
    }

    #[test]
    fn stop_limit_requires_both_prices() {
        let mut params = stock(OrderType::StopLimit);
        params.limit_price = Some(dec!(100));
        assert!(stock_order_body(params.clone()).is_err());
        params.stop_price = Some(dec!(99));
        assert!(stock_order_body(params).is_ok());
    }

    #[test]
    fn trailing_stop_requires_exactly_one_trail() {
        let mut params = stock(OrderType::TrailingStop);
        assert!(stock_order_body(params.clone()).is_err());
        params.trail_percent = Some(dec!(2.5));
        assert!(stock_order_body(params.clone()).is_ok());
        params.trail_price = Some(dec!(1));
        assert!(stock_order_body(params).is_err());
    }

    #[test]
    fn qty_and_notional_are_exclusive() {
        let mut params = stock(OrderType::Market);
        params.notional = Some(dec!(500));
        assert!(stock_order_body(params.clone()).is_err());
        params.qty = None;
        assert!(stock_order_body(params.clone()).is_ok());
        params.notional = None;
        assert!(stock_order_body(params).is_err());
    }

    #[test]
    fn non_positive_qty_rejected() {
        let mut params = stock(OrderType::Market);
        params.qty = Some(dec!(-1));
        assert!(stock_order_body(params).is_err());
    }

    #[test]
    fn extended_hours_needs_limit_day() {
        let mut params = stock(OrderType::Market);
        params.extended_hours = true;
        assert!(stock_order_body(params).is_err());
    }

    #[test]
    fn crypto_restricts_type_and_tif() {
        let params = CryptoOrderParams {
            symbol: "btc/usd".to_string(),
            side: OrderSide::Buy,
            qty: None,
            notional: Some(dec!(100)),
            order_type: OrderType::Market,
            time_in_force: TimeInForce::Gtc,
            limit_price: None,
            stop_price: None,
            client_order_id: None,
        };
        let body = crypto_order_body(params.clone()).unwrap();
        assert_eq!(body.symbol.as_deref(), Some("BTC/USD"));

        let mut day = params.clone();
        day.time_in_force = TimeInForce::Day;
        assert!(crypto_order_body(day).is_err());

        let mut stop = params;
        stop.order_type = OrderType::Stop;
        assert!(crypto_order_body(stop).is_err());
    }

    #[test]
    fn single_leg_option_body() {
        let body = option_order_body(option(Some("AAPL250117C00200000"), vec![]))
            .unwrap()
            .into_json()
            .unwrap();
        assert_eq!(body["symbol"], "AAPL250117C00200000");
        assert_eq!(body["side"], "buy");
        assert!(body.get("order_class").is_none());
    }

    #[test]
    fn multi_leg_option_body() {
        let mut params = option(
            None,
            vec![
                option_leg("AAPL250117C00200000", OrderSide::Buy),
                option_leg("AAPL250117C00210000", OrderSide::Sell),
            ],
        );
        params.order_type = OrderType::Limit;
        params.limit_price = Some(dec!(1.25));
        let body = option_order_body(params).unwrap().into_json().unwrap();
        assert_eq!(body["order_class"], "mleg");
        assert_eq!(body["legs"].as_array().map(Vec::len), Some(2));
        assert_eq!(body["legs"][1]["side"], "sell");
        assert!(body.get("symbol").is_none());
    }

    #[test]
    fn leg_count_bounds() {
        let one = option(None, vec![option_leg("AAPL250117C00200000", OrderSide::Buy)]);
        let body = option_order_body(one).unwrap().into_json().unwrap();
        assert_eq!(body["order_class"], "mleg");
        assert_eq!(body["legs"].as_array().map(Vec::len), Some(1));

        let five = option(
            None,
            (0..5)
                .map(|_| option_leg("AAPL250117C00200000", OrderSide::Buy))
                .collect(),
        );
        assert!(option_order_body(five).is_err());
    }

    #[test]
    fn option_order_rules() {
        let mut fractional = option(Some("SPY250117P00400000"), vec![]);
        fractional.qty = dec!(1.5);
        assert!(option_order_body(fractional).is_err());

        let mut gtc = option(Some("SPY250117P00400000"), vec![]);
        gtc.time_in_force = TimeInForce::Gtc;
        assert!(option_order_body(gtc).is_err());

        assert!(option_order_body(option(None, vec![])).is_err());

        let legs = (0..5)
            .map(|_| option_leg("SPY250117P00400000", OrderSide::Buy))
            .collect();
        assert!(option_order_body(option(None, legs)).is_err());
    }

    #[test]
    fn orders_query_filters() {
        let params = GetOrdersParams {
            status: Some(OrderStatusFilter::Closed),
            limit: Some(50),
            direction: Some(SortOrder::Asc),
            nested: Some(true),
            symbols: vec!["aapl".to_string(), "tsla".to_string()],
            ..Default::default()
        };
        let query = orders_query(&params).unwrap();
        assert_eq!(query.get("status"), Some("closed"));
        assert_eq!(query.get("direction"), Some("asc"));
        assert_eq!(query.get("nested"), Some("true"));
        assert_eq!(query.get("symbols"), Some("AAPL,TSLA"));

        let over = GetOrdersParams {
            limit: Some(501),
            ..Default::default()
        };
        assert!(orders_query(&over).is_err());
    }
}
