//! Alpaca Gateway
//!
//! One async handler per tool. Each handler takes the shared HTTP client and
//! a typed parameter struct, validates the arguments, performs a single
//! REST call and returns Alpaca's JSON response unchanged.
//!
//! | Module        | Tools                                                     |
//! |---------------|-----------------------------------------------------------|
//! | `account`     | account info, portfolio history                           |
//! | `positions`   | list/get/close positions, exercise options                |
//! | `assets`      | assets, corporate actions                                 |
//! | `watchlists`  | watchlist CRUD                                            |
//! | `calendar`    | market calendar and clock                                 |
//! | `stocks`      | historical and latest stock data, snapshots               |
//! | `crypto`      | historical and latest crypto data, snapshots, orderbooks  |
//! | `options`     | contracts, latest quotes, snapshots, chains               |
//! | `orders`      | list, place, cancel orders                                |

pub mod account;
pub mod assets;
pub mod calendar;
pub mod crypto;
pub mod options;
pub mod orders;
pub mod positions;
pub mod stocks;
pub mod watchlists;

mod validate;

use std::sync::Arc;

use rmcp::schemars::{self, JsonSchema};
use serde::Deserialize;

use super::AlpacaHttpClient;

/// Client handle shared by every handler.
pub type SharedClient = Arc<AlpacaHttpClient>;

/// Arguments for tools that take none.
#[derive(Debug, Default, Clone, Deserialize, JsonSchema)]
pub struct NoParams {}

/// A single ticker symbol.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SymbolParams {
    /// Ticker symbol, e.g. `AAPL` (crypto pairs without slash, e.g. `BTCUSD`).
    pub symbol: String,
}
