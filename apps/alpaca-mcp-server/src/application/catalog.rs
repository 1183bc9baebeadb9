//! Tool Catalog
//!
//! The fixed list of Alpaca tools, in registration order, each binding a
//! gateway handler to its name and description.

use std::future::Future;
use std::sync::Arc;

use crate::domain::tool::Tool;
use crate::infrastructure::alpaca::SharedClient;
use crate::infrastructure::alpaca::gateway::{
    account, assets, calendar, crypto, options, orders, positions, stocks, watchlists,
};

/// Partially apply a gateway handler to the shared client.
fn bind<P, F, Fut>(client: &SharedClient, handler: F) -> impl Fn(P) -> Fut + Send + Sync + 'static
where
    P: 'static,
    F: Fn(SharedClient, P) -> Fut + Send + Sync + 'static,
    Fut: Future + Send + 'static,
{
    let client = Arc::clone(client);
    move |params: P| handler(Arc::clone(&client), params)
}

/// Build every Alpaca tool against `client`.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn alpaca_tools(client: &SharedClient) -> Vec<Tool> {
    vec![
        // Account & positions
        Tool::new(
            "get_account_info",
            "Get current account info (balances, status, buying power).",
            bind(client, account::get_account_info),
        ),
        Tool::new(
            "get_all_positions",
            "Get all open positions in the account.",
            bind(client, positions::get_all_positions),
        ),
        Tool::new(
            "get_open_position",
            "Get details for a specific open position.",
            bind(client, positions::get_open_position),
        ),
        // Assets & corporate actions
        Tool::new(
            "get_asset",
            "Get details for a single asset by symbol.",
            bind(client, assets::get_asset),
        ),
        Tool::new(
            "get_all_assets",
            "List assets with optional filters (status, class, exchange).",
            bind(client, assets::get_all_assets),
        ),
        Tool::new(
            "get_corporate_actions",
            "Retrieve corporate action announcements.",
            bind(client, assets::get_corporate_actions),
        ),
        Tool::new(
            "get_portfolio_history",
            "Get account portfolio history (equity and P/L).",
            bind(client, account::get_portfolio_history),
        ),
        // Watchlists
        Tool::new(
            "create_watchlist",
            "Create a watchlist with symbols.",
            bind(client, watchlists::create_watchlist),
        ),
        Tool::new(
            "get_watchlists",
            "List all watchlists for the account.",
            bind(client, watchlists::get_watchlists),
        ),
        Tool::new(
            "update_watchlist_by_id",
            "Update a watchlist's name and/or symbols by ID.",
            bind(client, watchlists::update_watchlist_by_id),
        ),
        Tool::new(
            "get_watchlist_by_id",
            "Get a watchlist by its ID.",
            bind(client, watchlists::get_watchlist_by_id),
        ),
        Tool::new(
            "add_asset_to_watchlist_by_id",
            "Add a symbol to a watchlist by ID.",
            bind(client, watchlists::add_asset_to_watchlist_by_id),
        ),
        Tool::new(
            "remove_asset_from_watchlist_by_id",
            "Remove a symbol from a watchlist by ID.",
            bind(client, watchlists::remove_asset_from_watchlist_by_id),
        ),
        Tool::new(
            "delete_watchlist_by_id",
            "Delete a watchlist by ID.",
            bind(client, watchlists::delete_watchlist_by_id),
        ),
        // Market calendar & clock
        Tool::new(
            "get_calendar",
            "Get market calendar for a date range.",
            bind(client, calendar::get_calendar),
        ),
        Tool::new(
            "get_clock",
            "Get current market status and next open/close.",
            bind(client, calendar::get_clock),
        ),
        // Stock market data
        Tool::new(
            "get_stock_bars",
            "Get historical OHLCV bars for stocks.",
            bind(client, stocks::get_stock_bars),
        ),
        Tool::new(
            "get_stock_quotes",
            "Get historical quote data (bid/ask) for stocks.",
            bind(client, stocks::get_stock_quotes),
        ),
        Tool::new(
            "get_stock_trades",
            "Get historical trade prints for stocks.",
            bind(client, stocks::get_stock_trades),
        ),
        Tool::new(
            "get_stock_latest_bar",
            "Get the latest minute bar for one or more stocks.",
            bind(client, stocks::get_stock_latest_bar),
        ),
        Tool::new(
            "get_stock_latest_quote",
            "Get the latest quote for one or more stocks.",
            bind(client, stocks::get_stock_latest_quote),
        ),
        Tool::new(
            "get_stock_latest_trade",
            "Get the latest trade for one or more stocks.",
            bind(client, stocks::get_stock_latest_trade),
        ),
        Tool::new(
            "get_stock_snapshot",
            "Get comprehensive snapshots for one or more stocks.",
            bind(client, stocks::get_stock_snapshot),
        ),
        // Crypto market data
        Tool::new(
            "get_crypto_bars",
            "Get historical OHLCV bars for crypto.",
            bind(client, crypto::get_crypto_bars),
        ),
        Tool::new(
            "get_crypto_quotes",
            "Get historical quote data for crypto.",
            bind(client, crypto::get_crypto_quotes),
        ),
        Tool::new(
            "get_crypto_trades",
            "Get historical trades for crypto.",
            bind(client, crypto::get_crypto_trades),
        ),
        Tool::new(
            "get_crypto_latest_bar",
            "Get the latest minute bar for crypto.",
            bind(client, crypto::get_crypto_latest_bar),
        ),
        Tool::new(
            "get_crypto_latest_quote",
            "Get the latest quote for crypto.",
            bind(client, crypto::get_crypto_latest_quote),
        ),
        Tool::new(
            "get_crypto_latest_trade",
            "Get the latest trade for crypto.",
            bind(client, crypto::get_crypto_latest_trade),
        ),
        Tool::new(
            "get_crypto_snapshot",
            "Get snapshot (quote/trade/bars) for crypto.",
            bind(client, crypto::get_crypto_snapshot),
        ),
        Tool::new(
            "get_crypto_latest_orderbook",
            "Get the latest orderbook for crypto.",
            bind(client, crypto::get_crypto_latest_orderbook),
        ),
        // Options market data
        Tool::new(
            "get_option_contracts",
            "Retrieve option contracts for underlying symbol(s).",
            bind(client, options::get_option_contracts),
        ),
        Tool::new(
            "get_option_latest_quote",
            "Get the latest quote for one or more option contracts.",
            bind(client, options::get_option_latest_quote),
        ),
        Tool::new(
            "get_option_snapshot",
            "Get snapshot (quote/trade/IV/Greeks) for one or more option contracts.",
            bind(client, options::get_option_snapshot),
        ),
        Tool::new(
            "get_option_chain",
            "Get option chain snapshots for an underlying symbol.",
            bind(client, options::get_option_chain),
        ),
        // Orders
        Tool::new(
            "get_orders",
            "Retrieve orders with optional filters.",
            bind(client, orders::get_orders),
        ),
        Tool::new(
            "place_stock_order",
            "Place a stock order using the specified order type and parameters.",
            bind(client, orders::place_stock_order),
        ),
        Tool::new(
            "place_crypto_order",
            "Place a crypto order (market/limit/stop_limit).",
            bind(client, orders::place_crypto_order),
        ),
        Tool::new(
            "place_option_order",
            "Place an options order for single or multi-leg strategies.",
            bind(client, orders::place_option_order),
        ),
        Tool::new(
            "cancel_all_orders",
            "Cancel all open orders.",
            bind(client, orders::cancel_all_orders),
        ),
        Tool::new(
            "cancel_order_by_id",
            "Cancel a specific order by its ID.",
            bind(client, orders::cancel_order_by_id),
        ),
        // Position management
        Tool::new(
            "close_position",
            "Close an open position for a single symbol.",
            bind(client, positions::close_position),
        ),
        Tool::new(
            "close_all_positions",
            "Close all open positions.",
            bind(client, positions::close_all_positions),
        ),
        Tool::new(
            "exercise_options_position",
            "Exercise a held option contract.",
            bind(client, positions::exercise_options_position),
        ),
    ]
}
