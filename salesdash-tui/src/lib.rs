//! Sales dashboard TUI — six panels over one cleaned order table.
//!
//! Panels:
//! 1. Overview — total sales, profit, orders; monthly sales
//! 2. Sales Over Time — daily sales line
//! 3. Sales by Region — bar per region
//! 4. Discount vs Profit — scatter of orders
//! 5. Sales Forecast — horizon slider and forecast chart
//! 6. Help — keyboard shortcuts and error history

pub mod app;
pub mod input;
pub mod logging;
pub mod persistence;
pub mod theme;
pub mod ui;

pub use app::AppState;
