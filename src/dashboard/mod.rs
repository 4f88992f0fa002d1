//! Dashboard page with the transaction form, the monthly chart and the
//! transaction table.
//!
//! This module is organized into:
//! - `aggregation`: Monthly totals for the chart
//! - `charts`: ECharts configuration and rendering
//! - `form`: The add/edit form and its script
//! - `tables`: The transaction table
//! - `handlers`: The HTTP handler for the page

mod aggregation;
mod charts;
mod form;
mod handlers;
mod tables;

pub use handlers::get_dashboard_page;
