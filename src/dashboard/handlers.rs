//! HTTP handler for the dashboard page.

use axum::{
    extract::{FromRef, State},
    response::{Html, IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    dashboard::{
        aggregation::aggregate_by_month,
        charts::{DashboardChart, chart_script, chart_view, monthly_chart},
        form::{transaction_form, transaction_form_script},
        tables::transactions_table,
    },
    db::SharedConnection,
    html::{HeadElement, PAGE_CONTAINER_STYLE, base},
    transaction::{Transaction, list_transactions},
};

const ECHARTS_URL: &str = "https://cdn.jsdelivr.net/npm/echarts@6.0.0/dist/echarts.min.js";

/// The state needed for the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for reading transactions.
    pub db_connection: SharedConnection,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Display a page with the transaction form, the monthly chart and every transaction.
pub async fn get_dashboard_page(State(state): State<DashboardState>) -> Response {
    let transactions = match state.db_connection.lock() {
        Ok(connection) => list_transactions(&connection),
        Err(error) => {
            tracing::error!("Could not acquire database lock: {error}");
            Err(Error::DatabaseLockError)
        }
    };

    match transactions {
        Ok(transactions) => Html(dashboard_view(&transactions).into_string()).into_response(),
        Err(error) => {
            tracing::error!("Could not get transactions for the dashboard: {error}");
            error.into_response()
        }
    }
}

fn dashboard_view(transactions: &[Transaction]) -> Markup {
    let mut scripts = vec![transaction_form_script()];

    let chart = if transactions.is_empty() {
        None
    } else {
        let chart = DashboardChart {
            id: "monthly-chart",
            options: monthly_chart(&aggregate_by_month(transactions)).to_string(),
        };
        scripts.push(HeadElement::ScriptLink(ECHARTS_URL.to_owned()));
        scripts.push(chart_script(&chart));
        Some(chart)
    };

    let content = html!(
        div class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-2xl font-bold mb-6" { "Ledgerly" }

            (transaction_form())

            @match &chart {
                Some(chart) => { (chart_view(chart)) }
                None => { (no_data_view()) }
            }

            (transactions_table(transactions))
        }
    );

    base("Dashboard", &scripts, &content)
}

fn no_data_view() -> Markup {
    html!(
        div id="no-data" class="flex flex-col items-center mb-8"
        {
            h2 class="text-xl font-bold" { "Nothing here yet..." }

            p { "The monthly chart will show up here once you add some transactions." }
        }
    )
}
