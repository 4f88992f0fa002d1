//! Chart generation and rendering for the dashboard.
//!
//! The monthly chart is generated as JSON configuration for the ECharts
//! library and rendered with an HTML container and JavaScript initialization
//! code.

use charming::{
    Chart,
    component::{Axis, Grid, Title},
    element::{AxisPointer, AxisPointerType, AxisType, ItemStyle, Tooltip, Trigger},
    series::bar::Bar,
};
use maud::{Markup, PreEscaped, html};

use crate::{
    dashboard::aggregation::{MonthlyTotal, get_monthly_label_and_value_pairs},
    html::HeadElement,
};

/// The colour of the bars in the monthly chart.
const BAR_COLOR: &str = "#8884d8";

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Renders the HTML container for a dashboard chart.
pub(super) fn chart_view(chart: &DashboardChart) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4 p-4 bg-white rounded-xl shadow-md"
        {
            div
                id=(chart.id)
                class="min-h-[300px] rounded dark:bg-gray-100"
            {}
        }
    )
}

/// Generates JavaScript initialization code for a dashboard chart.
///
/// Creates a script that initializes an ECharts instance with dark mode
/// support and responsive resizing.
pub(super) fn chart_script(chart: &DashboardChart) -> HeadElement {
    let script = format!(
        r#"document.addEventListener('DOMContentLoaded', function() {{
            const chartDom = document.getElementById("{}");
            const chart = echarts.init(chartDom);
            const option = {};
            chart.setOption(option);

            window.addEventListener('resize', chart.resize);

            const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
            const updateTheme = () => {{
                chart.setTheme(darkModeMediaQuery.matches ? 'dark' : 'default');
            }};
            darkModeMediaQuery.addEventListener('change', updateTheme);
            updateTheme();
        }});"#,
        chart.id, chart.options
    );

    HeadElement::ScriptSource(PreEscaped(script))
}

/// A bar chart of the total amount per month.
pub(super) fn monthly_chart(monthly_totals: &[MonthlyTotal]) -> Chart {
    let (labels, values) = get_monthly_label_and_value_pairs(monthly_totals);

    Chart::new()
        .title(Title::new().text("Monthly Expenses"))
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Axis)
                .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow)),
        )
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .name("Month")
                .data(labels),
        )
        .y_axis(Axis::new().type_(AxisType::Value).name("Amount"))
        .series(
            Bar::new()
                .name("Total")
                .item_style(ItemStyle::new().color(BAR_COLOR))
                .data(values),
        )
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::dashboard::{aggregation::MonthlyTotal, charts::monthly_chart};

    #[test]
    fn chart_options_contain_labels_and_totals() {
        let totals = [
            MonthlyTotal {
                month: date!(2024 - 02 - 01),
                total: 12.5,
            },
            MonthlyTotal {
                month: date!(2024 - 03 - 01),
                total: 42.0,
            },
        ];

        let options = monthly_chart(&totals).to_string();

        assert!(options.contains("Monthly Expenses"), "{options}");
        assert!(options.contains("Feb 2024"), "{options}");
        assert!(options.contains("Mar 2024"), "{options}");
        assert!(options.contains("42"), "{options}");
        assert!(options.contains("#8884d8"), "{options}");
    }
}
