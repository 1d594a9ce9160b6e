//! Chart generation for the dashboard.
//!
//! Builds ECharts specifications from the aggregation output:
//! - **Category Pie Chart**: expense share per category
//! - **Trend Bar Chart**: income and expense totals per month
//! - **Tag Breakdown Chart**: drill-down into one category by tag
//!
//! Each chart is an ECharts configuration that the presentation layer can
//! serialize to JSON and hand to the ECharts runtime unchanged.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    datatype::DataPointItem,
    element::{AxisType, Emphasis, EmphasisFocus, ItemStyle, Tooltip, Trigger},
    series::{Bar, Pie},
};

use super::aggregation::{Summary, TagSlice, TrendPoint};

/// Builds a pie chart of the expense breakdown in `summary`.
///
/// Each slice keeps the color assigned by the aggregation, so the same
/// category is drawn in the same color across renders.
pub fn category_pie_chart(summary: &Summary) -> Chart {
    let data = summary
        .category_breakdown
        .iter()
        .map(|slice| {
            DataPointItem::new(slice.value)
                .name(slice.name.as_str())
                .item_style(ItemStyle::new().color(slice.color))
        })
        .collect::<Vec<_>>();

    Chart::new()
        .title(Title::new().text("Expenses by category"))
        .tooltip(Tooltip::new().trigger(Trigger::Item))
        .legend(Legend::new().left("left"))
        .series(Pie::new().name("Expenses").radius("55%").data(data))
}

/// Builds a grouped bar chart of monthly income and expense totals.
pub fn trend_bar_chart(trend: &[TrendPoint]) -> Chart {
    let labels = trend
        .iter()
        .map(|point| point.name.clone())
        .collect::<Vec<_>>();
    let income = trend.iter().map(|point| point.income).collect::<Vec<_>>();
    let expenses = trend.iter().map(|point| point.expenses).collect::<Vec<_>>();

    Chart::new()
        .title(Title::new().text("Monthly trend"))
        .tooltip(Tooltip::new().trigger(Trigger::Axis))
        .legend(Legend::new())
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(Axis::new().type_(AxisType::Value))
        .series(Bar::new().name("Income").data(income))
        .series(Bar::new().name("Expenses").data(expenses))
}

/// Builds a bar chart of one category's expenses grouped by tag.
///
/// `slices` is expected in the order returned by
/// [tag_breakdown](super::tag_breakdown), largest amount first.
pub fn tag_breakdown_chart(category: &str, slices: &[TagSlice]) -> Chart {
    let labels = slices
        .iter()
        .map(|slice| slice.name.clone())
        .collect::<Vec<_>>();
    let values = slices.iter().map(|slice| slice.value).collect::<Vec<_>>();

    Chart::new()
        .title(Title::new().text(format!("{category} by tag")))
        .tooltip(Tooltip::new().trigger(Trigger::Axis))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(Axis::new().type_(AxisType::Value))
        .series(
            Bar::new()
                .name(category)
                .emphasis(Emphasis::new().focus(EmphasisFocus::Series))
                .data(values),
        )
}
