//! Dashboard module
//!
//! Computes the derived data shown on the finance tracker's overview page:
//! summary totals, the expense breakdown by category and tag, the monthly
//! trend series, and the chart specifications built from them.

mod aggregation;
mod charts;

pub use aggregation::{
    CATEGORY_COLORS, CategorySlice, Summary, TagSlice, TrendPoint, UNTAGGED_LABEL, monthly_trend,
    summarize, tag_breakdown,
};
pub use charts::{category_pie_chart, tag_breakdown_chart, trend_bar_chart};
