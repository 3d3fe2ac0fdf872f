//! Text summaries, bar charts and CSV export over engine results

pub mod chart;
pub mod export;
pub mod text;

pub use chart::{render_bar_chart, ChartMetric};
pub use export::{export_history, export_yearly, write_history, write_yearly};
pub use text::{render_comparison, render_monte_carlo, render_scenarios, render_summary};
