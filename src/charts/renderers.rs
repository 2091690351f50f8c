//! Chart Renderers
//!
//! One configuration builder per dashboard slot. Builders are pure: the
//! same payload slice always yields the same configuration.

use serde_json::json;

use super::model::{
    ChartConfig, ChartData, ChartType, ColorSpec, Dataset, LabelSource, TooltipFormat,
    ValueFormat, PRIMARY, SECONDARY,
};
use crate::analytics::{AllocationSeries, PerformanceSeries, RiskMetrics};

pub const SECTOR_TITLE: &str = "Portfolio Sector Allocation";
pub const ASSET_CLASS_TITLE: &str = "Asset Class Distribution";
pub const PERFORMANCE_TITLE: &str = "Portfolio Performance vs Benchmark";
pub const RISK_TITLE: &str = "Risk Metrics Overview";

pub const PORTFOLIO_SERIES: &str = "Portfolio";
pub const BENCHMARK_SERIES: &str = "Benchmark (Nifty 50)";
pub const RISK_SERIES: &str = "Portfolio Metrics";

/// Radar axes, in the order of [`RiskMetrics::values`]
pub const RISK_AXES: [&str; 5] = [
    "Volatility",
    "Beta",
    "Sharpe Ratio",
    "Alpha",
    "Information Ratio",
];

const GRID_COLOR: &str = "rgba(0, 0, 0, 0.05)";

/// Doughnut of sector weights
pub fn sector_allocation(series: &AllocationSeries) -> ChartConfig {
    allocation_chart(ChartType::Doughnut, series, SECTOR_TITLE)
}

/// Pie of asset class weights
pub fn asset_class_distribution(series: &AllocationSeries) -> ChartConfig {
    allocation_chart(ChartType::Pie, series, ASSET_CLASS_TITLE)
}

fn allocation_chart(chart_type: ChartType, series: &AllocationSeries, title: &str) -> ChartConfig {
    let dataset = Dataset {
        data: series.values.clone(),
        background_color: Some(ColorSpec::palette()),
        border_width: Some(1),
        ..Default::default()
    };

    ChartConfig {
        chart_type,
        data: ChartData {
            labels: series.labels.clone(),
            datasets: vec![dataset],
        },
        options: json!({
            "responsive": true,
            "maintainAspectRatio": false,
            "plugins": {
                "legend": {
                    "position": "right",
                    "labels": { "padding": 20, "font": { "size": 12 } }
                },
                "title": { "display": true, "text": title, "font": { "size": 16 } }
            },
            "animation": { "animateScale": true, "animateRotate": true }
        }),
        tooltip: TooltipFormat::new(LabelSource::Point, ValueFormat::Percent),
        tick_format: None,
    }
}

/// Filled, smoothed lines of portfolio against benchmark
pub fn performance(series: &PerformanceSeries) -> ChartConfig {
    let portfolio = Dataset {
        label: Some(PORTFOLIO_SERIES.to_string()),
        data: series.portfolio_values.clone(),
        border_color: Some(ColorSpec::one(PRIMARY)),
        background_color: Some(ColorSpec::one("rgba(78, 115, 223, 0.1)")),
        fill: Some(true),
        tension: Some(0.4),
        ..Default::default()
    };

    let benchmark = Dataset {
        label: Some(BENCHMARK_SERIES.to_string()),
        data: series.benchmark_values.clone(),
        border_color: Some(ColorSpec::one(SECONDARY)),
        background_color: Some(ColorSpec::one("rgba(133, 135, 150, 0.1)")),
        fill: Some(true),
        tension: Some(0.4),
        ..Default::default()
    };

    ChartConfig {
        chart_type: ChartType::Line,
        data: ChartData {
            labels: series.dates.clone(),
            datasets: vec![portfolio, benchmark],
        },
        options: json!({
            "responsive": true,
            "maintainAspectRatio": false,
            "plugins": {
                "title": { "display": true, "text": PERFORMANCE_TITLE, "font": { "size": 16 } },
                "tooltip": { "mode": "index", "intersect": false }
            },
            "scales": {
                "y": { "beginAtZero": false, "grid": { "color": GRID_COLOR } },
                "x": { "grid": { "display": false } }
            },
            "interaction": { "mode": "nearest", "axis": "x", "intersect": false }
        }),
        tooltip: TooltipFormat::new(LabelSource::Dataset, ValueFormat::Currency),
        tick_format: Some(ValueFormat::Currency),
    }
}

/// Radar of the five risk figures
pub fn risk_metrics(risk: &RiskMetrics) -> ChartConfig {
    let dataset = Dataset {
        label: Some(RISK_SERIES.to_string()),
        data: risk.values().to_vec(),
        background_color: Some(ColorSpec::one("rgba(78, 115, 223, 0.2)")),
        border_color: Some(ColorSpec::one(PRIMARY)),
        point_background_color: Some(ColorSpec::one(PRIMARY)),
        point_border_color: Some(ColorSpec::one("#fff")),
        point_hover_background_color: Some(ColorSpec::one("#fff")),
        point_hover_border_color: Some(ColorSpec::one(PRIMARY)),
        ..Default::default()
    };

    ChartConfig {
        chart_type: ChartType::Radar,
        data: ChartData {
            labels: RISK_AXES.iter().map(|s| s.to_string()).collect(),
            datasets: vec![dataset],
        },
        options: json!({
            "responsive": true,
            "maintainAspectRatio": false,
            "plugins": {
                "title": { "display": true, "text": RISK_TITLE, "font": { "size": 16 } }
            },
            "scales": {
                "r": {
                    "beginAtZero": true,
                    "ticks": { "stepSize": 0.5 },
                    "grid": { "color": GRID_COLOR }
                }
            }
        }),
        tooltip: TooltipFormat::new(LabelSource::Point, ValueFormat::Fixed2),
        tick_format: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::payload_fixture;
    use crate::charts::TooltipContext;

    #[test]
    fn test_sector_chart_is_doughnut_with_payload_labels() {
        let payload = payload_fixture();
        let config = sector_allocation(&payload.sector_allocation);

        assert_eq!(config.chart_type, ChartType::Doughnut);
        assert_eq!(config.data.labels, vec!["Banking", "IT", "Energy"]);
        assert_eq!(config.data.datasets.len(), 1);
        assert_eq!(config.data.datasets[0].data, vec![42.5, 35.25, 22.25]);
        assert_eq!(config.options["plugins"]["title"]["text"], SECTOR_TITLE);
        assert_eq!(config.options["plugins"]["legend"]["position"], "right");
    }

    #[test]
    fn test_sector_tooltip_label() {
        let payload = payload_fixture();
        let config = sector_allocation(&payload.sector_allocation);
        let ctx = TooltipContext::point("Equity", 42.5);

        assert_eq!(config.tooltip_label(&ctx), "Equity: 42.50%");
    }

    #[test]
    fn test_asset_class_chart_is_pie() {
        let payload = payload_fixture();
        let config = asset_class_distribution(&payload.asset_class_distribution);

        assert_eq!(config.chart_type, ChartType::Pie);
        assert_eq!(config.options["plugins"]["title"]["text"], ASSET_CLASS_TITLE);
        assert_eq!(
            config.tooltip_label(&TooltipContext::point("Debt", 20.0)),
            "Debt: 20.00%"
        );
    }

    #[test]
    fn test_performance_chart_series() {
        let payload = payload_fixture();
        let config = performance(&payload.performance);

        assert_eq!(config.chart_type, ChartType::Line);
        assert_eq!(config.data.labels.len(), 3);

        let labels: Vec<_> = config
            .data
            .datasets
            .iter()
            .map(|d| d.label.as_deref().unwrap_or_default())
            .collect();
        assert_eq!(labels, vec![PORTFOLIO_SERIES, BENCHMARK_SERIES]);

        for dataset in &config.data.datasets {
            assert_eq!(dataset.fill, Some(true));
            assert_eq!(dataset.tension, Some(0.4));
        }
    }

    #[test]
    fn test_performance_tooltip_and_ticks_use_currency() {
        let payload = payload_fixture();
        let config = performance(&payload.performance);
        let ctx = TooltipContext::series("2024-02-01", BENCHMARK_SERIES, 1050000.0);

        assert_eq!(config.tooltip_label(&ctx), "Benchmark (Nifty 50): ₹10,50,000");
        assert_eq!(config.tick_label(1000000.0), "₹10,00,000");
    }

    #[test]
    fn test_risk_chart_fixed_axes() {
        let payload = payload_fixture();
        let config = risk_metrics(&payload.risk_metrics);

        assert_eq!(config.chart_type, ChartType::Radar);
        assert_eq!(
            config.data.labels,
            vec!["Volatility", "Beta", "Sharpe Ratio", "Alpha", "Information Ratio"]
        );
        assert_eq!(config.data.datasets[0].data, vec![0.18, 0.87, 1.42, 0.03, 0.55]);
        assert_eq!(config.options["scales"]["r"]["ticks"]["stepSize"], 0.5);
        assert_eq!(
            config.tooltip_label(&TooltipContext::point("Beta", 0.876)),
            "Beta: 0.88"
        );
    }

    #[test]
    fn test_config_serializes_with_type_key() {
        let payload = payload_fixture();
        let json = serde_json::to_value(risk_metrics(&payload.risk_metrics)).unwrap();

        assert_eq!(json["type"], "radar");
        assert_eq!(json["tooltip"]["value"], "fixed2");
        assert_eq!(json["data"]["datasets"][0]["pointBorderColor"], "#fff");
        assert!(json.get("tickFormat").is_none());
    }
}
