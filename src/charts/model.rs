//! Chart configuration model

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::format::{format_currency, format_fixed2, format_percent};

/// Dashboard palette: primary, success, info, warning, danger, secondary, light, dark
pub const PALETTE: [&str; 8] = [
    "#4e73df", "#1cc88a", "#36b9cc", "#f6c23e", "#e74a3b", "#858796", "#f8f9fc", "#5a5c69",
];

pub const PRIMARY: &str = PALETTE[0];
pub const SECONDARY: &str = PALETTE[5];

/// Chart kinds used by the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Doughnut,
    Pie,
    Line,
    Radar,
}

impl std::fmt::Display for ChartType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ChartType::Doughnut => "doughnut",
            ChartType::Pie => "pie",
            ChartType::Line => "line",
            ChartType::Radar => "radar",
        };
        f.write_str(name)
    }
}

/// A single color or one color per data point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    One(String),
    Many(Vec<String>),
}

impl ColorSpec {
    pub fn one(color: &str) -> Self {
        ColorSpec::One(color.to_string())
    }

    /// The full dashboard palette
    pub fn palette() -> Self {
        ColorSpec::Many(PALETTE.iter().map(|c| c.to_string()).collect())
    }
}

/// One data series
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub data: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<ColorSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<ColorSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_background_color: Option<ColorSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_border_color: Option<ColorSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_hover_background_color: Option<ColorSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_hover_border_color: Option<ColorSpec>,
}

/// Axis labels plus series
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

/// How a raw value is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueFormat {
    Percent,
    Currency,
    Fixed2,
}

impl ValueFormat {
    pub fn apply(&self, value: f64) -> String {
        match self {
            ValueFormat::Percent => format_percent(value),
            ValueFormat::Currency => format_currency(value),
            ValueFormat::Fixed2 => format_fixed2(value),
        }
    }
}

/// Which label prefixes a tooltip line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelSource {
    /// The hovered point's axis label
    Point,
    /// The hovered series' label
    Dataset,
}

/// The hovered data point, as the charting library reports it
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipContext {
    pub label: String,
    pub dataset_label: Option<String>,
    pub raw: f64,
}

impl TooltipContext {
    pub fn point(label: impl Into<String>, raw: f64) -> Self {
        Self {
            label: label.into(),
            dataset_label: None,
            raw,
        }
    }

    pub fn series(label: impl Into<String>, dataset_label: impl Into<String>, raw: f64) -> Self {
        Self {
            label: label.into(),
            dataset_label: Some(dataset_label.into()),
            raw,
        }
    }
}

/// Tooltip label callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TooltipFormat {
    pub label: LabelSource,
    pub value: ValueFormat,
}

impl TooltipFormat {
    pub const fn new(label: LabelSource, value: ValueFormat) -> Self {
        Self { label, value }
    }

    /// Text shown for the hovered point
    pub fn format(&self, ctx: &TooltipContext) -> String {
        let prefix = match self.label {
            LabelSource::Point => ctx.label.as_str(),
            LabelSource::Dataset => ctx.dataset_label.as_deref().unwrap_or_default(),
        };
        format!("{}: {}", prefix, self.value.apply(ctx.raw))
    }
}

/// Full configuration handed to the chart backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub data: ChartData,
    /// Static presentation options, passed through to the library
    pub options: Value,
    pub tooltip: TooltipFormat,
    /// Formatter for value-axis ticks, when the axis has one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tick_format: Option<ValueFormat>,
}

impl ChartConfig {
    /// Tooltip line for a hovered point
    pub fn tooltip_label(&self, ctx: &TooltipContext) -> String {
        self.tooltip.format(ctx)
    }

    /// Value-axis tick text; plain number when the axis has no formatter
    pub fn tick_label(&self, value: f64) -> String {
        match self.tick_format {
            Some(format) => format.apply(value),
            None => value.to_string(),
        }
    }
}
