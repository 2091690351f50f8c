//! Analytics Payload
//!
//! Wire model of the analytics endpoint. Field names follow the endpoint's
//! camelCase JSON.

use serde::{Deserialize, Serialize};

/// Top-level response of the analytics endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsPayload {
    pub metrics: PortfolioMetrics,
    pub sector_allocation: AllocationSeries,
    pub asset_class_distribution: AllocationSeries,
    pub performance: PerformanceSeries,
    pub risk_metrics: RiskMetrics,
}

/// Scalar summary shown in the metric cards
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PortfolioMetrics {
    #[serde(rename = "totalValue")]
    pub total_value: f64,
    #[serde(rename = "dailyPnL")]
    pub daily_pnl: f64,
    #[serde(rename = "sharpeRatio")]
    pub sharpe_ratio: f64,
    pub beta: f64,
}

/// Labelled percentages (sector allocation, asset class distribution)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllocationSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

/// Portfolio vs benchmark value history
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSeries {
    pub dates: Vec<String>,
    pub portfolio_values: Vec<f64>,
    pub benchmark_values: Vec<f64>,
}

/// Risk figures plotted on the radar chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskMetrics {
    pub volatility: f64,
    pub beta: f64,
    pub sharpe_ratio: f64,
    pub alpha: f64,
    pub information_ratio: f64,
}

impl RiskMetrics {
    /// Values in radar axis order
    pub fn values(&self) -> [f64; 5] {
        [
            self.volatility,
            self.beta,
            self.sharpe_ratio,
            self.alpha,
            self.information_ratio,
        ]
    }
}

/// A positional mismatch between a label sequence and its values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadIssue {
    pub dataset: &'static str,
    pub labels: usize,
    pub values: usize,
}

impl std::fmt::Display for PayloadIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} labels but {} values",
            self.dataset, self.labels, self.values
        )
    }
}

impl AnalyticsPayload {
    /// List label/value length mismatches.
    ///
    /// The payload is not rejected on mismatch; callers decide what to do.
    pub fn alignment_issues(&self) -> Vec<PayloadIssue> {
        let checks = [
            (
                "sectorAllocation",
                self.sector_allocation.labels.len(),
                self.sector_allocation.values.len(),
            ),
            (
                "assetClassDistribution",
                self.asset_class_distribution.labels.len(),
                self.asset_class_distribution.values.len(),
            ),
            (
                "performance.portfolioValues",
                self.performance.dates.len(),
                self.performance.portfolio_values.len(),
            ),
            (
                "performance.benchmarkValues",
                self.performance.dates.len(),
                self.performance.benchmark_values.len(),
            ),
        ];

        checks
            .into_iter()
            .filter(|(_, labels, values)| labels != values)
            .map(|(dataset, labels, values)| PayloadIssue {
                dataset,
                labels,
                values,
            })
            .collect()
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_parse_camel_case_payload() {
        let payload = sample_payload();
        assert_eq!(payload.metrics.total_value, 1234567.0);
        assert_eq!(payload.metrics.daily_pnl, -4521.5);
        assert_eq!(payload.sector_allocation.labels[0], "Banking");
        assert_eq!(payload.performance.portfolio_values.len(), 3);
        assert_eq!(payload.risk_metrics.information_ratio, 0.55);
    }

    #[test]
    fn test_risk_values_in_axis_order() {
        let payload = sample_payload();
        assert_eq!(payload.risk_metrics.values(), [0.18, 0.87, 1.42, 0.03, 0.55]);
    }

    #[test]
    fn test_alignment_issues() {
        let mut payload = sample_payload();
        assert!(payload.alignment_issues().is_empty());

        payload.sector_allocation.values.pop();
        let issues = payload.alignment_issues();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].dataset, "sectorAllocation");
        assert_eq!(issues[0].to_string(), "sectorAllocation: 3 labels but 2 values");
    }

    #[test]
    fn test_missing_section_is_rejected() {
        let result: Result<AnalyticsPayload, _> =
            serde_json::from_str(r#"{"metrics": {"totalValue": 1, "dailyPnL": 0, "sharpeRatio": 0, "beta": 0}}"#);
        assert!(result.is_err());
    }
}
