//! Portfolio Analytics Source
//!
//! Fetches the analytics payload that drives one dashboard cycle.
//!
//! ## Components
//!
//! - **Payload**: serde model of `GET /api/portfolio/analytics`
//! - **Client**: reqwest-backed [`AnalyticsSource`] implementation

mod client;
mod payload;

pub use client::{
    AnalyticsConfig, AnalyticsError, AnalyticsResult, AnalyticsSource, HttpAnalyticsClient,
    ANALYTICS_PATH,
};
pub use payload::{
    AllocationSeries, AnalyticsPayload, PayloadIssue, PerformanceSeries, PortfolioMetrics,
    RiskMetrics,
};

#[cfg(test)]
pub(crate) use payload::fixtures::{sample_payload as payload_fixture, SAMPLE_JSON};
