// src/models.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;
use watchlist_service::models::StockRecord;

use crate::format::Signal;

// Sort keys offered by the screening table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Name,
    CurrentPrice,
    MarketCap,
    Roe,
    Pe,
    Rating,
    SalesGrowth,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

// Filter and sort state shared by every screening view. A field left at its
// default (empty search, no industry, false flag, absent threshold) keeps
// the corresponding filter inactive.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ScreenRequest {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub quality_only: bool,
    #[serde(default)]
    pub high_growth: bool,
    #[serde(default)]
    pub value_only: bool,
    #[serde(default)]
    pub dividend_only: bool,
    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub pe_min: Option<f64>,
    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub pe_max: Option<f64>,
    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub roe_min: Option<f64>,
    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub de_max: Option<f64>,
    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub mcap_min: Option<f64>,
    #[serde(default)]
    pub sort_by: SortKey,
    #[serde(default)]
    pub sort_order: SortOrder,
}

// Quality rating buckets, ordered worst to best so that Ord matches the
// qualitative order. Labels serialize as their display text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rating {
    #[serde(rename = "Poor")]
    Poor,
    #[serde(rename = "Below Average")]
    BelowAverage,
    #[serde(rename = "Average")]
    Average,
    #[serde(rename = "Good")]
    Good,
    #[serde(rename = "Excellent")]
    Excellent,
}

impl Rating {
    pub fn label(self) -> &'static str {
        match self {
            Rating::Excellent => "Excellent",
            Rating::Good => "Good",
            Rating::Average => "Average",
            Rating::BelowAverage => "Below Average",
            Rating::Poor => "Poor",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Rating::Excellent => "#2e7d32",
            Rating::Good => "#1976d2",
            Rating::Average => "#f57c00",
            Rating::BelowAverage => "#ff6f00",
            Rating::Poor => "#d32f2f",
        }
    }
}

// One screened row: the record plus its derived rating and display values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredStock {
    #[serde(flatten)]
    pub record: StockRecord,
    pub rating: Rating,
    pub rating_color: String,
    pub rating_score: f64,
    pub price_display: String,
    pub market_cap_display: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        ErrorResponse {
            success: false,
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RatingCount {
    pub rating: Rating,
    pub count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ScreenResponse {
    pub success: bool,
    pub message: Option<String>,
    pub as_of: DateTime<Utc>,
    pub total: usize,
    pub matched: usize,
    pub avg_roe: Option<f64>,
    pub avg_pe: Option<f64>,
    pub excellent_count: usize,
    pub rating_distribution: Vec<RatingCount>,
    pub stocks: Vec<ScoredStock>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct IndustryCount {
    pub industry: String,
    pub count: usize,
}

// Summary statistics block: count, mean, sample std and the five-number
// summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DescriptiveStats {
    pub count: usize,
    pub mean: f64,
    pub std: Option<f64>,
    pub min: f64,
    pub p25: f64,
    pub median: f64,
    pub p75: f64,
    pub max: f64,
}

impl DescriptiveStats {
    pub fn from_values(mut values: Vec<f64>) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        values.sort_by(f64::total_cmp);

        let count = values.len();
        let mean = values.iter().sum::<f64>() / count as f64;
        let std = if count > 1 {
            let variance = values
                .iter()
                .map(|value| (value - mean).powi(2))
                .sum::<f64>()
                / (count - 1) as f64;
            Some(variance.sqrt())
        } else {
            None
        };

        Some(DescriptiveStats {
            count,
            mean,
            std,
            min: values[0],
            p25: percentile(&values, 0.25),
            median: percentile(&values, 0.50),
            p75: percentile(&values, 0.75),
            max: values[count - 1],
        })
    }
}

// Linear interpolation between order statistics, over a sorted slice.
fn percentile(sorted: &[f64], q: f64) -> f64 {
    let position = (sorted.len() - 1) as f64 * q;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    if lower == upper {
        sorted[lower]
    } else {
        let fraction = position - lower as f64;
        sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OverviewResponse {
    pub success: bool,
    pub message: Option<String>,
    pub industry_distribution: Vec<IndustryCount>,
    pub rating_breakdown: Vec<RatingCount>,
    pub pe_stats: Option<DescriptiveStats>,
    pub roe_stats: Option<DescriptiveStats>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GrowthChampion {
    pub rank: usize,
    pub name: String,
    pub nse_code: String,
    pub industry: Option<String>,
    pub growth_score: f64,
    pub return_1y: Option<f64>,
    pub return_3y: Option<f64>,
    pub roe: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Leaderboard {
    pub metric: String,
    pub entries: Vec<LeaderboardEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ValuePick {
    pub name: String,
    pub pe: f64,
    pub roe: f64,
    pub value_score: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SmallCapPick {
    pub name: String,
    pub market_cap: f64,
    pub market_cap_display: String,
    pub sales_growth_5y: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PerformanceSummary {
    pub avg_return_1y: Option<f64>,
    pub best_return_1y: Option<f64>,
    pub avg_roe: Option<f64>,
    pub best_roe: Option<f64>,
    pub avg_sales_growth: Option<f64>,
    pub best_sales_growth: Option<f64>,
    pub avg_pe: Option<f64>,
    pub lowest_pe: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RankingsResponse {
    pub success: bool,
    pub message: Option<String>,
    pub champions: Vec<GrowthChampion>,
    pub leaderboards: Vec<Leaderboard>,
    pub value_picks: Vec<ValuePick>,
    pub small_cap_growth: Vec<SmallCapPick>,
    pub summary: PerformanceSummary,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TopPicksResponse {
    pub success: bool,
    pub message: Option<String>,
    pub excellent: Vec<ScoredStock>,
    pub good: Vec<ScoredStock>,
    pub best_available: Vec<ScoredStock>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MetricCard {
    pub label: String,
    pub value: String,
    pub signal: Signal,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MetricValue {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PeriodReturn {
    pub period: String,
    pub value: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StockDetailResponse {
    pub success: bool,
    pub stock: ScoredStock,
    pub scorecard: Vec<MetricCard>,
    pub additional_metrics: Vec<MetricValue>,
    pub strengths: Vec<String>,
    pub risks: Vec<String>,
    pub returns: Vec<PeriodReturn>,
}
