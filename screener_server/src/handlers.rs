// src/handlers.rs

use std::collections::HashMap;

use actix_web::{get, post, web, HttpResponse, Responder};
use validator::Validate;
use watchlist_service::models::StockRecord;

use crate::filters::apply_filters;
use crate::format::{classify, format_currency, format_number, format_price};
use crate::models::{
    DescriptiveStats, ErrorResponse, GrowthChampion, IndustryCount, Leaderboard,
    LeaderboardEntry, MetricCard, MetricValue, OverviewResponse, PerformanceSummary,
    PeriodReturn, Rating, RatingCount, RankingsResponse, ScoredStock, ScreenRequest,
    ScreenResponse, SmallCapPick, SortKey, SortOrder, StockDetailResponse, TopPicksResponse,
    ValuePick,
};
use crate::ranking::{growth_score, leaderboard, sort_stocks};
use crate::rating::rate;
use crate::AppState;

const RATING_ORDER: [Rating; 5] = [
    Rating::Excellent,
    Rating::Good,
    Rating::Average,
    Rating::BelowAverage,
    Rating::Poor,
];

#[post("/screen")]
pub async fn screen(
    state: web::Data<AppState>,
    request: web::Json<ScreenRequest>,
) -> impl Responder {
    let request = request.into_inner();
    if let Some(response) = reject_invalid(&request) {
        return response;
    }

    let filtered = apply_filters(&state.records, &request);
    let mut stocks: Vec<ScoredStock> = filtered.iter().map(|stock| score_stock(stock)).collect();
    sort_stocks(&mut stocks, request.sort_by, request.sort_order);

    let excellent_count = stocks
        .iter()
        .filter(|stock| stock.rating == Rating::Excellent)
        .count();

    HttpResponse::Ok().json(ScreenResponse {
        success: true,
        message: state.load_warning.clone(),
        as_of: state.loaded_at,
        total: state.records.len(),
        matched: stocks.len(),
        avg_roe: mean(&filtered, |stock| stock.roe),
        avg_pe: mean(&filtered, |stock| stock.pe),
        excellent_count,
        rating_distribution: rating_distribution(&stocks),
        stocks,
    })
}

#[post("/overview")]
pub async fn overview(
    state: web::Data<AppState>,
    request: web::Json<ScreenRequest>,
) -> impl Responder {
    let request = request.into_inner();
    if let Some(response) = reject_invalid(&request) {
        return response;
    }

    let filtered = apply_filters(&state.records, &request);
    let stocks: Vec<ScoredStock> = filtered.iter().map(|stock| score_stock(stock)).collect();

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for stock in &filtered {
        if let Some(industry) = stock.industry.as_deref() {
            *counts.entry(industry).or_insert(0) += 1;
        }
    }
    let mut industry_distribution: Vec<IndustryCount> = counts
        .into_iter()
        .map(|(industry, count)| IndustryCount {
            industry: industry.to_string(),
            count,
        })
        .collect();
    industry_distribution.sort_by(|a, b| b.count.cmp(&a.count).then(a.industry.cmp(&b.industry)));
    industry_distribution.truncate(10);

    let pe_values: Vec<f64> = filtered.iter().filter_map(|stock| stock.pe).collect();
    let roe_values: Vec<f64> = filtered.iter().filter_map(|stock| stock.roe).collect();

    HttpResponse::Ok().json(OverviewResponse {
        success: true,
        message: state.load_warning.clone(),
        industry_distribution,
        rating_breakdown: rating_distribution(&stocks),
        pe_stats: DescriptiveStats::from_values(pe_values),
        roe_stats: DescriptiveStats::from_values(roe_values),
    })
}

#[post("/rankings")]
pub async fn rankings(
    state: web::Data<AppState>,
    request: web::Json<ScreenRequest>,
) -> impl Responder {
    let request = request.into_inner();
    if let Some(response) = reject_invalid(&request) {
        return response;
    }

    let filtered = apply_filters(&state.records, &request);

    // Growth and returns ranking over the composite score.
    let mut ranked: Vec<(&StockRecord, f64)> = filtered
        .iter()
        .map(|stock| (*stock, growth_score(stock)))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    let champions: Vec<GrowthChampion> = ranked
        .iter()
        .take(15)
        .enumerate()
        .map(|(index, (stock, score))| GrowthChampion {
            rank: index + 1,
            name: stock.name.clone(),
            nse_code: stock.nse_code.clone(),
            industry: stock.industry.clone(),
            growth_score: *score,
            return_1y: stock.return_1y,
            return_3y: stock.return_3y,
            roe: stock.roe,
        })
        .collect();

    let metrics: [(&str, fn(&StockRecord) -> Option<f64>); 8] = [
        ("return_1y", |s| s.return_1y),
        ("return_3y", |s| s.return_3y),
        ("roe", |s| s.roe),
        ("roic", |s| s.roic),
        ("npm", |s| s.npm),
        ("opm", |s| s.opm().filter(|opm| *opm > 0.0)),
        ("sales_growth_5y", |s| s.sales_growth_5y),
        ("profit_growth_5y", |s| s.profit_growth_5y),
    ];
    let leaderboards: Vec<Leaderboard> = metrics
        .iter()
        .map(|(name, metric)| Leaderboard {
            metric: (*name).to_string(),
            entries: leaderboard(&filtered, metric, 15)
                .into_iter()
                .map(|(stock, value)| LeaderboardEntry {
                    name: stock.name.clone(),
                    value,
                })
                .collect(),
        })
        .collect();

    // Best value picks: cheap relative to profitability.
    let mut value_picks: Vec<ValuePick> = filtered
        .iter()
        .filter_map(|stock| match (stock.pe, stock.roe) {
            (Some(pe), Some(roe)) if pe > 0.0 && pe < 100.0 => Some(ValuePick {
                name: stock.name.clone(),
                pe,
                roe,
                value_score: roe / pe,
            }),
            _ => None,
        })
        .collect();
    value_picks.sort_by(|a, b| b.value_score.total_cmp(&a.value_score));
    value_picks.truncate(10);

    // Small cap, high growth: under 10,000 Cr with sales growth above 15%.
    let mut small_cap_growth: Vec<SmallCapPick> = filtered
        .iter()
        .filter_map(|stock| match (stock.market_cap, stock.sales_growth_5y) {
            (Some(market_cap), Some(growth)) if market_cap < 10_000.0 && growth > 15.0 => {
                Some(SmallCapPick {
                    name: stock.name.clone(),
                    market_cap,
                    market_cap_display: format_currency(Some(market_cap)),
                    sales_growth_5y: growth,
                })
            }
            _ => None,
        })
        .collect();
    small_cap_growth.sort_by(|a, b| b.sales_growth_5y.total_cmp(&a.sales_growth_5y));
    small_cap_growth.truncate(8);

    let summary = PerformanceSummary {
        avg_return_1y: mean(&filtered, |stock| stock.return_1y),
        best_return_1y: fold_max(&filtered, |stock| stock.return_1y),
        avg_roe: mean(&filtered, |stock| stock.roe),
        best_roe: fold_max(&filtered, |stock| stock.roe),
        avg_sales_growth: mean(&filtered, |stock| stock.sales_growth_5y),
        best_sales_growth: fold_max(&filtered, |stock| stock.sales_growth_5y),
        avg_pe: mean(&filtered, |stock| stock.pe),
        lowest_pe: fold_min(&filtered, |stock| stock.pe),
    };

    HttpResponse::Ok().json(RankingsResponse {
        success: true,
        message: state.load_warning.clone(),
        champions,
        leaderboards,
        value_picks,
        small_cap_growth,
        summary,
    })
}

#[post("/top-picks")]
pub async fn top_picks(
    state: web::Data<AppState>,
    request: web::Json<ScreenRequest>,
) -> impl Responder {
    let request = request.into_inner();
    if let Some(response) = reject_invalid(&request) {
        return response;
    }

    let filtered = apply_filters(&state.records, &request);
    let stocks: Vec<ScoredStock> = filtered.iter().map(|stock| score_stock(stock)).collect();

    let excellent: Vec<ScoredStock> = stocks
        .iter()
        .filter(|stock| stock.rating == Rating::Excellent)
        .take(10)
        .cloned()
        .collect();
    let good: Vec<ScoredStock> = stocks
        .iter()
        .filter(|stock| stock.rating == Rating::Good)
        .take(8)
        .cloned()
        .collect();

    // Nothing rated well: fall back to the most profitable of what's left.
    let best_available = if excellent.is_empty() && good.is_empty() {
        let mut by_roe = stocks.clone();
        sort_stocks(&mut by_roe, SortKey::Roe, SortOrder::Descending);
        by_roe.truncate(5);
        by_roe
    } else {
        Vec::new()
    };

    HttpResponse::Ok().json(TopPicksResponse {
        success: true,
        message: state.load_warning.clone(),
        excellent,
        good,
        best_available,
    })
}

#[get("/stocks/{code}")]
pub async fn stock_detail(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let code = path.into_inner();
    let Some(record) = state
        .records
        .iter()
        .find(|stock| stock.nse_code.eq_ignore_ascii_case(&code))
    else {
        return HttpResponse::NotFound()
            .json(ErrorResponse::new(format!("No stock with NSE code '{code}'")));
    };

    let stock = score_stock(record);

    let scorecard = vec![
        MetricCard {
            label: "P/E".to_string(),
            value: format_number(record.pe, ""),
            signal: classify(record.pe, (15.0, 25.0), false),
        },
        MetricCard {
            label: "ROE".to_string(),
            value: format_number(record.roe, "%"),
            signal: classify(record.roe, (10.0, 15.0), true),
        },
        MetricCard {
            label: "D/E".to_string(),
            value: format_number(record.debt_to_equity, ""),
            signal: classify(record.debt_to_equity, (0.5, 1.0), false),
        },
        MetricCard {
            label: "1Y Return".to_string(),
            value: format_number(record.return_1y, "%"),
            signal: classify(record.return_1y, (0.0, 15.0), true),
        },
    ];

    let optional_metrics: [(&str, Option<f64>, &str); 4] = [
        ("ROIC", record.roic, "%"),
        ("Net Profit Margin", record.npm, "%"),
        ("Sales Growth (5Y)", record.sales_growth_5y, "%"),
        ("Dividend Yield", record.dividend_yield, "%"),
    ];
    let additional_metrics: Vec<MetricValue> = optional_metrics
        .iter()
        .filter(|(_, value, _)| value.is_some())
        .map(|(label, value, suffix)| MetricValue {
            label: (*label).to_string(),
            value: format_number(*value, suffix),
        })
        .collect();

    let returns: Vec<PeriodReturn> = [
        ("1Y", record.return_1y),
        ("3Y", record.return_3y),
        ("5Y", record.return_5y),
    ]
    .iter()
    .filter_map(|(period, value)| {
        value.map(|value| PeriodReturn {
            period: (*period).to_string(),
            value,
        })
    })
    .collect();

    HttpResponse::Ok().json(StockDetailResponse {
        success: true,
        stock,
        scorecard,
        additional_metrics,
        strengths: strengths(record),
        risks: risks(record),
        returns,
    })
}

#[get("/industries")]
pub async fn industries(state: web::Data<AppState>) -> impl Responder {
    let mut list: Vec<String> = state
        .records
        .iter()
        .filter_map(|stock| stock.industry.clone())
        .collect();
    list.sort();
    list.dedup();
    HttpResponse::Ok().json(list)
}

#[get("/health")]
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("OK")
}

// Derive validation plus the one cross-field check the derive can't express.
fn reject_invalid(request: &ScreenRequest) -> Option<HttpResponse> {
    if let Err(err) = request.validate() {
        return Some(
            HttpResponse::BadRequest()
                .json(ErrorResponse::new(format!("Invalid filter request: {err}"))),
        );
    }
    if let (Some(min), Some(max)) = (request.pe_min, request.pe_max) {
        if min > max {
            return Some(HttpResponse::BadRequest().json(ErrorResponse::new(
                "P/E range lower bound exceeds upper bound",
            )));
        }
    }
    None
}

fn score_stock(record: &StockRecord) -> ScoredStock {
    let outcome = rate(record);
    ScoredStock {
        record: record.clone(),
        rating: outcome.rating,
        rating_color: outcome.rating.color().to_string(),
        rating_score: outcome.normalized,
        price_display: format_price(record.current_price),
        market_cap_display: format_currency(record.market_cap),
    }
}

fn rating_distribution(stocks: &[ScoredStock]) -> Vec<RatingCount> {
    RATING_ORDER
        .iter()
        .filter_map(|rating| {
            let count = stocks.iter().filter(|stock| stock.rating == *rating).count();
            (count > 0).then_some(RatingCount {
                rating: *rating,
                count,
            })
        })
        .collect()
}

fn mean<F>(records: &[&StockRecord], field: F) -> Option<f64>
where
    F: Fn(&StockRecord) -> Option<f64>,
{
    let values: Vec<f64> = records.iter().filter_map(|stock| field(stock)).collect();
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

fn fold_max<F>(records: &[&StockRecord], field: F) -> Option<f64>
where
    F: Fn(&StockRecord) -> Option<f64>,
{
    records
        .iter()
        .filter_map(|stock| field(stock))
        .max_by(f64::total_cmp)
}

fn fold_min<F>(records: &[&StockRecord], field: F) -> Option<f64>
where
    F: Fn(&StockRecord) -> Option<f64>,
{
    records
        .iter()
        .filter_map(|stock| field(stock))
        .min_by(f64::total_cmp)
}

fn strengths(record: &StockRecord) -> Vec<String> {
    let mut strengths = Vec::new();
    if let Some(roe) = record.roe.filter(|roe| *roe >= 15.0) {
        strengths.push(format!("Strong profitability (ROE: {roe:.1}%)"));
    }
    if let Some(de) = record.debt_to_equity.filter(|de| *de <= 0.5) {
        strengths.push(format!("Conservative debt levels (D/E: {de:.2})"));
    }
    if let Some(pe) = record.pe.filter(|pe| *pe > 0.0 && *pe <= 20.0) {
        strengths.push(format!("Reasonable valuation (P/E: {pe:.1})"));
    }
    if let Some(growth) = record.sales_growth_5y.filter(|growth| *growth >= 15.0) {
        strengths.push(format!("Strong growth trajectory ({growth:.1}% sales growth)"));
    }
    if record.free_cash_flow.is_some_and(|fcf| fcf > 0.0) {
        strengths.push("Positive cash generation".to_string());
    }
    strengths
}

fn risks(record: &StockRecord) -> Vec<String> {
    let mut risks = Vec::new();
    if let Some(pe) = record.pe.filter(|pe| *pe > 25.0) {
        risks.push(format!("High valuation (P/E: {pe:.1})"));
    }
    if let Some(de) = record.debt_to_equity.filter(|de| *de > 1.0) {
        risks.push(format!("High debt burden (D/E: {de:.2})"));
    }
    if let Some(roe) = record.roe.filter(|roe| *roe < 10.0) {
        risks.push(format!("Below-average profitability (ROE: {roe:.1}%)"));
    }
    if record.sales_growth_5y.is_some_and(|growth| growth < 5.0) {
        risks.push("Slow growth trajectory".to_string());
    }
    if record.free_cash_flow.is_some_and(|fcf| fcf < 0.0) {
        risks.push("Negative cash flow".to_string());
    }
    risks
}
