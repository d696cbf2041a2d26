// src/filters.rs

use watchlist_service::models::StockRecord;

use crate::models::ScreenRequest;

// Apply every active filter conjunctively, producing a new view over the
// records. An inactive filter keeps every record; an active threshold
// filter drops records that do not report the field it tests.
pub fn apply_filters<'a>(
    records: &'a [StockRecord],
    request: &ScreenRequest,
) -> Vec<&'a StockRecord> {
    records
        .iter()
        .filter(|stock| matches(stock, request))
        .collect()
}

fn matches(stock: &StockRecord, request: &ScreenRequest) -> bool {
    matches_search(stock, request.search.as_deref())
        && matches_industry(stock, request.industry.as_deref())
        && (!request.quality_only || is_quality(stock))
        && (!request.high_growth || is_high_growth(stock))
        && (!request.value_only || is_value(stock))
        && (!request.dividend_only || pays_dividend(stock))
        && at_least(stock.pe, request.pe_min)
        && at_most(stock.pe, request.pe_max)
        && at_least(stock.roe, request.roe_min)
        && at_most(stock.debt_to_equity, request.de_max)
        && at_least(stock.market_cap, request.mcap_min)
}

fn matches_search(stock: &StockRecord, search: Option<&str>) -> bool {
    let Some(term) = search else {
        return true;
    };
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }
    stock.name.to_lowercase().contains(&term) || stock.nse_code.to_lowercase().contains(&term)
}

fn matches_industry(stock: &StockRecord, industry: Option<&str>) -> bool {
    match industry {
        // "All" is the dropdown's neutral entry.
        None | Some("All") => true,
        Some(selected) => stock.industry.as_deref() == Some(selected),
    }
}

// Quality stocks: profitable and conservatively financed.
fn is_quality(stock: &StockRecord) -> bool {
    stock.roe.is_some_and(|roe| roe >= 15.0)
        && stock.debt_to_equity.is_some_and(|de| de <= 0.5)
}

fn is_high_growth(stock: &StockRecord) -> bool {
    stock.sales_growth_5y.is_some_and(|growth| growth >= 15.0)
}

fn is_value(stock: &StockRecord) -> bool {
    stock.pe.is_some_and(|pe| pe <= 20.0)
}

fn pays_dividend(stock: &StockRecord) -> bool {
    stock.dividend_yield.is_some_and(|dividend_yield| dividend_yield > 0.0)
}

fn at_least(value: Option<f64>, bound: Option<f64>) -> bool {
    match bound {
        None => true,
        Some(bound) => value.is_some_and(|value| value >= bound),
    }
}

fn at_most(value: Option<f64>, bound: Option<f64>) -> bool {
    match bound {
        None => true,
        Some(bound) => value.is_some_and(|value| value <= bound),
    }
}
