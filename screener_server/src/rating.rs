// src/rating.rs

use watchlist_service::models::StockRecord;

use crate::models::Rating;

// Outcome of the weighted point system for one record. `factors` is the
// maximum points actually evaluated: a field contributes to the denominator
// only when it is present, so missing data re-weights the remaining factors
// instead of dragging the score toward zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingOutcome {
    pub score: u32,
    pub factors: u32,
    pub normalized: f64,
    pub rating: Rating,
}

pub fn rate(stock: &StockRecord) -> RatingOutcome {
    let mut score = 0;
    let mut factors = 0;

    // ROE carries the most weight.
    if let Some(roe) = stock.roe {
        score += roe_points(roe);
        factors += 3;
    }

    if let Some(de) = stock.debt_to_equity {
        score += debt_to_equity_points(de);
        factors += 2;
    }

    // A non-positive P/E means negative earnings, treat it as absent.
    if let Some(pe) = stock.pe.filter(|pe| *pe > 0.0) {
        score += pe_points(pe);
        factors += 2;
    }

    if let Some(growth) = stock.sales_growth_5y {
        if growth >= 15.0 {
            score += 1;
        }
        factors += 1;
    }

    if let Some(growth) = stock.profit_growth_5y {
        if growth >= 15.0 {
            score += 1;
        }
        factors += 1;
    }

    if let Some(fcf) = stock.free_cash_flow {
        if fcf > 0.0 {
            score += 1;
        }
        factors += 1;
    }

    let normalized = if factors > 0 {
        f64::from(score) / f64::from(factors) * 5.0
    } else {
        0.0
    };

    RatingOutcome {
        score,
        factors,
        normalized,
        rating: bucket(normalized),
    }
}

fn roe_points(roe: f64) -> u32 {
    if roe >= 20.0 {
        3
    } else if roe >= 15.0 {
        2
    } else if roe >= 10.0 {
        1
    } else {
        0
    }
}

fn debt_to_equity_points(de: f64) -> u32 {
    if de <= 0.3 {
        2
    } else if de <= 0.7 {
        1
    } else {
        0
    }
}

fn pe_points(pe: f64) -> u32 {
    if pe <= 12.0 {
        2
    } else if pe <= 20.0 {
        1
    } else {
        0
    }
}

fn bucket(normalized: f64) -> Rating {
    if normalized >= 4.0 {
        Rating::Excellent
    } else if normalized >= 3.0 {
        Rating::Good
    } else if normalized >= 2.0 {
        Rating::Average
    } else if normalized >= 1.0 {
        Rating::BelowAverage
    } else {
        Rating::Poor
    }
}
