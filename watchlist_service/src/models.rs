// src/models.rs

use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

#[derive(Debug, Error)]
pub enum WatchlistError {
    #[error("Failed to open watchlist CSV '{path}': {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse watchlist CSV: {0}")]
    Malformed(#[from] csv::Error),
    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

// Struct to represent one watchlist row. Every numeric field is optional:
// an absent cell loads as None and stays out of scoring and filtering.
// Currency-denominated fields are in Crores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct StockRecord {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 32))]
    pub nse_code: String,
    pub industry: Option<String>,
    pub current_price: Option<f64>,
    pub market_cap: Option<f64>,
    pub pe: Option<f64>,
    pub roe: Option<f64>,
    pub roic: Option<f64>,
    pub debt_to_equity: Option<f64>,
    pub sales_growth_5y: Option<f64>,
    pub profit_growth_5y: Option<f64>,
    pub free_cash_flow: Option<f64>,
    pub dividend_yield: Option<f64>,
    pub npm: Option<f64>,
    pub operating_profit: Option<f64>,
    pub sales: Option<f64>,
    pub return_1y: Option<f64>,
    pub return_3y: Option<f64>,
    pub return_5y: Option<f64>,
}

impl StockRecord {
    pub fn new(name: String, nse_code: String) -> Self {
        StockRecord {
            name,
            nse_code,
            industry: None,
            current_price: None,
            market_cap: None,
            pe: None,
            roe: None,
            roic: None,
            debt_to_equity: None,
            sales_growth_5y: None,
            profit_growth_5y: None,
            free_cash_flow: None,
            dividend_yield: None,
            npm: None,
            operating_profit: None,
            sales: None,
            return_1y: None,
            return_3y: None,
            return_5y: None,
        }
    }

    // Operating profit margin in percent, derived from operating profit and
    // sales when both are reported.
    pub fn opm(&self) -> Option<f64> {
        match (self.operating_profit, self.sales) {
            (Some(profit), Some(sales)) if sales > 0.0 => Some(profit / sales * 100.0),
            _ => None,
        }
    }
}
