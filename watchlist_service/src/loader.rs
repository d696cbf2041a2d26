// src/loader.rs

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use tracing::warn;

use crate::models::{StockRecord, WatchlistError};

// Columns the dashboard cannot render without. Everything else is optional
// and loads as None when the column or the cell is absent.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    "Name",
    "NSE Code",
    "Current Price",
    "Return on equity",
    "Price to Earning",
];

pub fn load_watchlist(path: &Path) -> Result<Vec<StockRecord>, WatchlistError> {
    let file = File::open(path).map_err(|source| WatchlistError::Unreadable {
        path: path.display().to_string(),
        source,
    })?;
    read_watchlist(file)
}

pub fn read_watchlist<R: Read>(reader: R) -> Result<Vec<StockRecord>, WatchlistError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let columns = build_header_map(&headers);

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|name| !columns.contains_key(**name))
        .map(|name| (*name).to_string())
        .collect();
    if !missing.is_empty() {
        return Err(WatchlistError::MissingColumns(missing));
    }

    let mut records = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result?;
        match parse_row(&record, &columns) {
            Some(stock) => records.push(stock),
            // Header is line 1, so the first data row is line 2.
            None => warn!(line = row + 2, "skipping row without a name or NSE code"),
        }
    }

    Ok(records)
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(index, name)| (name.trim().to_string(), index))
        .collect()
}

fn parse_row(record: &StringRecord, columns: &HashMap<String, usize>) -> Option<StockRecord> {
    let name = text_field(record, columns, "Name")?;
    let nse_code = text_field(record, columns, "NSE Code")?;

    let mut stock = StockRecord::new(name, nse_code);
    stock.industry = text_field(record, columns, "Industry");
    stock.current_price = numeric_field(record, columns, "Current Price");
    stock.market_cap = numeric_field(record, columns, "Market Capitalization");
    stock.pe = numeric_field(record, columns, "Price to Earning");
    stock.roe = numeric_field(record, columns, "Return on equity");
    stock.roic = numeric_field(record, columns, "Return on invested capital");
    stock.debt_to_equity = numeric_field(record, columns, "Debt to equity");
    stock.sales_growth_5y = numeric_field(record, columns, "Sales growth 5Years");
    stock.profit_growth_5y = numeric_field(record, columns, "Profit growth 5Years");
    stock.free_cash_flow = numeric_field(record, columns, "Free cash flow last year");
    stock.dividend_yield = numeric_field(record, columns, "Dividend yield");
    stock.npm = numeric_field(record, columns, "NPM last year");
    stock.operating_profit = numeric_field(record, columns, "Operating profit");
    stock.sales = numeric_field(record, columns, "Sales");
    stock.return_1y = numeric_field(record, columns, "Return over 1year");
    stock.return_3y = numeric_field(record, columns, "Return over 3years");
    stock.return_5y = numeric_field(record, columns, "Return over 5years");
    Some(stock)
}

fn text_field(
    record: &StringRecord,
    columns: &HashMap<String, usize>,
    column: &str,
) -> Option<String> {
    let index = *columns.get(column)?;
    let value = record.get(index)?.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn numeric_field(
    record: &StringRecord,
    columns: &HashMap<String, usize>,
    column: &str,
) -> Option<f64> {
    let index = *columns.get(column)?;
    parse_optional_f64(record.get(index)?)
}

// Lenient cell parsing: blank cells and placeholder tokens (NA, N/A, -)
// load as None rather than failing the row. Thousands separators are
// stripped before parsing.
pub fn parse_optional_f64(raw: &str) -> Option<f64> {
    let cleaned = raw.trim().replace(',', "");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok()
}
