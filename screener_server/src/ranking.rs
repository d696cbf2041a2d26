// src/ranking.rs

use std::cmp::Ordering;

use watchlist_service::models::StockRecord;

use crate::models::{ScoredStock, SortKey, SortOrder};

// Composite growth score: fixed weights summing to 1.0, renormalized over
// the fields a record actually reports. A record reporting nothing scores 0.
pub fn growth_score(stock: &StockRecord) -> f64 {
    let components = [
        (stock.return_1y, 0.30),
        (stock.return_3y, 0.25),
        (stock.sales_growth_5y, 0.20),
        (stock.profit_growth_5y, 0.15),
        (stock.roe, 0.10),
    ];

    let mut score = 0.0;
    let mut weights = 0.0;
    for (value, weight) in components {
        if let Some(value) = value {
            score += value * weight;
            weights += weight;
        }
    }

    if weights > 0.0 {
        score / weights
    } else {
        0.0
    }
}

// Stable sort of the scored view. Records missing the sort field order last
// in either direction, so re-sorting an already sorted view is a no-op.
pub fn sort_stocks(stocks: &mut [ScoredStock], key: SortKey, order: SortOrder) {
    stocks.sort_by(|a, b| compare(a, b, key, order));
}

fn compare(a: &ScoredStock, b: &ScoredStock, key: SortKey, order: SortOrder) -> Ordering {
    match key {
        SortKey::Name => apply_order(a.record.name.cmp(&b.record.name), order),
        SortKey::Rating => apply_order(a.rating_score.total_cmp(&b.rating_score), order),
        _ => compare_optional(numeric_key(a, key), numeric_key(b, key), order),
    }
}

fn numeric_key(stock: &ScoredStock, key: SortKey) -> Option<f64> {
    match key {
        SortKey::CurrentPrice => stock.record.current_price,
        SortKey::MarketCap => stock.record.market_cap,
        SortKey::Roe => stock.record.roe,
        SortKey::Pe => stock.record.pe,
        SortKey::SalesGrowth => stock.record.sales_growth_5y,
        SortKey::Name | SortKey::Rating => None,
    }
}

fn compare_optional(a: Option<f64>, b: Option<f64>, order: SortOrder) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => apply_order(a.total_cmp(&b), order),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn apply_order(ordering: Ordering, order: SortOrder) -> Ordering {
    match order {
        SortOrder::Ascending => ordering,
        SortOrder::Descending => ordering.reverse(),
    }
}

// Top entries for one leaderboard metric, highest first; records not
// reporting the metric are dropped, never fabricated.
pub fn leaderboard<'a, F>(
    records: &[&'a StockRecord],
    metric: F,
    limit: usize,
) -> Vec<(&'a StockRecord, f64)>
where
    F: Fn(&StockRecord) -> Option<f64>,
{
    let mut entries: Vec<(&StockRecord, f64)> = records
        .iter()
        .filter_map(|stock| metric(stock).map(|value| (*stock, value)))
        .collect();
    entries.sort_by(|a, b| b.1.total_cmp(&a.1));
    entries.truncate(limit);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Rating;
    use crate::rating::rate;

    fn scored(name: &str, price: Option<f64>, roe: Option<f64>) -> ScoredStock {
        let mut record = StockRecord::new(name.to_string(), name.to_string());
        record.current_price = price;
        record.roe = roe;
        let outcome = rate(&record);
        ScoredStock {
            record,
            rating: outcome.rating,
            rating_color: outcome.rating.color().to_string(),
            rating_score: outcome.normalized,
            price_display: String::new(),
            market_cap_display: String::new(),
        }
    }

    #[test]
    fn test_growth_score_renormalizes_weights() {
        let mut stock = StockRecord::new("Acme".to_string(), "ACME".to_string());
        stock.return_1y = Some(24.0);
        stock.return_3y = Some(18.0);
        stock.sales_growth_5y = Some(17.0);
        stock.profit_growth_5y = Some(16.0);
        stock.roe = Some(21.5);

        let full = growth_score(&stock);
        let expected =
            24.0 * 0.30 + 18.0 * 0.25 + 17.0 * 0.20 + 16.0 * 0.15 + 21.5 * 0.10;
        assert!((full - expected).abs() < 1e-9);

        // Dropping fields renormalizes over the remaining weights.
        stock.return_3y = None;
        stock.profit_growth_5y = None;
        let partial = growth_score(&stock);
        let expected = (24.0 * 0.30 + 17.0 * 0.20 + 21.5 * 0.10) / 0.60;
        assert!((partial - expected).abs() < 1e-9);
    }

    #[test]
    fn test_growth_score_empty_record() {
        let stock = StockRecord::new("Acme".to_string(), "ACME".to_string());
        assert!((growth_score(&stock) - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_sort_is_stable_and_idempotent() {
        let mut stocks = vec![
            scored("Delta", Some(10.0), None),
            scored("Alpha", Some(30.0), None),
            scored("Echo", None, None),
            scored("Bravo", Some(30.0), None),
            scored("Charlie", None, None),
        ];

        sort_stocks(&mut stocks, SortKey::CurrentPrice, SortOrder::Descending);
        let names: Vec<String> = stocks.iter().map(|s| s.record.name.clone()).collect();
        // Ties keep input order; missing prices go last.
        assert_eq!(names, vec!["Alpha", "Bravo", "Delta", "Echo", "Charlie"]);

        sort_stocks(&mut stocks, SortKey::CurrentPrice, SortOrder::Descending);
        let again: Vec<String> = stocks.iter().map(|s| s.record.name.clone()).collect();
        assert_eq!(names, again);
    }

    #[test]
    fn test_missing_values_sort_last_ascending_too() {
        let mut stocks = vec![
            scored("Echo", None, None),
            scored("Delta", Some(10.0), None),
            scored("Alpha", Some(30.0), None),
        ];
        sort_stocks(&mut stocks, SortKey::CurrentPrice, SortOrder::Ascending);
        let names: Vec<&str> = stocks.iter().map(|s| s.record.name.as_str()).collect();
        assert_eq!(names, vec!["Delta", "Alpha", "Echo"]);
    }

    #[test]
    fn test_rating_sort_uses_score_not_label() {
        let mut stocks = vec![
            scored("LowRoe", None, Some(5.0)),
            scored("HighRoe", None, Some(22.0)),
            scored("MidRoe", None, Some(12.0)),
        ];
        sort_stocks(&mut stocks, SortKey::Rating, SortOrder::Descending);
        let names: Vec<&str> = stocks.iter().map(|s| s.record.name.as_str()).collect();
        assert_eq!(names, vec!["HighRoe", "MidRoe", "LowRoe"]);
        assert_eq!(stocks[0].rating, Rating::Excellent);
    }

    #[test]
    fn test_leaderboard_drops_missing_and_truncates() {
        let mut a = StockRecord::new("A".to_string(), "A".to_string());
        a.roe = Some(10.0);
        let mut b = StockRecord::new("B".to_string(), "B".to_string());
        b.roe = Some(30.0);
        let c = StockRecord::new("C".to_string(), "C".to_string());
        let mut d = StockRecord::new("D".to_string(), "D".to_string());
        d.roe = Some(20.0);

        let records = [&a, &b, &c, &d];
        let top = leaderboard(&records, |s| s.roe, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].0.name, "B");
        assert_eq!(top[1].0.name, "D");
    }
}
