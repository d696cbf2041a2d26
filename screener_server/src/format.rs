// src/format.rs

use serde::{Deserialize, Serialize};

// Traffic-light classification for a metric value against a threshold pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    Good,
    Neutral,
    Bad,
    Unknown,
}

pub fn classify(value: Option<f64>, thresholds: (f64, f64), good_high: bool) -> Signal {
    let Some(value) = value else {
        return Signal::Unknown;
    };
    let (lo, hi) = thresholds;
    if good_high {
        if value >= hi {
            Signal::Good
        } else if value >= lo {
            Signal::Neutral
        } else {
            Signal::Bad
        }
    } else if value <= lo {
        Signal::Good
    } else if value <= hi {
        Signal::Neutral
    } else {
        Signal::Bad
    }
}

// Currency values arrive already denominated in Crores.
pub fn format_currency(value: Option<f64>) -> String {
    match value {
        None => "N/A".to_string(),
        Some(v) if v == 0.0 => "N/A".to_string(),
        Some(v) if v >= 100_000.0 => format!("₹{:.0}K Cr", v / 1000.0),
        Some(v) => format!("₹{}Cr", group_thousands(v)),
    }
}

pub fn format_number(value: Option<f64>, suffix: &str) -> String {
    match value {
        None => "N/A".to_string(),
        Some(v) => format!("{v:.1}{suffix}"),
    }
}

pub fn format_price(value: Option<f64>) -> String {
    match value {
        None => "N/A".to_string(),
        Some(v) => format!("₹{v:.2}"),
    }
}

fn group_thousands(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.abs().to_string();
    let mut grouped = String::new();
    for (offset, ch) in digits.chars().enumerate() {
        if offset > 0 && (digits.len() - offset) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_good_high() {
        assert_eq!(classify(Some(20.0), (10.0, 15.0), true), Signal::Good);
        assert_eq!(classify(Some(12.0), (10.0, 15.0), true), Signal::Neutral);
        assert_eq!(classify(Some(5.0), (10.0, 15.0), true), Signal::Bad);
        assert_eq!(classify(None, (10.0, 15.0), true), Signal::Unknown);
    }

    #[test]
    fn test_classify_good_low() {
        assert_eq!(classify(Some(10.0), (15.0, 25.0), false), Signal::Good);
        assert_eq!(classify(Some(20.0), (15.0, 25.0), false), Signal::Neutral);
        assert_eq!(classify(Some(30.0), (15.0, 25.0), false), Signal::Bad);
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(None), "N/A");
        assert_eq!(format_currency(Some(0.0)), "N/A");
        assert_eq!(format_currency(Some(850.0)), "₹850Cr");
        assert_eq!(format_currency(Some(12000.0)), "₹12,000Cr");
        assert_eq!(format_currency(Some(250_000.0)), "₹250K Cr");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(None, "%"), "N/A");
        assert_eq!(format_number(Some(21.46), "%"), "21.5%");
        assert_eq!(format_number(Some(0.25), ""), "0.2");
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(None), "N/A");
        assert_eq!(format_price(Some(512.4)), "₹512.40");
    }
}
