//! Client-side sorting of catalog items.

use crate::api::Item;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Field the catalog grid is sorted by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Price,
    Rating,
    #[default]
    Rank,
}

impl std::str::FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "price" => Ok(SortField::Price),
            "rating" => Ok(SortField::Rating),
            "rank" => Ok(SortField::Rank),
            _ => Err(format!("Unknown sort field: {}. Use: price, rating, rank", s)),
        }
    }
}

impl std::fmt::Display for SortField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortField::Price => write!(f, "price"),
            SortField::Rating => write!(f, "rating"),
            SortField::Rank => write!(f, "rank"),
        }
    }
}

/// Direction of the catalog sort.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Asc),
            "desc" | "descending" => Ok(SortOrder::Desc),
            _ => Err(format!("Unknown sort order: {}. Use: asc, desc", s)),
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortOrder::Asc => write!(f, "asc"),
            SortOrder::Desc => write!(f, "desc"),
        }
    }
}

/// Parses the longest numeric prefix of `s`, ignoring leading whitespace.
///
/// `"12.5 USD"` yields 12.5, `"N/A"` yields `None`. Only digit forms are
/// accepted: `"Infinity"` and `"NaN"` yield `None`.
pub fn parse_leading_float(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    // Exponent only counts when followed by at least one digit
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}

/// Numeric value of a display price such as `"$1,299.99"`; 0 when missing or unparseable.
pub fn price_value(price: Option<&str>) -> f64 {
    price
        .map(|p| p.replace(['$', ','], ""))
        .and_then(|p| parse_leading_float(&p))
        .unwrap_or(0.0)
}

/// Numeric value of a display rating such as `"4.5 out of 5 stars"`; 0 when missing or unparseable.
pub fn rating_value(rating: Option<&str>) -> f64 {
    rating
        .and_then(|r| r.split(' ').next())
        .and_then(parse_leading_float)
        .unwrap_or(0.0)
}

/// Sort key of an item for the given field.
pub fn sort_key(item: &Item, field: SortField) -> f64 {
    match field {
        SortField::Price => price_value(item.price.as_deref()),
        SortField::Rating => rating_value(item.rating.as_deref()),
        SortField::Rank => item.rank as f64,
    }
}

/// Sorts items in place. The sort is stable, so equal keys keep server order.
pub fn sort_items(items: &mut [Item], field: SortField, order: SortOrder) {
    items.sort_by(|a, b| {
        let ord = sort_key(a, field).partial_cmp(&sort_key(b, field)).unwrap_or(Ordering::Equal);
        match order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });
}
