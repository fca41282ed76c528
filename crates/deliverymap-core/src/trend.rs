//! Daily order counts and their mean.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::records::JoinedRecord;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f %z"];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyOrderCount {
    pub date: NaiveDate,
    pub orders: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderTrend {
    /// One entry per calendar date, ascending.
    pub daily: Vec<DailyOrderCount>,
    pub average_daily_orders: f64,
    /// Records excluded because their date was missing or unparseable.
    pub unparsed_dates: usize,
}

impl OrderTrend {
    #[must_use]
    pub fn average_display(&self) -> String {
        format!("{:.2}", self.average_daily_orders)
    }

    #[must_use]
    pub fn total_orders(&self) -> usize {
        self.daily.iter().map(|d| d.orders).sum()
    }
}

/// Coerce an order timestamp to its calendar date.
///
/// Time of day is discarded. Timestamps carrying an offset keep their local
/// calendar date.
#[must_use]
pub fn parse_order_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(raw, fmt) {
            return Some(dt.date_naive());
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.date());
        }
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

/// Group records by calendar date and count orders per day.
///
/// Records with a missing or unparseable date are skipped and counted in
/// [`OrderTrend::unparsed_dates`]. The average is 0 when no date parses.
#[must_use]
pub fn aggregate_daily_orders(records: &[JoinedRecord]) -> OrderTrend {
    let mut by_date: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    let mut unparsed_dates = 0_usize;

    for record in records {
        match record.order.order_date.as_deref().and_then(parse_order_date) {
            Some(date) => *by_date.entry(date).or_default() += 1,
            None => unparsed_dates += 1,
        }
    }

    if unparsed_dates > 0 {
        tracing::warn!(
            unparsed_dates,
            total = records.len(),
            "orders with unparseable dates excluded from daily trend"
        );
    }

    let daily: Vec<DailyOrderCount> = by_date
        .into_iter()
        .map(|(date, orders)| DailyOrderCount { date, orders })
        .collect();

    #[allow(clippy::cast_precision_loss)]
    let average_daily_orders = if daily.is_empty() {
        0.0
    } else {
        daily.iter().map(|d| d.orders).sum::<usize>() as f64 / daily.len() as f64
    };

    OrderTrend {
        daily,
        average_daily_orders,
        unparsed_dates,
    }
}
