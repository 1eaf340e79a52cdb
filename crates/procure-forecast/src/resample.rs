//! Regularising demand history to a fixed-frequency series (§4.B step 1).

use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;

use procure_core::DemandHistory;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    Weekly,
    Monthly,
}

impl Frequency {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "M" | "m" | "monthly" => Frequency::Monthly,
            _ => Frequency::Weekly,
        }
    }

    pub fn step(self) -> Duration {
        match self {
            Frequency::Weekly => Duration::weeks(1),
            Frequency::Monthly => Duration::days(30),
        }
    }

    /// Weekly seasonality repeats yearly (52 periods); monthly repeats
    /// yearly too (12 periods).
    pub fn seasonal_periods(self) -> usize {
        match self {
            Frequency::Weekly => 52,
            Frequency::Monthly => 12,
        }
    }
}

/// One period's label and summed quantity.
#[derive(Debug, Clone, Copy)]
pub struct Period {
    pub date: DateTime<Utc>,
    pub qty: f64,
}

/// Sum-aggregate `rows` into consecutive `frequency` buckets spanning the
/// full observed range, filling any bucket with no rows as 0.
pub fn resample(rows: &[DemandHistory], frequency: Frequency) -> Vec<Period> {
    if rows.is_empty() {
        return Vec::new();
    }
    let mut sorted: Vec<&DemandHistory> = rows.iter().collect();
    sorted.sort_by_key(|r| r.date);

    let start = sorted[0].date;
    let step_secs = frequency.step().num_seconds().max(1);

    let mut buckets: BTreeMap<i64, f64> = BTreeMap::new();
    let mut max_idx = 0i64;
    for row in &sorted {
        let idx = (row.date - start).num_seconds() / step_secs;
        *buckets.entry(idx).or_insert(0.0) += row.qty;
        max_idx = max_idx.max(idx);
    }

    let mut periods = Vec::with_capacity(max_idx as usize + 1);
    for idx in 0..=max_idx {
        let qty = *buckets.get(&idx).unwrap_or(&0.0);
        let date = start + frequency.step() * idx as i32;
        periods.push(Period { date, qty });
    }
    periods
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use procure_core::{LocationId, ProductId};

    fn row(days_from_epoch: i64, qty: f64) -> DemandHistory {
        DemandHistory {
            product_id: ProductId::new(),
            location_id: LocationId::new(),
            date: Utc.timestamp_opt(0, 0).unwrap() + Duration::days(days_from_epoch),
            qty,
        }
    }

    #[test]
    fn fills_missing_weeks_with_zero() {
        let rows = vec![row(0, 10.0), row(21, 5.0)];
        let periods = resample(&rows, Frequency::Weekly);
        assert_eq!(periods.len(), 4);
        assert_eq!(periods[0].qty, 10.0);
        assert_eq!(periods[1].qty, 0.0);
        assert_eq!(periods[2].qty, 0.0);
        assert_eq!(periods[3].qty, 5.0);
    }

    #[test]
    fn sums_same_bucket_observations() {
        let rows = vec![row(0, 4.0), row(1, 6.0), row(2, 1.0)];
        let periods = resample(&rows, Frequency::Weekly);
        assert_eq!(periods.len(), 1);
        assert_eq!(periods[0].qty, 11.0);
    }
}
