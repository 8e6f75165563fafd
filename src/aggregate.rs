//! Grouped reductions used by the report catalog
//!
//! Every function takes rows plus key/value closures, so a value can only be
//! reduced inside the group it was partitioned into. Grouped results come back
//! as `BTreeMap`s to keep iteration order deterministic.

use crate::error::{AnalyticsError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// Round half away from zero to 2 decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Unrounded arithmetic mean, `None` for an empty input
pub fn mean<I: IntoIterator<Item = f64>>(values: I) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Mean of `value_fn` per key, rounded to 2 decimals
pub fn group_average<T, K, KF, VF>(
    rows: impl IntoIterator<Item = T>,
    key_fn: KF,
    value_fn: VF,
) -> Result<BTreeMap<K, f64>>
where
    K: Ord,
    KF: Fn(&T) -> K,
    VF: Fn(&T) -> f64,
{
    let mut groups: BTreeMap<K, (f64, usize)> = BTreeMap::new();
    for row in rows {
        let entry = groups.entry(key_fn(&row)).or_insert((0.0, 0));
        entry.0 += value_fn(&row);
        entry.1 += 1;
    }

    groups
        .into_iter()
        .map(|(key, (sum, count))| {
            if count == 0 {
                return Err(AnalyticsError::EmptyGroup);
            }
            Ok((key, round2(sum / count as f64)))
        })
        .collect()
}

/// Number of rows per key satisfying `predicate`
///
/// Every key seen in `rows` is present, with 0 when no row of that key matched.
pub fn group_count<T, K, KF, P>(
    rows: impl IntoIterator<Item = T>,
    key_fn: KF,
    predicate: P,
) -> BTreeMap<K, usize>
where
    K: Ord,
    KF: Fn(&T) -> K,
    P: Fn(&T) -> bool,
{
    let mut counts = BTreeMap::new();
    for row in rows {
        let count = counts.entry(key_fn(&row)).or_insert(0);
        if predicate(&row) {
            *count += 1;
        }
    }
    counts
}

/// Sum of `value_fn` per key
pub fn group_sum<T, K, KF, VF>(
    rows: impl IntoIterator<Item = T>,
    key_fn: KF,
    value_fn: VF,
) -> BTreeMap<K, f64>
where
    K: Ord,
    KF: Fn(&T) -> K,
    VF: Fn(&T) -> f64,
{
    let mut sums = BTreeMap::new();
    for row in rows {
        *sums.entry(key_fn(&row)).or_insert(0.0) += value_fn(&row);
    }
    sums
}

/// `numerator / denominator * 100` rounded to 2 decimals, `None` if the denominator is zero
pub fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    safe_divide(numerator * 100.0, denominator)
}

/// `numerator / denominator` rounded to 2 decimals, `None` if the denominator is zero
pub fn safe_divide(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        None
    } else {
        Some(round2(numerator / denominator))
    }
}

/// The `n` keys with the largest summed value
///
/// Sorted by sum descending, ties by key ascending. Returns fewer than `n`
/// entries when there are fewer keys.
pub fn top_n<T, K, KF, VF>(
    rows: impl IntoIterator<Item = T>,
    key_fn: KF,
    value_fn: VF,
    n: usize,
) -> Vec<(K, f64)>
where
    K: Ord,
    KF: Fn(&T) -> K,
    VF: Fn(&T) -> f64,
{
    let mut ranked: Vec<(K, f64)> = group_sum(rows, key_fn, value_fn).into_iter().collect();
    ranked.sort_by(|a, b| descending(a.1, b.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(n);
    ranked
}

/// Ordering for sorting floats largest first
pub(crate) fn descending(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

/// Demographic age band
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgeBucket {
    #[serde(rename = "Under 18")]
    Under18,
    #[serde(rename = "18-25")]
    From18To25,
    #[serde(rename = "26-35")]
    From26To35,
    #[serde(rename = "36-45")]
    From36To45,
    #[serde(rename = "46-60")]
    From46To60,
    /// 61 and over
    #[serde(rename = "60+")]
    Over60,
}

impl AgeBucket {
    /// Bucket for an age in completed years
    pub fn from_age(age: u32) -> Self {
        match age {
            0..=17 => AgeBucket::Under18,
            18..=25 => AgeBucket::From18To25,
            26..=35 => AgeBucket::From26To35,
            36..=45 => AgeBucket::From36To45,
            46..=60 => AgeBucket::From46To60,
            _ => AgeBucket::Over60,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AgeBucket::Under18 => "Under 18",
            AgeBucket::From18To25 => "18-25",
            AgeBucket::From26To35 => "26-35",
            AgeBucket::From36To45 => "36-45",
            AgeBucket::From46To60 => "46-60",
            AgeBucket::Over60 => "60+",
        }
    }
}

impl fmt::Display for AgeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Age band of someone born on `birth_date`, measured on `as_of`
pub fn age_bucket(birth_date: NaiveDate, as_of: NaiveDate) -> AgeBucket {
    AgeBucket::from_age(as_of.years_since(birth_date).unwrap_or(0))
}
