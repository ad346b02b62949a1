//! Aggregates over columns with missing values.
//!
//! Every function skips missing (and NaN) cells and returns `None` when no
//! value is left to aggregate, so callers can render "N/A" instead of
//! failing on an empty table.

use std::collections::BTreeMap;

use statrs::statistics::Statistics;

/// Present, non-NaN values of a column.
pub fn present(values: &[Option<f64>]) -> Vec<f64> {
    values.iter().flatten().copied().filter(|v| !v.is_nan()).collect()
}

pub fn mean(values: &[Option<f64>]) -> Option<f64> {
    let values = present(values);
    if values.is_empty() {
        return None;
    }
    Some(Statistics::mean(values.iter()))
}

pub fn min(values: &[Option<f64>]) -> Option<f64> {
    let values = present(values);
    if values.is_empty() {
        return None;
    }
    Some(Statistics::min(values.iter()))
}

pub fn max(values: &[Option<f64>]) -> Option<f64> {
    let values = present(values);
    if values.is_empty() {
        return None;
    }
    Some(Statistics::max(values.iter()))
}

pub fn sum(values: &[Option<f64>]) -> Option<f64> {
    let values = present(values);
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum())
}

/// Sample standard deviation; needs at least two values.
pub fn std_dev(values: &[Option<f64>]) -> Option<f64> {
    let values = present(values);
    if values.len() < 2 {
        return None;
    }
    Some(Statistics::std_dev(values.iter()))
}

/// Value of the last row, `None` for an empty column or a missing last cell.
pub fn last(values: &[Option<f64>]) -> Option<f64> {
    values.last().copied().flatten().filter(|v| !v.is_nan())
}

/// Most frequent value; ties resolve to the smallest.
pub fn mode<T: Ord + Copy>(values: &[Option<T>]) -> Option<T> {
    let mut counts: BTreeMap<T, usize> = BTreeMap::new();
    for value in values.iter().flatten() {
        *counts.entry(*value).or_default() += 1;
    }

    let mut best: Option<(T, usize)> = None;
    for (value, count) in counts {
        if best.is_none_or(|(_, c)| count > c) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value)
}

/// Sum `values` per `key`, in ascending key order.
///
/// Rows with a missing key are dropped; a missing value contributes 0 to
/// its group.
pub fn group_sum(keys: &[Option<u32>], values: &[Option<f64>]) -> BTreeMap<u32, f64> {
    let mut groups: BTreeMap<u32, f64> = BTreeMap::new();
    for (key, value) in keys.iter().zip(values) {
        let Some(key) = key else { continue };
        let entry = groups.entry(*key).or_default();
        if let Some(v) = value.filter(|v| !v.is_nan()) {
            *entry += v;
        }
    }
    groups
}

/// Mean of `values` per `key`, in ascending key order. Groups with no
/// present value are left out.
pub fn group_mean(keys: &[Option<u32>], values: &[Option<f64>]) -> Vec<(u32, f64)> {
    let mut groups: BTreeMap<u32, Vec<Option<f64>>> = BTreeMap::new();
    for (key, value) in keys.iter().zip(values) {
        if let Some(key) = key {
            groups.entry(*key).or_default().push(*value);
        }
    }
    groups
        .into_iter()
        .filter_map(|(key, vals)| mean(&vals).map(|m| (key, m)))
        .collect()
}

/// Key of the largest group sum; ties resolve to the smallest key.
pub fn argmax_group_sum(keys: &[Option<u32>], values: &[Option<f64>]) -> Option<u32> {
    let mut best: Option<(u32, f64)> = None;
    for (key, total) in group_sum(keys, values) {
        if best.is_none_or(|(_, t)| total > t) {
            best = Some((key, total));
        }
    }
    best.map(|(key, _)| key)
}
