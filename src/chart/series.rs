// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::collections::HashMap;

use chrono::Datelike;
use chrono::Duration;
use chrono::NaiveDate;

/// Lower bound for percentage axes.
const PERCENT_MIN: f64 = 0.0;

/// Upper bound for percentage axes.
const PERCENT_MAX: f64 = 100.0;

/// Headroom added above and below percentage data.
const PERCENT_PAD: f64 = 10.0;

/// One entry per calendar day from `today - days` to `today` inclusive, with
/// `None` for days missing from `points`. If a day appears more than once the
/// last value wins.
pub fn fill_days<T: Copy>(
    points: impl IntoIterator<Item = (NaiveDate, T)>,
    today: NaiveDate,
    days: u32,
) -> Vec<(NaiveDate, Option<T>)> {
    let by_day: HashMap<NaiveDate, T> = points.into_iter().collect();
    let start = today - Duration::days(days as i64);
    (0..=days as i64)
        .map(|offset| {
            let day = start + Duration::days(offset);
            (day, by_day.get(&day).copied())
        })
        .collect()
}

/// The forecast line laid out on the combined historical + forecast axis.
/// It starts at the last historical point, so that the two lines meet.
pub fn seam_predictions(historical: &[f64], predictions: &[f64]) -> Vec<Option<f64>> {
    let mut line: Vec<Option<f64>> = Vec::with_capacity(historical.len() + predictions.len());
    if let Some((last, earlier)) = historical.split_last() {
        line.extend(earlier.iter().map(|_| None));
        line.push(Some(*last));
    }
    line.extend(predictions.iter().copied().map(Some));
    line
}

/// Y-axis range for percentage data: the data range padded by ten points,
/// clamped to `[0, 100]`.
pub fn percent_bounds(values: &[f64]) -> (f64, f64) {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() {
        return (PERCENT_MIN, PERCENT_MAX);
    }
    let lo = (min - PERCENT_PAD).max(PERCENT_MIN);
    let hi = (max + PERCENT_PAD).min(PERCENT_MAX);
    if hi <= lo {
        return (PERCENT_MIN, PERCENT_MAX);
    }
    (lo, hi)
}

/// Axis label for a day, e.g. `3/14`.
pub fn date_label(date: NaiveDate) -> String {
    format!("{}/{}", date.month(), date.day())
}
