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

use chrono::NaiveDate;
use serde::Deserialize;

/// Number of reviews on a day.
#[derive(Clone, Copy, PartialEq, Debug, Deserialize)]
pub struct CountPoint {
    pub date: NaiveDate,
    pub count: u32,
}

/// Percentage of correct reviews on a day, or `None` if there were none.
#[derive(Clone, Copy, PartialEq, Debug, Deserialize)]
pub struct AccuracyPoint {
    pub date: NaiveDate,
    #[serde(default)]
    pub accuracy: Option<f64>,
}

#[derive(Clone, Copy, PartialEq, Debug, Deserialize)]
pub struct RetentionPoint {
    pub date: NaiveDate,
    #[serde(default)]
    pub retention: Option<f64>,
}

#[derive(Clone, Copy, PartialEq, Debug, Deserialize)]
pub struct PredictionPoint {
    pub date: NaiveDate,
    pub predicted_retention: f64,
}

#[derive(Clone, PartialEq, Debug, Default, Deserialize)]
pub struct ReviewHistory {
    #[serde(default)]
    pub accuracy: Vec<AccuracyPoint>,
    #[serde(default, alias = "reviews")]
    pub counts: Vec<CountPoint>,
}

#[derive(Clone, PartialEq, Debug, Default, Deserialize)]
pub struct RetentionData {
    #[serde(default)]
    pub historical: Vec<RetentionPoint>,
    #[serde(default)]
    pub predictions: Vec<PredictionPoint>,
    #[serde(default)]
    pub avg_retention: Option<f64>,
}
