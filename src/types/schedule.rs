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

use std::fmt::Display;
use std::fmt::Formatter;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::error::fail;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardState {
    New,
    Learning,
    Review,
    Mastered,
}

impl CardState {
    pub fn as_str(self) -> &'static str {
        match self {
            CardState::New => "new",
            CardState::Learning => "learning",
            CardState::Review => "review",
            CardState::Mastered => "mastered",
        }
    }
}

impl Display for CardState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CardState {
    type Err = ErrorReport;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(CardState::New),
            "learning" => Ok(CardState::Learning),
            "review" => Ok(CardState::Review),
            "mastered" => Ok(CardState::Mastered),
            _ => fail(format!("invalid card state: {s}")),
        }
    }
}

/// A card's spaced-repetition fields. Always written back whole.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEdit {
    pub state: CardState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDateTime>,
    pub interval: i64,
    pub ease_factor: f64,
    pub repetitions: i64,
    /// Reported by the server, never written.
    #[serde(default, skip_serializing)]
    pub lapses: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_server_progress() {
        let json = r#"{
            "state": "review",
            "due_date": "2025-03-04T09:30:00.123456",
            "interval": 6,
            "ease_factor": 2.5,
            "repetitions": 2,
            "lapses": 1
        }"#;
        let edit: ScheduleEdit = serde_json::from_str(json).unwrap();
        assert_eq!(edit.state, CardState::Review);
        assert_eq!(edit.interval, 6);
        assert_eq!(edit.lapses, Some(1));
        assert!(edit.due_date.is_some());
    }

    #[test]
    fn test_lapses_never_written() {
        let edit = ScheduleEdit {
            state: CardState::New,
            due_date: None,
            interval: 0,
            ease_factor: 2.5,
            repetitions: 0,
            lapses: Some(3),
        };
        let value = serde_json::to_value(&edit).unwrap();
        assert!(value.get("lapses").is_none());
        assert!(value.get("due_date").is_none());
        assert_eq!(value["state"], "new");
    }

    #[test]
    fn test_state_from_str() {
        let state: CardState = "mastered".parse().unwrap();
        assert_eq!(state, CardState::Mastered);
        assert!("done".parse::<CardState>().is_err());
    }
}
