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

use clap::ValueEnum;
use serde::Deserialize;
use serde::Serialize;

use crate::error::Fallible;
use crate::error::fail;
use crate::types::card::CardId;

/// The server's identifier for a study session.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub i64);

impl Display for SessionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How answers are graded. Chosen once, when the session starts.
#[derive(ValueEnum, Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradingMode {
    /// Multiple-choice grading: correct, incorrect, or trippy.
    #[default]
    Choice,
    /// Self-assessed recall on a 1-4 scale.
    Rating,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Rating {
    Forgot,
    Hard,
    Good,
    Easy,
}

impl Rating {
    pub fn as_number(self) -> u8 {
        match self {
            Rating::Forgot => 1,
            Rating::Hard => 2,
            Rating::Good => 3,
            Rating::Easy => 4,
        }
    }

    pub fn from_number(n: u8) -> Fallible<Self> {
        match n {
            1 => Ok(Rating::Forgot),
            2 => Ok(Rating::Hard),
            3 => Ok(Rating::Good),
            4 => Ok(Rating::Easy),
            _ => fail(format!("rating must be between 1 and 4, got {n}.")),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Rating::Forgot => "forgot",
            Rating::Hard => "hard",
            Rating::Good => "good",
            Rating::Easy => "easy",
        }
    }
}

/// What the user did with a card.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Answer {
    /// Picked the option at this index.
    Choice(usize),
    /// Flagged the question as confusing instead of answering it.
    Trippy,
    Rated(Rating),
}

/// The classification sent to the server.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Outcome {
    Correct,
    Incorrect,
    Trippy,
    Rated(Rating),
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Correct => "correct",
            Outcome::Incorrect => "incorrect",
            Outcome::Trippy => "trippy",
            Outcome::Rated(rating) => rating.as_str(),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ReviewOutcome {
    pub card_id: CardId,
    pub outcome: Outcome,
    /// Seconds the card was visible before it was answered.
    pub duration: u64,
    pub session_id: SessionId,
}

/// Per-card totals returned after a review is recorded.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Deserialize)]
pub struct ReviewReceipt {
    #[serde(default)]
    pub correct_count: Option<u32>,
    #[serde(default)]
    pub incorrect_count: Option<u32>,
    #[serde(default)]
    pub trippy_count: Option<u32>,
}
