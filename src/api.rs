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

mod client;
mod envelope;

use serde::Deserialize;

pub use client::ApiClient;

use crate::error::Fallible;
use crate::types::card::CardId;
use crate::types::review::ReviewOutcome;
use crate::types::review::ReviewReceipt;
use crate::types::review::SessionId;

/// The server calls a study session makes. `ApiClient` is the real
/// implementation.
pub trait StudyBackend {
    async fn submit_review(&self, review: &ReviewOutcome) -> Fallible<ReviewReceipt>;

    async fn delete_card(&self, card_id: CardId) -> Fallible<()>;

    /// Remove the card from the server's missed/trippy lists.
    async fn clear_status(&self, card_id: CardId) -> Fallible<()>;

    async fn end_session(&self, session_id: SessionId) -> Fallible<SessionSummary>;
}

#[derive(Clone, Copy, PartialEq, Debug, Default, Deserialize)]
pub struct SessionSummary {
    #[serde(default)]
    pub cards_studied: Option<u32>,
    #[serde(default)]
    pub accuracy: Option<f64>,
}
