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

use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;
use percent_encoding::utf8_percent_encode;
use reqwest::Client;
use reqwest::RequestBuilder;
use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde::de::IgnoredAny;

use crate::api::SessionSummary;
use crate::api::StudyBackend;
use crate::api::envelope::parse_envelope;
use crate::error::Fallible;
use crate::types::card::CardId;
use crate::types::generation::DeckInitResult;
use crate::types::generation::GenerationRequest;
use crate::types::generation::GenerationResult;
use crate::types::generation::GeneratorKind;
use crate::types::generation::ModuleEntry;
use crate::types::generation::ModuleInfo;
use crate::types::review::Outcome;
use crate::types::review::ReviewOutcome;
use crate::types::review::ReviewReceipt;
use crate::types::review::SessionId;
use crate::types::schedule::ScheduleEdit;
use crate::types::series::RetentionData;
use crate::types::series::ReviewHistory;

/// Characters left alone by `encodeURIComponent`.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Client for the study server's JSON API. Every call makes exactly one
/// request; there are no retries.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base: String,
}

#[derive(Serialize)]
struct ReviewBody {
    card_id: CardId,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rating: Option<u8>,
    duration: u64,
    session_id: SessionId,
}

impl From<&ReviewOutcome> for ReviewBody {
    fn from(review: &ReviewOutcome) -> Self {
        let (result, rating) = match review.outcome {
            Outcome::Rated(rating) => (None, Some(rating.as_number())),
            outcome => (Some(outcome.as_str()), None),
        };
        ReviewBody {
            card_id: review.card_id,
            result,
            rating,
            duration: review.duration,
            session_id: review.session_id,
        }
    }
}

#[derive(Deserialize)]
struct ProgressReply {
    progress: ScheduleEdit,
}

#[derive(Deserialize)]
struct ModulesReply {
    #[serde(default)]
    modules: Vec<ModuleEntry>,
}

#[derive(Deserialize)]
struct TopicsReply {
    #[serde(default)]
    topics: Vec<String>,
}

impl ApiClient {
    /// `server` is the server's root URL, e.g. `http://127.0.0.1:5000`.
    pub fn new(server: &str) -> Self {
        let base = format!("{}/api", server.trim_end_matches('/'));
        Self {
            http: Client::new(),
            base,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base, path)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Fallible<T> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        parse_envelope(status, &body)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Fallible<T> {
        let url = self.url(path);
        log::debug!("GET {url}");
        self.send(self.http.get(url)).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Fallible<T> {
        let url = self.url(path);
        log::debug!("POST {url}");
        self.send(self.http.post(url).json(body)).await
    }

    pub async fn card_progress(&self, card_id: CardId) -> Fallible<ScheduleEdit> {
        let reply: ProgressReply = self.get(&format!("card/{card_id}/progress")).await?;
        Ok(reply.progress)
    }

    /// Overwrite a card's schedule. Returns the schedule as stored.
    pub async fn update_card_progress(
        &self,
        card_id: CardId,
        edit: &ScheduleEdit,
    ) -> Fallible<ScheduleEdit> {
        let url = self.url(&format!("card/{card_id}/progress"));
        log::debug!("PUT {url}");
        let reply: ProgressReply = self.send(self.http.put(url).json(edit)).await?;
        Ok(reply.progress)
    }

    pub async fn modules(&self, kind: GeneratorKind) -> Fallible<Vec<ModuleInfo>> {
        let reply: ModulesReply = self.get(kind.modules_path()).await?;
        Ok(reply.modules.into_iter().map(ModuleInfo::from).collect())
    }

    pub async fn topics(&self, kind: GeneratorKind, module: &str) -> Fallible<Vec<String>> {
        let module = utf8_percent_encode(module, PATH_SEGMENT);
        let path = format!("{}/{module}/topics", kind.modules_path());
        let reply: TopicsReply = self.get(&path).await?;
        Ok(reply.topics)
    }

    pub async fn generate_cards(
        &self,
        kind: GeneratorKind,
        request: &GenerationRequest,
    ) -> Fallible<GenerationResult> {
        self.post(kind.generate_path(), request).await
    }

    /// Ask the server to create the generator's standard decks.
    pub async fn initialize_decks(&self, kind: GeneratorKind) -> Fallible<DeckInitResult> {
        let url = self.url(kind.init_decks_path());
        log::debug!("POST {url}");
        self.send(self.http.post(url)).await
    }

    pub async fn review_history(&self, days: u32) -> Fallible<ReviewHistory> {
        self.get(&format!("stats/review-history?days={days}")).await
    }

    pub async fn retention_data(&self) -> Fallible<RetentionData> {
        self.get("retention-data").await
    }
}

impl StudyBackend for ApiClient {
    async fn submit_review(&self, review: &ReviewOutcome) -> Fallible<ReviewReceipt> {
        self.post("review", &ReviewBody::from(review)).await
    }

    async fn delete_card(&self, card_id: CardId) -> Fallible<()> {
        let url = self.url(&format!("card/{card_id}/delete"));
        log::debug!("DELETE {url}");
        let _: IgnoredAny = self.send(self.http.delete(url)).await?;
        Ok(())
    }

    async fn clear_status(&self, card_id: CardId) -> Fallible<()> {
        let _: IgnoredAny = self
            .send(self.http.post(self.url(&format!("card/{card_id}/clear_status"))))
            .await?;
        Ok(())
    }

    async fn end_session(&self, session_id: SessionId) -> Fallible<SessionSummary> {
        let url = self.url(&format!("session/{session_id}/end"));
        log::debug!("POST {url}");
        self.send(self.http.post(url)).await
    }
}
