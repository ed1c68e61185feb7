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

use std::sync::Mutex;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

use axum::Router;
use tokio::net::TcpListener;

use crate::api::SessionSummary;
use crate::api::StudyBackend;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::types::card::CardId;
use crate::types::card::StudyCard;
use crate::types::review::ReviewOutcome;
use crate::types::review::ReviewReceipt;
use crate::types::review::SessionId;

/// Serve `app` on a free local port and return its root URL. The listener is
/// bound before this returns, so requests can be made immediately.
pub async fn spawn_server(app: Router) -> String {
    let port = portpicker::pick_unused_port().expect("no free port");
    let bind = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&bind).await.expect("failed to bind");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{bind}")
}

/// Multiple-choice cards with ids `1..=n`; option 1 is always correct.
pub fn sample_cards(n: usize) -> Vec<StudyCard> {
    (1..=n as i64)
        .map(|id| StudyCard {
            id: CardId(id),
            question: format!("Question {id}?"),
            hint: Some(format!("Hint {id}.")),
            options: vec!["A".to_string(), "B".to_string(), "C".to_string()],
            correct_answer: Some(1),
            description: Some(format!("Explanation {id}.")),
            reference: None,
            code: None,
        })
        .collect()
}

/// In-memory backend that records every call.
#[derive(Default)]
pub struct FakeBackend {
    reviews: Mutex<Vec<ReviewOutcome>>,
    deleted: Mutex<Vec<CardId>>,
    cleared: Mutex<Vec<CardId>>,
    ended: Mutex<Vec<SessionId>>,
    fail_review: AtomicBool,
    fail_end: AtomicBool,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_next_review(&self) {
        self.fail_review.store(true, Ordering::SeqCst);
    }

    pub fn fail_end(&self) {
        self.fail_end.store(true, Ordering::SeqCst);
    }

    pub fn reviews(&self) -> Vec<ReviewOutcome> {
        self.reviews.lock().unwrap().clone()
    }

    pub fn deleted(&self) -> Vec<CardId> {
        self.deleted.lock().unwrap().clone()
    }

    pub fn cleared(&self) -> Vec<CardId> {
        self.cleared.lock().unwrap().clone()
    }

    pub fn ended(&self) -> Vec<SessionId> {
        self.ended.lock().unwrap().clone()
    }
}

impl StudyBackend for FakeBackend {
    async fn submit_review(&self, review: &ReviewOutcome) -> Fallible<ReviewReceipt> {
        if self.fail_review.swap(false, Ordering::SeqCst) {
            return Err(ErrorReport::network());
        }
        self.reviews.lock().unwrap().push(*review);
        Ok(ReviewReceipt::default())
    }

    async fn delete_card(&self, card_id: CardId) -> Fallible<()> {
        self.deleted.lock().unwrap().push(card_id);
        Ok(())
    }

    async fn clear_status(&self, card_id: CardId) -> Fallible<()> {
        self.cleared.lock().unwrap().push(card_id);
        Ok(())
    }

    async fn end_session(&self, session_id: SessionId) -> Fallible<SessionSummary> {
        self.ended.lock().unwrap().push(session_id);
        if self.fail_end.load(Ordering::SeqCst) {
            return Err(ErrorReport::network());
        }
        Ok(SessionSummary::default())
    }
}

#[cfg(test)]
mod tests {
    use axum::routing::get;

    use super::*;

    #[tokio::test]
    async fn test_spawn_server() {
        let app = Router::new().route("/", get(|| async { "ok" }));
        let url = spawn_server(app).await;
        let body = reqwest::get(&url).await.unwrap().text().await.unwrap();
        assert_eq!(body, "ok");
    }
}
