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

use crate::api::SessionSummary;
use crate::api::StudyBackend;
use crate::error::Fallible;
use crate::session::state::Feedback;
use crate::session::state::Session;
use crate::session::state::Transition;
use crate::types::card::CardId;
use crate::types::review::Answer;
use crate::types::review::Rating;
use crate::types::timestamp::Timestamp;

/// Everything a user can do during a session. The UI maps its own events to
/// these; the session never sees the display.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Action {
    OptionSelected { card_id: CardId, index: usize },
    TrippySelected { card_id: CardId },
    Rated { card_id: CardId, rating: Rating },
    DeleteRequested { card_id: CardId },
    MasterRequested { card_id: CardId },
    Advance,
    End,
}

#[derive(Clone, PartialEq, Debug)]
pub enum Effect {
    /// A card was graded; show its feedback.
    Feedback(Feedback),
    Transition(Transition),
}

impl Session {
    pub async fn dispatch<B: StudyBackend>(
        &mut self,
        backend: &B,
        action: Action,
    ) -> Fallible<Effect> {
        let effect = match action {
            Action::OptionSelected { card_id, index } => self
                .submit_answer(backend, card_id, Answer::Choice(index))
                .await
                .map(Effect::Feedback),
            Action::TrippySelected { card_id } => self
                .submit_answer(backend, card_id, Answer::Trippy)
                .await
                .map(Effect::Feedback),
            Action::Rated { card_id, rating } => self
                .submit_answer(backend, card_id, Answer::Rated(rating))
                .await
                .map(Effect::Feedback),
            Action::DeleteRequested { card_id } => self
                .delete_card(backend, card_id)
                .await
                .map(Effect::Transition),
            Action::MasterRequested { card_id } => self
                .mark_mastered(backend, card_id)
                .await
                .map(Effect::Transition),
            Action::Advance => Ok(Effect::Transition(self.advance(Timestamp::now()))),
            Action::End => Ok(Effect::Transition(self.end())),
        };
        self.notify_end(backend).await;
        effect
    }

    pub async fn submit_answer<B: StudyBackend>(
        &mut self,
        backend: &B,
        card_id: CardId,
        answer: Answer,
    ) -> Fallible<Feedback> {
        let pending = self.begin_answer(card_id, answer, Timestamp::now())?;
        let result = backend.submit_review(&pending.review).await;
        self.complete_answer(pending, result, Timestamp::now())
    }

    pub async fn delete_card<B: StudyBackend>(
        &mut self,
        backend: &B,
        card_id: CardId,
    ) -> Fallible<Transition> {
        let pending = self.begin_delete(card_id)?;
        let result = backend.delete_card(card_id).await;
        self.complete_delete(pending, result, Timestamp::now())
    }

    pub async fn mark_mastered<B: StudyBackend>(
        &mut self,
        backend: &B,
        card_id: CardId,
    ) -> Fallible<Transition> {
        let pending = self.begin_master(card_id)?;
        let result = backend.clear_status(card_id).await;
        self.complete_master(pending, result, Timestamp::now())
    }

    /// Tell the server the session is over, once. Failure is only logged:
    /// the session is over either way.
    async fn notify_end<B: StudyBackend>(&mut self, backend: &B) {
        if let Some(session_id) = self.take_end_notice() {
            match backend.end_session(session_id).await {
                Ok(summary) => {
                    log::debug!(
                        "Server closed session {session_id}: {}",
                        describe_summary(&summary)
                    );
                }
                Err(e) => {
                    log::warn!("Failed to end session {session_id}: {e}");
                }
            }
        }
    }
}

fn describe_summary(summary: &SessionSummary) -> String {
    let studied = match summary.cards_studied {
        Some(count) => format!("{count} cards studied"),
        None => "cards studied unknown".to_string(),
    };
    match summary.accuracy {
        Some(accuracy) => format!("{studied}, {accuracy:.1}% accuracy"),
        None => studied,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::AtomicUsize;
    use std::sync::atomic::Ordering;

    use axum::Json;
    use axum::Router;
    use axum::routing::delete;
    use axum::routing::post;
    use serde_json::Value;
    use serde_json::json;

    use super::*;
    use crate::api::ApiClient;
    use crate::error::ErrorKind;
    use crate::helper::FakeBackend;
    use crate::helper::sample_cards;
    use crate::helper::spawn_server;
    use crate::session::state::CardStatus;
    use crate::types::review::GradingMode;
    use crate::types::review::Outcome;
    use crate::types::review::SessionId;

    fn start(n: usize) -> Session {
        Session::start(
            SessionId(7),
            GradingMode::Choice,
            sample_cards(n),
            Timestamp::now(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_three_card_scenario() -> Fallible<()> {
        let backend = FakeBackend::new();
        let mut session = start(3);

        let effect = session
            .dispatch(
                &backend,
                Action::OptionSelected {
                    card_id: CardId(1),
                    index: 0,
                },
            )
            .await?;
        let Effect::Feedback(feedback) = effect else {
            panic!("expected feedback");
        };
        assert_eq!(feedback.outcome, Outcome::Incorrect);
        session.dispatch(&backend, Action::Advance).await?;
        session
            .dispatch(
                &backend,
                Action::OptionSelected {
                    card_id: CardId(2),
                    index: 1,
                },
            )
            .await?;
        session.dispatch(&backend, Action::Advance).await?;
        let effect = session
            .dispatch(&backend, Action::DeleteRequested { card_id: CardId(3) })
            .await?;
        assert_eq!(
            effect,
            Effect::Transition(Transition::Finished { redirect: false })
        );

        let progress = session.progress();
        assert!(session.is_finished());
        assert_eq!(progress.reviewed, 2);
        assert_eq!(progress.total, 2);
        assert_eq!(backend.reviews().len(), 2);
        assert_eq!(backend.deleted(), vec![CardId(3)]);
        assert_eq!(backend.ended(), vec![SessionId(7)]);

        // Ending again does not notify again.
        session.dispatch(&backend, Action::End).await?;
        assert_eq!(backend.ended().len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_double_grade_sends_one_review() -> Fallible<()> {
        let backend = FakeBackend::new();
        let mut session = start(2);
        session
            .dispatch(
                &backend,
                Action::OptionSelected {
                    card_id: CardId(1),
                    index: 1,
                },
            )
            .await?;
        let second = session
            .dispatch(&backend, Action::TrippySelected { card_id: CardId(1) })
            .await;
        assert!(second.is_err());
        assert_eq!(backend.reviews().len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_review_failure_is_surfaced_and_retryable() -> Fallible<()> {
        let backend = FakeBackend::new();
        backend.fail_next_review();
        let mut session = start(1);
        let err = session
            .dispatch(
                &backend,
                Action::OptionSelected {
                    card_id: CardId(1),
                    index: 1,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Network);
        assert_eq!(session.status(CardId(1)), Some(CardStatus::Unanswered));
        session
            .dispatch(
                &backend,
                Action::OptionSelected {
                    card_id: CardId(1),
                    index: 1,
                },
            )
            .await?;
        assert_eq!(session.progress().reviewed, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_end_failure_is_not_surfaced() -> Fallible<()> {
        let backend = FakeBackend::new();
        backend.fail_end();
        let mut session = start(1);
        let effect = session.dispatch(&backend, Action::End).await?;
        assert_eq!(
            effect,
            Effect::Transition(Transition::Finished { redirect: false })
        );
        assert_eq!(backend.ended().len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_master_then_finish() -> Fallible<()> {
        let backend = FakeBackend::new();
        let mut session = start(1);
        session
            .dispatch(&backend, Action::MasterRequested { card_id: CardId(1) })
            .await?;
        assert_eq!(backend.cleared(), vec![CardId(1)]);
        assert!(session.is_finished());
        assert_eq!(backend.ended().len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_scenario_against_server() -> Fallible<()> {
        let ends = Arc::new(AtomicUsize::new(0));
        let counter = ends.clone();
        let app = Router::new()
            .route(
                "/api/review",
                post(|Json(body): Json<Value>| async move {
                    let correct = if body["result"] == "correct" { 1 } else { 0 };
                    Json(json!({"success": true, "correct_count": correct}))
                }),
            )
            .route(
                "/api/card/{id}/delete",
                delete(|| async { Json(json!({"success": true})) }),
            )
            .route(
                "/api/session/{id}/end",
                post(move || {
                    let counter = counter.clone();
                    async move {
                        counter.fetch_add(1, Ordering::SeqCst);
                        Json(json!({"success": true, "cards_studied": 2, "accuracy": 50.0}))
                    }
                }),
            );
        let client = ApiClient::new(&spawn_server(app).await);
        let mut session = start(3);

        session
            .dispatch(
                &client,
                Action::OptionSelected {
                    card_id: CardId(1),
                    index: 2,
                },
            )
            .await?;
        session.dispatch(&client, Action::Advance).await?;
        let Effect::Feedback(feedback) = session
            .dispatch(
                &client,
                Action::OptionSelected {
                    card_id: CardId(2),
                    index: 1,
                },
            )
            .await?
        else {
            panic!("expected feedback");
        };
        assert_eq!(feedback.receipt.correct_count, Some(1));
        session.dispatch(&client, Action::Advance).await?;
        session
            .dispatch(&client, Action::DeleteRequested { card_id: CardId(3) })
            .await?;

        let progress = session.progress();
        assert!(session.is_finished());
        assert_eq!((progress.reviewed, progress.total), (2, 2));
        assert_eq!(ends.load(Ordering::SeqCst), 1);
        Ok(())
    }

    #[test]
    fn test_describe_summary() {
        let summary = SessionSummary {
            cards_studied: Some(12),
            accuracy: Some(83.333),
        };
        assert_eq!(
            describe_summary(&summary),
            "12 cards studied, 83.3% accuracy"
        );
        assert_eq!(
            describe_summary(&SessionSummary::default()),
            "cards studied unknown"
        );
    }
}
