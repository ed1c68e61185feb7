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

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;
use crate::types::card::CardId;
use crate::types::card::StudyCard;
use crate::types::review::Answer;
use crate::types::review::GradingMode;
use crate::types::review::Outcome;
use crate::types::review::ReviewOutcome;
use crate::types::review::ReviewReceipt;
use crate::types::review::SessionId;
use crate::types::timestamp::Timestamp;

/// A study session: the cards being studied, which one is showing, and
/// which have been graded.
///
/// Operations that talk to the server are split in two. `begin_*` validates
/// the request against the current state and returns a ticket; `complete_*`
/// takes the ticket back together with the server's answer and applies it,
/// unless the session has moved on in the meantime, in which case it returns
/// a stale error and changes nothing visible.
pub struct Session {
    id: SessionId,
    grading: GradingMode,
    slots: Vec<Slot>,
    /// Position of the card on display. Equal to the number of cards once
    /// the session has been advanced past the end.
    index: usize,
    /// When the card on display became visible.
    anchor: Timestamp,
    finished: bool,
    /// Whether the server still has to be told the session ended.
    end_pending: bool,
}

struct Slot {
    card: StudyCard,
    status: CardStatus,
    /// A delete or mastered request for this card is in flight.
    busy: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CardStatus {
    Unanswered,
    /// A review has been sent and input is disabled until it resolves.
    Pending,
    Graded(Outcome),
}

/// Counters describing a session at one point in time.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Progress {
    pub index: usize,
    pub total: usize,
    pub reviewed: usize,
    #[cfg(test)]
    pub finished: bool,
}

/// What to show after a card has been graded.
#[derive(Clone, PartialEq, Debug)]
pub struct Feedback {
    pub card_id: CardId,
    pub outcome: Outcome,
    pub selected: Option<usize>,
    pub correct_answer: Option<usize>,
    pub explanation: Option<String>,
    pub receipt: ReviewReceipt,
}

/// How the display changes after an operation.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Transition {
    /// A different card is now on display.
    Showing(CardId),
    /// The same card is still on display.
    Unchanged,
    /// The session is over. `redirect` is set when it ended because no
    /// cards are left, in which case the user should be sent back to the
    /// deck.
    Finished { redirect: bool },
}

#[derive(Debug)]
pub struct PendingReview {
    pub review: ReviewOutcome,
    selected: Option<usize>,
}

#[derive(Debug)]
pub struct PendingDelete {
    pub session_id: SessionId,
    pub card_id: CardId,
}

#[derive(Debug)]
pub struct PendingMaster {
    pub session_id: SessionId,
    pub card_id: CardId,
}

impl Session {
    pub fn start(
        id: SessionId,
        grading: GradingMode,
        cards: Vec<StudyCard>,
        now: Timestamp,
    ) -> Fallible<Self> {
        if cards.is_empty() {
            return fail("no cards to study.");
        }
        log::debug!("Starting session {id} with {} cards", cards.len());
        let slots = cards
            .into_iter()
            .map(|card| Slot {
                card,
                status: CardStatus::Unanswered,
                busy: false,
            })
            .collect();
        Ok(Self {
            id,
            grading,
            slots,
            index: 0,
            anchor: now,
            finished: false,
            end_pending: false,
        })
    }

    pub fn grading(&self) -> GradingMode {
        self.grading
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn progress(&self) -> Progress {
        Progress {
            index: self.index,
            total: self.slots.len(),
            reviewed: self.reviewed(),
            #[cfg(test)]
            finished: self.finished,
        }
    }

    /// Number of cards still in the session that have been graded.
    pub fn reviewed(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| matches!(slot.status, CardStatus::Graded(_)))
            .count()
    }

    /// The card on display, if the session is still running.
    pub fn current(&self) -> Option<&StudyCard> {
        if self.finished {
            None
        } else {
            self.slots.get(self.index).map(|slot| &slot.card)
        }
    }

    #[cfg(test)]
    pub fn status(&self, card_id: CardId) -> Option<CardStatus> {
        self.position(card_id).map(|pos| self.slots[pos].status)
    }

    fn position(&self, card_id: CardId) -> Option<usize> {
        self.slots.iter().position(|slot| slot.card.id == card_id)
    }

    /// Position of `card_id`, provided it is the card on display.
    fn current_position(&self, card_id: CardId) -> Fallible<usize> {
        if self.finished {
            return Err(ErrorReport::stale("session is over."));
        }
        match self.slots.get(self.index) {
            Some(slot) if slot.card.id == card_id => Ok(self.index),
            _ => Err(ErrorReport::stale(format!(
                "card {card_id} is not the current card."
            ))),
        }
    }

    /// Position of `card_id` for a response to a request made earlier.
    fn live_position(&self, session_id: SessionId, card_id: CardId) -> Fallible<usize> {
        if session_id != self.id || self.finished {
            return Err(ErrorReport::stale("session is over."));
        }
        self.position(card_id).ok_or_else(|| {
            ErrorReport::stale(format!("card {card_id} is no longer in the session."))
        })
    }

    pub fn begin_answer(
        &mut self,
        card_id: CardId,
        answer: Answer,
        now: Timestamp,
    ) -> Fallible<PendingReview> {
        let index = self.current_position(card_id)?;
        let slot = &self.slots[index];
        match slot.status {
            CardStatus::Unanswered => {}
            CardStatus::Pending => return fail("card is already being graded."),
            CardStatus::Graded(_) => return fail("card has already been graded."),
        }
        if slot.busy {
            return fail("card is being removed.");
        }
        let outcome = classify(self.grading, &slot.card, answer)?;
        self.slots[index].status = CardStatus::Pending;
        let selected = match answer {
            Answer::Choice(choice) => Some(choice),
            _ => None,
        };
        let review = ReviewOutcome {
            card_id,
            outcome,
            duration: now.seconds_since(self.anchor),
            session_id: self.id,
        };
        log::debug!(
            "Card {card_id} graded {} after {}s",
            outcome.as_str(),
            review.duration
        );
        Ok(PendingReview { review, selected })
    }

    /// Apply the server's answer to a review. On failure the card becomes
    /// answerable again and the error is returned for display.
    pub fn complete_answer(
        &mut self,
        pending: PendingReview,
        result: Fallible<ReviewReceipt>,
        now: Timestamp,
    ) -> Fallible<Feedback> {
        let card_id = pending.review.card_id;
        let pos = self.live_position(pending.review.session_id, card_id)?;
        if self.slots[pos].status != CardStatus::Pending {
            return Err(ErrorReport::stale(format!(
                "card {card_id} has no review in flight."
            )));
        }
        let receipt = match result {
            Ok(receipt) => receipt,
            Err(e) => {
                self.slots[pos].status = CardStatus::Unanswered;
                if pos != self.index {
                    return Err(ErrorReport::stale(format!(
                        "review of card {card_id} failed after it was left: {}",
                        e.message()
                    )));
                }
                return Err(e);
            }
        };
        let outcome = pending.review.outcome;
        self.slots[pos].status = CardStatus::Graded(outcome);
        if pos != self.index {
            return Err(ErrorReport::stale(format!(
                "card {card_id} is not the current card."
            )));
        }
        let card = &self.slots[pos].card;
        let feedback = Feedback {
            card_id,
            outcome,
            selected: pending.selected,
            correct_answer: card.correct_answer,
            explanation: card.description.clone(),
            receipt,
        };
        // Self-rated cards have nothing to reveal.
        if self.grading == GradingMode::Rating {
            self.advance(now);
        }
        Ok(feedback)
    }

    pub fn advance(&mut self, now: Timestamp) -> Transition {
        if self.finished {
            return Transition::Unchanged;
        }
        self.index += 1;
        if self.index >= self.slots.len() {
            self.index = self.slots.len();
            self.finish();
            Transition::Finished { redirect: false }
        } else {
            self.anchor = now;
            Transition::Showing(self.slots[self.index].card.id)
        }
    }

    /// End the session early.
    pub fn end(&mut self) -> Transition {
        if self.finished {
            Transition::Unchanged
        } else {
            self.finish();
            Transition::Finished { redirect: false }
        }
    }

    fn finish(&mut self) {
        if !self.finished {
            log::debug!("Session {} completed", self.id);
            self.finished = true;
            self.end_pending = true;
        }
    }

    /// Returns the session id the first time it is called after the session
    /// finished, and `None` otherwise.
    pub fn take_end_notice(&mut self) -> Option<SessionId> {
        if self.end_pending {
            self.end_pending = false;
            Some(self.id)
        } else {
            None
        }
    }

    pub fn begin_delete(&mut self, card_id: CardId) -> Fallible<PendingDelete> {
        if self.finished {
            return Err(ErrorReport::stale("session is over."));
        }
        let pos = self.position(card_id).ok_or_else(|| {
            ErrorReport::stale(format!("card {card_id} is no longer in the session."))
        })?;
        if self.slots[pos].busy {
            return fail("card is already being removed.");
        }
        self.slots[pos].busy = true;
        Ok(PendingDelete {
            session_id: self.id,
            card_id,
        })
    }

    pub fn complete_delete(
        &mut self,
        pending: PendingDelete,
        result: Fallible<()>,
        now: Timestamp,
    ) -> Fallible<Transition> {
        let pos = self.live_position(pending.session_id, pending.card_id)?;
        if let Err(e) = result {
            self.slots[pos].busy = false;
            return Err(e);
        }
        self.slots.remove(pos);
        let total = self.slots.len();
        log::debug!("Card {} deleted, {total} left", pending.card_id);
        if total == 0 {
            self.index = 0;
            self.finish();
            return Ok(Transition::Finished { redirect: true });
        }
        if pos < self.index {
            // The card on display moved down one place.
            self.index -= 1;
            return Ok(Transition::Unchanged);
        }
        if pos > self.index {
            return Ok(Transition::Unchanged);
        }
        if self.index < total {
            self.anchor = now;
            Ok(Transition::Showing(self.slots[self.index].card.id))
        } else {
            // The last card was deleted: every remaining card has been shown.
            self.index = total - 1;
            self.finish();
            Ok(Transition::Finished { redirect: false })
        }
    }

    pub fn begin_master(&mut self, card_id: CardId) -> Fallible<PendingMaster> {
        let pos = self.current_position(card_id)?;
        if self.slots[pos].busy {
            return fail("card is already being updated.");
        }
        self.slots[pos].busy = true;
        Ok(PendingMaster {
            session_id: self.id,
            card_id,
        })
    }

    pub fn complete_master(
        &mut self,
        pending: PendingMaster,
        result: Fallible<()>,
        now: Timestamp,
    ) -> Fallible<Transition> {
        let pos = self.live_position(pending.session_id, pending.card_id)?;
        self.slots[pos].busy = false;
        result?;
        if pos != self.index {
            return Err(ErrorReport::stale(format!(
                "card {} is not the current card.",
                pending.card_id
            )));
        }
        Ok(self.advance(now))
    }
}

fn classify(grading: GradingMode, card: &StudyCard, answer: Answer) -> Fallible<Outcome> {
    match (grading, answer) {
        (GradingMode::Choice, Answer::Choice(choice)) => {
            let Some(correct) = card.correct_answer else {
                return fail(format!("card {} has no correct answer.", card.id));
            };
            if choice >= card.options.len() {
                return fail(format!("card {} has no option {}.", card.id, choice + 1));
            }
            if choice == correct {
                Ok(Outcome::Correct)
            } else {
                Ok(Outcome::Incorrect)
            }
        }
        (GradingMode::Choice, Answer::Trippy) => Ok(Outcome::Trippy),
        (GradingMode::Choice, Answer::Rated(_)) => {
            fail("this session is graded by choosing an option.")
        }
        (GradingMode::Rating, Answer::Rated(rating)) => Ok(Outcome::Rated(rating)),
        (GradingMode::Rating, _) => fail("this session is graded by rating."),
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono::Utc;

    use super::*;
    use crate::error::ErrorKind;
    use crate::types::review::Rating;

    fn t0() -> Timestamp {
        Timestamp::new(Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap())
    }

    fn card(id: i64) -> StudyCard {
        StudyCard {
            id: CardId(id),
            question: format!("Question {id}?"),
            hint: None,
            options: vec!["A".to_string(), "B".to_string(), "C".to_string()],
            correct_answer: Some(1),
            description: Some(format!("Explanation {id}.")),
            reference: None,
            code: None,
        }
    }

    fn session(n: i64) -> Session {
        let cards = (1..=n).map(card).collect();
        Session::start(SessionId(1), GradingMode::Choice, cards, t0()).unwrap()
    }

    fn assert_invariants(session: &Session) {
        let p = session.progress();
        assert!(p.reviewed <= p.total);
        if !p.finished {
            assert!(p.index < p.total);
        }
    }

    fn answer(session: &mut Session, id: i64, choice: usize) -> Fallible<Feedback> {
        let pending = session.begin_answer(CardId(id), Answer::Choice(choice), t0())?;
        session.complete_answer(pending, Ok(ReviewReceipt::default()), t0())
    }

    fn delete(session: &mut Session, id: i64) -> Fallible<Transition> {
        let pending = session.begin_delete(CardId(id))?;
        session.complete_delete(pending, Ok(()), t0())
    }

    #[test]
    fn test_start_requires_cards() {
        let result = Session::start(SessionId(1), GradingMode::Choice, Vec::new(), t0());
        assert!(result.is_err());
    }

    #[test]
    fn test_classification() -> Fallible<()> {
        let mut s = session(3);
        let feedback = answer(&mut s, 1, 1)?;
        assert_eq!(feedback.outcome, Outcome::Correct);
        assert_eq!(feedback.explanation.as_deref(), Some("Explanation 1."));
        s.advance(t0());
        assert_eq!(answer(&mut s, 2, 0)?.outcome, Outcome::Incorrect);
        s.advance(t0());
        let pending = s.begin_answer(CardId(3), Answer::Trippy, t0())?;
        assert_eq!(pending.review.outcome, Outcome::Trippy);
        Ok(())
    }

    #[test]
    fn test_option_out_of_range_rejected() {
        let mut s = session(1);
        let err = s
            .begin_answer(CardId(1), Answer::Choice(3), t0())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(s.status(CardId(1)), Some(CardStatus::Unanswered));
    }

    #[test]
    fn test_wrong_grading_mode_rejected() {
        let mut s = session(1);
        let result = s.begin_answer(CardId(1), Answer::Rated(Rating::Good), t0());
        assert!(result.is_err());
    }

    #[test]
    fn test_duration_since_card_shown() -> Fallible<()> {
        let mut s = session(2);
        s.advance(t0().plus_millis(10_000));
        let pending = s.begin_answer(CardId(2), Answer::Choice(1), t0().plus_millis(22_900))?;
        assert_eq!(pending.review.duration, 12);
        Ok(())
    }

    #[test]
    fn test_second_grade_rejected() -> Fallible<()> {
        let mut s = session(2);
        let pending = s.begin_answer(CardId(1), Answer::Choice(0), t0())?;
        // While the first review is in flight.
        assert!(s.begin_answer(CardId(1), Answer::Choice(1), t0()).is_err());
        s.complete_answer(pending, Ok(ReviewReceipt::default()), t0())?;
        // After it succeeded.
        let err = s
            .begin_answer(CardId(1), Answer::Choice(1), t0())
            .unwrap_err();
        assert_eq!(err.message(), "card has already been graded.");
        assert_eq!(s.progress().reviewed, 1);
        Ok(())
    }

    #[test]
    fn test_failed_review_leaves_card_answerable() -> Fallible<()> {
        let mut s = session(2);
        let pending = s.begin_answer(CardId(1), Answer::Choice(0), t0())?;
        let err = s
            .complete_answer(pending, Err(ErrorReport::network()), t0())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Network);
        assert_eq!(s.status(CardId(1)), Some(CardStatus::Unanswered));
        assert_eq!(s.progress().reviewed, 0);
        assert!(answer(&mut s, 1, 1).is_ok());
        assert_eq!(s.progress().reviewed, 1);
        Ok(())
    }

    #[test]
    fn test_answer_for_other_card_is_stale() {
        let mut s = session(2);
        let err = s
            .begin_answer(CardId(2), Answer::Choice(1), t0())
            .unwrap_err();
        assert!(err.is_stale());
    }

    #[test]
    fn test_advance_to_terminal() {
        let mut s = session(2);
        assert_eq!(s.advance(t0()), Transition::Showing(CardId(2)));
        assert_eq!(s.advance(t0()), Transition::Finished { redirect: false });
        assert!(s.is_finished());
        assert!(s.current().is_none());
        assert_eq!(s.advance(t0()), Transition::Unchanged);
        let err = s
            .begin_answer(CardId(2), Answer::Choice(1), t0())
            .unwrap_err();
        assert!(err.is_stale());
    }

    #[test]
    fn test_end_notice_once() {
        let mut s = session(1);
        assert_eq!(s.take_end_notice(), None);
        s.advance(t0());
        assert_eq!(s.end(), Transition::Unchanged);
        assert_eq!(s.take_end_notice(), Some(SessionId(1)));
        assert_eq!(s.take_end_notice(), None);
    }

    #[test]
    fn test_delete_only_card() -> Fallible<()> {
        let mut s = session(1);
        assert_eq!(delete(&mut s, 1)?, Transition::Finished { redirect: true });
        let p = s.progress();
        assert!(p.finished);
        assert_eq!(p.total, 0);
        assert_eq!(s.take_end_notice(), Some(SessionId(1)));
        Ok(())
    }

    #[test]
    fn test_delete_current_shows_next_and_resets_timer() -> Fallible<()> {
        let mut s = session(3);
        let pending = s.begin_delete(CardId(1))?;
        let later = t0().plus_millis(30_000);
        assert_eq!(
            s.complete_delete(pending, Ok(()), later)?,
            Transition::Showing(CardId(2))
        );
        assert_eq!(s.progress().index, 0);
        assert_eq!(s.progress().total, 2);
        let pending = s.begin_answer(CardId(2), Answer::Choice(1), later.plus_millis(3_000))?;
        assert_eq!(pending.review.duration, 3);
        Ok(())
    }

    #[test]
    fn test_delete_last_card_clamps_index() -> Fallible<()> {
        let mut s = session(3);
        s.advance(t0());
        s.advance(t0());
        assert_eq!(delete(&mut s, 3)?, Transition::Finished { redirect: false });
        let p = s.progress();
        assert_eq!(p.total, 2);
        assert_eq!(p.index, p.total - 1);
        assert!(p.finished);
        Ok(())
    }

    #[test]
    fn test_delete_earlier_card_keeps_current_and_timer() -> Fallible<()> {
        let mut s = session(3);
        s.advance(t0());
        s.advance(t0());
        let pending = s.begin_delete(CardId(1))?;
        let transition = s.complete_delete(pending, Ok(()), t0().plus_millis(60_000))?;
        assert_eq!(transition, Transition::Unchanged);
        assert_eq!(s.current().map(|c| c.id), Some(CardId(3)));
        assert_eq!(s.progress().index, 1);
        let pending = s.begin_answer(CardId(3), Answer::Choice(1), t0().plus_millis(5_000))?;
        assert_eq!(pending.review.duration, 5);
        assert_invariants(&s);
        Ok(())
    }

    #[test]
    fn test_delete_graded_card_keeps_counts_consistent() -> Fallible<()> {
        let mut s = session(2);
        answer(&mut s, 1, 1)?;
        s.advance(t0());
        answer(&mut s, 2, 1)?;
        delete(&mut s, 1)?;
        let p = s.progress();
        assert_eq!(p.total, 1);
        assert_eq!(p.reviewed, 1);
        assert_invariants(&s);
        Ok(())
    }

    #[test]
    fn test_failed_delete_keeps_card() -> Fallible<()> {
        let mut s = session(2);
        let pending = s.begin_delete(CardId(1))?;
        let err = s
            .complete_delete(pending, Err(ErrorReport::protocol("Unauthorized")), t0())
            .unwrap_err();
        assert_eq!(err.message(), "Unauthorized");
        assert_eq!(s.progress().total, 2);
        assert!(s.begin_delete(CardId(1)).is_ok());
        Ok(())
    }

    #[test]
    fn test_late_review_for_deleted_card_is_stale() -> Fallible<()> {
        let mut s = session(2);
        let review = s.begin_answer(CardId(1), Answer::Choice(1), t0())?;
        delete(&mut s, 1)?;
        let err = s
            .complete_answer(review, Ok(ReviewReceipt::default()), t0())
            .unwrap_err();
        assert!(err.is_stale());
        let p = s.progress();
        assert_eq!(p.reviewed, 0);
        assert_eq!(p.total, 1);
        assert_eq!(s.current().map(|c| c.id), Some(CardId(2)));
        Ok(())
    }

    #[test]
    fn test_late_delete_after_end_is_stale() -> Fallible<()> {
        let mut s = session(2);
        let pending = s.begin_delete(CardId(2))?;
        s.end();
        let err = s.complete_delete(pending, Ok(()), t0()).unwrap_err();
        assert!(err.is_stale());
        assert_eq!(s.progress().total, 2);
        Ok(())
    }

    #[test]
    fn test_late_review_after_advance_counts_but_is_stale() -> Fallible<()> {
        let mut s = session(3);
        let review = s.begin_answer(CardId(1), Answer::Choice(1), t0())?;
        s.advance(t0());
        let err = s
            .complete_answer(review, Ok(ReviewReceipt::default()), t0())
            .unwrap_err();
        assert!(err.is_stale());
        assert_eq!(
            s.status(CardId(1)),
            Some(CardStatus::Graded(Outcome::Correct))
        );
        assert_eq!(s.current().map(|c| c.id), Some(CardId(2)));
        Ok(())
    }

    #[test]
    fn test_mark_mastered_advances() -> Fallible<()> {
        let mut s = session(2);
        let pending = s.begin_master(CardId(1))?;
        assert_eq!(
            s.complete_master(pending, Ok(()), t0())?,
            Transition::Showing(CardId(2))
        );
        assert_eq!(s.progress().reviewed, 0);
        assert!(s.begin_master(CardId(1)).unwrap_err().is_stale());
        Ok(())
    }

    #[test]
    fn test_mark_mastered_failure_stays() -> Fallible<()> {
        let mut s = session(2);
        let pending = s.begin_master(CardId(1))?;
        assert!(
            s.complete_master(pending, Err(ErrorReport::network()), t0())
                .is_err()
        );
        assert_eq!(s.current().map(|c| c.id), Some(CardId(1)));
        Ok(())
    }

    #[test]
    fn test_rating_mode_advances_on_success() -> Fallible<()> {
        let cards = vec![card(1), card(2)];
        let mut s = Session::start(SessionId(4), GradingMode::Rating, cards, t0())?;
        let pending = s.begin_answer(CardId(1), Answer::Rated(Rating::Easy), t0())?;
        assert_eq!(pending.review.outcome, Outcome::Rated(Rating::Easy));
        s.complete_answer(pending, Ok(ReviewReceipt::default()), t0())?;
        assert_eq!(s.current().map(|c| c.id), Some(CardId(2)));
        let pending = s.begin_answer(CardId(2), Answer::Rated(Rating::Forgot), t0())?;
        s.complete_answer(pending, Ok(ReviewReceipt::default()), t0())?;
        let p = s.progress();
        assert!(p.finished);
        assert_eq!(p.reviewed, 2);
        Ok(())
    }

    #[test]
    fn test_three_card_scenario() -> Fallible<()> {
        let mut s = session(3);
        assert_eq!(answer(&mut s, 1, 0)?.outcome, Outcome::Incorrect);
        s.advance(t0());
        assert_eq!(answer(&mut s, 2, 1)?.outcome, Outcome::Correct);
        s.advance(t0());
        delete(&mut s, 3)?;
        let p = s.progress();
        assert!(p.finished);
        assert_eq!(p.reviewed, 2);
        assert_eq!(p.total, 2);
        assert_eq!(s.take_end_notice(), Some(SessionId(1)));
        assert_eq!(s.take_end_notice(), None);
        Ok(())
    }

    #[test]
    fn test_invariants_hold_through_mixed_operations() -> Fallible<()> {
        let mut s = session(5);
        assert_invariants(&s);
        answer(&mut s, 1, 1)?;
        assert_invariants(&s);
        delete(&mut s, 3)?;
        assert_invariants(&s);
        s.advance(t0());
        assert_invariants(&s);
        delete(&mut s, 2)?;
        assert_invariants(&s);
        answer(&mut s, 4, 2)?;
        delete(&mut s, 1)?;
        assert_invariants(&s);
        delete(&mut s, 5)?;
        assert_invariants(&s);
        delete(&mut s, 4)?;
        assert!(s.is_finished());
        assert_eq!(s.progress().total, 0);
        Ok(())
    }
}
