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

use std::io::Write;
use std::path::Path;

use clap::ValueEnum;
use tokio::io::AsyncBufRead;
use tokio::io::AsyncBufReadExt;
use tokio::io::BufReader;

use crate::api::StudyBackend;
use crate::error::Fallible;
use crate::error::fail;
use crate::session::Action;
use crate::session::Effect;
use crate::session::Feedback;
use crate::session::Session;
use crate::session::Transition;
use crate::types::card::CardId;
use crate::types::card::StudyCard;
use crate::types::review::GradingMode;
use crate::types::review::Outcome;
use crate::types::review::Rating;
use crate::types::review::SessionId;
use crate::types::timestamp::Timestamp;

/// Which cards the server put in the session. Only used as a label.
#[derive(ValueEnum, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum StudyMode {
    /// Every card in the deck.
    #[default]
    All,
    /// Cards flagged as confusing.
    Trippy,
    /// Cards answered incorrectly.
    Missed,
}

impl StudyMode {
    fn title(self) -> &'static str {
        match self {
            StudyMode::All => "Studying all cards",
            StudyMode::Trippy => "Reviewing trippy cards",
            StudyMode::Missed => "Reviewing missed cards",
        }
    }
}

/// A line of terminal input, decoded.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Input {
    Act(Action),
    Hint,
    Help,
}

/// Map a line typed while `card` is on display to what it asks for.
fn parse_input(line: &str, card: &StudyCard, grading: GradingMode) -> Option<Input> {
    let card_id = card.id;
    let line = line.trim().to_ascii_lowercase();
    let input = match line.as_str() {
        "" | "n" => Input::Act(Action::Advance),
        "q" => Input::Act(Action::End),
        "d" => Input::Act(Action::DeleteRequested { card_id }),
        "m" => Input::Act(Action::MasterRequested { card_id }),
        "h" => Input::Hint,
        "?" => Input::Help,
        "t" if grading == GradingMode::Choice => Input::Act(Action::TrippySelected { card_id }),
        digits => {
            let number: u8 = digits.parse().ok()?;
            match grading {
                GradingMode::Choice => {
                    let index = (number as usize).checked_sub(1)?;
                    Input::Act(Action::OptionSelected { card_id, index })
                }
                GradingMode::Rating => {
                    let rating = Rating::from_number(number).ok()?;
                    Input::Act(Action::Rated { card_id, rating })
                }
            }
        }
    };
    Some(input)
}

fn help(grading: GradingMode) -> &'static str {
    match grading {
        GradingMode::Choice => {
            "1-9: pick an option, t: trippy, h: hint, n/enter: next card, d: delete card, m: mark mastered, q: end session"
        }
        GradingMode::Rating => {
            "1: forgot, 2: hard, 3: good, 4: easy, h: hint, n/enter: next card, d: delete card, m: mark mastered, q: end session"
        }
    }
}

/// Read the session's cards from a JSON file.
pub async fn load_cards(path: &Path) -> Fallible<Vec<StudyCard>> {
    if !path.exists() {
        return fail(format!("card file {} does not exist.", path.display()));
    }
    let text = tokio::fs::read_to_string(path).await?;
    serde_json::from_str(&text).or_else(|e| fail(format!("invalid card file: {e}")))
}

pub async fn study_cards<B: StudyBackend>(
    backend: &B,
    cards_path: &Path,
    session_id: SessionId,
    grading: GradingMode,
    mode: StudyMode,
) -> Fallible<()> {
    let cards = load_cards(cards_path).await?;
    let session = Session::start(session_id, grading, cards, Timestamp::now())?;
    let input = BufReader::new(tokio::io::stdin());
    let mut out = std::io::stdout();
    writeln!(out, "{}.", mode.title())?;
    run(session, backend, input, &mut out).await?;
    Ok(())
}

/// Drive a session from lines of input until it is over or the input ends.
async fn run<B, R, W>(
    mut session: Session,
    backend: &B,
    input: R,
    out: &mut W,
) -> Fallible<Session>
where
    B: StudyBackend,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    let mut shown: Option<CardId> = None;
    while !session.is_finished() {
        let Some(card) = session.current().cloned() else {
            break;
        };
        if shown != Some(card.id) {
            show_card(out, &session, &card)?;
            shown = Some(card.id);
        }
        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = lines.next_line().await? else {
            // Input closed: treat it as ending the session.
            let effect = session.dispatch(backend, Action::End).await?;
            report(out, &session, &card, effect)?;
            break;
        };
        match parse_input(&line, &card, session.grading()) {
            None => writeln!(out, "Unknown input. Type ? for help.")?,
            Some(Input::Help) => writeln!(out, "{}", help(session.grading()))?,
            Some(Input::Hint) => match &card.hint {
                Some(hint) => writeln!(out, "Hint: {hint}")?,
                None => writeln!(out, "No hint for this card.")?,
            },
            Some(Input::Act(action)) => match session.dispatch(backend, action).await {
                Ok(effect) => report(out, &session, &card, effect)?,
                Err(e) if e.is_stale() => log::warn!("Dropped stale response: {}", e.message()),
                Err(e) => writeln!(out, "{e}")?,
            },
        }
    }
    Ok(session)
}

fn show_card<W: Write>(out: &mut W, session: &Session, card: &StudyCard) -> Fallible<()> {
    let progress = session.progress();
    writeln!(out)?;
    writeln!(out, "Card {} of {}", progress.index + 1, progress.total)?;
    writeln!(out, "Q: {}", card.question)?;
    for (index, option) in card.options.iter().enumerate() {
        writeln!(out, "  {}. {option}", index + 1)?;
    }
    Ok(())
}

fn report<W: Write>(
    out: &mut W,
    session: &Session,
    card: &StudyCard,
    effect: Effect,
) -> Fallible<()> {
    match effect {
        Effect::Feedback(feedback) => show_feedback(out, card, &feedback),
        Effect::Transition(Transition::Finished { redirect }) => {
            let progress = session.progress();
            if redirect {
                writeln!(out, "No cards left in this session.")?;
            }
            writeln!(
                out,
                "Session complete: {} of {} cards reviewed.",
                progress.reviewed, progress.total
            )?;
            Ok(())
        }
        Effect::Transition(Transition::Showing(_) | Transition::Unchanged) => Ok(()),
    }
}

fn show_feedback<W: Write>(out: &mut W, card: &StudyCard, feedback: &Feedback) -> Fallible<()> {
    match feedback.outcome {
        Outcome::Correct => writeln!(out, "Correct!")?,
        Outcome::Incorrect => {
            writeln!(out, "Incorrect.")?;
            if let Some(answer) = feedback.correct_answer.and_then(|i| card.options.get(i)) {
                writeln!(out, "The answer is: {answer}")?;
            }
        }
        Outcome::Trippy => writeln!(out, "Marked as trippy.")?,
        Outcome::Rated(rating) => writeln!(out, "Rated {}.", rating.as_str())?,
    }
    if let Some(explanation) = &feedback.explanation {
        writeln!(out, "{explanation}")?;
    }
    if let Some(reference) = &card.reference {
        writeln!(out, "Reference: {reference}")?;
    }
    if let Some(code) = &card.code {
        writeln!(out, "{code}")?;
    }
    let receipt = &feedback.receipt;
    if let (Some(correct), Some(incorrect)) = (receipt.correct_count, receipt.incorrect_count) {
        write!(out, "This card: {correct} correct, {incorrect} incorrect")?;
        if let Some(trippy) = receipt.trippy_count {
            write!(out, ", {trippy} trippy")?;
        }
        writeln!(out)?;
    }
    Ok(())
}
