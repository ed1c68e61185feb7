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

use chrono::NaiveDateTime;

use crate::api::ApiClient;
use crate::error::Fallible;
use crate::error::fail;
use crate::types::card::CardId;
use crate::types::schedule::CardState;
use crate::types::schedule::ScheduleEdit;

/// The range the server clamps ease factors to.
const MIN_EASE: f64 = 1.3;
const MAX_EASE: f64 = 5.0;

/// Fields to overwrite. `None` keeps the loaded value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScheduleChanges {
    pub state: Option<CardState>,
    pub due_date: Option<NaiveDateTime>,
    pub interval: Option<i64>,
    pub ease_factor: Option<f64>,
    pub repetitions: Option<i64>,
}

impl ScheduleChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Edits a card's schedule. The whole schedule is written back on save.
#[derive(Clone, Debug, PartialEq)]
pub struct ScheduleForm {
    card_id: CardId,
    edit: ScheduleEdit,
}

impl ScheduleForm {
    pub async fn load(client: &ApiClient, card_id: CardId) -> Fallible<Self> {
        let edit = client.card_progress(card_id).await?;
        Ok(Self::from_edit(card_id, edit))
    }

    pub fn from_edit(card_id: CardId, edit: ScheduleEdit) -> Self {
        Self { card_id, edit }
    }

    pub fn card_id(&self) -> CardId {
        self.card_id
    }

    pub fn edit(&self) -> &ScheduleEdit {
        &self.edit
    }

    pub fn apply(&mut self, changes: &ScheduleChanges) {
        if let Some(state) = changes.state {
            self.edit.state = state;
        }
        if let Some(due_date) = changes.due_date {
            self.edit.due_date = Some(due_date);
        }
        if let Some(interval) = changes.interval {
            self.edit.interval = interval;
        }
        if let Some(ease_factor) = changes.ease_factor {
            self.edit.ease_factor = ease_factor;
        }
        if let Some(repetitions) = changes.repetitions {
            self.edit.repetitions = repetitions;
        }
    }

    pub fn validate(&self) -> Fallible<()> {
        let edit = &self.edit;
        if !edit.ease_factor.is_finite()
            || edit.ease_factor < MIN_EASE
            || edit.ease_factor > MAX_EASE
        {
            return fail(format!("Ease factor must be between {MIN_EASE} and {MAX_EASE}"));
        }
        if edit.interval < 0 {
            return fail("Interval cannot be negative");
        }
        if edit.repetitions < 0 {
            return fail("Repetitions cannot be negative");
        }
        Ok(())
    }

    /// Validate, then write the schedule back. The form is updated with
    /// what the server stored.
    pub async fn save(&mut self, client: &ApiClient) -> Fallible<()> {
        self.validate()?;
        log::debug!("Saving schedule for card {}", self.card_id);
        self.edit = client.update_card_progress(self.card_id, &self.edit).await?;
        Ok(())
    }
}
