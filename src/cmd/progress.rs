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

use crate::api::ApiClient;
use crate::error::Fallible;
use crate::error::fail;
use crate::forms::ScheduleChanges;
use crate::forms::ScheduleForm;
use crate::types::card::CardId;

fn print_schedule(form: &ScheduleForm) {
    let edit = form.edit();
    println!("Card {}", form.card_id());
    println!("  state:       {}", edit.state);
    match edit.due_date {
        Some(due) => println!("  due:         {}", due.format("%Y-%m-%d %H:%M")),
        None => println!("  due:         -"),
    }
    println!("  interval:    {} days", edit.interval);
    println!("  ease factor: {:.2}", edit.ease_factor);
    println!("  repetitions: {}", edit.repetitions);
    if let Some(lapses) = edit.lapses {
        println!("  lapses:      {lapses}");
    }
}

pub async fn show_progress(client: &ApiClient, card_id: CardId) -> Fallible<()> {
    let form = ScheduleForm::load(client, card_id).await?;
    print_schedule(&form);
    Ok(())
}

pub async fn edit_progress(
    client: &ApiClient,
    card_id: CardId,
    changes: &ScheduleChanges,
) -> Fallible<()> {
    if changes.is_empty() {
        return fail("nothing to change.");
    }
    let mut form = ScheduleForm::load(client, card_id).await?;
    form.apply(changes);
    form.save(client).await?;
    print_schedule(&form);
    Ok(())
}
