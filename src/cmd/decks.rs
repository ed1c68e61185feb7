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
use crate::types::generation::DeckInitResult;
use crate::types::generation::GeneratorKind;

pub async fn initialize_decks(client: &ApiClient, kind: GeneratorKind) -> Fallible<()> {
    let result = client.initialize_decks(kind).await?;
    for line in summary(&result) {
        println!("{line}");
    }
    Ok(())
}

fn summary(result: &DeckInitResult) -> Vec<String> {
    let mut lines = vec![format!("Created {} decks.", result.created_count())];
    if let (Some(parents), Some(children)) = (result.parent_decks, result.child_decks) {
        lines.push(format!("Parent decks: {parents}"));
        lines.push(format!("Child decks: {children}"));
    }
    for name in &result.created {
        lines.push(format!("  + {name}"));
    }
    if !result.existing.is_empty() {
        lines.push(format!("Already present: {}", result.existing.join(", ")));
    }
    if let Some(message) = &result.message {
        lines.push(message.clone());
    }
    lines
}
