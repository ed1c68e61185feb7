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
use crate::types::generation::Difficulty;
use crate::types::generation::GenerationRequest;
use crate::types::generation::GenerationResult;
use crate::types::generation::GeneratorKind;
use crate::types::generation::ModuleInfo;

pub const DEFAULT_COUNT: u32 = 50;

pub const MAX_COUNT: u32 = 100;

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum TopicSelection {
    /// Cover the whole module.
    #[default]
    All,
    Single(String),
    Many(Vec<String>),
}

impl TopicSelection {
    /// Build a selection from the topics picked on the command line.
    pub fn from_picked(mut topics: Vec<String>) -> Self {
        topics.retain(|topic| !topic.trim().is_empty());
        match topics.len() {
            0 => TopicSelection::All,
            1 => TopicSelection::Single(topics.remove(0)),
            _ => TopicSelection::Many(topics),
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct GenerationForm {
    pub kind: GeneratorKind,
    pub deck_id: i64,
    pub module: String,
    pub topics: TopicSelection,
    pub count: u32,
    pub difficulty: Difficulty,
}

impl GenerationForm {
    /// A blank form, as shown when the dialog opens.
    pub fn new(kind: GeneratorKind, deck_id: i64) -> Self {
        Self {
            kind,
            deck_id,
            module: String::new(),
            topics: TopicSelection::All,
            count: DEFAULT_COUNT,
            difficulty: Difficulty::default(),
        }
    }

    /// Check the form and build the request body for this generator.
    pub fn validate(&self) -> Fallible<GenerationRequest> {
        let module = self.module.trim();
        if module.is_empty() {
            return fail(format!("Please select a {}", self.kind.noun()));
        }
        if self.count < 1 || self.count > MAX_COUNT {
            return fail(format!("Please enter a number between 1 and {MAX_COUNT}"));
        }
        let (topic, topics) = if self.kind.accepts_many_topics() {
            let topics = match &self.topics {
                TopicSelection::All => None,
                TopicSelection::Single(topic) => Some(vec![topic.clone()]),
                TopicSelection::Many(topics) if topics.is_empty() => None,
                TopicSelection::Many(topics) => Some(topics.clone()),
            };
            (None, topics)
        } else {
            let topic = match &self.topics {
                TopicSelection::All => None,
                TopicSelection::Single(topic) => Some(topic.clone()),
                TopicSelection::Many(topics) => match topics.as_slice() {
                    [] => None,
                    [topic] => Some(topic.clone()),
                    _ => {
                        return fail(format!(
                            "The {} generator takes a single topic",
                            self.kind.noun()
                        ));
                    }
                },
            };
            (topic, None)
        };
        Ok(GenerationRequest {
            deck_id: self.deck_id,
            module: module.to_string(),
            topic,
            topics,
            count: self.count,
            difficulty: self.difficulty,
        })
    }

    /// Validate, then send the request. Nothing is sent if validation fails.
    pub async fn submit(&self, client: &ApiClient) -> Fallible<GenerationResult> {
        let request = self.validate()?;
        log::debug!(
            "Generating {} cards from {} into deck {}",
            request.count,
            request.module,
            request.deck_id
        );
        let result = client.generate_cards(self.kind, &request).await?;
        log::debug!("Generated {} cards", result.count());
        Ok(result)
    }
}

/// Topics for a module. Uses the list sent with the module when there is one.
pub async fn topics_for(
    client: &ApiClient,
    kind: GeneratorKind,
    module: &ModuleInfo,
) -> Fallible<Vec<String>> {
    if !module.topics.is_empty() {
        return Ok(module.topics.clone());
    }
    client.topics(kind, &module.name).await
}
