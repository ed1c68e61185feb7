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

use clap::ValueEnum;
use serde::Deserialize;
use serde::Serialize;

/// Which of the server's card generators a form talks to.
#[derive(ValueEnum, Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeneratorKind {
    /// The syllabus generator, one optional topic per request.
    #[default]
    Syllabus,
    /// Programming modules, any number of topics.
    Module,
    /// School subjects, any number of topics.
    Subject,
}

impl GeneratorKind {
    pub fn modules_path(self) -> &'static str {
        match self {
            GeneratorKind::Syllabus | GeneratorKind::Module => "ai/modules",
            GeneratorKind::Subject => "ai/modules-payal",
        }
    }

    pub fn generate_path(self) -> &'static str {
        match self {
            GeneratorKind::Syllabus => "ai/generate-cards",
            GeneratorKind::Module => "ai/generate-cards-shubham",
            GeneratorKind::Subject => "ai/generate-cards-payal",
        }
    }

    /// Creates the generator's standard deck set.
    pub fn init_decks_path(self) -> &'static str {
        match self {
            GeneratorKind::Syllabus | GeneratorKind::Module => "ai/initialize-decks",
            GeneratorKind::Subject => "ai/initialize-payal-decks",
        }
    }

    /// What the picker calls its top-level entries.
    pub fn noun(self) -> &'static str {
        match self {
            GeneratorKind::Subject => "subject",
            _ => "module",
        }
    }

    pub fn accepts_many_topics(self) -> bool {
        !matches!(self, GeneratorKind::Syllabus)
    }
}

#[derive(ValueEnum, Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

#[derive(Clone, PartialEq, Debug)]
pub struct ModuleInfo {
    pub name: String,
    pub hours: Option<f64>,
    /// Topics sent along with the module list. Empty when the server only
    /// sends names; those must be fetched separately.
    pub topics: Vec<String>,
}

/// Modules arrive either as bare names or as objects.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum ModuleEntry {
    Name(String),
    Detailed {
        name: String,
        #[serde(default)]
        hours: Option<f64>,
        #[serde(default)]
        topics: Vec<String>,
    },
}

impl From<ModuleEntry> for ModuleInfo {
    fn from(entry: ModuleEntry) -> Self {
        match entry {
            ModuleEntry::Name(name) => ModuleInfo {
                name,
                hours: None,
                topics: Vec::new(),
            },
            ModuleEntry::Detailed {
                name,
                hours,
                topics,
            } => ModuleInfo {
                name,
                hours,
                topics,
            },
        }
    }
}

#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct GenerationRequest {
    pub deck_id: i64,
    pub module: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topics: Option<Vec<String>>,
    pub count: u32,
    pub difficulty: Difficulty,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Deserialize)]
pub struct GenerationResult {
    #[serde(default)]
    pub cards_generated: Option<u32>,
    #[serde(default)]
    pub cards_added: Option<u32>,
}

impl GenerationResult {
    pub fn count(&self) -> u32 {
        self.cards_generated.or(self.cards_added).unwrap_or(0)
    }
}

/// The server's report after creating its standard decks. Module decks are
/// reported as counts, subject decks as lists of names.
#[derive(Clone, PartialEq, Eq, Debug, Default, Deserialize)]
pub struct DeckInitResult {
    #[serde(default)]
    pub decks_created: Option<u32>,
    #[serde(default)]
    pub parent_decks: Option<u32>,
    #[serde(default)]
    pub child_decks: Option<u32>,
    #[serde(default)]
    pub created: Vec<String>,
    #[serde(default)]
    pub existing: Vec<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl DeckInitResult {
    pub fn created_count(&self) -> usize {
        match self.decks_created {
            Some(count) => count as usize,
            None => self.created.len(),
        }
    }
}
