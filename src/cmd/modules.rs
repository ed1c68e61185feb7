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
use crate::forms::topics_for;
use crate::types::generation::GeneratorKind;

/// List the generator's modules, or the topics of one module.
pub async fn list_modules(
    client: &ApiClient,
    kind: GeneratorKind,
    module: Option<&str>,
) -> Fallible<()> {
    let modules = client.modules(kind).await?;
    match module {
        None => {
            for module in &modules {
                match module.hours {
                    Some(hours) => println!("{} ({hours}h)", module.name),
                    None => println!("{}", module.name),
                }
            }
        }
        Some(name) => {
            let Some(module) = modules.iter().find(|m| m.name == name) else {
                return fail(format!("no {} named {name:?}.", kind.noun()));
            };
            let topics = topics_for(client, kind, module).await?;
            if topics.is_empty() {
                println!("No topics available.");
            }
            for topic in topics {
                println!("{topic}");
            }
        }
    }
    Ok(())
}
