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
use crate::forms::GenerationForm;

pub async fn generate_cards(client: &ApiClient, form: &GenerationForm) -> Fallible<()> {
    println!(
        "Generating {} flashcards using AI. This may take 30-60 seconds.",
        form.count
    );
    let result = form.submit(client).await?;
    println!("Successfully generated {} cards!", result.count());
    Ok(())
}
