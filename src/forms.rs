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

//! Controllers for the card generation and schedule editing dialogs. Each
//! form is validated locally before any request is made.

mod generate;
mod schedule;

pub use generate::GenerationForm;
pub use generate::TopicSelection;
pub use generate::topics_for;
pub use schedule::ScheduleChanges;
pub use schedule::ScheduleForm;
