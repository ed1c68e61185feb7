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

//! Charts for review and retention statistics.
//!
//! Every `draw_*` function clears the surface and redraws from scratch, so
//! calling one twice with the same inputs leaves the surface holding the
//! same commands.

mod bar;
mod line;
mod series;
mod surface;
pub mod svg;
mod theme;

pub use bar::draw_count_chart;
pub use line::draw_accuracy_chart;
pub use line::draw_retention_chart;
pub use surface::Recorder;
pub use theme::Theme;
