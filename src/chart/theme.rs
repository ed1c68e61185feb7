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

use crate::chart::surface::Color;

#[derive(ValueEnum, Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub grid: Color,
    pub axis: Color,
    pub label: Color,
    pub bar: Color,
    pub bar_label: Color,
    pub historical: Color,
    pub predicted: Color,
    pub today: Color,
}

const LIGHT: Palette = Palette {
    background: "#ffffff",
    text: "#212121",
    grid: "#e0e0e0",
    axis: "#cccccc",
    label: "#757575",
    bar: "#2196F3",
    bar_label: "#333333",
    historical: "#4CAF50",
    predicted: "#2196F3",
    today: "#FF9800",
};

const DARK: Palette = Palette {
    background: "#1e1e1e",
    text: "#e0e0e0",
    grid: "#404040",
    axis: "#666666",
    label: "#b0b0b0",
    bar: "#4CAF50",
    bar_label: "#ffffff",
    historical: "#4CAF50",
    predicted: "#2196F3",
    today: "#FFA726",
};

impl Theme {
    pub fn palette(self) -> &'static Palette {
        match self {
            Theme::Light => &LIGHT,
            Theme::Dark => &DARK,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}
