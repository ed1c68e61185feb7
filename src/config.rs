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

use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::chart::Theme;
use crate::error::ErrorKind;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::types::generation::GeneratorKind;
use crate::types::review::GradingMode;

/// Read from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "flashstudy.toml";

pub const DEFAULT_SERVER: &str = "http://127.0.0.1:5000";

/// Smallest chart side, in pixels, that leaves room for the axis labels.
const MIN_CHART_SIDE: u32 = 100;

const MAX_DAYS: u32 = 365;

#[derive(Deserialize, Clone, PartialEq, Debug)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Root URL of the flashcard server.
    pub server: String,
    pub theme: Theme,
    pub grading: GradingMode,
    pub generator: GeneratorKind,
    pub chart: ChartConfig,
}

#[derive(Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(default, deny_unknown_fields)]
pub struct ChartConfig {
    pub width: u32,
    pub height: u32,
    /// Length of the review history window.
    pub days: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: DEFAULT_SERVER.to_string(),
            theme: Theme::default(),
            grading: GradingMode::default(),
            generator: GeneratorKind::default(),
            chart: ChartConfig::default(),
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 350,
            days: 30,
        }
    }
}

impl Config {
    /// Load the configuration. An explicit path must exist; the default file
    /// is optional.
    pub fn load(path: Option<&Path>) -> Fallible<Self> {
        let (path, required): (PathBuf, bool) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };
        if !path.exists() {
            if required {
                return Err(ErrorReport::with_kind(
                    ErrorKind::Config,
                    format!("configuration file {} does not exist.", path.display()),
                ));
            }
            log::debug!("No configuration file, using defaults.");
            return Ok(Self::default());
        }
        log::debug!("Loading configuration from {}", path.display());
        let text = std::fs::read_to_string(&path)?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Fallible<Self> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Fallible<()> {
        if !(self.server.starts_with("http://") || self.server.starts_with("https://")) {
            return Err(invalid(format!(
                "server must be an http:// or https:// URL, got {:?}.",
                self.server
            )));
        }
        let chart = &self.chart;
        if chart.width < MIN_CHART_SIDE || chart.height < MIN_CHART_SIDE {
            return Err(invalid(format!(
                "chart width and height must be at least {MIN_CHART_SIDE}."
            )));
        }
        if chart.days < 1 || chart.days > MAX_DAYS {
            return Err(invalid(format!("chart days must be between 1 and {MAX_DAYS}.")));
        }
        Ok(())
    }
}

fn invalid(message: String) -> ErrorReport {
    ErrorReport::with_kind(ErrorKind::Config, message)
}
