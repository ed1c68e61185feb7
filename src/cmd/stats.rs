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

use chrono::NaiveDate;
use maud::DOCTYPE;
use maud::Markup;
use maud::html;

use crate::api::ApiClient;
use crate::chart::Recorder;
use crate::chart::Theme;
use crate::chart::draw_accuracy_chart;
use crate::chart::draw_count_chart;
use crate::chart::draw_retention_chart;
use crate::chart::svg::to_svg;
use crate::config::ChartConfig;
use crate::error::Fallible;
use crate::types::series::RetentionData;
use crate::types::series::ReviewHistory;
use crate::types::timestamp::Timestamp;

/// Fetch review statistics and write them to `output` as an HTML page.
pub async fn write_stats_report(
    client: &ApiClient,
    chart: ChartConfig,
    theme: Theme,
    output: &Path,
    open_report: bool,
) -> Fallible<()> {
    log::debug!("Fetching review history for {} days", chart.days);
    let history = client.review_history(chart.days).await?;
    log::debug!("Fetching retention data");
    let retention = client.retention_data().await?;

    let today = Timestamp::now().local_date();
    let page = render_report(&history, &retention, today, chart, theme);
    tokio::fs::write(output, page.into_string()).await?;
    println!("Wrote {}.", output.display());

    if open_report {
        if let Err(e) = open::that(output) {
            log::warn!("Failed to open {}: {e}", output.display());
        }
    }
    Ok(())
}

pub fn render_report(
    history: &ReviewHistory,
    retention: &RetentionData,
    today: NaiveDate,
    chart: ChartConfig,
    theme: Theme,
) -> Markup {
    let palette = theme.palette();
    let width = chart.width as f64;
    let height = chart.height as f64;

    let mut reviews = Recorder::new(width, height);
    draw_count_chart(&mut reviews, &history.counts, today, chart.days, theme);
    let mut accuracy = Recorder::new(width, height);
    draw_accuracy_chart(&mut accuracy, &history.accuracy, today, chart.days, theme);
    let mut forecast = Recorder::new(width, height);
    draw_retention_chart(&mut forecast, retention, theme);

    let style = format!(
        "body {{ background: {}; color: {}; font-family: sans-serif; margin: 2em; }}",
        palette.background, palette.text
    );
    html! {
        (DOCTYPE)
        html lang="en" data-theme=(theme.as_str()) {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { "Study statistics" }
                style { (style) }
            }
            body {
                h1 { "Study statistics" }
                section {
                    h2 { "Reviews per day" }
                    (to_svg(&reviews, palette.background))
                }
                section {
                    h2 { "Accuracy" }
                    (to_svg(&accuracy, palette.background))
                }
                section {
                    h2 { "Retention" }
                    @if retention.historical.is_empty() && retention.predictions.is_empty() {
                        p { "No retention data yet." }
                    } @else {
                        (to_svg(&forecast, palette.background))
                    }
                }
            }
        }
    }
}
