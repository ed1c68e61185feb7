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

use std::path::PathBuf;

use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::NaiveTime;
use clap::Parser;
use clap::Subcommand;

use crate::api::ApiClient;
use crate::chart::Theme;
use crate::cmd::decks::initialize_decks;
use crate::cmd::generate::generate_cards;
use crate::cmd::modules::list_modules;
use crate::cmd::progress::edit_progress;
use crate::cmd::progress::show_progress;
use crate::cmd::stats::write_stats_report;
use crate::cmd::study::StudyMode;
use crate::cmd::study::study_cards;
use crate::config::Config;
use crate::error::Fallible;
use crate::forms::GenerationForm;
use crate::forms::ScheduleChanges;
use crate::forms::TopicSelection;
use crate::types::card::CardId;
use crate::types::generation::Difficulty;
use crate::types::generation::GeneratorKind;
use crate::types::review::GradingMode;
use crate::types::review::SessionId;
use crate::types::schedule::CardState;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file. Defaults to `flashstudy.toml`.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Root URL of the flashcard server.
    #[arg(long, global = true)]
    server: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Study the cards of a session.
    Study {
        /// JSON file with the session's cards.
        #[arg(long)]
        cards: PathBuf,
        /// The server's id for the session.
        #[arg(long)]
        session: i64,
        /// How answers are graded.
        #[arg(long)]
        grading: Option<GradingMode>,
        /// Which cards the session was built from.
        #[arg(long, default_value = "all")]
        mode: StudyMode,
    },
    /// Write review statistics to an HTML file.
    Stats {
        /// Where to write the report.
        #[arg(long, default_value = "stats.html")]
        output: PathBuf,
        /// Length of the review history window, in days.
        #[arg(long)]
        days: Option<u32>,
        /// Chart colours.
        #[arg(long)]
        theme: Option<Theme>,
        /// Open the report in the browser.
        #[arg(long)]
        open: bool,
    },
    /// Generate cards with the server's AI generator.
    Generate {
        /// Deck to add the cards to.
        #[arg(long)]
        deck: i64,
        /// Module or subject to generate from.
        #[arg(long)]
        module: String,
        /// Topic to focus on. Repeat for generators that take several.
        #[arg(long = "topic")]
        topics: Vec<String>,
        #[arg(long, default_value_t = 50)]
        count: u32,
        #[arg(long, default_value = "medium")]
        difficulty: Difficulty,
        #[arg(long)]
        generator: Option<GeneratorKind>,
    },
    /// List the modules a generator offers.
    Modules {
        #[arg(long)]
        generator: Option<GeneratorKind>,
        /// List this module's topics instead.
        #[arg(long)]
        topics: Option<String>,
    },
    /// Create the server's module or subject decks.
    Decks {
        #[command(subcommand)]
        action: DecksCommand,
    },
    /// Show or edit a card's schedule.
    Progress {
        #[command(subcommand)]
        action: ProgressCommand,
    },
}

#[derive(Subcommand)]
enum DecksCommand {
    /// Create the decks a generator draws from. Existing decks are kept.
    Init {
        #[arg(long)]
        generator: Option<GeneratorKind>,
    },
}

#[derive(Subcommand)]
enum ProgressCommand {
    /// Print a card's schedule.
    Get { card: i64 },
    /// Overwrite fields of a card's schedule.
    Set {
        card: i64,
        #[arg(long)]
        state: Option<CardState>,
        /// Due date, as `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM:SS`.
        #[arg(long, value_parser = parse_due_date)]
        due: Option<NaiveDateTime>,
        /// Interval in days.
        #[arg(long)]
        interval: Option<i64>,
        #[arg(long)]
        ease: Option<f64>,
        #[arg(long)]
        repetitions: Option<i64>,
    },
}

fn parse_due_date(s: &str) -> Fallible<NaiveDateTime> {
    if let Ok(datetime) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Ok(datetime);
    }
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")?;
    Ok(date.and_time(NaiveTime::MIN))
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(server) = cli.server {
        config.server = server;
    }
    config.validate()?;
    let client = ApiClient::new(&config.server);

    match cli.command {
        Command::Study {
            cards,
            session,
            grading,
            mode,
        } => {
            let grading = grading.unwrap_or(config.grading);
            study_cards(&client, &cards, SessionId(session), grading, mode).await
        }
        Command::Stats {
            output,
            days,
            theme,
            open,
        } => {
            if let Some(days) = days {
                config.chart.days = days;
                config.validate()?;
            }
            let theme = theme.unwrap_or(config.theme);
            write_stats_report(&client, config.chart, theme, &output, open).await
        }
        Command::Generate {
            deck,
            module,
            topics,
            count,
            difficulty,
            generator,
        } => {
            let mut form = GenerationForm::new(generator.unwrap_or(config.generator), deck);
            form.module = module;
            form.topics = TopicSelection::from_picked(topics);
            form.count = count;
            form.difficulty = difficulty;
            generate_cards(&client, &form).await
        }
        Command::Modules { generator, topics } => {
            let kind = generator.unwrap_or(config.generator);
            list_modules(&client, kind, topics.as_deref()).await
        }
        Command::Decks { action } => match action {
            DecksCommand::Init { generator } => {
                let kind = generator.unwrap_or(config.generator);
                initialize_decks(&client, kind).await
            }
        },
        Command::Progress { action } => match action {
            ProgressCommand::Get { card } => show_progress(&client, CardId(card)).await,
            ProgressCommand::Set {
                card,
                state,
                due,
                interval,
                ease,
                repetitions,
            } => {
                let changes = ScheduleChanges {
                    state,
                    due_date: due,
                    interval,
                    ease_factor: ease,
                    repetitions,
                };
                edit_progress(&client, CardId(card), &changes).await
            }
        },
    }
}
