//! Keepsake CLI - anniversary countdowns.

mod config;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use keepsake_core::{format_date, parse_date, AnniversaryId, AnniversaryInput, Date, Period};
use keepsake_recurrence::{week_strip, Countdown, CountdownBoard, Locale};
use keepsake_storage::{JsonStorage, Storage};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[derive(Parser)]
#[command(name = "keepsake")]
#[command(about = "Anniversary countdowns and recurring dates", long_about = None)]
struct Cli {
    /// Data directory
    #[arg(long, global = true, env = "KEEPSAKE_DIR", default_value = ".keepsake")]
    data_dir: PathBuf,

    /// Treat this date as today
    #[arg(long, global = true, value_parser = parse_date)]
    now: Option<Date>,

    /// Countdown text language (zh, en)
    #[arg(long, global = true, value_parser = parse_locale)]
    locale: Option<Locale>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add an anniversary
    Add {
        /// Event name
        title: String,
        /// Target date (YYYY-MM-DD)
        #[arg(long)]
        target: String,
        /// Anchor date; defaults to today
        #[arg(long)]
        from: Option<String>,
        /// Repeat period (none, year, month, day)
        #[arg(long, default_value = "none", value_parser = parse_period)]
        repeat: Period,
        /// Show on the home card
        #[arg(long)]
        pinned: bool,
    },
    /// Change an anniversary
    Edit {
        /// Anniversary ID
        id: String,
        /// New name
        #[arg(long)]
        title: Option<String>,
        /// New target date
        #[arg(long)]
        target: Option<String>,
        /// New anchor date
        #[arg(long)]
        from: Option<String>,
        /// New repeat period
        #[arg(long, value_parser = parse_period)]
        repeat: Option<Period>,
        /// Pin or unpin
        #[arg(long)]
        pinned: Option<bool>,
    },
    /// List countdowns
    List,
    /// Show one countdown in detail
    Show {
        /// Anniversary ID
        id: String,
    },
    /// Delete an anniversary
    Delete {
        /// Anniversary ID
        id: String,
    },
    /// Show the home card (pinned or first anniversary)
    Home,
    /// Show this week's timetable header
    Week,
    /// Import records from a JSON array export
    Import {
        /// File to read
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut storage = JsonStorage::new(&cli.data_dir)
        .await
        .with_context(|| format!("opening store at {}", cli.data_dir.display()))?;
    let config = Config::load(&cli.data_dir)?;

    let today = cli.now.unwrap_or_else(|| chrono::Local::now().date_naive());
    let board = CountdownBoard::new(cli.locale.unwrap_or(config.locale));

    match cli.command {
        Commands::Add { title, target, from, repeat, pinned } => {
            let id = AnniversaryId::new();
            let list = storage
                .upsert_anniversary(AnniversaryInput {
                    id: Some(id.clone()),
                    title,
                    from,
                    target,
                    pinned,
                    repeat,
                    avatars: Some(config.default_avatars.clone()),
                })
                .await?;
            info!("{} anniversaries stored", list.len());
            println!("Added: {}", id);
        }
        Commands::Edit { id, title, target, from, repeat, pinned } => {
            let id = AnniversaryId::from(id);
            let Some(existing) = storage.load_anniversary(&id).await? else {
                bail!("Anniversary not found: {}", id);
            };
            storage
                .upsert_anniversary(AnniversaryInput {
                    id: Some(id.clone()),
                    title: title.unwrap_or(existing.title),
                    from,
                    target: target.unwrap_or(existing.target),
                    pinned: pinned.unwrap_or(existing.pinned),
                    repeat: repeat.unwrap_or(existing.repeat),
                    avatars: None,
                })
                .await?;
            println!("Updated: {}", id);
        }
        Commands::List => {
            let list = storage.list_or(Vec::new()).await;
            println!("Anniversaries ({})", list.len());
            for card in board.cards(&list, today) {
                println!("  {}", format_card(&card));
            }
        }
        Commands::Show { id } => {
            let id = AnniversaryId::from(id);
            let Some(anniversary) = storage.load_anniversary(&id).await? else {
                println!("Anniversary not found");
                return Ok(());
            };
            print_detail(&board.countdown(&anniversary, today));
        }
        Commands::Delete { id } => {
            let id = AnniversaryId::from(id);
            let list = storage.delete_anniversary(&id).await?;
            println!("Deleted: {} ({} left)", id, list.len());
        }
        Commands::Home => {
            let list = storage.list_or(Vec::new()).await;
            match board.featured(&list, today) {
                Some(card) => print_detail(&card),
                None => println!("No anniversaries yet"),
            }
        }
        Commands::Week => {
            for slot in week_strip(today, config.week_order) {
                let marker = if slot.is_today { "*" } else { " " };
                println!("{} {} {}", marker, slot.short_name, slot.day_label);
            }
        }
        Commands::Import { file } => {
            let text = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("reading {}", file.display()))?;
            let values: Vec<serde_json::Value> = serde_json::from_str(&text)
                .with_context(|| format!("{} is not a JSON array", file.display()))?;
            let total = values.len();
            let saved = storage.import_records(values).await;
            println!("Imported {} of {} records", saved, total);
        }
    }

    Ok(())
}

fn parse_period(s: &str) -> std::result::Result<Period, String> {
    match s.to_lowercase().as_str() {
        "none" => Ok(Period::None),
        "year" | "yearly" => Ok(Period::Yearly),
        "month" | "monthly" => Ok(Period::Monthly),
        "day" | "daily" => Ok(Period::Daily),
        other => Err(format!("unknown repeat period: {other}")),
    }
}

fn parse_locale(s: &str) -> std::result::Result<Locale, String> {
    Locale::parse(s).ok_or_else(|| format!("unknown locale: {s}"))
}

fn format_card(card: &Countdown) -> String {
    let a = &card.anniversary;
    let pin = if a.pinned { "*" } else { " " };
    match card.state.next_occurrence {
        Some(next) => format!(
            "{}{} | {} | {} | {} days | {}% | {}",
            pin,
            a.id,
            a.title,
            format_date(next),
            card.state.days_until,
            card.state.progress_percent,
            card.remaining_text,
        ),
        None => format!("{}{} | {} | invalid date {:?}", pin, a.id, a.title, a.target),
    }
}

fn print_detail(card: &Countdown) {
    let a = &card.anniversary;
    let s = &card.state;
    println!("Anniversary: {}", a.id);
    println!("  Title: {}", a.title);
    println!("  From: {}", a.from);
    println!("  Target: {}", a.target);
    println!("  Repeat: {}", a.repeat);
    println!("  Pinned: {}", a.pinned);
    if s.is_zeroed() {
        println!("  Dates could not be read");
        return;
    }
    if let (Some(next), Some(start)) = (s.next_occurrence, s.cycle_start) {
        println!("  Next: {}", format_date(next));
        println!("  Cycle start: {}", format_date(start));
    }
    println!("  Days left: {}", s.days_until);
    println!("  Cycle: {}/{} days ({}%)", s.days_elapsed, s.days_total, s.progress_percent);
    println!("  Remaining: {}", card.remaining_text);
}
