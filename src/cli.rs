//! CLI interface for companion-progress
//!
//! Thin caller of the progress core: builds an [`ObservationInput`] from the
//! arguments (stamping it with the current instant), hands it to the tracker,
//! and prints the result.

use anyhow::{bail, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::{config_path, Config};
use crate::progress::ProgressTracker;
use crate::store::SqliteSummaryStore;
use crate::types::{ObservationInput, ProgressSummary, SentimentAnalysis};

#[derive(Parser)]
#[command(name = "companion-progress")]
#[command(about = "Track wellbeing progress: sessions, emotional states, topic trends", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record one observation for a subject
    Record {
        /// Subject identifier (e.g., a user id)
        subject: String,
        /// Primary emotion label from the sentiment analyzer
        #[arg(short, long)]
        emotion: Option<String>,
        /// Emotion intensity (number or label)
        #[arg(short, long)]
        intensity: Option<String>,
        /// Distress level (number or label)
        #[arg(short, long)]
        distress: Option<String>,
        /// Comma-separated topic labels
        #[arg(short, long)]
        topics: Option<String>,
        /// Raw analyzer payload as JSON (overrides the individual flags)
        #[arg(long)]
        payload: Option<String>,
    },
    /// Show a subject's stored progress summary
    Show {
        /// Subject identifier
        subject: String,
        /// Print the raw JSON form instead of the readable report
        #[arg(long)]
        json: bool,
    },
    /// Inspect or change configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,
        /// Set the SQLite database path
        #[arg(long)]
        set_database_path: Option<PathBuf>,
        /// Reset configuration to defaults
        #[arg(long)]
        reset: bool,
    },
}

/// Parse and run the CLI
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Record {
            subject,
            emotion,
            intensity,
            distress,
            topics,
            payload,
        } => {
            let sentiment = build_sentiment(emotion, intensity, distress, topics, payload)?;
            let observation = match sentiment {
                Some(sentiment) => ObservationInput::with_sentiment(Utc::now(), sentiment),
                None => ObservationInput::at(Utc::now()),
            };

            let tracker = open_tracker().await?;
            let summary = tracker.record_observation(&subject, &observation).await?;
            print_summary(&subject, &summary);
            Ok(())
        }
        Commands::Show { subject, json } => {
            let tracker = open_tracker().await?;
            match tracker.summary(&subject).await? {
                Some(summary) if json => {
                    println!("{}", serde_json::to_string_pretty(&summary)?);
                    Ok(())
                }
                Some(summary) => {
                    print_summary(&subject, &summary);
                    Ok(())
                }
                None => bail!("No progress recorded for '{subject}'"),
            }
        }
        Commands::Config {
            show,
            set_database_path,
            reset,
        } => run_config(show, set_database_path, reset),
    }
}

/// Assemble the sentiment payload from the CLI flags, if any were given.
fn build_sentiment(
    emotion: Option<String>,
    intensity: Option<String>,
    distress: Option<String>,
    topics: Option<String>,
    payload: Option<String>,
) -> Result<Option<SentimentAnalysis>> {
    if let Some(raw) = payload {
        let sentiment: SentimentAnalysis =
            serde_json::from_str(&raw).map_err(|e| anyhow::anyhow!("Invalid payload: {e}"))?;
        return Ok(Some(sentiment));
    }

    match emotion {
        Some(primary_emotion) => Ok(Some(SentimentAnalysis {
            primary_emotion,
            intensity: intensity.map(parse_scalar).unwrap_or(serde_json::Value::Null),
            distress: distress.map(parse_scalar).unwrap_or(serde_json::Value::Null),
            detected_topics: topics.unwrap_or_default(),
        })),
        None if intensity.is_some() || distress.is_some() || topics.is_some() => {
            bail!("--intensity/--distress/--topics require --emotion")
        }
        None => Ok(None),
    }
}

/// Interpret a flag value as a JSON number when it parses as one, otherwise
/// keep it as a plain label.
fn parse_scalar(raw: String) -> serde_json::Value {
    match raw.parse::<f64>() {
        Ok(n) => serde_json::Number::from_f64(n)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::String(raw)),
        Err(_) => serde_json::Value::String(raw),
    }
}

fn print_summary(subject: &str, summary: &ProgressSummary) {
    println!("Progress for '{subject}':");
    println!("  sessions:     {}", summary.session_count);
    println!(
        "  last session: {}",
        summary
            .last_session_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "never".to_string())
    );
    println!(
        "  recent emotional states ({}):",
        summary.emotional_states.len()
    );
    for sample in &summary.emotional_states {
        println!(
            "    [{}] {}",
            sample.timestamp.format("%Y-%m-%d %H:%M"),
            sample.emotion
        );
    }
    if summary.topic_frequency.is_empty() {
        println!("  topics: none yet");
    } else {
        println!("  topics:");
        for (topic, count) in &summary.topic_frequency {
            println!("    {topic}: {count}");
        }
    }
}

async fn open_tracker() -> Result<ProgressTracker> {
    let config = Config::load()?;
    let store = SqliteSummaryStore::new(&config.storage.database_path).await?;
    Ok(ProgressTracker::new(Arc::new(store)))
}

fn run_config(show: bool, set_database_path: Option<PathBuf>, reset: bool) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults.");
        return Ok(());
    }

    if let Some(path) = set_database_path {
        let mut config = Config::load()?;
        config.storage.database_path = path;
        config.save()?;
        println!("Database path updated.");
        return Ok(());
    }

    if show {
        let config = Config::load()?;
        println!("Config file: {}", config_path()?.display());
        println!("Database:    {}", config.storage.database_path.display());
        return Ok(());
    }

    bail!("Nothing to do. Use --show, --set-database-path, or --reset.")
}
