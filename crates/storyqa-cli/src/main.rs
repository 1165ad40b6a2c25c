//! storyqa command-line entry point

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use storyqa_cli::{config, logging, CommentOutcome, Pipeline, Synthesizer};
use storyqa_core::{models::RunMode, storage::DEFAULT_OUTPUT_DIR};
use storyqa_jira::{JiraAuth, JiraClient};

#[derive(Parser, Debug)]
#[command(name = "storyqa")]
#[command(about = "Generate QA test cases from Jira stories", long_about = None)]
struct Args {
    /// Story issue key (overrides STORY_KEY)
    #[arg(long)]
    jira_key: Option<String>,

    /// What to produce
    #[arg(short, long, value_enum, default_value_t = Mode::Repo)]
    mode: Mode,

    /// Root directory for generated Markdown and feature files
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Also append logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Mode {
    /// Write local files only
    Repo,
    /// Create linked test issues only
    Jira,
    /// Write files and create issues
    Both,
    /// Create one aggregate test issue for the story
    Single,
}

impl From<Mode> for RunMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Repo => RunMode::Repo,
            Mode::Jira => RunMode::Jira,
            Mode::Both => RunMode::Both,
            Mode::Single => RunMode::Single,
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("❌ Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let args = Args::parse();

    logging::init(&args.log_level, args.log_file.as_deref()).context("open log file")?;

    let config = config::load(args.jira_key.as_deref())?;
    tracing::info!(
        "Jira base={} email={} token={} project={} story={} test_type={} link_type={}",
        config.base_url,
        config.credentials.email,
        config.credentials.masked_token(),
        config.project_key,
        config.story_key,
        config.test_issue_type,
        config.link_type
    );

    let client = JiraClient::new(&config.base_url, JiraAuth::from(&config.credentials))?;
    let synthesizer = Synthesizer::from_config(&config);
    let pipeline = Pipeline::new(&config, &client, &synthesizer, args.output_dir);

    let report = pipeline.run(args.mode.into()).await?;

    if let Some(CommentOutcome::Failed(reason)) = &report.comment {
        tracing::warn!("Summary comment not posted: {}", reason);
    }

    let mut line = format!(
        "✅ {}: {} test case(s), mode={}, hash={}",
        report.story_key,
        report.tests.len(),
        report.mode,
        report.fingerprint
    );
    if !report.written.is_empty() {
        line.push_str(&format!(", {} file(s) written", report.written.len()));
    }
    if !report.created.is_empty() {
        line.push_str(&format!(", created {}", report.created.join(", ")));
    }
    println!("{}", line);

    Ok(())
}
