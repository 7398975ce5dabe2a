use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use subspy::config::{ScrapeConfig, ServerConfig};
use subspy::listing::parse_listing;
use subspy::post::extract_post;
use subspy::server::{self, AppState};
use subspy::utils::MAX_POSTS;
use subspy::validation::{INVALID_SUBREDDIT_MSG, validate_subreddit};
use subspy::{Post, SubredditScraper};

#[derive(Debug, Parser)]
#[command(name = "subspy")]
#[command(version, about = "Scrape the newest posts and comments of a subreddit")]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// `subspy <SUBREDDIT>` is shorthand for `subspy scrape <SUBREDDIT>`
    #[command(flatten)]
    pub scrape: ScrapeArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scrape one subreddit and write the result as JSON
    Scrape(ScrapeArgs),
    /// Run the HTTP API (configured from the environment)
    Serve,
    /// Extract posts from a saved listing page without a browser
    Parse(ParseArgs),
}

#[derive(Debug, Args)]
pub struct ScrapeArgs {
    /// Subreddit name without the r/ prefix
    pub subreddit: Option<String>,

    /// Where to write the JSON result
    #[arg(short, long, default_value = "reddit_results.json")]
    pub output: PathBuf,

    /// Show the browser window
    #[arg(long)]
    pub headful: bool,
}

#[derive(Debug, Args)]
pub struct ParseArgs {
    /// Saved listing HTML
    pub file: PathBuf,

    /// Origin permalinks are resolved against
    #[arg(long, default_value = subspy::utils::DEFAULT_SITE_ORIGIN)]
    pub origin: String,
}

pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Command::Scrape(args)) => scrape(args).await,
        Some(Command::Serve) => serve().await,
        Some(Command::Parse(args)) => parse(&args),
        None => scrape(cli.scrape).await,
    }
}

async fn scrape(args: ScrapeArgs) -> Result<()> {
    let Some(raw) = args.subreddit else {
        bail!("Usage: subspy <SUBREDDIT> [--output FILE]");
    };
    let Some(subreddit) = validate_subreddit(&raw) else {
        bail!("{INVALID_SUBREDDIT_MSG}: '{raw}'");
    };

    let config = ScrapeConfig::builder().headless(!args.headful).build()?;
    let scraper = SubredditScraper::new(config)?;
    let result = scraper.scrape(subreddit).await;

    write_json(&args.output, &result)?;
    info!("Wrote results to {}", args.output.display());
    Ok(())
}

async fn serve() -> Result<()> {
    let server_config = ServerConfig::from_env()?;
    let scrape_config = ScrapeConfig::builder()
        .headless(server_config.headless)
        .build()?;
    let state = AppState::new(
        SubredditScraper::new(scrape_config)?,
        server_config.max_concurrent_scrapes,
        server_config.scrape_timeout,
    );
    server::serve(server_config.http_addr, state).await?;
    Ok(())
}

fn parse(args: &ParseArgs) -> Result<()> {
    let html = std::fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let posts: Vec<Post> = parse_listing(&html)
        .iter()
        .take(MAX_POSTS)
        .map(|raw| extract_post(raw, args.origin.trim_end_matches('/')))
        .collect();

    info!(posts = posts.len(), "Parsed {}", args.file.display());
    println!("{}", serde_json::to_string_pretty(&posts)?);
    Ok(())
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}
