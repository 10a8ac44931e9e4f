use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

use gh_client::{OctocrabClient, Repository, TokenResolver};
use gh_review_bot::{logger, CycleOptions, Evaluator, ReviewBot, ReviewSettings};
use gh_review_config::BotConfig;

/// Keeps review labels of pull requests in sync with approval comments.
#[derive(Debug, Parser)]
#[command(name = "gh-review-bot")]
#[command(version, about)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Config file (defaults to .gh-review-bot.toml in CWD or HOME)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Watch this repository (owner/name) instead of the configured one
    #[arg(long, global = true)]
    repo: Option<Repository>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Poll the repository until interrupted
    Run {
        /// Seconds between cycles (overrides poll_interval_secs)
        #[arg(long)]
        interval: Option<u64>,

        /// Log decisions without changing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Run a single review cycle (for cron use)
    Once {
        /// Log decisions without changing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Validate the config and print the effective settings
    CheckConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    let mut config = BotConfig::load_unchecked(cli.config.as_deref())?;
    if let Some(repo) = cli.repo {
        config.owner = repo.owner;
        config.repo = repo.name;
    }
    config.validate()?;

    match cli.command {
        Commands::Run { interval, dry_run } => {
            let bot = build_bot(&config, dry_run).await?;
            let secs = interval.unwrap_or(config.poll_interval_secs).max(1);
            run_forever(&bot, Duration::from_secs(secs)).await;
        }
        Commands::Once { dry_run } => {
            let bot = build_bot(&config, dry_run).await?;
            let report = bot
                .run_cycle()
                .await
                .with_context(|| format!("Review cycle for {} failed", config.repository()))?;
            println!("{}", report);
        }
        Commands::CheckConfig => print_config(&config).await?,
    }

    Ok(())
}

/// Load `.env` when no token is exported yet
fn load_dotenv() {
    if std::env::var("GITHUB_TOKEN").is_err() {
        match dotenvy::dotenv() {
            Ok(path) => log::debug!("Loaded .env file from: {:?}", path),
            Err(_) => log::debug!(".env file not found, will rely on environment variables"),
        }
    }
}

async fn build_bot(config: &BotConfig, dry_run: bool) -> Result<ReviewBot<OctocrabClient>> {
    load_dotenv();

    let host = config.host.as_deref();
    let token = TokenResolver::new().get_token(host).await?;
    let credentials = config.credentials(token);
    match &credentials {
        Some(c) => log::info!("Authenticating with {} credentials", c.kind()),
        None => log::warn!("No credentials found, reading anonymously"),
    }

    let client = OctocrabClient::connect(host, credentials.as_ref())?;
    let settings = ReviewSettings::from_config(config)?;
    let evaluator = Evaluator::new(client, config.repository(), settings);

    ReviewBot::new(
        evaluator,
        credentials,
        CycleOptions {
            post_instructions: config.post_instructions,
            auto_merge: config.auto_merge,
            dry_run,
        },
    )
}

async fn run_forever(bot: &ReviewBot<OctocrabClient>, every: Duration) {
    log::info!(
        "Watching {} every {}s",
        bot.evaluator().repository(),
        every.as_secs()
    );

    let mut ticker = tokio::time::interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                bot.run_cycle_logged().await;
            }
            _ = tokio::signal::ctrl_c() => {
                log::info!("Interrupted, shutting down");
                break;
            }
        }
    }
}

async fn print_config(config: &BotConfig) -> Result<()> {
    load_dotenv();
    let token = TokenResolver::new()
        .get_token(config.host.as_deref())
        .await?;
    let credentials = config
        .credentials(token)
        .map_or("none", |c| c.kind());

    println!("repository:       {}", config.repository());
    println!(
        "host:             {}",
        config.host.as_deref().unwrap_or(gh_client::DEFAULT_HOST)
    );
    println!("credentials:      {}", credentials);
    println!("reviews needed:   {}", config.reviews_needed);
    println!(
        "labels:           {} -> {}",
        config.needs_review_label, config.reviewed_label
    );
    println!("approval pattern: {}", config.approval_pattern);
    println!("label transition: {:?}", config.label_transition);
    println!("instructions:     {}", config.post_instructions);
    println!(
        "auto merge:       {} ({:?})",
        config.auto_merge, config.merge_method
    );
    println!("poll interval:    {}s", config.poll_interval_secs);
    Ok(())
}
