use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tokio::sync::mpsc;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use warbler::api::{self, Client, SearchOptions};
use warbler::config::Config;
use warbler::export::{self, Record};
use warbler::models::Query;

/// Warbler - search a microblogging service's web timeline and export old posts to CSV
#[derive(Parser, Debug)]
#[command(name = "warbler")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Search old posts and stream them to CSV", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (-v for debug, -vv for trace)
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search for tweets
    Tweets(TweetsArgs),
}

#[derive(Args, Debug)]
struct TweetsArgs {
    /// Output csv filename (must not already exist)
    #[arg(long, short = 'o')]
    out: PathBuf,

    /// Query text to search
    #[arg(long, short = 'q')]
    query: Option<String>,

    /// Find tweets since a certain day (e.g. 2014-07-21)
    #[arg(long)]
    since: Option<String>,

    /// Find tweets until a certain day (e.g. 2020-09-06)
    #[arg(long)]
    until: Option<String>,

    /// Find tweets sent from a certain user
    #[arg(long)]
    from: Option<String>,

    /// Find tweets sent in reply to a certain user
    #[arg(long)]
    to: Option<String>,

    /// Find tweets by a certain language (e.g. en, es, fr)
    #[arg(long)]
    lang: Option<String>,

    /// Find tweets by type of account or tweet
    #[arg(long, value_enum)]
    filter: Vec<SearchFilter>,

    /// Include tweets by type of tweet
    #[arg(long, value_enum)]
    include: Vec<TweetKind>,

    /// Exclude tweets by type of tweet
    #[arg(long, value_enum)]
    exclude: Vec<TweetKind>,

    /// Find tweets sent from certain coordinates (e.g. 35.6851508,139.7526768,0.1km)
    #[arg(long)]
    geocode: Option<String>,

    /// Find tweets nearby a certain location (e.g. tokyo)
    #[arg(long)]
    near: Option<String>,

    /// Find tweets nearby a certain location (e.g. 1km)
    #[arg(long)]
    within: Option<String>,

    /// Find tweets containing a certain url (e.g. www.example.com)
    #[arg(long)]
    url: Option<String>,

    /// Find top tweets instead of the live timeline
    #[arg(long)]
    top: bool,

    /// Set a custom user-agent
    #[arg(long)]
    user_agent: Option<String>,
}

/// Account/tweet classes accepted by `--filter`.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum SearchFilter {
    Verified,
    Follows,
    Media,
    Images,
    Twimg,
    Videos,
    Periscope,
    Vine,
    #[value(name = "consumer_video")]
    ConsumerVideo,
    #[value(name = "pro_video")]
    ProVideo,
    #[value(name = "native_video")]
    NativeVideo,
    Links,
    Hashtags,
    Nativeretweets,
    Retweets,
    Replies,
    Safe,
    News,
}

impl SearchFilter {
    fn as_str(self) -> &'static str {
        match self {
            SearchFilter::Verified => "verified",
            SearchFilter::Follows => "follows",
            SearchFilter::Media => "media",
            SearchFilter::Images => "images",
            SearchFilter::Twimg => "twimg",
            SearchFilter::Videos => "videos",
            SearchFilter::Periscope => "periscope",
            SearchFilter::Vine => "vine",
            SearchFilter::ConsumerVideo => "consumer_video",
            SearchFilter::ProVideo => "pro_video",
            SearchFilter::NativeVideo => "native_video",
            SearchFilter::Links => "links",
            SearchFilter::Hashtags => "hashtags",
            SearchFilter::Nativeretweets => "nativeretweets",
            SearchFilter::Retweets => "retweets",
            SearchFilter::Replies => "replies",
            SearchFilter::Safe => "safe",
            SearchFilter::News => "news",
        }
    }
}

/// Tweet classes accepted by `--include` and `--exclude`.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum TweetKind {
    Hashtags,
    Nativeretweets,
    Retweets,
    Replies,
}

impl TweetKind {
    fn as_str(self) -> &'static str {
        match self {
            TweetKind::Hashtags => "hashtags",
            TweetKind::Nativeretweets => "nativeretweets",
            TweetKind::Retweets => "retweets",
            TweetKind::Replies => "replies",
        }
    }
}

impl TweetsArgs {
    fn to_query(&self) -> Query {
        Query {
            text: self.query.clone().unwrap_or_default(),
            since: self.since.clone().unwrap_or_default(),
            until: self.until.clone().unwrap_or_default(),
            from: self.from.clone().unwrap_or_default(),
            to: self.to.clone().unwrap_or_default(),
            lang: self.lang.clone().unwrap_or_default(),
            filters: self.filter.iter().map(|f| f.as_str().to_string()).collect(),
            includes: self.include.iter().map(|k| k.as_str().to_string()).collect(),
            excludes: self.exclude.iter().map(|k| k.as_str().to_string()).collect(),
            geocode: self.geocode.clone().unwrap_or_default(),
            near: self.near.clone().unwrap_or_default(),
            within: self.within.clone().unwrap_or_default(),
            url: self.url.clone().unwrap_or_default(),
        }
    }
}

async fn run_tweets(args: TweetsArgs) -> Result<()> {
    let query = args.to_query();
    if query.is_empty() {
        bail!("one or more queries are required");
    }

    // refuse to clobber an existing export
    let file = File::options()
        .write(true)
        .create_new(true)
        .open(&args.out)
        .with_context(|| format!("failed to create {}", args.out.display()))?;

    let mut config = Config::load().context("failed to load configuration")?;
    if let Some(user_agent) = args.user_agent {
        config.user_agent = user_agent;
    }

    info!(query = %query.encode(), out = %args.out.display(), "starting search");

    let client = Arc::new(Client::new(&config));
    let options = SearchOptions {
        query,
        top: args.top,
        ..Default::default()
    };

    let (batches, receiver) = mpsc::channel(1);
    let exporter = export::spawn_csv_export(file, receiver);

    let mut pages = api::search_all(client, options);
    while let Some(result) = pages.recv().await {
        let page = result?;
        let records = Record::from_adaptive(&page);
        debug!(tweets = records.len(), "fetched page");

        if batches.send(records).await.is_err() {
            break;
        }
    }

    drop(batches);
    exporter.await.context("export task failed")??;

    info!("export complete");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let env_filter = if cli.quiet { "error" } else { log_level };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("warbler={}", env_filter)),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Tweets(args) => run_tweets(args).await,
    }
}
