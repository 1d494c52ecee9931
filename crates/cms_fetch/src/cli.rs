use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use chrono::Utc;
use clap::{Args, Subcommand};
use cms_core::{ArticleSource, Error, NormalizedArticle, Result};
use crate::fetcher::ArticleFetcher;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HumanDuration(pub Duration);

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut total_seconds = 0u64;
        let mut current_number = String::new();
        let mut has_unit = false;

        for c in s.chars() {
            if c.is_ascii_digit() {
                current_number.push(c);
            } else if let Ok(num) = current_number.parse::<u64>() {
                let unit = match c {
                    's' => 1,
                    'm' => 60,
                    'h' => 3600,
                    'd' => 86400,
                    _ => return Err(format!("Invalid duration unit: {}", c)),
                };
                total_seconds = num
                    .checked_mul(unit)
                    .and_then(|secs| total_seconds.checked_add(secs))
                    .ok_or_else(|| "Duration too large".to_string())?;
                current_number.clear();
                has_unit = true;
            } else if !c.is_whitespace() {
                return Err(format!("Invalid character in duration: {}", c));
            }
        }

        // A trailing bare number counts as seconds
        if !current_number.is_empty() {
            match current_number.parse::<u64>() {
                Ok(num) => {
                    total_seconds = total_seconds
                        .checked_add(num)
                        .ok_or_else(|| "Duration too large".to_string())?;
                    has_unit = true;
                }
                Err(_) => return Err("Invalid number in duration".to_string()),
            }
        }

        if !has_unit {
            return Err("Duration must include a number".to_string());
        }

        Ok(HumanDuration(Duration::from_secs(total_seconds)))
    }
}

#[derive(Args, Debug, Clone)]
pub struct FeedArgs {
    #[command(subcommand)]
    pub command: FeedCommands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum FeedCommands {
    /// Fetch the article collection once
    Fetch {
        /// Print the normalized articles as JSON
        #[arg(long)]
        json: bool,
        /// Exit with an error when the fetch fails instead of printing an empty list
        #[arg(long)]
        strict: bool,
    },
    /// Fetch the article collection periodically
    Watch {
        /// Time between fetches (e.g. 30s, 5m, 1h15m)
        #[arg(long, default_value = "1m")]
        interval: HumanDuration,
        /// Stop after this many cycles
        #[arg(long)]
        cycles: Option<u64>,
    },
}

pub async fn handle_command(args: FeedArgs, fetcher: Arc<ArticleFetcher>) -> Result<()> {
    match args.command {
        FeedCommands::Fetch { json, strict } => {
            let articles = if strict {
                fetcher.try_fetch_articles().await?
            } else {
                fetcher.fetch_articles().await
            };
            print_articles(&articles, json)?;
        }
        FeedCommands::Watch { interval, cycles } => {
            watch(fetcher, interval.0, cycles).await?;
        }
    }
    Ok(())
}

/// Starts a fetch on every tick without waiting for the previous one, so a
/// slow CMS can leave several in flight. Only the newest result is printed.
/// After the last cycle only its own fetch is awaited; older ones still in
/// flight are already superseded and are dropped with the runtime.
async fn watch(fetcher: Arc<ArticleFetcher>, interval: Duration, cycles: Option<u64>) -> Result<()> {
    if interval.is_zero() {
        return Err(Error::Config("Watch interval must be greater than zero".to_string()));
    }

    tracing::info!("Watching {} every {}s", fetcher.endpoint(), interval.as_secs());
    let mut ticker = tokio::time::interval(interval);
    let mut cycle = 0u64;

    loop {
        ticker.tick().await;
        cycle += 1;

        let task_fetcher = fetcher.clone();
        let handle = tokio::spawn(async move {
            match task_fetcher.fetch_latest().await {
                Some(Ok(articles)) => {
                    println!("[{}] cycle {}: {} articles", Utc::now().to_rfc3339(), cycle, articles.len());
                }
                Some(Err(e)) => {
                    cms_core::source::log_failure(task_fetcher.name(), &e);
                    println!("[{}] cycle {}: 0 articles", Utc::now().to_rfc3339(), cycle);
                }
                None => tracing::info!("Cycle {} superseded by a newer fetch", cycle),
            }
        });

        if cycles.is_some_and(|max| cycle >= max) {
            let _ = handle.await;
            return Ok(());
        }
    }
}

fn print_articles(articles: &[NormalizedArticle], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(articles)?);
        return Ok(());
    }

    if articles.is_empty() {
        println!("No articles found.");
        return Ok(());
    }

    println!("Found {} articles", articles.len());
    for article in articles {
        match &article.cover_image {
            Some(cover) => println!("- [{}] {} ({}) 🖼  {}", article.id, article.title, article.slug, cover.url),
            None => println!("- [{}] {} ({})", article.id, article.title, article.slug),
        }
    }
    Ok(())
}
