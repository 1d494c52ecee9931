use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use clap::Parser;
use cms_core::config::{DEFAULT_BASE_URL, DEFAULT_IMAGE_HOST};
use cms_core::{CmsConfig, PreferenceStore, Theme};
use cms_fetch::{ArticleFetcher, FeedArgs, FeedCommands};
use cms_web::AppState;
use tokio::sync::broadcast::error::RecvError;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Fetch, render and serve the CMS article feed", long_about = None)]
pub struct Cli {
    /// Base URL of the CMS
    #[arg(long, global = true, default_value = DEFAULT_BASE_URL)]
    base_url: String,
    /// Host prepended to cover image paths
    #[arg(long, global = true, default_value = DEFAULT_IMAGE_HOST)]
    image_host: String,
    #[arg(long, global = true, default_value = "file", help = "Preference backend. Available backends: file (default), memory")]
    prefs: String,
    /// Location of the preference file for the file backend
    #[arg(long, global = true, default_value = ".cms/preferences.json")]
    prefs_path: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    #[command(flatten)]
    Feed(FeedCommands),
    /// Serve the article listing page
    Serve {
        #[arg(long, default_value = "127.0.0.1:3000")]
        addr: SocketAddr,
    },
    /// Show or change the saved theme
    Theme {
        #[command(subcommand)]
        command: ThemeCommands,
    },
}

#[derive(clap::Subcommand, Debug)]
enum ThemeCommands {
    /// Print the saved theme (light when nothing is saved)
    Get,
    /// Save a theme
    Set { theme: Theme },
    /// Switch between light and dark
    Toggle,
}

async fn handle_theme(command: ThemeCommands, prefs: &dyn PreferenceStore) -> anyhow::Result<()> {
    match command {
        ThemeCommands::Get => {
            println!("{}", Theme::load(prefs, false).await?);
        }
        ThemeCommands::Set { theme } => {
            theme.save(prefs).await?;
            println!("🎨 Theme set to {}", theme);
        }
        ThemeCommands::Toggle => {
            let theme = Theme::load(prefs, false).await?.toggle();
            theme.save(prefs).await?;
            println!("🎨 Theme set to {}", theme);
        }
    }
    Ok(())
}

fn log_preference_changes(prefs: &Arc<dyn PreferenceStore>) {
    let mut changes = prefs.subscribe();
    tokio::spawn(async move {
        loop {
            match changes.recv().await {
                Ok(change) => info!("🎨 Preference {} set to {}", change.key, change.value),
                Err(RecvError::Lagged(skipped)) => info!("Missed {} preference changes", skipped),
                Err(RecvError::Closed) => break,
            }
        }
    });
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    cms_fetch::init_logging();
    let cli = Cli::parse();

    let config = CmsConfig::new()
        .with_base_url(cli.base_url)
        .with_image_host(cli.image_host);

    match cli.command {
        Commands::Feed(command) => {
            let fetcher = Arc::new(ArticleFetcher::new(&config)?);
            cms_fetch::handle_command(FeedArgs { command }, fetcher).await?;
        }
        Commands::Serve { addr } => {
            let prefs = cms_prefs::create_store(&cli.prefs, Some(&cli.prefs_path)).await?;
            info!("💾 Preferences initialized (using {})", cli.prefs);
            log_preference_changes(&prefs);

            let fetcher = ArticleFetcher::new(&config)?;
            info!("📰 Serving articles from {}", fetcher.endpoint());
            let state = AppState {
                source: Arc::new(fetcher),
                prefs,
                image_host: config.image_host.clone(),
            };
            cms_web::serve(addr, state).await?;
        }
        Commands::Theme { command } => {
            let prefs = cms_prefs::create_store(&cli.prefs, Some(&cli.prefs_path)).await?;
            handle_theme(command, prefs.as_ref()).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use cms_prefs::MemoryPreferenceStore;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_fetch() {
        let cli = Cli::parse_from(["cms", "fetch", "--json", "--base-url", "http://localhost:1337"]);
        assert_eq!(cli.base_url, "http://localhost:1337");
        assert!(matches!(cli.command, Commands::Feed(FeedCommands::Fetch { json: true, strict: false })));
    }

    #[test]
    fn test_parse_theme_set() {
        let cli = Cli::parse_from(["cms", "--prefs", "memory", "theme", "set", "dark"]);
        assert_eq!(cli.prefs, "memory");
        assert!(matches!(cli.command, Commands::Theme { command: ThemeCommands::Set { theme: Theme::Dark } }));
        assert!(Cli::try_parse_from(["cms", "theme", "set", "purple"]).is_err());
    }

    #[tokio::test]
    async fn test_handle_theme_toggle() {
        let prefs = MemoryPreferenceStore::new();
        handle_theme(ThemeCommands::Toggle, &prefs).await.unwrap();
        assert_eq!(prefs.get(Theme::KEY).await.unwrap().as_deref(), Some("dark"));
        handle_theme(ThemeCommands::Toggle, &prefs).await.unwrap();
        assert_eq!(prefs.get(Theme::KEY).await.unwrap().as_deref(), Some("light"));
    }
}
