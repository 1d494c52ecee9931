pub mod cli;
pub mod fetcher;
pub mod logging;
pub mod sequence;

pub use cli::{handle_command, FeedArgs, FeedCommands, HumanDuration};
pub use fetcher::ArticleFetcher;
pub use logging::{init_logging, Logger};
pub use sequence::{FetchSequencer, FetchToken};

pub mod prelude {
    pub use super::fetcher::ArticleFetcher;
    pub use cms_core::{ArticleSource, CmsConfig, Error, FetchError, NormalizedArticle, Result};
}
