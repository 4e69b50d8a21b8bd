//! Command-line interface
//!
//! `terminalx` with no subcommand opens the full-screen terminal. The other
//! subcommands run one operation headlessly and print the result.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use terminalx_conductor::blog::Category;
use terminalx_conductor::ConfigOverrides;

/// TERMINALX-9000 artificial intelligence system
#[derive(Debug, Parser)]
#[command(name = "terminalx", version, about)]
pub struct Cli {
    /// Configuration file (defaults to the user config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Base URL of the chat and blog service
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Seed for the thinking delay and status draws
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Request timeout in milliseconds
    #[arg(long, global = true, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// What to run
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Command-line values that override the loaded configuration
    pub fn overrides(&self) -> ConfigOverrides {
        let mut overrides = ConfigOverrides::new();
        if let Some(url) = &self.api_url {
            overrides = overrides.with_api_url(url.clone());
        }
        if let Some(seed) = self.seed {
            overrides = overrides.with_seed(seed);
        }
        if let Some(ms) = self.timeout_ms {
            overrides = overrides.with_timeout_ms(ms);
        }
        overrides
    }

    /// Subcommand, defaulting to the interactive terminal
    pub fn resolved_command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Chat)
    }
}

/// Subcommands
#[derive(Clone, Debug, Subcommand)]
pub enum Command {
    /// Open the full-screen terminal (default)
    Chat,

    /// Run one exchange without the full-screen UI and print the reply
    Ask {
        /// The command or message to send
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },

    /// Browse the movie database
    #[command(subcommand)]
    Movies(MoviesCommand),

    /// Read and manage blog posts
    #[command(subcommand)]
    Blog(BlogCommand),
}

/// `movies` subcommands
#[derive(Clone, Debug, Subcommand)]
pub enum MoviesCommand {
    /// Top-rated listing
    Top {
        /// Page number
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Only titles containing this text
        #[arg(long)]
        search: Option<String>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Full record for one movie
    Show {
        /// TMDB id
        id: u64,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

/// `blog` subcommands
#[derive(Clone, Debug, Subcommand)]
pub enum BlogCommand {
    /// List posts, five per page
    List {
        /// Only posts with this tag
        #[arg(long)]
        tag: Option<String>,
        /// Only posts in this category
        #[arg(long)]
        category: Option<String>,
        /// Only posts whose title or content contains this text
        #[arg(long)]
        search: Option<String>,
        /// Page number
        #[arg(long, default_value_t = 1)]
        page: usize,
    },

    /// Show one post
    Show {
        /// Post id
        id: String,
    },

    /// List every tag in use
    Tags,

    /// List every category in use
    Categories,

    /// Create a post
    Create(PostArgs),

    /// Update a post; omitted fields keep their stored values
    Update {
        /// Post id
        id: String,
        /// New values
        #[command(flatten)]
        fields: PostUpdateArgs,
    },

    /// Delete a post
    Delete {
        /// Post id
        id: String,
    },
}

/// Fields of a new post
#[derive(Clone, Debug, Args)]
pub struct PostArgs {
    /// Title
    #[arg(long)]
    pub title: String,
    /// Body; newlines separate paragraphs
    #[arg(long)]
    pub content: String,
    /// Comma-separated tags
    #[arg(long, default_value = "")]
    pub tags: String,
    /// Category
    #[arg(long)]
    pub category: Category,
}

/// Fields of an updated post
#[derive(Clone, Debug, Args)]
pub struct PostUpdateArgs {
    /// Title
    #[arg(long)]
    pub title: Option<String>,
    /// Body
    #[arg(long)]
    pub content: Option<String>,
    /// Comma-separated tags (replaces the stored list)
    #[arg(long)]
    pub tags: Option<String>,
    /// Category
    #[arg(long)]
    pub category: Option<Category>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_command_is_chat() {
        let cli = Cli::parse_from(["terminalx"]);
        assert!(matches!(cli.resolved_command(), Command::Chat));
        assert!(cli.overrides().is_empty());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["terminalx", "ask", "what", "time", "--seed", "5"]);
        match cli.resolved_command() {
            Command::Ask { message } => assert_eq!(message, vec!["what", "time"]),
            other => panic!("Expected Ask, got {other:?}"),
        }
        assert_eq!(cli.seed, Some(5));
        assert!(!cli.overrides().is_empty());
    }

    #[test]
    fn test_blog_create_parses_category() {
        let cli = Cli::parse_from([
            "terminalx",
            "blog",
            "create",
            "--title",
            "HELLO",
            "--content",
            "WORLD",
            "--category",
            "retro",
        ]);
        match cli.resolved_command() {
            Command::Blog(BlogCommand::Create(args)) => {
                assert_eq!(args.category, Category::Retro);
                assert_eq!(args.tags, "");
            }
            other => panic!("Expected blog create, got {other:?}"),
        }
    }

    #[test]
    fn test_movies_top_defaults() {
        let cli = Cli::parse_from(["terminalx", "movies", "top"]);
        match cli.resolved_command() {
            Command::Movies(MoviesCommand::Top { page, search, json }) => {
                assert_eq!(page, 1);
                assert_eq!(search, None);
                assert!(!json);
            }
            other => panic!("Expected movies top, got {other:?}"),
        }
    }
}
