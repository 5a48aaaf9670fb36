use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use fastauto_core::{Method, SecurityType};

#[derive(Parser)]
#[command(name = "fastauto")]
#[command(about = "Scaffold fastify-autoroutes routes and fastify-autosecurity handlers")]
#[command(version)]
#[command(after_help = "Examples:
  fastauto route users.ts                  create users route
  fastauto route users/:userId.ts          create users/{userId} route
  fastauto route users/:userId/photos.ts   create users/{userId}/photos route
  fastauto security bearer bearerToken.ts  create bearer security")]
pub struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet output (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Project directory (default: current directory)
    #[arg(long, global = true, env = "FASTAUTO_PROJECT")]
    pub project: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create fastauto configuration file
    Init {
        /// Overwrite an existing fastauto.json
        #[arg(short, long)]
        force: bool,
    },

    /// Create a route file
    Route {
        /// Route file path relative to the routes directory (e.g., users/:userId.ts)
        route: String,

        /// Route is a field of a specific item
        #[arg(long)]
        field: bool,

        /// Methods to generate: get, put, patch, post, delete, options, head
        /// (default: suggested for the route type)
        #[arg(short, long, value_delimiter = ',')]
        methods: Vec<Method>,

        /// Print the generated file instead of writing it
        #[arg(short, long)]
        dry_run: bool,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Create a security handler file
    Security {
        /// Security type: bearer (API key header) or basic (HTTP basic auth)
        kind: SecurityType,

        /// File name inside the security directory (e.g., bearerToken.ts)
        name: String,

        /// Print the generated file instead of writing it
        #[arg(short, long)]
        dry_run: bool,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Show how a route path is classified
    Classify {
        /// Route file path (e.g., users/:userId/photos.ts)
        route: String,

        /// Route is a field of a specific item
        #[arg(long)]
        field: bool,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g., baseDir, format.enabled)
        key: String,
    },

    /// Set a config value
    Set {
        /// Config key (e.g., routes)
        key: String,

        /// Value to set (e.g., "api" or "true")
        value: String,
    },

    /// List all config values
    List,

    /// Show config file path
    Path,
}
