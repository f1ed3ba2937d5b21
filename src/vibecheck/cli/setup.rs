use clap::{Parser, Subcommand};
use std::path::PathBuf;
use vibecheck::model::{Amount, Mood};

/// Returns the version string, including the git hash for non-release builds.
/// Format for releases: "v0.3.1"
/// Format for dev builds: "v0.3.1 (dev abc1234)"
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            format!("v{}", VERSION)
        } else {
            format!("v{} (dev {})", VERSION, GIT_HASH)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "vibe", version = get_version())]
#[command(about = "Mood-tagged expense ledger in a plain text file", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Ledger directory (default: $VIBECHECK_HOME or the platform data dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Record an expense (or income with --income)
    #[command(alias = "a")]
    Add {
        /// Amount, e.g. 12.50
        amount: Amount,

        /// How it felt: name (impulse-tax), title or emoji
        #[arg(short, long)]
        mood: Mood,

        /// Record as income instead of expense
        #[arg(long)]
        income: bool,

        /// Free-form note
        #[arg(short, long, default_value = "")]
        note: String,

        /// Category, stored as a "[Category]" prefix on the note
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Show the latest records, newest first
    #[command(alias = "r")]
    Recent {
        /// How many records (default from config, 10)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Show every record, oldest first
    #[command(alias = "ls")]
    List,

    /// Totals, today's net, regret split and daily moods
    #[command(alias = "s")]
    Summary,

    /// Remove every record
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Print the ledger file path
    Path,

    /// Get or set configuration
    Config {
        /// Configuration key (e.g., recent-limit)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// List the available moods
    Moods,
}
