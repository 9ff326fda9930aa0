use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tunescout_core::AttributeFilter;
use tunescout_retrieval::Config;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "tunescout", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the tune corpus (default: ~/.local/share/tunescout/tunes.json)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Tunes returned per filter (default: 3)
    #[arg(short = 'k', long, global = true)]
    top_k: Option<usize>,

    /// Verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Find reference tunes for a natural-language request
    ///
    /// The request is translated into one or more attribute filters (type,
    /// mode, meter) by the configured chat model, using the corpus's own
    /// vocabulary. Each filter ranks the whole corpus by tag similarity and
    /// contributes its top tunes, printed as a description line followed by
    /// an ABC header block (T:, M:, K:, then the notation).
    ///
    /// Requests that do not ask for tunes ("make it faster"), and any failure
    /// talking to the model, print "No reference tunes found."
    Query {
        /// The request, e.g. "a slow hornpipe in a minor key"
        #[arg(required = true)]
        text: Vec<String>,

        /// Print per-filter rankings as JSON
        #[arg(long)]
        json: bool,
    },
    /// Rank the corpus against an explicit filter (no model call)
    Rank {
        /// Tune type, e.g. jig, reel, hornpipe
        #[arg(long = "type")]
        tune_type: Option<String>,

        /// Mode, e.g. major, minor, dorian
        #[arg(long)]
        mode: Option<String>,

        /// Meter, e.g. 6/8
        #[arg(long)]
        meter: Option<String>,

        /// Print the ranking as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show corpus statistics and tag vocabulary
    Describe {
        /// Print the description exactly as the query translator sees it
        #[arg(long)]
        prompt: bool,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, clap::Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Print a single value, or the config file if no key is given
    Get { key: Option<String> },
    /// Set a value in the config file
    Set { key: String, value: String },
    /// Print the config file path
    Path,
    /// Print an example config file
    Example,
    /// Create the config file with defaults
    Init,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn load_config(db: Option<PathBuf>, top_k: Option<usize>) -> Result<Config> {
    let config = Config::load_with_overrides(db, top_k)?;
    config.validate()?;
    log::debug!(
        "Using corpus {} (top_k = {}, model = {})",
        config.database_path.display(),
        config.top_k,
        config.model
    );
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Query { text, json } => {
            let config = load_config(cli.db, cli.top_k)?;
            commands::run_query(&config, &text.join(" "), json).await?;
        }
        Commands::Rank {
            tune_type,
            mode,
            meter,
            json,
        } => {
            let config = load_config(cli.db, cli.top_k)?;
            let filter = AttributeFilter {
                tune_type,
                mode,
                meter,
            };
            commands::run_rank(&config, &filter, json)?;
        }
        Commands::Describe { prompt } => {
            let config = load_config(cli.db, cli.top_k)?;
            commands::describe_corpus(&config, prompt)?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show_config()?,
            ConfigAction::Get { key } => commands::config::get_config(key)?,
            ConfigAction::Set { key, value } => commands::config::set_config(&key, &value)?,
            ConfigAction::Path => commands::config::show_path()?,
            ConfigAction::Example => commands::config::show_example()?,
            ConfigAction::Init => commands::config::init_config()?,
        },
    }

    Ok(())
}
