use clap::{Parser, Subcommand, ValueEnum};
use season_sync::{
    ContentDescriptor, InteractionContext, Invocation, SeasonSyncError, Settings, classify,
    reconcile_file, select_surface,
};
use std::path::PathBuf;
use std::process;

/// Fallback language when neither the CLI nor the settings name one
const FALLBACK_LANGUAGE: &str = "eng";

#[derive(Parser)]
#[command(name = "season-sync", version, about)]
struct Cli {
    /// Settings file to use instead of the platform default
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Reconcile a season bundle and print the merged result as JSON
    Reconcile {
        /// JSON file holding identity, ratings and translations
        bundle: PathBuf,

        /// Language to resolve the display name for
        #[arg(short, long)]
        language: Option<String>,
    },

    /// Print the progress granularity for a title
    Classify {
        /// Number of seasons the title has (omit for unstructured content)
        #[arg(long)]
        seasons: Option<usize>,

        /// Track the whole show regardless of the configured policy
        #[arg(long)]
        show_level: bool,
    },

    /// Print the surface an interaction should open
    Surface {
        #[arg(value_enum)]
        invocation: InvocationArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum InvocationArg {
    /// A one-off action
    Transient,
    /// A workspace expected to stay open
    Workspace,
    /// The toolbar icon, resolved through the configured icon action
    Icon,
}

fn load_settings(config: Option<&PathBuf>) -> Result<Settings, SeasonSyncError> {
    let settings = match config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };
    Ok(settings)
}

fn run(cli: Cli) -> Result<(), SeasonSyncError> {
    let settings = load_settings(cli.config.as_ref())?;

    match cli.command {
        Command::Reconcile { bundle, language } => {
            let season = reconcile_file(&bundle)?;

            let json = serde_json::to_string_pretty(&season)?;
            println!("{}", json);

            let preferred = language.or(settings.preferred_language);
            if let Some(name) = season.display_name(preferred.as_deref(), FALLBACK_LANGUAGE) {
                eprintln!("Display name: {}", name);
            }
            match season.identity.key() {
                Ok(key) => eprintln!("Lookup key: trakt {}", key),
                Err(e) => eprintln!("Warning: {}", e),
            }
        }
        Command::Classify {
            seasons,
            show_level,
        } => {
            let mut policy = settings.tracking;
            if show_level {
                policy.season_granularity = false;
            }

            let content = match seasons {
                Some(count) => ContentDescriptor::with_seasons(count),
                None => ContentDescriptor::unstructured(),
            };
            println!("{}", classify(&content, &policy));
        }
        Command::Surface { invocation } => {
            let invocation = match invocation {
                InvocationArg::Transient => Invocation::TransientAction,
                InvocationArg::Workspace => Invocation::PersistentWorkspace,
                InvocationArg::Icon => Invocation::IconClick(settings.icon_action),
            };
            let surface = select_surface(&InteractionContext::new(invocation))?;
            println!("{}", surface);
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
