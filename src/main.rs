use cipherforge::config::Config;
use cipherforge::corpus;
use cipherforge::error::{CfResult, CipherForgeError};
use cipherforge::model::{load_model_from_path, save_model_to_path, FrequencyModel};
use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use std::path::Path;
use std::process;
use std::sync::Arc;
use tracing::{error, info, warn};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Persisted bigram model (CSV)
    #[arg(global = true, short, long, default_value = "data/freq_model.csv")]
    model: String,

    /// Reference text file, or "builtin" for the bundled English sample. Repeatable.
    #[arg(global = true, long)]
    corpus: Vec<String>,

    /// JSON config; explicit command-line flags still win
    #[arg(global = true, long)]
    config: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    BuildModel(cmd::build::BuildArgs),
    Decrypt(cmd::decrypt::DecryptArgs),
    Score(cmd::score::ScoreArgs),
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    if cli.debug {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    } else {
        tracing_subscriber::fmt::init();
    }

    if let Err(e) = run(cli, &matches) {
        error!("❌ FATAL: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli, matches: &ArgMatches) -> CfResult<()> {
    info!("🚀 Initializing CipherForge...");

    match &cli.command {
        Commands::BuildModel(args) => {
            if cli.corpus.is_empty() {
                return Err(CipherForgeError::Config(
                    "build-model needs at least one --corpus source".to_string(),
                ));
            }
            let model = corpus::build_model_from_sources(&cli.corpus)?;
            save_model_to_path(&model, &cli.model)?;
            cmd::build::run(args, &model);
            Ok(())
        }
        Commands::Decrypt(args) => {
            let config = resolve_config(&cli, &args.config, matches, "decrypt")?;
            let model = Arc::new(resolve_model(&cli)?);
            cmd::decrypt::run(args, config, model)
        }
        Commands::Score(args) => {
            let config = resolve_config(&cli, &args.config, matches, "score")?;
            let model = Arc::new(resolve_model(&cli)?);
            cmd::score::run(args, &config, model)
        }
    }
}

/// JSON config (when given) overlaid with the flags typed for this subcommand.
fn resolve_config(
    cli: &Cli,
    cli_config: &Config,
    matches: &ArgMatches,
    subcommand: &str,
) -> CfResult<Config> {
    let Some(path) = &cli.config else {
        cli_config.validate()?;
        return Ok(cli_config.clone());
    };

    info!("⚙️  Loading config from: {}", path);
    let mut config = Config::load_from_file(path)?;
    if let Some(sub_matches) = matches.subcommand_matches(subcommand) {
        config.merge_from_cli(cli_config, sub_matches);
    }
    config.validate()?;
    Ok(config)
}

/// Loads the persisted model, or bootstraps it from `--corpus` and persists it.
fn resolve_model(cli: &Cli) -> CfResult<FrequencyModel> {
    if Path::new(&cli.model).exists() {
        let model = load_model_from_path(&cli.model)?;
        if !cli.corpus.is_empty() {
            warn!("⚠️  Model file exists; ignoring --corpus sources.");
        }
        return Ok(model);
    }

    if cli.corpus.is_empty() {
        return Err(CipherForgeError::MissingModel(format!(
            "'{}' not found and no --corpus given to build it",
            cli.model
        )));
    }

    info!("📂 Model '{}' not found; building from corpus.", cli.model);
    let model = corpus::build_model_from_sources(&cli.corpus)?;
    save_model_to_path(&model, &cli.model)?;
    Ok(model)
}
