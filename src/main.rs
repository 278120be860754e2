use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use std::process;
use tileswap::config::Config;
use tileswap::error::SolveResult;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file with search parameters; explicit flags still win
    #[arg(global = true, long)]
    config_file: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Solve(cmd::solve::SolveArgs),
    Score(cmd::score::ScoreArgs),
    Scramble(cmd::scramble::ScrambleArgs),
}

fn resolve_config(
    cli: &Cli,
    cli_config: &Config,
    sub_matches: &ArgMatches,
) -> SolveResult<Config> {
    let Some(path) = &cli.config_file else {
        cli_config.search.validate()?;
        return Ok(cli_config.clone());
    };

    info!("⚙️  Loading search parameters from: {}", path);
    let mut config = Config::load_from_file(path)?;
    config.search.merge_from_cli(&cli_config.search, sub_matches);
    config.search.validate()?;
    Ok(config)
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let sub_matches = match matches.subcommand() {
        Some((_, sub)) => sub,
        None => &matches,
    };

    let cli_config = match &cli.command {
        Commands::Solve(args) => &args.config,
        Commands::Score(args) => &args.config,
        Commands::Scramble(args) => &args.config,
    };

    let config = resolve_config(&cli, cli_config, sub_matches).unwrap_or_else(|e| {
        error!("❌ {}", e);
        process::exit(1);
    });

    let result = match cli.command {
        Commands::Solve(args) => cmd::solve::run(args, config),
        Commands::Score(args) => cmd::score::run(args, config),
        Commands::Scramble(args) => cmd::scramble::run(args, config),
    };

    if let Err(e) = result {
        error!("❌ {}", e);
        process::exit(1);
    }
}
