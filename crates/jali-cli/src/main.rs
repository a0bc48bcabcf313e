//! jali - generate jali lattice screens as SVG
//!
//! Usage:
//!   jali generate [-t <tile>] [-r <resolution>] [-o out.svg]   One jali from flags
//!   jali recipe <recipe.yaml>                                  One jali from a recipe
//!   jali request '<json>'                                      Replay UI messages
//!   jali tiles                                                 List tile families

mod cli;

use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cli::{CliError, GenerateArgs, RequestArgs, cmd_generate, cmd_recipe, cmd_request, cmd_tiles, print_example};

#[derive(Parser)]
#[command(name = "jali", version, about = "Procedural jali lattice generator")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// More logging (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a jali and write it as SVG.
    Generate(GenerateArgs),
    /// Generate a jali described by a YAML recipe.
    Recipe {
        /// Recipe file.
        #[arg(required_unless_present = "example")]
        path: Option<PathBuf>,

        /// Output SVG file (overrides the recipe).
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print an example recipe and exit.
        #[arg(long)]
        example: bool,
    },
    /// Replay create-jali/select-tiles/cancel messages.
    Request(RequestArgs),
    /// List available tile families.
    Tiles {
        /// Count used to build the variant lists.
        #[arg(short, long, default_value_t = 2)]
        count: usize,
    },
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = match std::env::var("RUST_LOG") {
        Ok(spec) if !spec.is_empty() => EnvFilter::new(spec),
        _ => EnvFilter::new(level),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Generate(args) => cmd_generate(&args, cli.json),
        Command::Recipe { path, output, example } => match path {
            Some(path) if !example => cmd_recipe(&path, output.as_deref(), cli.json),
            _ => {
                print_example();
                Ok(())
            }
        },
        Command::Request(args) => cmd_request(&args),
        Command::Tiles { count } => cmd_tiles(count, cli.json),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else if matches!(e, CliError::Generation(_)) {
            // Engine messages already carry their `error:` prefix.
            eprintln!("{e}");
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
