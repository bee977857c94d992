pub mod formula;
pub mod mix;

use clap::{ArgAction, Parser, Subcommand};
use formula_mix::logic::debug::{add_module_filter, set_debug_level, DebugLevel, MODULES};

#[derive(Parser)]
#[command(name = "fmx", version, about = "Build, decode and mix /TX search formulas", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Set debug level to trace (overrides verbose)
    #[arg(long = "trace", action = ArgAction::SetTrue, global = true)]
    pub trace: bool,

    /// Filter debug output to modules (comma-separated: scan,normalize,encode,decode,store)
    #[arg(long = "modules", value_name = "LIST", global = true)]
    pub modules: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Encode words into a formula
    Encode(self::formula::EncodeArgs),
    /// Decode a formula back into mode, words and count
    Decode(self::formula::DecodeArgs),
    /// Show the canonical form of a single word
    Normalize(self::formula::NormalizeArgs),
    /// Work with the mix list stored in a JSON file
    Mix(self::mix::MixCmd),
}

pub fn run() {
    let cli = Cli::parse();
    set_debug_level(DebugLevel::from_verbosity(cli.verbose, cli.trace));

    if let Some(mods) = &cli.modules {
        for m in mods.split(',').map(|s| s.trim()).filter(|s| !s.is_empty()) {
            if !MODULES.iter().any(|known| known.eq_ignore_ascii_case(m)) {
                eprintln!("warning: unknown module '{}', expected one of: {}", m, MODULES.join(","));
            }
            add_module_filter(m);
        }
    }

    let result = match &cli.command {
        Commands::Encode(args) => self::formula::run_encode(args),
        Commands::Decode(args) => self::formula::run_decode(args),
        Commands::Normalize(args) => self::formula::run_normalize(args),
        Commands::Mix(cmd) => self::mix::run(cmd),
    };

    if let Err(e) = result {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}
