use std::io::{self, IsTerminal};
use std::process;

use clap::{CommandFactory, Parser, ValueEnum};
use clap_complete::shells;
use owo_colors::OwoColorize;
use tripgen::commands::generate::{self, GenerateArgs};
use tripgen::logging;

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (commit: ",
    env!("TG_GIT_SHA"),
    ", built: ",
    env!("TG_BUILD_TS"),
    ")"
);

const HELP_EXAMPLES: &str = "Examples:\n  tripgen \"Paris, France\" 2025-12-20 2025-12-27\n  tripgen --pretty --save trip.json \"Lisbon, Portugal\" 2026-05-01 2026-05-04\n  tripgen --dry-run \"Rome, Italy\" 2026-06-10 2026-06-12\n  tripgen --completions bash > ~/.local/share/bash-completion/completions/tripgen";

#[derive(Debug, Parser)]
#[command(
    name = "tripgen",
    about = "Generate a travel itinerary as JSON",
    version = VERSION,
    after_help = HELP_EXAMPLES
)]
struct Cli {
    #[command(flatten)]
    generate: GenerateArgs,
    /// Print a shell completion script and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    completions: Option<CompletionShell>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

fn print_completion(shell: CompletionShell) {
    let mut cmd = Cli::command();
    let out = &mut io::stdout();
    match shell {
        CompletionShell::Bash => clap_complete::generate(shells::Bash, &mut cmd, "tripgen", out),
        CompletionShell::Zsh => clap_complete::generate(shells::Zsh, &mut cmd, "tripgen", out),
        CompletionShell::Fish => clap_complete::generate(shells::Fish, &mut cmd, "tripgen", out),
    }
}

fn report(err: &str) {
    if io::stderr().is_terminal() {
        eprintln!("{} {err}", "Error:".red().bold());
    } else {
        eprintln!("Error: {err}");
    }
}

fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        print_completion(shell);
        return;
    }

    logging::init(cli.generate.verbose, cli.generate.quiet);

    if let Err(err) = generate::run(cli.generate) {
        report(&err);
        process::exit(1);
    }
}
